use chrono::NaiveDate;

/// Boundary error carried up to `main`: a message plus the process exit code.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Errors raised by the load/filter pipeline.
///
/// Only the load stage is allowed to fail fatally; `InvalidRange` is a
/// boundary rejection of user input. Everything downstream (enrichment and
/// aggregation) is total.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    /// A single source could not produce a usable dataset.
    #[error("{source_name}: {reason}")]
    Source { source_name: String, reason: String },

    /// Neither the local file nor the remote fallback produced a dataset.
    #[error("dataset unavailable (local: {local}; remote: {remote})")]
    DataUnavailable { local: String, remote: String },

    #[error("invalid date range: {from} is after {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },
}

impl PipelineError {
    pub fn source_failed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        PipelineError::Source {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        let code = match err {
            PipelineError::InvalidRange { .. } => 2,
            PipelineError::Source { .. } | PipelineError::DataUnavailable { .. } => 4,
        };
        AppError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_range_maps_to_usage_exit_code() {
        let from = NaiveDate::from_ymd_opt(2020, 5, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2020, 4, 1).unwrap();
        let app: AppError = PipelineError::InvalidRange { from, to }.into();
        assert_eq!(app.exit_code(), 2);
        assert_eq!(app.to_string(), "invalid date range: 2020-05-01 is after 2020-04-01");
    }

    #[test]
    fn data_unavailable_is_fatal() {
        let app: AppError = PipelineError::DataUnavailable {
            local: "missing".to_string(),
            remote: "timeout".to_string(),
        }
        .into();
        assert_eq!(app.exit_code(), 4);
        assert!(app.to_string().contains("local: missing"));
    }
}
