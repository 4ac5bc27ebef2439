//! Dataset loader: local file first, remote fallback second.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::data::RemoteClient;
use crate::domain::{DataSources, Observation, is_excluded_territory};
use crate::error::PipelineError;
use crate::io::ingest::{RowError, parse_observations};

/// Which source actually produced the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataOrigin {
    Local(PathBuf),
    Remote(String),
}

impl fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataOrigin::Local(path) => write!(f, "{}", path.display()),
            DataOrigin::Remote(url) => write!(f, "{url}"),
        }
    }
}

/// What happened during the load.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub origin: DataOrigin,
    pub rows_read: usize,
    pub rows_used: usize,
    pub row_errors: Vec<RowError>,
}

#[derive(Debug, Clone)]
pub struct LoadedData {
    pub observations: Vec<Observation>,
    pub report: LoadReport,
}

/// Load the dataset, trying the local path and then the remote URL.
pub fn load(sources: &DataSources) -> Result<LoadedData, PipelineError> {
    load_with(sources, |url| RemoteClient::new()?.fetch_csv(url))
}

/// `load` with an injectable remote fetcher.
pub fn load_with<F>(sources: &DataSources, fetch_remote: F) -> Result<LoadedData, PipelineError>
where
    F: FnOnce(&str) -> Result<String, String>,
{
    let local_err = match load_local(&sources.local) {
        Ok(data) => return Ok(data),
        Err(e) => e,
    };
    tracing::warn!(path = %sources.local.display(), error = %local_err, "local dataset unavailable");

    let Some(url) = sources.remote.as_deref() else {
        return Err(PipelineError::DataUnavailable {
            local: local_err.to_string(),
            remote: "no remote source configured".to_string(),
        });
    };

    tracing::info!(%url, "falling back to remote dataset");
    let remote_result = fetch_remote(url)
        .and_then(|body| from_reader(body.as_bytes(), DataOrigin::Remote(url.to_string())));

    remote_result.map_err(|remote_err| PipelineError::DataUnavailable {
        local: local_err.to_string(),
        remote: remote_err,
    })
}

fn load_local(path: &Path) -> Result<LoadedData, PipelineError> {
    let label = path.display().to_string();
    let file = File::open(path).map_err(|e| PipelineError::source_failed(&label, format!("failed to open: {e}")))?;
    from_reader(file, DataOrigin::Local(path.to_path_buf())).map_err(|e| PipelineError::source_failed(&label, e))
}

/// Parse a dataset from any reader.
///
/// A source is rejected when it has zero usable rows, or when every usable
/// row belongs to an excluded territory (nothing would survive enrichment).
pub fn from_reader<R: Read>(reader: R, origin: DataOrigin) -> Result<LoadedData, String> {
    let parsed = parse_observations(reader)?;

    if parsed.observations.is_empty() {
        return Err(format!(
            "no usable rows ({} read, {} rejected)",
            parsed.rows_read,
            parsed.row_errors.len()
        ));
    }

    if parsed.observations.iter().all(|o| is_excluded_territory(&o.region)) {
        return Err(format!(
            "no rows remain after excluding territories ({} usable rows)",
            parsed.observations.len()
        ));
    }

    if !parsed.row_errors.is_empty() {
        tracing::warn!(
            source = %origin,
            rejected = parsed.row_errors.len(),
            "rows excluded due to typing failures"
        );
    }
    tracing::info!(source = %origin, rows = parsed.observations.len(), "dataset loaded");

    Ok(LoadedData {
        report: LoadReport {
            origin,
            rows_read: parsed.rows_read,
            rows_used: parsed.observations.len(),
            row_errors: parsed.row_errors,
        },
        observations: parsed.observations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = "date,state,cases,deaths\n2020-03-01,Ohio,3,0\n";

    fn sources(local: &str, remote: Option<&str>) -> DataSources {
        DataSources {
            local: PathBuf::from(local),
            remote: remote.map(str::to_string),
        }
    }

    #[test]
    fn falls_back_to_remote_when_local_is_missing() {
        let src = sources("/definitely/not/here.csv", Some("https://example.test/data.csv"));
        let data = load_with(&src, |_| Ok(GOOD.to_string())).unwrap();
        assert_eq!(data.report.origin, DataOrigin::Remote("https://example.test/data.csv".to_string()));
        assert_eq!(data.observations.len(), 1);
    }

    #[test]
    fn both_sources_failing_is_data_unavailable() {
        let src = sources("/definitely/not/here.csv", Some("https://example.test/data.csv"));
        let err = load_with(&src, |_| Err("connection refused".to_string())).unwrap_err();
        match err {
            PipelineError::DataUnavailable { local, remote } => {
                assert!(local.contains("failed to open"));
                assert_eq!(remote, "connection refused");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn remote_with_wrong_schema_is_rejected() {
        let src = sources("/definitely/not/here.csv", Some("https://example.test/data.csv"));
        let err = load_with(&src, |_| Ok("a,b\n1,2\n".to_string())).unwrap_err();
        assert!(matches!(err, PipelineError::DataUnavailable { .. }));
    }

    #[test]
    fn no_remote_configured() {
        let src = sources("/definitely/not/here.csv", None);
        let err = load_with(&src, |_| unreachable!()).unwrap_err();
        assert!(err.to_string().contains("no remote source configured"));
    }

    #[test]
    fn zero_usable_rows_is_a_source_failure() {
        let err = from_reader("date,state,cases,deaths\nx,Ohio,1,1\n".as_bytes(), DataOrigin::Remote("u".into()))
            .unwrap_err();
        assert!(err.contains("no usable rows"));
    }

    #[test]
    fn territory_only_local_source_falls_back_to_remote() {
        let mut local = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut local, b"date,state,cases,deaths\n2020-03-02,Guam,1,0\n").unwrap();

        let src = DataSources {
            local: local.path().to_path_buf(),
            remote: Some("https://example.test/data.csv".to_string()),
        };
        let data = load_with(&src, |_| Ok(GOOD.to_string())).unwrap();
        assert_eq!(data.report.origin, DataOrigin::Remote("https://example.test/data.csv".to_string()));

        let err = load_with(&src, |_| Ok("date,state,cases,deaths\n2020-03-02,Puerto Rico,4,1\n".to_string()))
            .unwrap_err();
        match err {
            PipelineError::DataUnavailable { local, remote } => {
                assert!(local.contains("excluding territories"), "{local}");
                assert!(remote.contains("excluding territories"), "{remote}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
