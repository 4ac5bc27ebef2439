//! HTTP fallback source for the dataset.
//!
//! The remote file has the same schema as the local CSV; we fetch it whole and
//! hand the body to the regular CSV ingest.

use std::time::Duration;

use reqwest::blocking::Client;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct RemoteClient {
    client: Client,
}

impl RemoteClient {
    pub fn new() -> Result<Self, String> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| format!("failed to build HTTP client: {e}"))?;
        Ok(Self { client })
    }

    /// Download the body at `url` as text.
    pub fn fetch_csv(&self, url: &str) -> Result<String, String> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| format!("request failed: {e}"))?;

        if !resp.status().is_success() {
            return Err(format!("request failed with status {}", resp.status()));
        }

        let body = resp
            .text()
            .map_err(|e| format!("failed to read response body: {e}"))?;

        // A repository "blob" page returns HTML with a 200; catch it here so the
        // error names the real problem instead of a missing CSV column.
        if looks_like_html(&body) {
            return Err("response is an HTML page, not CSV".to_string());
        }

        Ok(body)
    }
}

fn looks_like_html(body: &str) -> bool {
    let lower: String = body
        .trim_start()
        .chars()
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();
    lower.starts_with("<!doctype html") || lower.starts_with("<html")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_html_bodies() {
        assert!(looks_like_html("\n  <!DOCTYPE html><html>"));
        assert!(looks_like_html("<html lang=\"en\">"));
        assert!(!looks_like_html("date,state,cases,deaths\n"));
        assert!(!looks_like_html(""));
    }
}
