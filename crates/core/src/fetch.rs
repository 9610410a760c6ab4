//! Content fetching from URLs and files.
//!
//! Article pages are fetched over HTTP/HTTPS; a single [`Client`] can be built
//! once with [`build_client`] and shared by every extraction task.

use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::{Result, SententiaError};

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: "Mozilla/5.0 (compatible; Sententia/0.1)".to_string() }
    }
}

/// Builds an HTTP client honouring the configured timeout and User-Agent.
pub fn build_client(config: &FetchConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(SententiaError::HttpError)
}

/// Fetches HTML content from a URL with a fresh client.
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let client = build_client(config)?;
    fetch_with_client(&client, url, config).await
}

/// Fetches HTML content from a URL with an existing client.
///
/// # Errors
///
/// Returns [`SententiaError::InvalidUrl`] for unparsable URLs,
/// [`SententiaError::Timeout`] when the request exceeds the timeout and
/// [`SententiaError::HttpStatus`] for any non-success status.
pub async fn fetch_with_client(client: &Client, url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| SententiaError::InvalidUrl(e.to_string()))?;

    if !matches!(parsed_url.scheme(), "http" | "https") {
        return Err(SententiaError::InvalidUrl(format!(
            "unsupported scheme {} (expected http or https)",
            parsed_url.scheme()
        )));
    }

    let response = client
        .get(parsed_url)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                SententiaError::Timeout { timeout: config.timeout }
            } else {
                SententiaError::HttpError(e)
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(SententiaError::HttpStatus { status: status.as_u16(), url: url.to_string() });
    }

    Ok(response.text().await?)
}

/// Reads HTML content from a local file.
pub fn fetch_file(path: &Path) -> Result<String> {
    if !path.exists() {
        Err(SententiaError::FileNotFound(path.to_path_buf()))
    } else {
        fs::read_to_string(path).map_err(SententiaError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 30);
        assert!(config.user_agent.contains("Sententia"));
    }

    #[test]
    fn test_fetch_url_invalid() {
        let config = FetchConfig::default();
        let result = std::thread::spawn(move || {
            tokio::runtime::Runtime::new()
                .unwrap()
                .block_on(fetch_url("not-a-url", &config))
        })
        .join()
        .unwrap();

        assert!(matches!(result, Err(SententiaError::InvalidUrl(_))));
    }

    #[test]
    fn test_fetch_url_unsupported_scheme() {
        let config = FetchConfig::default();
        let result = std::thread::spawn(move || {
            tokio::runtime::Runtime::new()
                .unwrap()
                .block_on(fetch_url("ftp://example.com/article", &config))
        })
        .join()
        .unwrap();

        assert!(matches!(result, Err(SententiaError::InvalidUrl(_))));
    }

    #[test]
    fn test_fetch_file_not_found() {
        let result = fetch_file(Path::new("/nonexistent/path/file.html"));
        assert!(matches!(result, Err(SententiaError::FileNotFound(_))));
    }

    #[test]
    fn test_url_validation() {
        assert!(Url::parse("http://example.com").is_ok());
        assert!(Url::parse("https://example.com").is_ok());
        assert!(Url::parse("example.com").is_err()); // Missing scheme
    }
}
