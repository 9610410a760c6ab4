//! Concurrent article extraction.
//!
//! [`extract_all`] downloads every input URL with a bounded number of
//! workers, extracts the article and writes `<URL_ID>.txt` into the articles
//! directory. A URL that fails is reported, never fatal to the batch.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::document::artifact_path;
use crate::extract::extract_article;
use crate::fetch::{FetchConfig, build_client, fetch_with_client};
use crate::table::InputRow;
use crate::{Result, SententiaError};

/// Configuration for the extraction stage.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Maximum number of URLs fetched at once (default: 6)
    pub workers: usize,
    /// Directory the artifacts are written to
    pub articles_dir: PathBuf,
    pub fetch: FetchConfig,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self { workers: 6, articles_dir: PathBuf::from("extracted_articles"), fetch: FetchConfig::default() }
    }
}

impl ExtractionConfig {
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder::default()
    }
}

/// Builder for [`ExtractionConfig`]
#[derive(Debug, Default)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    pub fn articles_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.articles_dir = dir.into();
        self
    }

    pub fn timeout(mut self, timeout: u64) -> Self {
        self.config.fetch.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.fetch.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> ExtractionConfig {
        self.config
    }
}

/// What happened to one input row during extraction.
#[derive(Debug)]
pub struct ExtractionReport {
    pub url_id: String,
    pub url: String,
    /// Path of the written artifact, or why there is none.
    pub outcome: Result<PathBuf>,
}

impl ExtractionReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Fetches and extracts every row, writing one artifact per success.
///
/// Reports come back in input order whatever order the tasks finish in.
///
/// # Errors
///
/// Returns [`SententiaError::ConfigError`] when `workers` is zero, and an
/// I/O error when the articles directory cannot be created. Per-URL failures
/// end up in [`ExtractionReport::outcome`], including ids that cannot be used
/// as file names (see [`artifact_path`]); those rows are never fetched.
pub async fn extract_all(rows: &[InputRow], config: &ExtractionConfig) -> Result<Vec<ExtractionReport>> {
    if config.workers == 0 {
        return Err(SententiaError::ConfigError("workers must be at least 1".to_string()));
    }

    tokio::fs::create_dir_all(&config.articles_dir).await?;

    let client = build_client(&config.fetch)?;
    let semaphore = Arc::new(Semaphore::new(config.workers));
    let mut handles = Vec::with_capacity(rows.len());

    for row in rows {
        let client = client.clone();
        let semaphore = Arc::clone(&semaphore);
        let fetch = config.fetch.clone();
        let path = artifact_path(&config.articles_dir, &row.url_id);
        let row = row.clone();

        handles.push(tokio::spawn(async move {
            let outcome = match (path, semaphore.acquire_owned().await) {
                (Err(e), _) => Err(e),
                (Ok(path), Ok(_permit)) => extract_one(&client, &row.url, &path, &fetch).await,
                (Ok(_), Err(e)) => Err(SententiaError::TaskError(e.to_string())),
            };
            ExtractionReport { url_id: row.url_id, url: row.url, outcome }
        }));
    }

    let mut reports = Vec::with_capacity(handles.len());
    for (handle, row) in handles.into_iter().zip(rows) {
        let report = handle.await.unwrap_or_else(|e| ExtractionReport {
            url_id: row.url_id.clone(),
            url: row.url.clone(),
            outcome: Err(SententiaError::TaskError(e.to_string())),
        });

        match &report.outcome {
            Ok(path) => tracing::debug!(id = %report.url_id, path = %path.display(), "wrote artifact"),
            Err(e) => tracing::warn!(id = %report.url_id, url = %report.url, error = %e, "extraction failed"),
        }
        reports.push(report);
    }

    let extracted = reports.iter().filter(|r| r.is_success()).count();
    tracing::info!(extracted, failed = reports.len() - extracted, "extraction finished");

    Ok(reports)
}

async fn extract_one(client: &reqwest::Client, url: &str, path: &Path, fetch: &FetchConfig) -> Result<PathBuf> {
    let html = fetch_with_client(client, url, fetch).await?;
    let article = extract_article(&html)?;

    tokio::fs::write(path, article.to_artifact()).await?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn run<F: std::future::Future<Output = T> + Send + 'static, T: Send + 'static>(future: F) -> T {
        std::thread::spawn(move || tokio::runtime::Runtime::new().unwrap().block_on(future))
            .join()
            .unwrap()
    }

    #[test]
    fn test_config_defaults_and_builder() {
        let config = ExtractionConfig::default();
        assert_eq!(config.workers, 6);
        assert_eq!(config.articles_dir, PathBuf::from("extracted_articles"));

        let config = ExtractionConfig::builder().workers(2).articles_dir("out").timeout(5).user_agent("test").build();
        assert_eq!(config.workers, 2);
        assert_eq!(config.articles_dir, PathBuf::from("out"));
        assert_eq!(config.fetch.timeout, 5);
        assert_eq!(config.fetch.user_agent, "test");
    }

    #[test]
    fn test_zero_workers_rejected() {
        let tmp = TempDir::new().unwrap();
        let config = ExtractionConfig::builder().workers(0).articles_dir(tmp.path()).build();

        let result = run(async move { extract_all(&[], &config).await });
        assert!(matches!(result, Err(SententiaError::ConfigError(_))));
    }

    #[test]
    fn test_failures_are_reported_in_input_order() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("articles");
        let config = ExtractionConfig::builder().workers(2).articles_dir(&dir).build();
        let rows = vec![
            InputRow::new("1", "not-a-url"),
            InputRow::new("2", "ftp://example.com/x"),
            InputRow::new("3", ""),
        ];

        let reports = run(async move { extract_all(&rows, &config).await }).unwrap();

        assert!(dir.is_dir());
        let ids: Vec<&str> = reports.iter().map(|r| r.url_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert!(reports.iter().all(|r| matches!(r.outcome, Err(SententiaError::InvalidUrl(_)))));
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn test_unsafe_ids_fail_before_fetching() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("articles");
        let config = ExtractionConfig::builder().workers(2).articles_dir(&dir).build();
        let rows = vec![
            InputRow::new("../../x", "not-a-url"),
            InputRow::new("a/b", "not-a-url"),
            InputRow::new("", "not-a-url"),
            InputRow::new("123.0", "not-a-url"),
        ];

        let reports = run(async move { extract_all(&rows, &config).await }).unwrap();

        for report in &reports[..3] {
            assert!(matches!(report.outcome, Err(SententiaError::ConfigError(_))), "{:?}", report);
        }
        // A dotted id is a valid file name; it fails later, on the URL.
        assert!(matches!(reports[3].outcome, Err(SententiaError::InvalidUrl(_))));
        assert!(!tmp.path().join("x.txt").exists());
    }
}
