//! Input URL table and the left join that produces the output table.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::metrics::{Metrics, MetricsRecord, MetricsTable};
use crate::{Result, SententiaError};

/// One row of the input table. Extra columns are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InputRow {
    #[serde(rename = "URL_ID")]
    pub url_id: String,
    #[serde(rename = "URL")]
    pub url: String,
}

impl InputRow {
    pub fn new(url_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self { url_id: url_id.into(), url: url.into() }
    }
}

/// Reads the input table from a CSV file with `URL_ID` and `URL` headers.
pub fn read_input(path: &Path) -> Result<Vec<InputRow>> {
    if !path.exists() {
        return Err(SententiaError::FileNotFound(path.to_path_buf()));
    }

    let file = std::fs::File::open(path)?;
    read_input_from(file)
}

/// Reads the input table from any CSV reader.
pub fn read_input_from<R: Read>(reader: R) -> Result<Vec<InputRow>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();

    for row in reader.deserialize() {
        let row: InputRow = row?;
        rows.push(row);
    }

    Ok(rows)
}

/// One row of the output table: the input row plus its metrics, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRow {
    #[serde(rename = "URL_ID")]
    pub url_id: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,
}

/// Left-joins metrics onto the input rows.
///
/// Every input row appears exactly once, in input order; rows without a
/// metrics record keep `metrics: None`.
///
/// # Example
///
/// ```rust
/// use sententia_core::{InputRow, MetricsTable, join};
///
/// let inputs = vec![InputRow::new("1", "https://example.com/a")];
/// let rows = join(&inputs, &MetricsTable::default());
/// assert_eq!(rows.len(), 1);
/// assert!(rows[0].metrics.is_none());
/// ```
pub fn join(inputs: &[InputRow], table: &MetricsTable) -> Vec<OutputRow> {
    let by_id: HashMap<&str, &MetricsRecord> = table.records().iter().map(|r| (r.url_id.as_str(), r)).collect();

    inputs
        .iter()
        .map(|row| OutputRow {
            url_id: row.url_id.clone(),
            url: row.url.clone(),
            metrics: by_id.get(row.url_id.as_str()).map(|r| r.metrics.clone()),
        })
        .collect()
}
