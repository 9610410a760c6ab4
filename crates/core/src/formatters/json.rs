use crate::Result;
use crate::metrics::MetricsRecord;
use crate::table::OutputRow;

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
}

/// JSON formatter for the joined output table
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, rows: &[OutputRow]) -> Result<String> {
        convert_to_json(rows, &self.config)
    }
}

/// Converts output rows to a JSON array. Rows without metrics carry only
/// `URL_ID` and `URL`.
pub fn convert_to_json(rows: &[OutputRow], config: &JsonConfig) -> Result<String> {
    if config.pretty { Ok(serde_json::to_string_pretty(rows)?) } else { Ok(serde_json::to_string(rows)?) }
}

/// Converts a single metrics record to a JSON object
pub fn record_to_json(record: &MetricsRecord, pretty: bool) -> Result<String> {
    if pretty { Ok(serde_json::to_string_pretty(record)?) } else { Ok(serde_json::to_string(record)?) }
}
