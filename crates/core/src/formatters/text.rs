use crate::metrics::{METRIC_COLUMNS, MetricValue, MetricsRecord};

/// Configuration for plain text output
#[derive(Debug, Clone)]
pub struct TextConfig {
    /// Include the `URL_ID` header line
    pub include_header: bool,
    /// Decimal places for ratio metrics (None = full precision)
    pub precision: Option<usize>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self { include_header: true, precision: Some(4) }
    }
}

/// Plain text formatter for a single metrics record
pub struct TextFormatter {
    config: TextConfig,
}

impl TextFormatter {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, record: &MetricsRecord) -> String {
        record_to_text(record, &self.config)
    }
}

/// Renders a record as aligned `NAME  value` lines.
pub fn record_to_text(record: &MetricsRecord, config: &TextConfig) -> String {
    let width = METRIC_COLUMNS.iter().map(|c| c.len()).max().unwrap_or(0);
    let mut output = String::new();

    if config.include_header {
        output.push_str(&format!("{:<width$}  {}\n", "URL_ID", record.url_id, width = width));
    }

    for (column, value) in METRIC_COLUMNS.iter().zip(record.metrics.typed_values()) {
        let value = match (config.precision, value) {
            (Some(places), MetricValue::Ratio(ratio)) => format!("{:.*}", places, ratio),
            _ => value.to_string(),
        };
        output.push_str(&format!("{:<width$}  {}\n", column, value, width = width));
    }

    output
}
