use std::io::Write;

use crate::Result;
use crate::metrics::METRIC_COLUMNS;
use crate::table::OutputRow;

/// Every output column, in order: the input key columns then the metrics.
pub const OUTPUT_COLUMNS: [&str; 15] = [
    "URL_ID",
    "URL",
    METRIC_COLUMNS[0],
    METRIC_COLUMNS[1],
    METRIC_COLUMNS[2],
    METRIC_COLUMNS[3],
    METRIC_COLUMNS[4],
    METRIC_COLUMNS[5],
    METRIC_COLUMNS[6],
    METRIC_COLUMNS[7],
    METRIC_COLUMNS[8],
    METRIC_COLUMNS[9],
    METRIC_COLUMNS[10],
    METRIC_COLUMNS[11],
    METRIC_COLUMNS[12],
];

/// Configuration for CSV output
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Field delimiter (default: `,`)
    pub delimiter: u8,
    /// Write the header row
    pub include_header: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self { delimiter: b',', include_header: true }
    }
}

/// CSV formatter for the joined output table
pub struct CsvFormatter {
    config: CsvConfig,
}

impl CsvFormatter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, rows: &[OutputRow]) -> Result<String> {
        convert_to_csv(rows, &self.config)
    }
}

/// Writes output rows as CSV. Rows without metrics get empty metric cells.
pub fn write_csv<W: Write>(rows: &[OutputRow], writer: W, config: &CsvConfig) -> Result<()> {
    let mut writer = ::csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .from_writer(writer);

    if config.include_header {
        writer.write_record(OUTPUT_COLUMNS)?;
    }

    for row in rows {
        let metrics = match &row.metrics {
            Some(metrics) => metrics.values(),
            None => Default::default(),
        };

        let keys = [row.url_id.as_str(), row.url.as_str()];
        writer.write_record(keys.into_iter().chain(metrics.iter().map(String::as_str)))?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts output rows to a CSV string.
pub fn convert_to_csv(rows: &[OutputRow], config: &CsvConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(rows, &mut buffer, config)?;

    String::from_utf8(buffer).map_err(|e| crate::SententiaError::SerializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::lexicon::LexiconSet;
    use crate::metrics::Analyzer;
    use crate::table::{InputRow, join};

    fn rows() -> Vec<OutputRow> {
        let analyzer = Analyzer::new(LexiconSet::from_lists(&["a"], &["good"], &["bad"]));
        let report = analyzer.analyze_all(&[Document::new("1", "A good day.")]);
        let inputs = vec![
            InputRow::new("1", "https://example.com/1"),
            InputRow::new("2", "https://example.com/2"),
        ];
        join(&inputs, &report.table)
    }

    #[test]
    fn test_header_and_column_count() {
        let csv = convert_to_csv(&rows(), &CsvConfig::default()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("URL_ID,URL,POSITIVE SCORE,NEGATIVE SCORE,POLARITY SCORE"));
        assert!(lines[0].ends_with("PERSONAL PRONOUNS,AVERAGE WORD LENGTH"));
        assert_eq!(lines[0].split(',').count(), 15);
        assert!(lines[1].starts_with("1,https://example.com/1,1,0,"));
    }

    #[test]
    fn test_missing_metrics_are_empty_cells() {
        let csv = convert_to_csv(&rows(), &CsvConfig::default()).unwrap();
        let last = csv.lines().last().unwrap();
        assert_eq!(last, format!("2,https://example.com/2{}", ",".repeat(13)));
    }

    #[test]
    fn test_no_header_and_custom_delimiter() {
        let config = CsvConfig { delimiter: b'\t', include_header: false };
        let csv = CsvFormatter::new(config).convert(&rows()).unwrap();

        assert_eq!(csv.lines().count(), 2);
        assert_eq!(csv.lines().next().unwrap().split('\t').count(), 15);
    }
}
