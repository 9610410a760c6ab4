pub mod csv;
pub mod json;
pub mod text;

pub use self::csv::{CsvConfig, CsvFormatter, OUTPUT_COLUMNS, convert_to_csv, write_csv};
pub use json::{JsonConfig, JsonFormatter, convert_to_json, record_to_json};
pub use text::{TextConfig, TextFormatter, record_to_text};

/// Output format for the joined metrics table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    #[default]
    Csv,
    Json,
}
