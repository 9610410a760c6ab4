pub mod document;
pub mod error;
pub mod extract;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod formatters;
pub mod lexicon;
pub mod metrics;
pub mod parse;
#[cfg(feature = "fetch")]
pub mod pipeline;
pub mod readability;
pub mod sentiment;
pub mod syllables;
pub mod table;
pub mod tokenize;

pub use document::{Document, TitlePolicy, artifact_path, render_artifact};
pub use error::{Result, SententiaError};
pub use extract::{ExtractedArticle, Layout, extract_article};
#[cfg(feature = "fetch")]
pub use fetch::{FetchConfig, build_client, fetch_file, fetch_url, fetch_with_client};
pub use formatters::{CsvConfig, CsvFormatter, JsonConfig, JsonFormatter, TableFormat, TextConfig, TextFormatter};
pub use formatters::{convert_to_csv, convert_to_json, record_to_json, record_to_text, write_csv};
pub use lexicon::{Lexicon, LexiconConfig, LexiconConfigBuilder, LexiconSet, load_master_dictionary, load_stop_words};
pub use metrics::{AnalysisReport, Analyzer, METRIC_COLUMNS, MetricValue, Metrics, MetricsRecord, MetricsTable};
#[cfg(feature = "fetch")]
pub use pipeline::{ExtractionConfig, ExtractionConfigBuilder, ExtractionReport, extract_all};
pub use readability::ReadabilityRecord;
pub use sentiment::SentimentScores;
pub use table::{InputRow, OutputRow, join, read_input, read_input_from};
