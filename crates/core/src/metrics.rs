//! Per-document metrics records and the analyzer that produces them.
//!
//! [`Analyzer`] owns the loaded lexicons and runs both paths for a document:
//! cleaned tokens into the sentiment scorer, raw text into the readability
//! scorer. Batches are sharded across threads with rayon; the lexicons are
//! only ever read.

use std::fmt;

use rayon::prelude::*;
use serde::Serialize;

use crate::document::Document;
use crate::lexicon::LexiconSet;
use crate::readability::{self, ReadabilityRecord};
use crate::sentiment::{self, SentimentScores};
use crate::tokenize::clean;
use crate::{Result, SententiaError};

/// Metric column names, in output order.
pub const METRIC_COLUMNS: [&str; 13] = [
    "POSITIVE SCORE",
    "NEGATIVE SCORE",
    "POLARITY SCORE",
    "SUBJECTIVITY SCORE",
    "AVERAGE SENTENCE LENGTH",
    "PERCENTAGE OF COMPLEX WORDS",
    "FOG INDEX",
    "AVERAGE NUMBER OF WORDS PER SENTENCE",
    "COMPLEX WORD COUNT",
    "WORD COUNT",
    "SYLLABLE PER WORD",
    "PERSONAL PRONOUNS",
    "AVERAGE WORD LENGTH",
];

/// The thirteen metric values of one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    #[serde(rename = "POSITIVE SCORE")]
    pub positive_score: usize,
    #[serde(rename = "NEGATIVE SCORE")]
    pub negative_score: usize,
    #[serde(rename = "POLARITY SCORE")]
    pub polarity_score: f64,
    #[serde(rename = "SUBJECTIVITY SCORE")]
    pub subjectivity_score: f64,
    #[serde(rename = "AVERAGE SENTENCE LENGTH")]
    pub average_sentence_length: f64,
    #[serde(rename = "PERCENTAGE OF COMPLEX WORDS")]
    pub percentage_complex_words: f64,
    #[serde(rename = "FOG INDEX")]
    pub fog_index: f64,
    #[serde(rename = "AVERAGE NUMBER OF WORDS PER SENTENCE")]
    pub average_words_per_sentence: f64,
    #[serde(rename = "COMPLEX WORD COUNT")]
    pub complex_word_count: usize,
    #[serde(rename = "WORD COUNT")]
    pub word_count: usize,
    #[serde(rename = "SYLLABLE PER WORD")]
    pub syllable_per_word: f64,
    #[serde(rename = "PERSONAL PRONOUNS")]
    pub personal_pronouns: usize,
    #[serde(rename = "AVERAGE WORD LENGTH")]
    pub average_word_length: f64,
}

impl Metrics {
    pub fn new(sentiment: SentimentScores, readability: ReadabilityRecord) -> Self {
        Self {
            positive_score: sentiment.positive_score,
            negative_score: sentiment.negative_score,
            polarity_score: sentiment.polarity,
            subjectivity_score: sentiment.subjectivity,
            average_sentence_length: readability.average_sentence_length,
            percentage_complex_words: readability.percentage_complex_words,
            fog_index: readability.fog_index,
            average_words_per_sentence: readability.average_words_per_sentence,
            complex_word_count: readability.complex_word_count,
            word_count: readability.word_count,
            syllable_per_word: readability.syllable_per_word,
            personal_pronouns: readability.personal_pronouns,
            average_word_length: readability.average_word_length,
        }
    }

    /// Metric values in [`METRIC_COLUMNS`] order, tagged as counts or ratios.
    pub fn typed_values(&self) -> [MetricValue; 13] {
        use MetricValue::{Count, Ratio};
        [
            Count(self.positive_score),
            Count(self.negative_score),
            Ratio(self.polarity_score),
            Ratio(self.subjectivity_score),
            Ratio(self.average_sentence_length),
            Ratio(self.percentage_complex_words),
            Ratio(self.fog_index),
            Ratio(self.average_words_per_sentence),
            Count(self.complex_word_count),
            Count(self.word_count),
            Ratio(self.syllable_per_word),
            Count(self.personal_pronouns),
            Ratio(self.average_word_length),
        ]
    }

    /// Metric values as strings, in [`METRIC_COLUMNS`] order.
    pub fn values(&self) -> [String; 13] {
        self.typed_values().map(|value| value.to_string())
    }
}

/// A single metric value. Counts are integers; everything else is a ratio,
/// even when it happens to be whole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Count(usize),
    Ratio(f64),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Count(n) => write!(f, "{}", n),
            MetricValue::Ratio(r) => write!(f, "{}", r),
        }
    }
}

/// One metrics record, keyed by the document identifier.
///
/// Created once per document and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsRecord {
    #[serde(rename = "URL_ID")]
    pub url_id: String,
    #[serde(flatten)]
    pub metrics: Metrics,
}

impl MetricsRecord {
    pub fn new(url_id: impl Into<String>, sentiment: SentimentScores, readability: ReadabilityRecord) -> Self {
        Self { url_id: url_id.into(), metrics: Metrics::new(sentiment, readability) }
    }
}

/// Metrics records for every successfully analyzed document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsTable {
    records: Vec<MetricsRecord>,
}

impl MetricsTable {
    pub fn new(records: Vec<MetricsRecord>) -> Self {
        Self { records }
    }

    pub fn get(&self, url_id: &str) -> Option<&MetricsRecord> {
        self.records.iter().find(|r| r.url_id == url_id)
    }

    pub fn records(&self) -> &[MetricsRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Outcome of analyzing a batch of documents.
#[derive(Debug, Default)]
pub struct AnalysisReport {
    pub table: MetricsTable,
    /// Documents left out of the table, with the reason.
    pub failures: Vec<(String, SententiaError)>,
}

/// Runs sentiment and readability scoring with a fixed set of lexicons.
///
/// # Example
///
/// ```rust
/// use sententia_core::{Analyzer, Document, LexiconSet};
///
/// let lexicons = LexiconSet::from_lists(&["this", "i"], &["love", "good", "product"], &[]);
/// let analyzer = Analyzer::new(lexicons);
/// let record = analyzer.analyze(&Document::new("1", "I love this good good product.")).unwrap();
/// assert_eq!(record.metrics.positive_score, 4);
/// ```
#[derive(Debug, Clone)]
pub struct Analyzer {
    lexicons: LexiconSet,
}

impl Analyzer {
    pub fn new(lexicons: LexiconSet) -> Self {
        Self { lexicons }
    }

    pub fn lexicons(&self) -> &LexiconSet {
        &self.lexicons
    }

    /// Computes the metrics record for one document.
    ///
    /// # Errors
    ///
    /// Returns [`SententiaError::EmptyDocument`] for text without sentences or words.
    pub fn analyze(&self, document: &Document) -> Result<MetricsRecord> {
        let tokens = clean(&document.raw_text, &self.lexicons.stop_words);
        let sentiment = sentiment::score(&tokens, &self.lexicons.positive, &self.lexicons.negative);
        let readability = readability::analyze(&document.raw_text)?;

        tracing::debug!(id = %document.id, tokens = tokens.len(), words = readability.word_count, "analyzed document");

        Ok(MetricsRecord::new(document.id.clone(), sentiment, readability))
    }

    /// Analyzes documents in parallel, keeping their order in the table.
    ///
    /// A document that fails is logged and reported in
    /// [`AnalysisReport::failures`]; it does not stop the batch.
    pub fn analyze_all(&self, documents: &[Document]) -> AnalysisReport {
        let results: Vec<(String, Result<MetricsRecord>)> = documents
            .par_iter()
            .map(|doc| (doc.id.clone(), self.analyze(doc)))
            .collect();

        let mut report = AnalysisReport::default();
        let mut records = Vec::with_capacity(results.len());

        for (id, result) in results {
            match result {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "skipping document");
                    report.failures.push((id, e));
                }
            }
        }

        report.table = MetricsTable::new(records);
        tracing::info!(
            analyzed = report.table.len(),
            skipped = report.failures.len(),
            "analysis finished"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> Analyzer {
        Analyzer::new(LexiconSet::from_lists(
            &["this", "i", "the", "a"],
            &["love", "good", "product", "success"],
            &["bad", "failure", "loss"],
        ))
    }

    #[test]
    fn test_sentiment_scenario() {
        let record = analyzer()
            .analyze(&Document::new("1", "I love this good good product."))
            .unwrap();

        assert_eq!(record.url_id, "1");
        assert_eq!(record.metrics.positive_score, 4);
        assert_eq!(record.metrics.negative_score, 0);
        assert!((record.metrics.polarity_score - 1.0).abs() < 1e-4);
        assert!((record.metrics.subjectivity_score - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_readability_uses_raw_text() {
        let record = analyzer()
            .analyze(&Document::new("1", "I love this good good product."))
            .unwrap();

        // Stop words and the period still count as words here.
        assert_eq!(record.metrics.word_count, 7);
        assert_eq!(record.metrics.personal_pronouns, 1);
        assert!((record.metrics.average_sentence_length - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let analyzer = analyzer();
        let doc = Document::new("7", "The loss was bad. Success followed the failure, and we were glad.");
        assert_eq!(analyzer.analyze(&doc).unwrap(), analyzer.analyze(&doc).unwrap());
    }

    #[test]
    fn test_analyze_all_keeps_order_and_reports_failures() {
        let docs = vec![
            Document::new("b", "Good product. Bad loss."),
            Document::new("empty", "   "),
            Document::new("a", "A success story."),
        ];

        let report = analyzer().analyze_all(&docs);
        let ids: Vec<&str> = report.table.records().iter().map(|r| r.url_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, "empty");
        assert!(matches!(report.failures[0].1, SententiaError::EmptyDocument { .. }));
    }

    #[test]
    fn test_values_follow_column_order() {
        let record = analyzer().analyze(&Document::new("1", "Good product.")).unwrap();
        let values = record.metrics.values();

        assert_eq!(values.len(), METRIC_COLUMNS.len());
        assert_eq!(values[0], "2");
        assert_eq!(values[1], "0");
        assert_eq!(values[9], "3");
    }

    #[test]
    fn test_serialized_field_names() {
        let record = analyzer().analyze(&Document::new("1", "Good product.")).unwrap();
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["URL_ID"], "1");
        for column in METRIC_COLUMNS {
            assert!(json.get(column).is_some(), "missing {}", column);
        }
    }

    #[test]
    fn test_table_lookup() {
        let analyzer = analyzer();
        let table = MetricsTable::new(vec![analyzer.analyze(&Document::new("x", "Good.")).unwrap()]);
        assert!(table.get("x").is_some());
        assert!(table.get("y").is_none());
        assert_eq!(table.len(), 1);
    }
}
