//! Readability metrics on raw document text.
//!
//! Unlike the sentiment path, nothing is cleaned here: stop words and
//! punctuation tokens count as words.
//!
//! # Example
//!
//! ```rust
//! use sententia_core::readability::analyze;
//!
//! let record = analyze("We like short sentences. They read well.").unwrap();
//! assert_eq!(record.total_sentences, 2);
//! assert_eq!(record.word_count, 9);
//! assert_eq!(record.personal_pronouns, 1);
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::syllables::count_syllables;
use crate::tokenize::{split_sentences, tokenize_words};
use crate::{Result, SententiaError};

static PRONOUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(?:i|we|my|ours|us)\b").unwrap());

/// Word endings whose syllables are left out of the syllable-per-word ratio.
const SILENT_SUFFIXES: &[&str] = &["es", "ed"];

/// Readability metrics for one document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReadabilityRecord {
    pub total_sentences: usize,
    /// Words summed over sentences.
    pub total_words: usize,
    pub average_sentence_length: f64,
    pub percentage_complex_words: f64,
    pub fog_index: f64,
    /// Same value as `average_sentence_length`; both columns are reported.
    pub average_words_per_sentence: f64,
    pub complex_word_count: usize,
    /// Words over the whole text. Always equal to `total_words`.
    pub word_count: usize,
    pub syllable_per_word: f64,
    pub personal_pronouns: usize,
    pub average_word_length: f64,
}

/// Computes readability metrics for raw text.
///
/// # Errors
///
/// Returns [`SententiaError::EmptyDocument`] when the text has no sentences
/// or no words, since every ratio would divide by zero.
pub fn analyze(raw_text: &str) -> Result<ReadabilityRecord> {
    let sentences = split_sentences(raw_text);
    let total_sentences = sentences.len();
    let total_words: usize = sentences.iter().map(|s| tokenize_words(s).len()).sum();

    let words = tokenize_words(raw_text);
    let word_count = words.len();

    if total_sentences == 0 || total_words == 0 || word_count == 0 {
        return Err(SententiaError::EmptyDocument { sentences: total_sentences, words: word_count });
    }

    let average_sentence_length = total_words as f64 / total_sentences as f64;

    let syllables: Vec<usize> = words.iter().map(|w| count_syllables(w)).collect();
    let complex_word_count = syllables.iter().filter(|&&n| n > 2).count();
    let percentage_complex_words = complex_word_count as f64 / total_words as f64 * 100.0;

    let fog_index = 0.4 * (average_sentence_length + percentage_complex_words);

    let counted_syllables: usize = words
        .iter()
        .zip(&syllables)
        .filter(|(word, _)| !SILENT_SUFFIXES.iter().any(|suffix| word.ends_with(suffix)))
        .map(|(_, &n)| n)
        .sum();
    let syllable_per_word = counted_syllables as f64 / word_count as f64;

    let total_length: usize = words.iter().map(|w| w.chars().count()).sum();
    let average_word_length = total_length as f64 / word_count as f64;

    Ok(ReadabilityRecord {
        total_sentences,
        total_words,
        average_sentence_length,
        percentage_complex_words,
        fog_index,
        average_words_per_sentence: average_sentence_length,
        complex_word_count,
        word_count,
        syllable_per_word,
        personal_pronouns: count_personal_pronouns(raw_text),
        average_word_length,
    })
}

/// Counts `I`, `we`, `my`, `ours` and `us` in any case, except the exact
/// token `US`, which is read as the country.
pub fn count_personal_pronouns(text: &str) -> usize {
    PRONOUN_RE.find_iter(text).filter(|m| m.as_str() != "US").count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_fog_index_scenario() {
        // Two sentences of ten tokens each (the period counts), five complex words.
        let text = "Beautiful beautiful beautiful cat cat cat cat cat cat. \
                    Beautiful beautiful cat cat cat cat cat cat cat.";
        let record = analyze(text).unwrap();

        assert_eq!(record.total_sentences, 2);
        assert_eq!(record.total_words, 20);
        assert_eq!(record.complex_word_count, 5);
        assert!(approx(record.average_sentence_length, 10.0));
        assert!(approx(record.percentage_complex_words, 25.0));
        assert!(approx(record.fog_index, 14.0));
        assert!(approx(record.average_words_per_sentence, record.average_sentence_length));
    }

    #[test]
    fn test_word_count_matches_total_words() {
        let record = analyze("Mr. Smith didn't care. The U.S. market rose 3.5 percent!\nWe agreed.").unwrap();
        assert_eq!(record.word_count, record.total_words);
    }

    #[test]
    fn test_silent_suffix_words_contribute_no_syllables() {
        // "jumped" and "boxes" are skipped, "cat" is 1 and "." is 0.
        let record = analyze("jumped boxes cat.").unwrap();
        assert_eq!(record.word_count, 4);
        assert!(approx(record.syllable_per_word, 0.25));
    }

    #[test]
    fn test_average_word_length_counts_punctuation_tokens() {
        let record = analyze("Hi there.").unwrap();
        // "Hi" (2) + "there" (5) + "." (1) over 3 tokens.
        assert!(approx(record.average_word_length, 8.0 / 3.0));
    }

    #[rstest]
    #[case("US sent us a package", 1)]
    #[case("I think we should", 2)]
    #[case("My house is ours, not yours", 2)]
    #[case("Us and US and uS", 2)]
    #[case("Mine is mine; it is bus time in Italy", 0)]
    #[case("i, I, my, MY", 4)]
    fn test_personal_pronouns(#[case] text: &str, #[case] expected: usize) {
        assert_eq!(count_personal_pronouns(text), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   \n\n  ")]
    fn test_empty_text_is_an_error(#[case] text: &str) {
        let result = analyze(text);
        assert!(matches!(result, Err(SententiaError::EmptyDocument { sentences: 0, words: 0 })));
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let text = "Readability matters. Complicated vocabulary increases difficulty considerably.";
        assert_eq!(analyze(text).unwrap(), analyze(text).unwrap());
    }
}
