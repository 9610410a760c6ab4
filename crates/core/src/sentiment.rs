//! Lexicon-based sentiment scores.
//!
//! Scores are computed on a cleaned [`TokenSequence`](crate::tokenize::TokenSequence): hits against the
//! positive and negative lexicons are counted per occurrence, and a token
//! found in both lexicons counts on both sides.

use serde::Serialize;

use crate::lexicon::Lexicon;

/// Smoothing constant that keeps the ratios finite on empty input.
pub const EPSILON: f64 = 0.000001;

/// Sentiment counts and ratios for one document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentScores {
    /// Number of tokens found in the positive lexicon.
    pub positive_score: usize,
    /// Number of tokens found in the negative lexicon.
    pub negative_score: usize,
    /// `(pos - neg) / (pos + neg + ε)`, in `[-1, 1]`.
    pub polarity: f64,
    /// `(pos + neg) / (tokens + ε)`, in `[0, 1]` while the two lexicons are
    /// disjoint. A token listed in both counts twice, so the upper bound is 2.
    pub subjectivity: f64,
}

/// Scores a cleaned token sequence against the sentiment lexicons.
///
/// # Example
///
/// ```rust
/// use sententia_core::{Lexicon, sentiment::score};
///
/// let positive = Lexicon::from_words(["love", "good", "product"]);
/// let tokens: Vec<String> = ["love", "good", "good", "product"].map(String::from).to_vec();
/// let scores = score(&tokens, &positive, &Lexicon::new());
/// assert_eq!(scores.positive_score, 4);
/// assert!((scores.polarity - 1.0).abs() < 1e-4);
/// ```
pub fn score(tokens: &[String], positive: &Lexicon, negative: &Lexicon) -> SentimentScores {
    let positive_score = tokens.iter().filter(|t| positive.contains(t)).count();
    let negative_score = tokens.iter().filter(|t| negative.contains(t)).count();

    let pos = positive_score as f64;
    let neg = negative_score as f64;

    SentimentScores {
        positive_score,
        negative_score,
        polarity: (pos - neg) / ((pos + neg) + EPSILON),
        subjectivity: (pos + neg) / (tokens.len() as f64 + EPSILON),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::TokenSequence;

    fn tokens(words: &[&str]) -> TokenSequence {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_all_positive() {
        let positive = Lexicon::from_words(["love", "good", "product"]);
        let scores = score(&tokens(&["love", "good", "good", "product"]), &positive, &Lexicon::new());

        assert_eq!(scores.positive_score, 4);
        assert_eq!(scores.negative_score, 0);
        assert!((scores.polarity - 1.0).abs() < 1e-4);
        assert!((scores.subjectivity - 1.0).abs() < 1e-4);
        assert!(scores.polarity < 1.0, "epsilon keeps polarity just below 1");
    }

    #[test]
    fn test_mixed_polarity() {
        let positive = Lexicon::from_words(["gain"]);
        let negative = Lexicon::from_words(["loss", "risk"]);
        let scores = score(&tokens(&["gain", "loss", "risk", "market", "today"]), &positive, &negative);

        assert_eq!(scores.positive_score, 1);
        assert_eq!(scores.negative_score, 2);
        assert!((scores.polarity - (-1.0 / 3.0)).abs() < 1e-4);
        assert!((scores.subjectivity - 0.6).abs() < 1e-4);
    }

    #[test]
    fn test_word_in_both_lexicons_counts_twice() {
        let both = Lexicon::from_words(["volatile"]);
        let scores = score(&tokens(&["volatile"]), &both, &both);

        assert_eq!(scores.positive_score, 1);
        assert_eq!(scores.negative_score, 1);
        assert!(scores.polarity.abs() < 1e-4);
        assert!((scores.subjectivity - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_empty_tokens_are_zero() {
        let scores = score(&TokenSequence::new(), &Lexicon::new(), &Lexicon::new());

        assert_eq!(scores.positive_score, 0);
        assert_eq!(scores.polarity, 0.0);
        assert_eq!(scores.subjectivity, 0.0);
    }

    #[test]
    fn test_no_hits_polarity_near_zero() {
        let scores = score(&tokens(&["plain", "words"]), &Lexicon::from_words(["x"]), &Lexicon::new());
        assert!(scores.polarity.abs() < 1e-4);
        assert_eq!(scores.subjectivity, 0.0);
    }

    #[test]
    fn test_ranges_hold_for_disjoint_lexicons() {
        let positive = Lexicon::from_words(["up", "win"]);
        let negative = Lexicon::from_words(["down"]);
        let cases = [
            tokens(&["up"]),
            tokens(&["down", "down", "flat"]),
            tokens(&["up", "win", "down", "flat", "flat", "flat"]),
        ];

        for case in &cases {
            let scores = score(case, &positive, &negative);
            assert!((-1.0..=1.0).contains(&scores.polarity));
            assert!((0.0..=1.0).contains(&scores.subjectivity));
        }
    }
}
