//! Word and sentence segmentation, and the cleaning step used for sentiment.
//!
//! Word tokens follow Penn Treebank conventions closely enough for counting:
//! punctuation becomes its own token and clitics are split off
//! (`don't` -> `do`, `n't`). Sentence boundaries only ever fall on
//! whitespace, so summing word counts over [`split_sentences`] gives the same
//! total as [`tokenize_words`] on the whole text.

use std::sync::LazyLock;

use regex::Regex;

use crate::lexicon::Lexicon;

/// Ordered, lower-cased tokens with stop words and punctuation removed.
///
/// Duplicates are kept: sentiment scoring counts occurrences.
pub type TokenSequence = Vec<String>;

/// Numbers with digit groups, hyphen/apostrophe joined words, ellipses,
/// double dashes, then any other single visible character.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d+)+|\w+(?:[-'’]\w+)*|\.{2,}|-{2,}|[^\w\s]").unwrap());

const CLITICS: &[&str] = &["'s", "'re", "'ve", "'ll", "'d", "'m"];

/// Lower-cased words that end in a period without ending a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "inc", "ltd", "co", "corp", "no", "fig", "e.g",
    "i.e", "u.s", "u.k", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
];

const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?'];
const CLOSING_PUNCTUATION: &[char] = &['"', '\'', '”', '’', ')', ']', '}'];

/// Splits text into word tokens, keeping punctuation tokens.
///
/// # Example
///
/// ```rust
/// use sententia_core::tokenize::tokenize_words;
///
/// assert_eq!(tokenize_words("We don't stop."), vec!["We", "do", "n't", "stop", "."]);
/// ```
pub fn tokenize_words(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();

    for m in TOKEN_RE.find_iter(text) {
        let token = m.as_str();
        match clitic_split(token) {
            Some(at) => {
                tokens.push(&token[..at]);
                tokens.push(&token[at..]);
            }
            None => tokens.push(token),
        }
    }

    tokens
}

/// Byte offset where a trailing clitic starts, if the token carries one.
fn clitic_split(token: &str) -> Option<usize> {
    if !token.contains(['\'', '’']) {
        return None;
    }

    let normalized = token.replace('’', "'").to_lowercase();

    if normalized.ends_with("n't") && normalized.len() > 3 {
        let at = token.char_indices().rev().nth(2).map(|(i, _)| i)?;
        return (at > 0).then_some(at);
    }

    let apostrophe = token.rfind(['\'', '’'])?;
    if apostrophe == 0 {
        return None;
    }

    let suffix = normalized.rsplit_once('\'').map(|(_, s)| format!("'{}", s))?;
    CLITICS.contains(&suffix.as_str()).then_some(apostrophe)
}

/// Splits text into trimmed sentences.
///
/// A sentence ends after `.`, `!` or `?` (and any closing quotes or brackets)
/// when whitespace or the end of the text follows, unless the word before it
/// is an abbreviation or an initial, or the next word starts in lower case.
///
/// # Example
///
/// ```rust
/// use sententia_core::tokenize::split_sentences;
///
/// let sentences = split_sentences("Dr. Smith arrived. He sat down! Why?");
/// assert_eq!(sentences, vec!["Dr. Smith arrived.", "He sat down!", "Why?"]);
/// ```
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !SENTENCE_TERMINATORS.contains(&c) {
            continue;
        }

        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = chars.peek() {
            if SENTENCE_TERMINATORS.contains(&next) || CLOSING_PUNCTUATION.contains(&next) {
                end = j + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }

        let at_boundary = match chars.peek() {
            None => true,
            Some(&(_, next)) => next.is_whitespace(),
        };
        if !at_boundary || !ends_sentence(&text[start..i], c, &text[end..]) {
            continue;
        }

        push_trimmed(&mut sentences, &text[start..end]);
        start = end;
    }

    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, segment: &'a str) {
    let segment = segment.trim();
    if !segment.is_empty() {
        sentences.push(segment);
    }
}

/// Decides whether a terminator between `before` and `after` closes a sentence.
fn ends_sentence(before: &str, terminator: char, after: &str) -> bool {
    if terminator == '.' {
        let word = before
            .rsplit(|c: char| c.is_whitespace() || matches!(c, '(' | '"' | '“'))
            .next()
            .unwrap_or("")
            .to_lowercase();

        let is_initial = word.chars().count() == 1 && word.chars().all(char::is_alphabetic);
        if is_initial || ABBREVIATIONS.contains(&word.as_str()) {
            return false;
        }
    }

    let next_word_lower = after
        .trim_start()
        .chars()
        .find(|c| c.is_alphanumeric())
        .is_some_and(char::is_lowercase);

    !next_word_lower
}

/// Lower-cases tokens and drops stop words and single punctuation characters.
///
/// # Example
///
/// ```rust
/// use sententia_core::{Lexicon, tokenize::clean};
///
/// let stop_words = Lexicon::from_words(["this", "i"]);
/// let tokens = clean("I love this good good product.", &stop_words);
/// assert_eq!(tokens, vec!["love", "good", "good", "product"]);
/// ```
pub fn clean(text: &str, stop_words: &Lexicon) -> TokenSequence {
    tokenize_words(text)
        .into_iter()
        .filter(|token| !is_punctuation(token))
        .map(str::to_lowercase)
        .filter(|token| !stop_words.contains(token))
        .collect()
}

fn is_punctuation(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_punctuation())
}
