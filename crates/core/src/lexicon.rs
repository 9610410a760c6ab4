//! Stop-word and sentiment lexicons.
//!
//! A [`Lexicon`] is an immutable set of normalized words. [`LexiconSet`]
//! bundles the three lexicons every analysis needs and is loaded once per
//! batch from two directories:
//!
//! - a stop-word source, where every line of every `*.txt` file is a stop word;
//! - a master dictionary, where files ending in `words.txt` whose names contain
//!   `positive` or `negative` list sentiment words.
//!
//! Stop words are removed from the sentiment lexicons while they load, so a
//! stop word can never score as positive or negative.
//!
//! # Example
//!
//! ```rust,no_run
//! use sententia_core::{LexiconConfig, LexiconSet};
//!
//! let config = LexiconConfig::builder()
//!     .stop_words_dir("StopWords")
//!     .master_dictionary_dir("MasterDictionary")
//!     .build();
//! let lexicons = LexiconSet::load(&config)?;
//! println!("{} positive words", lexicons.positive.len());
//! # Ok::<(), sententia_core::SententiaError>(())
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Result, SententiaError};

/// An immutable set of normalized words used for membership tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    words: HashSet<String>,
}

impl Lexicon {
    /// Creates an empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a lexicon from words, trimming each and skipping blanks.
    ///
    /// No case folding is applied here; see [`LexiconConfig::fold_case`].
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        words
            .into_iter()
            .filter_map(|w| {
                let w = w.as_ref().trim();
                (!w.is_empty()).then(|| w.to_string())
            })
            .collect()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl FromIterator<String> for Lexicon {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self { words: iter.into_iter().collect() }
    }
}

/// Which sentiment list a master-dictionary file feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    fn from_file_name(name: &str) -> Option<Self> {
        if name.contains("positive") {
            Some(Self::Positive)
        } else if name.contains("negative") {
            Some(Self::Negative)
        } else {
            None
        }
    }
}

/// Where lexicons are loaded from and how their words are normalized.
#[derive(Debug, Clone)]
pub struct LexiconConfig {
    /// Directory (or single file) of stop-word lists.
    pub stop_words_dir: PathBuf,
    /// Directory (or single file) of positive/negative word lists.
    pub master_dictionary_dir: PathBuf,
    /// Only stop-word files ending with this suffix are read.
    pub stop_word_suffix: String,
    /// Only dictionary files ending with this suffix are read.
    pub dictionary_suffix: String,
    /// Lower-case every lexicon word at load (default: true).
    ///
    /// Tokens are always lower-cased before lookup, so turning this off makes
    /// upper-case entries unreachable.
    pub fold_case: bool,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            stop_words_dir: default_source("StopWords"),
            master_dictionary_dir: default_source("MasterDictionary"),
            stop_word_suffix: ".txt".to_string(),
            dictionary_suffix: "words.txt".to_string(),
            fold_case: true,
        }
    }
}

impl LexiconConfig {
    /// Creates a new builder for LexiconConfig.
    pub fn builder() -> LexiconConfigBuilder {
        LexiconConfigBuilder::new()
    }

    fn normalize(&self, line: &str) -> Option<String> {
        let word = line.trim();
        if word.is_empty() {
            None
        } else if self.fold_case {
            Some(word.to_lowercase())
        } else {
            Some(word.to_string())
        }
    }
}

/// Resolves a default lexicon source: `./<name>` when present, otherwise
/// `~/.config/sententia/<name>`.
fn default_source(name: &str) -> PathBuf {
    let local = PathBuf::from(name);
    if local.exists() {
        return local;
    }

    dirs::home_dir()
        .map(|home| home.join(".config").join("sententia").join(name))
        .filter(|p| p.exists())
        .unwrap_or(local)
}

/// Builder for LexiconConfig.
#[derive(Debug, Default)]
pub struct LexiconConfigBuilder {
    config: LexiconConfig,
}

impl LexiconConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: LexiconConfig::default() }
    }

    /// Sets the stop-word source.
    pub fn stop_words_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.stop_words_dir = path.as_ref().to_path_buf();
        self
    }

    /// Sets the master-dictionary source.
    pub fn master_dictionary_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.master_dictionary_dir = path.as_ref().to_path_buf();
        self
    }

    /// Sets the stop-word file suffix.
    pub fn stop_word_suffix(mut self, suffix: &str) -> Self {
        self.config.stop_word_suffix = suffix.to_string();
        self
    }

    /// Sets the master-dictionary file suffix.
    pub fn dictionary_suffix(mut self, suffix: &str) -> Self {
        self.config.dictionary_suffix = suffix.to_string();
        self
    }

    /// Sets whether lexicon words are lower-cased at load.
    pub fn fold_case(mut self, value: bool) -> Self {
        self.config.fold_case = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> LexiconConfig {
        self.config
    }
}

/// The three lexicons shared read-only by every analysis.
#[derive(Debug, Clone, Default)]
pub struct LexiconSet {
    pub stop_words: Lexicon,
    pub positive: Lexicon,
    pub negative: Lexicon,
}

impl LexiconSet {
    /// Loads stop words, then the master dictionary minus those stop words.
    ///
    /// # Errors
    ///
    /// Returns [`SententiaError::LexiconSourceNotFound`] if either source is
    /// missing and [`SententiaError::IoError`] if a file cannot be read.
    pub fn load(config: &LexiconConfig) -> Result<Self> {
        let stop_words = load_stop_words(config)?;
        let (positive, negative) = load_master_dictionary(config, &stop_words)?;

        tracing::info!(
            stop_words = stop_words.len(),
            positive = positive.len(),
            negative = negative.len(),
            "loaded lexicons"
        );

        Ok(Self { stop_words, positive, negative })
    }

    /// Builds a set from in-memory lists, applying the same stop-word
    /// exclusion as [`LexiconSet::load`]. Words are trimmed and lower-cased.
    pub fn from_lists<S: AsRef<str>>(stop_words: &[S], positive: &[S], negative: &[S]) -> Self {
        let fold = |words: &[S]| -> Vec<String> { words.iter().map(|w| w.as_ref().trim().to_lowercase()).collect() };

        let stop_words = Lexicon::from_words(fold(stop_words));
        let keep = |w: &String| !stop_words.contains(w);
        let positive = Lexicon::from_words(fold(positive).into_iter().filter(keep));
        let negative = Lexicon::from_words(fold(negative).into_iter().filter(keep));

        Self { stop_words, positive, negative }
    }
}

/// Reads every stop-word file in the configured source.
pub fn load_stop_words(config: &LexiconConfig) -> Result<Lexicon> {
    let mut words = HashSet::new();

    for path in source_files(&config.stop_words_dir, &config.stop_word_suffix)? {
        words.extend(read_lines(&path)?.iter().filter_map(|line| config.normalize(line)));
    }

    Ok(Lexicon { words })
}

/// Reads positive and negative word lists, skipping any stop word.
pub fn load_master_dictionary(config: &LexiconConfig, stop_words: &Lexicon) -> Result<(Lexicon, Lexicon)> {
    let mut positive = HashSet::new();
    let mut negative = HashSet::new();

    for path in source_files(&config.master_dictionary_dir, &config.dictionary_suffix)? {
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();

        let Some(polarity) = Polarity::from_file_name(&name) else {
            tracing::debug!(file = %path.display(), "skipping dictionary file without polarity in its name");
            continue;
        };

        let lines = read_lines(&path)?;
        let words = lines
            .iter()
            .filter_map(|line| config.normalize(line))
            .filter(|w| !stop_words.contains(w));

        match polarity {
            Polarity::Positive => positive.extend(words),
            Polarity::Negative => negative.extend(words),
        }
    }

    Ok((Lexicon { words: positive }, Lexicon { words: negative }))
}

/// Lists the files of a source in name order. A source may also be a single file.
fn source_files(source: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    if !source.exists() {
        return Err(SententiaError::LexiconSourceNotFound(source.to_path_buf()));
    }

    if source.is_file() {
        return Ok(vec![source.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(source)? {
        let path = entry?.path();
        let matches_suffix = path
            .file_name()
            .map(|n| n.to_string_lossy().ends_with(suffix))
            .unwrap_or(false);

        if path.is_file() && matches_suffix {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}

/// Word lists in the wild are not always UTF-8, so bytes are decoded lossily.
fn read_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).lines().map(str::to_string).collect())
}
