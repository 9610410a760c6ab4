//! Extracted article text and its on-disk artifact format.
//!
//! An artifact is the article title, a blank line, then the body paragraphs
//! one per line. Artifacts are named `<URL_ID>.txt`.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Result, SententiaError};

/// Whether the title line of an artifact is analyzed with the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitlePolicy {
    /// Analyze the whole artifact, title included.
    #[default]
    Include,
    /// Analyze only the body below the title.
    Exclude,
}

/// One article ready for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Identifier used to join metrics back onto the input table.
    pub id: String,
    /// The text every metric is computed from.
    pub raw_text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self { id: id.into(), raw_text: raw_text.into() }
    }

    /// Builds a document from artifact contents.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sententia_core::{Document, TitlePolicy};
    ///
    /// let artifact = "A Title\n\nFirst paragraph.\nSecond paragraph.";
    /// let doc = Document::from_artifact("42", artifact, TitlePolicy::Exclude);
    /// assert_eq!(doc.raw_text, "First paragraph.\nSecond paragraph.");
    /// ```
    pub fn from_artifact(id: impl Into<String>, contents: &str, title: TitlePolicy) -> Self {
        let raw_text = match title {
            TitlePolicy::Include => contents.to_string(),
            TitlePolicy::Exclude => artifact_body(contents).to_string(),
        };
        Self { id: id.into(), raw_text }
    }

    /// Reads an artifact file; the id is the file name without its `.txt`
    /// extension.
    pub fn load_file(path: &Path, title: TitlePolicy) -> Result<Self> {
        let id = artifact_id(path).ok_or_else(|| SententiaError::FileNotFound(path.to_path_buf()))?;
        Self::load_as(id, path, title)
    }

    /// Reads an artifact file under a known id.
    ///
    /// Invalid UTF-8 is replaced rather than rejected, so one badly encoded
    /// article still gets scored.
    pub fn load_as(id: impl Into<String>, path: &Path, title: TitlePolicy) -> Result<Self> {
        if !path.exists() {
            return Err(SententiaError::FileNotFound(path.to_path_buf()));
        }

        let bytes = fs::read(path)?;
        let contents = String::from_utf8_lossy(&bytes);
        if matches!(contents, Cow::Owned(_)) {
            tracing::warn!(path = %path.display(), "artifact is not valid UTF-8, decoding lossily");
        }

        Ok(Self::from_artifact(id, &contents, title))
    }

    /// Reads every `.txt` artifact in a directory, sorted by id.
    ///
    /// A file that cannot be read is logged and skipped; only a missing or
    /// unreadable directory is an error.
    pub fn load_dir(dir: &Path, title: TitlePolicy) -> Result<Vec<Self>> {
        if !dir.is_dir() {
            return Err(SententiaError::FileNotFound(dir.to_path_buf()));
        }

        let mut documents = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let Some(id) = artifact_id(&path) else {
                continue;
            };

            match Self::load_as(id, &path, title) {
                Ok(document) => documents.push(document),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping unreadable artifact"),
            }
        }
        documents.sort_by(|a, b| a.id.cmp(&b.id));

        tracing::debug!(dir = %dir.display(), count = documents.len(), "loaded artifacts");
        Ok(documents)
    }
}

/// Path of the artifact for `id` inside `dir`.
///
/// # Errors
///
/// Returns [`SententiaError::ConfigError`] for ids that are empty, start with
/// a `.`, or contain a path separator or `..`, since those would name a file
/// outside `dir` or one [`Document::load_dir`] never reads back.
pub fn artifact_path(dir: &Path, id: &str) -> Result<PathBuf> {
    let unsafe_id = id.is_empty() || id.starts_with('.') || id.contains(['/', '\\']) || id.contains("..");
    if unsafe_id {
        return Err(SententiaError::ConfigError(format!("invalid URL_ID for an artifact name: {:?}", id)));
    }

    Ok(dir.join(format!("{}.txt", id)))
}

/// Renders the artifact text for an extracted article.
pub fn render_artifact(title: &str, body: &str) -> String {
    format!("{}\n\n{}", title, body)
}

/// The body of an artifact: everything after the first blank line. An
/// artifact without a blank line is all body.
fn artifact_body(contents: &str) -> &str {
    contents
        .split_once("\n\n")
        .or_else(|| contents.split_once("\r\n\r\n"))
        .map(|(_, body)| body)
        .unwrap_or(contents)
}

fn artifact_id(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    name.strip_suffix(".txt")
        .filter(|id| !id.is_empty() && !id.starts_with('.'))
        .map(str::to_string)
}
