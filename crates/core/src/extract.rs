use crate::document::render_artifact;
use crate::parse::{Element, Page};
use crate::{Result, SententiaError};

/// Article markup variants this crate can read.
///
/// Each variant is recognised by its title heading and knows where the
/// article paragraphs live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `h1.entry-title`, with `p`/`li` elements inside
    /// `div.td-post-content.tagdiv-type`.
    PostContent,
    /// `h1.tdb-title-text`, with `p` elements whose parent's class list is
    /// exactly `tdb-block-inner td-fix-index`.
    BlockInner,
}

const POST_CONTENT_TITLE: &str = "h1.entry-title";
const POST_CONTENT_BODY: &str = "div.td-post-content.tagdiv-type";
const BLOCK_INNER_TITLE: &str = "h1.tdb-title-text";
const BLOCK_INNER_PARENT_CLASSES: [&str; 2] = ["tdb-block-inner", "td-fix-index"];

/// Title and body text pulled out of an article page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedArticle {
    pub layout: Layout,
    pub title: String,
    /// Trimmed paragraph texts, one per line.
    pub body: String,
}

impl ExtractedArticle {
    /// Renders the artifact written for this article.
    pub fn to_artifact(&self) -> String {
        render_artifact(&self.title, &self.body)
    }
}

impl Layout {
    /// Detects the layout by its title heading; `PostContent` wins when both match.
    pub fn detect(page: &Page) -> Result<Option<Self>> {
        if page.select_first(POST_CONTENT_TITLE)?.is_some() {
            Ok(Some(Self::PostContent))
        } else if page.select_first(BLOCK_INNER_TITLE)?.is_some() {
            Ok(Some(Self::BlockInner))
        } else {
            Ok(None)
        }
    }

    /// Extracts title and body according to this layout.
    ///
    /// # Errors
    ///
    /// Returns [`SententiaError::ContentNotFound`] when the title or the body
    /// markup is missing.
    pub fn extract(self, page: &Page) -> Result<ExtractedArticle> {
        let (title_selector, paragraphs) = match self {
            Self::PostContent => (POST_CONTENT_TITLE, post_content_paragraphs(page)?),
            Self::BlockInner => (BLOCK_INNER_TITLE, block_inner_paragraphs(page)?),
        };

        let title = page
            .select_first(title_selector)?
            .map(|el| el.trimmed_text())
            .ok_or_else(|| SententiaError::ContentNotFound(format!("no {} heading", title_selector)))?;

        Ok(ExtractedArticle { layout: self, title, body: paragraphs.join("\n") })
    }
}

fn post_content_paragraphs(page: &Page) -> Result<Vec<String>> {
    let container = page
        .select_first(POST_CONTENT_BODY)?
        .ok_or_else(|| SententiaError::ContentNotFound(format!("no {} container", POST_CONTENT_BODY)))?;

    Ok(container.select("p, li")?.iter().map(Element::trimmed_text).collect())
}

fn block_inner_paragraphs(page: &Page) -> Result<Vec<String>> {
    let paragraphs: Vec<String> = page
        .select("p")?
        .into_iter()
        .filter(|p| p.parent().is_some_and(|parent| parent.classes() == BLOCK_INNER_PARENT_CLASSES))
        .map(|p| p.trimmed_text())
        .collect();

    if paragraphs.is_empty() {
        return Err(SententiaError::ContentNotFound(format!(
            "no paragraphs under .{}",
            BLOCK_INNER_PARENT_CLASSES.join(".")
        )));
    }

    Ok(paragraphs)
}

/// Detects the layout of an HTML page and extracts its article.
///
/// # Example
///
/// ```rust
/// use sententia_core::{Layout, extract_article};
///
/// let html = r#"
///     <h1 class="entry-title"> Markets Rally </h1>
///     <div class="td-post-content tagdiv-type"><p>Stocks rose.</p><p>Bonds fell.</p></div>
/// "#;
/// let article = extract_article(html).unwrap();
/// assert_eq!(article.layout, Layout::PostContent);
/// assert_eq!(article.to_artifact(), "Markets Rally\n\nStocks rose.\nBonds fell.");
/// ```
pub fn extract_article(html: &str) -> Result<ExtractedArticle> {
    let page = Page::parse(html);
    let layout = Layout::detect(&page)?
        .ok_or_else(|| SententiaError::ContentNotFound("no recognised article heading".to_string()))?;

    tracing::debug!(?layout, "detected article layout");
    layout.extract(&page)
}
