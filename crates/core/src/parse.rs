//! HTML parsing and DOM queries.
//!
//! This module provides the [`Page`] and [`Element`] types used by the
//! article layouts to find titles and paragraphs with CSS selectors.
//!
//! # Example
//!
//! ```rust
//! use sententia_core::parse::Page;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h1 class="entry-title">Title</h1>
//!             <p class="content">Paragraph</p>
//!         </body>
//!     </html>
//! "#;
//!
//! let page = Page::parse(html);
//! let title = page.select_first("h1.entry-title").unwrap().unwrap();
//! assert_eq!(title.text(), "Title");
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{Result, SententiaError};

/// A parsed HTML page.
pub struct Page {
    html: Html,
}

impl Page {
    /// Parses HTML from a string. Parsing is lenient and never fails.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Selects elements using a CSS selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`SententiaError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sententia_core::parse::Page;
    ///
    /// let page = Page::parse(r#"<p class="content">First</p><p class="content">Second</p>"#);
    /// let elements = page.select("p.content").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).map(|element| Element { element }).collect())
    }

    /// Selects the first element matching a CSS selector.
    pub fn select_first(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).next().map(|element| Element { element }))
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| SententiaError::HtmlParseError(format!("Invalid selector: {}", e)))
}

/// A wrapper around scraper's ElementRef.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the concatenated text of this element and its descendants.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the text with surrounding whitespace removed.
    pub fn trimmed_text(&self) -> String {
        self.text().trim().to_string()
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the class list exactly as written in the `class` attribute.
    pub fn classes(&self) -> Vec<&'a str> {
        self.attr("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Gets the parent element, if the parent is an element.
    pub fn parent(&self) -> Option<Element<'a>> {
        self.element.parent().and_then(ElementRef::wrap).map(|element| Element { element })
    }

    /// Selects descendant elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`SententiaError::HtmlParseError`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = parse_selector(selector)?;
        Ok(self.element.select(&sel).map(|element| Element { element }).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <title>Test Page</title>
        </head>
        <body>
            <h1 class="entry-title">Heading</h1>
            <div class="outer inner">
                <p class="content">Paragraph 1</p>
                <p class="content">  Paragraph 2  </p>
            </div>
        </body>
        </html>
    "#;

    #[test]
    fn test_select_elements() {
        let page = Page::parse(SAMPLE_HTML);
        let elements = page.select("p.content").unwrap();

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].text(), "Paragraph 1");
        assert_eq!(elements[1].trimmed_text(), "Paragraph 2");
    }

    #[test]
    fn test_parent_classes() {
        let page = Page::parse(SAMPLE_HTML);
        let p = page.select_first("p").unwrap().unwrap();
        let parent = p.parent().unwrap();

        assert_eq!(parent.classes(), vec!["outer", "inner"]);
    }

    #[test]
    fn test_select_within_element() {
        let page = Page::parse(SAMPLE_HTML);
        let div = page.select_first("div.outer").unwrap().unwrap();
        assert_eq!(div.select("p").unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_selector() {
        let page = Page::parse(SAMPLE_HTML);
        let result = page.select("[[invalid");

        assert!(matches!(result, Err(SententiaError::HtmlParseError(_))));
    }

    #[test]
    fn test_select_first_missing() {
        let page = Page::parse(SAMPLE_HTML);
        assert!(page.select_first("h1.tdb-title-text").unwrap().is_none());
    }
}
