//! HTML document handling
//!
//! This module wraps the parsed page in a [`Document`] handle with
//! selector-based helpers for the common extraction moves:
//! - Page title
//! - First-match or all-match element text
//! - Attribute access
//!
//! Extractors that need more than the helpers can drop down to the full
//! parsed tree via [`Document::html`].

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use crate::WalkError;

/// A caller-supplied CSS selector failed to parse.
#[derive(Debug, Error)]
#[error("invalid selector '{selector}': {message}")]
pub struct SelectorError {
    /// The selector text as supplied.
    pub selector: String,

    /// Parser diagnostic.
    pub message: String,
}

/// Parsed document handle for one fetched page.
#[derive(Debug, Clone)]
pub struct Document {
    html: Html,
}

/// Parses a fetched body into a document handle.
///
/// The body must be valid UTF-8. The HTML itself is parsed with full error
/// recovery, so malformed markup still yields a usable document.
///
/// # Arguments
///
/// * `body` - The raw response body
/// * `address` - The address the body came from, for error context
///
/// # Returns
///
/// * `Ok(Document)` - Parsed document handle
/// * `Err(WalkError::Parse)` - The body was not decodable
pub fn parse_document(body: &[u8], address: &str) -> Result<Document, WalkError> {
    let text = std::str::from_utf8(body).map_err(|e| WalkError::Parse {
        address: address.to_string(),
        message: format!("body is not valid UTF-8: {e}"),
    })?;

    Ok(Document::from_html(text))
}

impl Document {
    /// Parses an HTML string directly, bypassing the fetch step.
    pub fn from_html(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Returns the page title from the `<title>` tag, trimmed.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;

        self.html
            .select(&selector)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Returns the trimmed text of the first element matching `selector`.
    ///
    /// `Ok(None)` means no element matched; an invalid selector is an
    /// error.
    pub fn text(&self, selector: &str) -> Result<Option<String>, SelectorError> {
        let selector = parse_selector(selector)?;
        Ok(self.html.select(&selector).next().map(element_text))
    }

    /// Returns the trimmed text of every element matching `selector`, in
    /// document order.
    pub fn texts(&self, selector: &str) -> Result<Vec<String>, SelectorError> {
        let selector = parse_selector(selector)?;
        Ok(self.html.select(&selector).map(element_text).collect())
    }

    /// Returns attribute `name` of the first element matching `selector`.
    pub fn attr(&self, selector: &str, name: &str) -> Result<Option<String>, SelectorError> {
        let selector = parse_selector(selector)?;
        Ok(self
            .html
            .select(&selector)
            .next()
            .and_then(|element| element.value().attr(name))
            .map(str::to_string))
    }

    /// Full access to the underlying parsed document.
    pub fn html(&self) -> &Html {
        &self.html
    }
}

fn parse_selector(selector: &str) -> Result<Selector, SelectorError> {
    Selector::parse(selector).map_err(|e| SelectorError {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
