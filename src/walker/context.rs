use serde_json::{Map, Value};

use crate::walker::parser::Document;

/// One page's extracted result: field name to cleaned value.
pub type PageResult = Map<String, Value>;

/// Borrowed view handed to every caller-supplied callback for one page.
///
/// The document lives for the current fetch iteration only; nothing in the
/// context survives into the next page.
#[derive(Debug)]
pub struct PageContext<'a> {
    /// Parsed document of the page just fetched.
    pub document: &'a Document,

    /// During extraction, the fields built so far for this page (earlier
    /// extractors' output). During pagination and aggregation, the page's
    /// cleaned result.
    pub current: &'a PageResult,

    /// The previous page's cleaned result; empty on the first page.
    pub previous: &'a PageResult,

    /// The address the page was fetched from.
    pub address: &'a str,
}
