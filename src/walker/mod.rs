//! Walker module: the sequential fetch-extract-paginate loop
//!
//! This module contains the core walking logic, including:
//! - Walk coordination and result aggregation
//! - HTTP fetching
//! - HTML document handling
//! - The per-page extraction context

mod context;
mod coordinator;
mod fetcher;
mod parser;

pub use context::{PageContext, PageResult};
pub use coordinator::WalkOutput;
pub use fetcher::{build_http_client, fetch_page};
pub use parser::{parse_document, Document, SelectorError};

use crate::config::WalkConfig;
use crate::Result;

/// Runs a complete walk.
///
/// This is the main entry point. It will:
/// 1. Validate the configuration, before any network access
/// 2. Build the HTTP client, unless the config supplies one
/// 3. Fetch, parse, and extract each page in sequence
/// 4. Follow the paginator's next-address decisions
/// 5. Apply map/reduce aggregation once pagination terminates
///
/// Pages are fetched strictly one at a time; the only suspension points
/// are the HTTP requests themselves. Termination is driven entirely by
/// the paginator: a `next` that never returns `None` walks forever, and
/// bounding that is the caller's responsibility.
///
/// # Arguments
///
/// * `config` - The walk configuration
///
/// # Returns
///
/// * `Ok(WalkOutput)` - The page result, raw ledger, or aggregate
/// * `Err(WalkError)` - The first failure; no partial results survive
pub async fn walk(config: WalkConfig) -> Result<WalkOutput> {
    coordinator::run(config).await
}
