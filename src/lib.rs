//! Pagewalk: a sequential page-walking scraper
//!
//! This crate drives an address-following fetch loop: fetch a page, apply
//! caller-supplied field extractors to the parsed document, optionally ask a
//! caller-supplied paginator for the next address, and optionally fold the
//! per-page results into a single aggregate.
//!
//! # Example
//!
//! ```no_run
//! use pagewalk::{walk, Paginator, WalkConfig};
//! use serde_json::Value;
//!
//! # async fn run() -> pagewalk::Result<()> {
//! let config = WalkConfig::new("https://example.com/news")
//!     .extract("title", |ctx| {
//!         Ok(Value::from(ctx.document.title().unwrap_or_default()))
//!     })
//!     .extract("headline", |ctx| Ok(Value::from(ctx.document.text("h1")?)))
//!     .paginate(Paginator::new(|ctx| ctx.document.attr("a.next", "href").ok().flatten()));
//!
//! let output = walk(config).await?;
//! println!("{}", serde_json::to_string_pretty(&output.into_value()).unwrap());
//! # Ok(())
//! # }
//! ```

pub mod clean;
pub mod config;
pub mod walker;

use thiserror::Error;

/// Main error type for pagewalk operations
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Fetch failed for {address}: {source}")]
    Fetch {
        address: String,
        source: reqwest::Error,
    },

    #[error("Parse failed for {address}: {message}")]
    Parse { address: String, message: String },

    #[error("Extractor for field '{field}' failed on {address}: {error}")]
    Extraction {
        field: String,
        address: String,
        error: anyhow::Error,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("address is required")]
    MissingAddress,

    #[error("Invalid address '{address}': {source}")]
    InvalidAddress {
        address: String,
        source: url::ParseError,
    },
}

/// Result type alias for pagewalk operations
pub type Result<T> = std::result::Result<T, WalkError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Extractor, Paginator, TransportOptions, WalkConfig};
pub use walker::{walk, Document, PageContext, PageResult, SelectorError, WalkOutput};
