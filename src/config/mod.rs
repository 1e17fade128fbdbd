//! Configuration module for pagewalk
//!
//! A walk is described entirely in code: a starting address, an ordered set
//! of field extractors, and an optional pagination policy. There is no
//! configuration file; the extraction logic is caller-supplied closures.
//!
//! # Example
//!
//! ```no_run
//! use pagewalk::WalkConfig;
//! use serde_json::Value;
//!
//! let config = WalkConfig::new("https://example.com")
//!     .constant("source", "example.com")
//!     .extract("title", |ctx| Ok(Value::from(ctx.document.title().unwrap_or_default())));
//! ```

mod types;
mod validation;

// Re-export types
pub use types::{
    ExtractFn, Extractor, FoldFactory, FoldFn, MapFactory, MapFn, NextFn, Paginator,
    TransportOptions, WalkConfig,
};

// Re-export validation
pub use validation::validate;
