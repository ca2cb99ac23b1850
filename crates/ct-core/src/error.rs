//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `CtError` as one variant
//! where configuration or parsing problems can surface through them.

use thiserror::Error;

/// The top-level error type for `ct-core`.
#[derive(Debug, Error)]
pub enum CtError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `ct-core`.
pub type CtResult<T> = Result<T, CtError>;
