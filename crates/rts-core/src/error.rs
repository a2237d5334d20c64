//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `RtsError` as one variant
//! where configuration problems can surface.

use thiserror::Error;

/// The top-level error type for `rts-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum RtsError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `rts-*` crates.
pub type RtsResult<T> = Result<T, RtsError>;
