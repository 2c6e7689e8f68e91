//! Typed error definitions for the quote feed system.
//!
//! Provides [`HqError`] for failures that cross a seam (fetch, split, config).
//! Record-level problems are not errors: they are reported as a
//! [`DropReason`](crate::types::DropReason) and the record is skipped.

use thiserror::Error;

/// Domain-specific errors for the quote feed system.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HqError {
    /// Transport-level failure: timeout, DNS, connection reset, or a non-2xx
    /// status with no body. Not retried.
    #[error("network error: {0}")]
    Network(String),

    /// The upstream feed rejected the whole requested batch (`FAILED` marker).
    #[error("feed rejected the batch")]
    BatchFailed,

    /// Configuration parsing or validation error.
    #[error("config error: {0}")]
    Config(String),
}

impl HqError {
    /// `true` for the feed-level signal that triggers per-code fallback.
    pub fn is_batch_failure(&self) -> bool {
        matches!(self, Self::BatchFailed)
    }
}
