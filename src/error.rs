//! Error types for pasal.
//!
//! Chunking itself never fails: blank input is skipped and unmatched
//! structure falls back to a generic unit. Errors only come from the edges,
//! configuring limits and decoding requests.

/// Errors that can occur when configuring the chunker or decoding input.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A chunk limit is inconsistent with the others.
    #[error("invalid limit {name}: {value} ({reason})")]
    InvalidLimits {
        /// Which limit was rejected.
        name: &'static str,
        /// The rejected value.
        value: usize,
        /// What the limit must satisfy.
        reason: &'static str,
    },

    /// A chunk request could not be decoded.
    #[error("malformed chunk request: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for pasal operations.
pub type Result<T> = std::result::Result<T, Error>;
