//! Chunk size and count limits.
//!
//! ## Two kinds of bound
//!
//! Length bounds shape individual chunks:
//!
//! - `max_chars`: paragraphs are packed until the next one would overflow.
//!   Only a single unsplittable sentence, or a chunk that absorbed a short
//!   neighbour, may exceed it.
//! - `min_chars`: shorter chunks are folded into the preceding chunk (the
//!   first chunk into the following one), whatever the resulting length.
//!
//! Count bounds are safety nets against pathological documents:
//!
//! ```text
//! max_chunks_per_unit = 12
//! Pasal 7 -> 30 chunks -> ratio = ceil(30 / 12) = 3 -> 10 merged chunks
//!
//! max_total_chunks = 1200
//! batch -> 3000 chunks -> k = ceil(3000 / 1200) = 3 -> 1000 merged chunks
//! ```
//!
//! Lengths are counted in Unicode scalar values, not bytes, so Indonesian
//! and English text with the odd typographic quote measure the same.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Size and count limits for one chunking invocation.
///
/// # Examples
///
/// ```rust
/// use pasal::ChunkLimits;
///
/// let limits = ChunkLimits::default();
/// assert_eq!(limits.max_chars(), 2400);
/// assert_eq!(limits.min_chars(), 80);
///
/// let limits = ChunkLimits::default().with_max_chars(1200).unwrap();
/// assert_eq!(limits.max_chars(), 1200);
///
/// // min must stay below max
/// assert!(ChunkLimits::default().with_max_chars(50).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChunkLimits {
    max_chars: usize,
    min_chars: usize,
    max_chunks_per_unit: usize,
    max_total_chunks: usize,
    min_unit_chars: usize,
}

impl ChunkLimits {
    /// Limits used by the ingestion pipeline.
    pub const DEFAULT: Self = Self {
        max_chars: 2400,
        min_chars: 80,
        max_chunks_per_unit: 12,
        max_total_chunks: 1200,
        min_unit_chars: 20,
    };

    /// Maximum chunk length in characters.
    #[must_use]
    pub const fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Chunks shorter than this are merged into the preceding chunk.
    #[must_use]
    pub const fn min_chars(&self) -> usize {
        self.min_chars
    }

    /// Most chunks a single chapter, article, or section may produce.
    #[must_use]
    pub const fn max_chunks_per_unit(&self) -> usize {
        self.max_chunks_per_unit
    }

    /// Most chunks a whole invocation may produce.
    #[must_use]
    pub const fn max_total_chunks(&self) -> usize {
        self.max_total_chunks
    }

    /// Article and section units with less content than this are dropped.
    #[must_use]
    pub const fn min_unit_chars(&self) -> usize {
        self.min_unit_chars
    }

    /// Set the maximum chunk length.
    ///
    /// # Errors
    ///
    /// Returns an error if `max` is zero or not above `min_chars`.
    pub fn with_max_chars(self, max: usize) -> Result<Self> {
        Self { max_chars: max, ..self }.validate()
    }

    /// Set the minimum chunk length.
    ///
    /// # Errors
    ///
    /// Returns an error if `min` is not below `max_chars`.
    pub fn with_min_chars(self, min: usize) -> Result<Self> {
        Self { min_chars: min, ..self }.validate()
    }

    /// Set the per-unit chunk ceiling.
    ///
    /// # Errors
    ///
    /// Returns an error if `count` is zero.
    pub fn with_max_chunks_per_unit(self, count: usize) -> Result<Self> {
        Self {
            max_chunks_per_unit: count,
            ..self
        }
        .validate()
    }

    /// Set the per-invocation chunk ceiling.
    ///
    /// # Errors
    ///
    /// Returns an error if `count` is zero.
    pub fn with_max_total_chunks(self, count: usize) -> Result<Self> {
        Self {
            max_total_chunks: count,
            ..self
        }
        .validate()
    }

    /// Set the minimum content length for article and section units.
    ///
    /// Zero keeps every unit that has any content.
    #[must_use]
    pub const fn with_min_unit_chars(self, chars: usize) -> Self {
        Self {
            min_unit_chars: chars,
            ..self
        }
    }

    /// Check that the limits are consistent with each other.
    ///
    /// Limits decoded from JSON bypass the setters, so callers loading
    /// configuration should run this before use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLimits`] naming the first offending limit.
    pub fn validate(self) -> Result<Self> {
        if self.max_chars == 0 {
            return Err(invalid("max_chars", self.max_chars, "must be > 0"));
        }
        if self.min_chars >= self.max_chars {
            return Err(invalid(
                "min_chars",
                self.min_chars,
                "must be < max_chars",
            ));
        }
        if self.max_chunks_per_unit == 0 {
            return Err(invalid(
                "max_chunks_per_unit",
                self.max_chunks_per_unit,
                "must be > 0",
            ));
        }
        if self.max_total_chunks == 0 {
            return Err(invalid(
                "max_total_chunks",
                self.max_total_chunks,
                "must be > 0",
            ));
        }
        Ok(self)
    }

    /// Check if appending `additional` characters to a buffer of `current`
    /// characters (plus a separator) would exceed `max_chars`.
    #[must_use]
    pub fn would_overflow(&self, current: usize, separator: usize, additional: usize) -> bool {
        current
            .saturating_add(separator)
            .saturating_add(additional)
            > self.max_chars
    }
}

impl Default for ChunkLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

const fn invalid(name: &'static str, value: usize, reason: &'static str) -> Error {
    Error::InvalidLimits {
        name,
        value,
        reason,
    }
}

/// Length of `text` in characters.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}
