//! The Chunk type: a bounded payload with its title and metadata.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A chunk handed downstream for embedding and retrieval.
///
/// ## Titles
///
/// The title locates the chunk for a human reader:
///
/// ```text
/// "PP-35-2021.pdf :: Pasal 12 [2/3]"
///  ^ source         ^ locator  ^ position within the article
/// ```
///
/// Positions are counted before duplicate payloads are dropped, so a
/// surviving chunk may read `[3/3]` even if `[2/3]` was a duplicate.
///
/// ## Serialization
///
/// ```rust
/// use pasal::Chunk;
///
/// let chunk = Chunk::new("Doc :: chunk [1/1]", Default::default(), "Isi.");
/// let json = serde_json::to_value(&chunk).unwrap();
/// assert_eq!(json["data"], "Isi.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// `"<source> :: <locator> [<i>/<n>]"`, or `[merged]` after the global merge.
    pub title: String,
    /// Caller metadata overlaid with structural fields such as `sectionType`.
    pub metadata: Map<String, Value>,
    /// The chunk text.
    pub data: String,
}

impl Chunk {
    /// Create a new chunk.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        metadata: Map<String, Value>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            metadata,
            data: data.into(),
        }
    }

    /// The length of the payload in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.chars().count()
    }

    /// Whether the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The `sectionType` metadata tag, if present.
    #[must_use]
    pub fn section_type(&self) -> Option<&str> {
        self.metadata.get("sectionType").and_then(Value::as_str)
    }
}

impl std::fmt::Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Chunk {{ title: {:?}, len: {} }}", self.title, self.len())
    }
}
