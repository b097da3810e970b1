//! Input records supplied by the ingestion pipeline.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Result;

/// Metadata key holding an ordered list of external-link descriptors.
pub const EXTERNAL_SOURCES: &str = "externalSources";

/// One page, or one whole document, of extracted text.
///
/// ```rust
/// use pasal::InputItem;
///
/// let item = InputItem::new("BAB I\nKetentuan umum.")
///     .with_title("Peraturan Perusahaan")
///     .with_page_number(3);
/// assert_eq!(item.page_number, Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputItem {
    /// Human-readable label for the source.
    #[serde(default)]
    pub title: Option<String>,
    /// Raw extracted text. Blank items are skipped.
    #[serde(default)]
    pub data: String,
    /// Page index within the source document.
    #[serde(default)]
    pub page_number: Option<u32>,
    /// Open caller attributes. Only `externalSources` reaches the chunks.
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl InputItem {
    /// Create an item from its text.
    #[must_use]
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the page number.
    #[must_use]
    pub const fn with_page_number(mut self, page: u32) -> Self {
        self.page_number = Some(page);
        self
    }

    /// Set the metadata map.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// A whole chunking job as exchanged with the pipeline over JSON.
///
/// `sourceFileName` and `baseMetadata` are shared by every item in the batch.
///
/// ```rust
/// use pasal::ChunkRequest;
///
/// let request = ChunkRequest::from_json(r#"{
///     "sourceFileName": "handbook.pdf",
///     "baseMetadata": {"department": "HR"},
///     "items": [{"data": "Purpose\nThis handbook explains leave.", "pageNumber": 1}]
/// }"#).unwrap();
/// assert_eq!(request.items.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkRequest {
    /// Source document name used in chunk titles.
    #[serde(default)]
    pub source_file_name: Option<String>,
    /// Metadata applied to every chunk.
    #[serde(default)]
    pub base_metadata: Map<String, Value>,
    /// Items in document order.
    #[serde(default)]
    pub items: Vec<InputItem>,
}

impl ChunkRequest {
    /// Decode a request from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] if the text is not a valid request.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
