//! The batch chunking pipeline.
//!
//! ```text
//! items ──> sanitize ──> detect_units ──> split + cap ──> title/metadata
//!                                                            │
//!                       merge_for_limit <── dedup (seen set) ┘
//! ```
//!
//! The seen-payload set lives for exactly one call, so the chunker holds no
//! state between invocations and can be shared across threads.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::ceiling::{cap_unit_chunks, merge_for_limit};
use crate::metadata::{chunk_title, external_sources, source_label, unit_metadata};
use crate::parse::detect_units_with;
use crate::{
    sanitize, Chunk, ChunkLimits, ChunkRequest, InputItem, ParagraphSplitter, Result,
    StructuralUnit,
};

/// Structure-aware chunker for a batch of extracted document text.
///
/// ## Example
///
/// ```rust
/// use pasal::DocumentChunker;
/// use serde_json::Map;
///
/// let text = "BAB I. Ketentuan Umum\nPeraturan ini berlaku bagi seluruh pegawai.\n\n\
///             BAB II. Cuti\nPegawai berhak atas cuti tahunan.";
/// let chunks = DocumentChunker::new().chunk_text(text, "peraturan.pdf");
///
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(chunks[0].title, "peraturan.pdf :: BAB I [1/1]");
/// assert_eq!(chunks[1].section_type(), Some("bab"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentChunker {
    limits: ChunkLimits,
}

/// Counters reported once per batch.
#[derive(Debug, Default)]
struct BatchStats {
    items_skipped: usize,
    units: usize,
    duplicates: usize,
}

impl DocumentChunker {
    /// Create a chunker with the default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a chunker with custom limits.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidLimits`] if the limits are inconsistent.
    pub fn with_limits(limits: ChunkLimits) -> Result<Self> {
        Ok(Self {
            limits: limits.validate()?,
        })
    }

    /// The limits in effect.
    #[must_use]
    pub const fn limits(&self) -> &ChunkLimits {
        &self.limits
    }

    /// Chunk one structural unit: split by size, then cap the count.
    #[must_use]
    pub fn split_unit(&self, unit: &StructuralUnit) -> Vec<String> {
        let chunks =
            ParagraphSplitter::new(self.limits).split(unit.content(), unit.splits_on_items());
        let max = self.limits.max_chunks_per_unit();
        if chunks.len() > max {
            debug!(
                unit = %unit.locator(),
                chunks = chunks.len(),
                max,
                "capping unit chunk count"
            );
        }
        cap_unit_chunks(chunks, max)
    }

    /// Chunk a batch of items.
    ///
    /// `base_metadata` and `source_file_name` are shared by the whole batch.
    /// Output preserves item order and chunk order within each unit; exact
    /// duplicate payloads are emitted once.
    #[must_use]
    pub fn chunk_items(
        &self,
        items: &[InputItem],
        base_metadata: &Map<String, Value>,
        source_file_name: Option<&str>,
    ) -> Vec<Chunk> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut stats = BatchStats::default();
        let mut chunks = Vec::new();

        for (index, item) in items.iter().enumerate() {
            let text = sanitize(&item.data);
            if text.is_empty() {
                debug!(item = index, "skipping blank item");
                stats.items_skipped += 1;
                continue;
            }

            let (parser, units) = detect_units_with(&text, &self.limits);
            debug!(item = index, parser, units = units.len(), "detected structure");
            stats.units += units.len();

            let source = source_label(source_file_name, item);
            let external = external_sources(base_metadata, item);

            for unit in &units {
                let pieces = self.split_unit(unit);
                let total = pieces.len();
                let locator = unit.locator();
                let metadata = unit_metadata(base_metadata, item, unit, &external);

                for (position, data) in pieces.into_iter().enumerate() {
                    if !seen.insert(data.clone()) {
                        debug!(
                            item = index,
                            unit = %locator,
                            position = position + 1,
                            "dropping duplicate chunk"
                        );
                        stats.duplicates += 1;
                        continue;
                    }
                    chunks.push(Chunk::new(
                        chunk_title(source, &locator, position + 1, total),
                        metadata.clone(),
                        data,
                    ));
                }
            }
        }

        let emitted = chunks.len();
        let chunks = merge_for_limit(chunks, self.limits.max_total_chunks());

        info!(
            items = items.len(),
            skipped = stats.items_skipped,
            units = stats.units,
            duplicates = stats.duplicates,
            emitted,
            chunks = chunks.len(),
            "chunked batch"
        );
        chunks
    }

    /// Chunk a decoded pipeline request.
    #[must_use]
    pub fn chunk_request(&self, request: &ChunkRequest) -> Vec<Chunk> {
        self.chunk_items(
            &request.items,
            &request.base_metadata,
            request.source_file_name.as_deref(),
        )
    }

    /// Chunk a single text with no metadata.
    #[must_use]
    pub fn chunk_text(&self, text: &str, source_file_name: &str) -> Vec<Chunk> {
        self.chunk_items(&[InputItem::new(text)], &Map::new(), Some(source_file_name))
    }
}
