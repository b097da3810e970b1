//! # pasal
//!
//! Structure-aware chunking of legal and policy documents for retrieval.
//!
//! ## The Problem
//!
//! Company knowledge bases are full of regulations and policies: collective
//! labour agreements split into "BAB" (chapters) and "Pasal" (articles),
//! handbooks numbered "6.4. Travel Policy", SOPs with "Purpose" and "Scope"
//! sections. Cutting them every N characters throws away the one thing a
//! reader asks about ("what does Pasal 12 say?"), and splitting an article
//! mid-list separates a rule from its exceptions.
//!
//! ## The Approach
//!
//! ```text
//! extracted text
//!   │ sanitize            CR removal, trailing space, blank-line runs
//!   │ detect structure    BAB > Pasal > numbered/keyword sections > generic
//!   │ split each unit     paragraphs > list items (articles) > sentences
//!   │ cap each unit       at most 12 chunks per chapter/article/section
//!   │ title + metadata    "pp.pdf :: Pasal 12 [2/3]", sectionType, pageNumber
//!   │ dedup               identical payloads emitted once per batch
//!   ▼ global ceiling      at most 1200 chunks per batch
//! chunks
//! ```
//!
//! Only one structural convention applies per input item: chapters win over
//! articles, articles over sections. Text with no recognized headings is a
//! single generic unit split by length alone.
//!
//! ## Quick Start
//!
//! ```rust
//! use pasal::{DocumentChunker, InputItem};
//! use serde_json::{json, Map};
//!
//! let text = "Pasal 1\nSetiap pegawai berhak atas cuti tahunan dua belas hari kerja.\n\
//!             Pasal 2\nCuti sakit diberikan berdasarkan surat keterangan dokter.";
//! let items = [InputItem::new(text).with_page_number(1)];
//!
//! let mut base = Map::new();
//! base.insert("department".into(), json!("HR"));
//!
//! let chunks = DocumentChunker::new().chunk_items(&items, &base, Some("pk-2024.pdf"));
//!
//! assert_eq!(chunks.len(), 2);
//! assert_eq!(chunks[0].title, "pk-2024.pdf :: Pasal 1 [1/1]");
//! assert_eq!(chunks[1].metadata["articleNumber"], "2");
//! assert_eq!(chunks[1].metadata["department"], "HR");
//! ```
//!
//! ## Limits
//!
//! | Limit | Default | Effect |
//! |-------|---------|--------|
//! | `max_chars` | 2400 | Paragraph packing ceiling |
//! | `min_chars` | 80 | Shorter chunks fold into a neighbour |
//! | `max_chunks_per_unit` | 12 | Per chapter/article/section |
//! | `max_total_chunks` | 1200 | Per batch |
//! | `min_unit_chars` | 20 | Shorter articles/sections are dropped |
//!
//! See [`ChunkLimits`].

mod ceiling;
mod chunk;
mod chunker;
mod error;
mod input;
mod limits;
mod metadata;
mod parse;
mod sanitize;
mod split;
mod unit;

pub use ceiling::{cap_unit_chunks, merge_for_limit};
pub use chunk::Chunk;
pub use chunker::DocumentChunker;
pub use error::{Error, Result};
pub use input::{ChunkRequest, InputItem, EXTERNAL_SOURCES};
pub use limits::ChunkLimits;
pub use parse::{detect_units, ArticleParser, ChapterParser, SectionParser, StructureParser};
pub use sanitize::sanitize;
pub use split::ParagraphSplitter;
pub use unit::{SectionType, StructuralUnit};
