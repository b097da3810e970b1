//! Chunk-count ceilings.
//!
//! Two safety nets bound the output of pathological documents by merging
//! neighbours in fixed-size groups:
//!
//! ```text
//! 30 chunks, ceiling 12 -> ratio = ceil(30 / 12) = 3
//!
//! [c0 c1 c2] [c3 c4 c5] ... [c27 c28 c29]  ->  10 chunks
//! ```
//!
//! Content and order are preserved; merged text is joined by a blank line.
//! Merged chunks may exceed the length limit.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::Chunk;

const SEPARATOR: &str = "\n\n";

static POSITION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\[\d+/\d+\]$").expect("valid position marker regex"));

/// Merge a unit's chunks so there are at most `max_chunks` of them.
///
/// ```rust
/// use pasal::cap_unit_chunks;
///
/// let chunks: Vec<String> = (0..5).map(|i| i.to_string()).collect();
/// assert_eq!(cap_unit_chunks(chunks, 2), vec!["0\n\n1\n\n2", "3\n\n4"]);
/// ```
#[must_use]
pub fn cap_unit_chunks(chunks: Vec<String>, max_chunks: usize) -> Vec<String> {
    if max_chunks == 0 || chunks.len() <= max_chunks {
        return chunks;
    }

    let ratio = chunks.len().div_ceil(max_chunks);
    let mut merged: Vec<String> = Vec::with_capacity(max_chunks);
    for (i, chunk) in chunks.into_iter().enumerate() {
        if i % ratio == 0 {
            merged.push(chunk);
        } else if let Some(current) = merged.last_mut() {
            current.push_str(SEPARATOR);
            current.push_str(&chunk);
        }
    }
    merged
}

/// Downsample a whole batch to at most `max_total` chunks.
///
/// Every run of `k = ceil(total / max_total)` chunks becomes one chunk that
/// takes the first chunk's title, with its `[i/n]` marker replaced by
/// `[merged]`, and the first chunk's metadata plus
/// `note: "merged_for_limit"`.
#[must_use]
pub fn merge_for_limit(chunks: Vec<Chunk>, max_total: usize) -> Vec<Chunk> {
    if max_total == 0 || chunks.len() <= max_total {
        return chunks;
    }

    let k = chunks.len().div_ceil(max_total);
    let mut merged: Vec<Chunk> = Vec::with_capacity(max_total);
    for (i, chunk) in chunks.into_iter().enumerate() {
        if i % k == 0 {
            merged.push(start_merged(chunk));
        } else if let Some(current) = merged.last_mut() {
            current.data.push_str(SEPARATOR);
            current.data.push_str(&chunk.data);
        }
    }
    merged
}

fn start_merged(mut chunk: Chunk) -> Chunk {
    chunk.title = if POSITION_MARKER.is_match(&chunk.title) {
        POSITION_MARKER
            .replace(&chunk.title, " [merged]")
            .into_owned()
    } else {
        format!("{} [merged]", chunk.title)
    };
    chunk
        .metadata
        .insert("note".into(), Value::from("merged_for_limit"));
    chunk
}
