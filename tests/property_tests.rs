//! Property-based tests for document chunking.
//!
//! These tests verify that the pipeline maintains key invariants:
//! - Sanitization is idempotent
//! - Length: chunks respect max_chars when sentences do, up to a folded neighbour
//! - Minimum size: only a unit's sole chunk may be under min_chars
//! - Uniqueness: no two chunks share a payload
//! - Ceilings: per-unit and per-batch chunk counts are bounded
//! - Order: chunk text appears in source order

use std::collections::HashSet;

use proptest::prelude::*;
use pasal::{sanitize, Chunk, ChunkLimits, DocumentChunker, InputItem};
use serde_json::Map;

// =============================================================================
// Test Generators
// =============================================================================

/// A word that cannot form a BAB/Pasal/keyword heading (no 'b' or 'p').
fn word() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ac-oq-z]{3,9}").unwrap()
}

/// A capitalized sentence ending in a period.
fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 3..15).prop_map(|words| {
        let mut s = words.join(" ");
        if let Some(first) = s.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        s.push('.');
        s
    })
}

fn paragraphs() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec(sentence(), 1..12), 1..8)
}

fn join_paragraphs(paragraphs: Vec<Vec<String>>) -> String {
    paragraphs
        .into_iter()
        .map(|sentences| sentences.join(" "))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Paragraphs of sentences separated by blank lines.
fn prose() -> impl Strategy<Value = String> {
    paragraphs().prop_map(join_paragraphs)
}

/// Prose whose sentences are all distinct, so dedup never drops text.
fn unique_prose() -> impl Strategy<Value = String> {
    paragraphs().prop_map(|paragraphs| {
        let mut counter = 0;
        let tagged = paragraphs
            .into_iter()
            .map(|sentences| {
                sentences
                    .into_iter()
                    .map(|s| {
                        counter += 1;
                        format!("{} zq{counter}.", s.trim_end_matches('.'))
                    })
                    .collect()
            })
            .collect();
        join_paragraphs(tagged)
    })
}

/// A chaptered regulation.
fn chaptered() -> impl Strategy<Value = String> {
    const ROMAN: [&str; 8] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII"];
    prop::collection::vec(prose(), 1..8).prop_map(|bodies| {
        bodies
            .into_iter()
            .enumerate()
            .map(|(i, body)| format!("BAB {}. Judul\n{body}", ROMAN[i]))
            .collect::<Vec<_>>()
            .join("\n\n")
    })
}

fn small_limits() -> ChunkLimits {
    ChunkLimits::default()
        .with_min_chars(40)
        .unwrap()
        .with_max_chars(300)
        .unwrap()
        .with_max_chunks_per_unit(1000)
        .unwrap()
}

fn chunk(text: &str, limits: ChunkLimits) -> Vec<Chunk> {
    DocumentChunker::with_limits(limits)
        .unwrap()
        .chunk_text(text, "doc.pdf")
}

// =============================================================================
// Invariant Helpers
// =============================================================================

fn payloads_unique(chunks: &[Chunk]) -> bool {
    let mut seen = HashSet::new();
    chunks.iter().all(|c| seen.insert(c.data.as_str()))
}

/// A chunk under `min_chars` is folded into its neighbour even past
/// `max_chars`; at most one short neighbour lands on each side.
fn length_bound(limits: &ChunkLimits) -> usize {
    limits.max_chars() + 2 * (limits.min_chars() + 2)
}

fn without_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

// =============================================================================
// Sanitizer
// =============================================================================

proptest! {
    #[test]
    fn sanitize_idempotent(text in "[a-zA-Z \t\r\n]{0,200}") {
        let once = sanitize(&text);
        prop_assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn sanitize_has_no_blank_runs(text in "[a-z \t\r\n]{0,200}") {
        let clean = sanitize(&text);
        prop_assert!(!clean.contains("\n\n\n"));
        prop_assert!(!clean.contains('\r'));
        prop_assert!(!clean.contains(" \n"));
    }
}

// =============================================================================
// Length and Uniqueness
// =============================================================================

proptest! {
    #[test]
    fn chunks_respect_max_chars(text in prose()) {
        let limits = small_limits();
        for chunk in chunk(&text, limits) {
            prop_assert!(
                chunk.len() <= length_bound(&limits),
                "Chunk size {} exceeds bound {}",
                chunk.len(),
                length_bound(&limits)
            );
        }
    }

    #[test]
    fn chapter_chunks_respect_max_chars(text in chaptered()) {
        let limits = small_limits();
        for chunk in chunk(&text, limits) {
            prop_assert!(chunk.len() <= length_bound(&limits));
            prop_assert_eq!(chunk.section_type(), Some("bab"));
        }
    }

    #[test]
    fn payloads_are_unique(text in chaptered()) {
        let chunks = chunk(&text, small_limits());
        prop_assert!(payloads_unique(&chunks));
    }

    #[test]
    fn payloads_unique_across_items(pages in prop::collection::vec(prose(), 1..6)) {
        // every page twice
        let items: Vec<InputItem> = pages
            .iter()
            .chain(pages.iter())
            .map(InputItem::new)
            .collect();
        let chunks = DocumentChunker::with_limits(small_limits())
            .unwrap()
            .chunk_items(&items, &Map::new(), None);
        prop_assert!(payloads_unique(&chunks));
    }

    #[test]
    fn chunks_are_never_empty(text in prose()) {
        for chunk in chunk(&text, small_limits()) {
            prop_assert!(!chunk.data.trim().is_empty());
        }
    }
}

// =============================================================================
// Minimum Size
// =============================================================================

proptest! {
    #[test]
    fn only_last_chunk_may_be_short(text in unique_prose()) {
        let limits = small_limits();
        let chunks = chunk(&text, limits);
        if let Some((_, rest)) = chunks.split_last() {
            for chunk in rest {
                prop_assert!(
                    chunk.len() >= limits.min_chars(),
                    "{} is only {} chars",
                    chunk.title,
                    chunk.len()
                );
            }
        }
    }

    #[test]
    fn short_chapter_chunks_are_folded(text in chaptered()) {
        let limits = small_limits();
        let chunks = chunk(&text, limits);
        // group by chapter: the locator precedes the [i/n] marker
        for (i, chunk) in chunks.iter().enumerate() {
            let unit = chunk.title.rsplit_once(" [").map(|(unit, _)| unit);
            let next_unit = chunks
                .get(i + 1)
                .and_then(|next| next.title.rsplit_once(" [").map(|(unit, _)| unit));
            if unit == next_unit {
                prop_assert!(chunk.len() >= limits.min_chars());
            }
        }
    }

    #[test]
    fn sentences_split_before_lowercase(clauses in prop::collection::vec(word(), 200..400)) {
        // "kata. kata. kata. ...": no capital letter after any period
        let text = clauses.join(". ");
        let limits = small_limits();
        for chunk in chunk(&text, limits) {
            prop_assert!(chunk.len() <= length_bound(&limits));
        }
    }
}

// =============================================================================
// Ceilings
// =============================================================================

proptest! {
    #[test]
    fn unit_ceiling_holds(text in prose(), cap in 1usize..5) {
        let limits = small_limits().with_max_chunks_per_unit(cap).unwrap();
        let chunks = chunk(&text, limits);
        // no markers: a single generic unit
        prop_assert!(chunks.len() <= cap);
    }

    #[test]
    fn global_ceiling_holds(
        pages in prop::collection::vec(unique_prose(), 1..30),
        cap in 1usize..10,
    ) {
        let limits = small_limits().with_max_total_chunks(cap).unwrap();
        let items: Vec<InputItem> = pages.iter().map(InputItem::new).collect();
        let chunks = DocumentChunker::with_limits(limits)
            .unwrap()
            .chunk_items(&items, &Map::new(), Some("doc"));
        prop_assert!(chunks.len() <= cap);
    }
}

// =============================================================================
// Order
// =============================================================================

proptest! {
    #[test]
    fn chunks_preserve_text_and_order(text in unique_prose()) {
        let chunks = chunk(&text, small_limits());
        let joined: String = chunks.iter().map(|c| c.data.as_str()).collect();
        prop_assert_eq!(without_whitespace(&joined), without_whitespace(&text));
    }

    #[test]
    fn positions_are_sequential(text in unique_prose()) {
        let chunks = chunk(&text, small_limits());
        let total = chunks.len();
        for (i, chunk) in chunks.iter().enumerate() {
            let marker = format!("[{}/{}]", i + 1, total);
            prop_assert!(chunk.title.ends_with(&marker), "{} lacks {}", chunk.title, marker);
        }
    }
}
