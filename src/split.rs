//! Size-bounded splitting of one structural unit.
//!
//! ## The Algorithm
//!
//! Given `max_chars = 2400` and `min_chars = 80`:
//!
//! ```text
//! 1. Split the unit on blank lines into paragraphs
//!    (a blank line followed by a list item does not split)
//! 2. Pack paragraphs greedily, joined by "\n\n", flushing before overflow
//! 3. A paragraph alone > 2400:
//!    - articles: split on list-item lines ("a)", "b.", "1)", "2."), pack with "\n"
//!    - any piece still > 2400: cut after ". " / "! " / "? ", pack back together
//! 4. Fold every chunk < 80 into the one before it
//!    (a short first chunk folds into the one after it)
//! ```
//!
//! A sentence longer than `max_chars` is only cut further at Unicode
//! sentence boundaries, never mid-sentence. Folding in step 4 may push a
//! chunk past `max_chars` by the length of the short neighbour. Splitting
//! never reorders text; only the grouping changes.

use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::limits::char_len;
use crate::ChunkLimits;

static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[^\S\n]*\n\s*").expect("valid blank line regex"));

static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(?:[A-Za-z]|\d{1,3})[.)]|[-•*])\s").expect("valid list item regex")
});

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+\s+").expect("valid sentence end regex"));

const PARAGRAPH_SEPARATOR: &str = "\n\n";
const ITEM_SEPARATOR: &str = "\n";

/// Splits unit content into chunks bounded by [`ChunkLimits::max_chars`].
///
/// ## Example
///
/// ```rust
/// use pasal::{ChunkLimits, ParagraphSplitter};
///
/// let limits = ChunkLimits::default().with_max_chars(120).unwrap().with_min_chars(10).unwrap();
/// let splitter = ParagraphSplitter::new(limits);
///
/// let text = format!("{}\n\n{}", "First paragraph. ".repeat(5), "Second paragraph. ".repeat(5));
/// let chunks = splitter.split(&text, false);
/// assert_eq!(chunks.len(), 2);
/// assert!(chunks.iter().all(|c| c.chars().count() <= 120));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParagraphSplitter {
    limits: ChunkLimits,
}

impl ParagraphSplitter {
    /// Create a splitter with the given limits.
    #[must_use]
    pub const fn new(limits: ChunkLimits) -> Self {
        Self { limits }
    }

    /// Split `content` into bounded chunks.
    ///
    /// With `list_items` set, an oversized paragraph is first cut at lines
    /// that open a list item before falling back to sentences.
    #[must_use]
    pub fn split(&self, content: &str, list_items: bool) -> Vec<String> {
        let content = content.trim();
        if content.is_empty() {
            return vec![];
        }

        let mut packer = Packer::new(&self.limits, PARAGRAPH_SEPARATOR);
        for paragraph in paragraphs(content) {
            if char_len(paragraph) > self.limits.max_chars() {
                packer.extend(self.split_oversized(paragraph, list_items));
            } else {
                packer.push(paragraph);
            }
        }

        self.merge_small(packer.finish())
    }

    fn split_oversized(&self, paragraph: &str, list_items: bool) -> Vec<String> {
        if !list_items {
            return self.split_sentences(paragraph);
        }

        let items = list_item_pieces(paragraph);
        if items.len() < 2 {
            return self.split_sentences(paragraph);
        }

        let mut packer = Packer::new(&self.limits, ITEM_SEPARATOR);
        for item in items {
            if char_len(&item) > self.limits.max_chars() {
                packer.extend(self.split_sentences(&item));
            } else {
                packer.push(&item);
            }
        }
        packer.finish()
    }

    /// Pack sentences back together up to the limit.
    ///
    /// Sentences keep their trailing whitespace, so concatenating them
    /// reproduces the source text exactly. A sentence still over the limit
    /// is cut at Unicode sentence boundaries, which also catch closing
    /// quotes and non-Latin terminators.
    fn split_sentences(&self, text: &str) -> Vec<String> {
        let mut packer = Packer::new(&self.limits, "");
        for sentence in sentences(text) {
            if char_len(sentence) > self.limits.max_chars() {
                for segment in sentence.split_sentence_bounds() {
                    packer.push(segment);
                }
            } else {
                packer.push(sentence);
            }
        }
        packer.finish()
    }

    /// Fold every chunk shorter than `min_chars` into the preceding chunk.
    /// A short first chunk folds into the chunk after it instead.
    fn merge_small(&self, chunks: Vec<String>) -> Vec<String> {
        let min = self.limits.min_chars();
        let mut merged: Vec<String> = Vec::with_capacity(chunks.len());

        for chunk in chunks {
            let absorb = match merged.as_slice() {
                [] => false,
                [first] => char_len(first) < min || char_len(&chunk) < min,
                _ => char_len(&chunk) < min,
            };
            if !absorb {
                merged.push(chunk);
            } else if let Some(prev) = merged.last_mut() {
                prev.push_str(PARAGRAPH_SEPARATOR);
                prev.push_str(&chunk);
            }
        }

        merged
    }
}

impl Default for ParagraphSplitter {
    fn default() -> Self {
        Self::new(ChunkLimits::default())
    }
}

/// Split on blank lines, except before a line that opens a list item.
fn paragraphs(content: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;

    for m in BLANK_LINE.find_iter(content) {
        if LIST_ITEM.is_match(&content[m.end()..]) {
            continue;
        }
        out.push(content[start..m.start()].trim());
        start = m.end();
    }
    out.push(content[start..].trim());

    out.retain(|p| !p.is_empty());
    out
}

/// Cut after each run of terminal punctuation followed by whitespace.
fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;

    for m in SENTENCE_END.find_iter(text) {
        out.push(&text[start..m.end()]);
        start = m.end();
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

/// Group lines so that each list-item line starts a new piece.
fn list_item_pieces(paragraph: &str) -> Vec<String> {
    let mut pieces: Vec<Vec<&str>> = Vec::new();

    for line in paragraph.lines() {
        if pieces.is_empty() || LIST_ITEM.is_match(line) {
            pieces.push(vec![line]);
        } else if let Some(current) = pieces.last_mut() {
            current.push(line);
        }
    }

    pieces
        .into_iter()
        .map(|lines| lines.join("\n").trim().to_string())
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Greedy accumulator: appends pieces to a buffer until the next one would
/// overflow, then flushes. A piece that is oversized on its own becomes a
/// chunk by itself.
struct Packer<'a> {
    limits: &'a ChunkLimits,
    separator: &'static str,
    separator_len: usize,
    buffer: String,
    buffer_len: usize,
    out: Vec<String>,
}

impl<'a> Packer<'a> {
    fn new(limits: &'a ChunkLimits, separator: &'static str) -> Self {
        Self {
            limits,
            separator,
            separator_len: char_len(separator),
            buffer: String::new(),
            buffer_len: 0,
            out: Vec::new(),
        }
    }

    fn push(&mut self, piece: &str) {
        let len = char_len(piece);
        if self.buffer.is_empty() {
            self.buffer.push_str(piece);
            self.buffer_len = len;
            return;
        }
        if self
            .limits
            .would_overflow(self.buffer_len, self.separator_len, len)
        {
            self.flush();
            self.buffer.push_str(piece);
            self.buffer_len = len;
            return;
        }
        self.buffer.push_str(self.separator);
        self.buffer.push_str(piece);
        self.buffer_len += self.separator_len + len;
    }

    /// Append already-bounded chunks. The last one stays open so following
    /// pieces can still pack onto it.
    fn extend(&mut self, mut chunks: Vec<String>) {
        self.flush();
        if let Some(last) = chunks.pop() {
            self.out.extend(chunks);
            self.buffer_len = char_len(&last);
            self.buffer = last;
        }
    }

    fn flush(&mut self) {
        let chunk = self.buffer.trim();
        if !chunk.is_empty() {
            self.out.push(chunk.to_string());
        }
        self.buffer.clear();
        self.buffer_len = 0;
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.out
    }
}
