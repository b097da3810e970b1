//! Structural parsers.
//!
//! Legal and policy documents announce their structure in heading lines.
//! Three conventions are recognized, in strict priority order:
//!
//! ```text
//! 1. Chapters   "BAB IV. Ketentuan Peralihan"      -> ChapterParser
//! 2. Articles   "Pasal 12A: Cuti Tahunan"          -> ArticleParser
//! 3. Sections   "6.4. Travel Policy" / "Purpose"   -> SectionParser
//! 4. Nothing matched                               -> one Generic unit
//! ```
//!
//! Regulations number chapters and articles exclusively, while policies use
//! numbered or named sections; the conventions do not mix inside one
//! document, so the first parser that yields a unit owns the whole text.
//!
//! Each parser is a small state machine over the lines of the text: an open
//! unit accumulates lines until the next heading closes it.

mod article;
mod chapter;
mod section;

use std::sync::LazyLock;

use regex::{Captures, Regex};

pub use article::ArticleParser;
pub use chapter::ChapterParser;
pub use section::SectionParser;

use crate::limits::char_len;
use crate::{ChunkLimits, StructuralUnit};

/// A heading convention that carves text into structural units.
///
/// ```rust
/// use pasal::{ChapterParser, StructureParser};
///
/// let parser = ChapterParser::new();
/// let units = parser.parse("BAB I\nIsi pertama.\nBAB II\nIsi kedua.");
/// assert_eq!(units.len(), 2);
/// ```
pub trait StructureParser: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Split sanitized text into units. Returns nothing when the convention
    /// does not apply.
    fn parse(&self, text: &str) -> Vec<StructuralUnit>;
}

static CHAPTER_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*#*\s*BAB\s+([IVXLCDM]+)\b[.:\-]?\s*(.*)$")
        .expect("valid chapter marker regex")
});

/// A parsed "BAB" marker line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ChapterMarker {
    pub roman_numeral: String,
    pub title: Option<String>,
}

impl ChapterMarker {
    pub(crate) fn parse(line: &str) -> Option<Self> {
        let caps = CHAPTER_MARKER.captures(line)?;
        Some(Self {
            roman_numeral: caps[1].to_uppercase(),
            title: optional_capture(&caps, 2),
        })
    }
}

/// Trimmed capture group, `None` when absent or blank.
pub(crate) fn optional_capture(caps: &Captures<'_>, group: usize) -> Option<String> {
    caps.get(group)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A unit being accumulated: its heading plus the lines seen so far.
pub(crate) struct OpenUnit<'a, H> {
    pub head: H,
    lines: Vec<&'a str>,
}

impl<'a, H> OpenUnit<'a, H> {
    pub(crate) const fn new(head: H) -> Self {
        Self {
            head,
            lines: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, line: &'a str) {
        self.lines.push(line);
    }

    /// Accumulated lines, trimmed as a block.
    pub(crate) fn body(&self) -> String {
        self.lines.join("\n").trim().to_string()
    }
}

/// Whether `body` is long enough to keep as an article or section.
pub(crate) fn long_enough(body: &str, min_chars: usize) -> bool {
    !body.is_empty() && char_len(body) >= min_chars
}

/// Run the parsers in priority order and return the winning units.
///
/// Blank text yields no units; text with no recognized structure yields a
/// single [`StructuralUnit::Generic`].
///
/// ```rust
/// use pasal::{detect_units, ChunkLimits, SectionType};
///
/// let units = detect_units("Just some prose.", &ChunkLimits::default());
/// assert_eq!(units.len(), 1);
/// assert_eq!(units[0].section_type(), SectionType::Generic);
/// ```
#[must_use]
pub fn detect_units(text: &str, limits: &ChunkLimits) -> Vec<StructuralUnit> {
    detect_units_with(text, limits).1
}

/// Like [`detect_units`], also naming the parser that won.
pub(crate) fn detect_units_with(
    text: &str,
    limits: &ChunkLimits,
) -> (&'static str, Vec<StructuralUnit>) {
    if text.trim().is_empty() {
        return ("none", Vec::new());
    }

    let min = limits.min_unit_chars();
    let chapters = ChapterParser::new();
    let articles = ArticleParser::new(min);
    let sections = SectionParser::new(min);
    let parsers: [&dyn StructureParser; 3] = [&chapters, &articles, &sections];

    for parser in parsers {
        let units = parser.parse(text);
        if !units.is_empty() {
            return (parser.name(), units);
        }
    }

    (
        "generic",
        vec![StructuralUnit::Generic {
            content: text.trim().to_string(),
        }],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SectionType;

    #[test]
    fn test_chapter_marker_variants() {
        let m = ChapterMarker::parse("BAB I. Ketentuan Umum").unwrap();
        assert_eq!(m.roman_numeral, "I");
        assert_eq!(m.title.as_deref(), Some("Ketentuan Umum"));

        let m = ChapterMarker::parse("## bab iv").unwrap();
        assert_eq!(m.roman_numeral, "IV");
        assert_eq!(m.title, None);

        let m = ChapterMarker::parse("BAB XII: Penutup").unwrap();
        assert_eq!(m.roman_numeral, "XII");
        assert_eq!(m.title.as_deref(), Some("Penutup"));
    }

    #[test]
    fn test_chapter_marker_rejects_prose() {
        assert!(ChapterMarker::parse("Babak baru dimulai").is_none());
        assert!(ChapterMarker::parse("bab ini mengatur cuti").is_none());
        assert!(ChapterMarker::parse("Lihat BAB II").is_none());
    }

    #[test]
    fn test_chapters_win_over_articles() {
        let text = "BAB I. Umum\nPasal 1\nIsi pasal pertama yang cukup panjang.";
        let (name, units) = detect_units_with(text, &ChunkLimits::default());
        assert_eq!(name, "chapter");
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].section_type(), SectionType::Bab);
    }

    #[test]
    fn test_articles_win_over_sections() {
        let text = "Pasal 1\n1. Pegawai berhak atas cuti tahunan dua belas hari.";
        let (name, units) = detect_units_with(text, &ChunkLimits::default());
        assert_eq!(name, "article");
        assert_eq!(units[0].section_type(), SectionType::Pasal);
    }

    #[test]
    fn test_generic_fallback() {
        let units = detect_units("Plain prose with no headings.", &ChunkLimits::default());
        assert_eq!(
            units,
            vec![StructuralUnit::Generic {
                content: "Plain prose with no headings.".into()
            }]
        );
    }

    #[test]
    fn test_blank_text_has_no_units() {
        assert!(detect_units("  \n ", &ChunkLimits::default()).is_empty());
    }

    #[test]
    fn test_short_articles_fall_through_to_generic() {
        let text = "Pasal 1\nSingkat.";
        let (name, units) = detect_units_with(text, &ChunkLimits::default());
        assert_eq!(name, "generic");
        assert_eq!(units[0].content(), text);
    }
}
