//! Chapter ("BAB") parser.

use super::{ChapterMarker, OpenUnit, StructureParser};
use crate::StructuralUnit;

/// Splits text at "BAB <roman>" marker lines.
///
/// The marker line opens the unit and stays in its content, so every chunk
/// cut from the chapter can still be traced to its heading. Lines before the
/// first marker belong to no chapter. There is no minimum length: a chapter
/// consisting of its heading alone is still a chapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChapterParser;

impl ChapterParser {
    /// Create a chapter parser.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl StructureParser for ChapterParser {
    fn name(&self) -> &'static str {
        "chapter"
    }

    fn parse(&self, text: &str) -> Vec<StructuralUnit> {
        let mut units = Vec::new();
        let mut open: Option<OpenUnit<'_, ChapterMarker>> = None;

        for line in text.lines() {
            if let Some(marker) = ChapterMarker::parse(line) {
                if let Some(done) = open.take() {
                    units.extend(close(&done));
                }
                let mut unit = OpenUnit::new(marker);
                unit.push(line);
                open = Some(unit);
            } else if let Some(unit) = open.as_mut() {
                unit.push(line);
            }
        }

        if let Some(done) = open {
            units.extend(close(&done));
        }
        units
    }
}

fn close(open: &OpenUnit<'_, ChapterMarker>) -> Option<StructuralUnit> {
    let content = open.body();
    if content.is_empty() {
        return None;
    }
    Some(StructuralUnit::Chapter {
        roman_numeral: open.head.roman_numeral.clone(),
        title: open.head.title.clone(),
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_chapters() {
        let text = "BAB I. Ketentuan Umum\nIsi satu.\n\nBAB II. Ketentuan Khusus\nIsi dua.";
        let units = ChapterParser::new().parse(text);

        assert_eq!(units.len(), 2);
        match &units[0] {
            StructuralUnit::Chapter {
                roman_numeral,
                title,
                content,
            } => {
                assert_eq!(roman_numeral, "I");
                assert_eq!(title.as_deref(), Some("Ketentuan Umum"));
                assert_eq!(content, "BAB I. Ketentuan Umum\nIsi satu.");
            }
            other => panic!("expected chapter, got {other:?}"),
        }
        assert!(units[1].content().starts_with("BAB II. Ketentuan Khusus"));
    }

    #[test]
    fn test_preamble_before_first_chapter_is_dropped() {
        let text = "UNDANG-UNDANG\nMenimbang: ...\nBAB I\nIsi.";
        let units = ChapterParser::new().parse(text);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].content(), "BAB I\nIsi.");
    }

    #[test]
    fn test_heading_only_chapter_is_kept() {
        let units = ChapterParser::new().parse("BAB I\nBAB II\nIsi.");
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].content(), "BAB I");
    }

    #[test]
    fn test_no_markers() {
        assert!(ChapterParser::new().parse("Pasal 1\nIsi.").is_empty());
    }
}
