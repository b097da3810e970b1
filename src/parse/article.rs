//! Article ("Pasal") parser.

use std::sync::LazyLock;

use regex::Regex;

use super::{long_enough, optional_capture, ChapterMarker, OpenUnit, StructureParser};
use crate::StructuralUnit;

static ARTICLE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*Pasal\s+(\d+[A-Z]?)\b\s*[:.)]?\s*(.*)$")
        .expect("valid article marker regex")
});

#[derive(Debug, Clone)]
struct ArticleHead {
    chapter: Option<ChapterMarker>,
    number: String,
    title: Option<String>,
}

/// Splits text at "Pasal <n>" marker lines.
///
/// Chapter markers are tracked as context rather than emitted: each article
/// records the chapter that was open when it began. The marker line itself
/// is not part of the article content.
#[derive(Debug, Clone, Copy)]
pub struct ArticleParser {
    min_content_chars: usize,
}

impl ArticleParser {
    /// Create an article parser that drops articles with less than
    /// `min_content_chars` characters of body.
    #[must_use]
    pub const fn new(min_content_chars: usize) -> Self {
        Self { min_content_chars }
    }

    fn close(&self, open: &OpenUnit<'_, ArticleHead>) -> Option<StructuralUnit> {
        let content = open.body();
        if !long_enough(&content, self.min_content_chars) || open.head.number.is_empty() {
            return None;
        }
        let chapter = open.head.chapter.as_ref();
        Some(StructuralUnit::Article {
            chapter_roman_numeral: chapter.map(|c| c.roman_numeral.clone()),
            chapter_title: chapter.and_then(|c| c.title.clone()),
            article_number: open.head.number.clone(),
            article_title: open.head.title.clone(),
            content,
        })
    }
}

impl Default for ArticleParser {
    fn default() -> Self {
        Self::new(crate::ChunkLimits::DEFAULT.min_unit_chars())
    }
}

impl StructureParser for ArticleParser {
    fn name(&self) -> &'static str {
        "article"
    }

    fn parse(&self, text: &str) -> Vec<StructuralUnit> {
        let mut units = Vec::new();
        let mut chapter: Option<ChapterMarker> = None;
        let mut open: Option<OpenUnit<'_, ArticleHead>> = None;

        for line in text.lines() {
            if let Some(marker) = ChapterMarker::parse(line) {
                if let Some(done) = open.take() {
                    units.extend(self.close(&done));
                }
                chapter = Some(marker);
            } else if let Some(caps) = ARTICLE_MARKER.captures(line) {
                if let Some(done) = open.take() {
                    units.extend(self.close(&done));
                }
                open = Some(OpenUnit::new(ArticleHead {
                    chapter: chapter.clone(),
                    number: caps[1].to_uppercase(),
                    title: optional_capture(&caps, 2),
                }));
            } else if let Some(unit) = open.as_mut() {
                unit.push(line);
            }
        }

        if let Some(done) = open {
            units.extend(self.close(&done));
        }
        units
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "Setiap pegawai berhak atas cuti tahunan.";

    #[test]
    fn test_articles_inherit_chapter() {
        let text = format!("BAB II. Cuti\nPasal 3\n{BODY}\nPasal 4: Cuti Sakit\n{BODY}");
        let units = ArticleParser::default().parse(&text);

        assert_eq!(units.len(), 2);
        match &units[1] {
            StructuralUnit::Article {
                chapter_roman_numeral,
                chapter_title,
                article_number,
                article_title,
                content,
            } => {
                assert_eq!(chapter_roman_numeral.as_deref(), Some("II"));
                assert_eq!(chapter_title.as_deref(), Some("Cuti"));
                assert_eq!(article_number, "4");
                assert_eq!(article_title.as_deref(), Some("Cuti Sakit"));
                assert_eq!(content, BODY);
            }
            other => panic!("expected article, got {other:?}"),
        }
    }

    #[test]
    fn test_chapter_change_closes_article() {
        let text = format!("BAB I\nPasal 1\n{BODY}\nBAB II\nPasal 2\n{BODY}");
        let units = ArticleParser::default().parse(&text);

        assert_eq!(units.len(), 2);
        assert_eq!(units[0].content(), BODY);
        match &units[1] {
            StructuralUnit::Article {
                chapter_roman_numeral,
                ..
            } => assert_eq!(chapter_roman_numeral.as_deref(), Some("II")),
            other => panic!("expected article, got {other:?}"),
        }
    }

    #[test]
    fn test_letter_suffix_and_punctuation() {
        let text = format!("pasal 12a) Ketentuan Tambahan\n{BODY}");
        let units = ArticleParser::default().parse(&text);
        assert_eq!(units[0].locator(), "Pasal 12A");
    }

    #[test]
    fn test_short_articles_dropped() {
        let text = format!("Pasal 1\nTerlalu pendek.\nPasal 2\n{BODY}");
        let units = ArticleParser::default().parse(&text);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].locator(), "Pasal 2");
    }

    #[test]
    fn test_no_chapter_context() {
        let units = ArticleParser::default().parse(&format!("Pasal 1\n{BODY}"));
        assert!(matches!(
            &units[0],
            StructuralUnit::Article {
                chapter_roman_numeral: None,
                chapter_title: None,
                ..
            }
        ));
    }

    #[test]
    fn test_prose_mentioning_pasal_mid_line_is_body() {
        let text = format!("Pasal 1\n{BODY}\nsebagaimana dimaksud dalam Pasal 2 ayat (1).");
        let units = ArticleParser::default().parse(&text);
        assert_eq!(units.len(), 1);
        assert!(units[0].content().contains("dalam Pasal 2"));
    }
}
