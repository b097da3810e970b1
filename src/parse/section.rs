//! Policy section parser: numbered headings and named sections.

use std::sync::LazyLock;

use regex::Regex;

use super::{long_enough, OpenUnit, StructureParser};
use crate::StructuralUnit;

// "6.4 Travel Policy\t24": a table-of-contents entry, not a heading.
static TOC_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\d+(?:\.\d+)*\.?\s+[^\t]*\t+\s*\d+\s*$").expect("valid toc entry regex")
});

// N. / N.N / N.N. / N.N.N / N.N.N. followed by a title starting with a letter.
static NUMBERED_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{1,3}\.(?:\d{1,3}\.?){0,2})\s+(\p{L}.*)$")
        .expect("valid numbered heading regex")
});

static KEYWORD_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:Policy|Purpose|Scope|Objectives?|Responsibilit(?:y|ies)",
        r"|Related\s+Documents?|General\s+Standards?|Appendix)\b",
    ))
    .expect("valid keyword heading regex")
});

#[derive(Debug, Clone)]
struct SectionHead {
    number: Option<String>,
    title: Option<String>,
}

/// Splits policy text at numbered headings ("6.4. Travel Policy") and at
/// lines opening with a standard section keyword ("Purpose", "Scope",
/// "Responsibilities", ...).
///
/// Table-of-contents lines, which repeat the headings followed by a tab and
/// a page number, are ignored. Keyword matching is English only.
#[derive(Debug, Clone, Copy)]
pub struct SectionParser {
    min_content_chars: usize,
}

impl SectionParser {
    /// Create a section parser that drops sections with less than
    /// `min_content_chars` characters of body.
    #[must_use]
    pub const fn new(min_content_chars: usize) -> Self {
        Self { min_content_chars }
    }

    fn close(&self, open: &OpenUnit<'_, SectionHead>) -> Option<StructuralUnit> {
        let content = open.body();
        let SectionHead { number, title } = &open.head;
        if !long_enough(&content, self.min_content_chars) || (number.is_none() && title.is_none())
        {
            return None;
        }
        Some(StructuralUnit::Section {
            section_number: number.clone(),
            section_title: title.clone(),
            content,
        })
    }
}

impl Default for SectionParser {
    fn default() -> Self {
        Self::new(crate::ChunkLimits::DEFAULT.min_unit_chars())
    }
}

impl StructureParser for SectionParser {
    fn name(&self) -> &'static str {
        "section"
    }

    fn parse(&self, text: &str) -> Vec<StructuralUnit> {
        let mut units = Vec::new();
        let mut open: Option<OpenUnit<'_, SectionHead>> = None;

        for line in text.lines() {
            if TOC_ENTRY.is_match(line) {
                continue;
            }

            let heading = numbered_heading(line).or_else(|| keyword_heading(line));
            if let Some((head, rest)) = heading {
                if let Some(done) = open.take() {
                    units.extend(self.close(&done));
                }
                let mut unit = OpenUnit::new(head);
                if let Some(rest) = rest {
                    unit.push(rest);
                }
                open = Some(unit);
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

fn numbered_heading(line: &str) -> Option<(SectionHead, Option<&str>)> {
    let caps = NUMBERED_HEADING.captures(line)?;
    let number = caps[1].trim_end_matches('.').to_string();
    let title = caps[2].trim().to_string();
    Some((
        SectionHead {
            number: Some(number),
            title: Some(title),
        },
        None,
    ))
}

/// "Purpose: This policy sets out..." opens a section titled "Purpose" whose
/// body starts with the text after the colon.
fn keyword_heading(line: &str) -> Option<(SectionHead, Option<&str>)> {
    let trimmed = line.trim();
    if !KEYWORD_HEADING.is_match(trimmed) {
        return None;
    }
    let (title, rest) = match trimmed.split_once(':') {
        Some((title, rest)) => (title.trim(), Some(rest.trim()).filter(|r| !r.is_empty())),
        None => (trimmed, None),
    };
    Some((
        SectionHead {
            number: None,
            title: Some(title.to_string()),
        },
        rest,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SectionType;

    const BODY: &str = "Employees must book travel through the portal.";

    #[test]
    fn test_numbered_levels() {
        for (line, number) in [
            ("1. Introduction", "1"),
            ("6.4 Travel Policy", "6.4"),
            ("6.4. Travel Policy", "6.4"),
            ("2.1.3 Per Diem", "2.1.3"),
            ("2.1.3. Per Diem", "2.1.3"),
        ] {
            let (head, _) = numbered_heading(line).unwrap();
            assert_eq!(head.number.as_deref(), Some(number), "{line}");
        }
    }

    #[test]
    fn test_numbered_rejects() {
        assert!(numbered_heading("2024 was a good year").is_none());
        assert!(numbered_heading("1.2.3.4 Too Deep").is_none());
        assert!(numbered_heading("3.5 %").is_none());
    }

    #[test]
    fn test_toc_lines_skipped() {
        let text = format!("6.4 Travel Policy\t24\n7 Expenses\t30\n\n6.4. Travel Policy\n{BODY}");
        let units = SectionParser::default().parse(&text);

        assert_eq!(units.len(), 1);
        assert_eq!(
            units[0],
            StructuralUnit::Section {
                section_number: Some("6.4".into()),
                section_title: Some("Travel Policy".into()),
                content: BODY.into(),
            }
        );
    }

    #[test]
    fn test_keyword_sections() {
        let text = format!("Purpose: {BODY}\nScope\nApplies to all permanent staff in Jakarta.");
        let units = SectionParser::default().parse(&text);

        assert_eq!(units.len(), 2);
        assert_eq!(units[0].section_type(), SectionType::Word);
        assert_eq!(units[0].locator(), "Purpose");
        assert_eq!(units[0].content(), BODY);
        assert_eq!(units[1].locator(), "Scope");
    }

    #[test]
    fn test_keyword_case_insensitive_and_plurals() {
        for line in [
            "RESPONSIBILITIES",
            "Responsibility",
            "related documents",
            "General Standard",
            "Objectives",
        ] {
            assert!(keyword_heading(line).is_some(), "{line}");
        }
        assert!(keyword_heading("Policyholders are covered").is_none());
        assert!(keyword_heading("Tujuan").is_none());
    }

    #[test]
    fn test_short_sections_dropped() {
        let text = format!("1. Intro\nShort.\n2. Details\n{BODY}");
        let units = SectionParser::default().parse(&text);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].locator(), "Section 2");
    }
}
