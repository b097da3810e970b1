//! Structural units: the spans a parser carves out of a document.

use serde::{Deserialize, Serialize};

/// Which parser family produced a unit, as tagged in chunk metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    /// A legal chapter ("BAB").
    Bab,
    /// A legal article ("Pasal").
    Pasal,
    /// A numbered policy section ("6.4 Travel").
    Numeric,
    /// A policy section named by keyword ("Purpose", "Scope", ...).
    Word,
    /// Text with no recognized structure.
    Generic,
}

impl SectionType {
    /// The metadata tag for this type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bab => "bab",
            Self::Pasal => "pasal",
            Self::Numeric => "numeric",
            Self::Word => "word",
            Self::Generic => "generic",
        }
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contiguous span of document text identified by one parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralUnit {
    /// A chapter. `content` starts with the "BAB" marker line itself.
    Chapter {
        /// Uppercased roman numeral, e.g. `"IV"`.
        roman_numeral: String,
        /// Text after the numeral on the marker line.
        title: Option<String>,
        /// Marker line plus everything up to the next chapter.
        content: String,
    },
    /// An article, with the chapter context active when it began.
    Article {
        /// Numeral of the enclosing chapter, if one was seen.
        chapter_roman_numeral: Option<String>,
        /// Title of the enclosing chapter.
        chapter_title: Option<String>,
        /// Article number with optional letter suffix, e.g. `"12A"`.
        article_number: String,
        /// Text after the number on the marker line.
        article_title: Option<String>,
        /// Body lines below the marker.
        content: String,
    },
    /// A numbered or keyword-named policy section.
    Section {
        /// Dotted number without trailing dot, e.g. `"6.4"`.
        section_number: Option<String>,
        /// Heading text.
        section_title: Option<String>,
        /// Body lines below the heading.
        content: String,
    },
    /// The whole text, when no parser matched.
    Generic {
        /// The sanitized text.
        content: String,
    },
}

impl StructuralUnit {
    /// The unit's text.
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::Chapter { content, .. }
            | Self::Article { content, .. }
            | Self::Section { content, .. }
            | Self::Generic { content } => content,
        }
    }

    /// The metadata tag for this unit.
    #[must_use]
    pub const fn section_type(&self) -> SectionType {
        match self {
            Self::Chapter { .. } => SectionType::Bab,
            Self::Article { .. } => SectionType::Pasal,
            Self::Section {
                section_number: Some(_),
                ..
            } => SectionType::Numeric,
            Self::Section { .. } => SectionType::Word,
            Self::Generic { .. } => SectionType::Generic,
        }
    }

    /// Short label locating this unit in its document, used in chunk titles.
    ///
    /// ```rust
    /// use pasal::StructuralUnit;
    ///
    /// let unit = StructuralUnit::Section {
    ///     section_number: Some("6.4".into()),
    ///     section_title: Some("Travel Policy".into()),
    ///     content: String::new(),
    /// };
    /// assert_eq!(unit.locator(), "Section 6.4");
    /// ```
    #[must_use]
    pub fn locator(&self) -> String {
        match self {
            Self::Chapter { roman_numeral, .. } => format!("BAB {roman_numeral}"),
            Self::Article { article_number, .. } => format!("Pasal {article_number}"),
            Self::Section {
                section_number: Some(number),
                ..
            } => format!("Section {number}"),
            Self::Section {
                section_title: Some(title),
                ..
            } => title.clone(),
            Self::Section { .. } | Self::Generic { .. } => "chunk".to_string(),
        }
    }

    /// Whether the splitter should try list-item boundaries before sentences.
    #[must_use]
    pub const fn splits_on_items(&self) -> bool {
        matches!(self, Self::Article { .. })
    }
}
