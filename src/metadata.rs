//! Title and metadata assembly for emitted chunks.
//!
//! Metadata layers, later layers winning on key collision:
//!
//! ```text
//! base metadata            (shared by the whole batch)
//! unit fields              sectionType, chapterNumber, articleNumber, ..., pageNumber
//! externalSources          base list ++ item list, only when non-empty
//! ```
//!
//! The item's own metadata contributes nothing but its `externalSources`.

use serde_json::{Map, Value};

use crate::input::EXTERNAL_SOURCES;
use crate::{InputItem, StructuralUnit};

const DEFAULT_SOURCE: &str = "Document";

/// Name shown at the start of every chunk title.
///
/// The batch-wide source file name wins, then the item title, then
/// `"Document"`.
pub(crate) fn source_label<'a>(source_file_name: Option<&'a str>, item: &'a InputItem) -> &'a str {
    source_file_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .or_else(|| {
            item.title
                .as_deref()
                .map(str::trim)
                .filter(|title| !title.is_empty())
        })
        .unwrap_or(DEFAULT_SOURCE)
}

/// `"<source> :: <locator> [<position>/<total>]"`, position 1-based.
pub(crate) fn chunk_title(source: &str, locator: &str, position: usize, total: usize) -> String {
    format!("{source} :: {locator} [{position}/{total}]")
}

/// Concatenate the base and item `externalSources` lists, without dedup.
pub(crate) fn external_sources(base: &Map<String, Value>, item: &InputItem) -> Vec<Value> {
    let mut sources = Vec::new();
    for metadata in [base, &item.metadata] {
        match metadata.get(EXTERNAL_SOURCES) {
            Some(Value::Array(list)) => sources.extend(list.iter().cloned()),
            Some(Value::Null) | None => {}
            Some(single) => sources.push(single.clone()),
        }
    }
    sources
}

/// Metadata shared by every chunk cut from `unit`.
pub(crate) fn unit_metadata(
    base: &Map<String, Value>,
    item: &InputItem,
    unit: &StructuralUnit,
    external: &[Value],
) -> Map<String, Value> {
    let mut metadata: Map<String, Value> = base
        .iter()
        .filter(|(key, _)| key.as_str() != EXTERNAL_SOURCES)
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    metadata.insert(
        "sectionType".into(),
        Value::from(unit.section_type().as_str()),
    );
    match unit {
        StructuralUnit::Chapter {
            roman_numeral,
            title,
            ..
        } => {
            insert(&mut metadata, "chapterNumber", Some(roman_numeral));
            insert(&mut metadata, "chapterTitle", title.as_ref());
        }
        StructuralUnit::Article {
            chapter_roman_numeral,
            chapter_title,
            article_number,
            article_title,
            ..
        } => {
            insert(&mut metadata, "chapterNumber", chapter_roman_numeral.as_ref());
            insert(&mut metadata, "chapterTitle", chapter_title.as_ref());
            insert(&mut metadata, "articleNumber", Some(article_number));
            insert(&mut metadata, "articleTitle", article_title.as_ref());
        }
        StructuralUnit::Section {
            section_number,
            section_title,
            ..
        } => {
            insert(&mut metadata, "sectionNumber", section_number.as_ref());
            insert(&mut metadata, "sectionTitle", section_title.as_ref());
        }
        StructuralUnit::Generic { .. } => {}
    }
    if let Some(page) = item.page_number {
        metadata.insert("pageNumber".into(), Value::from(page));
    }

    if !external.is_empty() {
        metadata.insert(EXTERNAL_SOURCES.into(), Value::Array(external.to_vec()));
    }
    metadata
}

fn insert(metadata: &mut Map<String, Value>, key: &str, value: Option<&String>) {
    if let Some(value) = value {
        metadata.insert(key.into(), Value::String(value.clone()));
    }
}
