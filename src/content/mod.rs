// Cheatsheet content model.
// Sections of reference entries, keyed and ordered the way tabs are shown.

pub mod loader;

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{CheatsheetError, Result};

/// Key of a section in a content table (e.g. "basic", "layout").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionKey(String);

impl SectionKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Identifies one entry: its section and its position in that section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey {
    pub section: SectionKey,
    pub index: usize,
}

impl EntryKey {
    pub fn new(section: SectionKey, index: usize) -> Self {
        Self { section, index }
    }
}

/// Example attached to an entry.
///
/// `preview_markup` is trusted, developer-authored markup. It is rendered
/// as-is and never sanitized, so it must not come from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    pub source_text: String,
    pub preview_markup: String,
}

/// A single tag or property description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub identifier: String,
    pub description: String,
    pub syntax: String,
    /// Accepted value keywords, shown as chips (CSS properties only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    pub example: Example,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub items: Vec<Entry>,
}

/// Immutable, insertion-ordered mapping from section key to section.
#[derive(Debug, Clone)]
pub struct ContentTable {
    sections: Vec<(SectionKey, Section)>,
}

impl ContentTable {
    /// Build a table, rejecting empty tables, empty keys and duplicate keys.
    pub fn new(sections: Vec<(SectionKey, Section)>) -> Result<Self> {
        if sections.is_empty() {
            return Err(CheatsheetError::invalid_content(
                "content table",
                "no sections defined",
            ));
        }
        for (i, (key, _)) in sections.iter().enumerate() {
            if key.as_str().trim().is_empty() {
                return Err(CheatsheetError::invalid_content(
                    "content table",
                    format!("section #{} has an empty key", i + 1),
                ));
            }
            if sections[..i].iter().any(|(other, _)| other == key) {
                return Err(CheatsheetError::invalid_content(
                    "content table",
                    format!("duplicate section key '{}'", key),
                ));
            }
        }
        Ok(Self { sections })
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn contains(&self, key: &SectionKey) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &SectionKey) -> Option<&Section> {
        self.sections
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, section)| section)
    }

    /// Tab position of a key.
    pub fn position(&self, key: &SectionKey) -> Option<usize> {
        self.sections.iter().position(|(k, _)| k == key)
    }

    pub fn key_at(&self, index: usize) -> Option<&SectionKey> {
        self.sections.get(index).map(|(key, _)| key)
    }

    pub fn first_key(&self) -> &SectionKey {
        // Non-empty by construction.
        &self.sections[0].0
    }

    #[cfg(test)]
    pub fn keys(&self) -> impl Iterator<Item = &SectionKey> {
        self.sections.iter().map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SectionKey, &Section)> {
        self.sections.iter().map(|(key, section)| (key, section))
    }

    pub fn entry(&self, key: &EntryKey) -> Option<&Entry> {
        self.get(&key.section)?.items.get(key.index)
    }
}

/// How a page treats an example's preview string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    /// Rendered as live markup.
    Markup,
    /// Shown as literal prose.
    Text,
}

/// The cheatsheet pages that ship with the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Page {
    #[default]
    Html,
    Css,
}

impl Page {
    pub fn name(&self) -> &'static str {
        match self {
            Page::Html => "html",
            Page::Css => "css",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Page::Html => "Beat HTML with our Cheatsheet",
            Page::Css => "Master CSS with our Cheatsheet",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Page::Html => {
                "A comprehensive, interactive guide to HTML elements with live code previews and syntax examples"
            }
            Page::Css => {
                "A comprehensive, interactive guide to CSS properties with live code previews and examples"
            }
        }
    }

    pub fn footer(&self) -> &'static str {
        match self {
            Page::Html => "© 2024 HTML Cheatsheet · Crafted with ♥ for developers by GDGoC",
            Page::Css => "© 2024 CSS Cheatsheet · Built with ♥ for developers",
        }
    }

    /// Section shown when the page opens.
    pub fn default_section(&self) -> SectionKey {
        match self {
            Page::Html => SectionKey::from("basic"),
            Page::Css => SectionKey::from("layout"),
        }
    }

    pub fn preview_kind(&self) -> PreviewKind {
        match self {
            Page::Html => PreviewKind::Markup,
            Page::Css => PreviewKind::Text,
        }
    }

    /// Compiled-in content for this page, in the same JSON schema accepted by `--content`.
    pub fn builtin_json(&self) -> &'static str {
        match self {
            Page::Html => include_str!("data/html.json"),
            Page::Css => include_str!("data/css.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(title: &str) -> Section {
        Section {
            title: title.to_string(),
            items: Vec::new(),
        }
    }

    #[test]
    fn test_table_keeps_insertion_order() {
        let table = ContentTable::new(vec![
            (SectionKey::from("zeta"), section("Zeta")),
            (SectionKey::from("alpha"), section("Alpha")),
        ])
        .unwrap();

        let keys: Vec<&str> = table.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
        assert_eq!(table.position(&SectionKey::from("alpha")), Some(1));
        assert_eq!(table.first_key().as_str(), "zeta");
    }

    #[test]
    fn test_table_rejects_duplicates_and_empty() {
        assert!(ContentTable::new(Vec::new()).is_err());

        let dup = ContentTable::new(vec![
            (SectionKey::from("a"), section("A")),
            (SectionKey::from("a"), section("A again")),
        ]);
        assert!(matches!(
            dup,
            Err(CheatsheetError::InvalidContent { .. })
        ));

        let blank = ContentTable::new(vec![(SectionKey::from("  "), section("Blank"))]);
        assert!(blank.is_err());
    }

    #[test]
    fn test_entry_lookup_by_key() {
        let entry = Entry {
            identifier: "p".to_string(),
            description: "Paragraph".to_string(),
            syntax: "<p> </p>".to_string(),
            values: Vec::new(),
            example: Example {
                source_text: "<p>hi</p>".to_string(),
                preview_markup: "<p>hi</p>".to_string(),
            },
        };
        let table = ContentTable::new(vec![(
            SectionKey::from("text"),
            Section {
                title: "Text".to_string(),
                items: vec![entry.clone()],
            },
        )])
        .unwrap();

        assert_eq!(
            table.entry(&EntryKey::new(SectionKey::from("text"), 0)),
            Some(&entry)
        );
        assert_eq!(table.entry(&EntryKey::new(SectionKey::from("text"), 1)), None);
        assert_eq!(table.entry(&EntryKey::new(SectionKey::from("nope"), 0)), None);
    }

    #[test]
    fn test_page_defaults() {
        assert_eq!(Page::Html.default_section().as_str(), "basic");
        assert_eq!(Page::Css.default_section().as_str(), "layout");
        assert_eq!(Page::Html.preview_kind(), PreviewKind::Markup);
        assert_eq!(Page::Css.preview_kind(), PreviewKind::Text);
    }
}
