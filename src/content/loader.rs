// Content table loading.
// Parses the JSON section list used for both compiled-in and user-supplied content.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{ContentTable, Entry, Page, Section, SectionKey};
use crate::error::{CheatsheetError, Result};
use crate::paths;

/// A section as it appears on disk. Items stay untyped so that one bad
/// entry can be skipped without rejecting the whole section.
#[derive(Debug, Deserialize)]
struct RawSection {
    key: String,
    title: String,
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

/// An entry that was dropped while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub section: SectionKey,
    /// Position of the entry in the source file (0-indexed).
    pub position: usize,
    pub reason: String,
}

/// Result of loading a content table.
#[derive(Debug)]
pub struct LoadReport {
    pub table: ContentTable,
    pub skipped: Vec<SkippedEntry>,
}

/// Parse a content table from JSON.
///
/// The document must be an array of sections with unique keys and must
/// include the page's default section. Entries missing required fields
/// (or with an empty identifier) are skipped and reported.
pub fn parse_table(json: &str, page: Page, origin: &str) -> Result<LoadReport> {
    let raw: Vec<RawSection> = serde_json::from_str(json)?;

    let mut skipped = Vec::new();
    let mut sections = Vec::with_capacity(raw.len());

    for raw_section in raw {
        let key = SectionKey::new(raw_section.key);
        let mut items = Vec::with_capacity(raw_section.items.len());

        for (position, value) in raw_section.items.into_iter().enumerate() {
            match parse_entry(value) {
                Ok(entry) => items.push(entry),
                Err(reason) => {
                    warn!(origin, section = %key, position, %reason, "skipping malformed entry");
                    skipped.push(SkippedEntry {
                        section: key.clone(),
                        position,
                        reason,
                    });
                }
            }
        }

        sections.push((
            key,
            Section {
                title: raw_section.title,
                items,
            },
        ));
    }

    let table = ContentTable::new(sections).map_err(|e| match e {
        CheatsheetError::InvalidContent { reason, .. } => {
            CheatsheetError::invalid_content(origin, reason)
        }
        other => other,
    })?;

    let default_key = page.default_section();
    if !table.contains(&default_key) {
        return Err(CheatsheetError::invalid_content(
            origin,
            format!("missing default section '{}'", default_key),
        ));
    }

    debug!(origin, sections = table.len(), skipped = skipped.len(), "parsed content table");
    Ok(LoadReport { table, skipped })
}

fn parse_entry(value: serde_json::Value) -> std::result::Result<Entry, String> {
    let entry: Entry = serde_json::from_value(value).map_err(|e| e.to_string())?;
    if entry.identifier.trim().is_empty() {
        return Err("empty identifier".to_string());
    }
    Ok(entry)
}

/// Load a content table from a JSON file.
pub fn load_table(path: &Path, page: Page) -> Result<LoadReport> {
    let contents = fs::read_to_string(path)?;
    parse_table(&contents, page, &path.display().to_string())
}

/// Compiled-in content for a page.
pub fn builtin_table(page: Page) -> Result<LoadReport> {
    parse_table(page.builtin_json(), page, &format!("built-in {} content", page.name()))
}

/// Pick the content for a page: an explicit file, then the per-user
/// override file if it exists, then the compiled-in table.
pub fn resolve_table(page: Page, explicit: Option<&Path>) -> Result<LoadReport> {
    if let Some(path) = explicit {
        info!(path = %path.display(), "loading content from file");
        return load_table(path, page);
    }

    if let Some(path) = paths::content_override_path(page) {
        if path.exists() {
            info!(path = %path.display(), "loading content override");
            return load_table(&path, page);
        }
    }

    builtin_table(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"[
        {
            "key": "basic",
            "title": "Basic Structure",
            "items": [
                {
                    "identifier": "html",
                    "description": "Root element",
                    "syntax": "<html> </html>",
                    "example": { "sourceText": "<html></html>", "previewMarkup": "<h1>Hi</h1>" }
                }
            ]
        }
    ]"#;

    #[test]
    fn test_builtin_tables_parse_cleanly() {
        for page in [Page::Html, Page::Css] {
            let report = builtin_table(page).unwrap();
            assert!(report.skipped.is_empty(), "{:?}", report.skipped);
            assert!(report.table.contains(&page.default_section()));
        }
    }

    #[test]
    fn test_builtin_html_section_order() {
        let report = builtin_table(Page::Html).unwrap();
        let keys: Vec<&str> = report.table.keys().map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "basic",
                "text",
                "links",
                "lists",
                "forms",
                "media",
                "semantic",
                "advanced",
                "accessibility"
            ]
        );
    }

    #[test]
    fn test_builtin_css_entries_carry_values() {
        let report = builtin_table(Page::Css).unwrap();
        let layout = report.table.get(&SectionKey::from("layout")).unwrap();
        assert_eq!(layout.items[0].identifier, "display");
        assert_eq!(
            layout.items[0].values,
            vec!["block", "inline", "flex", "grid", "none"]
        );
    }

    #[test]
    fn test_parse_minimal() {
        let report = parse_table(MINIMAL, Page::Html, "test").unwrap();
        let section = report.table.get(&SectionKey::from("basic")).unwrap();
        assert_eq!(section.title, "Basic Structure");
        assert_eq!(section.items.len(), 1);
        assert!(section.items[0].values.is_empty());
        assert_eq!(section.items[0].example.preview_markup, "<h1>Hi</h1>");
    }

    #[test]
    fn test_malformed_entry_is_skipped() {
        let json = r#"[
            {
                "key": "basic",
                "title": "Basic",
                "items": [
                    { "identifier": "broken", "description": "no syntax or example" },
                    {
                        "identifier": "p",
                        "description": "Paragraph",
                        "syntax": "<p> </p>",
                        "example": { "sourceText": "<p>x</p>", "previewMarkup": "<p>x</p>" }
                    },
                    {
                        "identifier": "  ",
                        "description": "blank",
                        "syntax": "",
                        "example": { "sourceText": "", "previewMarkup": "" }
                    }
                ]
            }
        ]"#;

        let report = parse_table(json, Page::Html, "test").unwrap();
        let section = report.table.get(&SectionKey::from("basic")).unwrap();
        assert_eq!(section.items.len(), 1);
        assert_eq!(section.items[0].identifier, "p");

        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].position, 0);
        assert_eq!(report.skipped[1].position, 2);
        assert_eq!(report.skipped[1].reason, "empty identifier");
    }

    #[test]
    fn test_missing_default_section_fails() {
        let json = r#"[{ "key": "other", "title": "Other", "items": [] }]"#;
        let err = parse_table(json, Page::Html, "test").unwrap_err();
        assert!(err.to_string().contains("missing default section 'basic'"));
    }

    #[test]
    fn test_duplicate_keys_fail_with_origin() {
        let json = r#"[
            { "key": "layout", "title": "A", "items": [] },
            { "key": "layout", "title": "B", "items": [] }
        ]"#;
        let err = parse_table(json, Page::Css, "dup.json").unwrap_err();
        assert!(err.to_string().contains("dup.json"));
        assert!(err.to_string().contains("duplicate section key"));
    }

    #[test]
    fn test_not_an_array_fails() {
        let err = parse_table(r#"{"key": "basic"}"#, Page::Html, "test").unwrap_err();
        assert!(matches!(err, CheatsheetError::Json(_)));
    }

    #[test]
    fn test_load_table_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("html.json");
        fs::write(&path, MINIMAL).unwrap();

        let report = load_table(&path, Page::Html).unwrap();
        assert_eq!(report.table.len(), 1);

        let report = resolve_table(Page::Html, Some(&path)).unwrap();
        assert_eq!(report.table.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");
        assert!(matches!(
            load_table(&path, Page::Html),
            Err(CheatsheetError::Io(_))
        ));
    }
}
