// Platform path utilities.
// Locates the log directory and the optional per-page content override files.

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::content::Page;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "cheatsheet")
}

/// Get the base cache directory (~/.cache/cheatsheet on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the base config directory (~/.config/cheatsheet on Linux).
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Default directory for log files.
pub fn log_dir() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("logs"))
}

/// Content file that replaces the built-in table for a page when present.
pub fn content_override_path(page: Page) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(content_file_name(page)))
}

fn content_file_name(page: Page) -> String {
    format!("{}.json", page.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_file_name() {
        assert_eq!(content_file_name(Page::Html), "html.json");
        assert_eq!(content_file_name(Page::Css), "css.json");
    }

    #[test]
    fn test_paths_nest_under_project_dirs() {
        // Path construction only; nothing is created on disk.
        if let (Some(cache), Some(logs)) = (cache_dir(), log_dir()) {
            assert!(logs.starts_with(&cache));
            assert!(logs.ends_with("logs"));
        }
        if let Some(path) = content_override_path(Page::Css) {
            assert!(path.ends_with("css.json"));
        }
    }
}
