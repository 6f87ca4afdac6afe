//! Browser configuration loaded from a TOML file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::filter::FilterMode;
use crate::group::Grouping;
use crate::sort::Sorting;
use crate::state::RESULTS_PER_PAGE;

/// Top-level configuration.
///
/// All fields have defaults so a browser works without a config file.
/// Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
            _ => CoreError::Io(e),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// [`CoreError::ConfigParse`] if the TOML is malformed or a value is unknown.
    pub fn from_toml_str(content: &str) -> CoreResult<Self> {
        toml::from_str(content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }
}

/// How the tree is built and presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default)]
    pub grouping: Grouping,
    #[serde(default)]
    pub sorting: Sorting,
    #[serde(default)]
    pub filter_mode: FilterMode,
    #[serde(default = "default_results_per_page")]
    pub results_per_page: usize,
    /// List matching folders as rows while a filter is active.
    #[serde(default)]
    pub show_folders_on_filter: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            grouping: Grouping::default(),
            sorting: Sorting::default(),
            filter_mode: FilterMode::default(),
            results_per_page: default_results_per_page(),
            show_folders_on_filter: false,
        }
    }
}

fn default_results_per_page() -> usize {
    RESULTS_PER_PAGE
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_config_browser() {
        let config = Config::default();

        assert_eq!(config.browser.grouping, Grouping::Folder);
        assert_eq!(config.browser.sorting, Sorting::Name);
        assert_eq!(config.browser.filter_mode, FilterMode::Terms);
        assert_eq!(config.browser.results_per_page, 20);
        assert!(!config.browser.show_folders_on_filter);
    }

    #[test]
    fn load_full_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[browser]
grouping = "modified"
sorting = "modified"
filter_mode = "fuzzy"
results_per_page = 50
show_folders_on_filter = true
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.browser.grouping, Grouping::Modified);
        assert_eq!(config.browser.sorting, Sorting::Modified);
        assert_eq!(config.browser.filter_mode, FilterMode::Fuzzy);
        assert_eq!(config.browser.results_per_page, 50);
        assert!(config.browser.show_folders_on_filter);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let config = Config::from_toml_str("[browser]\nsorting = \"modified\"\n").unwrap();

        assert_eq!(config.browser.sorting, Sorting::Modified);
        assert_eq!(config.browser.grouping, Grouping::Folder);
        assert_eq!(config.browser.results_per_page, 20);
    }

    #[test]
    fn grouping_accepts_by_prefixed_alias() {
        let config = Config::from_toml_str("[browser]\ngrouping = \"by_modified\"\n").unwrap();
        assert_eq!(config.browser.grouping, Grouping::Modified);
    }

    #[test]
    fn empty_toml_uses_all_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn load_nonexistent_returns_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = Config::load(&tmp.path().join("nonexistent.toml"));
        assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
    }

    #[test]
    fn load_invalid_toml_returns_config_parse() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "this is not valid [[[toml").unwrap();

        let result = Config::load(&path);
        assert!(matches!(result.unwrap_err(), CoreError::ConfigParse(_)));
    }

    #[test]
    fn unknown_sorting_is_a_parse_error() {
        let result = Config::from_toml_str("[browser]\nsorting = \"size\"\n");
        assert!(matches!(result.unwrap_err(), CoreError::ConfigParse(_)));
    }
}
