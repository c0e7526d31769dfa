//! Gallery settings, stored as `settings.toml` in the user's config
//! directory.
//!
//! ```no_run
//! use photo_gallery::config::{self, GalleryConfig};
//!
//! let config = config::load();
//! assert!(config.page_size >= 1);
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const CONFIG_FILE: &str = "settings.toml";
const APP_DIR: &str = "photo-gallery";

/// Photos per page in the grid
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// What happens to the current page when the search query changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryPagePolicy {
    /// Keep the page unless it no longer exists, then go back to page 1
    #[default]
    ResetOnOverflow,
    /// Go back to page 1 on every query change
    AlwaysReset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub page_size: usize,
    pub query_policy: QueryPagePolicy,
    /// Jump to the last page when a local upload lands past the current one
    pub jump_to_new_item: bool,
    /// Catalog location; `None` means the user data directory
    pub database_path: Option<PathBuf>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            query_policy: QueryPagePolicy::default(),
            jump_to_new_item: true,
            database_path: None,
        }
    }
}

impl GalleryConfig {
    /// Page size with the zero case ruled out
    pub fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_DIR);
        path.push(CONFIG_FILE);
        path
    })
}

/// Load settings from the default location.
///
/// Missing or unreadable settings fall back to defaults.
pub fn load() -> GalleryConfig {
    let Some(path) = get_default_config_path() else {
        return GalleryConfig::default();
    };
    if !path.exists() {
        debug!("No settings at {}, using defaults", path.display());
        return GalleryConfig::default();
    }
    load_from_path(&path).unwrap_or_else(|e| {
        warn!("⚠️  Ignoring settings at {}: {}", path.display(), e);
        GalleryConfig::default()
    })
}

pub fn load_from_path(path: &Path) -> Result<GalleryConfig> {
    let content = fs::read_to_string(path)?;
    let mut config: GalleryConfig = toml::from_str(&content)?;
    config.page_size = config.effective_page_size();
    Ok(config)
}

pub fn save_to_path(config: &GalleryConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load_round_trip_preserves_policy() {
        let config = GalleryConfig {
            page_size: 12,
            query_policy: QueryPagePolicy::AlwaysReset,
            jump_to_new_item: false,
            database_path: Some(PathBuf::from("/tmp/gallery.db")),
        };
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("nested").join(CONFIG_FILE);

        save_to_path(&config, &path).expect("failed to save config");
        let loaded = load_from_path(&path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "page_size = 4\n").unwrap();

        let loaded = load_from_path(&path).unwrap();
        assert_eq!(loaded.page_size, 4);
        assert_eq!(loaded.query_policy, QueryPagePolicy::ResetOnOverflow);
        assert!(loaded.jump_to_new_item);
        assert!(loaded.database_path.is_none());
    }

    #[test]
    fn test_zero_page_size_is_raised_to_one() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "page_size = 0\n").unwrap();

        assert_eq!(load_from_path(&path).unwrap().page_size, 1);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "page_size = [not toml").unwrap();

        assert!(load_from_path(&path).is_err());
    }
}
