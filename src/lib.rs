//! Localist: an incremental list synchronization engine.
//!
//! Localist lists records fetched page by page from a remote collection,
//! lets a consumer filter them by free-text search and by a persisted
//! favourites selection, and tolerates slow, failing, or out-of-order
//! network responses without corrupting the displayed list.
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Presentation (main.rs demo CLI)                    │  ← Thin glue
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - LoadController: epoch-tagged reset / load-more   │
//! │  - ListStore: cumulative list + cursor              │
//! │  - compute_view: pure filtering                     │
//! └─────────────────────────────────────────────────────┘
//!         │                              │
//! ┌───────────────────┐       ┌───────────────────┐
//! │ Source Layer      │       │ Storage Layer     │
//! │ (source/)         │       │ (storage/)        │
//! │ - DataSource seam │       │ - SettingsBackend │
//! │ - HTTP fetcher    │       │ - JSON file I/O   │
//! │ - PageCache       │       │ - FavouritesStore │
//! └───────────────────┘       └───────────────────┘
//!         │                              │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Item model (domain/item)                         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Loading state machine, cumulative list, pure filtering
//! - [`domain`]: Core domain types (Item, errors)
//! - [`source`]: Remote collection seam, HTTP fetcher, page cache
//! - [`storage`]: Persisted favourites with change notification
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`observability`]: Tracing subscriber setup
//!
//! # Loading Flow
//!
//! 1. `LoadController::reset()` bumps the epoch, clears the page cache,
//!    empties the list, and fetches page 0.
//! 2. `LoadController::load_more()` fetches the next page at the cursor.
//! 3. Completions tagged with a superseded epoch are discarded silently, so
//!    the most recent reset always wins over earlier, still-pending fetches.
//! 4. Presentation derives the visible list from the latest snapshot with
//!    [`compute_view`] whenever items, the search term, or favourites change.
//!
//! # Example
//!
//! ```rust
//! use localist::{compute_view, Item};
//! use std::collections::HashSet;
//!
//! let items = vec![
//!     Item::new("1", "Coffee Shop", "Restaurant", "109 Tech Ave", "Coffee all day."),
//!     Item::new("2", "Central Park", "Park", "5 Blossom Path", "Green space."),
//! ];
//!
//! let view = compute_view(&items, "coffee", false, &HashSet::new());
//! assert_eq!(view.len(), 1);
//! assert_eq!(view[0].name, "Coffee Shop");
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod source;
pub mod storage;

pub mod observability;

pub use app::{compute_view, Cursor, ListSnapshot, ListStore, LoadController, LoadPhase};
pub use domain::{Item, LocalistError, Result};
pub use source::{DataSource, HttpDataSource, PageCache};
pub use storage::{FavouritesStore, JsonSettings, SettingsBackend};

use serde::Deserialize;

/// Default collection endpoint, matching the reference backend's route.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api/local-items";

/// Default page size requested from the collection endpoint.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Engine configuration.
///
/// Loaded from a TOML file; every field has a default, so an empty file (or
/// no file at all) yields a working configuration.
///
/// # Example
///
/// ```toml
/// # ~/.config/localist/config.toml
/// api_base_url = "http://localhost:5000/api/local-items"
/// page_size = 10
/// data_dir = "~/.local/share/localist"
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Full URL of the collection resource; `limit` and `skip` query
    /// parameters are appended per request.
    pub api_base_url: String,

    /// Number of items requested per page. Must be positive.
    pub page_size: usize,

    /// Directory holding the persisted settings file. Tilde paths are
    /// expanded; defaults to the platform data directory.
    pub data_dir: Option<String>,

    /// Tracing level used when `RUST_LOG` is unset.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            data_dir: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`LocalistError::Config`] on invalid TOML or a zero
    /// `page_size`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use localist::Config;
    ///
    /// let config = Config::from_toml_str("page_size = 25").unwrap();
    /// assert_eq!(config.page_size, 25);
    /// assert_eq!(config.api_base_url, localist::DEFAULT_API_BASE_URL);
    /// ```
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)
            .map_err(|e| LocalistError::Config(format!("invalid config: {e}")))?;
        if config.page_size == 0 {
            return Err(LocalistError::Config(
                "page_size must be positive".to_string(),
            ));
        }
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Resolves the data directory, applying tilde expansion and defaults.
    #[must_use]
    pub fn resolved_data_dir(&self) -> std::path::PathBuf {
        self.data_dir.as_ref().map_or_else(
            infrastructure::default_data_dir,
            |dir| std::path::PathBuf::from(infrastructure::expand_tilde(dir)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, DEFAULT_API_BASE_URL, DEFAULT_PAGE_SIZE};

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.data_dir.is_none());
        assert!(config.trace_level.is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_toml_str(
            "api_base_url = \"http://example.test/items\"\npage_size = 5\ntrace_level = \"debug\"",
        )
        .unwrap();
        assert_eq!(config.api_base_url, "http://example.test/items");
        assert_eq!(config.page_size, 5);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(Config::from_toml_str("page_size = 0").is_err());
    }

    #[test]
    fn invalid_toml_is_rejected() {
        assert!(Config::from_toml_str("page_size = ").is_err());
    }
}
