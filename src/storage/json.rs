//! JSON file-based settings backend.
//!
//! This module provides a simple, human-readable settings store using JSON
//! serialization. It uses atomic file writes (write-to-temp + rename) to
//! prevent corruption on crashes, and reads the file fresh on every access so
//! that writes from other contexts become visible without a restart.

use crate::domain::error::{LocalistError, Result};
use crate::storage::backend::SettingsBackend;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// JSON settings container format.
///
/// This is the top-level structure serialized to disk. Wraps all entries in a
/// single object for better JSON structure and future extensibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SettingsData {
    /// Version of the settings format for future migrations.
    version: u32,

    /// Unix timestamp of the most recent write.
    #[serde(default)]
    updated_at: i64,

    /// All stored entries, keyed by setting name.
    #[serde(default)]
    entries: HashMap<String, String>,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            version: 1,
            updated_at: 0,
            entries: HashMap::new(),
        }
    }
}

/// JSON file settings backend.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "updated_at": 1234567890,
///   "entries": {
///     "favourites": "[\"6650f1\",\"6650f2\"]"
///   }
/// }
/// ```
pub struct JsonSettings {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// Last value observed per key by this handle, used to detect writes
    /// from other contexts.
    last_seen: HashMap<String, Option<String>>,
}

impl JsonSettings {
    /// Creates or opens a JSON settings backend.
    ///
    /// Parent directories are created automatically; the file itself is only
    /// created on the first write.
    ///
    /// # Errors
    ///
    /// Returns an error if parent directory creation fails.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON settings");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self {
            file_path,
            last_seen: HashMap::new(),
        })
    }

    /// Loads settings data from disk. A missing file reads as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    fn load(&self) -> Result<SettingsData> {
        if !self.file_path.exists() {
            return Ok(SettingsData::default());
        }
        let contents = std::fs::read_to_string(&self.file_path)?;
        serde_json::from_str(&contents)
            .map_err(|e| LocalistError::Storage(format!("failed to parse settings JSON: {e}")))
    }

    /// Saves settings data to disk using atomic write.
    ///
    /// Writes to a temporary file first, then renames it to the target path,
    /// so the file is never left in a corrupt state even if the process
    /// crashes mid-write.
    fn save(&self, data: &SettingsData) -> Result<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| LocalistError::Storage(format!("failed to serialize settings: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(path = ?self.file_path, "settings saved");
        Ok(())
    }
}

impl SettingsBackend for JsonSettings {
    fn get(&mut self, key: &str) -> Result<Option<String>> {
        let data = self.load()?;
        let value = data.entries.get(key).cloned();
        self.last_seen.insert(key.to_string(), value.clone());
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("settings_set", key = %key).entered();

        // A corrupted file must not block write-through: overwrite it.
        let mut data = self.load().unwrap_or_else(|e| {
            tracing::debug!(error = %e, "unreadable settings file, rewriting");
            SettingsData::default()
        });

        data.entries.insert(key.to_string(), value.to_string());
        data.updated_at = chrono::Utc::now().timestamp();
        self.save(&data)?;

        self.last_seen
            .insert(key.to_string(), Some(value.to_string()));
        Ok(())
    }

    fn poll_external(&mut self, key: &str) -> Result<bool> {
        let data = self.load()?;
        let current = data.entries.get(key).cloned();
        let seen = self.last_seen.get(key).cloned().unwrap_or(None);

        if current == seen {
            return Ok(false);
        }

        tracing::debug!(key = %key, "external settings change detected");
        self.last_seen.insert(key.to_string(), current);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::JsonSettings;
    use crate::storage::backend::SettingsBackend;

    fn settings_in(dir: &tempfile::TempDir) -> JsonSettings {
        JsonSettings::new(dir.path().join("settings.json")).unwrap()
    }

    #[test]
    fn get_on_missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = settings_in(&dir);
        assert_eq!(settings.get("favourites").unwrap(), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = settings_in(&dir);

        settings.set("favourites", "[\"a\"]").unwrap();
        assert_eq!(
            settings.get("favourites").unwrap().as_deref(),
            Some("[\"a\"]")
        );
    }

    #[test]
    fn writes_are_visible_to_other_handles() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = settings_in(&dir);
        let mut reader = settings_in(&dir);

        writer.set("favourites", "[\"a\"]").unwrap();
        assert_eq!(
            reader.get("favourites").unwrap().as_deref(),
            Some("[\"a\"]")
        );
    }

    #[test]
    fn poll_external_detects_foreign_write() {
        let dir = tempfile::tempdir().unwrap();
        let mut first = settings_in(&dir);
        let mut second = settings_in(&dir);

        first.set("favourites", "[\"a\"]").unwrap();
        assert!(!first.poll_external("favourites").unwrap());

        second.set("favourites", "[\"a\",\"b\"]").unwrap();
        assert!(first.poll_external("favourites").unwrap());
        // Change is reported once, then the handle is caught up.
        assert!(!first.poll_external("favourites").unwrap());
    }

    #[test]
    fn own_writes_are_not_reported_as_external() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = settings_in(&dir);
        settings.set("favourites", "[\"a\"]").unwrap();
        assert!(!settings.poll_external("favourites").unwrap());
    }

    #[test]
    fn malformed_file_errors_on_get_but_not_on_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        let mut settings = JsonSettings::new(path).unwrap();
        assert!(settings.get("favourites").is_err());

        // Write-through replaces the corrupted file.
        settings.set("favourites", "[]").unwrap();
        assert_eq!(settings.get("favourites").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn no_stray_temp_file_after_write() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = settings_in(&dir);
        settings.set("favourites", "[]").unwrap();
        assert!(!dir.path().join("settings.tmp").exists());
    }
}
