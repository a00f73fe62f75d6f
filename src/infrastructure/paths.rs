//! Filesystem path utilities.
//!
//! This module resolves the default data directory used for the persisted
//! favourites file and handles tilde expansion for user-supplied paths.

use std::path::{Path, PathBuf};

/// Returns the data directory for Localist storage.
///
/// Resolution order: `$XDG_DATA_HOME/localist`, then
/// `$HOME/.local/share/localist`, then `./.localist` as a last resort when
/// no home directory can be determined.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        if !xdg.is_empty() {
            return PathBuf::from(xdg).join("localist");
        }
    }
    if let Ok(home) = std::env::var("HOME") {
        if !home.is_empty() {
            return PathBuf::from(home).join(".local/share/localist");
        }
    }
    PathBuf::from(".localist")
}

/// Expands a leading tilde to the user's home directory.
///
/// Paths without a tilde prefix are returned unchanged, as are tilde paths
/// when `$HOME` is unset.
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    let Ok(home) = std::env::var("HOME") else {
        return path.to_string();
    };
    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

/// Returns the settings file path inside a data directory.
#[must_use]
pub fn settings_file(data_dir: &Path) -> PathBuf {
    data_dir.join("settings.json")
}

#[cfg(test)]
mod tests {
    use super::{expand_tilde, settings_file};
    use std::path::Path;

    #[test]
    fn tilde_expansion() {
        std::env::set_var("HOME", "/home/tester");
        assert_eq!(expand_tilde("~/data"), "/home/tester/data");
        assert_eq!(expand_tilde("~"), "/home/tester");
        assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
        assert_eq!(expand_tilde("relative/path"), "relative/path");
    }

    #[test]
    fn settings_file_is_inside_data_dir() {
        let path = settings_file(Path::new("/tmp/localist"));
        assert_eq!(path, Path::new("/tmp/localist/settings.json"));
    }
}
