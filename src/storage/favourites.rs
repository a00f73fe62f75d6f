//! Persisted favourites set with cross-context change notification.
//!
//! [`FavouritesStore`] wraps a [`SettingsBackend`] and models the favourites
//! selection as a single store object passed by reference to consumers,
//! never as ambient global state. Toggles are write-through; concurrent
//! writers from other contexts simply overwrite last-write-wins, and each
//! context reconciles through the change-notification channel.
//!
//! Reads soft-fail: absent, malformed, or unreadable persisted data yields
//! the empty set. That failure is never fatal and never surfaced to the user.

use crate::domain::Result;
use crate::storage::backend::SettingsBackend;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Settings key under which the favourites id array is persisted.
pub const FAVOURITES_KEY: &str = "favourites";

type ChangeListener = Box<dyn Fn(&HashSet<String>) + Send>;

/// Observable store of favourite item ids.
pub struct FavouritesStore<B> {
    backend: Mutex<B>,
    listeners: Mutex<Vec<ChangeListener>>,
}

impl<B: SettingsBackend> FavouritesStore<B> {
    /// Creates a store over the given backend.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend: Mutex::new(backend),
            listeners: Mutex::new(Vec::new()),
        }
    }

    fn backend(&self) -> MutexGuard<'_, B> {
        self.backend.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Decodes a persisted raw value, defaulting to empty on any failure.
    fn decode(raw: Option<String>) -> HashSet<String> {
        let Some(raw) = raw else {
            return HashSet::new();
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => ids.into_iter().collect(),
            Err(e) => {
                tracing::debug!(error = %e, "malformed favourites value, defaulting to empty");
                HashSet::new()
            }
        }
    }

    /// Returns the persisted favourites set.
    ///
    /// Never fails: a backend error or malformed value reads as the empty
    /// set (logged at debug level only).
    #[must_use]
    pub fn read(&self) -> HashSet<String> {
        let raw = match self.backend().get(FAVOURITES_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!(error = %e, "favourites read failed, defaulting to empty");
                None
            }
        };
        Self::decode(raw)
    }

    /// Flips membership of `id` and persists the result immediately.
    ///
    /// Returns whether `id` is a favourite after the toggle. The persisted
    /// representation is a sorted JSON array, so identical sets always
    /// serialize identically.
    ///
    /// # Errors
    ///
    /// Returns an error if the write-through fails. The read side of the
    /// toggle soft-fails like [`read`](Self::read).
    pub fn toggle(&self, id: &str) -> Result<bool> {
        let _span = tracing::debug_span!("toggle_favourite", id = %id).entered();

        let mut backend = self.backend();
        let mut ids = Self::decode(backend.get(FAVOURITES_KEY).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "favourites read failed before toggle");
            None
        }));

        let now_favourite = if ids.remove(id) {
            false
        } else {
            ids.insert(id.to_string());
            true
        };

        let mut ordered: Vec<&String> = ids.iter().collect();
        ordered.sort();
        let raw = serde_json::to_string(&ordered)
            .map_err(|e| crate::domain::LocalistError::Storage(e.to_string()))?;
        backend.set(FAVOURITES_KEY, &raw)?;

        tracing::debug!(now_favourite, count = ids.len(), "favourite toggled");
        Ok(now_favourite)
    }

    /// Registers a callback invoked when a write from *another* context is
    /// observed via [`sync_external`](Self::sync_external). Same-context
    /// toggles do not loop back through this channel; the writer already
    /// holds the authoritative value.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&HashSet<String>) + Send + 'static,
    {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(listener));
    }

    /// Polls the backend for foreign writes, firing listeners on a change.
    ///
    /// Returns whether a change was observed. Backend poll failures read as
    /// "no change".
    pub fn sync_external(&self) -> bool {
        let changed = self
            .backend()
            .poll_external(FAVOURITES_KEY)
            .unwrap_or_else(|e| {
                tracing::debug!(error = %e, "favourites poll failed");
                false
            });
        if !changed {
            return false;
        }

        let favourites = self.read();
        let listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for listener in listeners.iter() {
            listener(&favourites);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{FavouritesStore, FAVOURITES_KEY};
    use crate::storage::backend::SettingsBackend;
    use crate::storage::json::JsonSettings;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    fn store_in(dir: &tempfile::TempDir) -> FavouritesStore<JsonSettings> {
        let backend = JsonSettings::new(dir.path().join("settings.json")).unwrap();
        FavouritesStore::new(backend)
    }

    #[test]
    fn read_on_empty_backend_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_in(&dir).read().is_empty());
    }

    #[test]
    fn corrupted_value_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        {
            let mut backend = store.backend.lock().unwrap();
            backend.set(FAVOURITES_KEY, "not a json array").unwrap();
        }
        assert!(store.read().is_empty());
    }

    #[test]
    fn corrupted_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{broken").unwrap();
        let store = FavouritesStore::new(JsonSettings::new(path).unwrap());
        assert!(store.read().is_empty());
    }

    #[test]
    fn toggle_flips_membership_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.toggle("a").unwrap());
        assert!(store.toggle("b").unwrap());
        assert!(!store.toggle("a").unwrap());

        // A second store over the same file sees the write-through result.
        let other = store_in(&dir);
        let expected: HashSet<String> = ["b".to_string()].into_iter().collect();
        assert_eq!(other.read(), expected);
    }

    #[test]
    fn toggle_recovers_from_corrupted_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        {
            let mut backend = store.backend.lock().unwrap();
            backend.set(FAVOURITES_KEY, "garbage").unwrap();
        }
        assert!(store.toggle("a").unwrap());
        assert!(store.read().contains("a"));
    }

    #[test]
    fn external_write_notifies_subscribers() {
        let dir = tempfile::tempdir().unwrap();
        let ours = store_in(&dir);
        let theirs = store_in(&dir);

        // Settle our handle's view of the key before the foreign write.
        ours.read();

        let observed: Arc<Mutex<Vec<HashSet<String>>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&observed);
        ours.subscribe(move |favs| sink.lock().unwrap().push(favs.clone()));

        theirs.toggle("z").unwrap();

        assert!(ours.sync_external());
        let seen = observed.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].contains("z"));
    }

    #[test]
    fn own_toggle_does_not_fire_listeners() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let fired = Arc::new(Mutex::new(0usize));
        let sink = Arc::clone(&fired);
        store.subscribe(move |_| *sink.lock().unwrap() += 1);

        store.toggle("a").unwrap();
        assert!(!store.sync_external());
        assert_eq!(*fired.lock().unwrap(), 0);
    }
}
