//! Settings backend abstraction.
//!
//! This module defines the [`SettingsBackend`] trait that abstracts over the
//! persistent key-value store holding favourites. The trait is minimal and
//! mapped directly to the operations the favourites store needs; it is not a
//! generic database layer.

use crate::domain::Result;

/// Abstraction over a persisted string key-value store.
///
/// The store is a single authoritative value per key with last-write-wins
/// semantics; other browsing contexts may overwrite it at any time. A handle
/// detects such foreign writes through [`poll_external`](Self::poll_external)
/// rather than locking.
///
/// # Implementations
///
/// - [`JsonSettings`](crate::storage::JsonSettings): versioned JSON file with
///   atomic writes (default)
pub trait SettingsBackend: Send {
    /// Reads the persisted value for `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be read or decoded.
    fn get(&mut self, key: &str) -> Result<Option<String>>;

    /// Persists `value` under `key` immediately (write-through, no batching).
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Checks whether another context changed the value under `key` since
    /// this handle last read or wrote it. Returns true on a detected change.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be read.
    fn poll_external(&mut self, key: &str) -> Result<bool>;
}
