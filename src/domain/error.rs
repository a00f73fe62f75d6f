//! Error types for the Localist engine.
//!
//! This module defines the centralized error type [`LocalistError`] and a type
//! alias [`Result`] for convenient error handling throughout the crate. All
//! errors are implemented using the `thiserror` crate for automatic `Error`
//! trait implementation.
//!
//! # Propagation Policy
//!
//! Only [`LocalistError::Network`] reaches the presentation boundary, carried
//! as the error message of a failed load. Favourites parse failures are
//! absorbed inside the storage layer (they default to "no favourites"), and
//! stale-epoch completions are not errors at all; they are dropped without
//! user-visible effect.

use thiserror::Error;

/// The main error type for Localist operations.
///
/// This enum consolidates all error conditions that can occur while
/// synchronizing the list, from data-source transport failures to settings
/// persistence problems. Most variants carry a plain description; I/O errors
/// convert automatically via `#[from]`.
#[derive(Debug, Error)]
pub enum LocalistError {
    /// The remote data source was unreachable or returned a non-success
    /// response.
    ///
    /// On a reset this is fatal to the current view; on a load-more it is
    /// non-destructive and already-loaded items remain visible.
    #[error("Network error: {0}")]
    Network(String),

    /// A settings persistence operation failed.
    ///
    /// Occurs when reading from or writing to the settings backend fails.
    /// The string contains a description of what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically
    /// converts from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when required configuration values are missing or malformed.
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Localist operations.
///
/// This is a type alias for `std::result::Result<T, LocalistError>` that
/// simplifies function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, LocalistError>;
