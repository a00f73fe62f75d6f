//! Persistence layer for favourites.
//!
//! The [`SettingsBackend`] trait abstracts the persisted key-value store;
//! [`JsonSettings`] is the JSON-file implementation with atomic writes, and
//! [`FavouritesStore`] layers set semantics and change notification on top.

pub mod backend;
pub mod favourites;
pub mod json;

pub use backend::SettingsBackend;
pub use favourites::{FavouritesStore, FAVOURITES_KEY};
pub use json::JsonSettings;
