//! Core domain types for the Localist engine.
//!
//! This module contains the foundational types used across all layers:
//! the [`Item`] record model and the crate-wide error type.

pub mod error;
pub mod item;

pub use error::{LocalistError, Result};
pub use item::Item;
