//! Data source abstraction.
//!
//! The [`DataSource`] trait is the seam between the engine and whatever
//! actually serves the collection. The engine only ever asks for one
//! contiguous page at a time; retry, timeout, and transport policy all live
//! behind this trait.

use crate::domain::{Item, Result};
use async_trait::async_trait;

/// Abstraction over the remote collection.
///
/// # Implementations
///
/// - [`HttpDataSource`](crate::source::HttpDataSource): fetches pages from
///   the collection endpoint over HTTP (default)
///
/// Tests substitute scripted in-process implementations.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetches one page of `limit` items starting at `offset`.
    ///
    /// A response shorter than `limit` signals that the collection is
    /// exhausted past `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`LocalistError::Network`](crate::domain::LocalistError::Network)
    /// on transport or server failure.
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<Vec<Item>>;
}
