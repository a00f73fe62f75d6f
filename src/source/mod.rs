//! Remote data source layer.
//!
//! Defines the [`DataSource`] seam to the remote collection, the default
//! HTTP implementation, and the session-scoped [`PageCache`] that memoizes
//! fetched pages in front of it.

pub mod backend;
pub mod cache;
pub mod http;

pub use backend::DataSource;
pub use cache::PageCache;
pub use http::HttpDataSource;
