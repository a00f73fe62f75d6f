//! Cumulative list store and pagination cursor.
//!
//! [`ListStore`] owns the ordered list of items accumulated over one loading
//! epoch together with the [`Cursor`] tracking how much of the remote
//! collection has been pulled. It is a passive container: the
//! [`LoadController`](crate::app::LoadController) owns the only handle and
//! serializes every mutation, so no operation here ever runs concurrently
//! with another on the same instance.

use crate::domain::Item;

/// Pagination position within the remote collection.
///
/// `skip` is the offset of the next page to request and always equals the
/// number of items accumulated so far. `has_more` is true iff the most
/// recently appended page was full; a short page signals exhaustion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Offset of the next page to request.
    pub skip: usize,

    /// Whether the collection may have more items past `skip`.
    pub has_more: bool,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            skip: 0,
            has_more: true,
        }
    }
}

/// Append-only store of the items fetched so far in the current epoch.
#[derive(Debug, Default)]
pub struct ListStore {
    items: Vec<Item>,
    cursor: Cursor,
}

impl ListStore {
    /// Creates an empty store with the initial cursor `{skip: 0, has_more: true}`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties the list and rewinds the cursor to the start of the collection.
    pub fn reset(&mut self) {
        self.items.clear();
        self.cursor = Cursor::default();
    }

    /// Appends one fetched page, preserving order.
    ///
    /// Advances `skip` by the page length and derives `has_more` from whether
    /// the page was full relative to `page_size`.
    pub fn append(&mut self, page: Vec<Item>, page_size: usize) {
        self.cursor.skip += page.len();
        self.cursor.has_more = page.len() == page_size;
        self.items.extend(page);

        tracing::debug!(
            total = self.items.len(),
            skip = self.cursor.skip,
            has_more = self.cursor.has_more,
            "page appended"
        );
    }

    /// Returns the current pagination cursor.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Returns the accumulated items in fetch order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }
}
