//! Pure view filtering over the accumulated item list.
//!
//! [`compute_view`] derives the visible list from the cumulative items, the
//! free-text search term, and the favourites selection. It has no hidden
//! state and no side effects, so the visible view is recomputed on every
//! relevant input change rather than patched incrementally: identical inputs
//! always produce an identical output sequence.
//!
//! Filtering is strictly client-side: it only narrows what has already been
//! fetched and never triggers additional fetches, even when the filtered
//! result is sparse and the cursor says more pages exist.

use crate::domain::Item;
use std::collections::HashSet;

/// Computes the filtered view of `items`.
///
/// # Algorithm
///
/// 1. If `favourites_only`, drop every item whose id is not in `favourites`,
///    preserving relative order.
/// 2. If the trimmed `search_term` is empty, return the result of step 1
///    unchanged.
/// 3. Otherwise keep only items where the lower-cased name, category, or
///    description contains the lower-cased term as a substring, or at least
///    one tag does. Order is preserved; there is no ranking.
///
/// The address field is deliberately not searched.
#[must_use]
pub fn compute_view(
    items: &[Item],
    search_term: &str,
    favourites_only: bool,
    favourites: &HashSet<String>,
) -> Vec<Item> {
    let term = search_term.trim().to_lowercase();

    items
        .iter()
        .filter(|item| !favourites_only || favourites.contains(&item.id))
        .filter(|item| term.is_empty() || matches_term(item, &term))
        .cloned()
        .collect()
}

/// Case-insensitive substring match against name, category, description, and
/// tags. Expects `term` to be already trimmed and lower-cased.
fn matches_term(item: &Item, term: &str) -> bool {
    item.name.to_lowercase().contains(term)
        || item.category.to_lowercase().contains(term)
        || item.description.to_lowercase().contains(term)
        || item.tags.iter().any(|tag| tag.to_lowercase().contains(term))
}
