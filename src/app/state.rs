//! Loading state machine types and the observable snapshot.
//!
//! [`LoadPhase`] is the explicit tagged variant behind the engine's loading
//! state machine. Illegal combinations (such as a load-more in progress with
//! nothing loaded) are unrepresentable because the phase, the item list, and
//! the cursor only ever change together under the
//! [`LoadController`](crate::app::LoadController)'s lock.
//!
//! # State Machine
//!
//! ```text
//! Idle ──reset──▶ Loading ──ok──▶ Ready ◀──ok── LoadingMore
//!                    │                │              ▲
//!                   err              load_more───────┘
//!                    ▼                               │
//!                  Error ◀──────────err──────────────┘
//! ```
//!
//! `reset()` is accepted from any state and returns to `Loading`. There is no
//! terminal state; the controller is reusable across resets for the lifetime
//! of the view.

use crate::app::list::Cursor;
use crate::domain::Item;

/// Phase of the loading state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    /// Nothing has been requested yet.
    Idle,

    /// The initial page of a fresh epoch is being fetched.
    Loading,

    /// A further page is being fetched while already-loaded items remain
    /// visible.
    LoadingMore,

    /// The last fetch settled successfully.
    Ready,

    /// The last fetch failed.
    ///
    /// After a failed reset the item list is empty; after a failed load-more
    /// the accumulated items are preserved and the message is presented as a
    /// transient banner.
    Error {
        /// Human-readable failure description.
        message: String,
    },
}

impl LoadPhase {
    /// Returns the error message if the phase is [`LoadPhase::Error`].
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }

    /// Returns true while a fetch is pending.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Loading | Self::LoadingMore)
    }
}

/// Observable state exposed to presentation.
///
/// A snapshot is immutable and self-consistent: `items`, `has_more`, and
/// `phase` were all read under one lock. The filtered view is derived from a
/// snapshot via [`compute_view`](crate::app::filter::compute_view) and is
/// never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSnapshot {
    /// Current phase of the state machine.
    pub phase: LoadPhase,

    /// Cumulative items accumulated in the current epoch, in fetch order.
    pub items: Vec<Item>,

    /// Pagination cursor at snapshot time.
    pub cursor: Cursor,
}

impl ListSnapshot {
    /// Creates the initial snapshot published before any fetch.
    #[must_use]
    pub fn initial() -> Self {
        Self {
            phase: LoadPhase::Idle,
            items: Vec::new(),
            cursor: Cursor::default(),
        }
    }

    /// Returns the error message carried by a failed load, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.phase.error()
    }

    /// Whether more of the collection can still be pulled.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.cursor.has_more
    }
}
