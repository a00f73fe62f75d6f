//! Application layer: the list synchronization state machine.
//!
//! This layer owns the cumulative item list, the pagination cursor, the
//! loading state machine, and the pure filtering function. It consumes the
//! [`source`](crate::source) layer for pages and exposes an observable
//! snapshot for presentation.

pub mod controller;
pub mod filter;
pub mod list;
pub mod state;

pub use controller::LoadController;
pub use filter::compute_view;
pub use list::{Cursor, ListStore};
pub use state::{ListSnapshot, LoadPhase};
