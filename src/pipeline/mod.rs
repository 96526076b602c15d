//! Pipeline entry point for the inventory watcher.
//!
//! - `InventoryNotifier`: diff fetched results against the snapshot and
//!   alert on new listings

mod notify;

pub use notify::{InventoryNotifier, PassOutcome};
