//! Service layer for the inventory watcher.
//!
//! - Inventory fetching (`InventoryClient`)

mod inventory;

pub use inventory::{API_URL, InventoryClient};
