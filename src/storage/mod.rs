//! Snapshot persistence for the diff pipeline.
//!
//! Two durable locations, both owned exclusively by the engine:
//!
//! ```text
//! {path}          # last successfully processed result set
//! {path}.err      # raw input of the most recent failed pass, kept until
//!                 # a later clean pass clears it
//! ```
//!
//! Writes go to a temporary sibling and are renamed into place so a crash
//! mid-write cannot leave a half-written snapshot for the next run.

mod local;

pub use local::SnapshotStore;
