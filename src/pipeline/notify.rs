//! Diff-and-notify engine.
//!
//! Compares each fetched listing against the persisted snapshot by its
//! identity hash, batches descriptions of unseen listings into a single
//! alert, then replaces the snapshot wholesale. A malformed result set never
//! kills the run: the offending input is saved to the error record and the
//! snapshot is reset to empty so the next pass starts clean.

use crate::error::Result;
use crate::models::{InventoryResults, Vehicle};
use crate::notify::AlertPublisher;
use crate::storage::SnapshotStore;

/// Prefix line for every batched alert.
const ALERT_PREFIX: &str = "New vehicles listed:";

/// Separator between listing descriptions within one alert.
const DESCRIPTION_SEPARATOR: &str = "\n---\n";

/// Summary of one processing pass.
#[derive(Debug, Clone, Default)]
pub struct PassOutcome {
    /// Listings not present in the previous snapshot
    pub new_listings: usize,
    /// Whether the pass took the error-record-and-reset path
    pub recovered: bool,
}

/// Engine that diffs result sets against the snapshot and dispatches alerts.
///
/// One instance per invocation; it owns the snapshot locations and the
/// pending message pool for the duration of a pass.
pub struct InventoryNotifier<P> {
    store: SnapshotStore,
    publisher: P,
    cache: InventoryResults,
    pending: Vec<String>,
}

impl<P: AlertPublisher> InventoryNotifier<P> {
    /// Create an engine, loading the previous snapshot from the store.
    ///
    /// A missing or unreadable snapshot degrades to the empty one so a
    /// corrupt file cannot wedge every future run.
    pub async fn new(store: SnapshotStore, publisher: P) -> Self {
        let cache = match store.load_snapshot().await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                log::warn!("Snapshot file does not exist");
                InventoryResults::default()
            }
            Err(e) => {
                log::warn!("Snapshot unreadable ({e}), starting from empty");
                InventoryResults::default()
            }
        };

        Self {
            store,
            publisher,
            cache,
            pending: Vec::new(),
        }
    }

    /// Process one fetched result set: diff, alert, persist.
    ///
    /// Malformed listings and dispatch failures are contained here; only a
    /// failure to write the primary snapshot escapes to the caller.
    pub async fn process_results(&mut self, results: InventoryResults) -> Result<PassOutcome> {
        match self.scan_and_dispatch(&results).await {
            Ok(new_listings) => {
                self.store.write_snapshot(&results).await?;
                self.cache = results;

                match self.store.clear_error_record().await {
                    Ok(true) => log::info!("Cleared error record from previous failed pass"),
                    Ok(false) => {}
                    Err(e) => log::warn!("Failed to clear error record: {e}"),
                }

                Ok(PassOutcome {
                    new_listings,
                    recovered: false,
                })
            }
            Err(e) => {
                log::error!("Error processing results: {e}");
                self.pending.clear();

                if let Err(e) = self.store.write_error_record(&results).await {
                    log::error!("Failed to write error record: {e}");
                }

                self.store
                    .write_snapshot(&InventoryResults::default())
                    .await?;
                self.cache = InventoryResults::default();

                Ok(PassOutcome {
                    new_listings: 0,
                    recovered: true,
                })
            }
        }
    }

    /// Diff the result set against the cache and dispatch one batched alert.
    async fn scan_and_dispatch(&mut self, results: &InventoryResults) -> Result<usize> {
        if results.total_matches_found == 0 {
            log::info!("No vehicles listed, skipping diff");
            return Ok(0);
        }

        for vehicle in &results.results {
            if !self.is_cached(vehicle)? {
                let description = vehicle.description()?;
                log::info!("{description}");
                self.pending.push(description);
            }
        }

        let new_listings = self.pending.len();
        self.dispatch().await?;
        Ok(new_listings)
    }

    /// Whether a listing with the same identity hash is already in the snapshot.
    ///
    /// Linear scan by exact string equality; snapshots are page-sized.
    fn is_cached(&self, vehicle: &Vehicle) -> Result<bool> {
        let identity = vehicle.identity()?;
        Ok(self
            .cache
            .results
            .iter()
            .any(|cached| cached.hash.as_deref() == Some(identity)))
    }

    /// Send one alert covering all pending descriptions, then clear the pool.
    ///
    /// Does nothing when no new listings were found.
    async fn dispatch(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let payload = format!(
            "{ALERT_PREFIX}\n\n{}",
            self.pending.join(DESCRIPTION_SEPARATOR)
        );

        log::debug!("Dispatching alert for {} new listings", self.pending.len());
        self.publisher.publish(&payload).await?;

        self.pending.clear();
        Ok(())
    }
}
