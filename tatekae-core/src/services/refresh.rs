//! Session refresh - reconcile memory with persisted state on demand
//!
//! Covers the "another tab wrote to the same store" situation without any
//! real cross-session signalling: the user presses refresh, the persisted
//! state wins wholesale, and quick-entry detection runs once more in case new
//! launch parameters arrived.

use std::time::Duration;

use crate::domain::result::Result;
use crate::domain::Transaction;
use crate::services::classify::CategoryGateway;
use crate::services::ledger::TransactionStore;
use crate::services::quick_entry::{EntrySurface, QuickEntryIngestor};

/// Advisory duration for the transient "refreshing" indicator
///
/// The core only reports the bound; showing and timing the spinner is the
/// presentation layer's business.
pub const REFRESH_FEEDBACK: Duration = Duration::from_millis(800);

/// Outcome of a user-triggered refresh
#[derive(Debug)]
pub struct RefreshOutcome {
    /// Size of the collection after reloading
    pub transactions: usize,
    /// Transaction ingested by the re-run quick-entry detection, if any
    pub ingested: Option<Transaction>,
    /// How long the presentation layer should show the refreshing state
    pub feedback: Duration,
}

/// Orchestrates the reload + re-detect cycle
pub struct RefreshController {
    ingestor: QuickEntryIngestor,
}

impl RefreshController {
    pub fn new(gateway: CategoryGateway) -> Self {
        Self {
            ingestor: QuickEntryIngestor::new(gateway),
        }
    }

    /// Reload the ledger from the backend, then re-run quick-entry detection
    ///
    /// The in-memory snapshot is discarded unconditionally; the persisted
    /// state is the last writer and wins without a merge. The feedback signal
    /// is returned regardless of whether anything changed.
    pub async fn refresh(
        &self,
        store: &mut TransactionStore,
        surface: &mut EntrySurface,
    ) -> Result<RefreshOutcome> {
        store.reload();
        let ingested = self.ingestor.ingest(store, surface).await?;

        Ok(RefreshOutcome {
            transactions: store.len(),
            ingested,
            feedback: REFRESH_FEEDBACK,
        })
    }
}
