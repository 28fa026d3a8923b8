//! Tatekae Core - settlement ledger for the household advance-payment memo
//!
//! This crate implements the core ledger logic following hexagonal
//! architecture:
//!
//! - **domain**: Core entities and derivations (Transaction, SettlementSummary)
//! - **ports**: Trait definitions for external collaborators (KeyValueStore, CategoryOracle)
//! - **services**: Business logic orchestration (store, gateway, ingestor, refresh, adviser)
//! - **adapters**: Concrete implementations (JSON files, Gemini, in-memory)
//!
//! Execution is single-threaded and event-driven: every mutation runs to
//! completion, persisting the full collection before the operation counts as
//! done. The only async boundary is the category oracle.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use adapters::{GeminiClassifier, JsonFileStore, OfflineClassifier};
use config::Config;
use domain::result::Result;
use ports::{CategoryOracle, KeyValueStore, SpendingAnalyst};
use services::{
    CategoryGateway, DebouncedSuggester, EntrySurface, QuickEntryIngestor, QuickEntryParams,
    RefreshController, RefreshOutcome, SpendingAdviser, TransactionStore,
};

// Re-export commonly used types at crate root
pub use domain::result::Error;
pub use domain::{
    settle, SettlementSummary, Transaction, TransactionType, CATEGORIES, FALLBACK_CATEGORY,
    SHORTCUT_DESCRIPTION, UNTITLED_DESCRIPTION,
};

/// Manual-form submission, before id and timestamp are assigned
///
/// The category is whatever the form currently shows - a user pick or an
/// accepted auto-suggestion - and is trusted as-is.
#[derive(Debug, Clone)]
pub struct EntryInput {
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub kind: TransactionType,
}

/// Main context for ledger operations
///
/// The primary entry point for a presentation layer. It owns the transaction
/// store, the quick-entry surface, and all services; destructive-operation
/// confirmation is the caller's responsibility and is assumed to have
/// happened before the call arrives.
pub struct LedgerContext {
    pub config: Config,
    store: TransactionStore,
    surface: EntrySurface,
    ingestor: QuickEntryIngestor,
    refresher: RefreshController,
    suggester: DebouncedSuggester,
    adviser: SpendingAdviser,
}

impl LedgerContext {
    /// Open a ledger backed by JSON files in `data_dir`
    ///
    /// Uses the Gemini oracle when an API key is configured and the offline
    /// classifier otherwise, so keyless installations still record
    /// transactions (with the fallback category).
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let config = Config::load(data_dir)?;

        let backend = Arc::new(JsonFileStore::new(data_dir));

        // The Gemini client serves both text-oracle ports
        let (oracle, analyst): (Arc<dyn CategoryOracle>, Arc<dyn SpendingAnalyst>) =
            match &config.gemini_api_key {
                Some(key) => {
                    let gemini =
                        Arc::new(GeminiClassifier::new(key.clone(), config.model.clone())?);
                    (Arc::clone(&gemini) as Arc<dyn CategoryOracle>, gemini)
                }
                None => {
                    let offline = Arc::new(OfflineClassifier::new());
                    (Arc::clone(&offline) as Arc<dyn CategoryOracle>, offline)
                }
            };

        Ok(Self::with_backend(config, backend, oracle, analyst))
    }

    /// Wire a ledger over explicit port implementations
    pub fn with_backend(
        config: Config,
        backend: Arc<dyn KeyValueStore>,
        oracle: Arc<dyn CategoryOracle>,
        analyst: Arc<dyn SpendingAnalyst>,
    ) -> Self {
        let store = TransactionStore::open(backend);
        let gateway = CategoryGateway::new(oracle);
        let ingestor = QuickEntryIngestor::new(gateway.clone());
        let refresher = RefreshController::new(gateway.clone());
        let suggester = DebouncedSuggester::with_quiet_period(gateway, config.quiet_period);
        let adviser = SpendingAdviser::new(analyst);

        Self {
            config,
            store,
            surface: EntrySurface::new(),
            ingestor,
            refresher,
            suggester,
            adviser,
        }
    }

    // === Quick entry ===

    /// Deliver the launch URL the app was opened with
    pub fn set_launch_url(&mut self, url: &Url) {
        self.surface.arrive(QuickEntryParams::from_url(url));
    }

    /// Deliver already-parsed launch parameters
    pub fn set_launch_params(&mut self, params: QuickEntryParams) {
        self.surface.arrive(params);
    }

    /// Run quick-entry detection once
    ///
    /// `Ok(Some(..))` tells the presentation layer to switch to the
    /// dashboard view.
    pub async fn process_launch(&mut self) -> Result<Option<Transaction>> {
        self.ingestor.ingest(&mut self.store, &mut self.surface).await
    }

    // === Refresh ===

    /// User-triggered refresh: reload persisted state, re-run quick-entry
    /// detection, and report the advisory feedback duration
    pub async fn refresh(&mut self) -> Result<RefreshOutcome> {
        self.refresher
            .refresh(&mut self.store, &mut self.surface)
            .await
    }

    // === Presentation-facing store operations ===

    /// Record a manual-form submission
    ///
    /// Rejects a non-positive amount with `Error::Validation`, leaving the
    /// form state to the caller for correction. An empty description becomes
    /// the untitled placeholder.
    pub fn add(&mut self, input: EntryInput) -> Result<Transaction> {
        if input.amount <= Decimal::ZERO {
            return Err(Error::validation("amount must be a positive number"));
        }

        let description = if input.description.trim().is_empty() {
            UNTITLED_DESCRIPTION.to_string()
        } else {
            input.description
        };

        let tx = Transaction::new(input.amount, description, input.category, input.kind);
        self.store.append(tx.clone())?;
        Ok(tx)
    }

    /// Replace an edited transaction wholesale
    ///
    /// A vanished target is a benign race (the row existed at click time);
    /// it is absorbed rather than surfaced.
    pub fn update(&mut self, tx: Transaction) -> Result<()> {
        match self.store.update(tx) {
            Err(e) if e.is_not_found() => {
                debug!("update target vanished; treating as no-op");
                Ok(())
            }
            result => result,
        }
    }

    /// Delete a single transaction
    pub fn delete(&mut self, id: Uuid) -> Result<()> {
        match self.store.remove(id) {
            Err(e) if e.is_not_found() => {
                debug!(%id, "delete target vanished; treating as no-op");
                Ok(())
            }
            result => result,
        }
    }

    /// Delete the whole history and reset the settlement
    pub fn clear(&mut self) -> Result<()> {
        self.store.clear()
    }

    /// Transactions in presentation order
    pub fn list(&self) -> Vec<Transaction> {
        self.store.list()
    }

    /// Current settlement position, recomputed on every call
    pub fn summary(&self) -> SettlementSummary {
        settle(self.store.transactions())
    }

    /// Advice text over the most recent spending, never failing
    ///
    /// Oracle problems degrade to fixed messaging; see `services::insights`
    /// for the message constants.
    pub async fn insights(&self) -> String {
        self.adviser.advise(self.store.transactions()).await
    }

    /// Debounced auto-classification scheduler for the description field
    pub fn suggester(&mut self) -> &mut DebouncedSuggester {
        &mut self.suggester
    }
}
