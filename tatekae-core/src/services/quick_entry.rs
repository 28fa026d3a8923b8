//! Quick-entry ingestion - one-shot launch-parameter shortcut
//!
//! The app can be launched with `?a=<amount>&d=<description>&t=<type>` (an
//! iOS Shortcut opening a URL, for instance). Ingestion parses, classifies,
//! appends, and then consumes the parameters so a reload cannot ingest the
//! same request twice.

use rust_decimal::Decimal;
use tracing::debug;
use url::Url;

use crate::domain::result::Result;
use crate::domain::{Transaction, TransactionType, SHORTCUT_DESCRIPTION};
use crate::services::classify::CategoryGateway;
use crate::services::ledger::TransactionStore;

/// Query parameter carrying the amount (required for ingestion to trigger)
pub const PARAM_AMOUNT: &str = "a";
/// Query parameter carrying the free-text description (optional)
pub const PARAM_DESCRIPTION: &str = "d";
/// Query parameter carrying the type flag (optional)
pub const PARAM_TYPE: &str = "t";
/// Type-flag value selecting `FamilyPaidForMe`; anything else defaults
pub const TYPE_FLAG_FAMILY: &str = "family";

/// Raw launch parameters as delivered by the entry surface
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuickEntryParams {
    pub amount: Option<String>,
    pub description: Option<String>,
    pub type_flag: Option<String>,
}

impl QuickEntryParams {
    /// Extract the `a`/`d`/`t` parameters from a launch URL
    pub fn from_url(url: &Url) -> Self {
        let mut params = Self::default();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                PARAM_AMOUNT => params.amount = Some(value.into_owned()),
                PARAM_DESCRIPTION => params.description = Some(value.into_owned()),
                PARAM_TYPE => params.type_flag = Some(value.into_owned()),
                _ => {}
            }
        }
        params
    }

    /// The amount, if present and a valid positive number
    fn valid_amount(&self) -> Option<Decimal> {
        self.amount
            .as_deref()
            .and_then(|raw| raw.trim().parse::<Decimal>().ok())
            .filter(|amount| *amount > Decimal::ZERO)
    }

    fn kind(&self) -> TransactionType {
        match self.type_flag.as_deref() {
            Some(TYPE_FLAG_FAMILY) => TransactionType::FamilyPaidForMe,
            _ => TransactionType::MePaidForFamily,
        }
    }

    fn description(&self) -> &str {
        match self.description.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => SHORTCUT_DESCRIPTION,
        }
    }
}

/// One-shot holder for the launch parameters
///
/// The idempotency guard of the ingestion path: once `consume` runs, a
/// subsequent reload or refresh sees no parameters and ingests nothing.
#[derive(Debug, Default)]
pub struct EntrySurface {
    params: Option<QuickEntryParams>,
}

impl EntrySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_url(url: &Url) -> Self {
        Self {
            params: Some(QuickEntryParams::from_url(url)),
        }
    }

    /// Deliver a fresh set of launch parameters
    pub fn arrive(&mut self, params: QuickEntryParams) {
        self.params = Some(params);
    }

    pub fn peek(&self) -> Option<&QuickEntryParams> {
        self.params.as_ref()
    }

    /// Strip the parameters from the surface
    pub fn consume(&mut self) {
        self.params = None;
    }
}

/// Ingests one-shot quick-entry requests into the ledger
pub struct QuickEntryIngestor {
    gateway: CategoryGateway,
}

impl QuickEntryIngestor {
    pub fn new(gateway: CategoryGateway) -> Self {
        Self { gateway }
    }

    /// Run quick-entry detection against the current entry surface
    ///
    /// Missing parameters or an invalid amount are not errors - there is
    /// simply nothing to ingest, and the surface is left untouched. On a
    /// valid request the transaction is classified, appended, and the
    /// parameters are consumed; `Ok(Some(..))` is the signal for the
    /// presentation layer to switch to the dashboard view.
    ///
    /// The parameters are consumed even when the persistence write fails:
    /// the appended transaction survives in memory, so re-running detection
    /// on the next refresh must not duplicate it.
    pub async fn ingest(
        &self,
        store: &mut TransactionStore,
        surface: &mut EntrySurface,
    ) -> Result<Option<Transaction>> {
        let Some(params) = surface.peek() else {
            return Ok(None);
        };
        let Some(amount) = params.valid_amount() else {
            return Ok(None);
        };

        let kind = params.kind();
        let description = params.description().to_string();
        let category = self.gateway.suggest(&description).await;

        let tx = Transaction::new(amount, description, category, kind);
        debug!(id = %tx.id, %amount, "ingesting quick-entry transaction");

        let persisted = store.append(tx.clone());
        surface.consume();
        persisted?;

        Ok(Some(tx))
    }
}
