//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod classify;
mod insights;
mod ledger;
mod quick_entry;
mod refresh;
mod suggest;

pub use classify::CategoryGateway;
pub use insights::{
    SpendingAdviser, ADVICE_WINDOW, EMPTY_REPLY_MESSAGE, FAILURE_MESSAGE, NO_DATA_MESSAGE,
};
pub use ledger::{TransactionStore, STORAGE_KEY};
pub use quick_entry::{
    EntrySurface, QuickEntryIngestor, QuickEntryParams, PARAM_AMOUNT, PARAM_DESCRIPTION,
    PARAM_TYPE, TYPE_FLAG_FAMILY,
};
pub use refresh::{RefreshController, RefreshOutcome, REFRESH_FEEDBACK};
pub use suggest::{DebouncedSuggester, DEFAULT_QUIET_PERIOD};
