//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! and derivations - no I/O or external dependencies.

pub mod result;
pub mod settlement;
mod transaction;

pub use settlement::{settle, SettlementSummary};
pub use transaction::{
    is_known_category, sort_for_display, Transaction, TransactionType, CATEGORIES,
    FALLBACK_CATEGORY, SHORTCUT_DESCRIPTION, UNTITLED_DESCRIPTION,
};
