//! Transaction domain model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The closed category set the classifier oracle is constrained to
pub const CATEGORIES: [&str; 8] = [
    "食費", "日用品", "外食", "光熱費", "住居", "交通", "娯楽", "その他",
];

/// Category used whenever classification is unavailable or inconclusive
pub const FALLBACK_CATEGORY: &str = "その他";

/// Description placeholder for a manual entry submitted without text
pub const UNTITLED_DESCRIPTION: &str = "無題";

/// Description placeholder for a shortcut-originated (quick-entry) record
pub const SHORTCUT_DESCRIPTION: &str = "ショートカット入力";

/// True if `label` belongs to the closed category enumeration
pub fn is_known_category(label: &str) -> bool {
    CATEGORIES.contains(&label)
}

/// Who advanced money for whom
///
/// Serialized variant names match the web frontend's payload so an exported
/// collection parses unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// I advanced money on the family's behalf; the family owes me
    MePaidForFamily,
    /// I spent from shared/family funds; I owe the family
    FamilyPaidForMe,
}

/// A single reimbursement record between the two parties
///
/// Immutable once created; edits replace the whole value with the `id`
/// preserved. The serde key for `kind` is `type`, matching the payload the
/// web frontend stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl Transaction {
    /// Create a new transaction stamped with a fresh id and the current time
    pub fn new(
        amount: Decimal,
        description: impl Into<String>,
        category: impl Into<String>,
        kind: TransactionType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: Utc::now(),
            amount,
            description: description.into(),
            category: category.into(),
            kind,
        }
    }
}

/// Sort a collection into presentation order: `date` descending, stable, so
/// same-date entries keep their insertion order (storage is newest-first).
pub fn sort_for_display(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}
