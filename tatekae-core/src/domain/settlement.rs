//! Settlement summary derivation

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Transaction, TransactionType};

/// Net settlement position between the two parties
///
/// Derived from the ledger on every read, never persisted or cached.
/// Sign convention: positive `balance` means the family owes me, negative
/// means I owe the family, zero means settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementSummary {
    pub total_me_paid: Decimal,
    pub total_family_paid: Decimal,
    pub balance: Decimal,
}

impl SettlementSummary {
    /// True when neither party owes the other anything
    pub fn is_settled(&self) -> bool {
        self.balance == Decimal::ZERO
    }
}

/// Compute the settlement summary over the current collection
///
/// Single linear scan; amounts are exact decimals so the subtraction never
/// rounds.
pub fn settle(transactions: &[Transaction]) -> SettlementSummary {
    let mut total_me_paid = Decimal::ZERO;
    let mut total_family_paid = Decimal::ZERO;

    for tx in transactions {
        match tx.kind {
            TransactionType::MePaidForFamily => total_me_paid += tx.amount,
            TransactionType::FamilyPaidForMe => total_family_paid += tx.amount,
        }
    }

    SettlementSummary {
        total_me_paid,
        total_family_paid,
        balance: total_me_paid - total_family_paid,
    }
}
