//! Transaction store - the canonical append-only ledger
//!
//! Owns the in-memory collection and mirrors it to the persistence backend
//! under a single fixed key. Every mutation rewrites the entire serialized
//! collection; incremental deltas are not worth it at household scale.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::{sort_for_display, Transaction};
use crate::ports::KeyValueStore;

/// Fixed logical key the whole collection is stored under
///
/// Matches the web frontend's storage key so an existing payload is picked up
/// as-is.
pub const STORAGE_KEY: &str = "family_transactions";

/// Canonical owner of the transaction collection
///
/// Storage order is newest-inserted-first. Mutations apply in memory first
/// and then persist synchronously; a failed write surfaces as
/// `Error::Persistence` without rolling back the in-memory change, so the
/// caller can warn the user and decide whether to retry.
pub struct TransactionStore {
    backend: Arc<dyn KeyValueStore>,
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    /// Open the store, loading any previously persisted collection
    ///
    /// An absent key, an unreadable backend, or a malformed payload all
    /// degrade to an empty collection - prior-state problems are never fatal.
    pub fn open(backend: Arc<dyn KeyValueStore>) -> Self {
        let transactions = Self::load(backend.as_ref());
        Self {
            backend,
            transactions,
        }
    }

    fn load(backend: &dyn KeyValueStore) -> Vec<Transaction> {
        let payload = match backend.get(STORAGE_KEY) {
            Ok(Some(payload)) => payload,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "persistence read failed; starting from an empty ledger");
                return Vec::new();
            }
        };

        match serde_json::from_str(&payload) {
            Ok(transactions) => transactions,
            Err(e) => {
                warn!(error = %e, "stored ledger payload is malformed; treating as no data");
                Vec::new()
            }
        }
    }

    /// Discard the in-memory snapshot and reload from the backend
    ///
    /// Last writer to the persisted state wins; there is no merge.
    pub fn reload(&mut self) {
        self.transactions = Self::load(self.backend.as_ref());
    }

    /// Insert a transaction at the head and persist the full collection
    pub fn append(&mut self, tx: Transaction) -> Result<()> {
        self.transactions.insert(0, tx);
        self.persist()
    }

    /// Replace the transaction with a matching id, wholesale
    ///
    /// All fields are overwritten from the incoming value; the id itself is
    /// the lookup key and therefore immutable. Returns `Error::NotFound` when
    /// no transaction has that id.
    pub fn update(&mut self, tx: Transaction) -> Result<()> {
        let slot = self
            .transactions
            .iter_mut()
            .find(|existing| existing.id == tx.id)
            .ok_or_else(|| Error::not_found(format!("transaction {}", tx.id)))?;
        *slot = tx;
        self.persist()
    }

    /// Delete the transaction with a matching id
    pub fn remove(&mut self, id: Uuid) -> Result<()> {
        let before = self.transactions.len();
        self.transactions.retain(|tx| tx.id != id);
        if self.transactions.len() == before {
            return Err(Error::not_found(format!("transaction {id}")));
        }
        self.persist()
    }

    /// Empty the collection and persist the empty state
    pub fn clear(&mut self) -> Result<()> {
        self.transactions.clear();
        self.persist()
    }

    /// Transactions in presentation order: date descending, ties by
    /// insertion order
    pub fn list(&self) -> Vec<Transaction> {
        let mut txs = self.transactions.clone();
        sort_for_display(&mut txs);
        txs
    }

    /// Transactions in storage order (newest-inserted-first)
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    fn persist(&self) -> Result<()> {
        let payload = serde_json::to_string(&self.transactions)?;
        self.backend.put(STORAGE_KEY, &payload).map_err(|e| {
            warn!(error = %e, "persistence write failed; in-memory change kept");
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;
    use crate::domain::{TransactionType, FALLBACK_CATEGORY};
    use rust_decimal::Decimal;

    fn tx(amount: i64, description: &str) -> Transaction {
        Transaction::new(
            Decimal::new(amount, 0),
            description,
            FALLBACK_CATEGORY,
            TransactionType::MePaidForFamily,
        )
    }

    #[test]
    fn test_open_with_no_prior_state_is_empty() {
        let store = TransactionStore::open(Arc::new(MemoryStore::new()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_open_with_corrupted_payload_is_empty() {
        let backend = Arc::new(MemoryStore::new());
        backend.put(STORAGE_KEY, "{not valid json").unwrap();

        let store = TransactionStore::open(backend);
        assert!(store.is_empty());
    }

    #[test]
    fn test_append_persists_and_round_trips() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = TransactionStore::open(Arc::clone(&backend) as Arc<dyn KeyValueStore>);

        store.append(tx(1000, "lunch")).unwrap();
        store.append(tx(400, "soap")).unwrap();

        // Newest-first storage order
        assert_eq!(store.transactions()[0].description, "soap");

        let reopened = TransactionStore::open(backend);
        assert_eq!(reopened.transactions(), store.transactions());
    }

    #[test]
    fn test_update_replaces_wholesale() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = TransactionStore::open(Arc::clone(&backend) as Arc<dyn KeyValueStore>);

        let original = tx(1000, "lunch");
        let id = original.id;
        store.append(original).unwrap();

        let mut edited = tx(1200, "dinner");
        edited.id = id;
        edited.kind = TransactionType::FamilyPaidForMe;
        store.update(edited.clone()).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.transactions()[0], edited);
    }

    #[test]
    fn test_update_missing_id_is_not_found_and_changes_nothing() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = TransactionStore::open(Arc::clone(&backend) as Arc<dyn KeyValueStore>);
        store.append(tx(1000, "lunch")).unwrap();
        let snapshot = store.transactions().to_vec();

        let err = store.update(tx(5, "ghost")).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.transactions(), snapshot.as_slice());
    }

    #[test]
    fn test_remove_missing_id_is_not_found_and_changes_nothing() {
        let mut store = TransactionStore::open(Arc::new(MemoryStore::new()));
        store.append(tx(1000, "lunch")).unwrap();

        let err = store.remove(Uuid::new_v4()).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear_persists_empty_payload() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = TransactionStore::open(Arc::clone(&backend) as Arc<dyn KeyValueStore>);
        store.append(tx(1000, "lunch")).unwrap();
        store.append(tx(400, "soap")).unwrap();

        store.clear().unwrap();

        assert!(store.is_empty());
        assert_eq!(backend.raw(STORAGE_KEY), Some("[]".to_string()));
    }

    #[test]
    fn test_write_failure_surfaces_but_keeps_memory() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = TransactionStore::open(Arc::clone(&backend) as Arc<dyn KeyValueStore>);
        backend.set_fail_writes(true);

        let err = store.append(tx(1000, "lunch")).unwrap_err();
        assert!(matches!(err, Error::Persistence(_)));
        // The in-memory change is not lost; the caller decides about retry
        assert_eq!(store.len(), 1);

        backend.set_fail_writes(false);
        store.append(tx(400, "soap")).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_reload_discards_in_memory_snapshot() {
        let backend = Arc::new(MemoryStore::new());
        let mut first = TransactionStore::open(Arc::clone(&backend) as Arc<dyn KeyValueStore>);
        first.append(tx(1000, "lunch")).unwrap();

        // A second session over the same backend writes more data
        let mut second = TransactionStore::open(Arc::clone(&backend) as Arc<dyn KeyValueStore>);
        second.append(tx(400, "soap")).unwrap();

        first.reload();
        assert_eq!(first.len(), 2);
        assert_eq!(first.transactions(), second.transactions());
    }
}
