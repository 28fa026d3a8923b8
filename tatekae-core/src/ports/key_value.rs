//! Persistence backend port - key-value abstraction
//!
//! The ledger persists its entire collection as one serialized payload under
//! a single fixed logical key. Implementations only need get/put of opaque
//! strings; there is no incremental-delta contract.

use crate::domain::result::Result;

/// Key-value persistence backend
///
/// `get` returns `None` when the key has never been written. Backends report
/// failed writes as `Error::Persistence` so callers can warn the user that a
/// change may not be durable.
pub trait KeyValueStore: Send + Sync {
    /// Read the payload stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the payload stored under `key`
    fn put(&self, key: &str, value: &str) -> Result<()>;
}
