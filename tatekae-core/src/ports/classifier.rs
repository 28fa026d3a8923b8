//! Category-suggestion oracle port
//!
//! The oracle maps a free-text purchase description to a category label from
//! the closed enumeration. It is the only asynchronous boundary in the core:
//! the in-flight operation suspends until the oracle answers or fails.

use async_trait::async_trait;

use crate::domain::result::Result;

/// External text-classification oracle
///
/// Implementations return `Error::Classification` on any failure (network,
/// timeout, malformed response). The gateway in `services::classify` shields
/// callers from those errors; no caller of the gateway ever observes them.
#[async_trait]
pub trait CategoryOracle: Send + Sync {
    /// Classify a purchase description into a category label
    async fn classify(&self, description: &str) -> Result<String>;
}
