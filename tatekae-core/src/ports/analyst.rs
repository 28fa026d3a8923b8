//! Spending-analysis oracle port
//!
//! Turns a plain-text digest of recent spending into a short piece of advice
//! text. Like classification this is an external text oracle, but the two
//! concerns have separate failure messaging, so they are separate ports.

use async_trait::async_trait;

use crate::domain::result::Result;

/// External spending-analysis oracle
///
/// Implementations return `Error::Classification` on any failure; the
/// adviser in `services::insights` converts failures into user-facing
/// degradation text, so no caller of the adviser ever observes them.
#[async_trait]
pub trait SpendingAnalyst: Send + Sync {
    /// Generate advice text from a pre-rendered spending digest
    async fn advise(&self, digest: &str) -> Result<String>;
}
