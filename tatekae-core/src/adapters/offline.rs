//! Offline classifier - used when no oracle is configured
//!
//! Always reports the oracle as unavailable, so the gateways' fallback paths
//! supply the default category and the degraded advice text. Keyless
//! installations keep working; only the suggestions and insights are missing.

use async_trait::async_trait;

use crate::domain::result::{Error, Result};
use crate::ports::{CategoryOracle, SpendingAnalyst};

/// Text oracle that is never reachable
#[derive(Debug, Default)]
pub struct OfflineClassifier;

impl OfflineClassifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CategoryOracle for OfflineClassifier {
    async fn classify(&self, _description: &str) -> Result<String> {
        Err(Error::classification("no category oracle configured"))
    }
}

#[async_trait]
impl SpendingAnalyst for OfflineClassifier {
    async fn advise(&self, _digest: &str) -> Result<String> {
        Err(Error::classification("no analysis oracle configured"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_always_errors() {
        let err = OfflineClassifier::new().classify("raincoat").await.unwrap_err();
        assert!(matches!(err, Error::Classification(_)));

        let err = OfflineClassifier::new().advise("- lunch: 1000円 (外食)").await.unwrap_err();
        assert!(matches!(err, Error::Classification(_)));
    }
}
