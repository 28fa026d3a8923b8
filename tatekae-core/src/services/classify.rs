//! Classifier gateway - fallback-shielded access to the category oracle
//!
//! Classification failure must never block transaction creation, so every
//! oracle problem degrades to the fixed fallback category here and never
//! propagates to callers.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{is_known_category, FALLBACK_CATEGORY};
use crate::ports::CategoryOracle;

/// Gateway in front of the category-suggestion oracle
#[derive(Clone)]
pub struct CategoryGateway {
    oracle: Arc<dyn CategoryOracle>,
}

impl CategoryGateway {
    pub fn new(oracle: Arc<dyn CategoryOracle>) -> Self {
        Self { oracle }
    }

    /// Suggest a category for a description, never failing
    ///
    /// Empty input short-circuits to the fallback without an oracle call.
    /// Oracle errors and blank replies also yield the fallback. The returned
    /// label is trusted as-is; the base entry flow does not check membership
    /// in the closed enumeration.
    pub async fn suggest(&self, description: &str) -> String {
        if description.trim().is_empty() {
            return FALLBACK_CATEGORY.to_string();
        }

        match self.oracle.classify(description).await {
            Ok(label) => {
                let label = label.trim();
                if label.is_empty() {
                    FALLBACK_CATEGORY.to_string()
                } else {
                    label.to_string()
                }
            }
            Err(e) => {
                warn!(error = %e, "category oracle failed; using fallback");
                FALLBACK_CATEGORY.to_string()
            }
        }
    }

    /// Suggest a category, accepting it only if it belongs to the closed
    /// enumeration
    ///
    /// `None` means "keep the previously selected category". Used by the
    /// debounced auto-classify flow; the manual flow trusts `suggest`
    /// directly.
    pub async fn suggest_validated(&self, description: &str) -> Option<String> {
        let label = self.suggest(description).await;
        if is_known_category(&label) {
            Some(label)
        } else {
            debug!(%label, "oracle suggestion outside the category set; keeping current");
            None
        }
    }
}
