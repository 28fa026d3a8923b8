//! Spending insights - advice text over the recent ledger
//!
//! Renders the most recent transactions into a plain-text digest, asks the
//! analysis oracle for a short piece of advice, and degrades every failure
//! mode to fixed Japanese messaging. Like classification, analysis never
//! surfaces an error to the caller.

use std::sync::Arc;

use tracing::warn;

use crate::domain::Transaction;
use crate::ports::SpendingAnalyst;

/// How many of the most recent transactions feed the analysis
pub const ADVICE_WINDOW: usize = 20;

/// Advice shown for an empty ledger; no oracle call is made
pub const NO_DATA_MESSAGE: &str = "データがありません。";

/// Advice shown when the oracle answered with no usable text
pub const EMPTY_REPLY_MESSAGE: &str = "分析結果を生成できませんでした。";

/// Advice shown when the oracle call failed outright
pub const FAILURE_MESSAGE: &str = "分析中にエラーが発生しました。時間を置いて再度お試しください。";

/// Gateway in front of the spending-analysis oracle
#[derive(Clone)]
pub struct SpendingAdviser {
    analyst: Arc<dyn SpendingAnalyst>,
}

impl SpendingAdviser {
    pub fn new(analyst: Arc<dyn SpendingAnalyst>) -> Self {
        Self { analyst }
    }

    /// One digest line per transaction: `- description: amount円 (category)`
    fn digest(transactions: &[Transaction]) -> String {
        transactions
            .iter()
            .take(ADVICE_WINDOW)
            .map(|tx| format!("- {}: {}円 ({})", tx.description, tx.amount, tx.category))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Advice for the given collection, never failing
    ///
    /// Expects storage order (newest-first); only the `ADVICE_WINDOW` most
    /// recent transactions are analyzed. An empty collection short-circuits
    /// without an oracle call.
    pub async fn advise(&self, transactions: &[Transaction]) -> String {
        if transactions.is_empty() {
            return NO_DATA_MESSAGE.to_string();
        }

        match self.analyst.advise(&Self::digest(transactions)).await {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    EMPTY_REPLY_MESSAGE.to_string()
                } else {
                    text.to_string()
                }
            }
            Err(e) => {
                warn!(error = %e, "spending analysis failed; degrading to error message");
                FAILURE_MESSAGE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::result::{Error, Result};
    use crate::domain::TransactionType;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use std::sync::Mutex;

    struct ScriptedAnalyst {
        reply: Result<String>,
        seen_digest: Mutex<Option<String>>,
    }

    impl ScriptedAnalyst {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                seen_digest: Mutex::new(None),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(Error::classification("oracle unreachable")),
                seen_digest: Mutex::new(None),
            }
        }

        fn seen_digest(&self) -> Option<String> {
            self.seen_digest.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SpendingAnalyst for ScriptedAnalyst {
        async fn advise(&self, digest: &str) -> Result<String> {
            *self.seen_digest.lock().unwrap() = Some(digest.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(_) => Err(Error::classification("oracle unreachable")),
            }
        }
    }

    fn tx(amount: i64, description: &str, category: &str) -> Transaction {
        Transaction::new(
            Decimal::new(amount, 0),
            description,
            category,
            TransactionType::MePaidForFamily,
        )
    }

    #[tokio::test]
    async fn test_empty_ledger_skips_the_oracle() {
        let analyst = Arc::new(ScriptedAnalyst::replying("advice"));
        let adviser = SpendingAdviser::new(Arc::clone(&analyst) as Arc<dyn SpendingAnalyst>);

        assert_eq!(adviser.advise(&[]).await, NO_DATA_MESSAGE);
        assert_eq!(analyst.seen_digest(), None);
    }

    #[tokio::test]
    async fn test_digest_lines_carry_description_amount_and_category() {
        let analyst = Arc::new(ScriptedAnalyst::replying("advice"));
        let adviser = SpendingAdviser::new(Arc::clone(&analyst) as Arc<dyn SpendingAnalyst>);

        let txs = vec![tx(1800, "ドラッグストア", "日用品"), tx(450, "batteries", "日用品")];
        adviser.advise(&txs).await;

        assert_eq!(
            analyst.seen_digest().expect("oracle should be called"),
            "- ドラッグストア: 1800円 (日用品)\n- batteries: 450円 (日用品)"
        );
    }

    #[tokio::test]
    async fn test_digest_is_capped_at_the_advice_window() {
        let analyst = Arc::new(ScriptedAnalyst::replying("advice"));
        let adviser = SpendingAdviser::new(Arc::clone(&analyst) as Arc<dyn SpendingAnalyst>);

        let txs: Vec<Transaction> = (0..ADVICE_WINDOW + 5)
            .map(|i| tx(100 + i as i64, "item", "食費"))
            .collect();
        adviser.advise(&txs).await;

        let digest = analyst.seen_digest().expect("oracle should be called");
        assert_eq!(digest.lines().count(), ADVICE_WINDOW);
        // Newest-first storage order: the head of the slice is kept
        assert!(digest.starts_with("- item: 100円"));
    }

    #[tokio::test]
    async fn test_reply_is_trimmed() {
        let adviser = SpendingAdviser::new(Arc::new(ScriptedAnalyst::replying("  節約のコツ\n")));
        assert_eq!(adviser.advise(&[tx(100, "item", "食費")]).await, "節約のコツ");
    }

    #[tokio::test]
    async fn test_blank_reply_degrades_to_empty_reply_message() {
        let adviser = SpendingAdviser::new(Arc::new(ScriptedAnalyst::replying("   ")));
        assert_eq!(
            adviser.advise(&[tx(100, "item", "食費")]).await,
            EMPTY_REPLY_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_oracle_failure_degrades_to_failure_message() {
        let adviser = SpendingAdviser::new(Arc::new(ScriptedAnalyst::failing()));
        assert_eq!(
            adviser.advise(&[tx(100, "item", "食費")]).await,
            FAILURE_MESSAGE
        );
    }
}
