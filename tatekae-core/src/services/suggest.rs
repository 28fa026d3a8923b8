//! Debounced background classification while the user is typing
//!
//! Each keystroke reschedules a single pending classification task; only the
//! last scheduled task after the quiet period actually calls the oracle
//! (last-scheduled-wins, not last-arrived-wins). A superseded task is aborted
//! before it can run, and its receiver observes the cancellation.

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::services::classify::CategoryGateway;

/// Quiet period before a scheduled classification fires
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Cancellable scheduled classification task, one per input field
///
/// Holds at most one pending task. `input` supersedes whatever is pending;
/// `prime` seeds the change detector with a pre-existing description so
/// re-typing the same text does not trigger redundant calls.
pub struct DebouncedSuggester {
    gateway: CategoryGateway,
    quiet_period: Duration,
    pending: Option<JoinHandle<()>>,
    last_text: Option<String>,
}

impl DebouncedSuggester {
    pub fn new(gateway: CategoryGateway) -> Self {
        Self::with_quiet_period(gateway, DEFAULT_QUIET_PERIOD)
    }

    pub fn with_quiet_period(gateway: CategoryGateway, quiet_period: Duration) -> Self {
        Self {
            gateway,
            quiet_period,
            pending: None,
            last_text: None,
        }
    }

    /// Seed the change detector with the field's current value (edit mode)
    pub fn prime(&mut self, text: &str) {
        self.last_text = Some(text.to_string());
    }

    /// Register a new input value, superseding any pending classification
    ///
    /// Returns `None` when nothing was scheduled (empty or unchanged text).
    /// Otherwise returns a receiver that yields `Some(label)` when the
    /// suggestion belongs to the closed category set, `None` when the current
    /// selection should be kept. A receiver whose task was superseded or
    /// dropped resolves with `RecvError`; stale results are simply discarded.
    pub fn input(&mut self, text: &str) -> Option<oneshot::Receiver<Option<String>>> {
        self.cancel();

        if text.trim().is_empty() {
            // A cleared field resets the change detector: retyping the same
            // text afterwards is a material change and must reschedule.
            self.last_text = None;
            return None;
        }
        if self.last_text.as_deref() == Some(text) {
            return None;
        }
        self.last_text = Some(text.to_string());

        let (reply, receiver) = oneshot::channel();
        let gateway = self.gateway.clone();
        let quiet = self.quiet_period;
        let text = text.to_string();

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            let suggestion = gateway.suggest_validated(&text).await;
            let _ = reply.send(suggestion);
        }));

        Some(receiver)
    }

    /// Abort the pending classification, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for DebouncedSuggester {
    fn drop(&mut self) {
        self.cancel();
    }
}
