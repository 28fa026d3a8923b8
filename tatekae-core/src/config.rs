//! Configuration management
//!
//! Settings live in `settings.json` inside the data directory:
//! ```json
//! {
//!   "geminiApiKey": "...",
//!   "model": "gemini-3-flash-preview",
//!   "quietPeriodMs": 500
//! }
//! ```
//! A missing or malformed file falls back to defaults; the API key can be
//! overridden with the `TATEKAE_GEMINI_API_KEY` environment variable for
//! CI and shortcut setups.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::adapters::gemini::DEFAULT_MODEL;
use crate::services::DEFAULT_QUIET_PERIOD;

/// Environment variable overriding the configured API key
pub const API_KEY_ENV: &str = "TATEKAE_GEMINI_API_KEY";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    gemini_api_key: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    quiet_period_ms: Option<u64>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API key for the category oracle; `None` runs the ledger offline
    pub gemini_api_key: Option<String>,
    /// Model name used for classification
    pub model: String,
    /// Quiet period for the debounced suggestion scheduler
    pub quiet_period: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            quiet_period: DEFAULT_QUIET_PERIOD,
        }
    }
}

impl Config {
    /// Load config from the data directory
    pub fn load(data_dir: &Path) -> Result<Self> {
        let settings_path = data_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        // Env var wins over the settings file
        let gemini_api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.is_empty())
            .or(raw.gemini_api_key);

        Ok(Self {
            gemini_api_key,
            model: raw.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            quiet_period: raw
                .quiet_period_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_QUIET_PERIOD),
        })
    }
}
