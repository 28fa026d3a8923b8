//! Gemini API client for category suggestion and spending analysis
//!
//! Classification sends the purchase description with a constrained prompt
//! restricting the reply to the closed category set; analysis sends a digest
//! of recent spending and asks for short advice text. Plain-text contract in
//! both directions; no structured schema is enforced.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};
use crate::domain::CATEGORIES;
use crate::ports::{CategoryOracle, SpendingAnalyst};

/// Default Gemini API endpoint
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model used for classification
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Oracle timeout; a slow oracle must not stall ingestion longer than this
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Gemini-backed category oracle
#[derive(Debug)]
pub struct GeminiClassifier {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

// ============================================================================
// Wire format (generateContent)
// ============================================================================

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<TextPart>,
}

#[derive(Serialize)]
struct TextPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    thinking_config: ThinkingConfig,
}

/// Classification is a one-word pick; spending thinking budget on it only
/// adds latency
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// First text part of the first candidate, the way the API returns plain
    /// text answers
    fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| content.parts.first())
            .and_then(|part| part.text.as_deref())
    }
}

impl GeminiClassifier {
    /// Create a classifier against the public Gemini endpoint
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, model, DEFAULT_API_BASE)
    }

    /// Create a classifier against a custom endpoint (tests, proxies)
    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::classification(format!("failed to create HTTP client: {e}")))?;

        let base_url: String = base_url.into();
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    /// Constrained prompt restricting the answer to the closed category set
    fn prompt(description: &str) -> String {
        format!(
            "「{}」という買い物の内容に最も適したカテゴリーを、以下のリストから一つだけ選んで返してください：{}",
            description,
            CATEGORIES.join(", ")
        )
    }

    /// Prompt asking for short advice text over a spending digest
    fn advice_prompt(digest: &str) -> String {
        format!(
            "以下の家計支出データに基づき、節約のコツや傾向を100文字程度で簡潔に日本語でアドバイスしてください。\n\n{digest}"
        )
    }

    /// Run one generateContent call and return the trimmed response text
    ///
    /// A response without any text part comes back as an empty string; the
    /// callers decide what a blank reply means for their operation.
    async fn generate(&self, prompt: String) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![TextPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::classification(format!(
                "oracle error: HTTP {}",
                status.as_u16()
            )));
        }

        let data: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::classification(format!("malformed oracle response: {e}")))?;

        Ok(data.text().map(str::trim).unwrap_or_default().to_string())
    }

    /// Map request errors to user-friendly messages
    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::classification(format!(
                "category oracle timed out after {} seconds",
                REQUEST_TIMEOUT.as_secs()
            ))
        } else if error.is_connect() {
            Error::classification("unable to connect to the category oracle")
        } else {
            Error::classification(format!("category oracle request failed: {error}"))
        }
    }
}

#[async_trait]
impl CategoryOracle for GeminiClassifier {
    async fn classify(&self, description: &str) -> Result<String> {
        let label = self.generate(Self::prompt(description)).await?;
        if label.is_empty() {
            return Err(Error::classification("oracle returned no text"));
        }
        Ok(label)
    }
}

#[async_trait]
impl SpendingAnalyst for GeminiClassifier {
    async fn advise(&self, digest: &str) -> Result<String> {
        // A blank reply is passed through; the adviser has its own
        // degradation message for that case
        self.generate(Self::advice_prompt(digest)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_lists_the_closed_category_set() {
        let prompt = GeminiClassifier::prompt("傘");
        assert!(prompt.contains("「傘」"));
        for category in CATEGORIES {
            assert!(prompt.contains(category));
        }
    }

    #[test]
    fn test_advice_prompt_embeds_the_digest() {
        let prompt = GeminiClassifier::advice_prompt("- lunch: 1000円 (外食)");
        assert!(prompt.contains("節約のコツ"));
        assert!(prompt.ends_with("\n\n- lunch: 1000円 (外食)"));
    }

    #[test]
    fn test_response_text_extraction() {
        let raw = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": " 食費\n" } ] } }
            ]
        }"#;
        let response: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.text().map(str::trim), Some("食費"));
    }

    #[test]
    fn test_empty_response_has_no_text() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.text(), None);

        let raw = r#"{ "candidates": [ { "content": { "parts": [] } } ] }"#;
        let response: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let classifier =
            GeminiClassifier::with_base_url("key", DEFAULT_MODEL, "http://localhost:9/v1beta/")
                .unwrap();
        assert_eq!(classifier.base_url, "http://localhost:9/v1beta");
    }
}
