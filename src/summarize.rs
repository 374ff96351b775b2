//! Optional conversation summaries.
//!
//! Summaries are an injected capability: the project writer takes any
//! [`Summarizer`] and treats every error as "no summary". The crate ships a
//! Gemini-backed implementation behind the `gemini` feature.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "gemini")]
//! # fn main() {
//! use chatmigrate::config::GeminiConfig;
//! use chatmigrate::summarize::GeminiSummarizer;
//!
//! match GeminiSummarizer::from_env(GeminiConfig::default()) {
//!     Ok(summarizer) => { /* pass Some(&summarizer) to write_projects */ }
//!     Err(e) => eprintln!("summaries disabled: {e}"),
//! }
//! # }
//! # #[cfg(not(feature = "gemini"))]
//! # fn main() {}
//! ```

use crate::core::models::Conversation;
use crate::error::Result;
use crate::format::RoleMapping;

/// Produces a one-paragraph summary of a conversation.
pub trait Summarizer {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Summarizes `conversation`.
    ///
    /// Returns [`MigrateError::SummarizationUnavailable`](crate::MigrateError::SummarizationUnavailable)
    /// when no summary can be produced.
    fn summarize(&self, conversation: &Conversation) -> Result<String>;
}

/// Builds the prompt sent to a language model for `conversation`.
///
/// Roles are written in Gemini's vocabulary (`user` / `model`).
pub fn build_prompt(conversation: &Conversation) -> String {
    let mut prompt = String::from(
        "Summarize the following conversation in a single concise paragraph of plain prose. \
         Describe the topic, what was asked and what was concluded. Do not use bullet points or headings.\n",
    );
    prompt.push_str(&format!("Title: {}\n\n", conversation.title));
    for msg in &conversation.messages {
        prompt.push_str(RoleMapping::Gemini.apply(&msg.role));
        prompt.push_str(": ");
        prompt.push_str(&msg.text);
        prompt.push_str("\n\n");
    }
    prompt
}

#[cfg(feature = "gemini")]
pub use gemini::{GeminiSummarizer, extract_gemini_text};

#[cfg(feature = "gemini")]
mod gemini {
    use std::env;
    use std::thread;
    use std::time::Duration;

    use reqwest::blocking::Client;
    use serde_json::Value;

    use super::{Summarizer, build_prompt};
    use crate::config::GeminiConfig;
    use crate::core::models::Conversation;
    use crate::error::{MigrateError, Result};

    const RETRY_BACKOFF_MS: u64 = 500;

    /// Summarizer backed by the Gemini `generateContent` API.
    pub struct GeminiSummarizer {
        api_key: String,
        config: GeminiConfig,
        client: Client,
    }

    impl std::fmt::Debug for GeminiSummarizer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("GeminiSummarizer")
                .field("model", &self.config.model)
                .finish_non_exhaustive()
        }
    }

    impl GeminiSummarizer {
        pub fn new(api_key: impl Into<String>, config: GeminiConfig) -> Result<Self> {
            let client = Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .map_err(|e| {
                    MigrateError::summarization(format!("HTTP client setup failed: {e}"))
                })?;
            Ok(Self {
                api_key: api_key.into(),
                config,
                client,
            })
        }

        /// Reads the API key from the variable named by
        /// [`GeminiConfig::api_key_env`].
        pub fn from_env(config: GeminiConfig) -> Result<Self> {
            let api_key = env::var(&config.api_key_env)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    MigrateError::summarization(format!("{} is not set", config.api_key_env))
                })?;
            Self::new(api_key, config)
        }

        fn request_once(&self, payload: &Value) -> Result<String> {
            let url = format!(
                "{}/models/{}:generateContent",
                self.config.endpoint.trim_end_matches('/'),
                self.config.model
            );

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(payload)
                .send()
                .map_err(|e| MigrateError::summarization(format!("request failed: {e}")))?;

            if !response.status().is_success() {
                return Err(MigrateError::summarization(format!(
                    "gemini call failed with status {}",
                    response.status()
                )));
            }

            let json: Value = response
                .json()
                .map_err(|e| MigrateError::summarization(format!("invalid response body: {e}")))?;
            extract_gemini_text(&json)
                .ok_or_else(|| MigrateError::summarization("gemini response missing text content"))
        }
    }

    impl Summarizer for GeminiSummarizer {
        fn name(&self) -> &'static str {
            "gemini"
        }

        fn summarize(&self, conversation: &Conversation) -> Result<String> {
            if conversation.is_empty() {
                return Err(MigrateError::summarization("conversation has no messages"));
            }

            let payload = serde_json::json!({
                "contents": [
                    {"role": "user", "parts": [{"text": build_prompt(conversation)}]}
                ]
            });

            let mut attempt = 0;
            loop {
                match self.request_once(&payload) {
                    Ok(summary) => return Ok(summary),
                    Err(e) if attempt < self.config.max_retries => {
                        attempt += 1;
                        tracing::debug!(attempt, error = %e, "retrying summary request");
                        thread::sleep(Duration::from_millis(RETRY_BACKOFF_MS * u64::from(attempt)));
                    }
                    Err(e) => return Err(e),
                }
            }
        }
    }

    /// Pulls the first candidate's text out of a `generateContent` response.
    pub fn extract_gemini_text(json: &Value) -> Option<String> {
        let parts = json
            .get("candidates")?
            .as_array()?
            .first()?
            .get("content")?
            .get("parts")?
            .as_array()?;

        let text: String = parts
            .iter()
            .filter_map(|p| p.get("text").and_then(Value::as_str))
            .collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use serde_json::json;

        #[test]
        fn test_extract_gemini_text() {
            let response = json!({
                "candidates": [{"content": {"role": "model", "parts": [{"text": " A short "}, {"text": "summary. "}]}}]
            });
            assert_eq!(
                extract_gemini_text(&response).as_deref(),
                Some("A short summary.")
            );
        }

        #[test]
        fn test_extract_gemini_text_missing() {
            assert!(extract_gemini_text(&json!({"candidates": []})).is_none());
            assert!(extract_gemini_text(&json!({"error": {"code": 400}})).is_none());
            let blank = json!({"candidates": [{"content": {"parts": [{"text": "  "}]}}]});
            assert!(extract_gemini_text(&blank).is_none());
        }

        #[test]
        fn test_from_env_without_key() {
            let config = GeminiConfig::new().with_api_key_env("CHATMIGRATE_TEST_UNSET_KEY");
            let err = GeminiSummarizer::from_env(config).unwrap_err();
            assert!(err.is_summarization());
            assert!(err.to_string().contains("CHATMIGRATE_TEST_UNSET_KEY"));
        }

        #[test]
        fn test_empty_conversation_is_not_sent() {
            let summarizer = GeminiSummarizer::new(
                "key",
                GeminiConfig::new().with_endpoint("http://127.0.0.1:9"),
            )
            .unwrap();
            let err = summarizer
                .summarize(&Conversation::new("Empty", vec![]))
                .unwrap_err();
            assert!(err.to_string().contains("no messages"));
        }

        #[test]
        fn test_unreachable_endpoint_fails_softly() {
            let summarizer = GeminiSummarizer::new(
                "key",
                GeminiConfig::new()
                    .with_endpoint("http://127.0.0.1:9")
                    .with_timeout_secs(2)
                    .with_max_retries(0),
            )
            .unwrap();
            let convo = Conversation::new("T", vec![crate::Message::new("user", "hi")]);
            let err = summarizer.summarize(&convo).unwrap_err();
            assert!(err.is_summarization());
        }
    }
}
