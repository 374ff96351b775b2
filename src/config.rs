//! Configuration types for archive processing and summarization.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`ArchiveConfig`] - where the conversations live inside an export and
//!   how untitled records are named
//! - [`GeminiConfig`] - model, credential and retry policy for summaries
//!
//! # Example
//!
//! ```rust
//! use chatmigrate::config::{ArchiveConfig, GeminiConfig};
//!
//! let archive = ArchiveConfig::new().with_default_title("(untitled)");
//! let gemini = GeminiConfig::new()
//!     .with_model("gemini-1.5-pro")
//!     .with_max_retries(0);
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for reading a ChatGPT export directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// File name looked up in the export root (default: `conversations.json`)
    pub file_name: String,

    /// Title for records that have none (default: `Untitled Conversation`)
    pub default_title: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            file_name: "conversations.json".to_string(),
            default_title: "Untitled Conversation".to_string(),
        }
    }
}

impl ArchiveConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the archive file name.
    #[must_use]
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Sets the fallback title.
    #[must_use]
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }
}

/// Configuration for the Gemini summarizer.
///
/// The API key is never stored here; only the name of the environment
/// variable that holds it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model name (default: `gemini-1.5-flash`)
    pub model: String,

    /// Environment variable holding the API key (default: `GEMINI_API_KEY`)
    pub api_key_env: String,

    /// API base URL
    pub endpoint: String,

    /// Per-request timeout in seconds (default: 45)
    pub timeout_secs: u64,

    /// Extra attempts after a failed request (default: 2)
    pub max_retries: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 45,
            max_retries: 2,
        }
    }
}

impl GeminiConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_api_key_env(mut self, var: impl Into<String>) -> Self {
        self.api_key_env = var.into();
        self
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }
}
