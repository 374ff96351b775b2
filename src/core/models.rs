//! Core data models: reconstructed conversations, project buckets and
//! serializer configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::format::RoleMapping;

/// A conversation recovered from the export, oldest message first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Conversation title
    pub title: String,
    /// Messages in root-to-leaf order
    pub messages: Vec<Message>,
    /// Export identifier (`conversation_id` or `id`)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Conversation {
    /// Creates a conversation with no metadata.
    pub fn new(title: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            title: title.into(),
            messages,
            id: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_created_at(mut self, ts: DateTime<Utc>) -> Self {
        self.created_at = Some(ts);
        self
    }

    #[must_use]
    pub fn with_updated_at(mut self, ts: DateTime<Utc>) -> Self {
        self.updated_at = Some(ts);
        self
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Conversations sharing a project label.
///
/// The name is derived from titles by
/// [`classify`](crate::core::classify::classify) and is not unique across
/// exports; `General` collects everything without a recognizable label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    /// Conversations in the order they were first seen
    pub conversations: Vec<Conversation>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            conversations: Vec::new(),
        }
    }
}

/// Configuration for output writers.
///
/// Controls optional metadata and, when set, overrides the role vocabulary
/// a format would otherwise use.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Include conversation ids and timestamps in output
    pub include_timestamps: bool,
    /// Role mapping override; `None` uses the format's own
    pub role_mapping: Option<RoleMapping>,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.include_timestamps = true;
        self
    }

    #[must_use]
    pub fn with_role_mapping(mut self, mapping: RoleMapping) -> Self {
        self.role_mapping = Some(mapping);
        self
    }

    /// Returns the override if present, `default` otherwise.
    pub fn role_mapping_or(&self, default: RoleMapping) -> RoleMapping {
        self.role_mapping.unwrap_or(default)
    }
}
