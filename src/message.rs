//! Reconstructed conversation turn.
//!
//! This module provides [`Message`], one role-tagged turn recovered from the
//! export's node graph. A message carries the author role exactly as the
//! export recorded it (`user`, `assistant`, `tool`, ...). Output formats that
//! need a different vocabulary, such as Gemini's `model`, apply a
//! [`RoleMapping`](crate::format::RoleMapping) at write time.
//!
//! # Examples
//!
//! ```
//! use chatmigrate::Message;
//!
//! let msg = Message::new("assistant", "Hi there!");
//! assert_eq!(msg.role(), "assistant");
//! assert_eq!(msg.text(), "Hi there!");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single turn of a reconstructed conversation.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `role` | `String` | Author role as recorded by the export |
/// | `text` | `String` | Concatenated text of all content parts, never empty |
/// | `timestamp` | `Option<DateTime<Utc>>` | The node's `create_time`, if present |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Author role (`user`, `assistant`, `tool`, ...).
    pub role: String,

    /// Message text.
    pub text: String,

    /// When the message was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Message {
    /// Creates a message without a timestamp.
    pub fn new(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            text: text.into(),
            timestamp: None,
        }
    }

    /// Builder method to set the timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.timestamp = Some(ts);
        self
    }

    /// Returns the author role.
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Returns the message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the creation time, if the export recorded one.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }
}
