//! Flat JSON writer and reader.

use std::fs::File;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::core::models::{Conversation, OutputConfig};
use crate::error::Result;
use crate::format::{JsonShape, RoleMapping};

#[derive(Debug, Serialize, Deserialize)]
struct JsonMessage {
    role: String,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonPart {
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonHistoryEntry {
    role: String,
    parts: Vec<JsonPart>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum JsonBody {
    Messages { messages: Vec<JsonMessage> },
    History { history: Vec<JsonHistoryEntry> },
}

/// One conversation as written to JSON output.
///
/// Shared with the project writer, which adds `summary`.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct JsonConversation {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    body: JsonBody,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    summary: Option<String>,
}

impl JsonConversation {
    pub(crate) fn from_conversation(
        convo: &Conversation,
        shape: JsonShape,
        config: &OutputConfig,
    ) -> Self {
        let mapping = config.role_mapping_or(shape.default_role_mapping());
        let stamp = |ts: Option<DateTime<Utc>>| ts.filter(|_| config.include_timestamps);

        let body = match shape {
            JsonShape::Messages => JsonBody::Messages {
                messages: convo
                    .messages
                    .iter()
                    .map(|m| JsonMessage {
                        role: mapping.apply(&m.role).to_string(),
                        content: m.text.clone(),
                        timestamp: stamp(m.timestamp),
                    })
                    .collect(),
            },
            JsonShape::History => JsonBody::History {
                history: convo
                    .messages
                    .iter()
                    .map(|m| JsonHistoryEntry {
                        role: mapping.apply(&m.role).to_string(),
                        parts: vec![JsonPart {
                            text: m.text.clone(),
                        }],
                        timestamp: stamp(m.timestamp),
                    })
                    .collect(),
            },
        };

        Self {
            title: convo.title.clone(),
            id: convo.id.clone().filter(|_| config.include_timestamps),
            created_at: stamp(convo.created_at),
            updated_at: stamp(convo.updated_at),
            body,
            summary: None,
        }
    }

    #[must_use]
    pub(crate) fn with_summary(mut self, summary: Option<String>) -> Self {
        self.summary = summary;
        self
    }

    fn into_conversation(self) -> Conversation {
        let messages = match self.body {
            JsonBody::Messages { messages } => messages
                .into_iter()
                .map(|m| Message {
                    role: m.role,
                    text: m.content,
                    timestamp: m.timestamp,
                })
                .collect(),
            JsonBody::History { history } => history
                .into_iter()
                .map(|h| Message {
                    role: if h.role == "model" {
                        "assistant".to_string()
                    } else {
                        h.role
                    },
                    text: h.parts.into_iter().map(|p| p.text).collect(),
                    timestamp: h.timestamp,
                })
                .collect(),
        };

        Conversation {
            title: self.title,
            messages,
            id: self.id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Writes conversations to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {
///     "title": "Greeting",
///     "messages": [
///       {"role": "assistant", "content": "Hi there!"},
///       {"role": "user", "content": "Hello"}
///     ]
///   }
/// ]
/// ```
///
/// With [`JsonShape::History`] each message becomes
/// `{"role": "model", "parts": [{"text": "Hi there!"}]}` under `history`.
pub fn write_json(
    conversations: &[Conversation],
    output_path: &str,
    shape: JsonShape,
    config: &OutputConfig,
) -> Result<()> {
    let json = to_json(conversations, shape, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts conversations to a pretty-printed JSON array.
pub fn to_json(
    conversations: &[Conversation],
    shape: JsonShape,
    config: &OutputConfig,
) -> Result<String> {
    let json_convos: Vec<JsonConversation> = conversations
        .iter()
        .map(|c| JsonConversation::from_conversation(c, shape, config))
        .collect();

    Ok(serde_json::to_string_pretty(&json_convos)?)
}

/// Reads conversations back from JSON written by [`to_json`].
///
/// Both shapes are accepted; `model` roles in `history` entries are read
/// back as `assistant`, and a `summary` field is ignored.
pub fn from_json(content: &str) -> Result<Vec<Conversation>> {
    let json_convos: Vec<JsonConversation> = serde_json::from_str(content)?;
    Ok(json_convos
        .into_iter()
        .map(JsonConversation::into_conversation)
        .collect())
}
