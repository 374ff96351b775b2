//! Linear conversation reconstruction.
//!
//! ChatGPT keeps every edit and regeneration as a branch in a node graph.
//! Only the path from the root to `current_node` is the conversation the user
//! saw last, so reconstruction walks that path backwards through the parent
//! links and reverses the collected turns.
//!
//! Nodes are skipped, never rejected, when they carry nothing to show:
//! - no `message`, or a message without an author role
//! - a `system` author
//! - content whose parts join to an empty string
//!
//! A skipped node still forwards the walk to its parent.
//!
//! # Example
//!
//! ```
//! use chatmigrate::parsing::RawConversation;
//! use chatmigrate::reconstruct::reconstruct;
//!
//! let record: RawConversation = serde_json::from_str(r#"{
//!     "title": "Greeting",
//!     "current_node": "node1",
//!     "mapping": {
//!         "node1": {"id": "node1", "message": {"author": {"role": "user"}, "content": {"parts": ["Hello"]}}, "parent": "node0"},
//!         "node0": {"id": "node0", "message": {"author": {"role": "assistant"}, "content": {"parts": ["Hi there!"]}}}
//!     }
//! }"#)?;
//!
//! let convo = reconstruct(&record);
//! assert_eq!(convo.messages[0].text, "Hi there!");
//! assert_eq!(convo.messages[1].text, "Hello");
//! # Ok::<(), serde_json::Error>(())
//! ```

use std::collections::HashMap;

use crate::Message;
use crate::config::ArchiveConfig;
use crate::core::models::Conversation;
use crate::parsing::chatgpt::{NodeGraph, RawConversation, RawNode, parse_unix_seconds};

/// Role whose messages never appear in reconstructed output.
pub const SYSTEM_ROLE: &str = "system";

/// Rebuilds [`Conversation`]s from raw export records.
#[derive(Debug, Clone)]
pub struct ConversationReconstructor {
    default_title: String,
}

impl Default for ConversationReconstructor {
    fn default() -> Self {
        Self::with_config(&ArchiveConfig::default())
    }
}

impl ConversationReconstructor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &ArchiveConfig) -> Self {
        Self {
            default_title: config.default_title.clone(),
        }
    }

    /// Reconstructs the active branch of `record`.
    ///
    /// Callers are expected to drop records without a mapping first (see
    /// [`RawConversation::has_mapping`]); such a record yields a conversation
    /// with no messages.
    pub fn reconstruct(&self, record: &RawConversation) -> Conversation {
        let empty = HashMap::new();
        let graph = NodeGraph::new(record.mapping.as_ref().unwrap_or(&empty));

        let mut walk = graph.ancestors(record.current_node.as_deref());
        let mut messages: Vec<Message> = walk
            .by_ref()
            .filter_map(|(_, node)| message_from_node(node))
            .collect();

        if walk.hit_step_limit() {
            tracing::warn!(
                conversation = record.identifier().unwrap_or_default(),
                nodes = graph.len(),
                "parent links loop; stopped after visiting every node once"
            );
        }

        // Collected leaf first.
        messages.reverse();

        let title = record
            .title
            .clone()
            .unwrap_or_else(|| self.default_title.clone());

        let mut convo = Conversation::new(title, messages);
        convo.id = record.identifier().map(ToString::to_string);
        convo.created_at = record.create_time.and_then(parse_unix_seconds);
        convo.updated_at = record.update_time.and_then(parse_unix_seconds);
        convo
    }
}

/// Reconstructs with the default configuration.
pub fn reconstruct(record: &RawConversation) -> Conversation {
    ConversationReconstructor::default().reconstruct(record)
}

/// Turns a node into a message, or `None` if it has nothing to contribute.
fn message_from_node(node: &RawNode) -> Option<Message> {
    let raw = node.message.as_ref()?;
    let role = raw.role()?;
    if role == SYSTEM_ROLE {
        return None;
    }

    let text = raw.text();
    if text.is_empty() {
        return None;
    }

    let mut message = Message::new(role, text);
    message.timestamp = raw.timestamp();
    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> RawConversation {
        serde_json::from_value(value).unwrap()
    }

    fn node(role: &str, parts: serde_json::Value, parent: Option<&str>) -> serde_json::Value {
        json!({
            "message": {"author": {"role": role}, "content": {"content_type": "text", "parts": parts}},
            "parent": parent
        })
    }

    fn texts(convo: &Conversation) -> Vec<(&str, &str)> {
        convo
            .messages
            .iter()
            .map(|m| (m.role.as_str(), m.text.as_str()))
            .collect()
    }

    #[test]
    fn test_two_node_conversation() {
        let convo = reconstruct(&record(json!({
            "title": "Test Conversation",
            "current_node": "node1",
            "mapping": {
                "node1": {"id": "node1", "message": {"author": {"role": "user"}, "content": {"parts": ["Hello"]}}, "parent": "node0"},
                "node0": {"id": "node0", "message": {"author": {"role": "assistant"}, "content": {"parts": ["Hi there!"]}}}
            }
        })));

        assert_eq!(convo.title, "Test Conversation");
        assert_eq!(
            texts(&convo),
            vec![("assistant", "Hi there!"), ("user", "Hello")]
        );
    }

    #[test]
    fn test_system_nodes_skipped_anywhere() {
        let convo = reconstruct(&record(json!({
            "current_node": "d",
            "mapping": {
                "a": node("system", json!(["root prompt"]), None),
                "b": node("user", json!(["Q"]), Some("a")),
                "c": node("system", json!(["mid prompt"]), Some("b")),
                "d": node("assistant", json!(["A"]), Some("c"))
            }
        })));
        assert_eq!(texts(&convo), vec![("user", "Q"), ("assistant", "A")]);
    }

    #[test]
    fn test_empty_content_keeps_ascending() {
        let convo = reconstruct(&record(json!({
            "current_node": "d",
            "mapping": {
                "a": node("user", json!(["first"]), None),
                "b": {"message": null, "parent": "a"},
                "c": node("assistant", json!([]), Some("b")),
                "d": node("user", json!(["", {"text": ""}]), Some("c")),
            }
        })));
        assert_eq!(texts(&convo), vec![("user", "first")]);
    }

    #[test]
    fn test_mixed_parts_concatenate_in_order() {
        let convo = reconstruct(&record(json!({
            "current_node": "a",
            "mapping": {
                "a": node("assistant", json!(["one ", {"text": "two"}, {"asset_pointer": "x"}, " three"]), None)
            }
        })));
        assert_eq!(texts(&convo), vec![("assistant", "one two three")]);
    }

    #[test]
    fn test_orphan_branches_ignored() {
        let convo = reconstruct(&record(json!({
            "current_node": "b2",
            "mapping": {
                "a": node("user", json!(["Q"]), None),
                "b1": node("assistant", json!(["old answer"]), Some("a")),
                "b2": node("assistant", json!(["new answer"]), Some("a")),
                "orphan": node("user", json!(["lost"]), Some("missing"))
            }
        })));
        assert_eq!(texts(&convo), vec![("user", "Q"), ("assistant", "new answer")]);
    }

    #[test]
    fn test_missing_author_and_content_are_skipped() {
        let convo = reconstruct(&record(json!({
            "current_node": "c",
            "mapping": {
                "a": node("user", json!(["kept"]), None),
                "b": {"message": {"content": {"parts": ["no author"]}}, "parent": "a"},
                "c": {"message": {"author": {"role": "assistant"}}, "parent": "b"}
            }
        })));
        assert_eq!(texts(&convo), vec![("user", "kept")]);
    }

    #[test]
    fn test_truncated_graph_treats_unknown_parent_as_root() {
        let convo = reconstruct(&record(json!({
            "current_node": "b",
            "mapping": {
                "b": node("assistant", json!(["tail"]), Some("pruned"))
            }
        })));
        assert_eq!(texts(&convo), vec![("assistant", "tail")]);
    }

    #[test]
    fn test_default_title() {
        let convo = reconstruct(&record(json!({
            "current_node": "a",
            "mapping": {"a": node("user", json!(["x"]), None)}
        })));
        assert_eq!(convo.title, "Untitled Conversation");

        let custom = ArchiveConfig::new().with_default_title("(no title)");
        let convo = ConversationReconstructor::with_config(&custom).reconstruct(&record(json!({
            "title": null,
            "current_node": "a",
            "mapping": {"a": node("user", json!(["x"]), None)}
        })));
        assert_eq!(convo.title, "(no title)");
    }

    #[test]
    fn test_missing_current_node_yields_no_messages() {
        let convo = reconstruct(&record(json!({
            "title": "Empty",
            "mapping": {"a": node("user", json!(["x"]), None)}
        })));
        assert!(convo.is_empty());
    }

    #[test]
    fn test_metadata_carried_over() {
        let convo = reconstruct(&record(json!({
            "title": "Meta",
            "id": "fallback-id",
            "conversation_id": "conv-123",
            "create_time": 1705314600.0,
            "update_time": 1705318200.25,
            "current_node": "a",
            "mapping": {"a": {
                "message": {"author": {"role": "user"}, "content": {"parts": ["x"]}, "create_time": 1705314601.0},
                "parent": null
            }}
        })));
        assert_eq!(convo.id.as_deref(), Some("conv-123"));
        assert_eq!(convo.created_at.unwrap().timestamp(), 1705314600);
        assert_eq!(convo.updated_at.unwrap().timestamp(), 1705318200);
        assert_eq!(convo.messages[0].timestamp.unwrap().timestamp(), 1705314601);
    }

    #[test]
    fn test_cyclic_parents_terminate() {
        let convo = reconstruct(&record(json!({
            "current_node": "a",
            "mapping": {
                "a": node("user", json!(["A"]), Some("b")),
                "b": node("assistant", json!(["B"]), Some("a"))
            }
        })));
        assert_eq!(texts(&convo), vec![("assistant", "B"), ("user", "A")]);
    }
}
