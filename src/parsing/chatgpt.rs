//! Raw ChatGPT export structures and the node graph built over them.
//!
//! A ChatGPT `conversations.json` file is an array of conversation records.
//! Each record stores its turns in a `mapping` table of nodes linked by
//! `parent` ids; `current_node` names the leaf of the branch that was active
//! at export time.
//!
//! Every field here is decoded leniently: a value of the wrong shape is
//! treated exactly like a missing one, so one odd node never costs the rest
//! of the record.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decodes `T` if the value has the right shape, `None` otherwise.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like [`lenient`], for struct-valued fields: only an object decodes.
///
/// serde fills a struct from an array by position, which would turn
/// `["user", ...]` into a bogus author.
fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => Ok(serde_json::from_value(value).ok()),
        _ => Ok(None),
    }
}

/// Decodes the node table, turning non-object nodes into empty ones.
fn lenient_nodes<'de, D>(deserializer: D) -> Result<Option<HashMap<String, RawNode>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(entries) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };

    let nodes = entries
        .into_iter()
        .map(|(id, node)| {
            let node = match node {
                Value::Object(_) => serde_json::from_value(node).unwrap_or_default(),
                _ => RawNode::default(),
            };
            (id, node)
        })
        .collect();
    Ok(Some(nodes))
}

/// One conversation record from the export.
#[derive(Debug, Default, Deserialize)]
pub struct RawConversation {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    /// Leaf node of the active branch
    #[serde(default, deserialize_with = "lenient")]
    pub current_node: Option<String>,
    #[serde(default, deserialize_with = "lenient_nodes")]
    pub mapping: Option<HashMap<String, RawNode>>,
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub conversation_id: Option<String>,
    /// Unix seconds (fractional)
    #[serde(default, deserialize_with = "lenient")]
    pub create_time: Option<f64>,
    /// Unix seconds (fractional)
    #[serde(default, deserialize_with = "lenient")]
    pub update_time: Option<f64>,
}

impl RawConversation {
    /// Returns `true` if the record carries a non-empty node table.
    ///
    /// Records without one have nothing to reconstruct and are skipped
    /// before reconstruction.
    pub fn has_mapping(&self) -> bool {
        self.mapping.as_ref().is_some_and(|m| !m.is_empty())
    }

    /// Returns the record's identifier, preferring `conversation_id`.
    pub fn identifier(&self) -> Option<&str> {
        self.conversation_id.as_deref().or(self.id.as_deref())
    }
}

/// A node of the conversation graph.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawNode {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub message: Option<RawMessage>,
    #[serde(default, deserialize_with = "lenient")]
    pub parent: Option<String>,
}

/// The message payload attached to a node.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawMessage {
    #[serde(default, deserialize_with = "lenient_object")]
    pub author: Option<RawAuthor>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub content: Option<RawContent>,
    #[serde(default, deserialize_with = "lenient")]
    pub create_time: Option<f64>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawAuthor {
    #[serde(default, deserialize_with = "lenient")]
    pub role: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawContent {
    /// Strings, `{"text": ...}` objects, or anything else (ignored)
    #[serde(default, deserialize_with = "lenient")]
    pub parts: Option<Vec<Value>>,
}

impl RawMessage {
    /// Returns the author role, if recorded.
    pub fn role(&self) -> Option<&str> {
        self.author.as_ref()?.role.as_deref()
    }

    /// Returns the joined text of all content parts.
    ///
    /// Empty when there is no content or no parts.
    pub fn text(&self) -> String {
        self.content
            .as_ref()
            .and_then(|c| c.parts.as_deref())
            .map(extract_parts_text)
            .unwrap_or_default()
    }

    /// Returns the creation time, if recorded.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.create_time.and_then(parse_unix_seconds)
    }
}

/// Joins content parts in source order.
///
/// Each part may be:
/// - A plain string: `"Hello"`
/// - An object with a `text` field: `{"text": "Hello"}`
/// - Anything else (image pointers, nulls): contributes nothing
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use chatmigrate::parsing::chatgpt::extract_parts_text;
///
/// let parts = vec![json!("Look: "), json!({"text": "here"}), json!(null), json!("!")];
/// assert_eq!(extract_parts_text(&parts), "Look: here!");
/// ```
pub fn extract_parts_text(parts: &[Value]) -> String {
    parts
        .iter()
        .filter_map(|part| match part {
            Value::String(s) => Some(s.as_str()),
            Value::Object(obj) => obj.get("text").and_then(Value::as_str),
            _ => None,
        })
        .collect()
}

/// Converts fractional Unix seconds to a UTC timestamp.
///
/// ChatGPT stores times like `1705314600.123456`.
pub fn parse_unix_seconds(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.trunc();
    let nanos = ((secs - whole) * 1e9).round().clamp(0.0, 999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}

/// Read-only view over a record's node table.
///
/// Lookups are constant time. A parent id that is missing from the table
/// marks the root of the walk rather than an error, so truncated exports
/// still reconstruct their surviving tail.
#[derive(Debug, Clone, Copy)]
pub struct NodeGraph<'a> {
    nodes: &'a HashMap<String, RawNode>,
}

impl<'a> NodeGraph<'a> {
    pub fn new(nodes: &'a HashMap<String, RawNode>) -> Self {
        Self { nodes }
    }

    /// Looks up a node by id.
    pub fn get(&self, id: &str) -> Option<&'a RawNode> {
        self.nodes.get(id)
    }

    /// Returns the parent id of `id`, if the node exists and names one.
    pub fn parent_of(&self, id: &str) -> Option<&'a str> {
        self.get(id)?.parent.as_deref()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walks from `start` up the parent chain, leaf first.
    ///
    /// The walk ends at a null or empty id, or at an id that is not in the
    /// table. It also ends after visiting as many nodes as the table holds,
    /// which a parent chain without cycles never reaches; see
    /// [`Ancestors::hit_step_limit`].
    pub fn ancestors(&self, start: Option<&'a str>) -> Ancestors<'a> {
        Ancestors {
            graph: *self,
            cursor: start,
            remaining: self.nodes.len(),
            hit_step_limit: false,
        }
    }
}

/// Iterator over `(id, node)` pairs from a leaf towards its root.
#[derive(Debug)]
pub struct Ancestors<'a> {
    graph: NodeGraph<'a>,
    cursor: Option<&'a str>,
    remaining: usize,
    hit_step_limit: bool,
}

impl Ancestors<'_> {
    /// Returns `true` if the walk stopped because it visited every node
    /// while a resolvable parent remained, i.e. the chain loops.
    pub fn hit_step_limit(&self) -> bool {
        self.hit_step_limit
    }
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (&'a str, &'a RawNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor.filter(|id| !id.is_empty())?;
        let node = self.graph.get(id)?;

        if self.remaining == 0 {
            self.hit_step_limit = true;
            self.cursor = None;
            return None;
        }
        self.remaining -= 1;

        self.cursor = node.parent.as_deref();
        Some((id, node))
    }
}
