//! Raw export decoding.
//!
//! This module holds the serde views of the export document and the
//! read-only [`NodeGraph`] the reconstructor walks.

pub mod chatgpt;

// Re-export commonly used items
pub use chatgpt::{
    Ancestors, NodeGraph, RawConversation, RawMessage, RawNode, extract_parts_text,
    parse_unix_seconds,
};
