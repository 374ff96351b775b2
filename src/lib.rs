//! # Chatmigrate
//!
//! A Rust library for turning a ChatGPT data export into plain, linear
//! conversations that other tools (or other assistants) can read.
//!
//! ## Overview
//!
//! A ChatGPT export stores every conversation as a tree of message nodes:
//! each regeneration or edit forks a new branch. Chatmigrate walks the
//! branch the user last saw (from `current_node` up through `parent`
//! links), drops system prompts and empty nodes, and writes the result as:
//! - **Text** - a readable transcript (`chatgpt_export.txt`)
//! - **JSON** - `{title, messages: [{role, content}]}` records
//! - **Gemini JSON** - `{title, history: [{role, parts: [{text}]}]}` records
//! - **Projects** - one JSON file per project label derived from titles,
//!   optionally with a generated summary per conversation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatmigrate::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // Reads <export>/conversations.json
//!     let conversations = ArchiveProcessor::new().process("export".as_ref())?;
//!
//!     write_text(&conversations, "chatgpt_export.txt", &OutputConfig::new())?;
//!     write_json(&conversations, "gemini_archive.json", JsonShape::History, &OutputConfig::new())?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`] - Lenient export records and the node-graph walk
//! - [`reconstruct`] - [`ConversationReconstructor`](reconstruct::ConversationReconstructor)
//! - [`core`] - Core types and functionality
//!   - [`core::models`] - [`Conversation`], [`Project`], [`OutputConfig`](core::OutputConfig)
//!   - [`core::classify`] - Project labels from titles
//!   - [`core::processor`] - [`ArchiveProcessor`](core::ArchiveProcessor), [`group_by_project`](core::group_by_project)
//!   - [`core::output`] - Text, JSON and per-project writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat), [`JsonShape`](format::JsonShape), [`RoleMapping`](format::RoleMapping)
//! - [`summarize`] - [`Summarizer`](summarize::Summarizer) and the Gemini implementation
//! - [`config`] - Archive and Gemini configuration
//! - [`error`] - Unified error types ([`MigrateError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parsing;
pub mod reconstruct;
pub mod summarize;

// Re-export the main types at the crate root for convenience
pub use core::models::{Conversation, Project};
pub use error::{MigrateError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatmigrate::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Message;
    pub use crate::core::models::{Conversation, OutputConfig, Project};

    // Error types
    pub use crate::error::{MigrateError, Result};

    // Configuration
    pub use crate::config::{ArchiveConfig, GeminiConfig};

    // Reconstruction
    pub use crate::reconstruct::ConversationReconstructor;

    // Processing
    pub use crate::core::classify::classify;
    pub use crate::core::processor::{ArchiveProcessor, ProcessingStats, group_by_project};

    // Output
    pub use crate::core::output::{
        ProjectWriteStats, from_json, to_json, to_text, write_json, write_projects, write_text,
    };
    pub use crate::format::{JsonShape, OutputFormat, RoleMapping, write_to_format};

    // Summaries
    pub use crate::summarize::Summarizer;
    #[cfg(feature = "gemini")]
    pub use crate::summarize::GeminiSummarizer;
}
