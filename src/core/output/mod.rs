//! Output format writers.
//!
//! This module provides writers for the supported outputs:
//! - [`write_text`] / [`to_text`] - human-readable transcript
//! - [`write_json`] / [`to_json`] - JSON array in either [`JsonShape`](crate::format::JsonShape)
//! - [`write_projects`] - one JSON file per project directory, optionally summarized
//! - [`from_json`] - reads flat JSON output back into conversations
//!
//! Every writer consumes already reconstructed conversations; none of them
//! parse export data.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> chatmigrate::Result<()> {
//! use chatmigrate::core::output::{write_json, write_text};
//! use chatmigrate::core::models::OutputConfig;
//! use chatmigrate::format::JsonShape;
//! use chatmigrate::{Conversation, Message};
//!
//! let convos = vec![Conversation::new("Greeting", vec![Message::new("user", "Hello")])];
//!
//! write_text(&convos, "chatgpt_export.txt", &OutputConfig::new())?;
//! write_json(&convos, "gemini_archive.json", JsonShape::History, &OutputConfig::new())?;
//! # Ok(())
//! # }
//! ```

mod json_writer;
mod project_writer;
mod text_writer;

pub use json_writer::{from_json, to_json, write_json};
pub use project_writer::{ProjectWriteStats, project_slug, write_projects};
pub use text_writer::{CONVERSATION_SEPARATOR, to_text, write_text};
