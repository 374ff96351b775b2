//! Core processing logic for chatmigrate.
//!
//! This module contains:
//! - [`models`] - Conversation, Project and output configuration
//! - [`classify`] - Project labels from conversation titles
//! - [`processor`] - Archive loading, reconstruction and project grouping
//! - [`output`] - Format writers (text, JSON, per-project JSON)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chatmigrate::core::{ArchiveProcessor, OutputConfig, group_by_project, write_text};
//!
//! let conversations = ArchiveProcessor::new().process("export".as_ref())?;
//! write_text(&conversations, "chatgpt_export.txt", &OutputConfig::new())?;
//! let projects = group_by_project(&conversations);
//! # Ok::<(), chatmigrate::MigrateError>(())
//! ```

pub mod classify;
pub mod models;
pub mod output;
pub mod processor;

// Re-export main types for convenience
pub use classify::{FALLBACK_PROJECT, classify};
pub use models::{Conversation, OutputConfig, Project};
pub use output::{
    ProjectWriteStats, from_json, to_json, to_text, write_json, write_projects, write_text,
};
pub use processor::{ArchiveProcessor, ProcessingStats, group_by_project};

// Re-export Message from the crate root
pub use crate::Message;
