//! Output format types for the chatmigrate library.
//!
//! This module provides library-first format types that don't depend on CLI
//! frameworks, plus the two per-format policies every writer takes:
//! - [`RoleMapping`] - which role vocabulary a format speaks
//! - [`JsonShape`] - which JSON layout a conversation is written in
//!
//! # Example
//!
//! ```rust,no_run
//! # fn example() -> chatmigrate::Result<()> {
//! use chatmigrate::format::{OutputFormat, write_to_format};
//! use chatmigrate::core::models::OutputConfig;
//! use chatmigrate::{Conversation, Message};
//!
//! let convos = vec![Conversation::new("Hello", vec![Message::new("user", "Hi")])];
//!
//! write_to_format(&convos, "chat.txt", OutputFormat::Text, &OutputConfig::new())?;
//! write_to_format(&convos, "gemini.json", OutputFormat::Gemini, &OutputConfig::new())?;
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::core::models::{Conversation, OutputConfig};
use crate::core::output::{write_json, write_text};
use crate::error::Result;

/// Role vocabulary applied when a conversation is written.
///
/// Reconstruction keeps the export's roles untouched; each writer maps them
/// on the way out.
///
/// # Example
///
/// ```rust
/// use chatmigrate::format::RoleMapping;
///
/// assert_eq!(RoleMapping::Preserve.apply("assistant"), "assistant");
/// assert_eq!(RoleMapping::Gemini.apply("assistant"), "model");
/// assert_eq!(RoleMapping::Gemini.apply("user"), "user");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleMapping {
    /// Roles as the export recorded them
    #[default]
    Preserve,

    /// `assistant` becomes `model`, as Gemini chat history expects
    Gemini,
}

impl RoleMapping {
    pub fn apply<'a>(&self, role: &'a str) -> &'a str {
        match (self, role) {
            (RoleMapping::Gemini, "assistant") => "model",
            _ => role,
        }
    }
}

/// JSON layout of a written conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonShape {
    /// `{"title", "messages": [{"role", "content"}]}`
    #[default]
    Messages,

    /// `{"title", "history": [{"role", "parts": [{"text"}]}]}`
    History,
}

impl JsonShape {
    /// Role mapping this shape uses unless overridden.
    pub fn default_role_mapping(&self) -> RoleMapping {
        match self {
            JsonShape::Messages => RoleMapping::Preserve,
            JsonShape::History => RoleMapping::Gemini,
        }
    }
}

impl std::fmt::Display for JsonShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonShape::Messages => write!(f, "messages"),
            JsonShape::History => write!(f, "history"),
        }
    }
}

impl std::str::FromStr for JsonShape {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "messages" => Ok(JsonShape::Messages),
            "history" | "gemini" => Ok(JsonShape::History),
            _ => Err(format!(
                "Unknown JSON shape: '{}'. Expected one of: messages, history",
                s
            )),
        }
    }
}

/// Flat (single-file) output formats.
///
/// Project output is directory-based and written with
/// [`write_projects`](crate::core::output::write_projects) instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Human-readable transcript
    Text,

    /// JSON array in the `messages` shape
    Json,

    /// JSON array in the `history` shape, roles mapped for Gemini
    Gemini,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json | OutputFormat::Gemini => "json",
        }
    }

    /// Returns the output file used when none is given.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            OutputFormat::Text => "chatgpt_export.txt",
            OutputFormat::Json => "chatgpt_export.json",
            OutputFormat::Gemini => "gemini_archive.json",
        }
    }

    /// Returns the role mapping this format uses unless overridden.
    pub fn default_role_mapping(&self) -> RoleMapping {
        match self {
            OutputFormat::Text | OutputFormat::Json => RoleMapping::Preserve,
            OutputFormat::Gemini => RoleMapping::Gemini,
        }
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Text, OutputFormat::Json, OutputFormat::Gemini]
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Gemini => write!(f, "Gemini JSON"),
        }
    }
}

/// Writes conversations to a file in the specified format.
pub fn write_to_format(
    conversations: &[Conversation],
    output_path: &str,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(conversations, output_path, config),
        OutputFormat::Json => write_json(conversations, output_path, JsonShape::Messages, config),
        OutputFormat::Gemini => write_json(conversations, output_path, JsonShape::History, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_mapping_apply() {
        assert_eq!(RoleMapping::Preserve.apply("assistant"), "assistant");
        assert_eq!(RoleMapping::Gemini.apply("assistant"), "model");
        assert_eq!(RoleMapping::Gemini.apply("tool"), "tool");
    }

    #[test]
    fn test_shape_defaults() {
        assert_eq!(JsonShape::Messages.default_role_mapping(), RoleMapping::Preserve);
        assert_eq!(JsonShape::History.default_role_mapping(), RoleMapping::Gemini);
    }

    #[test]
    fn test_shape_from_str() {
        assert_eq!("messages".parse::<JsonShape>().unwrap(), JsonShape::Messages);
        assert_eq!("HISTORY".parse::<JsonShape>().unwrap(), JsonShape::History);
        assert_eq!("gemini".parse::<JsonShape>().unwrap(), JsonShape::History);
        assert!("xml".parse::<JsonShape>().is_err());
    }

    #[test]
    fn test_format_defaults() {
        assert_eq!(OutputFormat::Text.extension(), "txt");
        assert_eq!(OutputFormat::Gemini.extension(), "json");
        assert_eq!(OutputFormat::Json.default_file_name(), "chatgpt_export.json");
        assert_eq!(OutputFormat::Gemini.default_role_mapping(), RoleMapping::Gemini);
        assert_eq!(OutputFormat::all().len(), 3);
    }

    #[test]
    fn test_write_to_format_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let convos = vec![Conversation::new(
            "Chat",
            vec![crate::Message::new("assistant", "Hi")],
        )];

        let gemini = dir.path().join("g.json");
        write_to_format(
            &convos,
            gemini.to_str().unwrap(),
            OutputFormat::Gemini,
            &OutputConfig::new(),
        )
        .unwrap();
        let content = std::fs::read_to_string(&gemini).unwrap();
        assert!(content.contains(r#""history""#));
        assert!(content.contains(r#""role": "model""#));

        let text = dir.path().join("t.txt");
        write_to_format(
            &convos,
            text.to_str().unwrap(),
            OutputFormat::Text,
            &OutputConfig::new(),
        )
        .unwrap();
        assert!(std::fs::read_to_string(&text).unwrap().contains("Assistant:\nHi"));
    }
}
