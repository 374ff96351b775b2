//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`Shape`] - JSON layout choice for project output
//!
//! Every output flag takes an optional path; given bare, it falls back to
//! the format's default file name.
//!
//! ```rust
//! use chatmigrate::cli::Args;
//! use chatmigrate::format::OutputFormat;
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatmigrate", "export", "--gemini"]);
//! assert_eq!(
//!     args.flat_outputs(),
//!     vec![(OutputFormat::Gemini, "gemini_archive.json".to_string())]
//! );
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::format::{JsonShape, OutputFormat};

/// Default directory for `--projects` given without a value.
pub const DEFAULT_PROJECTS_DIR: &str = "projects";

/// Rebuild linear conversations from a ChatGPT data export.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatmigrate")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatmigrate ./export
    chatmigrate ./export --txt --json
    chatmigrate ./export --gemini archive.json
    chatmigrate ./export --projects out --shape history --summarize

EXIT STATUS:
    0  outputs written, or no conversations found (nothing is written)
    1  INPUT_DIR has no conversations.json, or the archive or an output failed")]
pub struct Args {
    /// Directory holding the unpacked export (must contain conversations.json)
    pub input_dir: PathBuf,

    /// Write a plain-text transcript
    #[arg(
        long,
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = "chatgpt_export.txt"
    )]
    pub txt: Option<String>,

    /// Write a JSON array of {title, messages}
    #[arg(
        long,
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = "chatgpt_export.json"
    )]
    pub json: Option<String>,

    /// Write a JSON array of {title, history} with Gemini roles
    #[arg(
        long,
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = "gemini_archive.json"
    )]
    pub gemini: Option<String>,

    /// Write one JSON file per project under this directory
    #[arg(
        long,
        value_name = "DIR",
        num_args = 0..=1,
        default_missing_value = DEFAULT_PROJECTS_DIR
    )]
    pub projects: Option<PathBuf>,

    /// JSON layout used for project files
    #[arg(long, value_enum, default_value = "messages")]
    pub shape: Shape,

    /// Add a generated summary to each project entry (needs GEMINI_API_KEY)
    #[arg(long)]
    pub summarize: bool,

    /// Include conversation ids and timestamps in output
    #[arg(short = 't', long)]
    pub timestamps: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Returns `true` if any output flag was given.
    pub fn has_output(&self) -> bool {
        self.txt.is_some()
            || self.json.is_some()
            || self.gemini.is_some()
            || self.projects.is_some()
    }

    /// Single-file outputs in writing order, with the text default applied
    /// when no output was requested at all.
    pub fn flat_outputs(&self) -> Vec<(OutputFormat, String)> {
        if !self.has_output() {
            return vec![(
                OutputFormat::Text,
                OutputFormat::Text.default_file_name().to_string(),
            )];
        }

        [
            (OutputFormat::Text, &self.txt),
            (OutputFormat::Json, &self.json),
            (OutputFormat::Gemini, &self.gemini),
        ]
        .into_iter()
        .filter_map(|(format, path)| path.clone().map(|p| (format, p)))
        .collect()
    }
}

/// JSON layout for project files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// `{title, messages: [{role, content}]}`
    #[default]
    Messages,

    /// `{title, history: [{role, parts: [{text}]}]}` with `model` roles
    #[value(alias = "gemini")]
    History,
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", JsonShape::from(*self))
    }
}

// Conversion to library shape type
impl From<Shape> for JsonShape {
    fn from(shape: Shape) -> JsonShape {
        match shape {
            Shape::Messages => JsonShape::Messages,
            Shape::History => JsonShape::History,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("chatmigrate").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_output_falls_back_to_text() {
        let args = parse(&["export"]);
        assert!(!args.has_output());
        assert_eq!(
            args.flat_outputs(),
            vec![(OutputFormat::Text, "chatgpt_export.txt".to_string())]
        );
    }

    #[test]
    fn test_bare_flags_use_defaults() {
        let args = parse(&["export", "--txt", "--json", "--projects"]);
        assert_eq!(
            args.flat_outputs(),
            vec![
                (OutputFormat::Text, "chatgpt_export.txt".to_string()),
                (OutputFormat::Json, "chatgpt_export.json".to_string()),
            ]
        );
        assert_eq!(args.projects, Some(PathBuf::from("projects")));
    }

    #[test]
    fn test_explicit_paths() {
        let args = parse(&["export", "--gemini", "out/g.json", "--txt", "a.txt"]);
        assert_eq!(
            args.flat_outputs(),
            vec![
                (OutputFormat::Text, "a.txt".to_string()),
                (OutputFormat::Gemini, "out/g.json".to_string()),
            ]
        );
    }

    #[test]
    fn test_projects_only_has_no_flat_output() {
        let args = parse(&["export", "--projects", "out", "--shape", "history", "--summarize"]);
        assert!(args.flat_outputs().is_empty());
        assert_eq!(JsonShape::from(args.shape), JsonShape::History);
        assert!(args.summarize);
    }

    #[test]
    fn test_shape_alias_and_display() {
        let args = parse(&["export", "--shape", "gemini"]);
        assert_eq!(args.shape, Shape::History);
        assert_eq!(Shape::Messages.to_string(), "messages");
    }

    #[test]
    fn test_help_documents_exit_status() {
        use clap::CommandFactory;

        let help = Args::command().render_long_help().to_string();
        assert!(help.contains("EXIT STATUS:"));
        assert!(help.contains("1  INPUT_DIR has no conversations.json"));
        assert!(help.contains("0  outputs written, or no conversations found"));
    }

    #[test]
    fn test_input_dir_required() {
        assert!(Args::try_parse_from(["chatmigrate"]).is_err());
    }
}
