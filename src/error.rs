//! Unified error types for chatmigrate.
//!
//! This module provides a single [`MigrateError`] enum that covers every
//! failure the library can report. Problems local to one conversation record
//! or one graph node are not errors at all: they are skipped, counted in
//! [`ProcessingStats`](crate::core::ProcessingStats) and logged.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Summaries** never fail a run: [`MigrateError::SummarizationUnavailable`]
//!   is always recovered by the caller that asked for the summary

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatmigrate operations.
///
/// # Example
///
/// ```rust
/// use chatmigrate::error::Result;
/// use chatmigrate::Conversation;
///
/// fn my_function() -> Result<Vec<Conversation>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, MigrateError>;

/// The error type for all chatmigrate operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MigrateError {
    /// An I/O error occurred while reading the archive or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error while writing output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The archive file exists but could not be decoded.
    #[error("Failed to parse {format}{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The format being parsed (e.g., "ChatGPT export")
        format: &'static str,
        /// The underlying decode error
        #[source]
        source: serde_json::Error,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The export directory does not contain the conversations file.
    ///
    /// Reported to the caller; no output is produced.
    #[error("'{}' not found. Point the input at the root of the unzipped export.", path.display())]
    MissingArchiveFile {
        /// The path that was looked up
        path: PathBuf,
    },

    /// The document decoded but doesn't have the expected structure.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Processing finished without a single reconstructed conversation.
    #[error("No conversations were processed")]
    NoConversations,

    /// The summarization collaborator is not configured or failed.
    #[error("Summarization unavailable: {reason}")]
    SummarizationUnavailable {
        /// Why no summary could be produced
        reason: String,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl MigrateError {
    /// Creates a parse error for the ChatGPT archive file.
    pub fn archive_parse(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        MigrateError::Parse {
            format: "ChatGPT export",
            source,
            path,
        }
    }

    /// Creates a missing archive file error.
    pub fn missing_archive(path: impl Into<PathBuf>) -> Self {
        MigrateError::MissingArchiveFile { path: path.into() }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        MigrateError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates a summarization error.
    pub fn summarization(reason: impl Into<String>) -> Self {
        MigrateError::SummarizationUnavailable {
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, MigrateError::Io(_))
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, MigrateError::Parse { .. })
    }

    /// Returns `true` if the archive file was not found.
    pub fn is_missing_archive(&self) -> bool {
        matches!(self, MigrateError::MissingArchiveFile { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, MigrateError::InvalidFormat { .. })
    }

    /// Returns `true` if a summary could not be produced.
    pub fn is_summarization(&self) -> bool {
        matches!(self, MigrateError::SummarizationUnavailable { .. })
    }
}
