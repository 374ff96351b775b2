//! Archive processing: load an export, reconstruct every conversation and
//! optionally bucket the results by project.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::classify::classify;
use super::models::{Conversation, Project};
use crate::config::ArchiveConfig;
use crate::error::{MigrateError, Result};
use crate::parsing::chatgpt::RawConversation;
use crate::reconstruct::ConversationReconstructor;

/// Counts from one processing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    /// Records in the archive array
    pub total_records: usize,
    /// Conversations reconstructed
    pub migrated: usize,
    /// Records without a (non-empty) mapping
    pub skipped_without_mapping: usize,
    /// Records that were not JSON objects
    pub malformed_records: usize,
}

impl ProcessingStats {
    /// Records that did not produce a conversation.
    pub fn skipped(&self) -> usize {
        self.skipped_without_mapping + self.malformed_records
    }
}

/// Loads a ChatGPT export and reconstructs its conversations.
///
/// # Example
///
/// ```rust,no_run
/// use chatmigrate::core::{ArchiveProcessor, group_by_project};
///
/// let processor = ArchiveProcessor::new();
/// let conversations = processor.process("chatgpt-export".as_ref())?;
/// for project in group_by_project(&conversations) {
///     println!("{}: {}", project.name, project.conversations.len());
/// }
/// # Ok::<(), chatmigrate::MigrateError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArchiveProcessor {
    config: ArchiveConfig,
    reconstructor: ConversationReconstructor,
}

impl ArchiveProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ArchiveConfig) -> Self {
        let reconstructor = ConversationReconstructor::with_config(&config);
        Self {
            config,
            reconstructor,
        }
    }

    /// Path of the archive file inside `export_root`.
    pub fn archive_path(&self, export_root: &Path) -> PathBuf {
        export_root.join(&self.config.file_name)
    }

    /// Reconstructs every conversation in the export at `export_root`.
    ///
    /// Fails with [`MigrateError::MissingArchiveFile`] when the archive file
    /// is absent. Individual records never fail the run.
    pub fn process(&self, export_root: &Path) -> Result<Vec<Conversation>> {
        self.process_with_stats(export_root).map(|(convos, _)| convos)
    }

    /// Like [`process`](Self::process), also returning the run's counts.
    pub fn process_with_stats(
        &self,
        export_root: &Path,
    ) -> Result<(Vec<Conversation>, ProcessingStats)> {
        let path = self.archive_path(export_root);
        if !path.is_file() {
            tracing::error!(path = %path.display(), "archive file not found");
            return Err(MigrateError::missing_archive(path));
        }
        tracing::info!(path = %path.display(), "found archive file");

        let content = fs::read_to_string(&path)?;
        let records: Vec<Value> = match serde_json::from_str::<Value>(&content) {
            Ok(Value::Array(records)) => records,
            Ok(_) => {
                return Err(MigrateError::invalid_format(
                    "ChatGPT export",
                    format!("{} must hold a JSON array", path.display()),
                ));
            }
            Err(e) => return Err(MigrateError::archive_parse(e, Some(path))),
        };

        Ok(self.process_records(records))
    }

    /// Reconstructs conversations from an in-memory archive document.
    pub fn process_str(&self, content: &str) -> Result<(Vec<Conversation>, ProcessingStats)> {
        match serde_json::from_str::<Value>(content) {
            Ok(Value::Array(records)) => Ok(self.process_records(records)),
            Ok(_) => Err(MigrateError::invalid_format(
                "ChatGPT export",
                "top level must be a JSON array",
            )),
            Err(e) => Err(MigrateError::archive_parse(e, None)),
        }
    }

    /// Reconstructs already-decoded records, preserving their order.
    pub fn process_records(&self, records: Vec<Value>) -> (Vec<Conversation>, ProcessingStats) {
        let mut stats = ProcessingStats {
            total_records: records.len(),
            ..ProcessingStats::default()
        };
        tracing::info!(records = stats.total_records, "parsing conversations");

        let mut conversations = Vec::with_capacity(records.len());
        for (index, value) in records.into_iter().enumerate() {
            if !value.is_object() {
                tracing::warn!(index, "skipping record that is not a JSON object");
                stats.malformed_records += 1;
                continue;
            }

            let record: RawConversation = match serde_json::from_value(value) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping malformed record");
                    stats.malformed_records += 1;
                    continue;
                }
            };

            if !record.has_mapping() {
                tracing::debug!(
                    index,
                    title = record.title.as_deref().unwrap_or_default(),
                    "skipping record without mapping"
                );
                stats.skipped_without_mapping += 1;
                continue;
            }

            conversations.push(self.reconstructor.reconstruct(&record));
        }

        stats.migrated = conversations.len();
        tracing::info!(
            migrated_conversations = stats.migrated,
            skipped_without_mapping = stats.skipped_without_mapping,
            malformed_records = stats.malformed_records,
            "parsing complete"
        );

        (conversations, stats)
    }
}

/// Buckets conversations by [`classify`]ed title.
///
/// Projects appear in the order their first conversation appears, and each
/// project keeps its conversations in input order.
pub fn group_by_project(conversations: &[Conversation]) -> Vec<Project> {
    let mut projects: Vec<Project> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for convo in conversations {
        let name = classify(&convo.title);
        let slot = *index.entry(name.clone()).or_insert_with(|| {
            projects.push(Project::new(name));
            projects.len() - 1
        });
        projects[slot].conversations.push(convo.clone());
    }

    tracing::debug!(projects = projects.len(), "grouped conversations by project");
    projects
}
