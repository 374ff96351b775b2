//! Per-project JSON writer.
//!
//! Each project gets its own directory holding one JSON array file:
//!
//! ```text
//! <output_dir>/
//!   Research/Research.json
//!   General/General.json
//! ```
//!
//! Entries use the flat JSON layout of the chosen [`JsonShape`], plus an
//! optional `summary` when a [`Summarizer`] is supplied and succeeds.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::json_writer::JsonConversation;
use crate::core::models::{OutputConfig, Project};
use crate::error::Result;
use crate::format::JsonShape;
use crate::summarize::Summarizer;

/// Counts from one project write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectWriteStats {
    pub projects: usize,
    pub conversations: usize,
    pub summarized: usize,
    pub summary_failures: usize,
}

/// Turns a project name into a directory and file stem.
///
/// Characters outside `[A-Za-z0-9 _.-]` (path separators included) become
/// `_`; surrounding whitespace and dots are trimmed. An empty result maps to
/// `General`.
///
/// # Example
///
/// ```
/// use chatmigrate::core::output::project_slug;
///
/// assert_eq!(project_slug("Research"), "Research");
/// assert_eq!(project_slug("A/B: notes"), "A_B_ notes");
/// assert_eq!(project_slug(".."), "General");
/// ```
pub fn project_slug(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = replaced.trim_matches(|c: char| c.is_whitespace() || c == '.');
    if trimmed.is_empty() {
        crate::core::classify::FALLBACK_PROJECT.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Writes one JSON array file per project under `output_dir`.
///
/// Two names that map to the same slug get distinct directories by suffixing
/// `-2`, `-3`, ... in project order. A failed summary is logged and the entry
/// is written without one.
pub fn write_projects(
    projects: &[Project],
    output_dir: &Path,
    shape: JsonShape,
    config: &OutputConfig,
    summarizer: Option<&dyn Summarizer>,
) -> Result<ProjectWriteStats> {
    let mut stats = ProjectWriteStats::default();
    let mut used_slugs: HashSet<String> = HashSet::new();

    fs::create_dir_all(output_dir)?;

    for project in projects {
        let slug = unique_slug(&project_slug(&project.name), &mut used_slugs);
        let project_dir = output_dir.join(&slug);
        fs::create_dir_all(&project_dir)?;

        let mut entries = Vec::with_capacity(project.conversations.len());
        for convo in &project.conversations {
            let summary = summarizer.and_then(|s| match s.summarize(convo) {
                Ok(summary) => {
                    stats.summarized += 1;
                    Some(summary)
                }
                Err(e) => {
                    tracing::warn!(
                        summarizer = s.name(),
                        title = %convo.title,
                        error = %e,
                        "writing conversation without summary"
                    );
                    stats.summary_failures += 1;
                    None
                }
            });

            entries.push(
                JsonConversation::from_conversation(convo, shape, config).with_summary(summary),
            );
        }

        let file_path = project_dir.join(format!("{slug}.json"));
        fs::write(&file_path, serde_json::to_string_pretty(&entries)?)?;
        tracing::debug!(
            project = %project.name,
            path = %file_path.display(),
            conversations = entries.len(),
            "wrote project file"
        );

        stats.projects += 1;
        stats.conversations += entries.len();
    }

    tracing::info!(
        projects = stats.projects,
        conversations = stats.conversations,
        summarized = stats.summarized,
        summary_failures = stats.summary_failures,
        "project output complete"
    );
    Ok(stats)
}

fn unique_slug(base: &str, used: &mut HashSet<String>) -> String {
    let mut candidate = base.to_string();
    let mut n = 2;
    while !used.insert(candidate.to_lowercase()) {
        candidate = format!("{base}-{n}");
        n += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Message;
    use crate::core::models::Conversation;
    use crate::error::MigrateError;

    struct FixedSummarizer;

    impl Summarizer for FixedSummarizer {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn summarize(&self, conversation: &Conversation) -> Result<String> {
            if conversation.title.contains("fail") {
                return Err(MigrateError::summarization("boom"));
            }
            Ok(format!("About {}", conversation.title))
        }
    }

    fn projects() -> Vec<Project> {
        let mut research = Project::new("Research");
        research.conversations.push(Conversation::new(
            "Research - one",
            vec![Message::new("assistant", "A")],
        ));
        research
            .conversations
            .push(Conversation::new("Research - fail", vec![]));

        let mut general = Project::new("General");
        general
            .conversations
            .push(Conversation::new("Random", vec![Message::new("user", "x")]));
        vec![research, general]
    }

    #[test]
    fn test_project_slug() {
        assert_eq!(project_slug("Alpha"), "Alpha");
        assert_eq!(project_slug("  spaced name "), "spaced name");
        assert_eq!(project_slug("a\\b/c"), "a_b_c");
        assert_eq!(project_slug("Café"), "Caf_");
        assert_eq!(project_slug(""), "General");
    }

    #[test]
    fn test_unique_slug() {
        let mut used = HashSet::new();
        assert_eq!(unique_slug("A_B", &mut used), "A_B");
        assert_eq!(unique_slug("A_B", &mut used), "A_B-2");
        assert_eq!(unique_slug("a_b", &mut used), "a_b-3");
    }

    #[test]
    fn test_write_projects_layout() {
        let dir = tempfile::tempdir().unwrap();
        let stats = write_projects(
            &projects(),
            dir.path(),
            JsonShape::History,
            &OutputConfig::new(),
            None,
        )
        .unwrap();

        assert_eq!(stats.projects, 2);
        assert_eq!(stats.conversations, 3);
        assert_eq!(stats.summarized, 0);

        let research = fs::read_to_string(dir.path().join("Research/Research.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&research).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["history"][0]["role"], "model");
        assert!(value[0].get("summary").is_none());

        assert!(dir.path().join("General/General.json").is_file());
    }

    #[test]
    fn test_write_projects_summaries_are_best_effort() {
        let dir = tempfile::tempdir().unwrap();
        let stats = write_projects(
            &projects(),
            dir.path(),
            JsonShape::Messages,
            &OutputConfig::new(),
            Some(&FixedSummarizer),
        )
        .unwrap();

        assert_eq!(stats.summarized, 2);
        assert_eq!(stats.summary_failures, 1);

        let research = fs::read_to_string(dir.path().join("Research/Research.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&research).unwrap();
        assert_eq!(value[0]["summary"], "About Research - one");
        assert!(value[1].get("summary").is_none());
        assert_eq!(value[0]["messages"][0]["role"], "assistant");
    }
}
