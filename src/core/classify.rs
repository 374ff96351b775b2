//! Project labels derived from conversation titles.
//!
//! Rules, first match wins:
//! 1. A case-insensitive `Project:`, `Project ` or `[Project]` prefix: the
//!    rest of the title
//! 2. A ` - ` separator: everything before the first one
//! 3. Otherwise [`FALLBACK_PROJECT`]
//!
//! The extracted name is whitespace-trimmed and otherwise left alone. A rule
//! whose extracted name trims to nothing does not match, and neither does a
//! prefix followed by `-` (`Project - notes` is a separator title).

use std::sync::LazyLock;

use regex::Regex;

/// Bucket for titles no rule recognizes.
pub const FALLBACK_PROJECT: &str = "General";

const SEPARATOR: &str = " - ";

static PROJECT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^(?:project:|\[project\]|project )(.*)$")
        .expect("valid project prefix regex")
});

/// Returns the project name for a conversation title.
///
/// # Example
///
/// ```
/// use chatmigrate::core::classify;
///
/// assert_eq!(classify("Project: Alpha"), "Alpha");
/// assert_eq!(classify("[Project] Beta"), "Beta");
/// assert_eq!(classify("Research - session 1"), "Research");
/// assert_eq!(classify("Random musings"), "General");
/// ```
pub fn classify(title: &str) -> String {
    if let Some(name) = PROJECT_PREFIX
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|name| !name.is_empty() && !name.starts_with('-'))
    {
        return name.to_string();
    }

    if let Some((head, _)) = title.split_once(SEPARATOR) {
        let head = head.trim();
        if !head.is_empty() {
            return head.to_string();
        }
    }

    FALLBACK_PROJECT.to_string()
}
