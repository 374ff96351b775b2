//! Plain-text transcript writer.

use std::fs::File;
use std::io::Write;

use crate::core::models::{Conversation, OutputConfig};
use crate::error::Result;
use crate::format::RoleMapping;

/// Separator line framing each conversation header.
pub const CONVERSATION_SEPARATOR: &str =
    "================================================================================";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Writes conversations to a human-readable text file.
///
/// # Format
/// ```text
/// ================================================================================
/// CONVERSATION 1: Greeting
/// ================================================================================
///
/// User:
/// Hello
///
/// Assistant:
/// Hi there!
///
///
/// ```
pub fn write_text(
    conversations: &[Conversation],
    output_path: &str,
    config: &OutputConfig,
) -> Result<()> {
    let text = to_text(conversations, config);
    let mut file = File::create(output_path)?;
    file.write_all(text.as_bytes())?;
    Ok(())
}

/// Renders conversations as a text transcript.
///
/// Same format as [`write_text`], returned as a String.
pub fn to_text(conversations: &[Conversation], config: &OutputConfig) -> String {
    let mapping = config.role_mapping_or(RoleMapping::Preserve);
    let mut out = String::new();

    for (i, convo) in conversations.iter().enumerate() {
        out.push_str(CONVERSATION_SEPARATOR);
        out.push('\n');
        out.push_str(&format!("CONVERSATION {}: {}\n", i + 1, convo.title));
        if config.include_timestamps {
            if let Some(created) = convo.created_at {
                out.push_str(&format!("Created: {}\n", created.format(TIMESTAMP_FORMAT)));
            }
        }
        out.push_str(CONVERSATION_SEPARATOR);
        out.push_str("\n\n");

        for msg in &convo.messages {
            let role = capitalize(mapping.apply(&msg.role));
            match msg.timestamp.filter(|_| config.include_timestamps) {
                Some(ts) => out.push_str(&format!("{} ({}):\n", role, ts.format(TIMESTAMP_FORMAT))),
                None => out.push_str(&format!("{}:\n", role)),
            }
            out.push_str(&msg.text);
            out.push_str("\n\n");
        }

        out.push('\n');
    }

    out
}

/// Upper-cases the first character and lower-cases the rest (`user` -> `User`).
fn capitalize(role: &str) -> String {
    let mut chars = role.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
