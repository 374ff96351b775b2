//! Example: Using chatmigrate as a library
//!
//! Builds a tiny export in memory, reconstructs it and prints every output
//! format.
//!
//! Run with: cargo run --example library_usage

use chatmigrate::prelude::*;

const EXPORT: &str = r#"[
  {
    "title": "Research - embeddings",
    "current_node": "a2",
    "mapping": {
      "s":  {"id": "s",  "message": {"author": {"role": "system"}, "content": {"parts": ["You are helpful"]}}},
      "u1": {"id": "u1", "message": {"author": {"role": "user"}, "content": {"parts": ["What is an embedding?"]}}, "parent": "s"},
      "a1": {"id": "a1", "message": {"author": {"role": "assistant"}, "content": {"parts": ["A vector ", {"text": "representation."}]}}, "parent": "u1"},
      "a0": {"id": "a0", "message": {"author": {"role": "assistant"}, "content": {"parts": ["(regenerated away)"]}}, "parent": "u1"},
      "u2": {"id": "u2", "message": {"author": {"role": "user"}, "content": {"parts": ["Thanks!"]}}, "parent": "a1"},
      "a2": {"id": "a2", "message": {"author": {"role": "assistant"}, "content": {"parts": ["You're welcome."]}}, "parent": "u2"}
    }
  },
  {"title": "Project: Kitchen", "current_node": "k", "mapping": {
      "k": {"id": "k", "message": {"author": {"role": "user"}, "content": {"parts": ["Sourdough tips?"]}}}
  }},
  {"title": "No mapping here"}
]"#;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== chatmigrate Library Usage Examples ===\n");

    // Example 1: Reconstruct from an in-memory export
    println!("1. Reconstructing conversations:");
    let (conversations, stats) = ArchiveProcessor::new().process_str(EXPORT)?;
    for convo in &conversations {
        println!("   {} ({} messages)", convo.title, convo.len());
        for msg in &convo.messages {
            println!("     {}: {}", msg.role, msg.text);
        }
    }
    println!(
        "   ({} of {} records migrated, {} skipped)",
        stats.migrated,
        stats.total_records,
        stats.skipped()
    );

    // Example 2: Text transcript
    println!("\n2. Text output:");
    print!("{}", to_text(&conversations, &OutputConfig::new()));

    // Example 3: JSON in both shapes
    println!("3. JSON (messages shape):");
    println!("{}", to_json(&conversations, JsonShape::Messages, &OutputConfig::new())?);
    println!("\n   JSON (history shape, Gemini roles):");
    println!("{}", to_json(&conversations, JsonShape::History, &OutputConfig::new())?);

    // Example 4: Project grouping
    println!("\n4. Projects:");
    for project in group_by_project(&conversations) {
        println!("   {}: {} conversation(s)", project.name, project.conversations.len());
    }

    // Example 5: Classifying titles directly
    println!("\n5. Title classification:");
    for title in ["[Project] Garden plan", "Work - standup notes", "Random chat"] {
        println!("   {title:<24} -> {}", classify(title));
    }

    println!("\n=== All examples completed! ===");
    Ok(())
}
