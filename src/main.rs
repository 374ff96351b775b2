//! # chatmigrate CLI
//!
//! Command-line interface for the chatmigrate library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use chatmigrate::MigrateError;
use chatmigrate::cli::Args;
use chatmigrate::config::ArchiveConfig;
use chatmigrate::core::{ArchiveProcessor, OutputConfig, group_by_project, write_projects};
use chatmigrate::format::{JsonShape, write_to_format};
use chatmigrate::summarize::Summarizer;

fn main() {
    // A missing .env is normal; the environment may already hold the key.
    let _ = dotenvy::dotenv();

    let args = <Args as ClapParser>::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => {}
        Err(MigrateError::NoConversations) => {
            println!("No conversations were processed. Exiting.");
        }
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("chatmigrate={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), MigrateError> {
    let total_start = Instant::now();
    let processor = ArchiveProcessor::with_config(ArchiveConfig::default());

    println!("📦 chatmigrate v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", processor.archive_path(&args.input_dir).display());
    if args.timestamps {
        println!("🕒 Metadata: ids and timestamps included");
    }
    println!();

    if !args.has_output() {
        warn!("no output format selected, defaulting to --txt");
    }
    if args.summarize && args.projects.is_none() {
        warn!("--summarize only applies to --projects output, ignoring");
    }

    // Step 1: Reconstruct
    println!("⏳ Reconstructing conversations...");
    let parse_start = Instant::now();
    let (conversations, stats) = processor.process_with_stats(&args.input_dir)?;
    println!(
        "   Rebuilt {} of {} records ({:.2}s)",
        stats.migrated,
        stats.total_records,
        parse_start.elapsed().as_secs_f64()
    );
    if stats.skipped() > 0 {
        println!(
            "   Skipped {} ({} without mapping, {} malformed)",
            stats.skipped(),
            stats.skipped_without_mapping,
            stats.malformed_records
        );
    }

    if conversations.is_empty() {
        return Err(MigrateError::NoConversations);
    }

    let mut output_config = OutputConfig::new();
    if args.timestamps {
        output_config = output_config.with_timestamps();
    }

    // Step 2: Flat outputs
    for (format, path) in args.flat_outputs() {
        write_to_format(&conversations, &path, format, &output_config)?;
        println!(
            "💾 Saved {} conversations as {} to {}",
            conversations.len(),
            format,
            path
        );
    }

    // Step 3: Project outputs
    if let Some(ref dir) = args.projects {
        let projects = group_by_project(&conversations);
        let summarizer = if args.summarize {
            build_summarizer()
        } else {
            None
        };
        let shape: JsonShape = args.shape.into();

        println!("🗂️  Grouping into {} projects ({} layout)...", projects.len(), shape);
        let write_stats = write_projects(
            &projects,
            dir,
            shape,
            &output_config,
            summarizer.as_deref(),
        )?;
        println!(
            "💾 Saved {} projects to {}",
            write_stats.projects,
            dir.display()
        );
        if summarizer.is_some() {
            println!(
                "   Summaries: {} written, {} failed",
                write_stats.summarized, write_stats.summary_failures
            );
        }
    }

    println!();
    println!(
        "✅ Done! {} conversations in {:.2}s",
        conversations.len(),
        total_start.elapsed().as_secs_f64()
    );

    Ok(())
}

#[cfg(feature = "gemini")]
fn build_summarizer() -> Option<Box<dyn Summarizer>> {
    use chatmigrate::config::GeminiConfig;
    use chatmigrate::summarize::GeminiSummarizer;

    match GeminiSummarizer::from_env(GeminiConfig::default()) {
        Ok(summarizer) => Some(Box::new(summarizer)),
        Err(e) => {
            warn!(error = %e, "summaries disabled");
            None
        }
    }
}

#[cfg(not(feature = "gemini"))]
fn build_summarizer() -> Option<Box<dyn Summarizer>> {
    warn!("built without the gemini feature, summaries disabled");
    None
}
