//! Benchmarks for chatmigrate reconstruction and output.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench reconstruction -- output`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatmigrate::core::output::{to_json, to_text};
use chatmigrate::core::{ArchiveProcessor, OutputConfig, group_by_project};
use chatmigrate::format::JsonShape;

// =============================================================================
// Test Data Generators
// =============================================================================

/// Builds an export with `conversations` records of `depth` turns each, plus
/// one abandoned branch per record.
fn generate_archive(conversations: usize, depth: usize) -> String {
    let mut records = Vec::with_capacity(conversations);
    for c in 0..conversations {
        let mut nodes = Vec::with_capacity(depth + 1);
        for d in 0..depth {
            let role = if d % 2 == 0 { "user" } else { "assistant" };
            let parent = if d == 0 {
                "null".to_string()
            } else {
                format!("\"n{}\"", d - 1)
            };
            nodes.push(format!(
                r#""n{d}": {{"id": "n{d}", "message": {{"author": {{"role": "{role}"}}, "content": {{"parts": ["Message {d} of conversation {c}", {{"text": " (continued)"}}]}}}}, "parent": {parent}}}"#
            ));
        }
        nodes.push(
            r#""alt": {"id": "alt", "message": {"author": {"role": "assistant"}, "content": {"parts": ["Regenerated"]}}, "parent": "n0"}"#
                .to_string(),
        );
        records.push(format!(
            r#"{{"title": "Project {} - topic {c}", "current_node": "n{}", "mapping": {{{}}}}}"#,
            c % 5,
            depth - 1,
            nodes.join(",")
        ));
    }
    format!("[{}]", records.join(",\n"))
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_reconstruction(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruction");
    let processor = ArchiveProcessor::new();

    for &(count, depth) in &[(10, 10), (100, 20), (500, 50)] {
        let archive = generate_archive(count, depth);
        group.throughput(Throughput::Bytes(archive.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("process_str", format!("{count}x{depth}")),
            &archive,
            |b, archive| b.iter(|| processor.process_str(black_box(archive))),
        );
    }

    group.finish();
}

fn bench_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("output");
    let (convos, _) = ArchiveProcessor::new()
        .process_str(&generate_archive(200, 20))
        .unwrap();
    let config = OutputConfig::new();

    group.bench_function("text", |b| b.iter(|| to_text(black_box(&convos), &config)));
    group.bench_function("json_messages", |b| {
        b.iter(|| to_json(black_box(&convos), JsonShape::Messages, &config))
    });
    group.bench_function("json_history", |b| {
        b.iter(|| to_json(black_box(&convos), JsonShape::History, &config))
    });
    group.bench_function("group_by_project", |b| {
        b.iter(|| group_by_project(black_box(&convos)))
    });

    group.finish();
}

criterion_group!(benches, bench_reconstruction, bench_output);
criterion_main!(benches);
