//! Parse, classify and filter throughput.
//!
//! Every poll re-parses the whole file and every filter edit re-applies the
//! filter to every record, so both must stay cheap at realistic file sizes.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `parse` | Split + classify of a full snapshot at 1k/10k/100k lines |
//! | `filter` | `filter::apply` with severity-only and text filters |
//! | `render` | Styling the visible records into terminal lines |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench pipeline_bench
//! open target/criterion/report/index.html
//! ```

use campfire::core::{classify, filter, parse, FilterState, Severity};
use campfire::tui::{LineRenderer, Theme};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn snapshot(lines: usize) -> Vec<u8> {
    const TOKENS: [&str; 6] = ["INFO", "WARN", "ERRO", "DEBU", "FATA", "----"];
    let mut out = String::with_capacity(lines * 72);
    for i in 0..lines {
        out.push_str(&format!(
            "2024-01-15 10:{:02}:{:02} {} request {} served by worker-{} in {}ms\n",
            (i / 60) % 60,
            i % 60,
            TOKENS[i % TOKENS.len()],
            i,
            i % 8,
            i % 997
        ));
    }
    out.into_bytes()
}

// ---------------------------------------------------------------------------
// Parse
// ---------------------------------------------------------------------------

fn parse_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for n in SIZES {
        let content = snapshot(n);
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(BenchmarkId::new("full_snapshot", n), &content, |b, content| {
            b.iter(|| parse(black_box(content)))
        });
    }

    group.bench_function("classify_worst_case", |b| {
        // No token: every pattern is scanned to the end.
        let line = "x".repeat(200);
        b.iter(|| classify(black_box(&line)))
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

fn filter_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    for n in SIZES {
        let records = parse(&snapshot(n));
        group.throughput(Throughput::Elements(records.len() as u64));

        let mut severity_only = FilterState::default();
        severity_only.toggle_severity(Severity::Debug);
        group.bench_with_input(
            BenchmarkId::new("severity_only", n),
            &records,
            |b, records| b.iter(|| filter::apply(records, black_box(&severity_only))),
        );

        let mut text = FilterState::default();
        text.set_text("worker-3");
        group.bench_with_input(BenchmarkId::new("text", n), &records, |b, records| {
            b.iter(|| filter::apply(records, black_box(&text)))
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Render
// ---------------------------------------------------------------------------

fn render_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let theme = Theme::load_default();
    let renderer = LineRenderer::new(&theme, true);
    let records = parse(&snapshot(10_000));
    let state = FilterState::default();
    let visible = filter::apply(&records, &state);

    group.throughput(Throughput::Elements(visible.len() as u64));
    group.bench_function("visible_10k", |b| {
        b.iter(|| {
            visible
                .iter()
                .map(|r| renderer.render(r, "worker"))
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

criterion_group!(benches, parse_bench, filter_bench, render_bench);
criterion_main!(benches);
