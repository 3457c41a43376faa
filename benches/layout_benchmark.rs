//! Benchmarks for line breaking and pagination.
//!
//! Run with: cargo bench

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use recap::model::FontSpec;
use recap::render::{
    render_flow, render_flow_batch, render_slides, wrap, FlowOptions, HeuristicMeasurer,
    SlideOptions,
};
use recap::{Lang, SectionKey, StructuredDocument};

const WORDS: &[&str] = &[
    "review", "the", "quarterly", "budget", "and", "assign", "owners", "for", "each",
    "migration", "step", "before", "Friday",
];

fn sentence(words: usize) -> String {
    (0..words)
        .map(|i| WORDS[i % WORDS.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Creates a document with the given number of bullets per section.
fn create_test_doc(bullets_per_section: usize) -> StructuredDocument {
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut doc = StructuredDocument::new(Lang::En, created);
    doc.title = "Benchmark planning session".to_string();
    doc.short_description = sentence(40);
    for key in SectionKey::ALL {
        if let Some(section) = doc.section_mut(key) {
            section.bullets = (0..bullets_per_section)
                .map(|i| sentence(5 + (i * 7) % 60))
                .collect();
        }
    }
    doc
}

fn bench_wrap(c: &mut Criterion) {
    let measurer = HeuristicMeasurer::default();
    let font = FontSpec::regular(11.0);
    let text = sentence(500);

    c.bench_function("wrap_500_words", |b| {
        b.iter(|| wrap(black_box(&text), 440.0, &font, &measurer).unwrap())
    });
}

fn bench_flow(c: &mut Criterion) {
    let measurer = HeuristicMeasurer::default();
    let options = FlowOptions::default();
    let small = create_test_doc(5);
    let large = create_test_doc(100);

    c.bench_function("flow_small", |b| {
        b.iter(|| render_flow(black_box(&small), &measurer, &options).unwrap())
    });
    c.bench_function("flow_large", |b| {
        b.iter(|| render_flow(black_box(&large), &measurer, &options).unwrap())
    });

    let batch: Vec<StructuredDocument> = (0..16).map(|_| create_test_doc(20)).collect();
    c.bench_function("flow_batch_16", |b| {
        b.iter(|| render_flow_batch(black_box(&batch), &measurer, &options))
    });
}

fn bench_slides(c: &mut Criterion) {
    let doc = create_test_doc(100);
    let options = SlideOptions::default();

    c.bench_function("slides_large", |b| {
        b.iter(|| render_slides(black_box(&doc), &options))
    });
}

criterion_group!(benches, bench_wrap, bench_flow, bench_slides);
criterion_main!(benches);
