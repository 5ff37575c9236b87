//! Outline pipeline benchmarks
//!
//! Synthetic documents of one title, a numbered heading per page and twenty
//! body lines per page, timed stage by stage and end to end.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use outline_oxide::layout::{compute_features, detect_candidates, BoundingBox, Line, LineDocument};
use outline_oxide::text::detect_script;
use outline_oxide::{process_batch, OutlineConfig, OutlineExtractor};

/// Build a document with `pages` pages.
fn synthetic_document(name: &str, pages: u32) -> LineDocument {
    let mut lines = Vec::with_capacity(pages as usize * 21 + 1);
    lines.push(Line::new(0, "Synthetic Benchmark Report", BoundingBox::new(72.0, 40.0, 500.0, 64.0), 24.0, 1.0));

    for p in 0..pages {
        let top = if p == 0 { 90.0 } else { 40.0 };
        lines.push(Line::new(
            p,
            format!("{} Section Heading", p + 1),
            BoundingBox::new(72.0, top, 400.0, top + 16.0),
            16.0,
            1.0,
        ));
        for i in 0..20 {
            let y = top + 30.0 + i as f32 * 16.0;
            lines.push(Line::new(
                p,
                format!("Body line {} on page {} carries ordinary running text.", i, p + 1),
                BoundingBox::new(72.0, y, 520.0, y + 12.0),
                12.0,
                0.0,
            ));
        }
    }

    LineDocument::new(name, pages as usize, lines)
}

/// End-to-end extraction at different document sizes
fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    let extractor = OutlineExtractor::new(OutlineConfig::default());

    for pages in [10u32, 50, 200] {
        let doc = synthetic_document("bench.pdf", pages);
        group.bench_with_input(BenchmarkId::from_parameter(format!("{pages}_pages")), &doc, |b, doc| {
            b.iter(|| black_box(extractor.extract(black_box(doc)).unwrap()));
        });
    }

    group.finish();
}

/// Feature computation and candidate detection alone
fn bench_stages(c: &mut Criterion) {
    let config = OutlineConfig::default();
    let doc = synthetic_document("bench.pdf", 50);

    c.bench_function("features_50_pages", |b| {
        b.iter(|| black_box(compute_features(black_box(&doc.lines), doc.page_count, &config)));
    });

    c.bench_function("candidates_50_pages", |b| {
        let (stats, features) = compute_features(&doc.lines, doc.page_count, &config);
        b.iter(|| {
            let mut features = features.clone();
            detect_candidates(&mut features, &stats, &config);
            black_box(features)
        });
    });
}

/// Script detection over mixed-script lines
fn bench_script_detection(c: &mut Criterion) {
    let samples = [
        "1.2 Background and Motivation",
        "第２章 概要と背景",
        "الفصل 3 المقدمة العامة",
        "अध्याय ४ परिचय",
    ];
    c.bench_function("detect_script_mixed", |b| {
        b.iter(|| {
            for s in &samples {
                black_box(detect_script(black_box(s)));
            }
        });
    });
}

/// Parallel batch of 16 documents
fn bench_batch(c: &mut Criterion) {
    let config = OutlineConfig::default();
    let docs: Vec<LineDocument> = (0..16)
        .map(|i| synthetic_document(&format!("doc_{i}.pdf"), 50))
        .collect();

    let mut group = c.benchmark_group("batch");
    group.sample_size(10);
    group.bench_function("16_docs_50_pages", |b| {
        b.iter(|| black_box(process_batch(black_box(&docs), &config)));
    });
    group.finish();
}

criterion_group!(benches, bench_extract, bench_stages, bench_script_detection, bench_batch);
criterion_main!(benches);
