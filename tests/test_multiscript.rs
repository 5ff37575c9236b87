//! Multi-script outline tests
//!
//! Arabic (display-order and logical-order input), Japanese and Hindi
//! documents run through the full pipeline.

use outline_oxide::layout::{BoundingBox, Line, LineDocument};
use outline_oxide::text::{Script, TextOrder};
use outline_oxide::{DocumentAnalysis, HeadingLevel, OutlineConfig, OutlineEntry, OutlineExtractor};

/// Display order of a logical Arabic string whose Latin runs are single characters.
fn visual(logical: &str) -> String {
    logical.chars().rev().collect()
}

fn analyze(name: &str, rows: &[(&str, f32, bool)], config: OutlineConfig) -> DocumentAnalysis {
    let lines = rows
        .iter()
        .enumerate()
        .map(|(i, (text, size, bold))| {
            let y = 50.0 + i as f32 * 22.0;
            let bold_frac = if *bold { 1.0 } else { 0.0 };
            Line::new(0, *text, BoundingBox::new(60.0, y, 520.0, y + size), *size, bold_frac)
        })
        .collect();
    let doc = LineDocument::new(name, 1, lines);
    OutlineExtractor::new(config).extract(&doc).unwrap()
}

#[test]
fn test_arabic_display_order() {
    let title = visual("تقرير سنوي");
    let intro = visual("المقدمة");
    let chapter = visual("الفصل 1");
    let body = visual("هذا نص عادي في الفقرة");
    let rows = [
        (title.as_str(), 20.0, true),
        (body.as_str(), 10.0, false),
        (intro.as_str(), 10.0, false),
        (body.as_str(), 10.0, false),
        (body.as_str(), 10.0, false),
        (chapter.as_str(), 10.0, false),
        (body.as_str(), 10.0, false),
        (body.as_str(), 10.0, false),
    ];
    let analysis = analyze("arabic.pdf", &rows, OutlineConfig::default());

    assert_eq!(analysis.title, "تقرير سنوي");
    assert_eq!(
        analysis.outline,
        vec![
            OutlineEntry::new(HeadingLevel::H1, "المقدمة", 1),
            OutlineEntry::new(HeadingLevel::H1, "الفصل 1", 1),
        ]
    );
    assert!(analysis.features.iter().all(|f| f.script == Script::Arabic));

    // Section text is in logical order too.
    assert_eq!(analysis.sections.len(), 2);
    assert!(analysis.sections[0].full_text.starts_with("هذا نص عادي"));
}

#[test]
fn test_arabic_indic_digits() {
    let rows = [
        ("تقرير سنوي", 20.0, true),
        ("هذا نص عادي في الفقرة", 10.0, false),
        ("الباب ٢", 10.0, false),
        ("هذا نص عادي في الفقرة", 10.0, false),
        ("هذا نص عادي في الفقرة", 10.0, false),
    ];
    let config = OutlineConfig::new().with_rtl_input_order(TextOrder::Logical);
    let analysis = analyze("arabic.pdf", &rows, config);

    assert_eq!(analysis.outline, vec![OutlineEntry::new(HeadingLevel::H1, "الباب ٢", 1)]);
}

#[test]
fn test_japanese_numbering() {
    let rows = [
        ("年次報告書", 20.0, true),
        ("これは本文です。", 10.0, false),
        ("第２章 概要", 10.0, false),
        ("これは本文です。", 10.0, false),
        ("本文の続きです。", 10.0, false),
        ("2.1 背景", 10.0, false),
        ("これは本文です。", 10.0, false),
        ("本文の続きです。", 10.0, false),
    ];
    let analysis = analyze("report_ja.pdf", &rows, OutlineConfig::default());

    assert_eq!(analysis.title, "年次報告書");
    assert_eq!(
        analysis.outline,
        vec![
            OutlineEntry::new(HeadingLevel::H1, "第２章 概要", 1),
            OutlineEntry::new(HeadingLevel::H2, "2.1 背景", 1),
        ]
    );
}

#[test]
fn test_japanese_axis_labels_rejected() {
    let rows = [
        ("年次報告書", 20.0, true),
        ("1,200万円", 16.0, true),
        ("これは本文です。", 10.0, false),
        ("35％", 16.0, true),
        ("これは本文です。", 10.0, false),
        ("本文の続きです。", 10.0, false),
    ];
    let analysis = analyze("chart_ja.pdf", &rows, OutlineConfig::default());

    let candidates: Vec<&str> = analysis
        .features
        .iter()
        .filter(|f| f.is_candidate)
        .map(|f| f.text.as_str())
        .collect();
    assert_eq!(candidates, vec!["年次報告書"]);
    assert!(analysis.outline.is_empty());
}

#[test]
fn test_devanagari_chapter() {
    let rows = [
        ("वार्षिक रिपोर्ट", 20.0, true),
        ("यह सामान्य पाठ है।", 10.0, false),
        ("अध्याय १", 10.0, false),
        ("यह सामान्य पाठ है।", 10.0, false),
        ("यह सामान्य पाठ है।", 10.0, false),
    ];
    let analysis = analyze("report_hi.pdf", &rows, OutlineConfig::default());

    let chapter = analysis.features.iter().find(|f| f.text == "अध्याय १").unwrap();
    assert_eq!(chapter.script, Script::Devanagari);
    assert!(chapter.starts_numbering);
    assert_eq!(analysis.outline, vec![OutlineEntry::new(HeadingLevel::H1, "अध्याय १", 1)]);
}
