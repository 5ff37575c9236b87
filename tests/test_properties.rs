//! Property-Based Tests
//!
//! Invariants of the outline over generated documents:
//! - extraction is deterministic
//! - no (level, text, page) triple repeats
//! - entries follow page order and the outline opens at H1
//! - levels never skip (an H3 always follows an H2 or H3)
//! - candidate merging reaches a fixed point

use outline_oxide::layout::{BoundingBox, Line, LineDocument};
use outline_oxide::structure::{merge_candidates, HeadingCandidate};
use outline_oxide::{HeadingLevel, OutlineConfig, OutlineExtractor};
use proptest::prelude::*;
use std::collections::HashSet;

const VOCAB: [&str; 6] = ["Overview", "Methods", "Results", "Summary", "Background", "Field Notes"];
const SIZES: [f32; 4] = [11.0, 13.0, 16.0, 20.0];

/// (vocabulary index, size index, bold, numbering style)
type HeadingSpec = (usize, usize, bool, usize);

fn heading_spec() -> impl Strategy<Value = HeadingSpec> {
    (0..VOCAB.len(), 0..SIZES.len(), any::<bool>(), 0usize..3)
}

/// Pages of (optional heading, body line count).
fn pages_strategy() -> impl Strategy<Value = Vec<Vec<(Option<HeadingSpec>, usize)>>> {
    prop::collection::vec(
        prop::collection::vec((prop::option::of(heading_spec()), 0usize..4), 1..5),
        1..4,
    )
}

fn build_document(pages: &[Vec<(Option<HeadingSpec>, usize)>], unique: bool) -> LineDocument {
    let mut lines = Vec::new();
    let mut serial = 0;
    for (page, blocks) in pages.iter().enumerate() {
        let page = page as u32;
        let mut y = 50.0;
        let mut push = |text: String, size: f32, bold: bool, y: &mut f32| {
            let bold_frac = if bold { 1.0 } else { 0.0 };
            lines.push(Line::new(page, text, BoundingBox::new(72.0, *y, 480.0, *y + size), size, bold_frac));
            *y += 24.0;
        };

        for (heading, body) in blocks {
            if let Some((word, size, bold, numbering)) = heading {
                serial += 1;
                let mut text = match numbering {
                    0 => VOCAB[*word].to_string(),
                    1 => format!("{} {}", page + 1, VOCAB[*word]),
                    _ => format!("{}.{} {}", page + 1, word + 1, VOCAB[*word]),
                };
                if unique {
                    text = format!("{} Part {}", text, serial);
                }
                push(text, SIZES[*size], *bold, &mut y);
            }
            for i in 0..*body + 1 {
                push(format!("Body text line {} of this block goes on.", i), 10.0, false, &mut y);
            }
        }
    }
    LineDocument::new("generated.pdf", pages.len(), lines)
}

/// Property: the same document always yields the same title and outline
#[test]
fn proptest_extraction_is_deterministic() {
    proptest!(ProptestConfig::with_cases(64), |(pages in pages_strategy())| {
        let doc = build_document(&pages, false);
        let extractor = OutlineExtractor::new(OutlineConfig::default());
        let first = extractor.extract(&doc).unwrap();
        let second = extractor.extract(&doc).unwrap();
        prop_assert_eq!(first.title, second.title);
        prop_assert_eq!(first.outline, second.outline);
        prop_assert_eq!(first.sections, second.sections);
    });
}

/// Property: no repeated entries, page order, H1 first
#[test]
fn proptest_outline_shape() {
    proptest!(ProptestConfig::with_cases(128), |(pages in pages_strategy())| {
        let doc = build_document(&pages, false);
        let analysis = OutlineExtractor::default().extract(&doc).unwrap();

        let mut seen = HashSet::new();
        for entry in &analysis.outline {
            prop_assert!(
                seen.insert((entry.level, entry.text.clone(), entry.page)),
                "duplicate entry {:?}", entry
            );
            prop_assert!(entry.page >= 1 && entry.page as usize <= doc.page_count);
            prop_assert!(!entry.text.trim().is_empty());
        }

        prop_assert!(analysis.outline.windows(2).all(|w| w[0].page <= w[1].page));
        if let Some(first) = analysis.outline.first() {
            prop_assert_eq!(first.level, HeadingLevel::H1);
        }
    });
}

/// Property: no level is ever skipped, repeated heading texts included
#[test]
fn proptest_levels_never_skip() {
    proptest!(ProptestConfig::with_cases(128), |(pages in pages_strategy(), unique in any::<bool>())| {
        let doc = build_document(&pages, unique);
        let analysis = OutlineExtractor::default().extract(&doc).unwrap();

        for pair in analysis.outline.windows(2) {
            if pair[1].level == HeadingLevel::H3 {
                prop_assert!(
                    matches!(pair[0].level, HeadingLevel::H2 | HeadingLevel::H3),
                    "H3 {:?} follows {:?}", pair[1].text, pair[0]
                );
            }
        }
    });
}

/// Property: arbitrary text never makes the pipeline fail
#[test]
fn proptest_arbitrary_text_no_panic() {
    proptest!(ProptestConfig::with_cases(64), |(
        texts in prop::collection::vec("\\PC{0,40}", 1..20),
        sizes in prop::collection::vec(6.0f32..30.0, 20)
    )| {
        let lines = texts
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let y = 40.0 + i as f32 * 30.0;
                Line::new(0, text.as_str(), BoundingBox::new(72.0, y, 400.0, y + sizes[i]), sizes[i], (i % 2) as f32)
            })
            .collect();
        let doc = LineDocument::new("noise.pdf", 1, lines);
        prop_assert!(OutlineExtractor::default().extract(&doc).is_ok());
    });
}

fn candidate(index: usize, text: &str, size: f32, gap: Option<f32>) -> HeadingCandidate {
    HeadingCandidate {
        first_line: index,
        last_line: index,
        page: 0,
        text: text.to_string(),
        y0: index as f32 * 18.0,
        avg_size: size,
        rel_font_size: size / 10.0,
        gap_above: gap,
        is_bold: true,
        starts_numbering: false,
        score: 0.0,
        level: None,
    }
}

/// Property: merging an already merged sequence changes nothing
#[test]
fn proptest_merge_fixed_point() {
    let entry = (
        prop::sample::select(vec!["3", "4.", "Results", "of the", "2.1 Scope", "APPENDIX", "APPENDIX"]),
        prop::sample::select(vec![12.0f32, 12.2, 14.0]),
        prop::option::of(prop::sample::select(vec![0.5f32, 1.5, 2.5, 8.0])),
    );
    proptest!(ProptestConfig::with_cases(128), |(specs in prop::collection::vec(entry, 0..12))| {
        let config = OutlineConfig::default();
        let candidates: Vec<HeadingCandidate> = specs
            .iter()
            .enumerate()
            .map(|(i, (text, size, gap))| candidate(i, text, *size, *gap))
            .collect();

        let once = merge_candidates(candidates.clone(), &config);
        let twice = merge_candidates(once.clone(), &config);
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.len() <= candidates.len());

        // Every source line is covered exactly once, in order.
        let mut next = 0;
        for c in &once {
            prop_assert!(c.first_line <= c.last_line);
            prop_assert!(c.first_line <= next && c.last_line >= next);
            next = c.last_line + 1;
        }
        prop_assert_eq!(next, candidates.len());
    });
}
