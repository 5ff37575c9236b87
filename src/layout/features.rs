//! Per-line heading signals.
//!
//! Document-wide aggregates (body font size, left margins, TOC pages,
//! repetition counts) are computed once into an immutable [`DocumentStats`]
//! and then read by every per-line computation. Each [`Line`] yields exactly
//! one [`LineFeatures`] record, in the same order.

use crate::config::OutlineConfig;
use crate::layout::line::Line;
use crate::layout::toc_detector::TocDetector;
use crate::text::numbering::starts_numbering;
use crate::text::script::{detect_script, to_logical_order, Script, ScriptRatios, TextOrder};
use crate::utils::safe_float_cmp;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

lazy_static! {
    /// Figure/table caption prefixes
    static ref RE_CAPTION: Regex = Regex::new(r"(?i)^(?:figure\b|fig\.|table\b|tab\.)").unwrap();
}

/// Sentence-final punctuation across the supported scripts.
const SENTENCE_END: [char; 5] = ['.', '?', '!', '。', '؟'];

/// Immutable document-wide aggregates.
#[derive(Debug, Clone)]
pub struct DocumentStats {
    /// Robust body-text font size (points); 1.0 when no sizes were observed
    pub body_font_size: f32,
    /// Number of pages in the document
    pub page_count: usize,
    /// Median left edge of the lines on each page
    pub page_left_margins: IndexMap<u32, f32>,
    /// Pages detected as table of contents
    pub toc_pages: BTreeSet<u32>,
    /// Distinct-page count of every normalized line text
    pub repetitions: IndexMap<String, usize>,
}

impl DocumentStats {
    /// Compute the aggregates for a full line list.
    pub fn compute(lines: &[Line], page_count: usize, config: &OutlineConfig) -> Self {
        let body_font_size = body_font_size(lines);
        let page_left_margins = page_left_margins(lines);
        let toc_pages = TocDetector::new()
            .with_page_thresholds(config.toc_line_ratio, config.toc_min_lines)
            .detect_toc_pages(lines);

        let mut pages_by_text: IndexMap<String, BTreeSet<u32>> = IndexMap::new();
        for line in lines {
            let key = normalized_text(&line.text, config.rtl_input_order);
            pages_by_text.entry(key).or_default().insert(line.page);
        }
        let repetitions = pages_by_text
            .into_iter()
            .map(|(text, pages)| (text, pages.len()))
            .collect();

        log::debug!(
            "Body font size {:.2}pt, TOC pages {:?}",
            body_font_size,
            toc_pages
        );

        Self {
            body_font_size,
            page_count,
            page_left_margins,
            toc_pages,
            repetitions,
        }
    }

    /// Median left edge of a page (0.0 for pages without lines).
    pub fn left_margin(&self, page: u32) -> f32 {
        self.page_left_margins.get(&page).copied().unwrap_or(0.0)
    }

    /// True if the page was detected as a table of contents.
    pub fn is_toc_page(&self, page: u32) -> bool {
        self.toc_pages.contains(&page)
    }

    /// Number of distinct pages the normalized text appears on.
    pub fn repeat_count(&self, text: &str) -> usize {
        self.repetitions.get(text).copied().unwrap_or(0)
    }
}

/// Derived, read-only signals of one line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineFeatures {
    /// Index of the source line
    pub line_index: usize,
    /// Page index (0-based)
    pub page: u32,
    /// Trimmed text in logical order
    pub text: String,
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Average font size (points)
    pub avg_size: f32,
    /// Font size relative to the body text size
    pub rel_font_size: f32,
    /// Bold fraction above the bold threshold
    pub is_bold: bool,
    /// Whitespace-separated words
    pub word_count: usize,
    /// Characters
    pub char_count: usize,
    /// Opens with a chapter/section numbering token
    pub starts_numbering: bool,
    /// Every letter uppercase (at least one letter)
    pub all_caps: bool,
    /// Every word starts uppercase or with a non-letter
    pub title_case: bool,
    /// Ends with sentence punctuation
    pub ends_with_period: bool,
    /// Distance to the previous line on the same page; `None` for the first line
    pub gap_above: Option<f32>,
    /// Number of distinct pages this exact text appears on
    pub repeat_count: usize,
    /// Starts with a figure/table caption prefix
    pub is_caption_like: bool,
    /// Contains a dot leader
    pub has_dot_leader: bool,
    /// Dominant script
    pub script: Script,
    /// Per-script character shares
    pub script_ratios: ScriptRatios,
    /// Final heading-candidate decision (set by the heading detector)
    pub is_candidate: bool,
}

impl LineFeatures {
    /// 1-based page number.
    pub fn page_number(&self) -> u32 {
        self.page + 1
    }

    /// Lowercased text.
    pub fn lower_text(&self) -> String {
        self.text.to_lowercase()
    }
}

/// Compute the aggregates and one feature record per line.
///
/// Lines must already be in reading order. Arabic-script text is converted to
/// logical order before anything else looks at it.
pub fn compute_features(
    lines: &[Line],
    page_count: usize,
    config: &OutlineConfig,
) -> (DocumentStats, Vec<LineFeatures>) {
    let stats = DocumentStats::compute(lines, page_count, config);
    let toc = TocDetector::new();

    let features = lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            let text = normalized_text(&line.text, config.rtl_input_order);
            let (script, script_ratios) = detect_script(&text);

            let words: Vec<&str> = text.split_whitespace().collect();
            let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
            let all_caps = !letters.is_empty() && letters.iter().all(|c| c.is_uppercase());
            let title_case = !words.is_empty()
                && words.iter().all(|w| {
                    w.chars()
                        .next()
                        .map(|c| c.is_uppercase() || !c.is_alphabetic())
                        .unwrap_or(true)
                });

            let gap_above = idx
                .checked_sub(1)
                .map(|prev| &lines[prev])
                .filter(|prev| prev.page == line.page)
                .map(|prev| line.y0() - prev.y1());

            let rel_font_size = round3(line.avg_size / stats.body_font_size);

            LineFeatures {
                line_index: idx,
                page: line.page,
                x0: line.x0(),
                y0: line.y0(),
                avg_size: line.avg_size,
                rel_font_size,
                is_bold: line.bold_frac >= config.bold_fraction_min,
                word_count: words.len(),
                char_count: text.chars().count(),
                starts_numbering: starts_numbering(&text, script),
                all_caps,
                title_case,
                ends_with_period: text.ends_with(SENTENCE_END),
                gap_above,
                repeat_count: stats.repeat_count(&text),
                is_caption_like: RE_CAPTION.is_match(&text),
                has_dot_leader: toc.has_dot_leader(&text),
                script,
                script_ratios,
                is_candidate: false,
                text,
            }
        })
        .collect();

    (stats, features)
}

/// Body-text font size: median of the smallest 95% of observed sizes.
pub fn body_font_size(lines: &[Line]) -> f32 {
    let mut sizes: Vec<f32> = lines
        .iter()
        .map(|l| l.avg_size)
        .filter(|s| *s > 0.0)
        .collect();
    if sizes.is_empty() {
        return 1.0;
    }
    sizes.sort_by(|a, b| safe_float_cmp(*a, *b));

    let keep = (sizes.len() as f32 * 0.95) as usize;
    let trimmed = if keep == 0 { &sizes[..] } else { &sizes[..keep] };
    match median(trimmed) {
        Some(m) if m > 0.0 => m,
        _ => 1.0,
    }
}

/// Median left edge of the lines on each page.
pub fn page_left_margins(lines: &[Line]) -> IndexMap<u32, f32> {
    let mut by_page: IndexMap<u32, Vec<f32>> = IndexMap::new();
    for line in lines {
        by_page.entry(line.page).or_default().push(line.x0());
    }
    by_page
        .into_iter()
        .map(|(page, mut xs)| {
            xs.sort_by(|a, b| safe_float_cmp(*a, *b));
            (page, median(&xs).unwrap_or(0.0))
        })
        .collect()
}

/// Trimmed, logical-order text used as the repetition key.
fn normalized_text(text: &str, order: TextOrder) -> String {
    to_logical_order(text.trim(), order).into_owned()
}

/// Median of sorted values, averaging the two middle ones for even counts.
fn median(sorted: &[f32]) -> Option<f32> {
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted[n / 2]),
        _ => Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0),
    }
}

fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::line::BoundingBox;

    fn line(page: u32, y: f32, text: &str, size: f32, bold: f32) -> Line {
        Line::new(page, text, BoundingBox::new(72.0, y, 300.0, y + size), size, bold)
    }

    #[test]
    fn test_body_font_size_trims_display_sizes() {
        let mut lines: Vec<Line> = (0..19).map(|i| line(0, i as f32 * 14.0, "body", 10.0, 0.0)).collect();
        lines.push(line(0, 400.0, "Huge", 48.0, 0.0));
        assert_eq!(body_font_size(&lines), 10.0);
    }

    #[test]
    fn test_body_font_size_defaults_to_one() {
        assert_eq!(body_font_size(&[]), 1.0);
        let zero = vec![line(0, 0.0, "x", 0.0, 0.0)];
        assert_eq!(body_font_size(&zero), 1.0);
    }

    #[test]
    fn test_body_font_size_even_count_averages() {
        // 95% of 2 truncates to 1 element
        let lines = vec![line(0, 0.0, "a", 10.0, 0.0), line(0, 20.0, "b", 12.0, 0.0)];
        assert_eq!(body_font_size(&lines), 10.0);
        let lines: Vec<Line> = [10.0, 11.0, 12.0, 13.0, 14.0]
            .iter()
            .enumerate()
            .map(|(i, s)| line(0, i as f32 * 20.0, "x", *s, 0.0))
            .collect();
        // keep 4 → median of 10, 11, 12, 13
        assert_eq!(body_font_size(&lines), 11.5);
    }

    #[test]
    fn test_left_margins() {
        let lines = vec![
            Line::new(0, "a", BoundingBox::new(70.0, 0.0, 100.0, 10.0), 10.0, 0.0),
            Line::new(0, "b", BoundingBox::new(72.0, 20.0, 100.0, 30.0), 10.0, 0.0),
            Line::new(0, "c", BoundingBox::new(200.0, 40.0, 300.0, 50.0), 10.0, 0.0),
            Line::new(1, "d", BoundingBox::new(50.0, 0.0, 100.0, 10.0), 10.0, 0.0),
        ];
        let margins = page_left_margins(&lines);
        assert_eq!(margins[&0], 72.0);
        assert_eq!(margins[&1], 50.0);
    }

    #[test]
    fn test_features_basic() {
        let lines = vec![
            line(0, 50.0, "1 Introduction", 14.0, 1.0),
            line(0, 70.0, "This is body text.", 10.0, 0.0),
            line(0, 84.0, "More body text here.", 10.0, 0.0),
        ];
        let config = OutlineConfig::default();
        let (stats, feats) = compute_features(&lines, 1, &config);
        assert_eq!(stats.body_font_size, 10.0);
        assert_eq!(feats.len(), 3);

        let h = &feats[0];
        assert_eq!(h.rel_font_size, 1.4);
        assert!(h.is_bold);
        assert!(h.starts_numbering);
        assert!(h.title_case);
        assert!(!h.all_caps);
        assert_eq!(h.gap_above, None);
        assert_eq!(h.word_count, 2);
        assert_eq!(h.script, Script::Latin);
        assert_eq!(h.page_number(), 1);

        let body = &feats[1];
        assert!(body.ends_with_period);
        assert!(!body.title_case);
        assert_eq!(body.gap_above, Some(6.0));
        assert_eq!(body.repeat_count, 1);
    }

    #[test]
    fn test_gap_resets_on_new_page() {
        let lines = vec![line(0, 700.0, "last", 10.0, 0.0), line(1, 50.0, "first", 10.0, 0.0)];
        let (_, feats) = compute_features(&lines, 2, &OutlineConfig::default());
        assert_eq!(feats[1].gap_above, None);
    }

    #[test]
    fn test_repetition_counts_distinct_pages() {
        let lines = vec![
            line(0, 10.0, "ACME Corp", 10.0, 0.0),
            line(0, 700.0, "ACME Corp", 10.0, 0.0),
            line(1, 10.0, " ACME Corp ", 10.0, 0.0),
            line(2, 10.0, "Other", 10.0, 0.0),
        ];
        let (stats, feats) = compute_features(&lines, 3, &OutlineConfig::default());
        assert_eq!(stats.repeat_count("ACME Corp"), 2);
        assert_eq!(feats[2].repeat_count, 2);
        assert_eq!(feats[3].repeat_count, 1);
    }

    #[test]
    fn test_caption_and_dot_leader_flags() {
        let lines = vec![
            line(0, 10.0, "Figure 3: Throughput", 10.0, 0.0),
            line(0, 30.0, "Fig. 2 Latency", 10.0, 0.0),
            line(0, 50.0, "Tables and chairs", 10.0, 0.0),
            line(0, 70.0, "Overview ........ 4", 10.0, 0.0),
        ];
        let (_, feats) = compute_features(&lines, 1, &OutlineConfig::default());
        assert!(feats[0].is_caption_like);
        assert!(feats[1].is_caption_like);
        assert!(!feats[2].is_caption_like);
        assert!(feats[3].has_dot_leader);
    }

    #[test]
    fn test_all_caps_requires_letters() {
        let lines = vec![line(0, 10.0, "RESULTS 2", 10.0, 0.0), line(0, 30.0, "2024", 10.0, 0.0)];
        let (_, feats) = compute_features(&lines, 1, &OutlineConfig::default());
        assert!(feats[0].all_caps);
        assert!(!feats[1].all_caps);
    }

    #[test]
    fn test_visual_arabic_is_reordered() {
        // "الفصل 1" in display order
        let lines = vec![line(0, 10.0, "1 لصفلا", 12.0, 0.0)];
        let (_, feats) = compute_features(&lines, 1, &OutlineConfig::default());
        assert_eq!(feats[0].text, "الفصل 1");
        assert_eq!(feats[0].script, Script::Arabic);
        assert!(feats[0].starts_numbering);
    }
}
