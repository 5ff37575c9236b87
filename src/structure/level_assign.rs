//! Level assignment over the ordered candidate sequence.
//!
//! Steps, in order:
//! 1. forward fragment merge and backward numeral merge (to a fixed point)
//! 2. title selection, with an H1 clone when the title is itself numbered
//! 3. levels from numbering depth, then font tiers for the rest
//! 4. context promotion so the hierarchy opens at H1 and never skips a level
//!
//! Merges build new sequences; no candidate is ever split.

use crate::config::OutlineConfig;
use crate::structure::types::{HeadingCandidate, HeadingLevel, OutlineEntry};
use crate::text::numbering::{is_pure_numeral, looks_like_chapter, numbering_depth, strip_numbering_prefix};
use std::collections::HashSet;

/// All-caps headings that stay distinct even when stacked tightly.
pub const CAPS_STOP_LIST: [&str; 5] = [
    "RELATED WORK",
    "CONCLUSIONS",
    "APPENDIX",
    "ADDITIONAL",
    "USER STUDY RESULTS",
];

/// Result of level assignment.
#[derive(Debug, Clone, Default)]
pub struct LevelAssignment {
    /// Every candidate (title included) with its final level, in reading order
    pub candidates: Vec<HeadingCandidate>,
    /// The chosen title, if there was any candidate
    pub title: Option<HeadingCandidate>,
}

impl LevelAssignment {
    /// Candidates other than the title.
    pub fn headings(&self) -> impl Iterator<Item = &HeadingCandidate> {
        self.candidates.iter().filter(|c| !c.is_title())
    }
}

/// Assign levels to reading-ordered candidates.
///
/// An empty input yields an empty assignment with no title.
pub fn assign_levels(mut candidates: Vec<HeadingCandidate>, config: &OutlineConfig) -> LevelAssignment {
    if candidates.is_empty() {
        return LevelAssignment::default();
    }
    candidates.sort_by_key(|c| c.first_line);

    let mut remaining = merge_candidates(candidates, config);

    let title_idx = select_title(&remaining);
    let mut title = remaining.remove(title_idx);
    title.level = Some(HeadingLevel::Title);
    log::debug!("Title: {:?} (page {})", title.text, title.page_number());

    if looks_like_chapter(&title.text) {
        let mut clone = title.clone();
        clone.level = Some(HeadingLevel::H1);
        let at = remaining.partition_point(|c| c.first_line < title.first_line);
        remaining.insert(at, clone);
    }

    for c in remaining.iter_mut() {
        c.level = numbering_depth(&c.text).and_then(HeadingLevel::from_depth);
    }

    let tiers = cluster_font_sizes(&remaining, config.font_tier_tolerance);
    for c in remaining.iter_mut().filter(|c| c.level.is_none()) {
        c.level = Some(tier_level(&tiers, c.avg_size));
    }

    promote(&mut remaining);

    let mut ordered = Vec::with_capacity(remaining.len() + 1);
    ordered.push(title.clone());
    ordered.extend(remaining);
    ordered.sort_by_key(|c| c.first_line);

    LevelAssignment {
        candidates: ordered,
        title: Some(title),
    }
}

/// Run the forward fragment merge and the backward numeral merge until
/// neither changes the sequence.
pub fn merge_candidates(candidates: Vec<HeadingCandidate>, config: &OutlineConfig) -> Vec<HeadingCandidate> {
    let mut current = candidates;
    loop {
        let before = current.len();
        current = merge_numerals(merge_fragments(current, config), config);
        if current.len() == before {
            return current;
        }
        log::trace!("Merged {} candidates", before - current.len());
    }
}

/// Append vertically adjacent, similarly sized fragments to the candidate above.
pub fn merge_fragments(candidates: Vec<HeadingCandidate>, config: &OutlineConfig) -> Vec<HeadingCandidate> {
    let mut out: Vec<HeadingCandidate> = Vec::with_capacity(candidates.len());
    for next in candidates {
        if let Some(prev) = out.last_mut() {
            if is_fragment_of(prev, &next, config) {
                prev.text = format!("{} {}", prev.text, next.text).trim().to_string();
                prev.last_line = next.last_line;
                continue;
            }
        }
        out.push(next);
    }
    out
}

fn is_fragment_of(prev: &HeadingCandidate, next: &HeadingCandidate, config: &OutlineConfig) -> bool {
    prev.page == next.page
        && next.first_line == prev.last_line + 1
        && next.gap_above.map(|g| g <= config.fragment_merge_gap).unwrap_or(false)
        && (prev.avg_size - next.avg_size).abs() <= config.merge_size_tolerance
        && numbering_depth(&next.text).is_none()
        && !both_caps_stop(&prev.text, &next.text)
}

fn both_caps_stop(a: &str, b: &str) -> bool {
    let stop = |text: &str| {
        let bare = strip_numbering_prefix(text);
        is_all_caps(&bare) && CAPS_STOP_LIST.contains(&bare.trim().to_uppercase().as_str())
    };
    stop(a) && stop(b)
}

fn is_all_caps(text: &str) -> bool {
    let mut letters = text.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(|c| c.is_uppercase())
}

/// Prepend numeral-only lines to the candidate just above them.
pub fn merge_numerals(candidates: Vec<HeadingCandidate>, config: &OutlineConfig) -> Vec<HeadingCandidate> {
    let mut out: Vec<HeadingCandidate> = Vec::with_capacity(candidates.len());
    for cur in candidates {
        if let Some(prev) = out.last_mut() {
            if is_pure_numeral(&cur.text)
                && prev.page == cur.page
                && cur.gap_above.map(|g| g <= config.numeral_merge_gap).unwrap_or(false)
                && (prev.avg_size - cur.avg_size).abs() <= config.merge_size_tolerance
            {
                prev.text = format!("{} {}", cur.text.trim(), prev.text).trim().to_string();
                prev.last_line = prev.last_line.max(cur.last_line);
                continue;
            }
        }
        out.push(cur);
    }
    out
}

/// Index of the title: the largest page-1 candidate by (relative size,
/// absolute size), or the largest overall when page 1 has none. The first
/// of equals wins.
fn select_title(candidates: &[HeadingCandidate]) -> usize {
    let on_first_page = candidates.iter().any(|c| c.page == 0);
    let mut best: Option<usize> = None;
    for (i, c) in candidates.iter().enumerate() {
        if on_first_page && c.page != 0 {
            continue;
        }
        let better = match best {
            None => true,
            Some(b) => {
                let cur = &candidates[b];
                (c.rel_font_size, c.avg_size) > (cur.rel_font_size, cur.avg_size)
            }
        };
        if better {
            best = Some(i);
        }
    }
    best.unwrap_or(0)
}

/// Group the distinct font sizes (rounded to 0.01pt) into tiers, largest first.
///
/// A size joins the first tier whose anchor (its largest size) is within
/// `tolerance`, otherwise it opens a new tier.
pub fn cluster_font_sizes(candidates: &[HeadingCandidate], tolerance: f32) -> Vec<Vec<f32>> {
    let mut sizes: Vec<f32> = candidates.iter().map(|c| round2(c.avg_size)).collect();
    sizes.sort_by(|a, b| crate::utils::safe_float_cmp(*b, *a));
    sizes.dedup();

    let mut tiers: Vec<Vec<f32>> = Vec::new();
    for size in sizes {
        match tiers.iter_mut().find(|t| (t[0] - size).abs() <= tolerance) {
            Some(tier) => tier.push(size),
            None => tiers.push(vec![size]),
        }
    }
    tiers
}

fn tier_level(tiers: &[Vec<f32>], avg_size: f32) -> HeadingLevel {
    let size = round2(avg_size);
    match tiers.iter().position(|t| t.contains(&size)) {
        Some(0) => HeadingLevel::H1,
        Some(1) => HeadingLevel::H2,
        _ => HeadingLevel::H3,
    }
}

/// Left-to-right promotion state: an H3 not preceded by H2/H3 becomes H2,
/// and an H2 before any H1 becomes H1.
#[derive(Debug, Default)]
struct Promoter {
    seen_h1: bool,
    last: Option<HeadingLevel>,
}

impl Promoter {
    fn next(&mut self, level: HeadingLevel) -> HeadingLevel {
        let mut level = level;
        if level == HeadingLevel::H3 && !matches!(self.last, Some(HeadingLevel::H2) | Some(HeadingLevel::H3)) {
            level = HeadingLevel::H2;
        }
        if level == HeadingLevel::H2 && !self.seen_h1 {
            level = HeadingLevel::H1;
        }
        if level == HeadingLevel::H1 {
            self.seen_h1 = true;
        }
        self.last = Some(level);
        level
    }
}

fn promote(candidates: &mut [HeadingCandidate]) {
    let mut promoter = Promoter::default();
    for c in candidates.iter_mut() {
        let level = promoter.next(c.level.unwrap_or(HeadingLevel::H3));
        if Some(level) != c.level {
            log::trace!("Promoted {:?} to {}", c.text, level);
        }
        c.level = Some(level);
    }
}

/// Outline entries of an assignment: every non-title heading with non-empty
/// text, deduplicated, ordered by page.
///
/// Dedupe and promotion alternate until neither changes the entries, since
/// dropping a duplicate can leave an H3 directly under an H1.
pub fn outline_entries(assignment: &LevelAssignment) -> Vec<OutlineEntry> {
    let entries: Vec<OutlineEntry> = assignment
        .headings()
        .filter_map(|c| {
            let text = c.text.trim();
            match c.level {
                Some(level) if level.is_outline_level() && !text.is_empty() => {
                    Some(OutlineEntry::new(level, text, c.page_number()))
                }
                _ => None,
            }
        })
        .collect();

    let mut entries = entries;
    entries.sort_by_key(|e| e.page);
    loop {
        let before = entries.len();
        entries = dedupe_outline(entries);
        let mut promoter = Promoter::default();
        for e in entries.iter_mut() {
            e.level = promoter.next(e.level);
        }
        if entries.len() == before {
            return entries;
        }
    }
}

/// Drop repeated (level, text, page) triples, keeping the first occurrence.
pub fn dedupe_outline(entries: Vec<OutlineEntry>) -> Vec<OutlineEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|e| seen.insert((e.level, e.text.clone(), e.page)))
        .collect()
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
