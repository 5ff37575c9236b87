//! Outline evaluation against ground truth.
//!
//! Entries are compared as sets of (level, page, normalized text). Strict mode
//! normalizes whitespace and case; lenient mode also drops a leading
//! numbering prefix ("2.1 Scope" matches "Scope").

use crate::structure::types::{HeadingLevel, OutlineEntry};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;

lazy_static! {
    /// Leading "1.2.3 " numbering prefix
    static ref RE_NUMBER_PREFIX: Regex = Regex::new(r"^\d+(?:\.\d+)*\s+").unwrap();

    /// Whitespace runs
    static ref RE_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Comparison mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Exact text after whitespace/case normalization
    Strict,
    /// Strict plus numbering prefix removal
    Lenient,
}

/// Counts and rates of one comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Metrics {
    /// True positives
    pub tp: usize,
    /// False positives
    pub fp: usize,
    /// False negatives
    #[serde(rename = "fn")]
    pub fn_: usize,
    /// Precision (1.0 when nothing was predicted)
    pub precision: f64,
    /// Recall (1.0 when nothing was expected)
    pub recall: f64,
    /// Harmonic mean of precision and recall
    pub f1: f64,
}

impl Metrics {
    /// Rates from raw counts, rounded to 4 decimals.
    pub fn from_counts(tp: usize, fp: usize, fn_: usize) -> Self {
        let precision = if tp + fp > 0 { tp as f64 / (tp + fp) as f64 } else { 1.0 };
        let recall = if tp + fn_ > 0 { tp as f64 / (tp + fn_) as f64 } else { 1.0 };
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };
        Self {
            tp,
            fp,
            fn_,
            precision: round4(precision),
            recall: round4(recall),
            f1: round4(f1),
        }
    }

    /// Add another comparison's counts and recompute the rates.
    pub fn accumulate(&self, other: &Metrics) -> Metrics {
        Metrics::from_counts(self.tp + other.tp, self.fp + other.fp, self.fn_ + other.fn_)
    }
}

/// Strict and lenient metrics of one comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Comparison {
    /// Strict mode
    pub strict: Metrics,
    /// Lenient mode
    pub lenient: Metrics,
}

/// Whitespace-collapsed, lowercased text.
pub fn normalize_text(text: &str) -> String {
    RE_WHITESPACE.replace_all(text.trim(), " ").to_lowercase()
}

type Key = (HeadingLevel, u32, String);

fn entry_set(outline: &[OutlineEntry], mode: MatchMode) -> BTreeSet<Key> {
    outline
        .iter()
        .map(|e| {
            let text = match mode {
                MatchMode::Strict => e.text.as_str().into(),
                MatchMode::Lenient => RE_NUMBER_PREFIX.replace(&e.text, ""),
            };
            (e.level, e.page, normalize_text(&text))
        })
        .collect()
}

fn metrics(gt: &BTreeSet<Key>, pred: &BTreeSet<Key>) -> Metrics {
    let tp = gt.intersection(pred).count();
    Metrics::from_counts(tp, pred.len() - tp, gt.len() - tp)
}

/// Compare a predicted outline with ground truth in both modes.
pub fn compare(gt: &[OutlineEntry], pred: &[OutlineEntry]) -> Comparison {
    let mode = |m| metrics(&entry_set(gt, m), &entry_set(pred, m));
    Comparison {
        strict: mode(MatchMode::Strict),
        lenient: mode(MatchMode::Lenient),
    }
}

/// Strict metrics per level, for every level present on either side.
pub fn level_breakdown(gt: &[OutlineEntry], pred: &[OutlineEntry]) -> IndexMap<HeadingLevel, Metrics> {
    let levels: BTreeSet<HeadingLevel> = gt.iter().chain(pred).map(|e| e.level).collect();
    levels
        .into_iter()
        .map(|level| {
            let of_level = |outline: &[OutlineEntry]| -> BTreeSet<Key> {
                entry_set(outline, MatchMode::Strict)
                    .into_iter()
                    .filter(|k| k.0 == level)
                    .collect()
            };
            (level, metrics(&of_level(gt), &of_level(pred)))
        })
        .collect()
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e(level: HeadingLevel, text: &str, page: u32) -> OutlineEntry {
        OutlineEntry::new(level, text, page)
    }

    #[test]
    fn test_perfect_match() {
        let gt = vec![e(HeadingLevel::H1, "Intro", 1), e(HeadingLevel::H2, "Scope", 2)];
        let result = compare(&gt, &gt);
        assert_eq!(result.strict.tp, 2);
        assert_eq!(result.strict.f1, 1.0);
    }

    #[test]
    fn test_normalization() {
        let gt = vec![e(HeadingLevel::H1, "Project   Overview", 1)];
        let pred = vec![e(HeadingLevel::H1, " project overview ", 1)];
        assert_eq!(compare(&gt, &pred).strict.tp, 1);
    }

    #[test]
    fn test_lenient_strips_numbering() {
        let gt = vec![e(HeadingLevel::H2, "2.1 Scope", 3)];
        let pred = vec![e(HeadingLevel::H2, "Scope", 3)];
        let result = compare(&gt, &pred);
        assert_eq!(result.strict.tp, 0);
        assert_eq!(result.strict.precision, 0.0);
        assert_eq!(result.strict.f1, 0.0);
        assert_eq!(result.lenient.tp, 1);
    }

    #[test]
    fn test_empty_sides() {
        let result = compare(&[], &[]);
        assert_eq!(result.strict.precision, 1.0);
        assert_eq!(result.strict.recall, 1.0);
        assert_eq!(result.strict.f1, 1.0);
    }

    #[test]
    fn test_rates_rounded() {
        let m = Metrics::from_counts(1, 2, 0);
        assert_eq!(m.precision, 0.3333);
        assert_eq!(m.recall, 1.0);
        assert_eq!(m.f1, 0.5);
    }

    #[test]
    fn test_level_breakdown() {
        let gt = vec![e(HeadingLevel::H1, "A", 1), e(HeadingLevel::H2, "B", 1)];
        let pred = vec![e(HeadingLevel::H1, "A", 1), e(HeadingLevel::H3, "B", 1)];
        let by_level = level_breakdown(&gt, &pred);
        let levels: Vec<_> = by_level.keys().copied().collect();
        assert_eq!(levels, vec![HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3]);
        assert_eq!(by_level[&HeadingLevel::H1].tp, 1);
        assert_eq!(by_level[&HeadingLevel::H2].fn_, 1);
        assert_eq!(by_level[&HeadingLevel::H3].fp, 1);
    }

    #[test]
    fn test_accumulate() {
        let a = Metrics::from_counts(1, 0, 1);
        let b = Metrics::from_counts(1, 1, 0);
        let total = a.accumulate(&b);
        assert_eq!((total.tp, total.fp, total.fn_), (2, 1, 1));
        assert_eq!(total.precision, 0.6667);
    }
}
