//! Table of Contents page detection.
//!
//! A TOC page is recognized from text alone: a large
//! share of its lines carry a dot leader (3+ consecutive dots) and end with a
//! page number, e.g. `Chapter 2 ............ 17`.

use crate::layout::line::Line;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

lazy_static! {
    /// Trailing page number token ("... 123")
    static ref RE_TRAILING_PAGE: Regex = Regex::new(r"[0-9]{1,4}\s*$").unwrap();
}

/// TOC detector configuration
#[derive(Debug, Clone)]
pub struct TocDetector {
    /// Minimum number of dots required to detect a leader (default: 3)
    pub min_dot_leader_length: usize,
    /// Share of TOC-like lines needed to mark a page as TOC (default: 0.40)
    pub line_ratio: f32,
    /// Minimum number of lines on a TOC page (default: 5)
    pub min_lines: usize,
}

impl Default for TocDetector {
    fn default() -> Self {
        Self {
            min_dot_leader_length: 3,
            line_ratio: 0.40,
            min_lines: 5,
        }
    }
}

impl TocDetector {
    /// Create a new TOC detector with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page thresholds (share of TOC-like lines, minimum line count).
    pub fn with_page_thresholds(mut self, line_ratio: f32, min_lines: usize) -> Self {
        self.line_ratio = line_ratio;
        self.min_lines = min_lines;
        self
    }

    /// True if the text contains a run of at least `min_dot_leader_length` dots.
    ///
    /// Leader glyphs count by the number of dots they draw: `.` and `․` count
    /// one, `‥` two, `…` three.
    pub fn has_dot_leader(&self, text: &str) -> bool {
        let mut run = 0usize;
        for c in text.chars() {
            let dots = match c {
                '.' | '․' => 1,
                '‥' => 2,
                '…' => 3,
                _ => 0,
            };
            if dots == 0 {
                run = 0;
                continue;
            }
            run += dots;
            if run >= self.min_dot_leader_length {
                return true;
            }
        }
        false
    }

    /// A dot-leader line ending in a page number.
    pub fn is_toc_entry(&self, text: &str) -> bool {
        let trimmed = text.trim();
        self.has_dot_leader(trimmed) && RE_TRAILING_PAGE.is_match(trimmed)
    }

    /// Page indexes (0-based) that look like a table of contents.
    pub fn detect_toc_pages(&self, lines: &[Line]) -> BTreeSet<u32> {
        let mut per_page: IndexMap<u32, (usize, usize)> = IndexMap::new();
        for line in lines {
            let entry = per_page.entry(line.page).or_insert((0, 0));
            entry.0 += 1;
            if self.is_toc_entry(&line.text) {
                entry.1 += 1;
            }
        }

        per_page
            .into_iter()
            .filter(|(_, (total, toc_like))| {
                *total >= self.min_lines
                    && (*toc_like as f32 / *total as f32) >= self.line_ratio
            })
            .map(|(page, _)| page)
            .collect()
    }
}
