//! Configuration for outline extraction.
//!
//! All thresholds used by the heading detector, scorer, level assignor and
//! section builder live here so a run can be tuned without touching the passes.

use crate::text::script::TextOrder;

/// Weights for the continuous heading score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Weight of relative font size (capped at 2.0)
    pub rel_font: f32,
    /// Bonus for bold lines
    pub bold: f32,
    /// Bonus for lines starting with a numbering token
    pub numbering: f32,
    /// Bonus for vertically isolated lines
    pub gap_above: f32,
    /// Bonus for Title Case (Latin only)
    pub title_case: f32,
    /// Bonus for ALL CAPS (Latin only)
    pub all_caps: f32,
    /// Flat bonus for scripts without a casing signal
    pub non_latin_bonus: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            rel_font: 1.6,
            bold: 0.8,
            numbering: 0.9,
            gap_above: 0.4,
            title_case: 0.2,
            all_caps: 0.3,
            non_latin_bonus: 0.2,
        }
    }
}

/// Outline extraction configuration.
#[derive(Debug, Clone)]
pub struct OutlineConfig {
    /// Relative font size at which a line is heading-sized.
    pub rel_font_heading_min: f32,
    /// Lowered relative size threshold for bold lines.
    pub rel_font_heading_lowered: f32,
    /// Bold fraction at or above which a line counts as bold.
    pub bold_fraction_min: f32,
    /// Maximum word count of a heading.
    pub max_heading_words: usize,
    /// Maximum word count for the "short bold line" rule.
    pub max_short_heading_words: usize,
    /// Minimum number of pages a running header must appear on.
    pub running_header_min_pages: usize,
    /// Minimum fraction of pages a running header must appear on.
    pub running_header_fraction: f32,
    /// Fraction of dot-leader lines that marks a TOC page.
    pub toc_line_ratio: f32,
    /// Minimum line count of a TOC page.
    pub toc_min_lines: usize,
    /// Indentation past the page's left margin that marks a quote/list block (points).
    pub right_indent_slack: f32,
    /// Heading score weights.
    pub weights: ScoreWeights,
    /// Gap above (points) counted as vertical isolation.
    pub gap_above_isolation: f32,
    /// Maximum gap (points) between fragments of one heading.
    pub fragment_merge_gap: f32,
    /// Maximum gap (points) between a detached numeral and its heading.
    pub numeral_merge_gap: f32,
    /// Font size difference (points) tolerated when merging candidates.
    pub merge_size_tolerance: f32,
    /// Font size difference (points) tolerated within one font tier.
    pub font_tier_tolerance: f32,
    /// Character order of Arabic-script input text.
    pub rtl_input_order: TextOrder,
    /// Emit `_debug_*` keys in the outline document.
    pub include_debug: bool,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            rel_font_heading_min: 1.12,
            rel_font_heading_lowered: 1.05,
            bold_fraction_min: 0.6,
            max_heading_words: 20,
            max_short_heading_words: 12,
            running_header_min_pages: 2,
            running_header_fraction: 0.5,
            toc_line_ratio: 0.40,
            toc_min_lines: 5,
            right_indent_slack: 50.0,
            weights: ScoreWeights::default(),
            gap_above_isolation: 6.0,
            fragment_merge_gap: 2.0,
            numeral_merge_gap: 3.0,
            merge_size_tolerance: 0.5,
            font_tier_tolerance: 0.75,
            rtl_input_order: TextOrder::Visual,
            include_debug: false,
        }
    }

    /// Defaults, with debug output switched on when `DEBUG=1`.
    pub fn from_env() -> Self {
        let debug = std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false);
        Self::new().with_debug(debug)
    }

    /// Include `_debug_*` keys in outline documents.
    pub fn with_debug(mut self, enable: bool) -> Self {
        self.include_debug = enable;
        self
    }

    /// Set the character order of Arabic-script input.
    pub fn with_rtl_input_order(mut self, order: TextOrder) -> Self {
        self.rtl_input_order = order;
        self
    }

    /// Set the heading font-size thresholds (normal, lowered-for-bold).
    pub fn with_font_thresholds(mut self, min: f32, lowered: f32) -> Self {
        self.rel_font_heading_min = min;
        self.rel_font_heading_lowered = lowered;
        self
    }

    /// Set the running header/footer thresholds.
    pub fn with_running_header(mut self, min_pages: usize, fraction: f32) -> Self {
        self.running_header_min_pages = min_pages;
        self.running_header_fraction = fraction;
        self
    }

    /// Set the score weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set the font tier clustering tolerance.
    pub fn with_font_tier_tolerance(mut self, tolerance: f32) -> Self {
        self.font_tier_tolerance = tolerance;
        self
    }
}
