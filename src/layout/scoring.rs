//! Continuous heading-confidence score.
//!
//! The score is diagnostic: it does not gate candidacy and does not decide
//! levels. Downstream ranking may use it as a tie-breaker.

use crate::config::OutlineConfig;
use crate::layout::features::LineFeatures;
use crate::text::script::Script;

/// Weighted heading score of one line, rounded to 3 decimals.
pub fn score_candidate(f: &LineFeatures, config: &OutlineConfig) -> f32 {
    let w = &config.weights;
    let latin = f.script == Script::Latin;

    let mut score = w.rel_font * f.rel_font_size.min(2.0);
    if f.is_bold {
        score += w.bold;
    }
    if f.starts_numbering {
        score += w.numbering;
    }
    if f.gap_above.map(|g| g >= config.gap_above_isolation).unwrap_or(false) {
        score += w.gap_above;
    }

    if latin {
        if f.title_case {
            score += w.title_case;
        }
        if f.all_caps {
            score += w.all_caps;
        }
    } else {
        score += w.non_latin_bonus;
    }

    // Soft penalties
    if latin && f.ends_with_period && f.rel_font_size < 1.15 {
        score -= 0.6;
    }
    if f.word_count > config.max_heading_words {
        score -= 1.0;
    }
    if latin && f.word_count == 1 && is_lowercase_word(&f.text) {
        score -= 0.3;
    }

    (score * 1000.0).round() / 1000.0
}

/// Has cased letters and none of them uppercase.
fn is_lowercase_word(text: &str) -> bool {
    text.chars().any(|c| c.is_lowercase()) && !text.chars().any(|c| c.is_uppercase())
}
