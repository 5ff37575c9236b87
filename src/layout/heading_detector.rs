//! Heading candidate detection.
//!
//! Decides, per line, whether it is a plausible heading. The decision is a
//! base rule over the line's features followed by a fixed cascade of passes:
//!
//! 1. base decision plus rescues for numbered non-Latin lines
//! 2. numeric-only rejection (axis labels, page numbers, unit tables)
//! 3. suppression of running headers, captions, TOC entries and body prose
//! 4. forced Arabic stopword headings
//! 5. pruning of long low-size lines
//! 6. final rescue of numbered non-Latin lines
//! 7. page-1 byline and affiliation suppression
//!
//! The order matters: later passes may overturn earlier ones.

use crate::config::OutlineConfig;
use crate::layout::features::{DocumentStats, LineFeatures};
use crate::text::numbering::{is_arabic_stopword, is_cjk_dotted, is_pure_numeral, strip_numbering_prefix};
use crate::text::script::{normalize_digits, Script};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// "12", "3.5", "40K"
    static ref RE_NUMERIC_SINGLE: Regex = Regex::new(r"^[0-9]+(?:\.[0-9]+)?[KkMm]?$").unwrap();

    /// "10 20 30 40": up to four numbers in a row
    static ref RE_NUMERIC_LIST: Regex =
        Regex::new(r"^(?:[0-9]+(?:\.[0-9]+)?\s+){1,3}[0-9]+(?:\.[0-9]+)?$").unwrap();

    /// "7" / "7."
    static ref RE_PAGE_TOKEN: Regex = Regex::new(r"^[0-9]+\.?$").unwrap();

    /// Digits and separators only
    static ref RE_ONLY_PUNCT: Regex = Regex::new(r"^[0-9,，.\s％%]+$").unwrap();

    /// "1,200万円"
    static ref RE_YEN_AMOUNT: Regex =
        Regex::new(r"^[0-9,，\s]+(?:兆|億|万)?[0-9,，\s]*(?:円)?[，,]?$").unwrap();

    /// "12.5%"
    static ref RE_PERCENT: Regex = Regex::new(r"^[0-9,，]+(?:\.[0-9]+)?[％%]$").unwrap();

    /// "2.4 GHz"
    static ref RE_FREQUENCY: Regex = Regex::new(r"^[0-9]+(?:\.[0-9]+)?\s*[mMkKgG]?[hH][zZ]$").unwrap();

    /// Institutional keywords in academic affiliations
    static ref RE_INSTITUTION: Regex =
        Regex::new(r"(?i)\b(?:university|department|laboratory|college|school|institute)\b").unwrap();
}

/// Japanese magnitude/currency units and percent signs found on chart axes.
const UNIT_TOKENS: [&str; 6] = ["兆", "億", "万", "円", "%", "％"];

/// Frequency units that appear alone on axis ticks.
const FREQUENCY_UNITS: [&str; 3] = ["mhz", "khz", "ghz"];

/// Heading candidate detector over one document's features.
pub struct HeadingDetector<'a> {
    config: &'a OutlineConfig,
    stats: &'a DocumentStats,
}

impl<'a> HeadingDetector<'a> {
    /// Create a detector reading the given document aggregates.
    pub fn new(config: &'a OutlineConfig, stats: &'a DocumentStats) -> Self {
        Self { config, stats }
    }

    /// Set `is_candidate` on every feature record.
    ///
    /// Arabic stopword lines additionally get `starts_numbering` set.
    pub fn detect(&self, features: &mut [LineFeatures]) {
        let mut split_numerals = Vec::new();
        let mut above: Option<(bool, f32)> = None;

        for (i, f) in features.iter_mut().enumerate() {
            let font_ok = self.font_ok(f);
            let mut candidate = self.base_decision(f, font_ok) || self.rescued(f);

            if candidate && self.is_numeric_only(f) {
                if self.is_split_numeral(f, above) {
                    split_numerals.push(i);
                } else {
                    log::trace!("Rejected numeric-only line {:?}", f.text);
                    candidate = false;
                }
            }

            if candidate {
                if let Some(reason) = self.suppression(f, font_ok) {
                    log::trace!("Suppressed {:?}: {}", f.text, reason);
                    candidate = false;
                }
            }

            f.is_candidate = candidate;
            above = Some((candidate, f.avg_size));
        }

        for f in features.iter_mut() {
            if is_arabic_stopword(&f.text) {
                f.starts_numbering = true;
                f.is_candidate = true;
            }
        }

        for f in features.iter_mut().filter(|f| f.is_candidate) {
            if let Some(reason) = prune_reason(f) {
                log::trace!("Pruned {:?}: {}", f.text, reason);
                f.is_candidate = false;
            }
        }

        for f in features.iter_mut() {
            if f.starts_numbering && f.script.is_non_latin() {
                f.is_candidate = true;
            }
        }

        suppress_front_matter(features);

        // A split numeral only survives while the heading it belongs to does.
        for i in split_numerals {
            if features[i].is_candidate && !features[i - 1].is_candidate {
                log::trace!("Rejected numeral {:?} left without a heading", features[i].text);
                features[i].is_candidate = false;
            }
        }

        log::debug!(
            "{} heading candidates out of {} lines",
            features.iter().filter(|f| f.is_candidate).count(),
            features.len()
        );
    }

    fn font_ok(&self, f: &LineFeatures) -> bool {
        let sized = f.rel_font_size >= self.config.rel_font_heading_min
            || (f.is_bold && f.rel_font_size >= self.config.rel_font_heading_lowered);
        sized || (matches!(f.script, Script::Arabic | Script::Cjk) && f.starts_numbering)
    }

    fn base_decision(&self, f: &LineFeatures, font_ok: bool) -> bool {
        let short_bold = f.is_bold
            && f.word_count <= self.config.max_short_heading_words
            && !f.ends_with_period;
        let casing_ok = f.script.is_non_latin() || f.is_bold || f.title_case || f.all_caps;

        (font_ok || short_bold || f.starts_numbering)
            && (1..=self.config.max_heading_words).contains(&f.word_count)
            && f.char_count >= 2
            && casing_ok
    }

    fn rescued(&self, f: &LineFeatures) -> bool {
        (f.script.is_non_latin() && f.starts_numbering)
            || (f.script == Script::Cjk && is_cjk_dotted(&f.text))
            || (f.script == Script::Arabic
                && f.rel_font_size >= self.config.rel_font_heading_lowered
                && f.word_count <= self.config.max_short_heading_words)
    }

    /// Bare numbers, number lists, page self-references and unit-only axis labels.
    fn is_numeric_only(&self, f: &LineFeatures) -> bool {
        let latin_like = matches!(f.script, Script::Latin | Script::Other);
        let unit_like = !matches!(f.script, Script::Latin);
        (latin_like && is_latin_numeric(f)) || (unit_like && is_unit_label(&f.text))
    }

    /// A bare numeral set tightly below a same-size candidate: the number of
    /// a heading the layout split off, kept for the numeral merge.
    fn is_split_numeral(&self, f: &LineFeatures, above: Option<(bool, f32)>) -> bool {
        let Some((above_candidate, above_size)) = above else {
            return false;
        };
        above_candidate
            && is_pure_numeral(&f.text)
            && f.gap_above.map(|g| g <= self.config.numeral_merge_gap).unwrap_or(false)
            && (above_size - f.avg_size).abs() <= self.config.merge_size_tolerance
    }

    fn suppression(&self, f: &LineFeatures, font_ok: bool) -> Option<&'static str> {
        let latin = f.script == Script::Latin;
        let page_count = self.stats.page_count.max(1) as f32;

        if f.repeat_count >= self.config.running_header_min_pages
            && f.repeat_count as f32 / page_count >= self.config.running_header_fraction
        {
            return Some("running header/footer");
        }
        if f.is_caption_like || f.has_dot_leader {
            return Some("caption or dot leader");
        }
        if f.rel_font_size < self.config.rel_font_heading_lowered
            && !f.is_bold
            && !f.starts_numbering
            && !f.script.is_non_latin()
        {
            return Some("low confidence");
        }
        if f.lower_text().starts_with("page ") {
            return Some("page label");
        }
        if latin
            && f.x0 >= self.stats.left_margin(f.page) + self.config.right_indent_slack
            && !(font_ok || f.is_bold || f.starts_numbering)
        {
            return Some("right-indented");
        }
        if latin
            && !f.is_bold
            && !f.starts_numbering
            && (strip_numbering_prefix(&f.text).contains('.') || f.word_count >= 10)
        {
            return Some("body prose");
        }
        if latin
            && self.stats.is_toc_page(f.page)
            && !(f.rel_font_size >= 1.25 || f.starts_numbering)
        {
            return Some("table of contents page");
        }
        None
    }
}

/// Run the full detection cascade.
pub fn detect_candidates(features: &mut [LineFeatures], stats: &DocumentStats, config: &OutlineConfig) {
    HeadingDetector::new(config, stats).detect(features);
}

fn is_latin_numeric(f: &LineFeatures) -> bool {
    let text = f.text.trim();
    if RE_NUMERIC_SINGLE.is_match(text)
        || RE_NUMERIC_LIST.is_match(text)
        || (f.word_count == 1 && text.ends_with('.') && text.chars().count() <= 4 && RE_PAGE_TOKEN.is_match(text))
    {
        return true;
    }

    let stripped = text.trim_end_matches('.');
    !stripped.is_empty()
        && stripped.chars().all(|c| c.is_ascii_digit())
        && stripped.parse::<u32>().map(|n| n == f.page_number()).unwrap_or(false)
}

fn is_unit_label(text: &str) -> bool {
    let norm = normalize_digits(text.trim());
    let norm = norm.as_ref();
    if !norm.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }

    let letters: String = norm.chars().filter(|c| c.is_alphabetic()).collect::<String>().to_lowercase();
    let has_units = UNIT_TOKENS.iter().any(|u| norm.contains(u));
    let frequency_word = FREQUENCY_UNITS.contains(&letters.as_str());

    RE_PERCENT.is_match(norm)
        || RE_FREQUENCY.is_match(norm)
        || RE_YEN_AMOUNT.is_match(norm)
        || (RE_ONLY_PUNCT.is_match(norm) && letters.is_empty())
        || (has_units && (letters.is_empty() || frequency_word))
}

fn prune_reason(f: &LineFeatures) -> Option<&'static str> {
    if f.script == Script::Latin {
        let sentences = strip_numbering_prefix(&f.text)
            .chars()
            .filter(|c| matches!(c, '.' | '؟' | '۔' | '।'))
            .count();
        if sentences >= 2 && f.rel_font_size < 1.30 {
            return Some("multi-sentence");
        }
        if f.word_count >= 12 && f.rel_font_size < 1.20 {
            return Some("long Latin line");
        }
    } else if f.word_count >= 15 && f.rel_font_size < 1.15 && !f.starts_numbering {
        return Some("long line");
    }
    None
}

/// Drop author and affiliation lines from page 1.
///
/// With an email address anywhere on page 1, every comma-bearing candidate is
/// taken for a byline. Before an "ABSTRACT" heading, comma-bearing lines and
/// lines naming an institution are taken for affiliations.
fn suppress_front_matter(features: &mut [LineFeatures]) {
    let is_abstract = |f: &LineFeatures| f.text.trim().to_uppercase() == "ABSTRACT";

    let first_page: Vec<usize> = (0..features.len()).filter(|&i| features[i].page == 0).collect();
    let has_email = first_page.iter().any(|&i| features[i].text.contains('@'));
    let abstract_pos = first_page
        .iter()
        .position(|&i| features[i].is_candidate && is_abstract(&features[i]));

    for (pos, &i) in first_page.iter().enumerate() {
        let f = &mut features[i];
        if !f.is_candidate || is_abstract(f) {
            continue;
        }
        let before_abstract = abstract_pos.map(|a| pos < a).unwrap_or(false);
        if has_email && f.text.contains(',') {
            log::trace!("Suppressed byline {:?}", f.text);
            f.is_candidate = false;
        } else if before_abstract && (f.text.contains(',') || RE_INSTITUTION.is_match(&f.text)) {
            log::trace!("Suppressed affiliation {:?}", f.text);
            f.is_candidate = false;
        }
    }
}
