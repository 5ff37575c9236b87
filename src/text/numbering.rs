//! Chapter and section numbering patterns across scripts.
//!
//! Numeric patterns are matched against digit-normalized text (see
//! [`normalize_digits`]); the Appendix and roman-numeral patterns against the
//! raw text since they carry no native digits.

use crate::text::script::{normalize_digits, Script};
use lazy_static::lazy_static;
use regex::Regex;

/// Arabic "Introduction" and "Conclusion".
///
/// These two words are headings in virtually every Arabic report and never
/// carry a number, so they are forced to count as numbered headings. This is a
/// fixed table, not a rule about Arabic headings in general.
pub const ARABIC_STOPWORDS: [&str; 2] = ["المقدمة", "الخاتمة"];

lazy_static! {
    /// "1.2.3 Word": dotted decimals followed by a letter (Latin lines)
    static ref RE_DECIMAL_LATIN: Regex = Regex::new(r"^[0-9]+(?:\.[0-9]+)*\.?\s+\p{L}").unwrap();

    /// "1.2.3 ": dotted decimals followed by whitespace (other scripts)
    static ref RE_DECIMAL: Regex = Regex::new(r"^[0-9]+(?:\.[0-9]+)*\.?\s").unwrap();

    /// "第3章"
    static ref RE_CJK_CHAPTER: Regex = Regex::new(r"^第[0-9０-９]+章").unwrap();

    /// "Dai3sho"
    static ref RE_ROMAJI_CHAPTER: Regex = Regex::new(r"(?i)^Dai[0-9]+sho").unwrap();

    /// "الفصل 3" / "الباب 3" / "المبحث 3" (chapter / part / section)
    static ref RE_ARABIC_CHAPTER: Regex = Regex::new(r"^(?:الفصل|الباب|المبحث)\s*[0-9٠-٩]+").unwrap();

    /// "अध्याय 3"
    static ref RE_DEVANAGARI_CHAPTER: Regex = Regex::new(r"^अध्याय\s*[0-9]+").unwrap();

    /// "Appendix B"
    static ref RE_APPENDIX: Regex = Regex::new(r"(?i)^Appendix\s+[A-Z]\b").unwrap();

    /// "IV. " / "XII "
    static ref RE_ROMAN: Regex = Regex::new(r"^[IVXLC]+\.?\s").unwrap();

    /// "1.1 背景" / "１．１": CJK dotted numbering with ASCII or full-width digits and dots
    static ref RE_CJK_DOTTED: Regex = Regex::new(r"^[0-9０-９]+(?:[.．][0-9０-９]+)+").unwrap();

    /// Leading numeral sequence used for depth
    static ref RE_DEPTH: Regex = Regex::new(r"^([0-9]+(?:[.．][0-9]+)*)").unwrap();

    /// Numeral-only line ("3", "3.", "2.1")
    static ref RE_PURE_NUMERAL: Regex = Regex::new(r"^[0-9]+(?:\.[0-9]+)*\.?$").unwrap();

    /// Any ASCII or Arabic-indic digit
    static ref RE_ANY_DIGIT: Regex = Regex::new(r"[0-9٠-٩]").unwrap();

    /// Leading numbering prefix with its trailing whitespace
    static ref RE_NUMBER_PREFIX: Regex = Regex::new(r"^[0-9]+(?:[.．][0-9]+)*\.?\s*").unwrap();
}

/// Does the line open with a chapter/section numbering token?
///
/// `raw` is the logical-order line text; `script` its dominant script.
///
/// # Examples
///
/// ```
/// use outline_oxide::text::{starts_numbering, Script};
///
/// assert!(starts_numbering("2.3 Methods", Script::Latin));
/// assert!(starts_numbering("1. Introduction", Script::Latin));
/// assert!(!starts_numbering("2023 42", Script::Latin));
/// assert!(starts_numbering("第２章 概要", Script::Cjk));
/// assert!(starts_numbering("Appendix A", Script::Latin));
/// ```
pub fn starts_numbering(raw: &str, script: Script) -> bool {
    let normalized = normalize_digits(raw);
    let normalized = normalized.as_ref();

    let decimal = if script == Script::Latin {
        RE_DECIMAL_LATIN.is_match(normalized)
    } else {
        RE_DECIMAL.is_match(normalized)
    };

    decimal
        || RE_CJK_CHAPTER.is_match(normalized)
        || RE_ROMAJI_CHAPTER.is_match(normalized)
        || RE_ARABIC_CHAPTER.is_match(normalized)
        || RE_DEVANAGARI_CHAPTER.is_match(normalized)
        || RE_APPENDIX.is_match(raw)
        || RE_ROMAN.is_match(raw)
        || RE_CJK_DOTTED.is_match(normalized)
        || (script == Script::Arabic && RE_ANY_DIGIT.is_match(normalized))
}

/// CJK dotted numbering such as "1.1 背景" or "１．２".
pub fn is_cjk_dotted(raw: &str) -> bool {
    RE_CJK_DOTTED.is_match(&normalize_digits(raw))
}

/// Hierarchy depth of the leading numeral sequence: "2" → 1, "2.3" → 2, "2.3.1.4" → 3.
///
/// Returns `None` when the text does not start with a numeral.
///
/// # Examples
///
/// ```
/// use outline_oxide::text::numbering_depth;
///
/// assert_eq!(numbering_depth("1. Introduction"), Some(1));
/// assert_eq!(numbering_depth("2.3 Methods"), Some(2));
/// assert_eq!(numbering_depth("１．２．３．４ 詳細"), Some(3));
/// assert_eq!(numbering_depth("Methods"), None);
/// ```
pub fn numbering_depth(text: &str) -> Option<u8> {
    let normalized = normalize_digits(text.trim_start());
    let caps = RE_DEPTH.captures(&normalized)?;
    let seq = caps.get(1)?.as_str();
    let segments = seq.split(['.', '．']).filter(|s| !s.is_empty()).count();
    match segments {
        0 => None,
        n => Some(n.min(3) as u8),
    }
}

/// A numbered or chapter-marked line (used to decide whether the title is also a heading).
pub fn looks_like_chapter(text: &str) -> bool {
    let normalized = normalize_digits(text.trim());
    numbering_depth(&normalized).is_some()
        || RE_ARABIC_CHAPTER.is_match(&normalized)
        || RE_CJK_CHAPTER.is_match(&normalized)
}

/// A line that holds nothing but a numeral ("3", "4.", "2.1").
pub fn is_pure_numeral(text: &str) -> bool {
    RE_PURE_NUMERAL.is_match(&normalize_digits(text.trim()))
}

/// One of the fixed Arabic stopword headings.
pub fn is_arabic_stopword(text: &str) -> bool {
    ARABIC_STOPWORDS.contains(&text.trim())
}

/// Text with any leading numbering prefix removed ("3 RELATED WORK" → "RELATED WORK").
pub fn strip_numbering_prefix(text: &str) -> String {
    let normalized = normalize_digits(text.trim());
    RE_NUMBER_PREFIX.replace(&normalized, "").into_owned()
}
