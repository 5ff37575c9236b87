//! Writing-system detection and script-neutral text normalization.
//!
//! Lines are bucketed into five character classes (Latin, CJK, Arabic,
//! Devanagari, other). The dominant bucket drives every casing and numbering
//! heuristic downstream, so it is computed on logical-order text with native
//! digits already folded to ASCII.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Dominant writing system of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    /// Latin letters (Basic Latin through Latin Extended-B)
    Latin,
    /// Chinese/Japanese ideographs, kana and full-width forms
    Cjk,
    /// Arabic, Arabic Supplement and Arabic Extended-A
    Arabic,
    /// Devanagari
    Devanagari,
    /// Digits, punctuation and every other printable character
    Other,
    /// No printable characters at all
    Unknown,
}

impl Script {
    /// Scripts without a capitalization signal whose numbering overrides font size.
    pub fn is_non_latin(&self) -> bool {
        matches!(self, Script::Cjk | Script::Arabic | Script::Devanagari)
    }

    /// Short lowercase tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Script::Latin => "latin",
            Script::Cjk => "cjk",
            Script::Arabic => "arabic",
            Script::Devanagari => "devanagari",
            Script::Other => "other",
            Script::Unknown => "unknown",
        }
    }
}

/// Per-script character shares of a line (each in 0..=1, summing to 1 unless empty).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptRatios {
    /// Latin share
    pub latin: f32,
    /// CJK share
    pub cjk: f32,
    /// Arabic share
    pub arabic: f32,
    /// Devanagari share
    pub devanagari: f32,
    /// Everything else
    pub other: f32,
}

impl ScriptRatios {
    /// Count characters per bucket, ignoring whitespace and control characters.
    pub fn of(text: &str) -> Self {
        let mut counts = [0usize; 5];
        let mut total = 0usize;

        for ch in text.chars() {
            if ch.is_whitespace() || ch.is_control() {
                continue;
            }
            total += 1;
            let bucket = match ch as u32 {
                0x0041..=0x024F => 0,
                0x4E00..=0x9FFF | 0x3400..=0x4DBF | 0x3040..=0x30FF | 0xFF00..=0xFFEF => 1,
                0x0600..=0x06FF | 0x0750..=0x077F | 0x08A0..=0x08FF => 2,
                0x0900..=0x097F => 3,
                _ => 4,
            };
            counts[bucket] += 1;
        }

        if total == 0 {
            return Self::default();
        }

        let share = |n: usize| n as f32 / total as f32;
        Self {
            latin: share(counts[0]),
            cjk: share(counts[1]),
            arabic: share(counts[2]),
            devanagari: share(counts[3]),
            other: share(counts[4]),
        }
    }

    /// Bucket with the highest share; ties go to the earlier bucket.
    pub fn dominant(&self) -> Script {
        let buckets = [
            (Script::Latin, self.latin),
            (Script::Cjk, self.cjk),
            (Script::Arabic, self.arabic),
            (Script::Devanagari, self.devanagari),
            (Script::Other, self.other),
        ];

        let mut best = (Script::Unknown, 0.0f32);
        for (script, share) in buckets {
            if share > best.1 {
                best = (script, share);
            }
        }
        best.0
    }
}

/// Detect the dominant script of a line.
///
/// When the ratio vote is inconclusive (only "other" characters, or nothing
/// printable) the line is re-checked for Arabic presentation forms and CJK
/// ranges, which the ratio buckets do not fully cover.
///
/// # Examples
///
/// ```
/// use outline_oxide::text::{detect_script, Script};
///
/// assert_eq!(detect_script("2.3 Methods").0, Script::Latin);
/// assert_eq!(detect_script("第1章 概要").0, Script::Cjk);
/// assert_eq!(detect_script("   ").0, Script::Unknown);
/// ```
pub fn detect_script(text: &str) -> (Script, ScriptRatios) {
    let ratios = ScriptRatios::of(text);
    let mut script = ratios.dominant();

    if matches!(script, Script::Other | Script::Unknown) {
        if text
            .chars()
            .any(|c| matches!(c as u32, 0x0600..=0x06FF | 0xFB50..=0xFEFC))
        {
            script = Script::Arabic;
        } else if text
            .chars()
            .any(|c| matches!(c as u32, 0x3040..=0x30FF | 0x4E00..=0x9FFF))
        {
            script = Script::Cjk;
        }
    }

    (script, ratios)
}

/// Fold full-width, Arabic-indic, extended Arabic-indic and Devanagari digits to ASCII.
///
/// # Examples
///
/// ```
/// use outline_oxide::text::normalize_digits;
///
/// assert_eq!(normalize_digits("第１２章"), "第12章");
/// assert_eq!(normalize_digits("الفصل ٣"), "الفصل 3");
/// assert_eq!(normalize_digits("अध्याय ४"), "अध्याय 4");
/// ```
pub fn normalize_digits(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|c| native_digit_value(c).is_some()) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|c| match native_digit_value(c) {
                Some(d) => char::from(b'0' + d),
                None => c,
            })
            .collect(),
    )
}

fn native_digit_value(c: char) -> Option<u8> {
    let base = match c as u32 {
        0xFF10..=0xFF19 => 0xFF10,
        0x0660..=0x0669 => 0x0660,
        0x06F0..=0x06F9 => 0x06F0,
        0x0966..=0x096F => 0x0966,
        _ => return None,
    };
    Some((c as u32 - base) as u8)
}

/// Character order of Arabic-script text as handed over by the line producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextOrder {
    /// Glyphs in left-to-right display order (what most PDF extractors emit)
    #[default]
    Visual,
    /// Already in logical reading order
    Logical,
}

/// True if the text contains a character from the Arabic block.
pub fn contains_arabic(text: &str) -> bool {
    text.chars().any(|c| matches!(c as u32, 0x0600..=0x06FF))
}

/// Convert an Arabic-script line from display order to logical order.
///
/// Lines without Arabic characters, and input declared [`TextOrder::Logical`],
/// are returned unchanged. Otherwise the character sequence is reversed and
/// every run of left-to-right characters (Latin letters, digits, numeric
/// punctuation) is flipped back so numerals keep their digit order. Applying
/// the conversion twice yields the original text.
///
/// # Examples
///
/// ```
/// use outline_oxide::text::{to_logical_order, TextOrder};
///
/// // "الفصل 12" as a left-to-right display run
/// let displayed = "12 لصفلا";
/// assert_eq!(to_logical_order(displayed, TextOrder::Visual), "الفصل 12");
/// assert_eq!(to_logical_order("Chapter 1", TextOrder::Visual), "Chapter 1");
/// ```
pub fn to_logical_order(text: &str, order: TextOrder) -> Cow<'_, str> {
    if order == TextOrder::Logical || !contains_arabic(text) {
        return Cow::Borrowed(text);
    }

    let reversed: Vec<char> = text.chars().rev().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < reversed.len() {
        if is_ltr_char(reversed[i]) {
            let start = i;
            while i < reversed.len() && is_ltr_char(reversed[i]) {
                i += 1;
            }
            out.extend(reversed[start..i].iter().rev());
        } else {
            out.push(reversed[i]);
            i += 1;
        }
    }
    Cow::Owned(out)
}

fn is_ltr_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c as u32, 0x00C0..=0x024F | 0x0660..=0x0669 | 0x06F0..=0x06F9)
        || matches!(c, '.' | ',' | ':' | '/' | '%')
}
