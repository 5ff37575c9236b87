//! Script-aware text classification.
//!
//! - Digit normalization and per-script character ratios
//! - Display-order to logical-order reordering for Arabic-script lines
//! - Chapter/section numbering patterns across scripts

pub mod numbering;
pub mod script;

pub use numbering::{
    is_arabic_stopword, is_pure_numeral, looks_like_chapter, numbering_depth, starts_numbering,
};
pub use script::{
    contains_arabic, detect_script, normalize_digits, to_logical_order, Script, ScriptRatios,
    TextOrder,
};
