//! Outline document output.
//!
//! The outline document is `{"title": ..., "outline": [...]}`, optionally
//! extended with `_debug_candidates` and `_debug_first_lines` when debug
//! output is enabled. [`validate`] checks documents against that contract.

pub mod validate;

pub use validate::{validate_outline_file, validate_outline_str, validate_outline_value, ALLOWED_KEYS};

use crate::error::Result;
use crate::layout::features::LineFeatures;
use crate::structure::types::{HeadingCandidate, OutlineEntry};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Debug candidates kept in an outline document.
const MAX_DEBUG_CANDIDATES: usize = 50;
/// Debug feature rows kept in an outline document.
const MAX_DEBUG_LINES: usize = 15;

/// A candidate as shown in `_debug_candidates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugCandidate {
    /// Page number (1-based)
    pub page: u32,
    /// Text, truncated to 120 characters
    pub text: String,
    /// Heading score
    pub score: f32,
}

/// A feature row as shown in `_debug_first_lines`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugLine {
    /// Page number (1-based)
    pub page: u32,
    /// Text, truncated to 100 characters
    pub text: String,
    /// Relative font size
    pub rel: f32,
}

/// The outline JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineDocument {
    /// Document title
    pub title: String,
    /// Outline entries in reading order
    pub outline: Vec<OutlineEntry>,
    /// First candidates with their scores (debug only)
    #[serde(rename = "_debug_candidates", default, skip_serializing_if = "Option::is_none")]
    pub debug_candidates: Option<Vec<DebugCandidate>>,
    /// First feature rows (debug only)
    #[serde(rename = "_debug_first_lines", default, skip_serializing_if = "Option::is_none")]
    pub debug_first_lines: Option<Vec<DebugLine>>,
}

impl OutlineDocument {
    /// Create an outline document, dropping entries with blank text.
    pub fn new(title: impl Into<String>, outline: Vec<OutlineEntry>) -> Self {
        let outline = outline
            .into_iter()
            .filter_map(|mut e| {
                let text = e.text.trim();
                if text.is_empty() || !e.level.is_outline_level() || e.page == 0 {
                    return None;
                }
                e.text = text.to_string();
                Some(e)
            })
            .collect();

        Self {
            title: title.into(),
            outline,
            debug_candidates: None,
            debug_first_lines: None,
        }
    }

    /// Attach the debug keys.
    pub fn with_debug(mut self, candidates: &[HeadingCandidate], features: &[LineFeatures]) -> Self {
        self.debug_candidates = Some(
            candidates
                .iter()
                .take(MAX_DEBUG_CANDIDATES)
                .map(|c| DebugCandidate {
                    page: c.page_number(),
                    text: truncate(&c.text, 120),
                    score: c.score,
                })
                .collect(),
        );
        self.debug_first_lines = Some(
            features
                .iter()
                .take(MAX_DEBUG_LINES)
                .map(|f| DebugLine {
                    page: f.page_number(),
                    text: truncate(&f.text, 100),
                    rel: f.rel_font_size,
                })
                .collect(),
        );
        self
    }

    /// Pretty-printed JSON (non-ASCII kept as is).
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the document as pretty-printed JSON.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Read an outline document from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
