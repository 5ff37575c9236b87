//! Types for the recovered document structure.

use crate::layout::features::LineFeatures;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Level of a heading in the outline hierarchy.
///
/// Variants are declared in rank order: `Title` outranks `H1`, which
/// outranks `H2`, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HeadingLevel {
    /// Document title
    Title,
    /// Main heading
    H1,
    /// Section heading
    H2,
    /// Subsection heading
    H3,
}

impl HeadingLevel {
    /// Rank in the hierarchy (smaller is higher): Title 0, H1 1, H2 2, H3 3.
    pub fn rank(&self) -> u8 {
        match self {
            HeadingLevel::Title => 0,
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Outline level for a numbering depth (1 → H1, 2 → H2, 3+ → H3).
    pub fn from_depth(depth: u8) -> Option<Self> {
        match depth {
            0 => None,
            1 => Some(HeadingLevel::H1),
            2 => Some(HeadingLevel::H2),
            _ => Some(HeadingLevel::H3),
        }
    }

    /// Wire name ("TITLE", "H1", "H2", "H3").
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::Title => "TITLE",
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }

    /// True for the three levels allowed in an outline.
    pub fn is_outline_level(&self) -> bool {
        !matches!(self, HeadingLevel::Title)
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line (or merged run of lines) proposed as a heading.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCandidate {
    /// Index of the first source line
    pub first_line: usize,
    /// Index of the last source line (grows when fragments merge in)
    pub last_line: usize,
    /// Page index (0-based)
    pub page: u32,
    /// Heading text in logical order
    pub text: String,
    /// Top edge of the first line
    pub y0: f32,
    /// Average font size of the first line
    pub avg_size: f32,
    /// Font size relative to body text
    pub rel_font_size: f32,
    /// Gap to the previous line on the same page
    pub gap_above: Option<f32>,
    /// Bold line
    pub is_bold: bool,
    /// Starts with a numbering token
    pub starts_numbering: bool,
    /// Heading confidence score
    pub score: f32,
    /// Proposed level, set during level assignment
    pub level: Option<HeadingLevel>,
}

impl HeadingCandidate {
    /// Build a candidate from a feature record and its score.
    pub fn from_features(f: &LineFeatures, score: f32) -> Self {
        Self {
            first_line: f.line_index,
            last_line: f.line_index,
            page: f.page,
            text: f.text.clone(),
            y0: f.y0,
            avg_size: f.avg_size,
            rel_font_size: f.rel_font_size,
            gap_above: f.gap_above,
            is_bold: f.is_bold,
            starts_numbering: f.starts_numbering,
            score,
            level: None,
        }
    }

    /// 1-based page number.
    pub fn page_number(&self) -> u32 {
        self.page + 1
    }

    /// True if the candidate was chosen as the document title.
    pub fn is_title(&self) -> bool {
        self.level == Some(HeadingLevel::Title)
    }
}

/// One entry of the output outline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// H1, H2 or H3
    pub level: HeadingLevel,
    /// Heading text
    pub text: String,
    /// Page number (1-based)
    pub page: u32,
}

impl OutlineEntry {
    /// Create an outline entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// A paragraph of section body text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Page of the paragraph's first line (1-based)
    pub page: u32,
    /// Line texts joined by single spaces
    pub text: String,
}

/// A heading together with the body text it governs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Document identifier (file stem)
    pub doc_id: String,
    /// Document name
    pub doc_name: String,
    /// Heading text
    pub heading: String,
    /// Heading level
    pub level: HeadingLevel,
    /// First body page (1-based)
    pub page_start: u32,
    /// Last body page (1-based)
    pub page_end: u32,
    /// Paragraph texts joined by blank lines
    pub full_text: String,
    /// Body paragraphs
    pub paragraphs: Vec<Paragraph>,
}
