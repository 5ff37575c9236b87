//! Text line model.
//!
//! A [`Line`] is one visually contiguous run of text on one page, as handed
//! over by the document parser. Lines are never mutated once built; every
//! later stage derives its own records from them.

use crate::error::{Error, Result};
use crate::utils::safe_float_cmp;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Axis-aligned box in page units, y increasing downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BoundingBox {
    /// Create a new bounding box from its edges.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    fn is_finite(&self) -> bool {
        self.x0.is_finite() && self.y0.is_finite() && self.x1.is_finite() && self.y1.is_finite()
    }
}

/// One text line with geometry and typography.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Page index (0-based)
    pub page: u32,
    /// Text content
    pub text: String,
    /// Bounding box
    pub bbox: BoundingBox,
    /// Average font size of the line's runs (points)
    pub avg_size: f32,
    /// Fraction of runs judged bold (0..=1)
    #[serde(default)]
    pub bold_frac: f32,
}

impl Line {
    /// Create a new line.
    pub fn new(page: u32, text: impl Into<String>, bbox: BoundingBox, avg_size: f32, bold_frac: f32) -> Self {
        Self {
            page,
            text: text.into(),
            bbox,
            avg_size,
            bold_frac,
        }
    }

    /// Left edge.
    pub fn x0(&self) -> f32 {
        self.bbox.x0
    }

    /// Top edge.
    pub fn y0(&self) -> f32 {
        self.bbox.y0
    }

    /// Bottom edge.
    pub fn y1(&self) -> f32 {
        self.bbox.y1
    }

    /// True if the line holds only whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A positioned text run as reported by the parser, before line assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Run text
    pub text: String,
    /// Run bounding box
    pub bbox: BoundingBox,
    /// Font size in points
    pub font_size: f32,
    /// Font name (used for the bold heuristic)
    #[serde(default)]
    pub font_name: String,
}

/// Font-name heuristic for bold runs.
///
/// # Examples
///
/// ```
/// use outline_oxide::layout::line::is_bold_font_name;
///
/// assert!(is_bold_font_name("Helvetica-Bold"));
/// assert!(is_bold_font_name("SourceSans-SemiBold"));
/// assert!(!is_bold_font_name("Times-Roman"));
/// ```
pub fn is_bold_font_name(font_name: &str) -> bool {
    let name = font_name.to_lowercase();
    ["bold", "black", "semibold", "heavy"]
        .iter()
        .any(|key| name.contains(key))
}

/// Assemble one line from the spans the parser grouped onto it.
///
/// Returns `None` when the spans carry no visible text.
pub fn line_from_spans(page: u32, spans: &[Span]) -> Option<Line> {
    let text: String = spans.iter().map(|s| s.text.as_str()).collect();
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let bbox = spans
        .iter()
        .map(|s| s.bbox)
        .reduce(|a, b| a.union(&b))
        .unwrap_or_default();
    let avg_size = spans.iter().map(|s| s.font_size).sum::<f32>() / spans.len() as f32;
    let bold = spans.iter().filter(|s| is_bold_font_name(&s.font_name)).count();
    let bold_frac = bold as f32 / spans.len() as f32;

    Some(Line::new(page, text, bbox, avg_size, bold_frac))
}

/// Sort lines top-to-bottom, left-to-right: by (page, y0, x0).
pub fn sort_reading_order(lines: &mut [Line]) {
    lines.sort_by(|a, b| {
        a.page
            .cmp(&b.page)
            .then_with(|| safe_float_cmp(a.y0(), b.y0()))
            .then_with(|| safe_float_cmp(a.x0(), b.x0()))
    });
}

/// A document as a flat, reading-ordered line list (the input of the engine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineDocument {
    /// Document name (usually the source file name)
    pub name: String,
    /// Number of pages in the source document
    pub page_count: usize,
    /// Lines in reading order
    pub lines: Vec<Line>,
}

impl LineDocument {
    /// Create a document.
    pub fn new(name: impl Into<String>, page_count: usize, lines: Vec<Line>) -> Self {
        Self {
            name: name.into(),
            page_count,
            lines,
        }
    }

    /// Load a document from a JSON file and check it against the line model.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let doc: LineDocument = serde_json::from_str(&data)?;
        doc.validate()?;
        Ok(doc)
    }

    /// File stem of the document name ("report.pdf" → "report").
    pub fn stem(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.name)
    }

    /// Check pages are within the page count and geometry is finite.
    pub fn validate(&self) -> Result<()> {
        for (i, line) in self.lines.iter().enumerate() {
            if line.page as usize >= self.page_count {
                return Err(Error::InvalidInput(format!(
                    "line {} is on page {} but the document has {} pages",
                    i, line.page, self.page_count
                )));
            }
            if !line.bbox.is_finite() || !line.avg_size.is_finite() || !line.bold_frac.is_finite() {
                return Err(Error::InvalidInput(format!("line {} has non-finite geometry", i)));
            }
        }
        Ok(())
    }
}
