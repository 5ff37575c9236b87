// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::needless_range_loop)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Outline Oxide
//!
//! Document structure inference in Rust: recovers a title, an H1/H2/H3
//! outline and paragraph-bounded section bodies from positioned text lines.
//!
//! ## Core Features
//!
//! - **Multi-script**: Latin, CJK, Arabic (display-order input) and Devanagari,
//!   with native digits folded before any numbering match
//! - **Heading Detection**: relative font size, boldness, casing and numbering,
//!   with suppression of running headers, captions, TOC pages and bylines
//! - **Hierarchy**: numbering depth first, font-size tiers for the rest, and
//!   promotion so the outline always opens at H1 and never skips a level
//! - **Sections**: bodies bounded by the next heading of equal or higher rank,
//!   split into paragraphs
//! - **Batches**: documents processed in parallel, failures isolated per document
//!
//! ## Pipeline
//!
//! ```text
//! Line[] → LineFeatures[] → HeadingCandidate[] → title + outline → Section[]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use outline_oxide::layout::{BoundingBox, Line, LineDocument};
//! use outline_oxide::{OutlineConfig, OutlineExtractor};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let line = |y: f32, text: &str, size: f32, bold: f32| {
//!     Line::new(0, text, BoundingBox::new(72.0, y, 400.0, y + size), size, bold)
//! };
//! let mut lines = vec![line(40.0, "Field Guide", 24.0, 1.0), line(90.0, "1. Introduction", 14.0, 1.0)];
//! for i in 0..5 {
//!     lines.push(line(120.0 + i as f32 * 14.0, "Body text continues on this line.", 10.0, 0.0));
//! }
//!
//! let doc = LineDocument::new("guide.pdf", 1, lines);
//! let analysis = OutlineExtractor::new(OutlineConfig::default()).extract(&doc)?;
//!
//! assert_eq!(analysis.title, "Field Guide");
//! assert_eq!(analysis.outline[0].text, "1. Introduction");
//! println!("{}", analysis.outline_document(&OutlineConfig::default()).to_json_string()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

/// Thresholds and weights
pub mod config;

// Script detection and numbering patterns
pub mod text;

// Line model, features and candidate detection
pub mod layout;

// Title, outline levels and sections
pub mod structure;

// Outline JSON and contract validation
pub mod output;

// Outline evaluation
pub mod eval;

// Relevance ranking contract
pub mod ranking;

// Per-document orchestration and batches
pub mod pipeline;

// Re-exports
pub use config::{OutlineConfig, ScoreWeights};
pub use error::{Error, Result};
pub use layout::{Line, LineDocument};
pub use output::OutlineDocument;
pub use pipeline::{process_batch, DocumentAnalysis, OutlineExtractor, StageTimings};
pub use structure::{HeadingLevel, OutlineEntry, Section};

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Safely compare two floating point numbers, handling NaN cases.
    ///
    /// NaN values are treated as equal to each other and greater than all other values.
    /// This ensures that sorting operations never panic due to NaN comparisons.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater, // NaN > all numbers
            (false, true) => Ordering::Less,    // all numbers < NaN
            (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        }
    }

}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        // VERSION is populated from CARGO_PKG_VERSION at compile time
        assert!(VERSION.starts_with("0."));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "outline_oxide");
    }
}
