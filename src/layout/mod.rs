//! Line-level layout analysis.
//!
//! This module turns a reading-ordered line list into heading candidates:
//! - Line model and reading-order sorting
//! - Document aggregates and per-line features
//! - Table of contents page detection
//! - Candidate detection and heading scores

pub mod features;
pub mod heading_detector;
pub mod line;
pub mod scoring;
pub mod toc_detector;

// Re-export main types
pub use features::{compute_features, DocumentStats, LineFeatures};
pub use heading_detector::{detect_candidates, HeadingDetector};
pub use line::{line_from_spans, sort_reading_order, BoundingBox, Line, LineDocument, Span};
pub use scoring::score_candidate;
pub use toc_detector::TocDetector;
