//! Per-document extraction pipeline and parallel batches.
//!
//! ```text
//! LineDocument
//!     ↓
//! [compute_features]   (document aggregates + one record per line)
//!     ↓
//! [detect_candidates]  (candidate flags) + [score_candidate]
//!     ↓
//! [assign_levels]      (title + H1/H2/H3)
//!     ↓
//! [build_sections]     (section bodies + paragraphs)
//! ```
//!
//! Every stage needs its predecessor's complete output. Documents share no
//! state, so a batch runs them in parallel.

use crate::config::OutlineConfig;
use crate::error::{Error, Result};
use crate::layout::features::{compute_features, LineFeatures};
use crate::layout::heading_detector::detect_candidates;
use crate::layout::line::LineDocument;
use crate::layout::scoring::score_candidate;
use crate::output::OutlineDocument;
use crate::structure::level_assign::{assign_levels, outline_entries};
use crate::structure::sections::{build_sections, DocumentRef};
use crate::structure::types::{HeadingCandidate, OutlineEntry, Section};
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Wall-clock time spent in each stage.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StageTimings {
    /// Feature computation
    pub features: Duration,
    /// Candidate detection and scoring
    pub candidate_filter: Duration,
    /// Level assignment and outline building
    pub level_assign: Duration,
    /// Section building
    pub sections: Duration,
}

impl StageTimings {
    /// Sum of all stages.
    pub fn total(&self) -> Duration {
        self.features + self.candidate_filter + self.level_assign + self.sections
    }
}

/// Everything recovered from one document.
#[derive(Debug, Clone)]
pub struct DocumentAnalysis {
    /// Document name
    pub name: String,
    /// Per-line features, candidate flags included
    pub features: Vec<LineFeatures>,
    /// Scored candidates in reading order, before merging
    pub candidates: Vec<HeadingCandidate>,
    /// Title text (the file stem when no candidate exists)
    pub title: String,
    /// Deduplicated outline
    pub outline: Vec<OutlineEntry>,
    /// Section bodies
    pub sections: Vec<Section>,
    /// Stage durations
    pub timings: StageTimings,
}

impl DocumentAnalysis {
    /// Outline document for serialization, with debug keys when configured.
    pub fn outline_document(&self, config: &OutlineConfig) -> OutlineDocument {
        let doc = OutlineDocument::new(self.title.clone(), self.outline.clone());
        if config.include_debug {
            doc.with_debug(&self.candidates, &self.features)
        } else {
            doc
        }
    }
}

/// Runs the stages over one document.
#[derive(Debug, Clone, Default)]
pub struct OutlineExtractor {
    config: OutlineConfig,
}

impl OutlineExtractor {
    /// Create an extractor with the given configuration.
    pub fn new(config: OutlineConfig) -> Self {
        Self { config }
    }

    /// The extractor's configuration.
    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// Analyze a validated document.
    ///
    /// Fails only when the document violates the line model.
    pub fn extract(&self, doc: &LineDocument) -> Result<DocumentAnalysis> {
        doc.validate()?;
        let config = &self.config;
        let mut timings = StageTimings::default();

        let start = Instant::now();
        let (stats, mut features) = compute_features(&doc.lines, doc.page_count, config);
        timings.features = start.elapsed();

        let start = Instant::now();
        detect_candidates(&mut features, &stats, config);
        let candidates: Vec<HeadingCandidate> = features
            .iter()
            .filter(|f| f.is_candidate)
            .map(|f| HeadingCandidate::from_features(f, score_candidate(f, config)))
            .collect();
        timings.candidate_filter = start.elapsed();

        let start = Instant::now();
        let assignment = assign_levels(candidates.clone(), config);
        let outline = outline_entries(&assignment);
        let title = assignment
            .title
            .as_ref()
            .map(|t| t.text.clone())
            .unwrap_or_else(|| doc.stem().to_string());
        timings.level_assign = start.elapsed();

        let start = Instant::now();
        let doc_ref = DocumentRef {
            id: doc.stem(),
            name: &doc.name,
        };
        let sections = build_sections(doc_ref, &doc.lines, &assignment.candidates, config.rtl_input_order);
        timings.sections = start.elapsed();

        log::debug!(
            "{}: {} lines, {} candidates, {} outline entries, {} sections in {:?} \
             (features {:?}, candidates {:?}, levels {:?}, sections {:?})",
            doc.name,
            doc.lines.len(),
            candidates.len(),
            outline.len(),
            sections.len(),
            timings.total(),
            timings.features,
            timings.candidate_filter,
            timings.level_assign,
            timings.sections
        );

        Ok(DocumentAnalysis {
            name: doc.name.clone(),
            features,
            candidates,
            title,
            outline,
            sections,
            timings,
        })
    }
}

/// Analyze documents in parallel.
///
/// Results come back in input order, one per document; a failing document
/// does not affect the others.
pub fn process_batch(docs: &[LineDocument], config: &OutlineConfig) -> Vec<(String, Result<DocumentAnalysis>)> {
    let extractor = OutlineExtractor::new(config.clone());
    docs.par_iter()
        .map(|doc| {
            let result = extractor.extract(doc).map_err(|e| {
                log::warn!("Failed to process {}: {}", doc.name, e);
                Error::Document {
                    name: doc.name.clone(),
                    source: Box::new(e),
                }
            });
            (doc.name.clone(), result)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::line::{BoundingBox, Line};
    use crate::structure::types::HeadingLevel;

    fn line(page: u32, y: f32, text: &str, size: f32, bold: f32) -> Line {
        Line::new(page, text, BoundingBox::new(72.0, y, 400.0, y + size), size, bold)
    }

    fn sample() -> LineDocument {
        let mut lines = vec![
            line(0, 40.0, "Quarterly Review", 24.0, 1.0),
            line(0, 90.0, "1. Introduction", 14.0, 1.0),
        ];
        for i in 0..6 {
            lines.push(line(0, 120.0 + i as f32 * 14.0, &format!("intro text line {} goes here.", i), 10.0, 0.0));
        }
        lines.push(line(0, 220.0, "1.1 Background", 12.0, 1.0));
        for i in 0..6 {
            lines.push(line(0, 250.0 + i as f32 * 14.0, &format!("background line {} goes here.", i), 10.0, 0.0));
        }
        LineDocument::new("quarterly.pdf", 1, lines)
    }

    #[test]
    fn test_extract_sample() {
        let analysis = OutlineExtractor::default().extract(&sample()).unwrap();
        assert_eq!(analysis.title, "Quarterly Review");
        assert_eq!(
            analysis.outline,
            vec![
                OutlineEntry::new(HeadingLevel::H1, "1. Introduction", 1),
                OutlineEntry::new(HeadingLevel::H2, "1.1 Background", 1),
            ]
        );
        assert_eq!(analysis.sections.len(), 2);
        assert_eq!(analysis.sections[1].heading, "1.1 Background");
        assert!(analysis.sections[0].full_text.contains("intro text line 0"));
    }

    #[test]
    fn test_empty_document_uses_stem() {
        let doc = LineDocument::new("reports/empty.pdf", 1, vec![]);
        let analysis = OutlineExtractor::default().extract(&doc).unwrap();
        assert_eq!(analysis.title, "empty");
        assert!(analysis.outline.is_empty());
        assert!(analysis.sections.is_empty());
    }

    #[test]
    fn test_outline_document_debug_keys() {
        let config = OutlineConfig::new().with_debug(true);
        let analysis = OutlineExtractor::new(config.clone()).extract(&sample()).unwrap();
        let doc = analysis.outline_document(&config);
        assert!(doc.debug_candidates.is_some());
        assert_eq!(doc.debug_first_lines.unwrap().len(), 15);

        let plain = analysis.outline_document(&OutlineConfig::default());
        assert!(plain.debug_candidates.is_none());
    }

    #[test]
    fn test_batch_isolates_failures() {
        let bad = LineDocument::new("bad.pdf", 1, vec![line(4, 0.0, "x", 10.0, 0.0)]);
        let docs = vec![sample(), bad, sample()];
        let results = process_batch(&docs, &OutlineConfig::default());
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, "quarterly.pdf");
        assert!(results[0].1.is_ok());
        assert!(matches!(results[1].1, Err(Error::Document { .. })));
        assert!(results[2].1.is_ok());
    }
}
