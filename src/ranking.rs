//! Relevance ranking contract.
//!
//! Scoring sections against a persona's information need (dense embeddings,
//! BM25) is done by an external ranker behind [`SectionRanker`]. This module
//! provides the query string, the heading-level bonus and the report format
//! the ranker's output is assembled into.

use crate::error::Result;
use crate::structure::types::{HeadingLevel, Section};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Multiplier applied to H1/H2 section scores.
pub const HIGH_LEVEL_BONUS: f32 = 1.10;

/// Who the ranking is for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    /// Role, e.g. "PhD researcher"
    pub role: String,
    /// Area of expertise
    #[serde(default)]
    pub expertise: String,
    /// Topics of particular interest
    #[serde(default)]
    pub focus_areas: Vec<String>,
}

/// Ranking query for a persona and a job to be done.
///
/// # Examples
///
/// ```
/// use outline_oxide::ranking::{build_query, Persona};
///
/// let persona = Persona {
///     role: "Analyst".to_string(),
///     expertise: "Finance".to_string(),
///     focus_areas: vec!["revenue".to_string(), "risk".to_string()],
/// };
/// assert_eq!(
///     build_query(&persona, "Summarize trends"),
///     "Role: Analyst. Expertise: Finance. Focus: revenue, risk. Task: Summarize trends"
/// );
/// ```
pub fn build_query(persona: &Persona, job: &str) -> String {
    format!(
        "Role: {}. Expertise: {}. Focus: {}. Task: {}",
        persona.role,
        persona.expertise,
        persona.focus_areas.join(", "),
        job
    )
}

/// Score multiplier for a section's heading level.
pub fn level_bonus(level: HeadingLevel) -> f32 {
    match level {
        HeadingLevel::H1 | HeadingLevel::H2 => HIGH_LEVEL_BONUS,
        _ => 1.0,
    }
}

/// A passage picked out of a ranked section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinedPassage {
    /// Passage text
    pub refined_text: String,
    /// Page number (1-based)
    pub page_number: u32,
}

/// One section chosen by the ranker.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSection {
    /// Index into the section list given to the ranker
    pub section_index: usize,
    /// Relevance score
    pub score: f32,
    /// Passages refined from the section's paragraphs
    pub passages: Vec<RefinedPassage>,
}

/// External relevance ranker.
///
/// Implementations return sections most relevant first; they may call slow
/// model-inference services but must not mutate the sections.
pub trait SectionRanker {
    /// Rank `sections` against `query`.
    fn rank(&self, query: &str, sections: &[Section]) -> Result<Vec<RankedSection>>;
}

/// Report metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Input document names, sorted and unique
    pub input_documents: Vec<String>,
    /// Persona the ranking was made for
    pub persona: Persona,
    /// Job to be done
    pub job_to_be_done: String,
    /// UTC timestamp of report creation (RFC 3339)
    pub processing_timestamp: String,
}

/// A ranked section as listed in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSection {
    /// Document name
    pub document: String,
    /// First page of the section body (1-based)
    pub page_number: u32,
    /// Section heading
    pub section_title: String,
    /// 1-based rank
    pub importance_rank: usize,
}

/// A refined passage as listed in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubSectionAnalysis {
    /// Document name
    pub document: String,
    /// Passage text
    pub refined_text: String,
    /// Page number (1-based)
    pub page_number: u32,
}

/// The ranking report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingReport {
    /// Report metadata
    pub metadata: ReportMetadata,
    /// Ranked sections, most relevant first
    pub extracted_sections: Vec<ExtractedSection>,
    /// Refined passages of the ranked sections
    pub sub_section_analysis: Vec<SubSectionAnalysis>,
}

impl RankingReport {
    /// Assemble a report from the ranker's output.
    ///
    /// Ranked entries pointing outside `sections` are skipped.
    pub fn new(persona: &Persona, job: &str, sections: &[Section], ranked: &[RankedSection]) -> Self {
        let input_documents: BTreeSet<&str> = sections.iter().map(|s| s.doc_name.as_str()).collect();

        let mut extracted_sections = Vec::new();
        let mut sub_section_analysis = Vec::new();
        for r in ranked {
            let Some(section) = sections.get(r.section_index) else {
                log::warn!("Ranker returned unknown section index {}", r.section_index);
                continue;
            };
            extracted_sections.push(ExtractedSection {
                document: section.doc_name.clone(),
                page_number: section.page_start,
                section_title: section.heading.clone(),
                importance_rank: extracted_sections.len() + 1,
            });
            sub_section_analysis.extend(r.passages.iter().map(|p| SubSectionAnalysis {
                document: section.doc_name.clone(),
                refined_text: p.refined_text.clone(),
                page_number: p.page_number,
            }));
        }

        Self {
            metadata: ReportMetadata {
                input_documents: input_documents.into_iter().map(String::from).collect(),
                persona: persona.clone(),
                job_to_be_done: job.to_string(),
                processing_timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            },
            extracted_sections,
            sub_section_analysis,
        }
    }

    /// Run a ranker over the sections and assemble the report.
    pub fn generate<R: SectionRanker + ?Sized>(
        ranker: &R,
        persona: &Persona,
        job: &str,
        sections: &[Section],
    ) -> Result<Self> {
        let query = build_query(persona, job);
        log::debug!("Ranking {} sections for query {:?}", sections.len(), query);
        let ranked = ranker.rank(&query, sections)?;
        Ok(Self::new(persona, job, sections, &ranked))
    }
}
