//! Document structure recovery.
//!
//! Turns heading candidates into a leveled outline with a title, and slices
//! the line stream into sections:
//! - [`level_assign`]: merges, title choice, numbering/font-tier levels, promotion
//! - [`sections`]: heading fix-ups, section bodies and paragraphs

pub mod level_assign;
pub mod sections;
pub mod types;

pub use level_assign::{assign_levels, dedupe_outline, merge_candidates, outline_entries, LevelAssignment};
pub use sections::{build_sections, group_paragraphs, DocumentRef};
pub use types::{HeadingCandidate, HeadingLevel, OutlineEntry, Paragraph, Section};
