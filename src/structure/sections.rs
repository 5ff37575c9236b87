//! Section bodies and paragraphs.
//!
//! A section runs from the line after its heading up to the first line of the
//! next heading of equal or higher rank. Body lines are grouped into
//! paragraphs that break on blank lines and page changes.

use crate::layout::line::Line;
use crate::structure::types::{HeadingCandidate, Paragraph, Section};
use crate::text::script::{to_logical_order, TextOrder};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// "Appendix B: Reference Data"
    static ref RE_APPENDIX_SUBTITLE: Regex = Regex::new(r"^(Appendix [A-Z]):\s*(.+)$").unwrap();
}

/// Identity of the document the sections come from.
#[derive(Debug, Clone, Copy)]
pub struct DocumentRef<'a> {
    /// Document identifier (file stem)
    pub id: &'a str,
    /// Document name
    pub name: &'a str,
}

/// Repair headings that the layout split apart.
///
/// A same-page, same-level heading starting lowercase within 1pt of the
/// previous heading's top is the rest of a split word ("Working T" +
/// "ogether"). An `Appendix X: subtitle` heading on the same page and level
/// replaces the previous heading's text.
pub fn fix_up_headings(headings: Vec<HeadingCandidate>) -> Vec<HeadingCandidate> {
    let mut out: Vec<HeadingCandidate> = Vec::with_capacity(headings.len());
    for h in headings {
        let text = h.text.trim().to_string();
        if let Some(prev) = out.last_mut() {
            let same_page = h.page == prev.page;
            let same_level = h.level == prev.level;

            if same_page
                && same_level
                && (h.y0 - prev.y0).abs() < 1.0
                && text.chars().next().map(|c| c.is_lowercase()).unwrap_or(false)
            {
                prev.text.push_str(&text);
                prev.last_line = prev.last_line.max(h.last_line);
                continue;
            }

            if same_page && same_level {
                if let Some(caps) = RE_APPENDIX_SUBTITLE.captures(&text) {
                    prev.text = format!("{}: {}", &caps[1], &caps[2]);
                    prev.last_line = prev.last_line.max(h.last_line);
                    continue;
                }
            }
        }
        out.push(h);
    }
    out
}

/// Build one section per non-title heading that governs at least one
/// non-blank line.
///
/// `headings` must be in reading order. The title gets no section of its own
/// but, as the highest rank, closes any section open above it.
pub fn build_sections(
    doc: DocumentRef<'_>,
    lines: &[Line],
    headings: &[HeadingCandidate],
    order: TextOrder,
) -> Vec<Section> {
    let (titles, rest): (Vec<HeadingCandidate>, Vec<HeadingCandidate>) =
        headings.iter().cloned().partition(|h| h.is_title());
    let mut headings = titles;
    headings.extend(fix_up_headings(rest));
    headings.sort_by_key(|h| h.first_line);

    let mut sections = Vec::new();
    for (i, h) in headings.iter().enumerate() {
        let Some(level) = h.level else { continue };
        if h.is_title() {
            continue;
        }

        let start = h.last_line + 1;
        let end = headings[i + 1..]
            .iter()
            .filter(|next| next.first_line > h.last_line)
            .find(|next| next.level.map(|l| l.rank() <= level.rank()).unwrap_or(false))
            .map(|next| next.first_line)
            .unwrap_or(lines.len())
            .min(lines.len());
        if start >= end {
            log::trace!("Orphan heading {:?}", h.text);
            continue;
        }

        let block = &lines[start..end];
        let paragraphs = group_paragraphs(block, order);
        if paragraphs.is_empty() {
            continue;
        }

        let full_text = paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        sections.push(Section {
            doc_id: doc.id.to_string(),
            doc_name: doc.name.to_string(),
            heading: h.text.trim().to_string(),
            level,
            page_start: block[0].page + 1,
            page_end: block[block.len() - 1].page + 1,
            full_text,
            paragraphs,
        });
    }

    log::debug!("Built {} sections from {} headings", sections.len(), headings.len());
    sections
}

/// Group lines into paragraphs, breaking on blank lines and page changes.
pub fn group_paragraphs(lines: &[Line], order: TextOrder) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    let mut buf: Vec<String> = Vec::new();
    let mut page = match lines.first() {
        Some(line) => line.page,
        None => return paragraphs,
    };

    let flush = |buf: &mut Vec<String>, page: u32, paragraphs: &mut Vec<Paragraph>| {
        if !buf.is_empty() {
            paragraphs.push(Paragraph {
                page: page + 1,
                text: buf.join(" ").trim().to_string(),
            });
            buf.clear();
        }
    };

    for line in lines {
        if line.page != page {
            flush(&mut buf, page, &mut paragraphs);
            page = line.page;
        }
        if line.is_blank() {
            flush(&mut buf, page, &mut paragraphs);
            continue;
        }
        buf.push(to_logical_order(line.text.trim(), order).into_owned());
    }
    flush(&mut buf, page, &mut paragraphs);

    paragraphs
}
