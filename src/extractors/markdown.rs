// src/extractors/markdown.rs

// --- Imports ---
use crate::extractors::section::{
    slice_section, ExtractedSection, ExtractionStrategy, Format, HeadingLevel, LevelOrder,
};
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;

// --- Regex Patterns (Lazy Static) ---
// ATX heading: 1-6 '#' at line start, one space, then the title.
// Seven or more '#' never match since the run must be followed by a space.
static ATX_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^(#{1,6}) (.+)").expect("Failed to compile ATX_HEADING_RE")
});

// --- Data Structures ---
#[derive(Debug, Clone, PartialEq, Eq)]
struct AtxHeading<'a> {
    start: usize, // Byte offset of the first '#'
    end: usize,   // Byte offset just past the title (the line terminator)
    depth: usize,
    title: &'a str,
}

fn scan_headings(content: &str) -> Vec<AtxHeading<'_>> {
    ATX_HEADING_RE
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(AtxHeading {
                start: whole.start(),
                end: whole.end(),
                depth: caps.get(1)?.as_str().len(),
                title: caps.get(2)?.as_str(),
            })
        })
        .collect()
}

/// Extracts a release section from a Markdown changelog.
pub struct MarkdownExtractor;

impl ExtractionStrategy for MarkdownExtractor {
    fn extract(
        &self,
        content: &str,
        level: Option<HeadingLevel>,
    ) -> Result<ExtractedSection, ExtractError> {
        let headings = scan_headings(content);
        tracing::debug!("Found {} Markdown headings", headings.len());

        let depth = match level {
            Some(HeadingLevel::Depth(depth)) => depth,
            Some(other) => {
                return Err(ExtractError::InvalidLevel {
                    format: Format::Markdown,
                    value: other.to_string(),
                    reason: "Markdown levels are heading depths",
                })
            }
            None => {
                let order: LevelOrder<usize> = headings.iter().map(|h| h.depth).collect();
                let depth = order
                    .target()
                    .ok_or(ExtractError::MissingHeadings(Format::Markdown))?;
                tracing::debug!("Auto-detected heading depth {} from {:?}", depth, order);
                depth
            }
        };

        // Exact depth match: a level-3 target never picks up '####' headings.
        let mut matches = headings.iter().filter(|h| h.depth == depth);
        let first = matches
            .next()
            .ok_or(ExtractError::LevelNotFound(HeadingLevel::Depth(depth)))?;
        let next_start = matches.next().map(|h| h.start);

        Ok(ExtractedSection {
            format: Format::Markdown,
            level: HeadingLevel::Depth(depth),
            title: first.title.trim().to_string(),
            content: slice_section(content, first.end, next_start),
        })
    }
}
