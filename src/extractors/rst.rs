// src/extractors/rst.rs

// --- Imports ---
use crate::extractors::convert::rst_to_markdown;
use crate::extractors::section::{
    slice_section, ExtractedSection, ExtractionStrategy, Format, HeadingLevel, LevelOrder,
};
use crate::utils::error::ExtractError;

/// RST adornments may use any printable punctuation: not a word character
/// (alphanumeric or `_`) and not whitespace.
pub fn is_adornment_char(c: char) -> bool {
    !(c.is_alphanumeric() || c == '_' || c.is_whitespace())
}

/// Which lines count as overlines/underlines while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdornmentRule {
    /// Two or more copies of one adornment character. Overline and underline
    /// may differ; the underline decides the level.
    Any,
    /// One or more copies of this exact character, for overline and underline.
    Exactly(char),
}

impl AdornmentRule {
    /// Returns the adornment character if `line` is made only of it.
    fn run(self, line: &str) -> Option<char> {
        let first = line.chars().next()?;
        let uniform = line.chars().all(|c| c == first);
        match self {
            AdornmentRule::Any => {
                let repeated = line.len() > first.len_utf8();
                (uniform && repeated && is_adornment_char(first)).then_some(first)
            }
            AdornmentRule::Exactly(target) => (uniform && first == target).then_some(target),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    start: usize,
    text: &'a str,
    terminated: bool, // Followed by '\n'
}

impl Line<'_> {
    fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

fn split_lines(content: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut start = 0;
    for text in content.split('\n') {
        let end = start + text.len();
        lines.push(Line {
            start,
            text,
            terminated: end < content.len(),
        });
        start = end + 1;
    }
    lines
}

/// A title line with its underline and optional overline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingBlock<'a> {
    pub start: usize, // Start of the overline, or of the title when there is none
    pub end: usize,   // End of the underline, before its terminator
    pub title: &'a str,
    pub overline: Option<char>,
    pub underline: char,
}

/// Iterates over the heading blocks of an RST document in order.
///
/// Blocks never overlap: scanning resumes on the line after an underline.
pub struct HeadingBlocks<'a> {
    lines: Vec<Line<'a>>,
    next: usize,
    rule: AdornmentRule,
}

impl<'a> HeadingBlocks<'a> {
    pub fn new(content: &'a str, rule: AdornmentRule) -> Self {
        Self {
            lines: split_lines(content),
            next: 0,
            rule,
        }
    }

    fn with_overline(&self, i: usize) -> Option<(HeadingBlock<'a>, usize)> {
        let [over, title, under] = self.lines.get(i..i + 3)? else {
            return None;
        };
        if !over.terminated || !title.terminated || title.text.is_empty() {
            return None;
        }
        let overline = self.rule.run(over.text)?;
        let underline = self.rule.run(under.text)?;
        let block = HeadingBlock {
            start: over.start,
            end: under.end(),
            title: title.text,
            overline: Some(overline),
            underline,
        };
        Some((block, i + 3))
    }

    fn without_overline(&self, i: usize) -> Option<(HeadingBlock<'a>, usize)> {
        let [title, under] = self.lines.get(i..i + 2)? else {
            return None;
        };
        if !title.terminated || title.text.is_empty() {
            return None;
        }
        let underline = self.rule.run(under.text)?;
        let block = HeadingBlock {
            start: title.start,
            end: under.end(),
            title: title.text,
            overline: None,
            underline,
        };
        Some((block, i + 2))
    }
}

impl<'a> Iterator for HeadingBlocks<'a> {
    type Item = HeadingBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.lines.len() {
            let i = self.next;
            if let Some((block, resume)) = self
                .with_overline(i)
                .or_else(|| self.without_overline(i))
            {
                self.next = resume;
                return Some(block);
            }
            self.next += 1;
        }
        None
    }
}

/// Adornment characters in order of first appearance as underlines.
pub fn level_order(content: &str) -> LevelOrder<char> {
    HeadingBlocks::new(content, AdornmentRule::Any)
        .map(|block| block.underline)
        .collect()
}

/// Extracts a release section from a reStructuredText changelog and returns
/// it converted to Markdown.
pub struct RstExtractor;

impl ExtractionStrategy for RstExtractor {
    fn extract(
        &self,
        content: &str,
        level: Option<HeadingLevel>,
    ) -> Result<ExtractedSection, ExtractError> {
        let order = level_order(content);
        tracing::debug!("RST adornment order: {:?}", order);

        let target = match level {
            Some(HeadingLevel::Adornment(c)) => c,
            Some(other) => {
                return Err(ExtractError::InvalidLevel {
                    format: Format::Rst,
                    value: other.to_string(),
                    reason: "RST levels are adornment characters",
                })
            }
            None => order
                .target()
                .ok_or(ExtractError::MissingHeadings(Format::Rst))?,
        };

        let mut matches = HeadingBlocks::new(content, AdornmentRule::Exactly(target));
        let first = matches
            .next()
            .ok_or(ExtractError::LevelNotFound(HeadingLevel::Adornment(target)))?;
        let next_start = matches.next().map(|block| block.start);

        let section = slice_section(content, first.end, next_start);
        tracing::debug!(
            "Sliced {} bytes under heading '{}' (underline '{}', overline {:?})",
            section.len(),
            first.title.trim(),
            first.underline,
            first.overline
        );

        Ok(ExtractedSection {
            format: Format::Rst,
            level: HeadingLevel::Adornment(target),
            title: first.title.trim().to_string(),
            content: rst_to_markdown(&section, &order),
        })
    }
}
