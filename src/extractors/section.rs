// src/extractors/section.rs

// --- Imports ---
use crate::utils::error::ExtractError;
use std::borrow::Cow;
use std::fmt;
use std::path::Path;

// --- Constants ---
/// Deepest ATX heading Markdown allows (`######`).
pub const MAX_MARKDOWN_DEPTH: usize = 6;

// --- Data Structures ---

/// Changelog markup, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Markdown,
    Rst,
}

impl Format {
    /// `.md` (any case) is Markdown. Everything else, including a missing
    /// extension, is read as reStructuredText.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("md") => Format::Markdown,
            _ => Format::Rst,
        }
    }

    /// Parses a `--heading-level` value for this format.
    ///
    /// Markdown takes a heading depth (`2` for `##`), RST takes the adornment
    /// character used to underline the wanted headings (`-`).
    pub fn parse_level(self, value: &str) -> Result<HeadingLevel, ExtractError> {
        let invalid = |reason: &'static str| ExtractError::InvalidLevel {
            format: self,
            value: value.to_string(),
            reason,
        };

        match self {
            Format::Markdown => {
                let depth: usize = value
                    .trim()
                    .parse()
                    .map_err(|_| invalid("expected a heading depth such as 2"))?;
                if !(1..=MAX_MARKDOWN_DEPTH).contains(&depth) {
                    return Err(invalid("heading depth must be between 1 and 6"));
                }
                Ok(HeadingLevel::Depth(depth))
            }
            Format::Rst => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_whitespace() => Ok(HeadingLevel::Adornment(c)),
                    _ => Err(invalid("expected a single adornment character such as '-'")),
                }
            }
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Markdown => f.write_str("Markdown"),
            Format::Rst => f.write_str("reStructuredText"),
        }
    }
}

/// The heading level a section is bounded by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    /// Number of leading `#` on a Markdown heading line.
    Depth(usize),
    /// Character underlining an RST heading.
    Adornment(char),
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeadingLevel::Depth(depth) => write!(f, "{} (depth {})", "#".repeat(*depth), depth),
            HeadingLevel::Adornment(c) => write!(f, "'{}'", c),
        }
    }
}

/// Distinct heading levels in order of first appearance in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelOrder<T> {
    levels: Vec<T>,
}

impl<T: Copy + PartialEq> LevelOrder<T> {
    pub fn new() -> Self {
        Self { levels: Vec::new() }
    }

    /// Records `level` unless it was already seen.
    pub fn push(&mut self, level: T) {
        if !self.levels.contains(&level) {
            self.levels.push(level);
        }
    }

    pub fn position(&self, level: T) -> Option<usize> {
        self.levels.iter().position(|seen| *seen == level)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// The level release sections usually live at: the second distinct
    /// level (the first is the document title), or the only level when the
    /// document has just one.
    pub fn target(&self) -> Option<T> {
        self.levels.get(1).or_else(|| self.levels.first()).copied()
    }
}

impl<T: Copy + PartialEq> FromIterator<T> for LevelOrder<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut order = Self::new();
        for level in iter {
            order.push(level);
        }
        order
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSection {
    pub format: Format,       // Markup the section was read from
    pub level: HeadingLevel,  // Level of the heading bounding the section
    pub title: String,        // Title of that heading, e.g. "1.2.0 (2024-05-01)"
    pub content: String,      // Section body as Markdown, trimmed
}

/// A way of pulling the release section out of one changelog format.
pub trait ExtractionStrategy {
    /// Finds the first heading at `level` (auto-detected when `None`) and
    /// returns everything up to the next heading at that level.
    ///
    /// `MissingHeadings` and `LevelNotFound` mean "no notes", not failure;
    /// callers decide how to surface them.
    fn extract(
        &self,
        content: &str,
        level: Option<HeadingLevel>,
    ) -> Result<ExtractedSection, ExtractError>;
}

/// Rewrites `\r\n` and lone `\r` line endings to `\n`.
///
/// Heading scans split on `\n` only, so a CRLF underline would otherwise keep
/// a trailing `\r` and stop being an adornment run.
pub fn normalize_newlines(content: &str) -> Cow<'_, str> {
    if !content.contains('\r') {
        return Cow::Borrowed(content);
    }
    Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Slices the section body: from just past the bounding heading's line
/// terminator to the start of the next same-level heading, or the end of the
/// document.
pub fn slice_section(content: &str, heading_end: usize, next_start: Option<usize>) -> String {
    let start = (heading_end + 1).min(content.len());
    let end = next_start.unwrap_or(content.len()).max(start);
    content[start..end].trim().to_string()
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::from_path(Path::new("CHANGELOG.md")), Format::Markdown);
        assert_eq!(Format::from_path(Path::new("docs/CHANGES.MD")), Format::Markdown);
        assert_eq!(Format::from_path(Path::new("CHANGELOG.rst")), Format::Rst);
        assert_eq!(Format::from_path(Path::new("CHANGELOG")), Format::Rst);
        assert_eq!(Format::from_path(Path::new("notes.markdown")), Format::Rst);
        // A dotfile has no extension.
        assert_eq!(Format::from_path(Path::new(".md")), Format::Rst);
    }

    #[test]
    fn test_parse_markdown_level() {
        assert_eq!(Format::Markdown.parse_level("3"), Ok(HeadingLevel::Depth(3)));
        assert_eq!(Format::Markdown.parse_level(" 2 "), Ok(HeadingLevel::Depth(2)));
        assert!(matches!(
            Format::Markdown.parse_level("0"),
            Err(ExtractError::InvalidLevel { format: Format::Markdown, .. })
        ));
        assert!(Format::Markdown.parse_level("7").is_err());
        assert!(Format::Markdown.parse_level("-").is_err());
    }

    #[test]
    fn test_parse_rst_level() {
        assert_eq!(Format::Rst.parse_level("-"), Ok(HeadingLevel::Adornment('-')));
        assert_eq!(Format::Rst.parse_level("~"), Ok(HeadingLevel::Adornment('~')));
        assert!(Format::Rst.parse_level("").is_err());
        assert!(Format::Rst.parse_level("--").is_err());
        assert!(Format::Rst.parse_level(" ").is_err());
    }

    #[test]
    fn test_level_order_target() {
        let empty: LevelOrder<usize> = LevelOrder::new();
        assert_eq!(empty.target(), None);

        let single: LevelOrder<usize> = [2, 2, 2].into_iter().collect();
        assert_eq!(single.target(), Some(2));
        assert_eq!(single.len(), 1);

        let order: LevelOrder<char> = ['=', '-', '=', '~', '-'].into_iter().collect();
        assert_eq!(order.target(), Some('-'));
        assert_eq!(order.len(), 3);
        assert_eq!(order.position('~'), Some(2));
        assert_eq!(order.position('^'), None);
    }

    #[test]
    fn test_normalize_newlines() {
        assert!(matches!(normalize_newlines("a\nb\n"), Cow::Borrowed("a\nb\n")));
        assert_eq!(normalize_newlines("a\r\nb\r\n"), "a\nb\n");
        assert_eq!(normalize_newlines("a\rb\r\r\nc"), "a\nb\n\nc");
    }

    #[test]
    fn test_slice_section_bounds() {
        let doc = "## A\n\nbody\n\n## B\n";
        assert_eq!(slice_section(doc, 4, Some(12)), "body");
        assert_eq!(slice_section(doc, 4, None), "body\n\n## B");
        // Heading on the last line without a terminator.
        assert_eq!(slice_section("## A", 4, None), "");
    }
}
