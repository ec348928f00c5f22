// src/extractors/mod.rs
pub mod convert;
pub mod markdown;
pub mod rst;
pub mod section;

use crate::utils::error::ExtractError;
use std::path::Path;

// Re-export key extraction types for convenience
pub use markdown::MarkdownExtractor;
pub use rst::RstExtractor;
#[allow(unused_imports)]
pub use section::{ExtractedSection, ExtractionStrategy, Format, HeadingLevel};

/// Picks the strategy for a changelog's format and runs it.
pub struct SectionExtractor {
    format: Format,
}

impl SectionExtractor {
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    pub fn for_path(path: &Path) -> Self {
        Self::new(Format::from_path(path))
    }

    pub fn format(&self) -> Format {
        self.format
    }

    fn strategy(&self) -> &'static dyn ExtractionStrategy {
        match self.format {
            Format::Markdown => &MarkdownExtractor,
            Format::Rst => &RstExtractor,
        }
    }

    /// Extracts the release section, with `level` as the raw `--heading-level`
    /// value. A changelog without headings, or without any at the requested
    /// level, yields `Ok(None)`; only a malformed `level` is an error.
    pub fn extract_section(
        &self,
        content: &str,
        level: Option<&str>,
    ) -> Result<Option<ExtractedSection>, ExtractError> {
        let level = level
            .map(|raw| self.format.parse_level(raw))
            .transpose()?;

        match self.strategy().extract(content, level) {
            Ok(section) => {
                tracing::info!(
                    "Extracted {} section '{}' at level {} ({} bytes)",
                    section.format,
                    section.title,
                    section.level,
                    section.content.len()
                );
                Ok(Some(section))
            }
            Err(e @ (ExtractError::MissingHeadings(_) | ExtractError::LevelNotFound(_))) => {
                tracing::warn!("{}; release notes will be empty", e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Like [`Self::extract_section`] but returns just the notes, empty when
    /// nothing was found.
    pub fn extract(&self, content: &str, level: Option<&str>) -> Result<String, ExtractError> {
        Ok(self
            .extract_section(content, level)?
            .map(|section| section.content)
            .unwrap_or_default())
    }
}
