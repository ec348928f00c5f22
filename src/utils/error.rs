// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

use crate::extractors::section::{Format, HeadingLevel};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Invalid heading level '{value}' for {format} changelog: {reason}")]
    InvalidLevel {
        format: Format,
        value: String,
        reason: &'static str,
    },

    #[error("No headings found in {0} changelog")]
    MissingHeadings(Format),

    #[error("No heading of level {0} found")]
    LevelNotFound(HeadingLevel),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not read changelog {}: {}", .path.display(), .source)]
    ReadChangelog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Output failed: {0}")]
    Output(#[from] OutputError),
}
