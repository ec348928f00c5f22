// src/main.rs
mod extractors;
mod storage;
mod utils;

use clap::Parser;
use extractors::section::normalize_newlines;
use extractors::SectionExtractor;
use std::path::PathBuf;
use storage::OutputSink;
use utils::AppError;

/// Extract the latest release notes from a changelog as Markdown
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the changelog file (.md is read as Markdown, anything else as reStructuredText)
    changelog: PathBuf,

    /// Heading level to extract. For RST: the adornment character (e.g. '=').
    /// For Markdown: the heading depth as a number (e.g. '2' for '##').
    /// If omitted, the second distinct heading level found in the file is used.
    #[arg(long)]
    heading_level: Option<String>,

    /// Name of the GitHub Actions output variable to set
    #[arg(long, default_value = "release-notes")]
    output_name: String,

    /// GitHub Actions output file to append to; notes are printed to stdout when unset
    #[arg(long, env = "GITHUB_OUTPUT", hide_env_values = true)]
    github_output: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var, writes to stderr)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::debug!("Starting with args: {:?}", args);
    validate_output_name(&args.output_name)?;

    // 3. Extract the notes
    let notes = extract_release_notes(&args)?;

    // 4. Hand them to the workflow
    let sink = OutputSink::from_env(args.github_output.clone());
    sink.write_notes(&args.output_name, &notes)?;

    Ok(())
}

/// Reads the changelog and extracts the release section from it.
fn extract_release_notes(args: &Args) -> Result<String, AppError> {
    let content =
        std::fs::read_to_string(&args.changelog).map_err(|source| AppError::ReadChangelog {
            path: args.changelog.clone(),
            source,
        })?;

    // Line endings are read the way text-mode readers see them.
    let content = normalize_newlines(&content);

    let extractor = SectionExtractor::for_path(&args.changelog);
    tracing::info!(
        "Reading {} as {} ({} bytes)",
        args.changelog.display(),
        extractor.format(),
        content.len()
    );

    Ok(extractor.extract(&content, args.heading_level.as_deref())?)
}

// The output file is line oriented; a name spanning lines would corrupt it.
fn validate_output_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() || name.contains(['\n', '\r']) || name.contains("<<") {
        return Err(AppError::Config(format!(
            "Invalid output name {:?}: must be a single non-empty line without '<<'",
            name
        )));
    }
    Ok(())
}
