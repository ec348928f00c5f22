// src/storage/mod.rs
use crate::utils::error::OutputError;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

/// Heredoc delimiter for multiline values in a GitHub Actions output file.
pub const OUTPUT_DELIMITER: &str = "EOF_RELEASE_NOTES";

/// Where the extracted notes end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// Appended as a `name<<DELIMITER` block to the file named by `GITHUB_OUTPUT`.
    GithubOutput(PathBuf),
    /// Printed to stdout.
    Stdout,
}

impl OutputSink {
    /// Uses the GitHub Actions output file when its path is set and non-empty.
    pub fn from_env(github_output: Option<PathBuf>) -> Self {
        match github_output {
            Some(path) if !path.as_os_str().is_empty() => OutputSink::GithubOutput(path),
            _ => OutputSink::Stdout,
        }
    }

    /// Writes the notes under the output variable `name`.
    pub fn write_notes(&self, name: &str, notes: &str) -> Result<(), OutputError> {
        match self {
            OutputSink::GithubOutput(path) => {
                // Other steps may have written outputs already, so append.
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                file.write_all(format_output_block(name, notes).as_bytes())?;
                tracing::info!("Set output '{}' in {}", name, path.display());
            }
            OutputSink::Stdout => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{}", notes)?;
            }
        }
        Ok(())
    }
}

/// Formats one multiline output entry in the GitHub Actions heredoc syntax.
pub fn format_output_block(name: &str, notes: &str) -> String {
    format!("{name}<<{OUTPUT_DELIMITER}\n{notes}\n{OUTPUT_DELIMITER}\n")
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_output_block_format() {
        assert_eq!(
            format_output_block("release-notes", "- One\n- Two"),
            "release-notes<<EOF_RELEASE_NOTES\n- One\n- Two\nEOF_RELEASE_NOTES\n"
        );
        assert_eq!(
            format_output_block("notes", ""),
            "notes<<EOF_RELEASE_NOTES\n\nEOF_RELEASE_NOTES\n"
        );
    }

    #[test]
    fn test_sink_selection() {
        assert_eq!(OutputSink::from_env(None), OutputSink::Stdout);
        assert_eq!(OutputSink::from_env(Some(PathBuf::new())), OutputSink::Stdout);
        assert_eq!(
            OutputSink::from_env(Some(PathBuf::from("/tmp/out"))),
            OutputSink::GithubOutput(PathBuf::from("/tmp/out"))
        );
    }

    #[test]
    fn test_github_output_appends() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("github_output");
        fs::write(&path, "existing=value\n").expect("seed output file");

        let sink = OutputSink::GithubOutput(path.clone());
        sink.write_notes("release-notes", "- Fixed things.").expect("write notes");

        let written = fs::read_to_string(&path).expect("read output file");
        assert_eq!(
            written,
            "existing=value\nrelease-notes<<EOF_RELEASE_NOTES\n- Fixed things.\nEOF_RELEASE_NOTES\n"
        );
    }

    #[test]
    fn test_github_output_created_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("fresh");

        OutputSink::GithubOutput(path.clone())
            .write_notes("notes", "body")
            .expect("write notes");

        assert_eq!(
            fs::read_to_string(&path).expect("read output file"),
            "notes<<EOF_RELEASE_NOTES\nbody\nEOF_RELEASE_NOTES\n"
        );
    }

    #[test]
    fn test_unwritable_output_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        // A directory cannot be opened for appending.
        let sink = OutputSink::GithubOutput(dir.path().to_path_buf());
        assert!(matches!(
            sink.write_notes("notes", "body"),
            Err(OutputError::Io(_))
        ));
    }
}
