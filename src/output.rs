//! Output formatting for report blocks and diagnostics
//!
//! Violation reports go to stdout so CI logs capture them alongside the
//! run; file-access diagnostics go to stderr. Nothing here changes the exit
//! status, which the CLI driver derives from what was reported.

use std::path::PathBuf;

use crate::scanner::{REQUIRED_PREFIX, ScanError, Violation};

/// Report block for one file with at least one finding
///
/// Rendered as a header naming the file and the required-prefix rule,
/// followed by one `<line>:<text>` entry per finding and a blank separator
/// line.
#[derive(Debug)]
pub struct FileReport {
    /// The file the findings belong to
    pub path: PathBuf,
    /// Findings in increasing line order
    pub entries: Vec<Violation>,
}

impl FileReport {
    /// Build a report from the scanner's violations for one file
    #[must_use]
    pub const fn from_violations(path: PathBuf, entries: Vec<Violation>) -> Self {
        Self { path, entries }
    }

    /// Build a report for a file that could not be processed
    ///
    /// The single entry uses line number `0` and the error description in
    /// place of line text, so an unreadable file still shows up in the
    /// report stream.
    #[must_use]
    pub fn from_error(error: &ScanError) -> Self {
        Self {
            path: error.path().to_path_buf(),
            entries: vec![Violation {
                line: 0,
                text: error.to_string(),
            }],
        }
    }

    /// Print this report block to stdout
    pub fn render(&self) {
        println!(
            "Error in {}: The following error messages do not start with '{}':",
            self.path.display(),
            REQUIRED_PREFIX
        );
        for entry in &self.entries {
            println!("{}:{}", entry.line, entry.text);
        }
        println!();
    }
}

/// Print a one-line diagnostic for an unreadable file to stderr
pub fn print_file_error(error: &ScanError) {
    match error {
        ScanError::NotFound { .. } => eprintln!("Error: {error}"),
        ScanError::Open { .. } | ScanError::Read { .. } => eprintln!("{error}"),
    }
}

/// Print the usage message to stdout
pub fn print_usage(program: &str) {
    println!("Usage: {program} <file1.go> <file2.go> ...");
}
