//! Scanner - finds error-construction call sites and checks their messages
//!
//! The scanner reads a file line by line and applies the fixed call-site
//! pattern to each line. Matching is deliberately line-oriented: a literal
//! that spans lines, contains an escaped double quote, or is never closed on
//! the same line is not matched.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use regex::Regex;
use thiserror::Error;

/// Literal text every checked error message must start with
pub const REQUIRED_PREFIX: &str = "failed to";

/// Call-site shape: `fmt.Errorf("` followed by a quote-free message capture
const CALL_SITE_PATTERN: &str = r#"fmt\.Errorf\("([^"]+)""#;

/// Errors that can occur while scanning a single file
#[derive(Debug, Error)]
pub enum ScanError {
    /// File does not exist
    #[error("File not found: {}", path.display())]
    NotFound {
        /// The path that was requested
        path: PathBuf,
    },

    /// File exists but could not be opened
    #[error("Error processing file {}: {source}", path.display())]
    Open {
        /// The path that was requested
        path: PathBuf,
        /// Underlying cause
        source: io::Error,
    },

    /// I/O or decoding failure while reading
    #[error("Error processing file {}: {source}", path.display())]
    Read {
        /// The path that was being read
        path: PathBuf,
        /// Underlying cause
        source: io::Error,
    },
}

impl ScanError {
    /// The path this error is attributed to
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path } | Self::Open { path, .. } | Self::Read { path, .. } => path,
        }
    }
}

/// One line whose matched message fails the required-prefix check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// 1-based line number within the scanned file
    pub line: usize,
    /// The original line, trimmed of surrounding whitespace
    pub text: String,
}

/// Scans files for call sites whose message lacks the required prefix
#[derive(Debug)]
pub struct Scanner {
    pattern: Regex,
}

impl Scanner {
    /// Create a scanner with the call-site pattern compiled once
    ///
    /// # Panics
    ///
    /// Panics if the built-in pattern constant is not a valid regex, which a
    /// unit test rules out.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(CALL_SITE_PATTERN).expect("built-in call-site pattern is valid"),
        }
    }

    /// Scan one file and return its violations in file order
    ///
    /// An empty result means the file is compliant. The file handle is
    /// released before this returns, on success and on error alike.
    pub fn scan_file(&self, path: &Path) -> Result<Vec<Violation>, ScanError> {
        log::debug!("scanning {}", path.display());

        let file = File::open(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ScanError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ScanError::Open {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let reader = BufReader::new(file);
        let mut violations = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| ScanError::Read {
                path: path.to_path_buf(),
                source,
            })?;

            if let Some(message) = self.first_message(&line)
                && !message.starts_with(REQUIRED_PREFIX)
            {
                violations.push(Violation {
                    line: index + 1,
                    text: line.trim().to_string(),
                });
            }
        }

        log::debug!("{}: {} violation(s)", path.display(), violations.len());
        Ok(violations)
    }

    /// Captured message of the first call-site match on a line, if any
    ///
    /// Only the leftmost occurrence is considered; a line records at most one
    /// violation.
    fn first_message<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_temp(content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_pattern_compiles() {
        let _ = Scanner::new();
    }

    #[test]
    fn test_no_call_sites_is_compliant() {
        let file = write_temp(b"package main\n\nfunc main() {}\n");
        let violations = Scanner::new().scan_file(file.path()).unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn test_conforming_message_records_nothing() {
        let file = write_temp(br#"return fmt.Errorf("failed to open config")"#);
        let violations = Scanner::new().scan_file(file.path()).unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn test_message_equal_to_prefix_records_nothing() {
        let file = write_temp(br#"return fmt.Errorf("failed to")"#);
        let violations = Scanner::new().scan_file(file.path()).unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn test_nonconforming_message_records_violation() {
        let file = write_temp(
            b"x := fmt.Errorf(\"failed to read\")\ny := fmt.Errorf(\"could not write\")\nz := 5\n",
        );
        let violations = Scanner::new().scan_file(file.path()).unwrap();
        assert_eq!(
            violations,
            vec![Violation {
                line: 2,
                text: "y := fmt.Errorf(\"could not write\")".to_string(),
            }]
        );
    }

    #[test]
    fn test_prefix_check_is_case_sensitive() {
        let file = write_temp(br#"return fmt.Errorf("Failed to open")"#);
        let violations = Scanner::new().scan_file(file.path()).unwrap();
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_line_text_is_trimmed() {
        let file = write_temp(b"\treturn fmt.Errorf(\"bad thing\")  \n");
        let violations = Scanner::new().scan_file(file.path()).unwrap();
        assert_eq!(violations[0].text, "return fmt.Errorf(\"bad thing\")");
    }

    #[test]
    fn test_only_first_match_per_line_counts() {
        // First occurrence conforms, second does not: no violation.
        let file = write_temp(
            br#"a := fmt.Errorf("failed to x"); b := fmt.Errorf("could not y")"#,
        );
        let violations = Scanner::new().scan_file(file.path()).unwrap();
        assert!(violations.is_empty());

        // First occurrence violates: exactly one violation for the line.
        let file = write_temp(
            br#"a := fmt.Errorf("could not x"); b := fmt.Errorf("could not y")"#,
        );
        let violations = Scanner::new().scan_file(file.path()).unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 1);
    }

    #[test]
    fn test_unterminated_literal_does_not_match() {
        let file = write_temp(b"return fmt.Errorf(\"could not open\n");
        let violations = Scanner::new().scan_file(file.path()).unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn test_capture_stops_at_escaped_quote() {
        // The capture ends at the backslash before the escaped quote, so the
        // message seen by the check is `could not load \` and it violates.
        let file = write_temp(br#"return fmt.Errorf("could not load \"x\"")"#);
        let violations = Scanner::new().scan_file(file.path()).unwrap();
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_scan_is_idempotent() {
        let file = write_temp(
            b"x := fmt.Errorf(\"oops\")\ny := fmt.Errorf(\"failed to y\")\nz := fmt.Errorf(\"nope\")\n",
        );
        let scanner = Scanner::new();
        let first = scanner.scan_file(file.path()).unwrap();
        let second = scanner.scan_file(file.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = Scanner::new()
            .scan_file(Path::new("/nonexistent/input.go"))
            .unwrap_err();
        assert!(matches!(err, ScanError::NotFound { .. }));
        assert_eq!(err.path(), Path::new("/nonexistent/input.go"));
    }

    #[test]
    fn test_invalid_utf8_is_read_error() {
        let file = write_temp(b"fmt.Errorf(\"failed to x\")\n\xff\xfe\n");
        let err = Scanner::new().scan_file(file.path()).unwrap_err();
        assert!(matches!(err, ScanError::Read { .. }));
    }
}
