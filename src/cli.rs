//! CLI definitions and driver loop

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use errprefix::output::{self, FileReport};
use errprefix::scanner::{REQUIRED_PREFIX, Scanner};

/// errprefix - enforce a required prefix on error-construction messages
#[derive(Parser, Debug)]
#[command(
    name = "errprefix",
    version,
    about = "Check that fmt.Errorf messages start with the required prefix",
    long_about = "Scan source files for fmt.Errorf call sites and verify that\n\
                  each quoted error message starts with 'failed to'.\n\n\
                  Exits 0 when every file is readable and compliant, 1 when\n\
                  any file is unreadable or contains a non-conforming message."
)]
pub struct Cli {
    /// Source files to check
    #[arg(value_name = "FILE")]
    pub paths: Vec<PathBuf>,
}

/// Run the CLI
///
/// Processes every requested file even when an earlier one fails; the exit
/// code reflects the aggregate outcome.
pub fn run() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if cli.paths.is_empty() {
        let program = std::env::args().next().unwrap_or_else(|| "errprefix".to_string());
        output::print_usage(&program);
        return ExitCode::FAILURE;
    }

    let scanner = Scanner::new();
    let mut failed = false;

    for path in &cli.paths {
        match scanner.scan_file(path) {
            Ok(violations) if violations.is_empty() => {
                log::debug!("{}: compliant", path.display());
            },
            Ok(violations) => {
                failed = true;
                FileReport::from_violations(path.clone(), violations).render();
            },
            Err(error) => {
                failed = true;
                output::print_file_error(&error);
                FileReport::from_error(&error).render();
            },
        }
    }

    if failed {
        log::info!("run failed: required prefix is '{REQUIRED_PREFIX}'");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
