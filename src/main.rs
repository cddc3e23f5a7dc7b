//! errprefix - A CLI linter that checks error-construction messages for a
//! required prefix
//!
//! This binary scans the given source files for `fmt.Errorf("...")` call
//! sites and fails the run when any quoted message does not start with the
//! required `failed to` prefix.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

mod cli;

use std::process::ExitCode;

/// Main entry point for the errprefix CLI
fn main() -> ExitCode {
    cli::run()
}
