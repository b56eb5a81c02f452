//! Bootjar - self-executing bootstrap launcher composer for JVM applications.
//!
//! This binary turns a resolved dependency graph into a single executable
//! launcher file (shell preamble + ZIP archive) with proper error handling
//! and artifact verification.

use std::process;

fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match bootjar::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
