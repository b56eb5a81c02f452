//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with basic shape
//! validation here and full input validation in the settings builder.

use clap::Parser;
use std::path::PathBuf;

/// Self-executing bootstrap launcher composer for JVM applications
#[derive(Parser, Debug)]
#[command(
    name = "bootjar",
    version,
    about = "Self-executing bootstrap launcher composer for JVM applications",
    long_about = "Composes a resolved dependency graph into a single executable launcher file:
a two-line shell preamble followed by a ZIP archive, runnable as ./app or via java -jar.

Thin launchers (default) embed only the remote URLs and download dependencies into the
configured directory at first run; standalone launchers embed the artifact bytes directly.

Usage:
  bootjar --artifacts resolved.json --main-class com.foo.Main --download-dir libs --output app
  bootjar --artifacts resolved.json --main-class com.foo.Main --standalone --output app
  bootjar --artifacts resolved.json --main-class com.foo.Main --download-dir libs \\
          --java-opt -Xmx512m -P launcher.debug=true --checksum --output app

Exit code 0 = launcher guaranteed to exist, executable, at the output path."
)]
pub struct Args {
    /// Resolved artifact graph (JSON) produced by the dependency resolver
    #[arg(short = 'a', long, value_name = "FILE")]
    pub artifacts: PathBuf,

    /// Fully qualified main class recorded in bootstrap.properties
    #[arg(short = 'm', long, value_name = "CLASS")]
    pub main_class: String,

    /// Output path for the launcher
    ///
    /// The file becomes executable for every class of user that can read it.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: PathBuf,

    /// Embed resolved artifact bytes instead of remote URLs
    #[arg(long)]
    pub standalone: bool,

    /// Directory the thin launcher downloads dependencies into at first run
    #[arg(short = 'd', long, value_name = "DIR")]
    pub download_dir: Option<String>,

    /// Launcher template archive (defaults to bootstrap.jar beside the executable)
    #[arg(long, value_name = "FILE", env = "BOOTJAR_TEMPLATE")]
    pub template: Option<PathBuf>,

    /// JVM option baked into the shell preamble (repeatable)
    #[arg(short = 'J', long = "java-opt", value_name = "OPT", allow_hyphen_values = true)]
    pub java_opts: Vec<String>,

    /// Extra KEY=VALUE pair for bootstrap.properties (repeatable)
    #[arg(short = 'P', long = "property", value_name = "KEY=VALUE")]
    pub properties: Vec<String>,

    /// Replace the output file if it already exists
    #[arg(long)]
    pub overwrite: bool,

    /// Write a sha256sum-compatible sidecar next to the output
    #[arg(long)]
    pub checksum: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.artifacts.as_os_str().is_empty() {
            return Err("Artifact graph path cannot be empty".to_string());
        }

        if self.output.as_os_str().is_empty() {
            return Err("Output path cannot be empty".to_string());
        }

        Ok(())
    }
}
