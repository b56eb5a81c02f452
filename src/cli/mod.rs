//! Command line interface for bootjar.
//!
//! This module wires argument parsing, graph loading, and the composer
//! together into the binary's entry point.

mod args;

pub use args::Args;

use crate::bootstrap::{Bootstrapper, SettingsBuilder};
use crate::error::{CliError, Result};
use crate::resolve::ResolvedGraph;

/// Main CLI entry point
pub fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let graph = ResolvedGraph::load(&args.artifacts)?;

    let mut builder = SettingsBuilder::new()
        .main_class(args.main_class)
        .output(args.output)
        .standalone(args.standalone)
        .java_opts(args.java_opts)
        .property_overrides(args.properties)
        .overwrite(args.overwrite)
        .checksum(args.checksum);
    if let Some(dir) = args.download_dir {
        builder = builder.download_dir(dir);
    }
    if let Some(template) = args.template {
        builder = builder.template(template);
    }
    let settings = builder.build()?;

    let artifact = Bootstrapper::new(settings).build(&graph)?;
    log::info!("launcher is {} bytes, sha256 {}", artifact.size, artifact.checksum);

    Ok(0)
}

/// Parse arguments without executing (for testing)
#[allow(dead_code)] // Public API - preserved for external consumers
pub fn parse_args() -> Args {
    Args::parse_args()
}

/// Validate arguments without executing (for testing)
#[allow(dead_code)] // Public API - preserved for external consumers
pub fn validate_args(args: &Args) -> std::result::Result<(), String> {
    args.validate()
}
