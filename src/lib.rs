//! Bootstrap launcher composer for JVM applications.
//!
//! This library builds self-executing "bootstrap" launchers: a single file
//! that is a tiny shell preamble followed by a ZIP archive, runnable directly
//! as `./app` or via `java -jar`. The archive embeds either the resolved
//! dependency jars themselves (standalone mode) or a manifest of remote URLs
//! to fetch them from at first launch (thin mode), plus optional isolation
//! groups that keep plugin dependencies in separate classloader scopes.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bootstrap;
pub mod cli;
pub mod error;
pub mod resolve;

// Re-export commonly used types
pub use error::{BootjarError, CliError, Result};
