//! Launcher build coordination.

mod checksum;
mod orchestrator;

pub use checksum::{calculate_sha256, write_checksum_file};
pub use orchestrator::{Bootstrapper, BuiltLauncher};
