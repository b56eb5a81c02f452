//! Main launcher build orchestration.
//!
//! This module provides the [`Bootstrapper`] orchestrator that runs the
//! whole pipeline: template lookup, isolation partitioning, archive
//! composition, launcher assembly, and artifact verification.

use std::env;
use std::fs;
use std::path::PathBuf;

use super::checksum::{calculate_sha256, write_checksum_file};
use crate::bootstrap::archive::{ArchivePlan, compose};
use crate::bootstrap::error::{Context, Error, ErrorExt, Result};
use crate::bootstrap::isolation::{ArtifactSource, partition};
use crate::bootstrap::launcher::assemble;
use crate::bootstrap::settings::Settings;
use crate::resolve::ResolvedGraph;

/// File name of the launcher template looked up beside the executable.
const TEMPLATE_FILE_NAME: &str = "bootstrap.jar";

/// A built launcher and its verification metadata.
#[derive(Debug, Clone)]
pub struct BuiltLauncher {
    /// Where the launcher was written
    pub path: PathBuf,

    /// Size of the launcher in bytes
    pub size: u64,

    /// Hex-encoded SHA-256 of the launcher
    pub checksum: String,
}

/// Main launcher build orchestrator.
///
/// Owns validated [`Settings`] and turns one resolved artifact graph into
/// one executable launcher file.
///
/// # Examples
///
/// ```no_run
/// use bootjar::bootstrap::{Bootstrapper, SettingsBuilder};
/// use bootjar::resolve::ResolvedGraph;
///
/// # fn example() -> bootjar::bootstrap::Result<()> {
/// let settings = SettingsBuilder::new()
///     .main_class("com.example.Main")
///     .output("build/app")
///     .download_dir("libs")
///     .build()?;
///
/// # let graph: ResolvedGraph = unimplemented!();
/// let artifact = Bootstrapper::new(settings).build(&graph)?;
/// println!("{} ({} bytes)", artifact.path.display(), artifact.size);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bootstrapper {
    settings: Settings,
}

impl Bootstrapper {
    /// Creates a new orchestrator with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Returns a reference to the build settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Builds the launcher file.
    ///
    /// Runs the full pipeline synchronously: every step completes before the
    /// next begins, and the archive is buffered in memory until the single
    /// output write.
    ///
    /// # Errors
    ///
    /// Any failure aborts the run; no partial output is left in place of the
    /// final file.
    pub fn build(&self, graph: &ResolvedGraph) -> Result<BuiltLauncher> {
        let standalone = self.settings.standalone();
        log::info!(
            "Building {} launcher for {}",
            if standalone { "standalone" } else { "thin" },
            self.settings.main_class()
        );

        let template = self.load_template()?;

        let targets = graph.isolation_targets();
        let groups = partition(graph, targets, standalone)?;
        let isolation_active = targets.iter().any(|t| !t.modules.is_empty());

        let main = graph.main_subset();
        let main_urls = main.urls();
        let main_files = if standalone {
            graph.fetch(&graph.main_modules())?
        } else {
            Vec::new()
        };
        log::debug!(
            "main set: {} urls, {} files; {} isolation groups",
            main_urls.len(),
            main_files.len(),
            groups.len()
        );

        let plan = ArchivePlan {
            main_urls: &main_urls,
            main_files: &main_files,
            groups: if isolation_active { &groups } else { &[] },
            main_class: self.settings.main_class(),
            jar_dir: if standalone { None } else { self.settings.download_dir() },
            properties: self.settings.properties(),
        };
        let archive = compose(&template, &plan)?;

        let output = self.settings.output();
        assemble(self.settings.java_opts(), &archive, output, self.settings.overwrite())?;

        // Artifact metadata
        let metadata = fs::metadata(output).fs_context("reading artifact metadata", output)?;
        let checksum = calculate_sha256(output)?;

        if self.settings.emit_checksum() {
            let sidecar = write_checksum_file(output, &checksum)?;
            log::debug!("wrote checksum sidecar {}", sidecar.display());
        }

        log::info!("✓ Created launcher: {}", output.display());

        Ok(BuiltLauncher {
            path: output.to_path_buf(),
            size: metadata.len(),
            checksum,
        })
    }

    /// Loads the launcher template archive.
    ///
    /// Uses the configured override when present, otherwise looks for
    /// `bootstrap.jar` beside the executable. Either way the template must
    /// exist before composition begins.
    fn load_template(&self) -> Result<Vec<u8>> {
        let path = match self.settings.template() {
            Some(path) => path.to_path_buf(),
            None => default_template_path()?,
        };

        if !path.is_file() {
            return Err(Error::MissingTemplate(path));
        }

        log::debug!("using launcher template {}", path.display());
        fs::read(&path).fs_context("reading launcher template", &path)
    }
}

fn default_template_path() -> Result<PathBuf> {
    let exe = env::current_exe().context("cannot locate the bootjar executable")?;
    let dir = exe.parent().context("executable has no parent directory")?;
    Ok(dir.join(TEMPLATE_FILE_NAME))
}
