//! Core Settings struct and implementations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Main settings for launcher composition.
///
/// Central configuration for one build run, constructed via
/// [`SettingsBuilder`](super::SettingsBuilder). Instances are validated:
/// holding a `Settings` means the main class is present and thin builds have
/// a download directory.
///
/// # Examples
///
/// ```no_run
/// use bootjar::bootstrap::SettingsBuilder;
///
/// # fn example() -> bootjar::bootstrap::Result<()> {
/// let settings = SettingsBuilder::new()
///     .main_class("com.example.Main")
///     .output("build/app")
///     .download_dir("libs")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Entry point recorded as `bootstrap.mainClass`.
    main_class: String,

    /// Directory the thin launcher downloads dependencies into.
    ///
    /// Recorded as `bootstrap.jarDir`; absent for standalone builds.
    download_dir: Option<String>,

    /// Embed artifact bytes instead of remote URLs.
    standalone: bool,

    /// Path of the launcher file to produce.
    output: PathBuf,

    /// Replace an existing output file.
    overwrite: bool,

    /// JVM options baked into the shell preamble.
    java_opts: Vec<String>,

    /// Extra key/value pairs appended to `bootstrap.properties`.
    properties: BTreeMap<String, String>,

    /// Launcher template archive override.
    ///
    /// None means `bootstrap.jar` beside the executable.
    template: Option<PathBuf>,

    /// Write a sha256sum-compatible sidecar next to the output.
    emit_checksum: bool,
}

impl Settings {
    /// Returns the main class.
    pub fn main_class(&self) -> &str {
        &self.main_class
    }

    /// Returns the download directory for thin launchers.
    pub fn download_dir(&self) -> Option<&str> {
        self.download_dir.as_deref()
    }

    /// Returns whether artifact bytes are embedded.
    pub fn standalone(&self) -> bool {
        self.standalone
    }

    /// Returns the output path.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Returns whether an existing output file may be replaced.
    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    /// Returns the JVM options for the shell preamble.
    pub fn java_opts(&self) -> &[String] {
        &self.java_opts
    }

    /// Returns the extra `bootstrap.properties` pairs, sorted by key.
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Returns the template archive override, if any.
    pub fn template(&self) -> Option<&Path> {
        self.template.as_deref()
    }

    /// Returns whether a checksum sidecar is written.
    pub fn emit_checksum(&self) -> bool {
        self.emit_checksum
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        main_class: String,
        download_dir: Option<String>,
        standalone: bool,
        output: PathBuf,
        overwrite: bool,
        java_opts: Vec<String>,
        properties: BTreeMap<String, String>,
        template: Option<PathBuf>,
        emit_checksum: bool,
    ) -> Self {
        Self {
            main_class,
            download_dir,
            standalone,
            output,
            overwrite,
            java_opts,
            properties,
            template,
            emit_checksum,
        }
    }
}
