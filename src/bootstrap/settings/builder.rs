//! Builder for constructing Settings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::Settings;
use crate::bootstrap::error::{Context, Error, Result};

/// Builder for constructing [`Settings`].
///
/// Provides a fluent API for building launcher settings with validation.
/// All input validation happens in [`build`](Self::build):
/// a missing main class, a thin build without a download directory, and
/// malformed `KEY=VALUE` property overrides.
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
///     .standalone(true)
///     .java_opts(vec!["-Xmx512m".into()])
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    main_class: Option<String>,
    download_dir: Option<String>,
    standalone: bool,
    output: Option<PathBuf>,
    overwrite: bool,
    java_opts: Vec<String>,
    property_overrides: Vec<String>,
    template: Option<PathBuf>,
    emit_checksum: bool,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the main class recorded as `bootstrap.mainClass`.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn main_class<S: Into<String>>(mut self, main_class: S) -> Self {
        self.main_class = Some(main_class.into());
        self
    }

    /// Sets the directory a thin launcher downloads dependencies into.
    ///
    /// # Required
    ///
    /// Required unless the build is standalone.
    pub fn download_dir<S: Into<String>>(mut self, dir: S) -> Self {
        self.download_dir = Some(dir.into());
        self
    }

    /// Embeds artifact bytes instead of remote URLs.
    ///
    /// Default: false (thin launcher)
    pub fn standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Sets the output path for the launcher file.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn output<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    /// Allows replacing an existing output file.
    ///
    /// Default: false
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets JVM options baked into the shell preamble.
    ///
    /// Default: Empty (plain `exec java -jar`)
    pub fn java_opts(mut self, opts: Vec<String>) -> Self {
        self.java_opts = opts;
        self
    }

    /// Sets raw `KEY=VALUE` overrides for `bootstrap.properties`.
    ///
    /// Parsed during [`build`](Self::build); an entry without `=` fails with
    /// [`Error::MalformedProperty`].
    pub fn property_overrides(mut self, overrides: Vec<String>) -> Self {
        self.property_overrides = overrides;
        self
    }

    /// Sets the launcher template archive.
    ///
    /// Default: `bootstrap.jar` beside the executable
    pub fn template<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.template = Some(path.as_ref().to_path_buf());
        self
    }

    /// Writes a sha256sum-compatible sidecar next to the output.
    ///
    /// Default: false
    pub fn checksum(mut self, emit: bool) -> Self {
        self.emit_checksum = emit;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingMainClass`] if no (or an empty) main class was set
    /// - [`Error::MissingDownloadDir`] for a thin build without a directory
    /// - [`Error::MalformedProperty`] for an override lacking `=`
    pub fn build(self) -> Result<Settings> {
        let main_class = match self.main_class {
            Some(class) if !class.trim().is_empty() => class,
            _ => return Err(Error::MissingMainClass),
        };

        if !self.standalone && self.download_dir.as_deref().is_none_or(str::is_empty) {
            return Err(Error::MissingDownloadDir);
        }

        let mut properties = BTreeMap::new();
        for raw in &self.property_overrides {
            let (key, value) = raw
                .split_once('=')
                .ok_or_else(|| Error::MalformedProperty(raw.clone()))?;
            properties.insert(key.to_string(), value.to_string());
        }

        Ok(Settings::new(
            main_class,
            self.download_dir,
            self.standalone,
            self.output.context("output path is required")?,
            self.overwrite,
            self.java_opts,
            properties,
            self.template,
            self.emit_checksum,
        ))
    }
}
