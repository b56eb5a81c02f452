//! Error types for launcher composition.
//!
//! All composer failures are fatal: the run terminates and nothing is left in
//! place of the output file, because assembly buffers fully in memory before
//! the single disk write.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for composer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for launcher composition
#[derive(Error, Debug)]
pub enum Error {
    /// No entry point specified
    #[error("no main class specified")]
    MissingMainClass,

    /// Thin-mode run without a configured download directory
    #[error("thin launchers need a download directory; configure one or build standalone")]
    MissingDownloadDir,

    /// A supplied key/value override lacks the required separator
    #[error("malformed property override '{0}': expected KEY=VALUE")]
    MalformedProperty(String),

    /// The launcher template archive cannot be located
    #[error("launcher template not found: {}", .0.display())]
    MissingTemplate(PathBuf),

    /// Destination file already present and overwrite not requested
    #[error("output already exists: {} (pass --overwrite to replace it)", .0.display())]
    OutputExists(PathBuf),

    /// Two distinct source files map to the same embedded jar name
    #[error("embedded jar name '{name}' is provided by both {} and {}", .first.display(), .second.display())]
    JarNameCollision {
        /// Colliding jar file name
        name: String,
        /// Source file embedded first
        first: PathBuf,
        /// Source file that collided with it
        second: PathBuf,
    },

    /// Standalone build over an artifact the resolver never materialized
    #[error("artifact {url} has no local file; re-run the resolver with downloads enabled")]
    MissingArtifactFile {
        /// Remote URL of the artifact
        url: String,
    },

    /// I/O failure with the action and path that caused it
    #[error("{action} {}: {source}", .path.display())]
    Fs {
        /// What was being done
        action: String,
        /// Affected path
        path: PathBuf,
        /// Underlying OS error
        source: std::io::Error,
    },

    /// Archive read/write errors
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors
    #[error("{0}")]
    GenericError(String),
}

/// Attach a short message to an `Option` or `Result`, producing a
/// [`Error::GenericError`] on failure.
pub trait Context<T> {
    /// Replace the failure with `msg` (plus the original error, if any)
    fn context(self, msg: &str) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

impl<T, E: std::fmt::Display> Context<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{msg}: {e}")))
    }
}

/// Attach the acting verb and affected path to an I/O error.
pub trait ErrorExt<T> {
    /// Wrap an `io::Error` as [`Error::Fs`] with `action` and `path`
    fn fs_context(self, action: &str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, action: &str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::Fs {
            action: action.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Return early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bootstrap::Error::GenericError(format!($($arg)*)).into())
    };
}
