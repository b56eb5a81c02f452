//! Launcher checksum calculation.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::bootstrap::error::{Context, ErrorExt, Result};

/// Calculates the SHA256 checksum of a file.
///
/// Reads the file in 8KB chunks to handle large launchers efficiently.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash (64 characters)
/// * `Err` - If the file cannot be read
pub fn calculate_sha256(path: &Path) -> Result<String> {
    let mut file = File::open(path).fs_context("opening file for hashing", path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .fs_context("reading file for hash calculation", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Writes a `sha256sum`-compatible sidecar next to the launcher.
///
/// The sidecar is named `<launcher>.sha256` and contains one line,
/// `<digest>  <filename>`, so `sha256sum -c` verifies it in place.
pub fn write_checksum_file(artifact: &Path, digest: &str) -> Result<PathBuf> {
    let file_name = artifact
        .file_name()
        .and_then(|n| n.to_str())
        .context("launcher path has no usable file name")?;

    let sidecar = artifact.with_file_name(format!("{file_name}.sha256"));
    std::fs::write(&sidecar, format!("{digest}  {file_name}\n"))
        .fs_context("writing checksum sidecar", &sidecar)?;

    Ok(sidecar)
}
