//! Final launcher assembly.
//!
//! Concatenates the shell preamble with the composed archive and widens the
//! output's permission bits so the file is executable wherever it is
//! readable. The trick is that ZIP readers locate the central directory by
//! scanning from the end of the file, so the leading script text is ignored
//! by ZIP-aware loaders while the shell only ever reads the first lines; the
//! same file is simultaneously a valid shell script and a valid JAR.

use std::fs;
use std::path::Path;

use super::error::{Error, ErrorExt, Result};

/// Assemble the final launcher file.
///
/// The preamble and archive are joined in one in-memory buffer and written
/// in a single step, so an I/O failure never leaves a partial launcher in
/// place of the output.
///
/// # Errors
///
/// - [`Error::OutputExists`] when `output` is present and `overwrite` is off
/// - [`Error::Fs`] with the OS error text for any write or permission failure
pub fn assemble(
    java_opts: &[String],
    archive: &[u8],
    output: &Path,
    overwrite: bool,
) -> Result<()> {
    if output.exists() && !overwrite {
        return Err(Error::OutputExists(output.to_path_buf()));
    }

    let preamble = shell_preamble(java_opts);
    let mut buffer = Vec::with_capacity(preamble.len() + archive.len());
    buffer.extend_from_slice(preamble.as_bytes());
    buffer.extend_from_slice(archive);

    fs::write(output, &buffer).fs_context("writing launcher", output)?;
    widen_execute_bits(output)
}

/// The fixed two-line shell preamble.
///
/// The exec line hands the launcher's own path (`$0`) to `java -jar` and
/// forwards all original arguments. Each JVM option is single-quoted with
/// embedded quotes escaped, so option values survive the shell untouched.
pub fn shell_preamble(java_opts: &[String]) -> String {
    let mut exec = String::from("exec java ");
    for opt in java_opts {
        exec.push_str(&single_quote(opt));
        exec.push(' ');
    }
    exec.push_str("-jar \"$0\" \"$@\"");
    format!("#!/bin/sh\n{exec}\n")
}

fn single_quote(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', "\\'"))
}

/// Add the execute bit for each class whose read bit is set.
///
/// Execute is never granted without read, and bits where read is unset stay
/// untouched. The permission set is rewritten only when it actually changed.
#[cfg(unix)]
fn widen_execute_bits(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).fs_context("reading permissions of", path)?;
    let mut permissions = metadata.permissions();
    let mode = permissions.mode();

    let mut widened = mode;
    for (read, execute) in [(0o400, 0o100), (0o040, 0o010), (0o004, 0o001)] {
        if mode & read != 0 {
            widened |= execute;
        }
    }

    if widened != mode {
        permissions.set_mode(widened);
        fs::set_permissions(path, permissions).fs_context("adjusting permissions of", path)?;
    }

    Ok(())
}

/// Platforms without POSIX permissions skip the adjustment silently.
#[cfg(not(unix))]
fn widen_execute_bits(_path: &Path) -> Result<()> {
    Ok(())
}
