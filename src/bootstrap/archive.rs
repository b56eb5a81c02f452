//! Archive composition.
//!
//! Builds the launcher's ZIP payload in memory: the template archive's
//! entries copied verbatim, then the generated bootstrap metadata entries
//! and, for standalone launchers, the embedded artifact bytes. Entries are
//! written exactly once and never rewritten; the whole archive is buffered
//! and returned as bytes so nothing touches disk until final assembly.

use std::collections::BTreeMap;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use zip::write::SimpleFileOptions;
use zip::{DateTime, ZipArchive, ZipWriter};

use super::error::{Error, ErrorExt, Result};
use super::isolation::IsolationGroup;
use crate::bail;

/// Entry holding the newline-joined main artifact URLs.
pub const URLS_ENTRY: &str = "bootstrap-jar-urls";

/// Entry holding the newline-joined embedded paths of the main set.
pub const RESOURCES_ENTRY: &str = "bootstrap-jar-resources";

/// Entry holding the newline-joined isolation target names.
pub const ISOLATION_IDS_ENTRY: &str = "bootstrap-isolation-ids";

/// Entry holding the launcher properties.
pub const PROPERTIES_ENTRY: &str = "bootstrap.properties";

/// Directory prefix for embedded artifact entries.
pub const JAR_ENTRY_PREFIX: &str = "jars/";

/// Property key naming the entry point.
pub const MAIN_CLASS_KEY: &str = "bootstrap.mainClass";

/// Property key naming the thin launcher's download directory.
pub const JAR_DIR_KEY: &str = "bootstrap.jarDir";

/// Name of the URL manifest entry for an isolation target.
pub fn isolation_urls_entry(target: &str) -> String {
    format!("bootstrap-isolation-{target}-jar-urls")
}

/// Name of the embedded-path manifest entry for an isolation target.
pub fn isolation_resources_entry(target: &str) -> String {
    format!("bootstrap-isolation-{target}-jar-resources")
}

/// Everything one composition run writes on top of the template.
///
/// `groups` must be empty when no isolation target has any module assigned;
/// the isolation entries are omitted entirely in that case.
#[derive(Debug)]
pub struct ArchivePlan<'a> {
    /// Remote URLs of the main (non-isolated) artifact set
    pub main_urls: &'a [String],

    /// Files of the main set to embed (standalone mode)
    pub main_files: &'a [PathBuf],

    /// Ordered isolation groups
    pub groups: &'a [IsolationGroup],

    /// Entry point recorded in the properties entry
    pub main_class: &'a str,

    /// Download directory recorded in the properties entry (thin mode)
    pub jar_dir: Option<&'a str>,

    /// Extra property pairs, already sorted by key
    pub properties: &'a BTreeMap<String, String>,
}

/// Compose the launcher archive from a template plus generated entries.
///
/// The template's entries come first, copied raw so their bytes, timestamps
/// and compression survive unchanged. Generated text entries share one
/// timestamp snapshot per run; embedded artifact entries take their source
/// file's mtime so unchanged inputs reproduce unchanged entries.
///
/// # Errors
///
/// Fails on a malformed template, an unreadable source artifact, or two
/// distinct source files claiming the same embedded jar name. Any failure
/// discards the in-memory buffer; no partial archive ever reaches disk.
pub fn compose(template: &[u8], plan: &ArchivePlan<'_>) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    copy_template(template, &mut writer)?;

    // One snapshot for every generated entry in this run
    let stamp = DateTime::try_from(OffsetDateTime::now_utc()).unwrap_or_default();
    let text = SimpleFileOptions::default().last_modified_time(stamp);

    write_text(&mut writer, URLS_ENTRY, &plan.main_urls.join("\n"), text)?;

    if !plan.groups.is_empty() {
        let ids: Vec<&str> = plan.groups.iter().map(|g| g.name.as_str()).collect();
        write_text(&mut writer, ISOLATION_IDS_ENTRY, &ids.join("\n"), text)?;

        for group in plan.groups {
            write_text(
                &mut writer,
                &isolation_urls_entry(&group.name),
                &group.urls.join("\n"),
                text,
            )?;
            write_text(
                &mut writer,
                &isolation_resources_entry(&group.name),
                &resource_manifest(&group.files)?,
                text,
            )?;
        }
    }

    // filename -> first source, to reject distinct files sharing a name
    let mut embedded: BTreeMap<String, PathBuf> = BTreeMap::new();
    for group in plan.groups {
        for file in &group.files {
            embed_jar(&mut writer, file, &mut embedded)?;
        }
    }
    for file in plan.main_files {
        embed_jar(&mut writer, file, &mut embedded)?;
    }

    write_text(&mut writer, RESOURCES_ENTRY, &resource_manifest(plan.main_files)?, text)?;
    write_text(&mut writer, PROPERTIES_ENTRY, &properties_entry(plan), text)?;

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

/// Copy every template entry raw, in template order.
fn copy_template(template: &[u8], writer: &mut ZipWriter<Cursor<Vec<u8>>>) -> Result<()> {
    let mut archive = ZipArchive::new(Cursor::new(template))?;
    for index in 0..archive.len() {
        let entry = archive.by_index_raw(index)?;
        writer.raw_copy_file(entry)?;
    }
    Ok(())
}

/// Archive entry name for an embedded artifact file.
pub fn jar_entry_name(file: &Path) -> Result<String> {
    let Some(name) = file.file_name().and_then(|n| n.to_str()) else {
        bail!("artifact path has no usable file name: {}", file.display());
    };
    Ok(format!("{JAR_ENTRY_PREFIX}{name}"))
}

/// Newline-joined `jars/<filename>` manifest for a file list.
fn resource_manifest(files: &[PathBuf]) -> Result<String> {
    let names: Vec<String> = files.iter().map(|f| jar_entry_name(f)).collect::<Result<_>>()?;
    Ok(names.join("\n"))
}

/// Embed one artifact file, timestamped with its mtime.
///
/// The same source file reached from several groups is written once; two
/// distinct sources sharing a filename are a hard error.
fn embed_jar(
    writer: &mut ZipWriter<Cursor<Vec<u8>>>,
    file: &Path,
    embedded: &mut BTreeMap<String, PathBuf>,
) -> Result<()> {
    let entry = jar_entry_name(file)?;

    if let Some(first) = embedded.get(&entry) {
        if first == file {
            return Ok(());
        }
        return Err(Error::JarNameCollision {
            name: entry.trim_start_matches(JAR_ENTRY_PREFIX).to_string(),
            first: first.clone(),
            second: file.to_path_buf(),
        });
    }

    let bytes = fs::read(file).fs_context("reading artifact", file)?;
    let modified = fs::metadata(file)
        .and_then(|m| m.modified())
        .fs_context("reading artifact mtime", file)?;
    let stamp = DateTime::try_from(OffsetDateTime::from(modified)).unwrap_or_default();

    writer.start_file(entry.clone(), SimpleFileOptions::default().last_modified_time(stamp))?;
    writer.write_all(&bytes).fs_context("embedding artifact", file)?;

    embedded.insert(entry, file.to_path_buf());
    Ok(())
}

/// The `bootstrap.properties` entry text.
fn properties_entry(plan: &ArchivePlan<'_>) -> String {
    let mut lines = vec![format!("{MAIN_CLASS_KEY}={}", plan.main_class)];
    if let Some(dir) = plan.jar_dir {
        lines.push(format!("{JAR_DIR_KEY}={dir}"));
    }
    for (key, value) in plan.properties {
        lines.push(format!("{key}={value}"));
    }
    lines.join("\n") + "\n"
}

/// Write one generated text entry.
fn write_text(
    writer: &mut ZipWriter<Cursor<Vec<u8>>>,
    name: &str,
    content: &str,
    options: SimpleFileOptions,
) -> Result<()> {
    writer.start_file(name.to_string(), options)?;
    writer.write_all(content.as_bytes())?;
    Ok(())
}
