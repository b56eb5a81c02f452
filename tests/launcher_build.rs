//! End-to-end launcher builds against a real template and artifact files.

use std::collections::BTreeSet;
use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

use bootjar::bootstrap::{Bootstrapper, SettingsBuilder};
use bootjar::resolve::{IsolationTarget, ModuleId, ResolvedGraph};
use zip::ZipArchive;
use zip::write::SimpleFileOptions;

/// Write a minimal launcher template with one class-like entry.
fn write_template(dir: &Path) -> PathBuf {
    let path = dir.join("bootstrap.jar");
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("META-INF/MANIFEST.MF".to_string(), SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"Manifest-Version: 1.0\n").unwrap();
    writer
        .start_file("Bootstrap.class".to_string(), SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"\xca\xfe\xba\xbe").unwrap();
    fs::write(&path, writer.finish().unwrap().into_inner()).unwrap();
    path
}

fn target(name: &str, modules: &[&str]) -> IsolationTarget {
    IsolationTarget {
        name: name.to_string(),
        modules: modules.iter().map(|m| m.to_string()).collect(),
    }
}

fn entry_text(zip: &mut ZipArchive<fs::File>, name: &str) -> String {
    let mut entry = zip.by_name(name).unwrap();
    let mut text = String::new();
    entry.read_to_string(&mut text).unwrap();
    text
}

fn entry_bytes(zip: &mut ZipArchive<fs::File>, name: &str) -> Vec<u8> {
    let mut entry = zip.by_name(name).unwrap();
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes).unwrap();
    bytes
}

#[test]
fn thin_launcher_is_script_and_archive_at_once() {
    let dir = tempfile::tempdir().unwrap();
    let template = write_template(dir.path());
    let output = dir.path().join("app");

    let graph = ResolvedGraph::new(
        vec![("https://x/a.jar".into(), None, "x:a".into())],
        vec![],
    )
    .unwrap();

    let settings = SettingsBuilder::new()
        .main_class("com.foo.Main")
        .output(&output)
        .download_dir("libs")
        .template(&template)
        .build()
        .unwrap();

    let artifact = Bootstrapper::new(settings).build(&graph).unwrap();
    assert_eq!(artifact.path, output);
    assert_eq!(artifact.size, fs::metadata(&output).unwrap().len());
    assert_eq!(artifact.checksum.len(), 64);

    // First line is a shebang
    let bytes = fs::read(&output).unwrap();
    let first_line = bytes.split(|b| *b == b'\n').next().unwrap();
    assert_eq!(first_line, b"#!/bin/sh");

    // The same file opens as a ZIP archive; the template survived verbatim
    let mut zip = ZipArchive::new(fs::File::open(&output).unwrap()).unwrap();
    assert_eq!(
        entry_text(&mut zip, "META-INF/MANIFEST.MF"),
        "Manifest-Version: 1.0\n"
    );
    assert_eq!(entry_text(&mut zip, "bootstrap-jar-urls"), "https://x/a.jar");
    assert_eq!(entry_text(&mut zip, "bootstrap-jar-resources"), "");
    assert_eq!(
        entry_text(&mut zip, "bootstrap.properties"),
        "bootstrap.mainClass=com.foo.Main\nbootstrap.jarDir=libs\n"
    );
    // No isolation configured, no isolation entries
    assert!(zip.by_name("bootstrap-isolation-ids").is_err());
}

#[cfg(unix)]
#[test]
fn launcher_is_executable_wherever_readable() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let template = write_template(dir.path());
    let output = dir.path().join("app");

    let graph = ResolvedGraph::new(vec![], vec![]).unwrap();
    let settings = SettingsBuilder::new()
        .main_class("com.foo.Main")
        .output(&output)
        .download_dir("libs")
        .template(&template)
        .build()
        .unwrap();
    Bootstrapper::new(settings).build(&graph).unwrap();

    let mode = fs::metadata(&output).unwrap().permissions().mode();
    for (read, execute) in [(0o400, 0o100), (0o040, 0o010), (0o004, 0o001)] {
        if mode & read != 0 {
            assert_ne!(mode & execute, 0, "read bit {read:o} without execute");
        } else {
            assert_eq!(mode & execute, 0, "execute granted without read");
        }
    }
}

#[test]
fn standalone_launcher_embeds_isolated_and_main_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let template = write_template(dir.path());
    let output = dir.path().join("app");

    let main_jar = dir.path().join("core.jar");
    let plugin_jar = dir.path().join("plugin.jar");
    fs::write(&main_jar, b"core bytes").unwrap();
    fs::write(&plugin_jar, b"plugin bytes").unwrap();

    let graph = ResolvedGraph::new(
        vec![
            ("https://x/core.jar".into(), Some(main_jar), "x:core".into()),
            ("https://x/plugin.jar".into(), Some(plugin_jar), "x:plugin".into()),
        ],
        vec![target("pluginA", &["x:plugin"])],
    )
    .unwrap();

    let settings = SettingsBuilder::new()
        .main_class("com.foo.Main")
        .output(&output)
        .standalone(true)
        .template(&template)
        .checksum(true)
        .build()
        .unwrap();
    let artifact = Bootstrapper::new(settings).build(&graph).unwrap();

    let mut zip = ZipArchive::new(fs::File::open(&output).unwrap()).unwrap();

    // Isolation manifests and embedded payloads
    assert_eq!(entry_text(&mut zip, "bootstrap-isolation-ids"), "pluginA");
    assert_eq!(
        entry_text(&mut zip, "bootstrap-isolation-pluginA-jar-resources"),
        "jars/plugin.jar"
    );
    assert_eq!(entry_text(&mut zip, "bootstrap-isolation-pluginA-jar-urls"), "");
    assert_eq!(entry_text(&mut zip, "jars/plugin.jar"), "plugin bytes");

    // Main set embeds too, and thin-mode keys stay out of the properties
    assert_eq!(entry_text(&mut zip, "bootstrap-jar-resources"), "jars/core.jar");
    assert_eq!(entry_text(&mut zip, "jars/core.jar"), "core bytes");
    assert_eq!(
        entry_text(&mut zip, "bootstrap.properties"),
        "bootstrap.mainClass=com.foo.Main\n"
    );

    // Checksum sidecar matches the launcher
    let sidecar = fs::read_to_string(dir.path().join("app.sha256")).unwrap();
    assert_eq!(sidecar, format!("{}  app\n", artifact.checksum));
}

#[test]
fn shared_urls_stay_with_the_first_target() {
    let dir = tempfile::tempdir().unwrap();
    let template = write_template(dir.path());
    let output = dir.path().join("app");

    let graph = ResolvedGraph::new(
        vec![
            ("https://x/shared.jar".into(), None, "x:shared".into()),
            ("https://x/b.jar".into(), None, "x:b".into()),
        ],
        vec![
            target("first", &["x:shared"]),
            target("second", &["x:shared", "x:b"]),
        ],
    )
    .unwrap();

    let settings = SettingsBuilder::new()
        .main_class("com.foo.Main")
        .output(&output)
        .download_dir("libs")
        .template(&template)
        .build()
        .unwrap();
    Bootstrapper::new(settings).build(&graph).unwrap();

    let mut zip = ZipArchive::new(fs::File::open(&output).unwrap()).unwrap();
    assert_eq!(
        entry_text(&mut zip, "bootstrap-isolation-first-jar-urls"),
        "https://x/shared.jar"
    );
    assert_eq!(
        entry_text(&mut zip, "bootstrap-isolation-second-jar-urls"),
        "https://x/b.jar"
    );
}

#[test]
fn rebuilds_with_unchanged_inputs_reproduce_entry_contents() {
    let dir = tempfile::tempdir().unwrap();
    let template = write_template(dir.path());

    let jar = dir.path().join("core.jar");
    fs::write(&jar, b"core bytes").unwrap();

    let graph = ResolvedGraph::new(
        vec![("https://x/core.jar".into(), Some(jar), "x:core".into())],
        vec![],
    )
    .unwrap();

    let build = |output: &Path| {
        let settings = SettingsBuilder::new()
            .main_class("com.foo.Main")
            .output(output)
            .standalone(true)
            .template(&template)
            .build()
            .unwrap();
        Bootstrapper::new(settings).build(&graph).unwrap();
    };

    let first = dir.path().join("app1");
    let second = dir.path().join("app2");
    build(&first);
    build(&second);

    let mut zip_a = ZipArchive::new(fs::File::open(&first).unwrap()).unwrap();
    let mut zip_b = ZipArchive::new(fs::File::open(&second).unwrap()).unwrap();
    assert_eq!(zip_a.len(), zip_b.len());

    let names: Vec<String> = zip_a.file_names().map(String::from).collect();
    for name in names {
        assert_eq!(entry_bytes(&mut zip_a, &name), entry_bytes(&mut zip_b, &name), "{name}");
    }
}

#[test]
fn missing_local_file_fails_standalone_builds() {
    let dir = tempfile::tempdir().unwrap();
    let template = write_template(dir.path());
    let output = dir.path().join("app");

    let graph = ResolvedGraph::new(
        vec![("https://x/a.jar".into(), None, "x:a".into())],
        vec![],
    )
    .unwrap();

    let settings = SettingsBuilder::new()
        .main_class("com.foo.Main")
        .output(&output)
        .standalone(true)
        .template(&template)
        .build()
        .unwrap();
    let err = Bootstrapper::new(settings).build(&graph).unwrap_err();

    assert!(err.to_string().contains("https://x/a.jar"));
    assert!(!output.exists(), "no partial output on failure");
}

#[test]
fn missing_template_is_fatal_before_composition() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("app");

    let graph = ResolvedGraph::new(vec![], vec![]).unwrap();
    let settings = SettingsBuilder::new()
        .main_class("com.foo.Main")
        .output(&output)
        .download_dir("libs")
        .template(dir.path().join("nope.jar"))
        .build()
        .unwrap();

    let err = Bootstrapper::new(settings).build(&graph).unwrap_err();
    assert!(err.to_string().contains("launcher template not found"));
    assert!(!output.exists());
}

#[test]
fn fetch_selects_only_the_requested_modules() {
    use bootjar::bootstrap::ArtifactSource;

    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.jar");
    let b = dir.path().join("b.jar");
    fs::write(&a, b"a").unwrap();
    fs::write(&b, b"b").unwrap();

    let graph = ResolvedGraph::new(
        vec![
            ("https://x/a.jar".into(), Some(a.clone()), "x:a".into()),
            ("https://x/b.jar".into(), Some(b), "x:b".into()),
        ],
        vec![],
    )
    .unwrap();

    let modules: BTreeSet<ModuleId> = BTreeSet::from(["x:a".to_string()]);
    assert_eq!(graph.fetch(&modules).unwrap(), vec![a]);
}
