//! End-to-end CLI tests over synthesized package fixtures.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Minimal PE image with the given machine code.
fn pe_image(machine: u16) -> Vec<u8> {
    let mut data = vec![0u8; 0x80 + 6];
    data[0..2].copy_from_slice(b"MZ");
    data[0x3C..0x40].copy_from_slice(&0x80u32.to_le_bytes());
    data[0x80..0x84].copy_from_slice(b"PE\0\0");
    data[0x84..0x86].copy_from_slice(&machine.to_le_bytes());
    data
}

/// Bundle manifest declaring one package per architecture token.
fn bundle_manifest(archs: &[&str]) -> String {
    let packages: String = archs
        .iter()
        .map(|arch| {
            format!(
                r#"<Package Type="application" Architecture="{arch}" FileName="app_{arch}.appx"/>"#
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Bundle xmlns="http://schemas.microsoft.com/appx/2013/bundle">
  <Packages>{packages}</Packages>
</Bundle>"#
    )
}

fn write_bundle(path: &Path, archs: &[&str]) {
    let mut writer = ZipWriter::new(File::create(path).unwrap());
    writer
        .start_file("AppxBundleManifest.xml", SimpleFileOptions::default())
        .unwrap();
    writer
        .write_all(bundle_manifest(archs).as_bytes())
        .unwrap();
    writer.finish().unwrap();
}

fn write_file(path: &Path, bytes: &[u8]) {
    let mut file = File::create(path).unwrap();
    file.write_all(bytes).unwrap();
}

fn archscan() -> Command {
    Command::cargo_bin("archscan").unwrap()
}

#[test]
fn scan_reports_sorted_records() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(&dir.path().join("bundle.msixbundle"), &["x64", "arm64"]);
    write_file(&dir.path().join("app.exe"), &pe_image(0x8664));
    write_file(&dir.path().join("notes.txt"), b"skipped");

    let output = archscan().arg(dir.path()).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(stdout.contains("app.exe"));
    assert!(stdout.contains("bundle.msixbundle"));
    assert!(stdout.contains("amd64,arm64"));
    assert!(!stdout.contains("notes.txt"));

    // Sorted by file name: app.exe before bundle.msixbundle.
    let app_pos = stdout.find("app.exe").unwrap();
    let bundle_pos = stdout.find("bundle.msixbundle").unwrap();
    assert!(app_pos < bundle_pos);
}

#[test]
fn sizes_rendered_in_mebibytes() {
    let dir = tempfile::tempdir().unwrap();
    // 2.5 MiB of padding appended to a valid PE image.
    let mut image = pe_image(0x8664);
    image.resize(5 * 1024 * 1024 / 2, 0);
    write_file(&dir.path().join("big.exe"), &image);

    archscan()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2.50"));
}

#[test]
fn empty_scan_prints_suppressible_notice() {
    let dir = tempfile::tempdir().unwrap();

    archscan()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No package files found"));

    archscan()
        .arg(dir.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn missing_root_fails_with_error() {
    let dir = tempfile::tempdir().unwrap();

    archscan()
        .arg(dir.path().join("does-not-exist"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn json_output_carries_canonical_tokens() {
    let dir = tempfile::tempdir().unwrap();
    write_file(&dir.path().join("app.exe"), &pe_image(0x8664));
    write_bundle(&dir.path().join("bundle.appxbundle"), &["x86", "arm64"]);

    let output = archscan()
        .arg(dir.path())
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["file_name"], "app.exe");
    assert_eq!(records[0]["architecture"], "amd64");
    assert_eq!(records[1]["file_name"], "bundle.appxbundle");
    assert_eq!(records[1]["architecture"], "intel32,arm64");
}

#[test]
fn unrecognized_executable_reports_unknown() {
    let dir = tempfile::tempdir().unwrap();
    write_file(&dir.path().join("not_really.exe"), b"plain text");

    archscan()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown"));
}

#[test]
fn corrupted_bundle_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    write_file(&dir.path().join("broken.appx"), b"not a zip archive");

    archscan()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("error"));
}

#[cfg(not(windows))]
#[test]
fn installer_reports_platform_capability_gap() {
    let dir = tempfile::tempdir().unwrap();
    write_file(&dir.path().join("setup.msi"), b"pretend installer");

    archscan()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("unavailable-on-platform"));
}

#[test]
fn recursive_flag_controls_depth() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("nested");
    std::fs::create_dir(&sub).unwrap();
    write_file(&sub.join("deep.exe"), &pe_image(0xAA64));

    archscan()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("deep.exe").not());

    archscan()
        .arg(dir.path())
        .arg("--recursive")
        .assert()
        .success()
        .stdout(predicate::str::contains("deep.exe"));
}
