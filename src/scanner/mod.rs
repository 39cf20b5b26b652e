//! Directory scanning and per-file dispatch.
//!
//! Walks a file or directory root, routes each matching file through the
//! detection layer, and returns one immutable record per file, sorted by
//! file name. Only a non-existent root aborts a scan; unreadable directory
//! entries and per-file detection failures are logged and folded into the
//! results.

use crate::detect::{self, DetectionResult};
use crate::error::{Result, ScanError};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Scan behavior flags.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScanOptions {
    /// Recurse into subdirectories instead of scanning one level deep.
    pub recursive: bool,
}

/// Scan a file or directory for Windows application packages.
///
/// Files whose extensions match no known package family are silently
/// skipped. Each file is processed to completion (open, parse, close)
/// before the next begins; results come back sorted by file name.
pub fn scan(root: &Path, options: ScanOptions) -> Result<Vec<DetectionResult>> {
    if !root.exists() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }

    let mut results = Vec::new();

    if root.is_file() {
        if let Some(result) = scan_file(root) {
            results.push(result);
        }
    } else {
        let max_depth = if options.recursive { usize::MAX } else { 1 };
        for entry in WalkDir::new(root).max_depth(max_depth) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("skipping unreadable entry: {e}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(result) = scan_file(entry.path()) {
                results.push(result);
            }
        }
    }

    results.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(results)
}

/// Detect one file, returning `None` when no reader applies to it.
fn scan_file(path: &Path) -> Option<DetectionResult> {
    let architecture = detect::detect(path)?;

    // The file can vanish between listing and stat; the record survives
    // with a zero size alongside whatever the reader reported.
    let size_bytes = fs::metadata(path).map(|m| m.len()).unwrap_or_else(|e| {
        log::debug!("{}: stat failed: {e}", path.display());
        0
    });

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Some(DetectionResult {
        file_name,
        size_bytes,
        architecture,
        source_path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{Arch, Detection};
    use std::fs::File;
    use std::io::Write;

    /// Minimal amd64 PE image.
    fn amd64_exe() -> Vec<u8> {
        let mut data = vec![0u8; 0x80 + 6];
        data[0..2].copy_from_slice(b"MZ");
        data[0x3C..0x40].copy_from_slice(&0x80u32.to_le_bytes());
        data[0x80..0x84].copy_from_slice(b"PE\0\0");
        data[0x84..0x86].copy_from_slice(&0x8664u16.to_le_bytes());
        data
    }

    fn write_file(path: &Path, bytes: &[u8]) {
        let mut file = File::create(path).unwrap();
        file.write_all(bytes).unwrap();
    }

    #[test]
    fn missing_root_aborts_the_scan() {
        let dir = tempfile::tempdir().unwrap();
        let result = scan(&dir.path().join("nope"), ScanOptions::default());
        assert!(matches!(result, Err(ScanError::RootNotFound(_))));
    }

    #[test]
    fn results_sorted_by_file_name() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir.path().join("zz.exe"), &amd64_exe());
        write_file(&dir.path().join("aa.exe"), &amd64_exe());
        write_file(&dir.path().join("mm.exe"), &amd64_exe());

        let results = scan(dir.path(), ScanOptions::default()).unwrap();
        let names: Vec<&str> = results.iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(names, vec!["aa.exe", "mm.exe", "zz.exe"]);
    }

    #[test]
    fn non_matching_extensions_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir.path().join("app.exe"), &amd64_exe());
        write_file(&dir.path().join("notes.txt"), b"not a package");

        let results = scan(dir.path(), ScanOptions::default()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].file_name, "app.exe");
        assert_eq!(results[0].architecture, Detection::Architecture(Arch::Amd64));
    }

    #[test]
    fn flat_scan_ignores_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir.path().join("top.exe"), &amd64_exe());
        let sub = dir.path().join("nested");
        std::fs::create_dir(&sub).unwrap();
        write_file(&sub.join("deep.exe"), &amd64_exe());

        let flat = scan(dir.path(), ScanOptions { recursive: false }).unwrap();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].file_name, "top.exe");

        let recursive = scan(dir.path(), ScanOptions { recursive: true }).unwrap();
        assert_eq!(recursive.len(), 2);
    }

    #[test]
    fn single_file_root_is_scanned_directly() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("single.exe");
        write_file(&exe, &amd64_exe());

        let results = scan(&exe, ScanOptions::default()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].size_bytes, amd64_exe().len() as u64);
        assert_eq!(results[0].source_path, exe);
    }

    #[test]
    fn scanning_twice_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        write_file(&dir.path().join("app.exe"), &amd64_exe());

        let first = scan(dir.path(), ScanOptions::default()).unwrap();
        let second = scan(dir.path(), ScanOptions::default()).unwrap();
        assert_eq!(first.len(), second.len());
        assert_eq!(first[0].file_name, second[0].file_name);
        assert_eq!(first[0].size_bytes, second[0].size_bytes);
        assert_eq!(first[0].architecture, second[0].architecture);
    }
}
