//! Package architecture detection.
//!
//! One reader per package family (PE executables, Windows Installer
//! packages, app-package archives) plus the dispatch layer that routes a
//! file to its reader by extension and converts every reader failure into a
//! per-file result category. A file whose extension matches no family is
//! not applicable and is silently skipped.

mod arch;
pub mod appx;
pub mod msi;
pub mod pe;

pub use arch::Arch;

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::DetectError;

/// Package family, inferred from the file extension only.
///
/// Deliberately never re-derived from file contents: a mismatched extension
/// is not detected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PackageKind {
    /// Native executable (`.exe`)
    Executable,
    /// Windows Installer package (`.msi`)
    Installer,
    /// App package or bundle (`.appx`, `.msix`, `.appxbundle`, `.msixbundle`)
    AppPackage,
}

impl PackageKind {
    /// Classify a path by its extension, case-insensitively.
    ///
    /// `None` means no known package family claims the extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "exe" => Some(Self::Executable),
            "msi" => Some(Self::Installer),
            "appx" | "msix" | "appxbundle" | "msixbundle" => Some(Self::AppPackage),
            _ => None,
        }
    }
}

/// Outcome of detecting one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Detection {
    /// A single detected architecture (possibly `unknown`)
    Architecture(Arch),
    /// The distinct architectures of a bundle, in first-seen order
    Architectures(Vec<Arch>),
    /// The file could not be read or was not a valid instance of its format
    Error,
    /// Detection requires a host capability this platform lacks
    UnavailableOnPlatform,
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Architecture(arch) => f.write_str(arch.as_str()),
            Self::Architectures(archs) => {
                for (i, arch) in archs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    f.write_str(arch.as_str())?;
                }
                Ok(())
            }
            Self::Error => f.write_str("error"),
            Self::UnavailableOnPlatform => f.write_str("unavailable-on-platform"),
        }
    }
}

impl Serialize for Detection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One record per scanned file, immutable once constructed.
#[derive(Clone, Debug, Serialize)]
pub struct DetectionResult {
    /// File name without its directory
    pub file_name: String,
    /// On-disk size in bytes
    pub size_bytes: u64,
    /// Detected architecture or failure category
    pub architecture: Detection,
    /// Full path the file was found at
    pub source_path: PathBuf,
}

impl DetectionResult {
    /// Size in mebibytes, for display.
    pub fn size_mib(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// Detect the architecture of one file, routing by extension.
///
/// Returns `None` when no reader applies to the path. Reader failures never
/// propagate: each is logged and folded into the matching result category
/// so the caller's scan continues.
pub fn detect(path: &Path) -> Option<Detection> {
    let kind = PackageKind::from_path(path)?;
    Some(match kind {
        PackageKind::Executable => match pe::detect(path) {
            Ok(arch) => Detection::Architecture(arch),
            Err(e) => {
                log::debug!("{}: {e}", path.display());
                Detection::Error
            }
        },
        PackageKind::Installer => match msi::detect(path) {
            Ok(arch) => Detection::Architecture(arch),
            Err(DetectError::Unavailable) => Detection::UnavailableOnPlatform,
            Err(e) => {
                log::debug!("{}: {e}", path.display());
                Detection::Error
            }
        },
        PackageKind::AppPackage => match appx::detect(path) {
            Ok(archs) => Detection::Architectures(archs),
            Err(e) => {
                log::debug!("{}: {e}", path.display());
                Detection::Error
            }
        },
    })
}
