//! Error types for scanning and per-file detection.
//!
//! Two layers: `ScanError` aborts a scan (only a missing root path does),
//! while `DetectError` is always caught at the dispatch boundary and
//! converted into a per-file result category, so no single file can take
//! down the scan of the remaining files.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for scan operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Top-level scan errors
#[derive(Error, Debug)]
pub enum ScanError {
    /// The scan root does not exist
    #[error("path does not exist: {0}")]
    RootNotFound(PathBuf),

    /// IO errors while enumerating the scan root
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure while serializing results
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Per-file detection errors
///
/// Every variant maps to exactly one result category: `Unavailable` becomes
/// `unavailable-on-platform`, everything else becomes `error`.
#[derive(Error, Debug)]
pub enum DetectError {
    /// The file could not be opened or read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a valid instance of its claimed archive format
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// A manifest entry was readable but not well-formed XML
    #[error("manifest error: {0}")]
    Manifest(#[from] roxmltree::Error),

    /// The installer container could not be opened or its summary
    /// information could not be read
    #[error("installer error: {reason}")]
    Installer {
        /// Reason for the error
        reason: String,
    },

    /// Detection requires a host capability this platform does not provide
    #[error("installer metadata reading is unavailable on this platform")]
    Unavailable,
}
