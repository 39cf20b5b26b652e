//! Fallback installer reader for hosts without the Windows Installer API.

use crate::detect::Arch;
use crate::error::DetectError;
use std::path::Path;

pub(super) const AVAILABLE: bool = false;

pub(super) fn read_template_arch(_path: &Path) -> Result<Arch, DetectError> {
    Err(DetectError::Unavailable)
}
