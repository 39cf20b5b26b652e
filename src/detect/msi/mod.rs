//! Windows Installer package metadata reading.
//!
//! Installer packages store their platform in summary-information property 7
//! ("Template"), a string of the form `"<arch-token>;<LCID>"` such as
//! `"x64;1033"`. Reading it requires the Windows Installer API, which only
//! exists on Windows, so this module is a capability interface with two
//! implementations selected at a single `cfg` point: the native reader on
//! Windows, and a stub everywhere else that reports the capability gap
//! rather than attempting a portable structured-storage re-implementation.

#[cfg(windows)]
mod native;
#[cfg(not(windows))]
mod stub;

#[cfg(windows)]
use native as backend;
#[cfg(not(windows))]
use stub as backend;

use crate::detect::Arch;
use crate::error::DetectError;
use std::path::Path;

/// Summary-information property index of the "Template" property.
// Only the native backend reads it; the stub never gets that far.
#[cfg_attr(not(windows), allow(dead_code))]
pub(crate) const PID_TEMPLATE: u32 = 7;

/// Whether this host can read installer summary metadata.
pub fn available() -> bool {
    backend::AVAILABLE
}

/// Detect the declared platform of an installer package.
///
/// On hosts without the Windows Installer API this returns
/// [`DetectError::Unavailable`] unconditionally, even for a well-formed
/// file; the caller reports it as an environment limitation, not a file
/// defect.
pub fn detect(path: &Path) -> Result<Arch, DetectError> {
    backend::read_template_arch(path)
}

/// Normalize the raw "Template" property value.
///
/// The architecture token is everything before the first `;`; the remainder
/// is a locale-id list and is ignored.
#[cfg_attr(not(windows), allow(dead_code))]
pub(crate) fn template_arch(template: &str) -> Arch {
    let token = template.split(';').next().unwrap_or_default();
    Arch::normalize(token)
}
