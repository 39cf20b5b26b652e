//! Installer metadata reading through the Windows Installer API.
//!
//! Opens the package database read-only, obtains its summary-information
//! handle, and reads the "Template" property. Both MSI handles are owned by
//! drop guards so they are closed on every exit path.

use super::{PID_TEMPLATE, template_arch};
use crate::detect::Arch;
use crate::error::DetectError;
use std::os::windows::ffi::OsStrExt;
use std::path::Path;
use windows::Win32::Foundation::FILETIME;
use windows::Win32::System::ApplicationInstallationAndServicing::{
    MSIHANDLE, MsiCloseHandle, MsiGetSummaryInformationW, MsiOpenDatabaseW,
    MsiSummaryInfoGetPropertyW,
};
use windows::core::{PCWSTR, PWSTR};

pub(super) const AVAILABLE: bool = true;

const ERROR_SUCCESS: u32 = 0;
const ERROR_MORE_DATA: u32 = 234;

/// Variant type of a string summary property.
const VT_LPSTR: u32 = 30;

/// `MSIDBOPEN_READONLY`: the persist argument is the null pointer, not a
/// string constant.
const MSIDBOPEN_READONLY: PCWSTR = PCWSTR::null();

/// Owned MSI handle, closed on drop.
struct MsiHandleGuard(MSIHANDLE);

impl Drop for MsiHandleGuard {
    fn drop(&mut self) {
        if self.0.0 != 0 {
            unsafe {
                MsiCloseHandle(self.0);
            }
        }
    }
}

fn installer_error(call: &str, status: u32) -> DetectError {
    DetectError::Installer {
        reason: format!("{call} failed with status {status}"),
    }
}

pub(super) fn read_template_arch(path: &Path) -> Result<Arch, DetectError> {
    let wide_path: Vec<u16> = path
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();

    let mut database = MSIHANDLE(0);
    let status = unsafe {
        MsiOpenDatabaseW(
            PCWSTR::from_raw(wide_path.as_ptr()),
            MSIDBOPEN_READONLY,
            &mut database,
        )
    };
    if status != ERROR_SUCCESS {
        return Err(installer_error("MsiOpenDatabaseW", status));
    }
    let database = MsiHandleGuard(database);

    let mut summary = MSIHANDLE(0);
    let status = unsafe {
        MsiGetSummaryInformationW(database.0, PCWSTR::null(), 0, &mut summary)
    };
    if status != ERROR_SUCCESS {
        return Err(installer_error("MsiGetSummaryInformationW", status));
    }
    let summary = MsiHandleGuard(summary);

    let template = read_string_property(&summary, PID_TEMPLATE)?;
    Ok(template_arch(&template))
}

/// Read a string-valued summary property, growing the buffer once if the
/// first call reports it was too small.
fn read_string_property(summary: &MsiHandleGuard, property: u32) -> Result<String, DetectError> {
    let mut buffer = vec![0u16; 256];
    loop {
        let mut data_type = 0u32;
        let mut int_value = 0i32;
        let mut file_time = FILETIME::default();
        let mut chars = buffer.len() as u32;
        let status = unsafe {
            MsiSummaryInfoGetPropertyW(
                summary.0,
                property,
                &mut data_type,
                &mut int_value,
                &mut file_time,
                PWSTR::from_raw(buffer.as_mut_ptr()),
                &mut chars,
            )
        };
        match status {
            ERROR_SUCCESS => {
                if data_type != VT_LPSTR {
                    // VT_EMPTY means the property is missing entirely.
                    return Err(DetectError::Installer {
                        reason: format!(
                            "summary property {property} is not a string (type {data_type})"
                        ),
                    });
                }
                return Ok(String::from_utf16_lossy(&buffer[..chars as usize]));
            }
            // Required size comes back in `chars`, excluding the terminator.
            ERROR_MORE_DATA => buffer.resize(chars as usize + 1, 0),
            other => return Err(installer_error("MsiSummaryInfoGetPropertyW", other)),
        }
    }
}
