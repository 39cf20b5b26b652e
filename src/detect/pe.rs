//! Executable (PE) header parsing.
//!
//! Reads just enough of a binary to find its machine-type field: the DOS
//! "MZ" signature at offset 0, the PE header offset at 0x3C, the "PE\0\0"
//! signature at that offset, and the 16-bit machine code immediately after.
//!
//! A file that fails any signature check, or is too short for the field
//! being read, is not a recognized executable and reports
//! [`Arch::Unknown`]; only genuine I/O faults (permission denied, read
//! errors) surface as `Err`.

use crate::detect::Arch;
use crate::error::DetectError;
use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

/// DOS "MZ" signature.
const DOS_SIGNATURE: u16 = 0x5A4D; // "MZ"

/// PE "PE\0\0" signature.
const NT_SIGNATURE: u32 = 0x0000_4550; // "PE\0\0"

/// File offset of the 32-bit pointer to the PE header (e_lfanew).
const PE_POINTER_OFFSET: u64 = 0x3C;

/// Machine-type constants from the COFF file header.
///
/// This numeric table is deliberately separate from the string alias sets in
/// [`Arch::normalize`]: it maps header machine codes, not vendor spellings.
const MACHINE_I386: u16 = 0x014C;
const MACHINE_ARM: u16 = 0x01C4;
const MACHINE_IA64: u16 = 0x0200;
const MACHINE_AMD64: u16 = 0x8664;
const MACHINE_ARM64: u16 = 0xAA64;

/// Detect the machine architecture of a PE executable.
///
/// Opens the file for shared read access; the handle is released on every
/// exit path when the `File` drops.
pub fn detect(path: &Path) -> Result<Arch, DetectError> {
    let mut file = File::open(path)?;

    let mut dos_sig = [0u8; 2];
    if !read_exact_or_eof(&mut file, &mut dos_sig)? {
        return Ok(Arch::Unknown);
    }
    if u16::from_le_bytes(dos_sig) != DOS_SIGNATURE {
        return Ok(Arch::Unknown);
    }

    file.seek(SeekFrom::Start(PE_POINTER_OFFSET))?;
    let mut pointer = [0u8; 4];
    if !read_exact_or_eof(&mut file, &mut pointer)? {
        return Ok(Arch::Unknown);
    }

    // Seeking past EOF succeeds; the signature read below catches it.
    file.seek(SeekFrom::Start(u64::from(u32::from_le_bytes(pointer))))?;
    let mut nt_sig = [0u8; 4];
    if !read_exact_or_eof(&mut file, &mut nt_sig)? {
        return Ok(Arch::Unknown);
    }
    if u32::from_le_bytes(nt_sig) != NT_SIGNATURE {
        return Ok(Arch::Unknown);
    }

    let mut machine = [0u8; 2];
    if !read_exact_or_eof(&mut file, &mut machine)? {
        return Ok(Arch::Unknown);
    }

    Ok(machine_arch(u16::from_le_bytes(machine)))
}

/// Map a COFF machine code to a canonical token.
fn machine_arch(machine: u16) -> Arch {
    match machine {
        MACHINE_I386 => Arch::Intel32,
        MACHINE_AMD64 => Arch::Amd64,
        MACHINE_ARM64 => Arch::Arm64,
        MACHINE_ARM => Arch::Arm,
        MACHINE_IA64 => Arch::Ia64,
        _ => Arch::Unknown,
    }
}

/// Fill `buf` completely, distinguishing end-of-file from I/O faults.
///
/// Returns `Ok(false)` when the file ends before the buffer is full (the
/// file is simply too short to be a valid executable), `Err` for any other
/// read failure.
fn read_exact_or_eof(file: &mut File, buf: &mut [u8]) -> Result<bool, DetectError> {
    match file.read_exact(buf) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e.into()),
    }
}
