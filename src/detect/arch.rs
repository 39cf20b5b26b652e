//! CPU architecture tokens and normalization.

use std::fmt;

/// Canonical CPU architecture of a Windows application package.
///
/// Package formats spell architectures in vendor-specific ways: PE headers
/// carry numeric machine codes, installer summary metadata uses strings like
/// `"Intel"` or `"x64"`, and app-package manifests use `"x86"`/`"arm64"`.
/// Every raw value a scan encounters resolves to exactly one of these seven
/// tokens via [`Arch::normalize`].
///
/// # Examples
///
/// ```
/// use archscan::Arch;
///
/// assert_eq!(Arch::normalize("AMD64"), Arch::Amd64);
/// assert_eq!(Arch::normalize("Intel"), Arch::Intel32);
/// assert_eq!(Arch::normalize(""), Arch::Unknown);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// x86 / i386 (32-bit) - Legacy 32-bit Intel
    Intel32,
    /// x86_64 / AMD64 (64-bit) - Most common desktop/server architecture
    Amd64,
    /// AArch64 / ARM64 (64-bit) - Windows on ARM
    Arm64,
    /// ARM (32-bit) - Older Windows RT / IoT devices
    Arm,
    /// IA-64 Itanium - Historical server architecture
    Ia64,
    /// Architecture-neutral package (AnyCPU / resource-only)
    Neutral,
    /// No recognized architecture marker
    Unknown,
}

impl Arch {
    /// Normalize a raw architecture string to a canonical token.
    ///
    /// Matching is case-insensitive over fixed alias sets; anything outside
    /// them (including the empty string) is [`Arch::Unknown`]. Total and
    /// pure: never fails, performs no I/O.
    pub fn normalize(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "x86" | "intel" | "intel32" | "32" => Self::Intel32,
            "x64" | "amd64" | "64" => Self::Amd64,
            "arm64" => Self::Arm64,
            "arm" => Self::Arm,
            "ia64" | "itanium" => Self::Ia64,
            "neutral" | "anycpu" | "any" => Self::Neutral,
            _ => Self::Unknown,
        }
    }

    /// Canonical lowercase name of this token.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Intel32 => "intel32",
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
            Self::Arm => "arm",
            Self::Ia64 => "ia64",
            Self::Neutral => "neutral",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
