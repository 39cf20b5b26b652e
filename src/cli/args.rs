//! Command line argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// CPU architecture detector for Windows application packages
#[derive(Parser, Debug)]
#[command(
    name = "archscan",
    version,
    about = "Detects the target CPU architecture of Windows application packages",
    long_about = "Inspects the binary structure of Windows application packages and reports
the CPU architecture each one targets.

Recognized extensions: .exe, .msi, .appx, .msix, .appxbundle, .msixbundle

Usage:
  archscan .
  archscan --recursive C:\\Installers
  archscan setup.msi

Installer (.msi) metadata requires the Windows Installer API; on other hosts
those files are reported as unavailable-on-platform."
)]
pub struct Args {
    /// File or directory to scan
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Suppress the notice printed when no package files are found
    #[arg(short, long)]
    pub quiet: bool,

    /// Emit results as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
