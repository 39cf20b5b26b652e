//! Command line interface for archscan.
//!
//! Argument parsing, scan execution, and result rendering. All terminal
//! concerns (colors, table layout, notices) live here; the detection core
//! never touches process-wide state.

mod args;
mod output;

pub use args::Args;
pub use output::OutputManager;

use crate::detect::msi;
use crate::error::Result;
use crate::scanner::{self, ScanOptions};

/// Main CLI entry point
pub fn run() -> Result<i32> {
    let args = Args::parse_args();
    log::debug!(
        "installer metadata capability: {}",
        if msi::available() { "native" } else { "unavailable" }
    );

    let results = scanner::scan(
        &args.path,
        ScanOptions {
            recursive: args.recursive,
        },
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(0);
    }

    let output = OutputManager::new(args.quiet);
    if results.is_empty() {
        output.no_matches_notice();
        return Ok(0);
    }

    output.table(&results);
    Ok(0)
}
