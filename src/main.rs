//! archscan - CPU architecture detector for Windows application packages.
//!
//! This binary inspects PE executables, Windows Installer packages and
//! app-package archives (.appx/.msix and their bundle variants) and reports
//! the target CPU architecture each one was built for.

mod cli;
mod detect;
mod error;
mod scanner;

use std::process;

fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
