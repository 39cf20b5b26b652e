//! Terminal output for scan results.
//!
//! Renders the per-file table with fixed padded columns and a color per
//! outcome: green for a recognized architecture, yellow for Unknown, red
//! for error, dark grey for unavailable-on-platform. Color capability is
//! detected once at construction and scoped to this layer; nothing in the
//! detection core touches the terminal.

use crate::detect::{Arch, Detection, DetectionResult};
use crossterm::style::{Color, Stylize};
use std::io::IsTerminal;

const SIZE_WIDTH: usize = 10;

/// Manages colored terminal output for scan results.
pub struct OutputManager {
    colored: bool,
    quiet: bool,
}

impl OutputManager {
    /// Create an output manager, detecting terminal color capability.
    pub fn new(quiet: bool) -> Self {
        Self {
            colored: std::io::stdout().is_terminal(),
            quiet,
        }
    }

    /// Print the notice shown when a scan matched no files.
    ///
    /// Suppressed in quiet mode; an empty scan is not a failure.
    pub fn no_matches_notice(&self) {
        if !self.quiet {
            println!("No package files found.");
        }
    }

    /// Render one row per result: file name, size in MiB, architecture.
    pub fn table(&self, results: &[DetectionResult]) {
        let name_width = results
            .iter()
            .map(|r| r.file_name.len())
            .chain(std::iter::once("NAME".len()))
            .max()
            .unwrap_or(0);

        let header = format!(
            "{: <nw$}  {: >sw$}  {}",
            "NAME",
            "SIZE (MiB)",
            "ARCHITECTURE",
            nw = name_width,
            sw = SIZE_WIDTH
        );
        let table_width = header.chars().count();
        println!("{}", self.paint(header, Color::DarkGrey));
        println!("{}", self.paint("─".repeat(table_width), Color::DarkGrey));

        for result in results {
            let size = format!("{:.2}", result.size_mib());
            let label = architecture_label(&result.architecture);
            let color = architecture_color(&result.architecture);
            println!(
                "{: <nw$}  {: >sw$}  {}",
                result.file_name,
                size,
                self.paint(label, color),
                nw = name_width,
                sw = SIZE_WIDTH
            );
        }
    }

    fn paint(&self, text: String, color: Color) -> String {
        if self.colored {
            text.with(color).to_string()
        } else {
            text
        }
    }
}

/// Table label for a detection outcome.
///
/// `unknown` is capitalized here and only here; the library display form
/// and the JSON output stay canonical lowercase.
fn architecture_label(detection: &Detection) -> String {
    match detection {
        Detection::Architecture(Arch::Unknown) => "Unknown".to_string(),
        Detection::Architectures(archs) if archs.as_slice() == [Arch::Unknown] => {
            "Unknown".to_string()
        }
        other => other.to_string(),
    }
}

fn architecture_color(detection: &Detection) -> Color {
    match detection {
        Detection::Architecture(Arch::Unknown) => Color::Yellow,
        Detection::Architectures(archs) if archs.as_slice() == [Arch::Unknown] => Color::Yellow,
        Detection::Architecture(_) | Detection::Architectures(_) => Color::Green,
        Detection::Error => Color::Red,
        Detection::UnavailableOnPlatform => Color::DarkGrey,
    }
}
