use std::path::Path;

use owo_colors::{OwoColorize, Stream};

/// Print the rendered report as-is.
pub fn print_report(report: &str) {
    print!("{report}");
}

/// Print the notice shown when the store holds no rows.
pub fn print_no_records(path: &Path) {
    println!("No permission records found in {}.", path.display());
}

/// Print a single-line diagnostic to stderr.
pub fn print_error(err: &anyhow::Error) {
    eprintln!(
        "{} {err}",
        "Error:".if_supports_color(Stream::Stderr, |t| t.red().bold().to_string())
    );
}
