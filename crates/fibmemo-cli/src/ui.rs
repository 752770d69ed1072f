//! UI helpers for CLI display.

use std::io::{self, Write};

use console::style;

/// Check if color output is disabled via `NO_COLOR` env var.
#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var_os("NO_COLOR").is_some()
}

/// Print a styled header.
pub fn print_header(text: &str) {
    if is_color_disabled() {
        println!("=== {text} ===");
    } else {
        println!("{}", style(format!("=== {text} ===")).bold().cyan());
    }
}

/// Print a dimmed informational line.
pub fn print_note(text: &str) {
    if is_color_disabled() {
        println!("{text}");
    } else {
        println!("{}", style(text).dim());
    }
}

/// Print an error message to stderr.
pub fn print_error(text: &str) {
    if is_color_disabled() {
        eprintln!("[ERROR] {text}");
    } else {
        eprintln!("{} {text}", style("[ERROR]").red().bold());
    }
}

/// Print an input prompt without a trailing newline.
///
/// # Errors
///
/// Returns an I/O error if stdout cannot be flushed.
pub fn prompt(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    if is_color_disabled() {
        write!(stdout, "{text}")?;
    } else {
        write!(stdout, "{}", style(text).bold().blue())?;
    }
    stdout.flush()
}
