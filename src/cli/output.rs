//! Terminal output helpers.
//!
//! Colored status symbols in the style of the Astral tools.

use std::fmt::Display;

use owo_colors::OwoColorize;

/// Print the application header with name and version.
pub fn header(version: &str) {
    println!("{} {}", "pricealert".bold(), version.dimmed());
    println!();
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    println!("  {:<14} {}", label.dimmed(), value);
}

/// Print a success line.
pub fn success(message: &str) {
    println!("  {} {}", "✓".green(), message);
}

/// Print a warning line.
pub fn warning(message: &str) {
    println!("  {} {}", "⚠".yellow(), message);
}

/// Print an error line.
pub fn error(message: &str) {
    eprintln!("  {} {}", "×".red(), message);
}

/// Print a section header.
pub fn section(title: &str) {
    println!("{}", title.bold());
}

#[must_use]
pub fn positive(value: impl Display) -> String {
    value.to_string().green().to_string()
}

#[must_use]
pub fn negative(value: impl Display) -> String {
    value.to_string().red().to_string()
}

#[must_use]
pub fn highlight(value: impl Display) -> String {
    value.to_string().cyan().to_string()
}

#[must_use]
pub fn muted(value: impl Display) -> String {
    value.to_string().dimmed().to_string()
}

/// Print a rendered table indented under the current section.
pub fn table(rendered: &str) {
    for line in rendered.lines() {
        println!("  {line}");
    }
}
