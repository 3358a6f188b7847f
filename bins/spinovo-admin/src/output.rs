//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use anyhow::Result;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};
use std::fmt::Display;
use serde::Serialize;

/// How command results are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", green("✓"), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!(
            "{} {}",
            "⚠".if_supports_color(Stream::Stderr, |t| t.yellow().to_string()),
            message
        );
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", blue("ℹ"), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", bold(message));
        println!("{}", "─".repeat(message.chars().count()));
    }

    /// Print a subheader
    pub fn subheader(message: &str) {
        println!();
        println!("{}", dimmed(bold(message)));
    }
}

// Styling helpers for stdout; plain text when colors are unsupported or
// disabled with `NO_COLOR`.

pub fn green(text: impl Display) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.green().to_string()).to_string()
}

pub fn red(text: impl Display) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.red().to_string()).to_string()
}

pub fn yellow(text: impl Display) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.yellow().to_string()).to_string()
}

pub fn blue(text: impl Display) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.blue().to_string()).to_string()
}

pub fn cyan(text: impl Display) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.cyan().to_string()).to_string()
}

pub fn bold(text: impl Display) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.bold().to_string()).to_string()
}

pub fn dimmed(text: impl Display) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.dimmed().to_string()).to_string()
}

/// Print an aligned `label: value` line
pub fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<14} {}", dimmed(format!("{label}:")), value);
}

/// Pretty-print any serializable value
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format a rupee amount
pub fn format_amount(amount: f64) -> String {
    format!("₹{amount:.2}")
}

/// Format a count with thousands separators
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `value` or a dimmed dash when blank
pub fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        dimmed("-")
    } else {
        value.to_string()
    }
}

/// Footer under a paged table
pub fn page_footer(page: u32, total_pages: u32, total: u64, noun: &str) {
    println!();
    println!(
        "{}",
        dimmed(format!(
            "Page {page} of {} · {} {noun}",
            total_pages.max(1),
            format_count(total)
        ))
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_no_color_leaves_text_plain() {
        owo_colors::set_override(false);
        assert_eq!(green("ok"), "ok");
        assert_eq!(dimmed(bold("title")), "title");
        owo_colors::unset_override();
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(499.0), "₹499.00");
        assert_eq!(format_amount(12.5), "₹12.50");
    }
}
