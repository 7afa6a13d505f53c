//! CLI output formatting utilities.
//!
//! Provides consistent formatting for terminal output including colored status
//! messages and Unicode symbols.

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_warning(message: &str) {
  eprintln!(
    "{} {}",
    symbols::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
    message.if_supports_color(Stream::Stderr, |s| s.yellow())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

/// One alias line: `  name → target`.
pub fn print_alias(name: &str, target: &str) {
  println!(
    "  {} {} {}",
    name.if_supports_color(Stream::Stdout, |s| s.bold()),
    symbols::ARROW.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    target
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

/// Display text for a possibly empty registry string.
pub fn or_unset(value: &str) -> &str {
  if value.is_empty() { "(value not set)" } else { value }
}
