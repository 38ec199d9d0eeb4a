//! CLI output formatting utilities.
//!
//! Provides consistent formatting for terminal output including colored status
//! messages and Unicode symbols.

use anyhow::Context;
use owo_colors::{OwoColorize, Stream};
use swipe_core::Decision;

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const INFO: &str = "•";
  pub const KEEP: &str = "+";
  pub const DELETE: &str = "-";
}

pub fn decision_symbol(decision: Decision) -> &'static str {
  match decision {
    Decision::Keep => symbols::KEEP,
    Decision::Delete => symbols::DELETE,
  }
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

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!("  {}: {}", label.if_supports_color(Stream::Stdout, |s| s.dimmed()), value);
}

pub fn print_decision(asset_id: &str, decision: Decision) {
  let symbol = decision_symbol(decision);
  match decision {
    Decision::Keep => println!("  {} {}", symbol.if_supports_color(Stream::Stdout, |s| s.green()), asset_id),
    Decision::Delete => println!("  {} {}", symbol.if_supports_color(Stream::Stdout, |s| s.red()), asset_id),
  }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}
