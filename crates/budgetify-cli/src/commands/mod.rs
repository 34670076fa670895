//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `categories` - Category and budget management (list, add, edit, delete, budget, reset)
//! - `core` - Session setup (`open_session`) and `cmd_init`
//! - `goals` - Savings goal management (list, add, edit, fund, delete)
//! - `reports` - Report generation commands
//! - `status` - Status and dashboard commands
//! - `transactions` - Session transaction listing

pub mod categories;
pub mod core;
pub mod goals;
pub mod reports;
pub mod status;
pub mod transactions;

// Re-export command functions for main.rs
pub use categories::*;
pub use core::*;
pub use goals::*;
pub use reports::*;
pub use status::*;
pub use transactions::*;

use anyhow::Result;
use serde::Serialize;

/// Truncate a string to a maximum length in characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Pretty-print a value as JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render a 0-100 percentage as a fixed-width bar
pub fn progress_bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Parse a decimal that may use a comma separator; range checks are left to the core
pub fn parse_decimal(input: &str, what: &str) -> Result<f64> {
    let value: f64 = input
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid {}: '{}'", what, input))?;
    if !value.is_finite() {
        anyhow::bail!("Invalid {}: '{}'", what, input);
    }
    Ok(value)
}
