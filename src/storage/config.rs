//! Configuration handling for Shelf CLI
//!
//! All settings are environment-sourced with defaults. The data directory
//! is surfaced as a CLI flag (`--data-dir`, env `SHELF_DATA_DIR`) and
//! handled by clap; the remaining settings are read here.

use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use thiserror::Error;

/// Environment variable for the loan date display format
pub const DATE_FORMAT_VAR: &str = "SHELF_DATE_FORMAT";
/// Environment variable for the per-member open-loan cap
pub const MAX_LOANS_VAR: &str = "SHELF_MAX_LOANS_PER_MEMBER";

/// Display format applied to loan dates in listings; storage is always ISO
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";
/// Default open-loan cap per member
pub const DEFAULT_MAX_LOANS: usize = 2;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Environment-sourced settings
#[derive(Debug, Clone)]
pub struct Config {
    /// chrono format string used when displaying loan dates
    pub date_format: String,

    /// Maximum simultaneously open loans per member
    pub max_loans_per_member: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            max_loans_per_member: DEFAULT_MAX_LOANS,
        }
    }
}

impl Config {
    /// Loads configuration from the environment, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let date_format =
            std::env::var(DATE_FORMAT_VAR).unwrap_or_else(|_| DEFAULT_DATE_FORMAT.to_string());

        // An invalid strftime string would only surface as a panic when a
        // date is rendered; reject it up front instead.
        if StrftimeItems::new(&date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::Invalid(format!(
                "{} is not a valid date format: '{}'",
                DATE_FORMAT_VAR, date_format
            ))
            .into());
        }

        let max_loans_per_member = match std::env::var(MAX_LOANS_VAR) {
            Ok(raw) => raw
                .parse::<usize>()
                .map_err(|_| {
                    ConfigError::Invalid(format!("{} must be an integer, got '{}'", MAX_LOANS_VAR, raw))
                })
                .context("Failed to read loan cap from environment")?,
            Err(_) => DEFAULT_MAX_LOANS,
        };

        Ok(Self {
            date_format,
            max_loans_per_member,
        })
    }
}
