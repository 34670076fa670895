//! Configuration loading
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a three-layer resolution:
//! 1. An explicit path (`--config`), which must exist
//! 2. An override in the data dir (~/.local/share/budgetify/config.toml)
//! 3. The embedded defaults (compiled into the binary)
//!
//! Keys missing from a file keep their built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::budget::BudgetSettings;
use crate::error::{Error, Result};
use crate::filter::TimeRange;
use crate::forecast::ForecastSettings;
use crate::goals::GoalSettings;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/budgetify.toml");

const APP_DIR: &str = "budgetify";

/// Upper bound for month counts in `[forecast]`
pub const MAX_FORECAST_MONTHS: u32 = 120;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    /// Window used when a report is not given `--range`
    pub default_range: TimeRange,
    /// How many categories the top-categories report shows
    pub top_categories: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            default_range: TimeRange::OneYear,
            top_categories: 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Where the category and goal blobs live; `None` means the platform default
    pub data_dir: Option<PathBuf>,
    /// Suffix appended to rendered amounts
    pub currency: String,
    pub budget: BudgetSettings,
    pub goals: GoalSettings,
    pub forecast: ForecastSettings,
    pub reports: ReportSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            currency: "zł".to_string(),
            budget: BudgetSettings::default(),
            goals: GoalSettings::default(),
            forecast: ForecastSettings::default(),
            reports: ReportSettings::default(),
        }
    }
}

impl Config {
    /// Load using the standard resolution order
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => parse_config(DEFAULT_CONFIG),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        tracing::debug!("Loaded config from {}", path.display());
        parse_config(&content)
    }

    /// The embedded defaults
    pub fn embedded() -> Result<Self> {
        parse_config(DEFAULT_CONFIG)
    }

    /// Effective data directory
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(default_data_dir)
            .unwrap_or_else(|| PathBuf::from(".budgetify"))
    }
}

/// Platform data directory for blobs (e.g. ~/.local/share/budgetify)
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join(APP_DIR))
}

/// Location of the user override config
pub fn default_config_path() -> Option<PathBuf> {
    default_data_dir().map(|d| d.join("config.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    storage: Option<RawStorage>,
    display: Option<RawDisplay>,
    budget: Option<RawBudget>,
    goals: Option<RawGoals>,
    forecast: Option<RawForecast>,
    reports: Option<RawReports>,
}

#[derive(Debug, Deserialize)]
struct RawStorage {
    data_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawBudget {
    warning_threshold: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawGoals {
    urgent_days: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    window_months: Option<usize>,
    horizon_months: Option<u32>,
    min_history_months: Option<usize>,
    confidence_start: Option<u32>,
    confidence_step: Option<u32>,
    confidence_floor: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawReports {
    default_range: Option<String>,
    top_categories: Option<usize>,
}

/// Parse TOML content and merge it over the built-in defaults
pub fn parse_config(content: &str) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = Config::default();

    if let Some(storage) = raw.storage {
        config.data_dir = storage.data_dir;
    }

    if let Some(display) = raw.display {
        if let Some(currency) = display.currency {
            config.currency = currency;
        }
    }

    if let Some(budget) = raw.budget {
        if let Some(threshold) = budget.warning_threshold {
            if !threshold.is_finite() || threshold <= 0.0 || threshold > 100.0 {
                return Err(Error::Config(format!(
                    "budget.warning_threshold must be in (0, 100], got {}",
                    threshold
                )));
            }
            config.budget.warning_threshold = threshold;
        }
    }

    if let Some(goals) = raw.goals {
        if let Some(days) = goals.urgent_days {
            if days < 0 {
                return Err(Error::Config("goals.urgent_days cannot be negative".into()));
            }
            config.goals.urgent_days = days;
        }
    }

    if let Some(forecast) = raw.forecast {
        let f = &mut config.forecast;
        if let Some(v) = forecast.window_months {
            f.window_months = v;
        }
        if let Some(v) = forecast.horizon_months {
            f.horizon_months = v;
        }
        if let Some(v) = forecast.min_history_months {
            f.min_history_months = v;
        }
        if let Some(v) = forecast.confidence_start {
            f.confidence_start = v;
        }
        if let Some(v) = forecast.confidence_step {
            f.confidence_step = v;
        }
        if let Some(v) = forecast.confidence_floor {
            f.confidence_floor = v;
        }
        let max = MAX_FORECAST_MONTHS as usize;
        if f.window_months == 0 || f.window_months > max {
            return Err(Error::Config(format!(
                "forecast.window_months must be between 1 and {}",
                max
            )));
        }
        if f.horizon_months == 0 || f.horizon_months > MAX_FORECAST_MONTHS {
            return Err(Error::Config(format!(
                "forecast.horizon_months must be between 1 and {}",
                MAX_FORECAST_MONTHS
            )));
        }
        if f.min_history_months > max {
            return Err(Error::Config(format!(
                "forecast.min_history_months cannot exceed {}",
                max
            )));
        }
        if f.confidence_start > 100 || f.confidence_floor > f.confidence_start {
            return Err(Error::Config(
                "forecast confidence must satisfy floor <= start <= 100".into(),
            ));
        }
    }

    if let Some(reports) = raw.reports {
        if let Some(range) = reports.default_range {
            config.reports.default_range = range.parse().map_err(Error::Config)?;
        }
        if let Some(top) = reports.top_categories {
            if top == 0 {
                return Err(Error::Config("reports.top_categories must be at least 1".into()));
            }
            config.reports.top_categories = top;
        }
    }

    Ok(config)
}
