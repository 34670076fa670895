//! Session setup and initialization
//!
//! This module contains:
//! - `open_session` - Shared utility resolving config, store, transactions and the evaluation date
//! - `cmd_init` - Seed the data directory

use std::path::PathBuf;

use anyhow::{Context, Result};
use budgetify_core::config::default_config_path;
use budgetify_core::{
    load_session_file, CategoryBook, Config, GoalBook, JsonFileStore, Ledger, Store, TimeRange,
    Transaction, CATEGORIES_KEY, GOALS_KEY,
};
use chrono::NaiveDate;
use serde::Serialize;

use super::print_json;

/// Global flags that shape a session
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub transactions: Option<PathBuf>,
    pub as_of: Option<String>,
    pub json: bool,
}

/// Everything a command needs: settings, persisted data and the in-memory ledger
pub struct Session {
    pub config: Config,
    pub store: Box<dyn Store>,
    /// Config file the settings came from; `None` means the built-in defaults
    pub config_path: Option<PathBuf>,
    pub ledger: Ledger,
    /// Source of `ledger`, if one was given
    pub transactions_path: Option<PathBuf>,
    /// "Today" for every date-relative calculation
    pub as_of: NaiveDate,
    pub json: bool,
}

/// Resolve config, open the data directory and load session transactions
pub fn open_session(options: &SessionOptions) -> Result<Session> {
    let mut config = Config::load(options.config.as_deref()).context("Failed to load config")?;
    let config_path = options
        .config
        .clone()
        .or_else(|| default_config_path().filter(|p| p.exists()));
    if let Some(dir) = &options.data_dir {
        config.data_dir = Some(dir.clone());
    }

    let data_dir = config.data_dir();
    let store = JsonFileStore::new(data_dir.clone())
        .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;

    let ledger = match &options.transactions {
        Some(path) => load_session_file(path)
            .with_context(|| format!("Failed to load transactions from {}", path.display()))?,
        None => Ledger::new(),
    };

    let as_of = match &options.as_of {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .context("Invalid --as-of date format (use YYYY-MM-DD)")?,
        None => chrono::Local::now().date_naive(),
    };

    tracing::debug!(
        data_dir = %data_dir.display(),
        transactions = ledger.len(),
        %as_of,
        "Session opened"
    );

    Ok(Session {
        config,
        store: Box::new(store),
        config_path,
        ledger,
        transactions_path: options.transactions.clone(),
        as_of,
        json: options.json,
    })
}

impl Session {
    pub fn new(config: Config, store: Box<dyn Store>, ledger: Ledger, as_of: NaiveDate) -> Self {
        Self {
            config,
            store,
            config_path: None,
            ledger,
            transactions_path: None,
            as_of,
            json: false,
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.list()
    }

    /// Parse a `--range` argument, falling back to the configured default
    pub fn range(&self, arg: Option<&str>) -> Result<TimeRange> {
        match arg {
            Some(s) => s.parse::<TimeRange>().map_err(anyhow::Error::msg),
            None => Ok(self.config.reports.default_range),
        }
    }

    pub fn categories(&self) -> CategoryBook {
        CategoryBook::load(self.store.as_ref())
    }

    pub fn goals(&self) -> GoalBook {
        GoalBook::load(self.store.as_ref())
    }

    /// Format an amount with the configured currency suffix
    pub fn money(&self, amount: f64) -> String {
        format!("{:.2} {}", amount, self.config.currency)
    }

    /// Print `value` as JSON when `--json` is set; returns whether it did
    pub fn emit<T: Serialize + ?Sized>(&self, value: &T) -> Result<bool> {
        if self.json {
            print_json(value)?;
        }
        Ok(self.json)
    }

    /// Tell the user why a report is empty
    pub fn print_no_transactions(&self) {
        if self.transactions_path.is_none() {
            println!("   No transactions loaded. Pass a session file with --transactions FILE.");
        } else {
            println!("   No transactions in this period.");
        }
    }
}

pub fn cmd_init(session: &Session) -> Result<()> {
    let store = session.store.as_ref();
    println!(
        "🔧 Initializing Budgetify data in {}...",
        session.config.data_dir().display()
    );

    if store.load(CATEGORIES_KEY)?.is_none() {
        CategoryBook::default()
            .save(store)
            .context("Failed to seed categories")?;
        println!("   Seeded default categories");
    } else {
        println!("   Categories already present, left unchanged");
    }

    if store.load(GOALS_KEY)?.is_none() {
        GoalBook::default()
            .save(store)
            .context("Failed to create goal list")?;
        println!("   Created empty goal list");
    }

    println!("✅ Budgetify initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Set a budget: budgetify categories budget Jedzenie 1200");
    println!("  2. Add a goal: budgetify goals add \"Wakacje\" --target 5000 --date 2025-07-01");
    println!("  3. See your month: budgetify --transactions history.csv dashboard");

    Ok(())
}
