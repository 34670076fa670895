//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Budgetify - Track budgets, savings goals and spending trends
#[derive(Parser)]
#[command(name = "budgetify")]
#[command(about = "Personal finance tracker: budgets, goals, trends and forecasts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding the category and goal data (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file (defaults to ~/.local/share/budgetify/config.toml, then built-ins)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Session transactions file (JSON array or CSV)
    #[arg(short, long, global = true)]
    pub transactions: Option<PathBuf>,

    /// Evaluate as of this date (YYYY-MM-DD) instead of today
    #[arg(long, global = true)]
    pub as_of: Option<String>,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the data directory and seed default categories
    Init,

    /// Show configuration and stored data status
    Status,

    /// Show this month at a glance
    Dashboard,

    /// Inspect session transactions
    Transactions {
        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// Manage categories and their monthly budgets
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// Manage savings goals
    Goals {
        #[command(subcommand)]
        action: Option<GoalsAction>,
    },

    /// Generate reports from session transactions
    Report {
        #[command(subcommand)]
        report_type: ReportType,
    },
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// List transactions, newest first
    List {
        /// Time range: 3months, 6months, 1year, 2years, all
        #[arg(long)]
        range: Option<String>,

        /// Only this category (exact name)
        #[arg(long)]
        category: Option<String>,

        /// Only income or expense
        #[arg(long = "type")]
        kind: Option<String>,

        /// Maximum number of rows
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// List categories
    List {
        /// Only income or expense
        #[arg(long = "type")]
        kind: Option<String>,
    },

    /// Add a custom category
    Add {
        /// Category name
        name: String,

        /// income or expense
        #[arg(long = "type", default_value = "expense")]
        kind: String,

        /// Monthly budget (expense categories only)
        #[arg(long)]
        budget: Option<String>,
    },

    /// Edit a category's name, type or budget
    Edit {
        /// Category id or name
        category: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New type (income or expense)
        #[arg(long = "type")]
        kind: Option<String>,

        /// New monthly budget
        #[arg(long)]
        budget: Option<String>,

        /// Remove the monthly budget
        #[arg(long, conflicts_with = "budget")]
        clear_budget: bool,
    },

    /// Delete a custom category
    Delete {
        /// Category id or name
        category: String,
    },

    /// Set or clear a monthly budget
    Budget {
        /// Category id or name
        category: String,

        /// Monthly limit; omit to clear
        amount: Option<String>,
    },

    /// Restore the default categories (drops custom ones and budgets)
    Reset,
}

#[derive(Subcommand)]
pub enum GoalsAction {
    /// List goals with progress
    List,

    /// Add a savings goal
    Add {
        /// Goal name
        name: String,

        /// Target amount
        #[arg(long)]
        target: String,

        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Amount already saved
        #[arg(long)]
        current: Option<String>,

        /// savings, vacation, car, house, education, emergency, investment, other
        #[arg(long, default_value = "savings")]
        category: String,

        /// Free-form description
        #[arg(long)]
        description: Option<String>,
    },

    /// Edit a goal (unspecified fields keep their values)
    Edit {
        /// Goal id or name
        goal: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        target: Option<String>,

        /// Target date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        current: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Add money to a goal
    Fund {
        /// Goal id or name
        goal: String,

        /// Amount to add
        amount: String,
    },

    /// Delete a goal
    Delete {
        /// Goal id or name
        goal: String,
    },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Income, expense and balance per month
    Monthly {
        /// Time range: 3months, 6months, 1year, 2years, all
        #[arg(long)]
        range: Option<String>,

        /// Only this category (exact name)
        #[arg(long)]
        category: Option<String>,
    },

    /// Totals per category with monthly averages
    Categories {
        #[arg(long)]
        range: Option<String>,

        /// income or expense
        #[arg(long = "type", default_value = "expense")]
        kind: String,
    },

    /// Expense totals per month of the year
    Seasonality {
        #[arg(long)]
        range: Option<String>,
    },

    /// Largest expense categories
    Top {
        #[arg(long)]
        range: Option<String>,

        /// Number of categories (defaults to config)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// This year against last year
    YearOverYear,

    /// This month's spending against budgets
    Budget,

    /// Linear forecast of the coming months
    Forecast {
        #[arg(long)]
        range: Option<String>,
    },

    /// Short findings about trends and the forecast
    Insights {
        #[arg(long)]
        range: Option<String>,
    },

    /// Day-by-day totals for one month
    Calendar {
        /// Month (YYYY-MM); defaults to the current month
        #[arg(long)]
        month: Option<String>,

        /// Only this category (exact name)
        #[arg(long)]
        category: Option<String>,
    },
}
