//! Budgetify Core Library
//!
//! The finance aggregation engine behind the Budgetify tracker:
//! - Domain models for transactions, categories and savings goals
//! - Range and category filtering
//! - Monthly, per-category and seasonal aggregation
//! - Monthly budget evaluation and goal progress
//! - Linear trend forecasting with decaying confidence
//! - Insight engine producing short findings
//! - JSON blob storage behind a pluggable store
//! - Session file import (JSON or CSV) and layered configuration

pub mod aggregate;
pub mod budget;
pub mod categories;
pub mod config;
pub mod error;
pub mod filter;
pub mod forecast;
pub mod goals;
pub mod import;
pub mod insights;
pub mod ledger;
pub mod models;
pub mod ratio;
pub mod storage;
pub mod validation;

/// Test utilities: transaction, category and goal builders
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregate::{
    CategoryPattern, CategoryShare, DailyTotal, MonthSnapshot, MonthlySummary, PeriodSummary,
    YearOverYear,
};
pub use budget::{evaluate_budgets, BudgetOverview, BudgetSettings, BudgetStatus, CategoryBudget};
pub use categories::{default_categories, CategoryBook, CategoryInput};
pub use config::{Config, ReportSettings};
pub use error::{Error, FieldError, FieldErrors, Result};
pub use filter::{filter_by_category, filter_by_range, TimeRange, TransactionFilter};
pub use forecast::{ForecastPoint, ForecastSettings, Forecaster};
pub use goals::{evaluate_goal, GoalBook, GoalOverview, GoalProgress, GoalSettings, GoalStatus};
pub use import::load_session_file;
pub use insights::{AnalysisContext, Finding, FindingKind, Insight, InsightEngine, InsightType};
pub use ledger::Ledger;
pub use models::{
    Category, CategoryId, Goal, GoalCategory, GoalId, MonthKey, NewGoal, NewTransaction,
    Transaction, TransactionId, TransactionType,
};
pub use storage::{JsonFileStore, MemoryStore, Store, CATEGORIES_KEY, GOALS_KEY};
