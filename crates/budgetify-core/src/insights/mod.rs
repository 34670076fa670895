//! Insight Engine - short findings derived from the monthly history
//!
//! Each analyzer looks at the same [`AnalysisContext`] and returns zero or
//! more [`Finding`]s. The engine runs analyzers in registration order and
//! keeps that order in its output.
//!
//! ## Built-in Insight Types
//!
//! - **Balance Trend** - last month's balance against the average
//! - **Top Category** - the largest expense category
//! - **Forecast Summary** - next month's predicted balance
//!
//! ## Usage
//!
//! ```rust,ignore
//! use budgetify_core::insights::{AnalysisContext, InsightEngine};
//!
//! let ctx = AnalysisContext::new(&transactions, as_of).with_currency("zł");
//! let findings = InsightEngine::new().analyze_all(&ctx);
//! ```

pub mod balance_trend;
pub mod engine;
pub mod forecast_summary;
pub mod top_category;
pub mod types;

pub use balance_trend::BalanceTrendInsight;
pub use engine::{AnalysisContext, Insight, InsightEngine};
pub use forecast_summary::ForecastSummaryInsight;
pub use top_category::TopCategoryInsight;
pub use types::{Finding, FindingKind, InsightType};
