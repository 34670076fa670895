//! Insight Engine - orchestrates insight generation

use chrono::NaiveDate;

use crate::aggregate::{group_by_month, MonthlySummary};
use crate::forecast::ForecastSettings;
use crate::models::Transaction;
use crate::Result;

use super::types::{Finding, InsightType};
use super::{BalanceTrendInsight, ForecastSummaryInsight, TopCategoryInsight};

/// Context provided to insight analyzers
pub struct AnalysisContext<'a> {
    /// Transactions already narrowed to the period under analysis
    pub transactions: &'a [Transaction],
    /// Monthly series built from `transactions`
    pub history: Vec<MonthlySummary>,
    /// The day the analysis is made for
    pub as_of: NaiveDate,
    /// Suffix for rendered amounts
    pub currency: String,
    pub forecast: ForecastSettings,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(transactions: &'a [Transaction], as_of: NaiveDate) -> Self {
        Self {
            transactions,
            history: group_by_month(transactions),
            as_of,
            currency: "zł".to_string(),
            forecast: ForecastSettings::default(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_forecast_settings(mut self, settings: ForecastSettings) -> Self {
        self.forecast = settings;
        self
    }

    /// Format an amount with no decimals and the currency suffix
    pub fn money(&self, amount: f64) -> String {
        format!("{:.0} {}", amount, self.currency)
    }
}

/// Trait for insight analyzers
pub trait Insight: Send + Sync {
    /// Unique identifier for this insight type
    fn id(&self) -> InsightType;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Analyze data and produce findings
    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>>;
}

/// The main insight engine that orchestrates analysis
pub struct InsightEngine {
    insights: Vec<Box<dyn Insight>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create a new insight engine with built-in insight types
    pub fn new() -> Self {
        let mut engine = Self::empty();

        // Registration order is output order
        engine.register(Box::new(BalanceTrendInsight::new()));
        engine.register(Box::new(TopCategoryInsight::new()));
        engine.register(Box::new(ForecastSummaryInsight::new()));

        engine
    }

    /// An engine with no analyzers registered
    pub fn empty() -> Self {
        Self { insights: vec![] }
    }

    /// Register an insight analyzer
    pub fn register(&mut self, insight: Box<dyn Insight>) {
        self.insights.push(insight);
    }

    /// Run all insight analyzers and collect findings
    ///
    /// An analyzer that fails is logged and skipped. Without any monthly
    /// history the result is empty.
    pub fn analyze_all(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        if ctx.history.is_empty() {
            tracing::debug!("No history, skipping insight analysis");
            return vec![];
        }

        let mut all_findings = vec![];

        for insight in &self.insights {
            match insight.analyze(ctx) {
                Ok(findings) => {
                    tracing::debug!(
                        insight = insight.id().as_str(),
                        count = findings.len(),
                        "Insight analysis complete"
                    );
                    all_findings.extend(findings);
                }
                Err(e) => {
                    tracing::warn!(
                        insight = insight.id().as_str(),
                        error = %e,
                        "Insight analysis failed"
                    );
                }
            }
        }

        all_findings
    }

    /// Get list of registered insight types
    pub fn insight_types(&self) -> Vec<InsightType> {
        self.insights.iter().map(|i| i.id()).collect()
    }
}
