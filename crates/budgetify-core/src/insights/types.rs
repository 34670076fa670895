//! Core types for the Insight Engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Types of insights that can be generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    /// Compares the latest month's balance with the average
    BalanceTrend,
    /// Names the largest expense category
    TopCategory,
    /// Summarizes next month's forecast
    ForecastSummary,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::BalanceTrend => "balance_trend",
            InsightType::TopCategory => "top_category",
            InsightType::ForecastSummary => "forecast_summary",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "balance_trend" => Ok(InsightType::BalanceTrend),
            "top_category" => Ok(InsightType::TopCategory),
            "forecast_summary" => Ok(InsightType::ForecastSummary),
            _ => Err(format!("Unknown insight type: {}", s)),
        }
    }
}

/// Classification tag of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    Positive,
    Negative,
    Info,
    Warning,
}

impl FindingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::Positive => "positive",
            FindingKind::Negative => "negative",
            FindingKind::Info => "info",
            FindingKind::Warning => "warning",
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FindingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(FindingKind::Positive),
            "negative" => Ok(FindingKind::Negative),
            "info" => Ok(FindingKind::Info),
            "warning" => Ok(FindingKind::Warning),
            _ => Err(format!("Unknown finding kind: {}", s)),
        }
    }
}

/// A single insight ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub insight_type: InsightType,
    pub kind: FindingKind,
    pub title: String,
    /// Rendered sentence with numbers already formatted
    pub description: String,
    /// The raw numbers behind the description
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: serde_json::Value,
}

impl Finding {
    pub fn new(
        insight_type: InsightType,
        kind: FindingKind,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            insight_type,
            kind,
            title: title.into(),
            description: description.into(),
            data: serde_json::Value::Null,
        }
    }

    /// Add structured data payload
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}
