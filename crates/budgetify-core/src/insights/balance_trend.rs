//! Balance Trend Insight
//!
//! Compares the most recent month's balance with the average balance over
//! the whole history.

use serde_json::json;

use crate::ratio::{mean, relative_change};
use crate::Result;

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, FindingKind, InsightType};

pub struct BalanceTrendInsight;

impl BalanceTrendInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BalanceTrendInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for BalanceTrendInsight {
    fn id(&self) -> InsightType {
        InsightType::BalanceTrend
    }

    fn name(&self) -> &'static str {
        "Balance Trend"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>> {
        let Some(last) = ctx.history.last() else {
            return Ok(vec![]);
        };

        let balances: Vec<f64> = ctx.history.iter().map(|m| m.balance).collect();
        let average = mean(&balances);

        // No meaningful percentage against a (near) zero average
        let Some(change) = relative_change(last.balance, average) else {
            let finding = Finding::new(
                self.id(),
                FindingKind::Info,
                "No comparable trend",
                format!(
                    "Your average balance is 0, so last month's {} cannot be compared",
                    ctx.money(last.balance)
                ),
            )
            .with_data(json!({
                "last_balance": last.balance,
                "average_balance": average,
                "month": last.month,
            }));
            return Ok(vec![finding]);
        };

        let data = json!({
            "last_balance": last.balance,
            "average_balance": average,
            "month": last.month,
            "delta_percent": change,
        });
        let finding = if change > 0.0 {
            Finding::new(
                self.id(),
                FindingKind::Positive,
                "Positive financial trend",
                format!("Your balance improved by {:.1}% against the average", change),
            )
        } else {
            Finding::new(
                self.id(),
                FindingKind::Negative,
                "Watch your spending",
                format!(
                    "Your balance dropped by {:.1}% against the average",
                    change.abs()
                ),
            )
        }
        .with_data(data);

        Ok(vec![finding])
    }
}
