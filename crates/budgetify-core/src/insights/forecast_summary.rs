//! Forecast Summary Insight
//!
//! Reports the first forecast point: next month's predicted balance and how
//! confident the forecast is.

use serde_json::json;

use crate::forecast::Forecaster;
use crate::Result;

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, FindingKind, InsightType};

pub struct ForecastSummaryInsight;

impl ForecastSummaryInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ForecastSummaryInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for ForecastSummaryInsight {
    fn id(&self) -> InsightType {
        InsightType::ForecastSummary
    }

    fn name(&self) -> &'static str {
        "Forecast Summary"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>> {
        let forecaster = Forecaster::with_settings(ctx.forecast);
        let points = forecaster.forecast(&ctx.history, ctx.as_of);
        let Some(next) = points.first() else {
            return Ok(vec![]);
        };

        let kind = if next.predicted_balance >= 0.0 {
            FindingKind::Positive
        } else {
            FindingKind::Warning
        };

        let finding = Finding::new(
            self.id(),
            kind,
            "Next month forecast",
            format!(
                "Predicted balance: {} (confidence: {}%)",
                ctx.money(next.predicted_balance),
                next.confidence
            ),
        )
        .with_data(json!({
            "month": next.month,
            "predicted_income": next.predicted_income,
            "predicted_expense": next.predicted_expense,
            "predicted_balance": next.predicted_balance,
            "confidence": next.confidence,
        }));

        Ok(vec![finding])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, expense, income, two_month_history};

    #[test]
    fn test_positive_forecast() {
        let txs = vec![
            income(3000.0, "Wynagrodzenie", date(2024, 1, 5)),
            expense(1000.0, "Mieszkanie", date(2024, 1, 6)),
            income(3300.0, "Wynagrodzenie", date(2024, 2, 5)),
            expense(1200.0, "Mieszkanie", date(2024, 2, 6)),
            income(3600.0, "Wynagrodzenie", date(2024, 3, 5)),
            expense(1400.0, "Mieszkanie", date(2024, 3, 6)),
        ];
        let ctx = AnalysisContext::new(&txs, date(2024, 3, 20));
        let findings = ForecastSummaryInsight::new().analyze(&ctx).unwrap();
        assert_eq!(findings[0].kind, FindingKind::Positive);
        assert_eq!(
            findings[0].description,
            "Predicted balance: 2200 zł (confidence: 80%)"
        );
    }

    #[test]
    fn test_negative_forecast_is_warning() {
        let txs = vec![
            income(1000.0, "Wynagrodzenie", date(2024, 1, 5)),
            expense(1500.0, "Mieszkanie", date(2024, 1, 6)),
            expense(1500.0, "Mieszkanie", date(2024, 2, 6)),
            expense(1500.0, "Mieszkanie", date(2024, 3, 6)),
        ];
        let ctx = AnalysisContext::new(&txs, date(2024, 3, 20));
        let findings = ForecastSummaryInsight::new().analyze(&ctx).unwrap();
        assert_eq!(findings[0].kind, FindingKind::Warning);
    }

    #[test]
    fn test_short_history_no_finding() {
        let txs = two_month_history();
        let ctx = AnalysisContext::new(&txs, date(2024, 2, 20));
        assert!(ForecastSummaryInsight::new().analyze(&ctx).unwrap().is_empty());
    }
}
