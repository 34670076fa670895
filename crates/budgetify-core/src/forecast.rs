//! Linear trend forecast over the monthly series
//!
//! The trend is a two-point slope between the first and last month of the
//! recent window, not a regression. Confidence falls by a fixed step per
//! month ahead and never drops below a floor.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::{group_by_month, MonthlySummary};
use crate::models::{MonthKey, Transaction};
use crate::ratio::{mean, safe_ratio};

/// Tuning for [`Forecaster`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastSettings {
    /// How many of the most recent months feed the averages
    pub window_months: usize,
    /// How many months ahead to predict
    pub horizon_months: u32,
    /// Below this many observed months no forecast is produced
    pub min_history_months: usize,
    pub confidence_start: u32,
    pub confidence_step: u32,
    pub confidence_floor: u32,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            window_months: 6,
            horizon_months: 6,
            min_history_months: 3,
            confidence_start: 90,
            confidence_step: 10,
            confidence_floor: 20,
        }
    }
}

/// A predicted month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub month: MonthKey,
    pub label: String,
    pub predicted_income: f64,
    pub predicted_expense: f64,
    pub predicted_balance: f64,
    /// Percent, 0..=100
    pub confidence: u32,
}

pub struct Forecaster {
    settings: ForecastSettings,
}

impl Forecaster {
    pub fn new() -> Self {
        Self {
            settings: ForecastSettings::default(),
        }
    }

    pub fn with_settings(settings: ForecastSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ForecastSettings {
        &self.settings
    }

    /// Confidence for the point `months_ahead` months out
    pub fn confidence(&self, months_ahead: u32) -> u32 {
        let s = &self.settings;
        s.confidence_start
            .saturating_sub(s.confidence_step.saturating_mul(months_ahead))
            .max(s.confidence_floor)
    }

    /// Forecast from an ascending monthly series
    ///
    /// Returns an empty list when the series is shorter than the minimum
    /// history. Point `i` is labelled with the month `i` months after `as_of`.
    pub fn forecast(&self, history: &[MonthlySummary], as_of: NaiveDate) -> Vec<ForecastPoint> {
        if history.is_empty() || history.len() < self.settings.min_history_months {
            tracing::debug!(
                months = history.len(),
                required = self.settings.min_history_months,
                "Not enough history to forecast"
            );
            return Vec::new();
        }

        let start = history.len().saturating_sub(self.settings.window_months.max(1));
        let window = &history[start..];

        let incomes: Vec<f64> = window.iter().map(|m| m.income).collect();
        let expenses: Vec<f64> = window.iter().map(|m| m.expense).collect();
        let avg_income = mean(&incomes);
        let avg_expense = mean(&expenses);
        let income_growth = slope(&incomes);
        let expense_growth = slope(&expenses);

        let current = MonthKey::from_date(as_of);

        (1..=self.settings.horizon_months)
            .map(|i| {
                let step = f64::from(i);
                let predicted_income = (avg_income + income_growth * step).max(0.0);
                let predicted_expense = (avg_expense + expense_growth * step).max(0.0);
                let month = current.plus_months(i);
                ForecastPoint {
                    month,
                    label: month.label(),
                    predicted_income,
                    predicted_expense,
                    predicted_balance: predicted_income - predicted_expense,
                    confidence: self.confidence(i),
                }
            })
            .collect()
    }

    /// Group `transactions` by month and forecast from the result
    pub fn forecast_transactions(
        &self,
        transactions: &[Transaction],
        as_of: NaiveDate,
    ) -> Vec<ForecastPoint> {
        self.forecast(&group_by_month(transactions), as_of)
    }
}

impl Default for Forecaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Average change per step between the first and last value
fn slope(values: &[f64]) -> f64 {
    match (values.first(), values.last()) {
        (Some(first), Some(last)) if values.len() > 1 => safe_ratio(last - first, (values.len() - 1) as f64),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, expense, income, two_month_history};

    fn three_months() -> Vec<Transaction> {
        vec![
            income(3000.0, "Wynagrodzenie", date(2024, 1, 5)),
            expense(1000.0, "Mieszkanie", date(2024, 1, 6)),
            income(3300.0, "Wynagrodzenie", date(2024, 2, 5)),
            expense(1200.0, "Mieszkanie", date(2024, 2, 6)),
            income(3600.0, "Wynagrodzenie", date(2024, 3, 5)),
            expense(1400.0, "Mieszkanie", date(2024, 3, 6)),
        ]
    }

    #[test]
    fn test_two_months_is_not_enough() {
        let points = Forecaster::new().forecast_transactions(&two_month_history(), date(2024, 2, 20));
        assert!(points.is_empty());
    }

    #[test]
    fn test_three_months_gives_six_points() {
        let points = Forecaster::new().forecast_transactions(&three_months(), date(2024, 3, 20));
        assert_eq!(points.len(), 6);
        let confidences: Vec<u32> = points.iter().map(|p| p.confidence).collect();
        assert_eq!(confidences, vec![80, 70, 60, 50, 40, 30]);
    }

    #[test]
    fn test_linear_extrapolation() {
        let points = Forecaster::new().forecast_transactions(&three_months(), date(2024, 3, 20));
        // averages 3300 / 1200, slopes 300 / 200 per month
        assert!((points[0].predicted_income - 3600.0).abs() < 1e-9);
        assert!((points[0].predicted_expense - 1400.0).abs() < 1e-9);
        assert!((points[0].predicted_balance - 2200.0).abs() < 1e-9);
        assert_eq!(points[0].month.to_string(), "2024-04");
        assert_eq!(points[5].month.to_string(), "2024-09");
        assert_eq!(points[0].label, "Apr 2024");
    }

    #[test]
    fn test_predictions_clamped_at_zero() {
        let txs = vec![
            income(3000.0, "Wynagrodzenie", date(2024, 1, 5)),
            income(1000.0, "Wynagrodzenie", date(2024, 2, 5)),
            income(100.0, "Wynagrodzenie", date(2024, 3, 5)),
            expense(50.0, "Jedzenie", date(2024, 3, 6)),
        ];
        let points = Forecaster::new().forecast_transactions(&txs, date(2024, 3, 31));
        assert!(points.iter().all(|p| p.predicted_income >= 0.0));
        assert!(points.iter().all(|p| p.predicted_expense >= 0.0));
        assert_eq!(points[5].predicted_income, 0.0);
    }

    #[test]
    fn test_window_uses_last_months_only() {
        let mut txs = vec![income(100_000.0, "Inwestycje", date(2023, 1, 1))];
        for month in 1..=6 {
            txs.push(income(1000.0, "Wynagrodzenie", date(2024, month, 1)));
        }
        let points = Forecaster::new().forecast_transactions(&txs, date(2024, 6, 30));
        assert!((points[0].predicted_income - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_confidence_floor_and_custom_settings() {
        let forecaster = Forecaster::with_settings(ForecastSettings {
            horizon_months: 10,
            ..ForecastSettings::default()
        });
        assert_eq!(forecaster.confidence(7), 20);
        assert_eq!(forecaster.confidence(10), 20);
        let points = forecaster.forecast_transactions(&three_months(), date(2024, 3, 20));
        assert_eq!(points.len(), 10);
    }
}
