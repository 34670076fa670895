//! Monthly budget evaluation
//!
//! Compares each budgeted expense category's spending in the calendar month
//! of `as_of` against its limit.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::filter::filter_in_month;
use crate::models::{Category, CategoryId, MonthKey, Transaction, TransactionType};
use crate::ratio::{percent_of, total};

/// Utilization at or above this percentage is over budget
pub const OVER_THRESHOLD: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetSettings {
    /// Utilization at or above this percentage is a warning
    pub warning_threshold: f64,
}

impl Default for BudgetSettings {
    fn default() -> Self {
        Self {
            warning_threshold: 80.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    Good,
    Warning,
    Over,
}

impl BudgetStatus {
    pub fn classify(percentage: f64, settings: &BudgetSettings) -> Self {
        if percentage >= OVER_THRESHOLD {
            Self::Over
        } else if percentage >= settings.warning_threshold {
            Self::Warning
        } else {
            Self::Good
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Over => "over",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spending against one category's limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBudget {
    pub category_id: CategoryId,
    pub name: String,
    pub budget: f64,
    pub spent: f64,
    /// Never negative
    pub remaining: f64,
    pub percentage: f64,
    pub status: BudgetStatus,
}

impl CategoryBudget {
    pub fn is_exceeded(&self) -> bool {
        self.spent >= self.budget
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetOverview {
    pub month: MonthKey,
    pub categories: Vec<CategoryBudget>,
    pub total_budget: f64,
    pub total_spent: f64,
    pub total_remaining: f64,
    /// `total_spent / total_budget * 100`, 0 without any budget
    pub utilization: f64,
    pub status: BudgetStatus,
    /// Set when any category has reached its limit
    pub over_budget: bool,
    /// Expense categories without a positive budget
    pub unbudgeted: Vec<String>,
}

impl BudgetOverview {
    pub fn exceeded(&self) -> impl Iterator<Item = &CategoryBudget> {
        self.categories.iter().filter(|c| c.is_exceeded())
    }
}

/// Evaluate every budgeted expense category for the month containing `as_of`
///
/// Categories are evaluated independently, so two entries that share a name
/// each count the same spending.
pub fn evaluate_budgets(
    transactions: &[Transaction],
    categories: &[Category],
    as_of: NaiveDate,
    settings: &BudgetSettings,
) -> BudgetOverview {
    let month = MonthKey::from_date(as_of);
    let in_month = filter_in_month(transactions, month);

    let rows: Vec<CategoryBudget> = categories
        .iter()
        .filter_map(|cat| cat.budget_limit().map(|limit| (cat, limit)))
        .map(|(cat, budget)| {
            let spent = total(
                in_month
                    .iter()
                    .filter(|t| t.kind == TransactionType::Expense && t.category == cat.name)
                    .map(|t| t.amount),
            );
            let percentage = percent_of(spent, budget);
            CategoryBudget {
                category_id: cat.id.clone(),
                name: cat.name.clone(),
                budget,
                spent,
                remaining: (budget - spent).max(0.0),
                percentage,
                status: BudgetStatus::classify(percentage, settings),
            }
        })
        .collect();

    let total_budget = total(rows.iter().map(|r| r.budget));
    let total_spent = total(rows.iter().map(|r| r.spent));
    let utilization = percent_of(total_spent, total_budget);

    let unbudgeted = categories
        .iter()
        .filter(|c| c.kind == TransactionType::Expense && c.budget_limit().is_none())
        .map(|c| c.name.clone())
        .collect();

    let over_budget = rows.iter().any(|r| r.is_exceeded());
    if over_budget {
        tracing::debug!(month = %month, "At least one category is over budget");
    }

    BudgetOverview {
        month,
        total_remaining: (total_budget - total_spent).max(0.0),
        status: BudgetStatus::classify(utilization, settings),
        categories: rows,
        total_budget,
        total_spent,
        utilization,
        over_budget,
        unbudgeted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, expense, expense_category, income, income_category};

    #[test]
    fn test_thresholds() {
        let settings = BudgetSettings::default();
        assert_eq!(BudgetStatus::classify(100.0, &settings), BudgetStatus::Over);
        assert_eq!(BudgetStatus::classify(80.0, &settings), BudgetStatus::Warning);
        assert_eq!(BudgetStatus::classify(79.999, &settings), BudgetStatus::Good);
        assert_eq!(BudgetStatus::classify(150.0, &settings), BudgetStatus::Over);
    }

    #[test]
    fn test_custom_warning_threshold() {
        let settings = BudgetSettings {
            warning_threshold: 50.0,
        };
        assert_eq!(BudgetStatus::classify(60.0, &settings), BudgetStatus::Warning);
        assert_eq!(BudgetStatus::classify(100.0, &settings), BudgetStatus::Over);
    }

    #[test]
    fn test_food_budget_example() {
        let categories = vec![expense_category("Jedzenie", Some(400.0))];
        let txs = vec![
            expense(200.0, "Jedzenie", date(2024, 3, 2)),
            expense(120.0, "Jedzenie", date(2024, 3, 18)),
            expense(999.0, "Jedzenie", date(2024, 2, 27)),
        ];
        let overview = evaluate_budgets(&txs, &categories, date(2024, 3, 20), &BudgetSettings::default());
        let row = &overview.categories[0];
        assert_eq!(row.spent, 320.0);
        assert_eq!(row.percentage, 80.0);
        assert_eq!(row.status, BudgetStatus::Warning);
        assert_eq!(row.remaining, 80.0);
        assert!(!overview.over_budget);
    }

    #[test]
    fn test_over_budget_alert_at_exact_limit() {
        let categories = vec![
            expense_category("Transport", Some(100.0)),
            expense_category("Rozrywka", Some(200.0)),
        ];
        let txs = vec![expense(100.0, "Transport", date(2024, 3, 2))];
        let overview = evaluate_budgets(&txs, &categories, date(2024, 3, 20), &BudgetSettings::default());
        assert!(overview.over_budget);
        assert_eq!(overview.exceeded().count(), 1);
        assert_eq!(overview.categories[0].remaining, 0.0);
        assert!((overview.utilization - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(overview.status, BudgetStatus::Good);
    }

    #[test]
    fn test_only_budgeted_expense_categories() {
        let categories = vec![
            expense_category("Jedzenie", Some(400.0)),
            expense_category("Ubrania", None),
            expense_category("Zdrowie", Some(0.0)),
            income_category("Wynagrodzenie"),
        ];
        let txs = vec![
            income(5000.0, "Wynagrodzenie", date(2024, 3, 1)),
            expense(50.0, "Ubrania", date(2024, 3, 2)),
        ];
        let overview = evaluate_budgets(&txs, &categories, date(2024, 3, 20), &BudgetSettings::default());
        assert_eq!(overview.categories.len(), 1);
        assert_eq!(overview.total_spent, 0.0);
        assert_eq!(overview.unbudgeted, vec!["Ubrania", "Zdrowie"]);
    }

    #[test]
    fn test_no_budgets_means_zero_utilization() {
        let overview = evaluate_budgets(&[], &[], date(2024, 3, 20), &BudgetSettings::default());
        assert_eq!(overview.utilization, 0.0);
        assert_eq!(overview.status, BudgetStatus::Good);
        assert!(!overview.over_budget);
    }

    #[test]
    fn test_untouched_budget_reports_positive_zero() {
        let categories = vec![expense_category("Rozrywka", Some(200.0))];
        let txs = vec![income(1000.0, "Wynagrodzenie", date(2024, 3, 1))];
        let overview = evaluate_budgets(&txs, &categories, date(2024, 3, 20), &BudgetSettings::default());

        let row = &overview.categories[0];
        assert!(row.spent.is_sign_positive());
        assert!(row.percentage.is_sign_positive());
        assert!(overview.total_spent.is_sign_positive());
        assert!(overview.utilization.is_sign_positive());
        assert_eq!(format!("{:.0}%", row.percentage), "0%");

        let empty = evaluate_budgets(&[], &[], date(2024, 3, 20), &BudgetSettings::default());
        assert!(empty.total_budget.is_sign_positive());
        assert!(empty.total_spent.is_sign_positive());
    }

    #[test]
    fn test_duplicate_names_evaluated_independently() {
        let categories = vec![
            expense_category("Jedzenie", Some(400.0)),
            expense_category("Jedzenie", Some(100.0)),
        ];
        let txs = vec![expense(150.0, "Jedzenie", date(2024, 3, 2))];
        let overview = evaluate_budgets(&txs, &categories, date(2024, 3, 20), &BudgetSettings::default());
        assert_eq!(overview.categories.len(), 2);
        assert_eq!(overview.total_spent, 300.0);
        assert_eq!(overview.categories[1].status, BudgetStatus::Over);
    }
}
