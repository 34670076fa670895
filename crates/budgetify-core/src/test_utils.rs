//! Test utilities for budgetify-core
//!
//! Small builders for transactions, categories and goals so tests can state
//! their fixtures in one line each.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::models::{
    Category, CategoryId, Goal, GoalCategory, GoalId, Transaction, TransactionId, TransactionType,
};

/// Calendar date shorthand; panics on an impossible date
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid test date {year}-{month}-{day}"))
}

pub fn transaction(kind: TransactionType, amount: f64, category: &str, on: NaiveDate) -> Transaction {
    Transaction {
        id: TransactionId::new(),
        kind,
        amount,
        category: category.to_string(),
        date: on,
        description: None,
    }
}

pub fn income(amount: f64, category: &str, on: NaiveDate) -> Transaction {
    transaction(TransactionType::Income, amount, category, on)
}

pub fn expense(amount: f64, category: &str, on: NaiveDate) -> Transaction {
    transaction(TransactionType::Expense, amount, category, on)
}

/// Custom expense category with an optional monthly budget
pub fn expense_category(name: &str, budget: Option<f64>) -> Category {
    Category {
        id: CategoryId::generate(),
        name: name.to_string(),
        kind: TransactionType::Expense,
        budget,
        is_custom: true,
    }
}

pub fn income_category(name: &str) -> Category {
    Category {
        id: CategoryId::generate(),
        name: name.to_string(),
        kind: TransactionType::Income,
        budget: None,
        is_custom: true,
    }
}

pub fn goal(name: &str, target: f64, current: f64, target_date: NaiveDate) -> Goal {
    let created = Utc
        .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);
    Goal {
        id: GoalId::generate(),
        name: name.to_string(),
        target_amount: target,
        current_amount: current,
        target_date,
        category: GoalCategory::Savings,
        description: String::new(),
        created_at: created,
        updated_at: created,
    }
}

/// Two months of history matching the worked example: January nets 800,
/// February nets -300.
pub fn two_month_history() -> Vec<Transaction> {
    vec![
        income(1000.0, "Wynagrodzenie", date(2024, 1, 5)),
        expense(200.0, "Jedzenie", date(2024, 1, 10)),
        expense(300.0, "Jedzenie", date(2024, 2, 3)),
    ]
}
