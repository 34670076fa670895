//! Input validation at the boundary
//!
//! Every user-supplied record passes through here before it reaches a
//! collection. Failures carry one message per rejected field so a front end
//! can show them next to the offending input.

use chrono::NaiveDate;

use crate::error::{Error, FieldErrors, Result};
use crate::models::{NewGoal, NewTransaction};

/// Parse a user-entered amount, accepting a comma as decimal separator
///
/// Rejects empty, non-numeric, non-finite and non-positive input.
pub fn parse_amount(input: &str) -> Result<f64> {
    let normalized = input.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(Error::invalid_field("amount", "Enter a valid amount")),
    }
}

/// Parse an ISO calendar date (YYYY-MM-DD)
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| Error::invalid_field("date", "Enter a date as YYYY-MM-DD"))
}

pub fn validate_transaction(tx: &NewTransaction) -> Result<()> {
    let mut errors = FieldErrors::default();
    if !is_positive_amount(tx.amount) {
        errors.push("amount", "Enter a valid amount");
    }
    if tx.category.trim().is_empty() {
        errors.push("category", "Choose a category");
    }
    errors.into_result()
}

/// Budget limits may be absent or zero, but never negative
pub fn validate_budget(budget: Option<f64>) -> Result<()> {
    match budget {
        Some(b) if !b.is_finite() || b < 0.0 => Err(Error::invalid_field(
            "budget",
            "Budget must be a non-negative number",
        )),
        _ => Ok(()),
    }
}

pub fn validate_category_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_field("name", "Category name is required"));
    }
    Ok(())
}

pub fn validate_goal(goal: &NewGoal) -> Result<()> {
    let mut errors = FieldErrors::default();
    if goal.name.trim().is_empty() {
        errors.push("name", "Goal name is required");
    }
    if !is_positive_amount(goal.target_amount) {
        errors.push("targetAmount", "Target amount must be greater than zero");
    }
    if !goal.current_amount.is_finite() || goal.current_amount < 0.0 {
        errors.push("currentAmount", "Current amount cannot be negative");
    }
    errors.into_result()
}

fn is_positive_amount(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
