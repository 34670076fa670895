//! Transaction filtering
//!
//! Filters never mutate their input and always preserve the relative order
//! of the transactions they keep. Range and category filters compose by
//! intersection, in either order.

use std::fmt;
use std::str::FromStr;

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{MonthKey, Transaction, TransactionType};

/// Look-back window for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TimeRange {
    #[serde(rename = "3months")]
    ThreeMonths,
    #[serde(rename = "6months")]
    SixMonths,
    #[default]
    #[serde(rename = "1year")]
    OneYear,
    #[serde(rename = "2years")]
    TwoYears,
    #[serde(rename = "all")]
    All,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThreeMonths => "3months",
            Self::SixMonths => "6months",
            Self::OneYear => "1year",
            Self::TwoYears => "2years",
            Self::All => "all",
        }
    }

    /// Length of the window in calendar months, `None` for unbounded
    pub fn months(&self) -> Option<u32> {
        match self {
            Self::ThreeMonths => Some(3),
            Self::SixMonths => Some(6),
            Self::OneYear => Some(12),
            Self::TwoYears => Some(24),
            Self::All => None,
        }
    }

    /// Exclusive lower bound of the window ending at `as_of`
    ///
    /// Month subtraction clamps to the end of shorter months, so 31 May minus
    /// three months is 28 or 29 February.
    pub fn cutoff(&self, as_of: NaiveDate) -> Option<NaiveDate> {
        let months = self.months()?;
        Some(
            as_of
                .checked_sub_months(Months::new(months))
                .unwrap_or(NaiveDate::MIN),
        )
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "3months" | "3m" => Ok(Self::ThreeMonths),
            "6months" | "6m" => Ok(Self::SixMonths),
            "1year" | "1y" | "12months" => Ok(Self::OneYear),
            "2years" | "2y" | "24months" => Ok(Self::TwoYears),
            "all" => Ok(Self::All),
            _ => Err(format!(
                "Unknown time range: {} (valid: 3months, 6months, 1year, 2years, all)",
                s
            )),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Keep transactions dated strictly after `as_of - range`
pub fn filter_by_range(
    transactions: &[Transaction],
    range: TimeRange,
    as_of: NaiveDate,
) -> Vec<Transaction> {
    match range.cutoff(as_of) {
        None => transactions.to_vec(),
        Some(cutoff) => transactions
            .iter()
            .filter(|t| t.date > cutoff)
            .cloned()
            .collect(),
    }
}

/// Keep transactions whose category equals `category` exactly
///
/// `None` or an empty string means "all categories".
pub fn filter_by_category(transactions: &[Transaction], category: Option<&str>) -> Vec<Transaction> {
    match category.filter(|c| !c.is_empty()) {
        None => transactions.to_vec(),
        Some(name) => transactions
            .iter()
            .filter(|t| t.category == name)
            .cloned()
            .collect(),
    }
}

pub fn filter_on_date(transactions: &[Transaction], date: NaiveDate) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| t.date == date)
        .cloned()
        .collect()
}

pub fn filter_in_month(transactions: &[Transaction], month: MonthKey) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| month.contains(t.date))
        .cloned()
        .collect()
}

/// Builder that composes the individual predicates
///
/// The lifetime `'query` is how long the borrowed category name must live.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter<'query> {
    pub range: Option<(TimeRange, NaiveDate)>,
    pub category: Option<&'query str>,
    pub kind: Option<TransactionType>,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl<'query> TransactionFilter<'query> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit to the window of `range` ending at `as_of`
    pub fn range(mut self, range: TimeRange, as_of: NaiveDate) -> Self {
        self.range = Some((range, as_of));
        self
    }

    pub fn category(mut self, category: Option<&'query str>) -> Self {
        self.category = category;
        self
    }

    pub fn kind(mut self, kind: Option<TransactionType>) -> Self {
        self.kind = kind;
        self
    }

    /// Inclusive on both ends
    pub fn date_range(mut self, range: Option<(NaiveDate, NaiveDate)>) -> Self {
        self.date_range = range;
        self
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some((range, as_of)) = self.range {
            if let Some(cutoff) = range.cutoff(as_of) {
                if tx.date <= cutoff {
                    return false;
                }
            }
        }

        if let Some(name) = self.category.filter(|c| !c.is_empty()) {
            if tx.category != name {
                return false;
            }
        }

        if let Some(kind) = self.kind {
            if tx.kind != kind {
                return false;
            }
        }

        if let Some((from, to)) = self.date_range {
            if tx.date < from || tx.date > to {
                return false;
            }
        }

        true
    }

    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect()
    }
}
