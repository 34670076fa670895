//! Aggregation of transactions into report records
//!
//! Every function here is pure: it reads a slice of transactions and
//! returns plain serializable records. Ratios go through [`crate::ratio`]
//! so empty inputs produce zeros rather than NaN.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::filter::filter_in_month;
use crate::models::{month_abbreviation, MonthKey, Transaction, TransactionType};
use crate::ratio::{percent_of, safe_ratio, total};

/// Label used for transactions with an empty category name
pub const UNCATEGORIZED: &str = "Inne";

/// Category name as it appears in reports
pub fn category_label(name: &str) -> &str {
    if name.trim().is_empty() {
        UNCATEGORIZED
    } else {
        name
    }
}

/// Totals for one observed calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub month: MonthKey,
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
    pub transaction_count: usize,
    /// Mean absolute value across all transactions of the month
    pub avg_transaction_value: f64,
    /// Balance as a percentage of income, 0 when there was no income
    pub savings_rate: f64,
}

/// Spending pattern of one category across the input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPattern {
    pub name: String,
    pub total: f64,
    pub count: usize,
    /// Number of distinct months with at least one transaction
    pub distinct_months: usize,
    /// Total per active month
    pub average: f64,
}

/// Expense total for a month of the year, ignoring the year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarMonthTotal {
    /// 1 = January
    pub month: u32,
    pub label: String,
    pub amount: f64,
}

/// A ranked expense category with its share of the largest one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub name: String,
    pub amount: f64,
    pub count: usize,
    pub percentage: f64,
}

/// Headline statistics over a filtered period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub savings_rate: f64,
    pub transaction_count: usize,
    /// Number of months with at least one transaction
    pub months: usize,
    pub avg_monthly_income: f64,
    pub avg_monthly_expense: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearTotals {
    pub year: i32,
    pub income: f64,
    pub expense: f64,
}

/// Current year against the previous one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearOverYear {
    pub current: YearTotals,
    pub previous: YearTotals,
    /// Percent change, 0 when the previous year had nothing to compare with
    pub income_change: f64,
    pub expense_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub income: f64,
    pub expense: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAmount {
    pub name: String,
    pub amount: f64,
}

/// The current calendar month at a glance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSnapshot {
    pub month: MonthKey,
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
    pub transaction_count: usize,
    /// Mean amount per expense transaction
    pub avg_expense: f64,
    pub top_categories: Vec<CategoryAmount>,
}

pub fn sum_by_type(transactions: &[Transaction], kind: TransactionType) -> f64 {
    total(
        transactions
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.amount),
    )
}

/// Income minus expense
pub fn balance(transactions: &[Transaction]) -> f64 {
    sum_by_type(transactions, TransactionType::Income)
        - sum_by_type(transactions, TransactionType::Expense)
}

/// One summary per observed month, oldest first
pub fn group_by_month(transactions: &[Transaction]) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<MonthKey, (f64, f64, usize)> = BTreeMap::new();
    for tx in transactions {
        let entry = months.entry(tx.month()).or_insert((0.0, 0.0, 0));
        match tx.kind {
            TransactionType::Income => entry.0 += tx.amount,
            TransactionType::Expense => entry.1 += tx.amount,
        }
        entry.2 += 1;
    }

    months
        .into_iter()
        .map(|(month, (income, expense, count))| {
            let balance = income - expense;
            MonthlySummary {
                month,
                income,
                expense,
                balance,
                transaction_count: count,
                avg_transaction_value: safe_ratio(income + expense, count as f64),
                savings_rate: percent_of(balance, income),
            }
        })
        .collect()
}

/// Per-category totals for one transaction type, largest first
pub fn group_by_category(transactions: &[Transaction], kind: TransactionType) -> Vec<CategoryPattern> {
    let mut groups: HashMap<&str, (f64, usize, BTreeSet<MonthKey>)> = HashMap::new();
    for tx in transactions.iter().filter(|t| t.kind == kind) {
        let entry = groups
            .entry(category_label(&tx.category))
            .or_insert_with(|| (0.0, 0, BTreeSet::new()));
        entry.0 += tx.amount;
        entry.1 += 1;
        entry.2.insert(tx.month());
    }

    let mut patterns: Vec<CategoryPattern> = groups
        .into_iter()
        .map(|(name, (total, count, months))| CategoryPattern {
            name: name.to_string(),
            total,
            count,
            distinct_months: months.len(),
            average: safe_ratio(total, months.len() as f64),
        })
        .collect();

    patterns.sort_by(|a, b| b.total.total_cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    patterns
}

/// Expense totals for January through December, summed across years
pub fn group_by_calendar_month_of_year(transactions: &[Transaction]) -> Vec<CalendarMonthTotal> {
    let mut buckets = [0.0_f64; 12];
    for tx in transactions.iter().filter(|t| t.is_expense()) {
        buckets[tx.date.month0() as usize] += tx.amount;
    }

    buckets
        .iter()
        .zip(1u32..)
        .map(|(amount, month)| CalendarMonthTotal {
            month,
            label: month_abbreviation(month).to_string(),
            amount: *amount,
        })
        .collect()
}

/// The `limit` largest expense categories, scaled against the largest one
pub fn top_categories(transactions: &[Transaction], limit: usize) -> Vec<CategoryShare> {
    let patterns = group_by_category(transactions, TransactionType::Expense);
    let max = patterns.first().map(|p| p.total).unwrap_or(0.0);

    patterns
        .into_iter()
        .take(limit)
        .map(|p| CategoryShare {
            percentage: percent_of(p.total, max),
            name: p.name,
            amount: p.total,
            count: p.count,
        })
        .collect()
}

pub fn period_summary(transactions: &[Transaction]) -> PeriodSummary {
    let total_income = sum_by_type(transactions, TransactionType::Income);
    let total_expense = sum_by_type(transactions, TransactionType::Expense);
    let balance = total_income - total_expense;
    let months: BTreeSet<MonthKey> = transactions.iter().map(|t| t.month()).collect();
    let month_count = months.len() as f64;

    PeriodSummary {
        total_income,
        total_expense,
        balance,
        savings_rate: percent_of(balance, total_income),
        transaction_count: transactions.len(),
        months: months.len(),
        avg_monthly_income: safe_ratio(total_income, month_count),
        avg_monthly_expense: safe_ratio(total_expense, month_count),
    }
}

fn year_totals(transactions: &[Transaction], year: i32) -> YearTotals {
    let in_year: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.date.year() == year)
        .cloned()
        .collect();
    YearTotals {
        year,
        income: sum_by_type(&in_year, TransactionType::Income),
        expense: sum_by_type(&in_year, TransactionType::Expense),
    }
}

/// Compare the calendar year of `as_of` with the year before
pub fn year_over_year(transactions: &[Transaction], as_of: NaiveDate) -> YearOverYear {
    let current = year_totals(transactions, as_of.year());
    let previous = year_totals(transactions, as_of.year() - 1);

    YearOverYear {
        income_change: percent_of(current.income - previous.income, previous.income),
        expense_change: percent_of(current.expense - previous.expense, previous.expense),
        current,
        previous,
    }
}

pub fn daily_totals(transactions: &[Transaction]) -> Vec<DailyTotal> {
    let mut days: BTreeMap<NaiveDate, DailyTotal> = BTreeMap::new();
    for tx in transactions {
        let day = days.entry(tx.date).or_insert_with(|| DailyTotal {
            date: tx.date,
            income: 0.0,
            expense: 0.0,
            count: 0,
        });
        match tx.kind {
            TransactionType::Income => day.income += tx.amount,
            TransactionType::Expense => day.expense += tx.amount,
        }
        day.count += 1;
    }
    days.into_values().collect()
}

pub fn month_snapshot(transactions: &[Transaction], as_of: NaiveDate) -> MonthSnapshot {
    let month = MonthKey::from_date(as_of);
    let in_month = filter_in_month(transactions, month);
    let income = sum_by_type(&in_month, TransactionType::Income);
    let expense = sum_by_type(&in_month, TransactionType::Expense);
    let expense_count = in_month.iter().filter(|t| t.is_expense()).count();

    let top = group_by_category(&in_month, TransactionType::Expense)
        .into_iter()
        .take(3)
        .map(|p| CategoryAmount {
            name: p.name,
            amount: p.total,
        })
        .collect();

    MonthSnapshot {
        month,
        income,
        expense,
        balance: income - expense,
        transaction_count: in_month.len(),
        avg_expense: safe_ratio(expense, expense_count as f64),
        top_categories: top,
    }
}
