//! Report command implementations

use anyhow::Result;
use budgetify_core::aggregate::{
    daily_totals, group_by_calendar_month_of_year, group_by_category, group_by_month,
    period_summary, top_categories, year_over_year,
};
use budgetify_core::filter::{filter_by_category, filter_in_month};
use budgetify_core::{
    evaluate_budgets, AnalysisContext, BudgetStatus, FindingKind, Forecaster, InsightEngine,
    MonthKey, Transaction, TransactionFilter, TransactionType,
};
use serde::Serialize;

use super::{progress_bar, truncate, Session};

/// Transactions inside `--range` (or the configured default) and an optional category
fn in_range(session: &Session, range: Option<&str>, category: Option<&str>) -> Result<Vec<Transaction>> {
    let range = session.range(range)?;
    Ok(TransactionFilter::new()
        .range(range, session.as_of)
        .category(category)
        .apply(session.transactions()))
}

fn signed(amount: f64) -> String {
    if amount >= 0.0 {
        format!("+{:.1}%", amount)
    } else {
        format!("{:.1}%", amount)
    }
}

pub fn cmd_report_monthly(
    session: &Session,
    range: Option<&str>,
    category: Option<&str>,
) -> Result<()> {
    let transactions = in_range(session, range, category)?;
    let months = group_by_month(&transactions);
    let summary = period_summary(&transactions);

    #[derive(Serialize)]
    struct Monthly<'a> {
        months: &'a [budgetify_core::MonthlySummary],
        summary: &'a budgetify_core::PeriodSummary,
    }
    if session.emit(&Monthly {
        months: &months,
        summary: &summary,
    })? {
        return Ok(());
    }

    println!();
    println!("📅 Monthly Summary");
    println!("   Range: {}", session.range(range)?);
    if let Some(cat) = category {
        println!("   Category: {}", cat);
    }
    println!("   ─────────────────────────────────────────────────────────────");

    if months.is_empty() {
        session.print_no_transactions();
        return Ok(());
    }

    println!(
        "   {:10} │ {:>14} │ {:>14} │ {:>14} │ {:>7} │ {:>5}",
        "Month", "Income", "Expenses", "Balance", "Saved", "Count"
    );
    println!("   ───────────┼────────────────┼────────────────┼────────────────┼─────────┼───────");
    for m in &months {
        println!(
            "   {:10} │ {:>14} │ {:>14} │ {:>14} │ {:>6.1}% │ {:>5}",
            m.month.label(),
            session.money(m.income),
            session.money(m.expense),
            session.money(m.balance),
            m.savings_rate,
            m.transaction_count
        );
    }

    println!();
    println!(
        "   Total: {} in, {} out, balance {} ({:.1}% saved)",
        session.money(summary.total_income),
        session.money(summary.total_expense),
        session.money(summary.balance),
        summary.savings_rate
    );
    println!(
        "   Monthly average over {} months: {} in, {} out",
        summary.months,
        session.money(summary.avg_monthly_income),
        session.money(summary.avg_monthly_expense)
    );

    Ok(())
}

pub fn cmd_report_categories(session: &Session, range: Option<&str>, kind: &str) -> Result<()> {
    let kind: TransactionType = kind.parse().map_err(anyhow::Error::msg)?;
    let transactions = in_range(session, range, None)?;
    let patterns = group_by_category(&transactions, kind);

    if session.emit(&patterns)? {
        return Ok(());
    }

    let total = budgetify_core::ratio::total(patterns.iter().map(|p| p.total));
    println!();
    println!("🏷️  Categories ({})", kind);
    println!("   Range: {}", session.range(range)?);
    println!("   ─────────────────────────────────────────────────────────────");

    if patterns.is_empty() {
        session.print_no_transactions();
        return Ok(());
    }

    println!(
        "   {:22} │ {:>14} │ {:>6} │ {:>5} │ {:>14}",
        "Category", "Total", "%", "Count", "Per month"
    );
    println!("   ───────────────────────┼────────────────┼────────┼───────┼───────────────");
    for p in &patterns {
        println!(
            "   {:22} │ {:>14} │ {:>5.1}% │ {:>5} │ {:>14}",
            truncate(&p.name, 22),
            session.money(p.total),
            budgetify_core::ratio::percent_of(p.total, total),
            p.count,
            session.money(p.average)
        );
    }

    Ok(())
}

pub fn cmd_report_seasonality(session: &Session, range: Option<&str>) -> Result<()> {
    let transactions = in_range(session, range, None)?;
    let months = group_by_calendar_month_of_year(&transactions);

    if session.emit(&months)? {
        return Ok(());
    }

    println!();
    println!("🌦️  Spending by Month of Year");
    println!("   Range: {}", session.range(range)?);
    println!("   ─────────────────────────────────────────────────────────────");

    let max = months.iter().map(|m| m.amount).fold(0.0_f64, f64::max);
    if max <= 0.0 {
        session.print_no_transactions();
        return Ok(());
    }

    for m in &months {
        println!(
            "   {:3} {:>14}  {}",
            m.label,
            session.money(m.amount),
            progress_bar(budgetify_core::ratio::percent_of(m.amount, max), 30)
        );
    }

    Ok(())
}

pub fn cmd_report_top(session: &Session, range: Option<&str>, limit: Option<usize>) -> Result<()> {
    let transactions = in_range(session, range, None)?;
    let limit = limit.unwrap_or(session.config.reports.top_categories);
    let top = top_categories(&transactions, limit);

    if session.emit(&top)? {
        return Ok(());
    }

    println!();
    println!("💸 Top {} Expense Categories", limit);
    println!("   Range: {}", session.range(range)?);
    println!("   ─────────────────────────────────────────────────────────────");

    if top.is_empty() {
        session.print_no_transactions();
        return Ok(());
    }

    for (i, share) in top.iter().enumerate() {
        println!(
            "   {:>2}. {:22} {:>14}  {} ({} tx)",
            i + 1,
            truncate(&share.name, 22),
            session.money(share.amount),
            progress_bar(share.percentage, 20),
            share.count
        );
    }

    Ok(())
}

pub fn cmd_report_year_over_year(session: &Session) -> Result<()> {
    let yoy = year_over_year(session.transactions(), session.as_of);

    if session.emit(&yoy)? {
        return Ok(());
    }

    println!();
    println!("📈 Year over Year");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:10} │ {:>16} │ {:>16}",
        "", yoy.previous.year, yoy.current.year
    );
    println!("   ───────────┼──────────────────┼──────────────────");
    println!(
        "   {:10} │ {:>16} │ {:>16}   {}",
        "Income",
        session.money(yoy.previous.income),
        session.money(yoy.current.income),
        signed(yoy.income_change)
    );
    println!(
        "   {:10} │ {:>16} │ {:>16}   {}",
        "Expenses",
        session.money(yoy.previous.expense),
        session.money(yoy.current.expense),
        signed(yoy.expense_change)
    );

    Ok(())
}

pub fn cmd_report_budget(session: &Session) -> Result<()> {
    let categories = session.categories();
    let overview = evaluate_budgets(
        session.transactions(),
        categories.list(),
        session.as_of,
        &session.config.budget,
    );

    if session.emit(&overview)? {
        return Ok(());
    }

    println!();
    println!("💰 Budgets - {}", overview.month.label());
    println!("   ─────────────────────────────────────────────────────────────");

    if overview.categories.is_empty() {
        println!("   No budgets set. Try: budgetify categories budget Jedzenie 1200");
        return Ok(());
    }

    println!(
        "   {:20} │ {:>13} │ {:>13} │ {:>13} │ {:>6}",
        "Category", "Spent", "Budget", "Left", "%"
    );
    println!("   ─────────────────────┼───────────────┼───────────────┼───────────────┼────────");
    for row in &overview.categories {
        let icon = match row.status {
            BudgetStatus::Good => "🟢",
            BudgetStatus::Warning => "🟡",
            BudgetStatus::Over => "🔴",
        };
        println!(
            "   {:20} │ {:>13} │ {:>13} │ {:>13} │ {:>5.0}% {}",
            truncate(&row.name, 20),
            session.money(row.spent),
            session.money(row.budget),
            session.money(row.remaining),
            row.percentage,
            icon
        );
    }

    println!();
    println!(
        "   Total: {} of {} ({:.1}%), {} left",
        session.money(overview.total_spent),
        session.money(overview.total_budget),
        overview.utilization,
        session.money(overview.total_remaining)
    );
    if overview.over_budget {
        println!("   ⚠️  Some categories are over budget this month");
    }
    if !overview.unbudgeted.is_empty() {
        println!("   Without a budget: {}", overview.unbudgeted.join(", "));
    }

    Ok(())
}

pub fn cmd_report_forecast(session: &Session, range: Option<&str>) -> Result<()> {
    let transactions = in_range(session, range, None)?;
    let forecaster = Forecaster::with_settings(session.config.forecast);
    let points = forecaster.forecast_transactions(&transactions, session.as_of);

    if session.emit(&points)? {
        return Ok(());
    }

    println!();
    println!("🔮 Forecast");
    println!("   ─────────────────────────────────────────────────────────────");

    if points.is_empty() {
        println!(
            "   Not enough history: at least {} months of transactions are needed.",
            forecaster.settings().min_history_months
        );
        return Ok(());
    }

    println!(
        "   {:10} │ {:>14} │ {:>14} │ {:>14} │ {:>10}",
        "Month", "Income", "Expenses", "Balance", "Confidence"
    );
    println!("   ───────────┼────────────────┼────────────────┼────────────────┼───────────");
    for p in &points {
        println!(
            "   {:10} │ {:>14} │ {:>14} │ {:>14} │ {:>9}%",
            p.label,
            session.money(p.predicted_income),
            session.money(p.predicted_expense),
            session.money(p.predicted_balance),
            p.confidence
        );
    }

    Ok(())
}

pub fn cmd_report_insights(session: &Session, range: Option<&str>) -> Result<()> {
    let transactions = in_range(session, range, None)?;
    let ctx = AnalysisContext::new(&transactions, session.as_of)
        .with_currency(session.config.currency.clone())
        .with_forecast_settings(session.config.forecast);
    let findings = InsightEngine::new().analyze_all(&ctx);

    if session.emit(&findings)? {
        return Ok(());
    }

    println!();
    println!("💡 Insights");
    println!("   ─────────────────────────────────────────────────────────────");

    if findings.is_empty() {
        session.print_no_transactions();
        return Ok(());
    }

    for finding in &findings {
        let icon = match finding.kind {
            FindingKind::Positive => "📈",
            FindingKind::Negative => "📉",
            FindingKind::Warning => "⚠️ ",
            FindingKind::Info => "ℹ️ ",
        };
        println!("   {} {}", icon, finding.title);
        println!("      {}", finding.description);
    }

    Ok(())
}

pub fn cmd_report_calendar(
    session: &Session,
    month: Option<&str>,
    category: Option<&str>,
) -> Result<()> {
    let month = match month {
        Some(m) => m.parse::<MonthKey>().map_err(anyhow::Error::msg)?,
        None => MonthKey::from_date(session.as_of),
    };
    let in_month = filter_in_month(session.transactions(), month);
    let selected = filter_by_category(&in_month, category);
    let days = daily_totals(&selected);

    if session.emit(&days)? {
        return Ok(());
    }

    println!();
    println!("🗓️  Calendar - {}", month.label());
    if let Some(cat) = category {
        println!("   Category: {}", cat);
    }
    println!("   ─────────────────────────────────────────────────────────────");

    if days.is_empty() {
        session.print_no_transactions();
        return Ok(());
    }

    println!(
        "   {:10} │ {:>14} │ {:>14} │ {:>5}",
        "Date", "Income", "Expenses", "Count"
    );
    println!("   ───────────┼────────────────┼────────────────┼───────");
    for day in &days {
        println!(
            "   {:10} │ {:>14} │ {:>14} │ {:>5}",
            day.date,
            session.money(day.income),
            session.money(day.expense),
            day.count
        );
    }

    Ok(())
}
