//! Status-related command implementations (status, dashboard)

use anyhow::Result;
use budgetify_core::aggregate::month_snapshot;
use budgetify_core::{
    evaluate_budgets, BudgetOverview, BudgetStatus, GoalOverview, GoalStatus, MonthSnapshot,
    CATEGORIES_KEY, GOALS_KEY,
};
use serde::Serialize;

use super::{progress_bar, truncate, Session};

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub data_dir: String,
    pub config_file: Option<String>,
    pub categories_stored: bool,
    pub goals_stored: bool,
    pub categories: usize,
    pub budgeted_categories: usize,
    pub goals: usize,
    pub transactions: usize,
    pub as_of: String,
    pub currency: String,
}

/// Gather what `status` shows
pub fn status_report(session: &Session) -> Result<StatusReport> {
    let store = session.store.as_ref();
    let categories = session.categories();
    let goals = session.goals();

    Ok(StatusReport {
        data_dir: session.config.data_dir().display().to_string(),
        config_file: session
            .config_path
            .as_ref()
            .map(|p| p.display().to_string()),
        categories_stored: store.load(CATEGORIES_KEY)?.is_some(),
        goals_stored: store.load(GOALS_KEY)?.is_some(),
        categories: categories.list().len(),
        budgeted_categories: categories
            .list()
            .iter()
            .filter(|c| c.budget_limit().is_some())
            .count(),
        goals: goals.list().len(),
        transactions: session.ledger.len(),
        as_of: session.as_of.to_string(),
        currency: session.config.currency.clone(),
    })
}

pub fn cmd_status(session: &Session) -> Result<()> {
    let report = status_report(session)?;
    if session.emit(&report)? {
        return Ok(());
    }

    println!();
    println!("📊 Budgetify Status");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Data directory: {}", report.data_dir);
    match &report.config_file {
        Some(path) => println!("   Config: {}", path),
        None => println!("   Config: (built-in defaults)"),
    }
    println!("   Currency: {}", report.currency);
    println!("   As of: {}", report.as_of);
    println!();

    if report.categories_stored {
        println!(
            "   Categories: {} ({} with a budget)",
            report.categories, report.budgeted_categories
        );
    } else {
        println!("   Categories: defaults (not yet saved, run 'budgetify init')");
    }
    println!("   Goals: {}", report.goals);
    match &session.transactions_path {
        Some(path) => println!(
            "   Transactions: {} (from {})",
            report.transactions,
            path.display()
        ),
        None => println!("   Transactions: none loaded (use --transactions FILE)"),
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct Dashboard {
    month: MonthSnapshot,
    budget: BudgetOverview,
    goals: GoalOverview,
    urgent_goals: Vec<String>,
}

pub fn cmd_dashboard(session: &Session) -> Result<()> {
    let transactions = session.transactions();
    let categories = session.categories();
    let goals = session.goals();

    let month = month_snapshot(transactions, session.as_of);
    let budget = evaluate_budgets(
        transactions,
        categories.list(),
        session.as_of,
        &session.config.budget,
    );
    let urgent_goals: Vec<String> = goals
        .progress(session.as_of, &session.config.goals)
        .into_iter()
        .filter(|p| matches!(p.status, GoalStatus::Urgent | GoalStatus::Overdue))
        .map(|p| p.name)
        .collect();

    let dashboard = Dashboard {
        month,
        budget,
        goals: goals.overview(),
        urgent_goals,
    };

    if session.emit(&dashboard)? {
        return Ok(());
    }

    let month = &dashboard.month;
    println!();
    println!("📊 Budgetify Dashboard - {}", month.month.label());
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Income:   {:>16}", session.money(month.income));
    println!("   Expenses: {:>16}", session.money(month.expense));
    println!("   Balance:  {:>16}", session.money(month.balance));
    println!(
        "   Transactions: {}   Avg expense: {}",
        month.transaction_count,
        session.money(month.avg_expense)
    );

    if !month.top_categories.is_empty() {
        println!();
        println!("   💸 Top Spending");
        for cat in &month.top_categories {
            println!(
                "      {:22} {:>16}",
                truncate(&cat.name, 22),
                session.money(cat.amount)
            );
        }
    }

    let budget = &dashboard.budget;
    if !budget.categories.is_empty() {
        let icon = match budget.status {
            BudgetStatus::Good => "🟢",
            BudgetStatus::Warning => "🟡",
            BudgetStatus::Over => "🔴",
        };
        println!();
        println!(
            "   {} Budget: {} of {} ({:.0}%)",
            icon,
            session.money(budget.total_spent),
            session.money(budget.total_budget),
            budget.utilization
        );
        println!("      {}", progress_bar(budget.utilization, 30));
        for row in budget.exceeded() {
            println!(
                "      ⚠️  {} over by {}",
                row.name,
                session.money(row.spent - row.budget)
            );
        }
    }

    let goals = &dashboard.goals;
    if goals.count > 0 {
        println!();
        println!(
            "   🎯 Goals: {} saved of {} ({:.0}%), {} of {} completed",
            session.money(goals.total_current),
            session.money(goals.total_target),
            goals.overall_progress,
            goals.completed,
            goals.count
        );
        for name in &dashboard.urgent_goals {
            println!("      ⏰ {} needs attention", name);
        }
    }

    if session.ledger.is_empty() {
        println!();
        session.print_no_transactions();
    }

    Ok(())
}
