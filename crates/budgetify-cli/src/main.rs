//! Budgetify CLI - Budgets, savings goals and spending trends
//!
//! Usage:
//!   budgetify init                               Seed default categories
//!   budgetify -t history.csv dashboard           This month at a glance
//!   budgetify -t history.csv report monthly      Monthly income/expense/balance
//!   budgetify goals add "Wakacje" --target 5000 --date 2025-07-01

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so `--json` output stays parseable
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let options = commands::SessionOptions {
        config: cli.config.clone(),
        data_dir: cli.data_dir.clone(),
        transactions: cli.transactions.clone(),
        as_of: cli.as_of.clone(),
        json: cli.json,
    };
    let session = commands::open_session(&options)?;

    match cli.command {
        Commands::Init => commands::cmd_init(&session),
        Commands::Status => commands::cmd_status(&session),
        Commands::Dashboard => commands::cmd_dashboard(&session),
        Commands::Transactions { action } => match action {
            None => commands::cmd_transactions_list(&session, None, None, None, 20),
            Some(TransactionsAction::List {
                range,
                category,
                kind,
                limit,
            }) => commands::cmd_transactions_list(
                &session,
                range.as_deref(),
                category.as_deref(),
                kind.as_deref(),
                limit,
            ),
        },
        Commands::Categories { action } => match action {
            None => commands::cmd_categories_list(&session, None),
            Some(CategoriesAction::List { kind }) => {
                commands::cmd_categories_list(&session, kind.as_deref())
            }
            Some(CategoriesAction::Add { name, kind, budget }) => {
                commands::cmd_categories_add(&session, &name, &kind, budget.as_deref())
            }
            Some(CategoriesAction::Edit {
                category,
                name,
                kind,
                budget,
                clear_budget,
            }) => commands::cmd_categories_edit(
                &session,
                &category,
                commands::CategoryEdit {
                    name,
                    kind,
                    budget,
                    clear_budget,
                },
            ),
            Some(CategoriesAction::Delete { category }) => {
                commands::cmd_categories_delete(&session, &category)
            }
            Some(CategoriesAction::Budget { category, amount }) => {
                commands::cmd_categories_budget(&session, &category, amount.as_deref())
            }
            Some(CategoriesAction::Reset) => commands::cmd_categories_reset(&session),
        },
        Commands::Goals { action } => match action {
            None | Some(GoalsAction::List) => commands::cmd_goals_list(&session),
            Some(GoalsAction::Add {
                name,
                target,
                date,
                current,
                category,
                description,
            }) => commands::cmd_goals_add(
                &session,
                commands::GoalFields {
                    name: Some(name),
                    target: Some(target),
                    date: Some(date),
                    current,
                    category: Some(category),
                    description,
                },
            ),
            Some(GoalsAction::Edit {
                goal,
                name,
                target,
                date,
                current,
                category,
                description,
            }) => commands::cmd_goals_edit(
                &session,
                &goal,
                commands::GoalFields {
                    name,
                    target,
                    date,
                    current,
                    category,
                    description,
                },
            ),
            Some(GoalsAction::Fund { goal, amount }) => {
                commands::cmd_goals_fund(&session, &goal, &amount)
            }
            Some(GoalsAction::Delete { goal }) => commands::cmd_goals_delete(&session, &goal),
        },
        Commands::Report { report_type } => match report_type {
            ReportType::Monthly { range, category } => {
                commands::cmd_report_monthly(&session, range.as_deref(), category.as_deref())
            }
            ReportType::Categories { range, kind } => {
                commands::cmd_report_categories(&session, range.as_deref(), &kind)
            }
            ReportType::Seasonality { range } => {
                commands::cmd_report_seasonality(&session, range.as_deref())
            }
            ReportType::Top { range, limit } => {
                commands::cmd_report_top(&session, range.as_deref(), limit)
            }
            ReportType::YearOverYear => commands::cmd_report_year_over_year(&session),
            ReportType::Budget => commands::cmd_report_budget(&session),
            ReportType::Forecast { range } => {
                commands::cmd_report_forecast(&session, range.as_deref())
            }
            ReportType::Insights { range } => {
                commands::cmd_report_insights(&session, range.as_deref())
            }
            ReportType::Calendar { month, category } => {
                commands::cmd_report_calendar(&session, month.as_deref(), category.as_deref())
            }
        },
    }
}
