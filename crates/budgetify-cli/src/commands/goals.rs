//! Savings goal command implementations

use anyhow::{Context, Result};
use budgetify_core::validation::parse_date;
use budgetify_core::{Goal, GoalBook, GoalCategory, GoalProgress, GoalStatus, NewGoal};
use chrono::Utc;
use serde::Serialize;

use super::{parse_decimal, progress_bar, truncate, Session};

/// Raw goal fields from the command line; `None` keeps the current value on edit
#[derive(Debug, Clone, Default)]
pub struct GoalFields {
    pub name: Option<String>,
    pub target: Option<String>,
    pub date: Option<String>,
    pub current: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl GoalFields {
    /// Overlay these fields on `base`
    fn merge(self, base: NewGoal) -> Result<NewGoal> {
        Ok(NewGoal {
            name: self.name.unwrap_or(base.name),
            target_amount: match self.target {
                Some(t) => parse_decimal(&t, "target amount")?,
                None => base.target_amount,
            },
            current_amount: match self.current {
                Some(c) => parse_decimal(&c, "current amount")?,
                None => base.current_amount,
            },
            target_date: match self.date {
                Some(d) => parse_date(&d)?,
                None => base.target_date,
            },
            category: match self.category {
                Some(c) => c.parse::<GoalCategory>().map_err(anyhow::Error::msg)?,
                None => base.category,
            },
            description: self.description.unwrap_or(base.description),
        })
    }
}

fn to_input(goal: &Goal) -> NewGoal {
    NewGoal {
        name: goal.name.clone(),
        target_amount: goal.target_amount,
        current_amount: goal.current_amount,
        target_date: goal.target_date,
        category: goal.category,
        description: goal.description.clone(),
    }
}

fn find<'a>(book: &'a GoalBook, id_or_name: &str) -> Result<&'a Goal> {
    book.resolve(id_or_name)
        .with_context(|| format!("Goal not found: {}", id_or_name))
}

fn save(session: &Session, book: &GoalBook) -> Result<()> {
    book.save(session.store.as_ref())
        .context("Failed to save goals")
}

fn status_icon(status: GoalStatus) -> &'static str {
    match status {
        GoalStatus::Completed => "✅",
        GoalStatus::Overdue => "❌",
        GoalStatus::Urgent => "⏰",
        GoalStatus::Active => "🎯",
    }
}

#[derive(Debug, Serialize)]
struct GoalRow<'a> {
    #[serde(flatten)]
    goal: &'a Goal,
    progress: GoalProgress,
}

pub fn cmd_goals_list(session: &Session) -> Result<()> {
    let book = session.goals();
    let progress = book.progress(session.as_of, &session.config.goals);

    if session.json {
        let rows: Vec<GoalRow> = book
            .list()
            .iter()
            .zip(progress)
            .map(|(goal, progress)| GoalRow { goal, progress })
            .collect();
        return super::print_json(&rows);
    }

    println!();
    println!("🎯 Savings Goals");
    println!("   ─────────────────────────────────────────────────────────────");

    if book.list().is_empty() {
        println!("   No goals yet. Add one with: budgetify goals add NAME --target AMOUNT --date YYYY-MM-DD");
        return Ok(());
    }

    for (goal, p) in book.list().iter().zip(&progress) {
        println!(
            "   {} {} ({})",
            status_icon(p.status),
            truncate(&goal.name, 40),
            goal.category
        );
        println!(
            "      {} {:>5.1}%   {} of {}",
            progress_bar(p.percentage, 20),
            p.percentage,
            session.money(goal.current_amount),
            session.money(goal.target_amount)
        );
        let when = match p.status {
            GoalStatus::Completed => "reached".to_string(),
            GoalStatus::Overdue => format!("{} days overdue", -p.days_left),
            _ => format!("{} days left", p.days_left),
        };
        println!(
            "      Due {} ({}), {} to go",
            goal.target_date,
            when,
            session.money(p.remaining)
        );
    }

    let overview = book.overview();
    println!();
    println!(
        "   Total: {} of {} ({:.1}%), {} of {} completed",
        session.money(overview.total_current),
        session.money(overview.total_target),
        overview.overall_progress,
        overview.completed,
        overview.count
    );

    Ok(())
}

pub fn cmd_goals_add(session: &Session, fields: GoalFields) -> Result<()> {
    let name = fields.name.clone().context("Goal name is required")?;
    let target = fields.target.as_deref().context("--target is required")?;
    let date = fields.date.as_deref().context("--date is required")?;

    let base = NewGoal {
        name,
        target_amount: parse_decimal(target, "target amount")?,
        current_amount: 0.0,
        target_date: parse_date(date)?,
        category: GoalCategory::default(),
        description: String::new(),
    };
    let input = fields.merge(base)?;

    let mut book = session.goals();
    let added = book.add(input, Utc::now())?.clone();
    save(session, &book)?;

    if session.emit(&added)? {
        return Ok(());
    }
    println!("✅ Added goal '{}' ({})", added.name, added.id);
    Ok(())
}

pub fn cmd_goals_edit(session: &Session, id_or_name: &str, fields: GoalFields) -> Result<()> {
    let mut book = session.goals();
    let current = find(&book, id_or_name)?;
    let id = current.id.clone();
    let input = fields.merge(to_input(current))?;

    let updated = book.edit(&id, input, Utc::now())?.clone();
    save(session, &book)?;

    if session.emit(&updated)? {
        return Ok(());
    }
    println!("✅ Updated goal '{}'", updated.name);
    Ok(())
}

pub fn cmd_goals_fund(session: &Session, id_or_name: &str, amount: &str) -> Result<()> {
    let mut book = session.goals();
    let id = find(&book, id_or_name)?.id.clone();
    let updated = book.add_funds_str(&id, amount, Utc::now())?.clone();
    save(session, &book)?;

    if session.emit(&updated)? {
        return Ok(());
    }
    let progress = budgetify_core::evaluate_goal(&updated, session.as_of, &session.config.goals);
    println!(
        "💰 '{}' now at {} of {} ({:.1}%)",
        updated.name,
        session.money(updated.current_amount),
        session.money(updated.target_amount),
        progress.percentage
    );
    if progress.status == GoalStatus::Completed {
        println!("🎉 Goal reached!");
    }
    Ok(())
}

pub fn cmd_goals_delete(session: &Session, id_or_name: &str) -> Result<()> {
    let mut book = session.goals();
    let id = find(&book, id_or_name)?.id.clone();
    let removed = book.delete(&id)?;
    save(session, &book)?;

    if session.emit(&removed)? {
        return Ok(());
    }
    println!("🗑️  Deleted goal '{}'", removed.name);
    Ok(())
}
