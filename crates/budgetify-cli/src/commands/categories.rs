//! Category and budget command implementations

use anyhow::{Context, Result};
use budgetify_core::{Category, CategoryBook, CategoryInput, TransactionType};

use super::{parse_decimal, truncate, Session};

/// Optional changes for `categories edit`
#[derive(Debug, Clone, Default)]
pub struct CategoryEdit {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub budget: Option<String>,
    pub clear_budget: bool,
}

fn parse_kind(kind: &str) -> Result<TransactionType> {
    kind.parse::<TransactionType>().map_err(anyhow::Error::msg)
}

fn parse_budget(budget: Option<&str>) -> Result<Option<f64>> {
    budget.map(|b| parse_decimal(b, "budget")).transpose()
}

fn find<'a>(book: &'a CategoryBook, id_or_name: &str) -> Result<&'a Category> {
    book.resolve(id_or_name)
        .with_context(|| format!("Category not found: {}", id_or_name))
}

fn save(session: &Session, book: &CategoryBook) -> Result<()> {
    book.save(session.store.as_ref())
        .context("Failed to save categories")
}

pub fn cmd_categories_list(session: &Session, kind: Option<&str>) -> Result<()> {
    let book = session.categories();
    let kind = kind.map(parse_kind).transpose()?;
    let shown: Vec<&Category> = book
        .list()
        .iter()
        .filter(|c| kind.map_or(true, |k| c.kind == k))
        .collect();

    if session.emit(&shown)? {
        return Ok(());
    }

    println!();
    println!("🏷️  Categories");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:24} │ {:8} │ {:>14} │ {:6} │ {}",
        "Name", "Type", "Budget", "Custom", "ID"
    );
    println!("   ─────────────────────────┼──────────┼────────────────┼────────┼──────────");
    for cat in shown {
        let budget = cat
            .budget_limit()
            .map(|b| session.money(b))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "   {:24} │ {:8} │ {:>14} │ {:6} │ {}",
            truncate(&cat.name, 24),
            cat.kind.as_str(),
            budget,
            if cat.is_custom { "yes" } else { "" },
            cat.id
        );
    }

    Ok(())
}

pub fn cmd_categories_add(
    session: &Session,
    name: &str,
    kind: &str,
    budget: Option<&str>,
) -> Result<()> {
    let mut book = session.categories();
    let input = CategoryInput {
        name: name.to_string(),
        kind: parse_kind(kind)?,
        budget: parse_budget(budget)?,
    };
    if input.kind == TransactionType::Income && input.budget.is_some() {
        anyhow::bail!("Budgets apply to expense categories only");
    }

    let added = book.add(input)?.clone();
    save(session, &book)?;

    if session.emit(&added)? {
        return Ok(());
    }
    println!("✅ Added {} category '{}' ({})", added.kind, added.name, added.id);
    Ok(())
}

pub fn cmd_categories_edit(session: &Session, id_or_name: &str, edit: CategoryEdit) -> Result<()> {
    let mut book = session.categories();
    let current = find(&book, id_or_name)?.clone();

    let budget = if edit.clear_budget {
        None
    } else {
        match parse_budget(edit.budget.as_deref())? {
            Some(b) => Some(b),
            None => current.budget,
        }
    };
    let kind = match edit.kind.as_deref() {
        Some(k) => parse_kind(k)?,
        None => current.kind,
    };
    let input = CategoryInput {
        name: edit.name.unwrap_or_else(|| current.name.clone()),
        kind,
        // An income category carries no budget
        budget: budget.filter(|_| kind == TransactionType::Expense),
    };

    let updated = book.edit(&current.id, input)?.clone();
    save(session, &book)?;

    if session.emit(&updated)? {
        return Ok(());
    }
    println!("✅ Updated category '{}'", updated.name);
    if updated.name != current.name {
        println!(
            "   Note: transactions still labelled '{}' keep that label",
            current.name
        );
    }
    Ok(())
}

pub fn cmd_categories_delete(session: &Session, id_or_name: &str) -> Result<()> {
    let mut book = session.categories();
    let id = find(&book, id_or_name)?.id.clone();
    let removed = book.delete(&id)?;
    save(session, &book)?;

    if session.emit(&removed)? {
        return Ok(());
    }
    println!("🗑️  Deleted category '{}'", removed.name);
    Ok(())
}

pub fn cmd_categories_budget(
    session: &Session,
    id_or_name: &str,
    amount: Option<&str>,
) -> Result<()> {
    let mut book = session.categories();
    let id = find(&book, id_or_name)?.id.clone();
    let updated = book.set_budget(&id, parse_budget(amount)?)?.clone();
    save(session, &book)?;

    if session.emit(&updated)? {
        return Ok(());
    }
    match updated.budget_limit() {
        Some(limit) => println!(
            "✅ Budget for '{}' set to {} per month",
            updated.name,
            session.money(limit)
        ),
        None => println!("✅ Budget for '{}' cleared", updated.name),
    }
    Ok(())
}

pub fn cmd_categories_reset(session: &Session) -> Result<()> {
    let mut book = session.categories();
    book.reset();
    save(session, &book)?;

    if session.emit(book.list())? {
        return Ok(());
    }
    println!("♻️  Categories reset to {} defaults", book.list().len());
    Ok(())
}
