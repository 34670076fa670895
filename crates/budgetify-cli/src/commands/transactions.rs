//! Transaction command implementations

use anyhow::Result;
use budgetify_core::{Transaction, TransactionFilter, TransactionType};

use super::{truncate, Session};

/// Apply the list filters and return matches newest first
pub fn select_transactions(
    session: &Session,
    range: Option<&str>,
    category: Option<&str>,
    kind: Option<&str>,
) -> Result<Vec<Transaction>> {
    let range = session.range(range)?;
    let kind = kind
        .map(|k| k.parse::<TransactionType>())
        .transpose()
        .map_err(anyhow::Error::msg)?;

    let mut selected = TransactionFilter::new()
        .range(range, session.as_of)
        .category(category)
        .kind(kind)
        .apply(session.transactions());
    selected.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(selected)
}

pub fn cmd_transactions_list(
    session: &Session,
    range: Option<&str>,
    category: Option<&str>,
    kind: Option<&str>,
    limit: usize,
) -> Result<()> {
    let selected = select_transactions(session, range, category, kind)?;
    let shown: Vec<&Transaction> = selected.iter().take(limit).collect();

    if session.emit(&shown)? {
        return Ok(());
    }

    println!();
    println!("📋 Transactions (showing {} of {})", shown.len(), selected.len());
    println!("   ─────────────────────────────────────────────────────────────");

    if shown.is_empty() {
        session.print_no_transactions();
        return Ok(());
    }

    println!(
        "   {:10} │ {:20} │ {:24} │ {:>14}",
        "Date", "Category", "Description", "Amount"
    );
    println!("   ───────────┼──────────────────────┼──────────────────────────┼───────────────");
    for tx in shown {
        let signed = if tx.is_income() { tx.amount } else { -tx.amount };
        println!(
            "   {:10} │ {:20} │ {:24} │ {:>14}",
            tx.date,
            truncate(&tx.category, 20),
            truncate(tx.description.as_deref().unwrap_or(""), 24),
            session.money(signed)
        );
    }

    Ok(())
}
