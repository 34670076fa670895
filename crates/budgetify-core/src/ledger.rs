//! Session transaction collection
//!
//! Transactions live only for the session. Each one gets a generated id on
//! creation and is edited only by full replacement under that id.

use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction, TransactionId};
use crate::validation::validate_transaction;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from already-identified transactions, validating each
    ///
    /// Duplicate ids are rejected.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for tx in &transactions {
            validate_transaction(&NewTransaction::from(tx))?;
            if !seen.insert(tx.id) {
                return Err(Error::Conflict(format!("duplicate transaction id {}", tx.id)));
            }
        }
        Ok(Self { transactions })
    }

    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    fn position(&self, id: TransactionId) -> Result<usize> {
        self.transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| Error::NotFound(format!("transaction {}", id)))
    }

    pub fn add(&mut self, input: NewTransaction) -> Result<TransactionId> {
        validate_transaction(&input)?;
        let id = TransactionId::new();
        self.transactions.push(input.into_transaction(id));
        Ok(id)
    }

    /// Replace the transaction stored under `id`
    pub fn replace(&mut self, id: TransactionId, input: NewTransaction) -> Result<&Transaction> {
        validate_transaction(&input)?;
        let idx = self.position(id)?;
        self.transactions[idx] = input.into_transaction(id);
        Ok(&self.transactions[idx])
    }

    pub fn remove(&mut self, id: TransactionId) -> Result<Transaction> {
        let idx = self.position(id)?;
        Ok(self.transactions.remove(idx))
    }

    /// Distinct category names in use, sorted
    pub fn category_names(&self) -> Vec<String> {
        self.transactions
            .iter()
            .map(|t| t.category.clone())
            .filter(|c| !c.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use crate::test_utils::{date, expense};

    fn new_tx(amount: f64, category: &str) -> NewTransaction {
        NewTransaction {
            kind: TransactionType::Expense,
            amount,
            category: category.to_string(),
            date: date(2024, 5, 1),
            description: Some("  obiad  ".into()),
        }
    }

    #[test]
    fn test_add_assigns_distinct_ids() {
        let mut ledger = Ledger::new();
        let a = ledger.add(new_tx(10.0, "Jedzenie")).unwrap();
        let b = ledger.add(new_tx(10.0, "Jedzenie")).unwrap();
        assert_ne!(a, b);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get(a).unwrap().description.as_deref(), Some("obiad"));
    }

    #[test]
    fn test_add_rejects_invalid() {
        let mut ledger = Ledger::new();
        assert!(ledger.add(new_tx(-3.0, "Jedzenie")).is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_replace_keeps_id() {
        let mut ledger = Ledger::new();
        let id = ledger.add(new_tx(10.0, "Jedzenie")).unwrap();
        let replaced = ledger.replace(id, new_tx(25.0, "Transport")).unwrap();
        assert_eq!(replaced.id, id);
        assert_eq!(replaced.amount, 25.0);
        assert!(ledger.replace(TransactionId::new(), new_tx(1.0, "X")).is_err());
    }

    #[test]
    fn test_remove() {
        let mut ledger = Ledger::new();
        let id = ledger.add(new_tx(10.0, "Jedzenie")).unwrap();
        assert_eq!(ledger.remove(id).unwrap().amount, 10.0);
        assert!(matches!(ledger.remove(id), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_from_transactions_rejects_duplicates() {
        let tx = expense(10.0, "Jedzenie", date(2024, 5, 1));
        let result = Ledger::from_transactions(vec![tx.clone(), tx]);
        assert!(matches!(result, Err(Error::Conflict(_))));
    }

    #[test]
    fn test_category_names() {
        let ledger = Ledger::from_transactions(vec![
            expense(1.0, "Transport", date(2024, 5, 1)),
            expense(1.0, "Jedzenie", date(2024, 5, 2)),
            expense(1.0, "Transport", date(2024, 5, 3)),
        ])
        .unwrap();
        assert_eq!(ledger.category_names(), vec!["Jedzenie", "Transport"]);
    }
}
