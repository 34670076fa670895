//! The category collection
//!
//! Seeded with a fixed set of defaults on first use. Defaults can be renamed
//! and budgeted but never deleted. Names are unique per transaction type,
//! compared trimmed and case-insensitively.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Category, CategoryId, TransactionType};
use crate::storage::{self, Store, CATEGORIES_KEY};
use crate::validation::{validate_budget, validate_category_name};

const DEFAULT_INCOME: [&str; 5] = [
    "Wynagrodzenie",
    "Freelancing",
    "Inwestycje",
    "Prezenty",
    "Inne przychody",
];

const DEFAULT_EXPENSE: [&str; 8] = [
    "Jedzenie",
    "Transport",
    "Mieszkanie",
    "Rozrywka",
    "Zdrowie",
    "Ubrania",
    "Edukacja",
    "Inne wydatki",
];

/// User-supplied fields for creating or editing a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default)]
    pub budget: Option<f64>,
}

/// The seeded default categories, income first
pub fn default_categories() -> Vec<Category> {
    let seed = |kind: TransactionType, names: &[&str]| -> Vec<Category> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Category {
                id: CategoryId::new(format!("{}-{}", kind.as_str(), i + 1)),
                name: (*name).to_string(),
                kind,
                budget: None,
                is_custom: false,
            })
            .collect()
    };

    let mut categories = seed(TransactionType::Income, &DEFAULT_INCOME);
    categories.extend(seed(TransactionType::Expense, &DEFAULT_EXPENSE));
    categories
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBook {
    categories: Vec<Category>,
}

impl Default for CategoryBook {
    fn default() -> Self {
        Self::new(default_categories())
    }
}

impl CategoryBook {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Load from the store, falling back to the default seed
    ///
    /// A stored collection is kept as-is, duplicates included.
    pub fn load(store: &dyn Store) -> Self {
        match storage::load_collection(store, CATEGORIES_KEY) {
            Some(categories) => Self::new(categories),
            None => {
                tracing::debug!("Using default categories");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &dyn Store) -> Result<()> {
        storage::save_collection(store, CATEGORIES_KEY, &self.categories)
    }

    pub fn list(&self) -> &[Category] {
        &self.categories
    }

    pub fn by_kind(&self, kind: TransactionType) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(move |c| c.kind == kind)
    }

    pub fn get(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    /// Look up by id, or else by name (trimmed, case-insensitive)
    pub fn resolve(&self, id_or_name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.id.as_str() == id_or_name)
            .or_else(|| {
                self.categories
                    .iter()
                    .find(|c| same_name(&c.name, id_or_name))
            })
    }

    fn position(&self, id: &CategoryId) -> Result<usize> {
        self.categories
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| Error::NotFound(format!("category {}", id)))
    }

    fn ensure_unique(&self, name: &str, kind: TransactionType, except: Option<&CategoryId>) -> Result<()> {
        let taken = self
            .categories
            .iter()
            .filter(|c| Some(&c.id) != except)
            .any(|c| c.kind == kind && same_name(&c.name, name));
        if taken {
            return Err(Error::Conflict(format!(
                "{} category '{}' already exists",
                kind,
                name.trim()
            )));
        }
        Ok(())
    }

    fn validate(&self, input: &CategoryInput, except: Option<&CategoryId>) -> Result<()> {
        validate_category_name(&input.name)?;
        validate_budget(input.budget)?;
        self.ensure_unique(&input.name, input.kind, except)
    }

    pub fn add(&mut self, input: CategoryInput) -> Result<&Category> {
        self.validate(&input, None)?;
        let category = Category {
            id: CategoryId::generate(),
            name: input.name.trim().to_string(),
            kind: input.kind,
            budget: input.budget.filter(|b| *b > 0.0),
            is_custom: true,
        };
        tracing::info!(category = %category.name, kind = %category.kind, "Added category");
        self.categories.push(category);
        let last = self.categories.len() - 1;
        Ok(&self.categories[last])
    }

    /// Replace name, type and budget; id and the custom flag are kept
    pub fn edit(&mut self, id: &CategoryId, input: CategoryInput) -> Result<&Category> {
        let idx = self.position(id)?;
        self.validate(&input, Some(id))?;
        let category = &mut self.categories[idx];
        category.name = input.name.trim().to_string();
        category.kind = input.kind;
        category.budget = input.budget.filter(|b| *b > 0.0);
        Ok(&self.categories[idx])
    }

    /// Set or clear the monthly budget of an expense category
    pub fn set_budget(&mut self, id: &CategoryId, budget: Option<f64>) -> Result<&Category> {
        validate_budget(budget)?;
        let idx = self.position(id)?;
        let category = &mut self.categories[idx];
        if category.kind != TransactionType::Expense {
            return Err(Error::invalid_field(
                "budget",
                "Budgets apply to expense categories only",
            ));
        }
        category.budget = budget.filter(|b| *b > 0.0);
        tracing::debug!(category = %category.name, budget = ?category.budget, "Updated budget");
        Ok(&self.categories[idx])
    }

    /// Remove a custom category; seeded defaults are refused
    pub fn delete(&mut self, id: &CategoryId) -> Result<Category> {
        let idx = self.position(id)?;
        if !self.categories[idx].is_custom {
            return Err(Error::Conflict(format!(
                "'{}' is a default category and cannot be deleted",
                self.categories[idx].name
            )));
        }
        let removed = self.categories.remove(idx);
        tracing::info!(category = %removed.name, "Deleted category");
        Ok(removed)
    }

    /// Discard every change and restore the default seed
    pub fn reset(&mut self) {
        self.categories = default_categories();
        tracing::info!("Reset categories to defaults");
    }
}
