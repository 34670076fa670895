//! Savings goals: status evaluation and the goal collection

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Goal, GoalId, NewGoal};
use crate::ratio::{percent_of, total};
use crate::storage::{self, Store, GOALS_KEY};
use crate::validation::{parse_amount, validate_goal};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalSettings {
    /// A goal due within this many days is urgent
    pub urgent_days: i64,
}

impl Default for GoalSettings {
    fn default() -> Self {
        Self { urgent_days: 30 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Completed,
    Overdue,
    Urgent,
    Active,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Overdue => "overdue",
            Self::Urgent => "urgent",
            Self::Active => "active",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derived progress of one goal as of a given day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub goal_id: GoalId,
    pub name: String,
    pub percentage: f64,
    /// Negative once the target date has passed
    pub days_left: i64,
    pub remaining: f64,
    pub status: GoalStatus,
}

/// Status priority: completed, then overdue, then urgent, then active
pub fn evaluate_goal(goal: &Goal, as_of: NaiveDate, settings: &GoalSettings) -> GoalProgress {
    let percentage = percent_of(goal.current_amount, goal.target_amount);
    let days_left = (goal.target_date - as_of).num_days();

    let status = if percentage >= 100.0 {
        GoalStatus::Completed
    } else if days_left < 0 {
        GoalStatus::Overdue
    } else if days_left <= settings.urgent_days {
        GoalStatus::Urgent
    } else {
        GoalStatus::Active
    };

    GoalProgress {
        goal_id: goal.id.clone(),
        name: goal.name.clone(),
        percentage,
        days_left,
        remaining: (goal.target_amount - goal.current_amount).max(0.0),
        status,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalOverview {
    pub count: usize,
    pub total_target: f64,
    pub total_current: f64,
    pub completed: usize,
    pub overall_progress: f64,
}

/// The user's savings goals
///
/// Mutations only touch memory; call [`GoalBook::save`] to persist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalBook {
    goals: Vec<Goal>,
}

impl GoalBook {
    pub fn new(goals: Vec<Goal>) -> Self {
        Self { goals }
    }

    /// Load from the store, starting empty when nothing usable is stored
    pub fn load(store: &dyn Store) -> Self {
        Self::new(storage::load_collection(store, GOALS_KEY).unwrap_or_default())
    }

    pub fn save(&self, store: &dyn Store) -> Result<()> {
        storage::save_collection(store, GOALS_KEY, &self.goals)
    }

    pub fn list(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get(&self, id: &GoalId) -> Option<&Goal> {
        self.goals.iter().find(|g| &g.id == id)
    }

    /// Look up by id, or else by name (trimmed, case-insensitive)
    pub fn resolve(&self, id_or_name: &str) -> Option<&Goal> {
        let wanted = id_or_name.trim().to_lowercase();
        self.goals
            .iter()
            .find(|g| g.id.as_str() == id_or_name)
            .or_else(|| self.goals.iter().find(|g| g.name.to_lowercase() == wanted))
    }

    fn position(&self, id: &GoalId) -> Result<usize> {
        self.goals
            .iter()
            .position(|g| &g.id == id)
            .ok_or_else(|| Error::NotFound(format!("goal {}", id)))
    }

    pub fn add(&mut self, input: NewGoal, now: DateTime<Utc>) -> Result<&Goal> {
        validate_goal(&input)?;
        let goal = Goal {
            id: GoalId::generate(),
            name: input.name.trim().to_string(),
            target_amount: input.target_amount,
            current_amount: input.current_amount,
            target_date: input.target_date,
            category: input.category,
            description: input.description.trim().to_string(),
            created_at: now,
            updated_at: now,
        };
        tracing::info!(goal = %goal.name, "Added goal");
        self.goals.push(goal);
        let last = self.goals.len() - 1;
        Ok(&self.goals[last])
    }

    /// Replace every editable field, keeping the id and creation time
    pub fn edit(&mut self, id: &GoalId, input: NewGoal, now: DateTime<Utc>) -> Result<&Goal> {
        validate_goal(&input)?;
        let idx = self.position(id)?;
        let goal = &mut self.goals[idx];
        goal.name = input.name.trim().to_string();
        goal.target_amount = input.target_amount;
        goal.current_amount = input.current_amount;
        goal.target_date = input.target_date;
        goal.category = input.category;
        goal.description = input.description.trim().to_string();
        goal.updated_at = now;
        Ok(&self.goals[idx])
    }

    pub fn delete(&mut self, id: &GoalId) -> Result<Goal> {
        let idx = self.position(id)?;
        let removed = self.goals.remove(idx);
        tracing::info!(goal = %removed.name, "Deleted goal");
        Ok(removed)
    }

    /// Increase the saved amount by a positive, finite `amount`
    pub fn add_funds(&mut self, id: &GoalId, amount: f64, now: DateTime<Utc>) -> Result<&Goal> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::invalid_field("amount", "Enter a valid amount"));
        }
        let idx = self.position(id)?;
        let goal = &mut self.goals[idx];
        let updated = goal.current_amount + amount;
        if !updated.is_finite() {
            return Err(Error::invalid_field("amount", "Amount is too large"));
        }
        goal.current_amount = updated;
        goal.updated_at = now;
        tracing::debug!(goal = %goal.name, amount, "Added funds to goal");
        Ok(&self.goals[idx])
    }

    /// [`GoalBook::add_funds`] for raw user input
    pub fn add_funds_str(&mut self, id: &GoalId, input: &str, now: DateTime<Utc>) -> Result<&Goal> {
        let amount = parse_amount(input)?;
        self.add_funds(id, amount, now)
    }

    pub fn progress(&self, as_of: NaiveDate, settings: &GoalSettings) -> Vec<GoalProgress> {
        self.goals
            .iter()
            .map(|g| evaluate_goal(g, as_of, settings))
            .collect()
    }

    pub fn overview(&self) -> GoalOverview {
        let total_target = total(self.goals.iter().map(|g| g.target_amount));
        let total_current = total(self.goals.iter().map(|g| g.current_amount));
        GoalOverview {
            count: self.goals.len(),
            total_target,
            total_current,
            completed: self
                .goals
                .iter()
                .filter(|g| g.current_amount >= g.target_amount)
                .count(),
            overall_progress: percent_of(total_current, total_target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GoalCategory;
    use crate::storage::MemoryStore;
    use crate::test_utils::{date, goal};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap()
    }

    fn new_goal(name: &str, target: f64) -> NewGoal {
        NewGoal {
            name: name.to_string(),
            target_amount: target,
            current_amount: 0.0,
            target_date: date(2025, 6, 1),
            category: GoalCategory::Vacation,
            description: String::new(),
        }
    }

    #[test]
    fn test_completed_beats_overdue() {
        let g = goal("Laptop", 4000.0, 4000.0, date(2024, 1, 1));
        let progress = evaluate_goal(&g, date(2024, 6, 1), &GoalSettings::default());
        assert!(progress.days_left < 0);
        assert_eq!(progress.status, GoalStatus::Completed);
        assert_eq!(progress.remaining, 0.0);
    }

    #[test]
    fn test_status_priority() {
        let settings = GoalSettings::default();
        let as_of = date(2024, 6, 1);
        let overdue = goal("A", 1000.0, 100.0, date(2024, 5, 31));
        let urgent = goal("B", 1000.0, 100.0, date(2024, 7, 1));
        let active = goal("C", 1000.0, 100.0, date(2024, 7, 2));
        let due_today = goal("D", 1000.0, 100.0, as_of);
        assert_eq!(evaluate_goal(&overdue, as_of, &settings).status, GoalStatus::Overdue);
        assert_eq!(evaluate_goal(&urgent, as_of, &settings).days_left, 30);
        assert_eq!(evaluate_goal(&urgent, as_of, &settings).status, GoalStatus::Urgent);
        assert_eq!(evaluate_goal(&active, as_of, &settings).status, GoalStatus::Active);
        assert_eq!(evaluate_goal(&due_today, as_of, &settings).status, GoalStatus::Urgent);
    }

    #[test]
    fn test_remaining_never_negative() {
        let g = goal("Over-saved", 100.0, 250.0, date(2025, 1, 1));
        let progress = evaluate_goal(&g, date(2024, 6, 1), &GoalSettings::default());
        assert_eq!(progress.remaining, 0.0);
        assert_eq!(progress.percentage, 250.0);
    }

    #[test]
    fn test_add_and_edit_keeps_created_at() {
        let mut book = GoalBook::default();
        let id = book.add(new_goal(" Wakacje ", 5000.0), now()).unwrap().id.clone();
        assert_eq!(book.get(&id).unwrap().name, "Wakacje");

        let later = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let edited = book.edit(&id, new_goal("Wakacje w Grecji", 6000.0), later).unwrap();
        assert_eq!(edited.created_at, now());
        assert_eq!(edited.updated_at, later);
        assert_eq!(edited.target_amount, 6000.0);
    }

    #[test]
    fn test_add_rejects_invalid_goal() {
        let mut book = GoalBook::default();
        assert!(matches!(
            book.add(new_goal("", 0.0), now()),
            Err(Error::Validation(_))
        ));
        assert!(book.list().is_empty());
    }

    #[test]
    fn test_add_funds() {
        let mut book = GoalBook::default();
        let id = book.add(new_goal("Auto", 20000.0), now()).unwrap().id.clone();

        book.add_funds(&id, 500.0, now()).unwrap();
        book.add_funds_str(&id, "250,50", now()).unwrap();
        assert_eq!(book.get(&id).unwrap().current_amount, 750.5);

        assert!(book.add_funds(&id, 0.0, now()).is_err());
        assert!(book.add_funds(&id, f64::NAN, now()).is_err());
        assert!(book.add_funds_str(&id, "abc", now()).is_err());
        assert_eq!(book.get(&id).unwrap().current_amount, 750.5);

        let missing = GoalId::new("missing");
        assert!(matches!(
            book.add_funds(&missing, 10.0, now()),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_add_funds_rejects_overflowing_total() {
        let mut book = GoalBook::default();
        let id = book.add(new_goal("Auto", 20000.0), now()).unwrap().id.clone();

        book.add_funds(&id, 1e308, now()).unwrap();
        assert!(matches!(
            book.add_funds(&id, 1e308, now()),
            Err(Error::Validation(_))
        ));

        let goal = book.get(&id).unwrap();
        assert!(goal.current_amount.is_finite());
        let progress = evaluate_goal(goal, date(2024, 6, 1), &GoalSettings::default());
        assert_eq!(progress.status, GoalStatus::Completed);
    }

    #[test]
    fn test_resolve() {
        let mut book = GoalBook::default();
        let id = book.add(new_goal("Wakacje", 5000.0), now()).unwrap().id.clone();
        assert_eq!(book.resolve(id.as_str()).unwrap().id, id);
        assert_eq!(book.resolve(" wakacje ").unwrap().id, id);
        assert!(book.resolve("Dom").is_none());
    }

    #[test]
    fn test_delete() {
        let mut book = GoalBook::default();
        let id = book.add(new_goal("Dom", 300000.0), now()).unwrap().id.clone();
        assert_eq!(book.delete(&id).unwrap().name, "Dom");
        assert!(book.delete(&id).is_err());
    }

    #[test]
    fn test_overview() {
        let book = GoalBook::new(vec![
            goal("A", 1000.0, 1000.0, date(2025, 1, 1)),
            goal("B", 3000.0, 1000.0, date(2025, 1, 1)),
        ]);
        let overview = book.overview();
        assert_eq!(overview.count, 2);
        assert_eq!(overview.completed, 1);
        assert_eq!(overview.overall_progress, 50.0);
        assert_eq!(GoalBook::default().overview().overall_progress, 0.0);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let store = MemoryStore::new();
        let mut book = GoalBook::load(&store);
        assert!(book.list().is_empty());
        book.add(new_goal("Fundusz awaryjny", 10000.0), now()).unwrap();
        book.save(&store).unwrap();

        let reloaded = GoalBook::load(&store);
        assert_eq!(reloaded, book);
    }
}
