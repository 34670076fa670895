//! Integration tests for budgetify-core
//!
//! These tests exercise the full import → filter → aggregate → evaluate
//! workflow and persistence through the file store.

use std::fs;

use chrono::{NaiveDate, TimeZone, Utc};
use tempfile::TempDir;

use budgetify_core::{
    aggregate::{group_by_category, group_by_month, period_summary, sum_by_type},
    evaluate_budgets,
    import::parse_csv,
    BudgetSettings, BudgetStatus, CategoryBook, CategoryId, FindingKind, Forecaster, GoalBook,
    GoalCategory, GoalStatus, GoalSettings, InsightEngine, JsonFileStore, Ledger, NewGoal,
    AnalysisContext, Store, TimeRange, TransactionFilter, TransactionType, CATEGORIES_KEY,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Four months of a household's activity, ending in April 2024
fn session_csv() -> &'static str {
    "type,amount,category,date,description
income,6000,Wynagrodzenie,2024-01-02,Pensja
expense,2200,Mieszkanie,2024-01-05,Czynsz
expense,640.50,Jedzenie,2024-01-20,
expense,180,Transport,2024-01-22,Bilet miesięczny
income,6000,Wynagrodzenie,2024-02-02,Pensja
expense,2200,Mieszkanie,2024-02-05,Czynsz
expense,712.30,Jedzenie,2024-02-18,
income,1200,Freelancing,2024-03-01,Projekt
income,6000,Wynagrodzenie,2024-03-02,Pensja
expense,2200,Mieszkanie,2024-03-05,Czynsz
expense,590,Jedzenie,2024-03-19,
expense,350,Rozrywka,2024-03-23,Koncert
income,6000,Wynagrodzenie,2024-04-02,Pensja
expense,2200,Mieszkanie,2024-04-05,Czynsz
expense,210,Jedzenie,2024-04-09,
expense,150,Jedzenie,2024-04-12,
expense,180,Transport,2024-04-15,Bilet miesięczny"
}

fn session_ledger() -> Ledger {
    let txs = parse_csv(session_csv().as_bytes()).expect("Failed to parse CSV");
    Ledger::from_transactions(txs).expect("Failed to build ledger")
}

// =============================================================================
// Aggregation Workflow
// =============================================================================

#[test]
fn test_import_to_monthly_report() {
    let ledger = session_ledger();
    assert_eq!(ledger.len(), 17);

    let months = group_by_month(ledger.list());
    assert_eq!(months.len(), 4);
    assert_eq!(months[2].month.to_string(), "2024-03");
    assert_eq!(months[2].income, 7200.0);

    let summary = period_summary(ledger.list());
    assert_eq!(summary.months, 4);
    assert!(
        (summary.balance
            - (sum_by_type(ledger.list(), TransactionType::Income)
                - sum_by_type(ledger.list(), TransactionType::Expense)))
        .abs()
            < 1e-6
    );

    let categories = group_by_category(ledger.list(), TransactionType::Expense);
    assert_eq!(categories[0].name, "Mieszkanie");
    let category_sum: f64 = categories.iter().map(|c| c.total).sum();
    assert!((category_sum - summary.total_expense).abs() < 1e-6);
}

#[test]
fn test_filtered_window() {
    let ledger = session_ledger();
    let as_of = date(2024, 4, 20);

    let recent_food = TransactionFilter::new()
        .range(TimeRange::ThreeMonths, as_of)
        .category(Some("Jedzenie"))
        .apply(ledger.list());

    // 2024-01-20 is exactly at the cutoff and is excluded
    assert_eq!(recent_food.len(), 4);
    assert!(recent_food.iter().all(|t| t.date > date(2024, 1, 20)));
}

#[test]
fn test_budget_and_insights_for_current_month() {
    let ledger = session_ledger();
    let as_of = date(2024, 4, 20);

    let mut book = CategoryBook::default();
    book.set_budget(&CategoryId::new("expense-1"), Some(450.0))
        .unwrap();
    book.set_budget(&CategoryId::new("expense-2"), Some(150.0))
        .unwrap();

    let overview = evaluate_budgets(ledger.list(), book.list(), as_of, &BudgetSettings::default());
    let food = overview.categories.iter().find(|c| c.name == "Jedzenie").unwrap();
    assert_eq!(food.spent, 360.0);
    assert_eq!(food.percentage, 80.0);
    assert_eq!(food.status, BudgetStatus::Warning);

    let transport = overview.categories.iter().find(|c| c.name == "Transport").unwrap();
    assert_eq!(transport.status, BudgetStatus::Over);
    assert!(overview.over_budget);

    let ctx = AnalysisContext::new(ledger.list(), as_of);
    let findings = InsightEngine::new().analyze_all(&ctx);
    assert_eq!(findings.len(), 3);
    assert_eq!(findings[1].kind, FindingKind::Info);
    assert!(findings[1].description.starts_with("Mieszkanie: 8800 zł"));

    let forecast = Forecaster::new().forecast_transactions(ledger.list(), as_of);
    assert_eq!(forecast.len(), 6);
    assert_eq!(forecast[0].month.to_string(), "2024-05");
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_categories_and_goals_persist_to_files() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path()).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 4, 20, 10, 0, 0).unwrap();

    let mut categories = CategoryBook::load(&store);
    categories
        .set_budget(&CategoryId::new("expense-3"), Some(2500.0))
        .unwrap();
    categories.save(&store).unwrap();

    let mut goals = GoalBook::load(&store);
    let id = goals
        .add(
            NewGoal {
                name: "Wakacje".into(),
                target_amount: 6000.0,
                current_amount: 1500.0,
                target_date: date(2024, 5, 10),
                category: GoalCategory::Vacation,
                description: "Chorwacja".into(),
            },
            now,
        )
        .unwrap()
        .id
        .clone();
    goals.save(&store).unwrap();

    assert!(dir.path().join("budgetify-categories.json").exists());
    assert!(dir.path().join("budgetify-goals.json").exists());

    let reopened = JsonFileStore::new(dir.path()).unwrap();
    let categories = CategoryBook::load(&reopened);
    assert_eq!(
        categories.get(&CategoryId::new("expense-3")).unwrap().budget,
        Some(2500.0)
    );

    let goals = GoalBook::load(&reopened);
    let progress = goals.progress(date(2024, 4, 20), &GoalSettings::default());
    assert_eq!(progress[0].goal_id, id);
    assert_eq!(progress[0].status, GoalStatus::Urgent);
    assert_eq!(progress[0].percentage, 25.0);
}

#[test]
fn test_corrupt_blob_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path()).unwrap();
    fs::write(store.path_for(CATEGORIES_KEY), "{ definitely not json").unwrap();

    assert!(store.load(CATEGORIES_KEY).is_err());
    let categories = CategoryBook::load(&store);
    assert_eq!(categories, CategoryBook::default());
    assert!(GoalBook::load(&store).list().is_empty());
}

#[test]
fn test_goal_blob_written_by_browser_layout() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path()).unwrap();
    fs::write(
        store.path_for("budgetify-goals"),
        r#"[{
            "id": 1714000000000,
            "name": "Nowy laptop",
            "targetAmount": 5000,
            "currentAmount": 5000,
            "targetDate": "2024-03-01",
            "category": "other",
            "description": "",
            "createdAt": "2024-01-10T08:00:00.000Z",
            "updatedAt": "2024-02-10T08:00:00.000Z"
        }]"#,
    )
    .unwrap();

    let goals = GoalBook::load(&store);
    assert_eq!(goals.list().len(), 1);
    assert_eq!(goals.list()[0].id.as_str(), "1714000000000");
    let progress = goals.progress(date(2024, 4, 20), &GoalSettings::default());
    assert_eq!(progress[0].status, GoalStatus::Completed);
}
