//! Unit tests for the budget warning evaluator.

use super::*;
use crate::notifications::NotificationType;
use crate::test_support::{dec, dt, InMemoryStore};
use std::sync::Arc;

/// Evaluator whose "now" is fixed at `now`.
fn evaluator_at(store: &Arc<InMemoryStore>, now: &str) -> BudgetWarningEvaluator {
    let now = dt(now);
    BudgetWarningEvaluator::new(store.clone(), store.clone(), store.clone(), store.clone())
        .with_clock(move || now)
}

fn evaluator(store: &Arc<InMemoryStore>) -> BudgetWarningEvaluator {
    evaluator_at(store, "2024-05-20 18:00:00")
}

#[tokio::test]
async fn no_budget_means_no_notification() {
    let store = Arc::new(InMemoryStore::default());
    let food = store.seed_category("user-1", "Groceries");
    let expense = store.seed_expense("user-1", &food.id, "5000", "2024-05-10 12:00:00");

    let outcome = evaluator(&store).evaluate("user-1", &expense).await.unwrap();
    assert_eq!(outcome, BudgetWarningOutcome::NoBudget);
    assert!(store.notifications_for("user-1").is_empty());
}

#[tokio::test]
async fn crossing_threshold_creates_one_warning() {
    let store = Arc::new(InMemoryStore::default());
    let food = store.seed_category("user-1", "Groceries");
    let budget = store.seed_budget("user-1", &food.id, "300");
    store.seed_expense("user-1", &food.id, "250", "2024-05-03 09:00:00");
    let expense = store.seed_expense("user-1", &food.id, "40", "2024-05-10 12:00:00");

    let created = evaluator(&store)
        .check_and_notify("user-1", &expense)
        .await
        .expect("warning should be created");

    assert_eq!(
        created.message,
        "You have spent 97% of your budget for 'Groceries'."
    );
    assert_eq!(created.notification_type, NotificationType::BudgetWarning);
    assert!(!created.read);
    assert_eq!(created.link, Some(format!("/budgets#{}", budget.id)));
    assert_eq!(store.notifications_for("user-1").len(), 1);
}

#[tokio::test]
async fn staying_under_threshold_does_nothing() {
    let store = Arc::new(InMemoryStore::default());
    let food = store.seed_category("user-1", "Groceries");
    store.seed_budget("user-1", &food.id, "300");
    store.seed_expense("user-1", &food.id, "250", "2024-05-03 09:00:00");
    let expense = store.seed_expense("user-1", &food.id, "10", "2024-05-10 12:00:00");

    let outcome = evaluator(&store).evaluate("user-1", &expense).await.unwrap();
    assert_eq!(outcome, BudgetWarningOutcome::BelowThreshold { percent: 87 });
    assert!(store.notifications_for("user-1").is_empty());
}

#[tokio::test]
async fn exactly_ninety_percent_does_not_warn() {
    let store = Arc::new(InMemoryStore::default());
    let food = store.seed_category("user-1", "Groceries");
    store.seed_budget("user-1", &food.id, "300");
    let expense = store.seed_expense("user-1", &food.id, "270", "2024-05-10 12:00:00");

    let outcome = evaluator(&store).evaluate("user-1", &expense).await.unwrap();
    assert_eq!(outcome, BudgetWarningOutcome::BelowThreshold { percent: 90 });
}

#[tokio::test]
async fn second_qualifying_expense_is_suppressed_even_over_budget() {
    let store = Arc::new(InMemoryStore::default());
    let food = store.seed_category("user-1", "Groceries");
    store.seed_budget("user-1", &food.id, "300");
    let first = store.seed_expense("user-1", &food.id, "290", "2024-05-03 09:00:00");
    let eval = evaluator(&store);
    assert!(eval.check_and_notify("user-1", &first).await.is_some());

    let second = store.seed_expense("user-1", &food.id, "200", "2024-05-04 09:00:00");
    let outcome = eval.evaluate("user-1", &second).await.unwrap();
    assert_eq!(outcome, BudgetWarningOutcome::AlreadyWarned);
    assert_eq!(store.notifications_for("user-1").len(), 1);
}

#[tokio::test]
async fn warning_from_an_earlier_month_does_not_suppress() {
    let store = Arc::new(InMemoryStore::default());
    let food = store.seed_category("user-1", "Groceries");
    let budget = store.seed_budget("user-1", &food.id, "100");
    store.seed_budget_warning("user-1", &budget_link(&budget.id), "2024-04-20 08:00:00");
    let expense = store.seed_expense("user-1", &food.id, "95", "2024-05-02 09:00:00");

    let outcome = evaluator(&store).evaluate("user-1", &expense).await.unwrap();
    assert!(matches!(outcome, BudgetWarningOutcome::Created(_)));
    assert_eq!(store.notifications_for("user-1").len(), 2);
}

#[tokio::test]
async fn only_expenses_inside_the_month_count() {
    let store = Arc::new(InMemoryStore::default());
    let food = store.seed_category("user-1", "Groceries");
    store.seed_budget("user-1", &food.id, "100");
    store.seed_expense("user-1", &food.id, "95", "2024-04-30 23:59:59");
    store.seed_expense("user-1", &food.id, "95", "2024-06-01 00:00:00");
    store.seed_expense("user-2", &food.id, "95", "2024-05-15 00:00:00");
    let expense = store.seed_expense("user-1", &food.id, "50", "2024-05-01 00:00:00");

    let outcome = evaluator(&store).evaluate("user-1", &expense).await.unwrap();
    assert_eq!(outcome, BudgetWarningOutcome::BelowThreshold { percent: 50 });
}

#[tokio::test]
async fn last_instant_of_month_is_inside_the_window() {
    let store = Arc::new(InMemoryStore::default());
    let food = store.seed_category("user-1", "Groceries");
    store.seed_budget("user-1", &food.id, "100");
    store.seed_expense("user-1", &food.id, "50", "2024-02-01 00:00:00");
    let expense = store.seed_expense("user-1", &food.id, "45", "2024-02-29 23:59:59");

    let outcome = evaluator_at(&store, "2024-02-29 23:59:59")
        .evaluate("user-1", &expense)
        .await
        .unwrap();
    assert!(matches!(outcome, BudgetWarningOutcome::Created(_)));
}

#[tokio::test]
async fn back_dated_expense_is_not_checked() {
    let store = Arc::new(InMemoryStore::default());
    let food = store.seed_category("user-1", "Groceries");
    store.seed_budget("user-1", &food.id, "100");
    let late = store.seed_expense("user-1", &food.id, "95", "2024-04-28 12:00:00");

    let eval = evaluator(&store);
    let outcome = eval.evaluate("user-1", &late).await.unwrap();
    assert_eq!(outcome, BudgetWarningOutcome::OutsideCurrentMonth);
    assert!(store.notifications_for("user-1").is_empty());

    // The first crossing of the current month still warns
    let expense = store.seed_expense("user-1", &food.id, "95", "2024-05-01 00:00:00");
    let created = eval
        .check_and_notify("user-1", &expense)
        .await
        .expect("current month crossing should warn");
    assert_eq!(created.created_at, dt("2024-05-20 18:00:00"));
    assert_eq!(store.notifications_for("user-1").len(), 1);
}

#[tokio::test]
async fn future_dated_expense_is_not_checked() {
    let store = Arc::new(InMemoryStore::default());
    let food = store.seed_category("user-1", "Groceries");
    store.seed_budget("user-1", &food.id, "100");
    let expense = store.seed_expense("user-1", &food.id, "95", "2024-06-01 00:00:00");

    let outcome = evaluator(&store).evaluate("user-1", &expense).await.unwrap();
    assert_eq!(outcome, BudgetWarningOutcome::OutsideCurrentMonth);
}

#[tokio::test]
async fn missing_category_uses_placeholder_name() {
    let store = Arc::new(InMemoryStore::default());
    store.seed_budget("user-1", "deleted-category", "100");
    let expense = store.seed_expense("user-1", "deleted-category", "91", "2024-05-10 12:00:00");

    let created = evaluator(&store)
        .check_and_notify("user-1", &expense)
        .await
        .unwrap();
    assert_eq!(
        created.message,
        "You have spent 91% of your budget for 'a category'."
    );
}

#[tokio::test]
async fn non_positive_budget_is_skipped() {
    let store = Arc::new(InMemoryStore::default());
    let food = store.seed_category("user-1", "Groceries");
    store.seed_budget("user-1", &food.id, "0");
    let expense = store.seed_expense("user-1", &food.id, "10", "2024-05-10 12:00:00");

    let outcome = evaluator(&store).evaluate("user-1", &expense).await.unwrap();
    assert_eq!(outcome, BudgetWarningOutcome::InvalidBudgetAmount);
    assert!(store.notifications_for("user-1").is_empty());
}

#[tokio::test]
async fn store_failures_are_swallowed() {
    let store = Arc::new(InMemoryStore::default());
    let food = store.seed_category("user-1", "Groceries");
    store.seed_budget("user-1", &food.id, "100");
    let expense = store.seed_expense("user-1", &food.id, "95", "2024-05-10 12:00:00");
    store.set_failing(true);

    let eval = evaluator(&store);
    assert!(eval.evaluate("user-1", &expense).await.is_err());
    assert!(eval.check_and_notify("user-1", &expense).await.is_none());

    store.set_failing(false);
    assert!(store.notifications_for("user-1").is_empty());
    // The next qualifying expense retries naturally
    assert!(eval.check_and_notify("user-1", &expense).await.is_some());
}

#[test]
fn rounding_is_half_away_from_zero() {
    assert_eq!(rounded_percent(dec("0.905")), 91);
    assert_eq!(rounded_percent(dec("0.9049")), 90);
    assert_eq!(rounded_percent(dec("0.96666666")), 97);
    assert_eq!(rounded_percent(dec("1.5")), 150);
}

#[test]
fn ratio_requires_positive_ceiling() {
    assert_eq!(spending_ratio(dec("10"), dec("0")), None);
    assert_eq!(spending_ratio(dec("10"), dec("-5")), None);
    assert_eq!(spending_ratio(dec("45"), dec("50")), Some(dec("0.9")));
    assert!(!exceeds_threshold(dec("0.9")));
    assert!(exceeds_threshold(dec("0.9001")));
}

#[test]
fn message_and_link_format() {
    assert_eq!(
        warning_message(105, "Dining"),
        "You have spent 105% of your budget for 'Dining'."
    );
    assert_eq!(budget_link("b-1"), "/budgets#b-1");
}
