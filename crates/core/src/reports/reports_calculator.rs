//! Pure aggregation over already-loaded records.

use std::collections::HashMap;

use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use crate::budgets::{Budget, BudgetWithSpent};
use crate::categories::Category;
use crate::constants::{PERCENT_PRECISION, UNCATEGORIZED_LABEL};
use crate::expenses::Expense;
use crate::reports::reports_model::{CategorySpending, DailySpending};
use crate::utils::time_utils::{DateRange, MonthWindow};

pub fn total_spent(expenses: &[Expense]) -> Decimal {
    expenses.iter().map(|e| e.amount).sum()
}

/// `part / whole * 100`, rounded for display. Zero when `whole` is not positive.
pub fn percent_of(part: Decimal, whole: Decimal) -> f64 {
    if whole <= Decimal::ZERO {
        return 0.0;
    }
    (part / whole * Decimal::ONE_HUNDRED)
        .round_dp(PERCENT_PRECISION)
        .to_f64()
        .unwrap_or(0.0)
}

/// Relative change from `previous` to `current` in percent.
pub fn percent_change(current: Decimal, previous: Decimal) -> Option<f64> {
    if previous.is_zero() {
        return None;
    }
    ((current - previous) / previous.abs() * Decimal::ONE_HUNDRED)
        .round_dp(PERCENT_PRECISION)
        .to_f64()
}

/// Groups spending per category, largest first.
pub fn spending_by_category(expenses: &[Expense], categories: &[Category]) -> Vec<CategorySpending> {
    let names: HashMap<&str, &str> = categories
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();

    let mut totals: HashMap<&str, Decimal> = HashMap::new();
    for expense in expenses {
        *totals.entry(expense.category_id.as_str()).or_default() += expense.amount;
    }

    let total = total_spent(expenses);
    let mut breakdown: Vec<CategorySpending> = totals
        .into_iter()
        .map(|(category_id, amount)| CategorySpending {
            category_id: category_id.to_string(),
            category_name: names
                .get(category_id)
                .copied()
                .unwrap_or(UNCATEGORIZED_LABEL)
                .to_string(),
            amount,
            percentage: percent_of(amount, total),
        })
        .collect();

    breakdown.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category_name.cmp(&b.category_name))
    });
    breakdown
}

/// One entry per day of the range, days without spending included as zero.
pub fn daily_spending(expenses: &[Expense], range: &DateRange) -> Vec<DailySpending> {
    let mut by_day = HashMap::new();
    for expense in expenses.iter().filter(|e| range.contains(e.date)) {
        *by_day.entry(expense.date.date()).or_insert(Decimal::ZERO) += expense.amount;
    }

    range
        .days()
        .into_iter()
        .map(|date| DailySpending {
            date,
            amount: by_day.get(&date).copied().unwrap_or(Decimal::ZERO),
        })
        .collect()
}

/// Joins each budget with its category and the spending dated inside `month`.
pub fn budgets_with_spent(
    budgets: &[Budget],
    categories: &[Category],
    expenses: &[Expense],
    month: &MonthWindow,
) -> Vec<BudgetWithSpent> {
    budgets
        .iter()
        .map(|budget| {
            let spent: Decimal = expenses
                .iter()
                .filter(|e| e.category_id == budget.category_id && month.contains(e.date))
                .map(|e| e.amount)
                .sum();
            let category_name = categories
                .iter()
                .find(|c| c.id == budget.category_id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string());

            BudgetWithSpent {
                id: budget.id.clone(),
                category_id: budget.category_id.clone(),
                category_name,
                amount: budget.amount,
                spent,
                remaining: budget.amount - spent,
                percent_used: percent_of(spent, budget.amount),
                is_over_budget: spent > budget.amount,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dec, dt};
    use chrono::NaiveDate;

    fn expense(id: &str, category_id: &str, amount: &str, date: &str) -> Expense {
        Expense {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            description: "Test".to_string(),
            amount: dec(amount),
            category_id: category_id.to_string(),
            date: dt(date),
            created_at: dt(date),
            updated_at: dt(date),
        }
    }

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            name: name.to_string(),
            icon_name: None,
            created_at: dt("2024-01-01 00:00:00"),
            updated_at: dt("2024-01-01 00:00:00"),
        }
    }

    #[test]
    fn spending_by_category_sorts_descending_and_labels_unknown() {
        let expenses = vec![
            expense("e1", "food", "30", "2024-05-01 09:00:00"),
            expense("e2", "rent", "60", "2024-05-02 09:00:00"),
            expense("e3", "gone", "10", "2024-05-03 09:00:00"),
        ];
        let categories = vec![category("food", "Food"), category("rent", "Rent")];

        let breakdown = spending_by_category(&expenses, &categories);
        let names: Vec<&str> = breakdown.iter().map(|c| c.category_name.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Food", "Unknown"]);
        assert_eq!(breakdown[0].percentage, 60.0);
        assert_eq!(breakdown[2].percentage, 10.0);
    }

    #[test]
    fn daily_spending_fills_missing_days_with_zero() {
        let range = DateRange::new(dt("2024-05-01 00:00:00"), dt("2024-05-03 23:59:59")).unwrap();
        let expenses = vec![
            expense("e1", "food", "5", "2024-05-01 08:00:00"),
            expense("e2", "food", "7.5", "2024-05-01 20:00:00"),
            expense("e3", "food", "2", "2024-05-03 12:00:00"),
            expense("e4", "food", "100", "2024-05-04 12:00:00"),
        ];

        let daily = daily_spending(&expenses, &range);
        assert_eq!(daily.len(), 3);
        assert_eq!(daily[0].amount, dec("12.5"));
        assert_eq!(daily[1].date, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
        assert_eq!(daily[1].amount, Decimal::ZERO);
        assert_eq!(daily[2].amount, dec("2"));
    }

    #[test]
    fn budgets_with_spent_only_counts_the_month() {
        let budget = Budget {
            id: "b1".to_string(),
            user_id: "user-1".to_string(),
            category_id: "food".to_string(),
            amount: dec("200"),
            created_at: dt("2024-01-01 00:00:00"),
            updated_at: dt("2024-01-01 00:00:00"),
        };
        let expenses = vec![
            expense("e1", "food", "150", "2024-05-10 09:00:00"),
            expense("e2", "food", "80", "2024-05-31 23:59:59"),
            expense("e3", "food", "500", "2024-04-30 23:59:59"),
            expense("e4", "rent", "500", "2024-05-10 09:00:00"),
        ];
        let month = MonthWindow::parse_month("2024-05").unwrap();

        let rows = budgets_with_spent(&[budget], &[category("food", "Food")], &expenses, &month);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].spent, dec("230"));
        assert_eq!(rows[0].remaining, dec("-30"));
        assert_eq!(rows[0].percent_used, 115.0);
        assert!(rows[0].is_over_budget);
        assert_eq!(rows[0].category_name, "Food");
    }

    #[test]
    fn percent_change_handles_zero_previous() {
        assert_eq!(percent_change(dec("150"), dec("100")), Some(50.0));
        assert_eq!(percent_change(dec("50"), dec("100")), Some(-50.0));
        assert_eq!(percent_change(dec("50"), Decimal::ZERO), None);
    }
}
