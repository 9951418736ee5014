//! Report models built from expenses, budgets and categories.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budgets::BudgetWithSpent;
use crate::expenses::Expense;
use crate::utils::time_utils::ReportRange;

/// Spending attributed to one category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpending {
    pub category_id: String,
    pub category_name: String,
    pub amount: Decimal,
    /// Share of the total, in percent
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailySpending {
    pub date: NaiveDate,
    pub amount: Decimal,
}

/// Month overview shown on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// `YYYY-MM`
    pub month: String,
    pub total_spent: Decimal,
    pub previous_month_total: Decimal,
    /// Change against the previous month; absent when that month had no spending
    pub change_percent: Option<f64>,
    pub budgets: Vec<BudgetWithSpent>,
    pub spending_by_category: Vec<CategorySpending>,
    pub recent_expenses: Vec<Expense>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpendingReport {
    pub range: ReportRange,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub total_spent: Decimal,
    pub daily_spending: Vec<DailySpending>,
    pub category_breakdown: Vec<CategorySpending>,
    /// Budgets measured against the month in which the range ends
    pub budget_adherence: Vec<BudgetWithSpent>,
}
