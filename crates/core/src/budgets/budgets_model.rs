//! Budget domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monthly spending ceiling for one category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub user_id: String,
    pub category_id: String,
    pub amount: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a budget
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: String,
    pub category_id: String,
    pub amount: Decimal,
}

/// Input model for changing a budget's ceiling
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdate {
    pub amount: Decimal,
}

/// Budget joined with its category and the spending derived for a month.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetWithSpent {
    pub id: String,
    pub category_id: String,
    pub category_name: String,
    pub amount: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percent_used: f64,
    pub is_over_budget: bool,
}
