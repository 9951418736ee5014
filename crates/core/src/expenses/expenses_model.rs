//! Expense domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single recorded spending transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub amount: Decimal,
    pub category_id: String,
    /// Calendar timestamp in application-local time
    pub date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for recording an expense
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: String,
    pub description: String,
    pub amount: Decimal,
    pub category_id: String,
    pub date: NaiveDateTime,
}

/// Input model for editing an expense. Absent fields are left unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseUpdate {
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub category_id: Option<String>,
    pub date: Option<NaiveDateTime>,
}

/// Listing filter; every bound is optional and inclusive.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseFilter {
    pub category_id: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl ExpenseFilter {
    pub fn matches(&self, expense: &Expense) -> bool {
        self.category_id
            .as_deref()
            .map_or(true, |id| expense.category_id == id)
            && self.start.map_or(true, |start| expense.date >= start)
            && self.end.map_or(true, |end| expense.date <= end)
    }
}
