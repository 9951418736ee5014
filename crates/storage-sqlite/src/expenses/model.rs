//! Database models for expenses.

use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use budgetwise_core::expenses::Expense;

#[derive(
    Queryable, Identifiable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::expenses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDB {
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub amount: String,
    pub category_id: String,
    pub date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::expenses)]
#[serde(rename_all = "camelCase")]
pub struct NewExpenseDB {
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub amount: String,
    pub category_id: String,
    pub date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Changed columns only; `None` leaves a column untouched.
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::expenses)]
pub struct ExpenseChangesetDB {
    pub description: Option<String>,
    pub amount: Option<String>,
    pub category_id: Option<String>,
    pub date: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl From<ExpenseDB> for Expense {
    fn from(db: ExpenseDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            description: db.description,
            amount: Decimal::from_str(&db.amount).unwrap_or_default(),
            category_id: db.category_id,
            date: db.date,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
