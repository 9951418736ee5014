use budgetwise_core::errors::Error;
use budgetwise_core::expenses::{
    Expense, ExpenseFilter, ExpenseRepositoryTrait, ExpenseUpdate, NewExpense,
};
use budgetwise_core::utils::time_utils::local_now;
use budgetwise_core::Result;

use super::model::{ExpenseChangesetDB, ExpenseDB, NewExpenseDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::expenses;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct ExpenseRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ExpenseRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ExpenseRepository { pool, writer }
    }
}

#[async_trait]
impl ExpenseRepositoryTrait for ExpenseRepository {
    fn get_expense_by_id(&self, owner: &str, expense_id: &str) -> Result<Option<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        let row = expenses::table
            .filter(expenses::user_id.eq(owner))
            .filter(expenses::id.eq(expense_id))
            .select(ExpenseDB::as_select())
            .first::<ExpenseDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Expense::from))
    }

    fn list_expenses(&self, owner: &str, filter: &ExpenseFilter) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = expenses::table
            .filter(expenses::user_id.eq(owner))
            .select(ExpenseDB::as_select())
            .into_boxed();

        if let Some(ref category_id) = filter.category_id {
            query = query.filter(expenses::category_id.eq(category_id.clone()));
        }
        if let Some(start) = filter.start {
            query = query.filter(expenses::date.ge(start));
        }
        if let Some(end) = filter.end {
            query = query.filter(expenses::date.le(end));
        }

        let rows = query
            .order((expenses::date.desc(), expenses::created_at.desc()))
            .load::<ExpenseDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Expense::from).collect())
    }

    fn list_recent_expenses(&self, owner: &str, limit: i64) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = expenses::table
            .filter(expenses::user_id.eq(owner))
            .order((expenses::date.desc(), expenses::created_at.desc()))
            .limit(limit)
            .select(ExpenseDB::as_select())
            .load::<ExpenseDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Expense::from).collect())
    }

    fn list_category_expenses_between(
        &self,
        owner: &str,
        category_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Expense>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = expenses::table
            .filter(expenses::user_id.eq(owner))
            .filter(expenses::category_id.eq(category_id))
            .filter(expenses::date.between(start, end))
            .order(expenses::date.asc())
            .select(ExpenseDB::as_select())
            .load::<ExpenseDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Expense::from).collect())
    }

    async fn create_expense(&self, new_expense: NewExpense) -> Result<Expense> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Expense> {
                let now = local_now();
                let row = NewExpenseDB {
                    id: new_expense.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                    user_id: new_expense.user_id,
                    description: new_expense.description,
                    amount: new_expense.amount.to_string(),
                    category_id: new_expense.category_id,
                    date: new_expense.date,
                    created_at: now,
                    updated_at: now,
                };
                let created = diesel::insert_into(expenses::table)
                    .values(&row)
                    .returning(ExpenseDB::as_returning())
                    .get_result::<ExpenseDB>(conn)
                    .into_core()?;
                Ok(Expense::from(created))
            })
            .await
    }

    async fn update_expense(
        &self,
        owner: &str,
        expense_id: &str,
        update: ExpenseUpdate,
    ) -> Result<Expense> {
        let owner = owner.to_string();
        let expense_id = expense_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Expense> {
                let changes = ExpenseChangesetDB {
                    description: update.description,
                    amount: update.amount.map(|a| a.to_string()),
                    category_id: update.category_id,
                    date: update.date,
                    updated_at: Some(local_now()),
                };
                let updated = diesel::update(
                    expenses::table
                        .filter(expenses::user_id.eq(&owner))
                        .filter(expenses::id.eq(&expense_id)),
                )
                .set(&changes)
                .returning(ExpenseDB::as_returning())
                .get_result::<ExpenseDB>(conn)
                .optional()
                .into_core()?;
                updated
                    .map(Expense::from)
                    .ok_or_else(|| Error::NotFound(format!("Expense {}", expense_id)))
            })
            .await
    }

    async fn delete_expense(&self, owner: &str, expense_id: &str) -> Result<usize> {
        let owner = owner.to_string();
        let expense_id = expense_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    expenses::table
                        .filter(expenses::user_id.eq(owner))
                        .filter(expenses::id.eq(expense_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
