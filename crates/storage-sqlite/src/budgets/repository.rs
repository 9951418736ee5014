use budgetwise_core::budgets::{Budget, BudgetRepositoryTrait, BudgetUpdate, NewBudget};
use budgetwise_core::errors::Error;
use budgetwise_core::utils::time_utils::local_now;
use budgetwise_core::Result;

use super::model::{BudgetDB, NewBudgetDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::budgets;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct BudgetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        BudgetRepository { pool, writer }
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    fn get_budgets(&self, owner: &str) -> Result<Vec<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = budgets::table
            .filter(budgets::user_id.eq(owner))
            .order(budgets::created_at.asc())
            .select(BudgetDB::as_select())
            .load::<BudgetDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Budget::from).collect())
    }

    fn get_budget_by_id(&self, owner: &str, budget_id: &str) -> Result<Option<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        let row = budgets::table
            .filter(budgets::user_id.eq(owner))
            .filter(budgets::id.eq(budget_id))
            .select(BudgetDB::as_select())
            .first::<BudgetDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Budget::from))
    }

    fn get_budget_for_category(&self, owner: &str, category_id: &str) -> Result<Option<Budget>> {
        let mut conn = get_connection(&self.pool)?;
        let row = budgets::table
            .filter(budgets::user_id.eq(owner))
            .filter(budgets::category_id.eq(category_id))
            .select(BudgetDB::as_select())
            .first::<BudgetDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Budget::from))
    }

    async fn create_budget(&self, new_budget: NewBudget) -> Result<Budget> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let now = local_now();
                let row = NewBudgetDB {
                    id: new_budget.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                    user_id: new_budget.user_id,
                    category_id: new_budget.category_id,
                    amount: new_budget.amount.to_string(),
                    created_at: now,
                    updated_at: now,
                };
                let created = diesel::insert_into(budgets::table)
                    .values(&row)
                    .returning(BudgetDB::as_returning())
                    .get_result::<BudgetDB>(conn)
                    .into_core()?;
                Ok(Budget::from(created))
            })
            .await
    }

    async fn update_budget(
        &self,
        owner: &str,
        budget_id: &str,
        update: BudgetUpdate,
    ) -> Result<Budget> {
        let owner = owner.to_string();
        let budget_id = budget_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Budget> {
                let updated = diesel::update(
                    budgets::table
                        .filter(budgets::user_id.eq(&owner))
                        .filter(budgets::id.eq(&budget_id)),
                )
                .set((
                    budgets::amount.eq(update.amount.to_string()),
                    budgets::updated_at.eq(local_now()),
                ))
                .returning(BudgetDB::as_returning())
                .get_result::<BudgetDB>(conn)
                .optional()
                .into_core()?;
                updated
                    .map(Budget::from)
                    .ok_or_else(|| Error::NotFound(format!("Budget {}", budget_id)))
            })
            .await
    }

    async fn delete_budget(&self, owner: &str, budget_id: &str) -> Result<usize> {
        let owner = owner.to_string();
        let budget_id = budget_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    budgets::table
                        .filter(budgets::user_id.eq(owner))
                        .filter(budgets::id.eq(budget_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }
}
