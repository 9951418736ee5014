use budgetwise_core::categories::{
    Category, CategoryRepositoryTrait, CategoryUpdate, NewCategory,
};
use budgetwise_core::errors::Error;
use budgetwise_core::utils::time_utils::local_now;
use budgetwise_core::Result;

use super::model::{CategoryDB, NewCategoryDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{budgets, categories, expenses};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct CategoryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CategoryRepository { pool, writer }
    }
}

fn load_category(conn: &mut SqliteConnection, owner: &str, category_id: &str) -> Result<Category> {
    categories::table
        .filter(categories::user_id.eq(owner))
        .filter(categories::id.eq(category_id))
        .select(CategoryDB::as_select())
        .first::<CategoryDB>(conn)
        .optional()
        .into_core()?
        .map(Category::from)
        .ok_or_else(|| Error::NotFound(format!("Category {}", category_id)))
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    fn get_categories(&self, owner: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = categories::table
            .filter(categories::user_id.eq(owner))
            .order(categories::name.asc())
            .select(CategoryDB::as_select())
            .load::<CategoryDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    fn get_category_by_id(&self, owner: &str, category_id: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;
        let row = categories::table
            .filter(categories::user_id.eq(owner))
            .filter(categories::id.eq(category_id))
            .select(CategoryDB::as_select())
            .first::<CategoryDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Category::from))
    }

    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let now = local_now();
                let row = NewCategoryDB {
                    id: new_category
                        .id
                        .unwrap_or_else(|| Uuid::new_v4().to_string()),
                    user_id: new_category.user_id,
                    name: new_category.name,
                    icon_name: new_category.icon_name,
                    created_at: now,
                    updated_at: now,
                };
                let created = diesel::insert_into(categories::table)
                    .values(&row)
                    .returning(CategoryDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(Category::from(created))
            })
            .await
    }

    async fn update_category(
        &self,
        owner: &str,
        category_id: &str,
        update: CategoryUpdate,
    ) -> Result<Category> {
        let owner = owner.to_string();
        let category_id = category_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let current = load_category(conn, &owner, &category_id)?;
                diesel::update(categories::table.find(category_id.as_str()))
                    .set((
                        categories::name.eq(update.name.unwrap_or(current.name)),
                        categories::icon_name.eq(update.icon_name.or(current.icon_name)),
                        categories::updated_at.eq(local_now()),
                    ))
                    .execute(conn)
                    .into_core()?;
                load_category(conn, &owner, &category_id)
            })
            .await
    }

    async fn delete_category(&self, owner: &str, category_id: &str) -> Result<usize> {
        let owner = owner.to_string();
        let category_id = category_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    categories::table
                        .filter(categories::user_id.eq(owner))
                        .filter(categories::id.eq(category_id)),
                )
                .execute(conn)
                .into_core()
            })
            .await
    }

    fn count_references(&self, owner: &str, category_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        let expense_count: i64 = expenses::table
            .filter(expenses::user_id.eq(owner))
            .filter(expenses::category_id.eq(category_id))
            .count()
            .get_result(&mut conn)
            .into_core()?;
        let budget_count: i64 = budgets::table
            .filter(budgets::user_id.eq(owner))
            .filter(budgets::category_id.eq(category_id))
            .count()
            .get_result(&mut conn)
            .into_core()?;
        Ok(expense_count + budget_count)
    }
}
