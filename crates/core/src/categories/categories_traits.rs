use crate::categories::categories_model::{Category, CategoryUpdate, NewCategory};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for category repository operations.
///
/// Every method is scoped to the owning user.
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    fn get_categories(&self, user_id: &str) -> Result<Vec<Category>>;

    fn get_category_by_id(&self, user_id: &str, category_id: &str) -> Result<Option<Category>>;

    async fn create_category(&self, new_category: NewCategory) -> Result<Category>;

    async fn update_category(
        &self,
        user_id: &str,
        category_id: &str,
        update: CategoryUpdate,
    ) -> Result<Category>;

    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<usize>;

    /// Number of expenses and budgets that still reference the category
    fn count_references(&self, user_id: &str, category_id: &str) -> Result<i64>;
}

/// Trait for category service operations
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    fn get_categories(&self, user_id: &str) -> Result<Vec<Category>>;

    fn get_category(&self, user_id: &str, category_id: &str) -> Result<Category>;

    async fn create_category(&self, user_id: &str, new_category: NewCategory) -> Result<Category>;

    async fn update_category(
        &self,
        user_id: &str,
        category_id: &str,
        update: CategoryUpdate,
    ) -> Result<Category>;

    /// Deletes a category; fails while expenses or budgets still reference it.
    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<usize>;
}
