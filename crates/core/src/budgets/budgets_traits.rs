use crate::budgets::budgets_model::{Budget, BudgetUpdate, BudgetWithSpent, NewBudget};
use crate::errors::Result;
use crate::utils::time_utils::MonthWindow;
use async_trait::async_trait;

/// Trait for budget repository operations
#[async_trait]
pub trait BudgetRepositoryTrait: Send + Sync {
    fn get_budgets(&self, user_id: &str) -> Result<Vec<Budget>>;

    fn get_budget_by_id(&self, user_id: &str, budget_id: &str) -> Result<Option<Budget>>;

    /// At most one budget exists per (user, category)
    fn get_budget_for_category(&self, user_id: &str, category_id: &str)
        -> Result<Option<Budget>>;

    async fn create_budget(&self, new_budget: NewBudget) -> Result<Budget>;

    async fn update_budget(
        &self,
        user_id: &str,
        budget_id: &str,
        update: BudgetUpdate,
    ) -> Result<Budget>;

    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<usize>;
}

/// Trait for budget service operations
#[async_trait]
pub trait BudgetServiceTrait: Send + Sync {
    fn get_budgets(&self, user_id: &str) -> Result<Vec<Budget>>;

    fn get_budget(&self, user_id: &str, budget_id: &str) -> Result<Budget>;

    async fn create_budget(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget>;

    async fn update_budget(
        &self,
        user_id: &str,
        budget_id: &str,
        update: BudgetUpdate,
    ) -> Result<Budget>;

    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<usize>;

    /// Budgets with spending derived from the expenses dated inside `month`.
    fn get_budgets_with_spent(&self, user_id: &str, month: MonthWindow)
        -> Result<Vec<BudgetWithSpent>>;
}
