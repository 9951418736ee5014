use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;

use crate::budgets::budgets_model::{Budget, BudgetUpdate, BudgetWithSpent, NewBudget};
use crate::budgets::budgets_traits::{BudgetRepositoryTrait, BudgetServiceTrait};
use crate::categories::CategoryRepositoryTrait;
use crate::errors::{Error, Result};
use crate::expenses::{ExpenseFilter, ExpenseRepositoryTrait};
use crate::reports::budgets_with_spent;
use crate::utils::time_utils::MonthWindow;

pub struct BudgetService {
    budget_repo: Arc<dyn BudgetRepositoryTrait>,
    category_repo: Arc<dyn CategoryRepositoryTrait>,
    expense_repo: Arc<dyn ExpenseRepositoryTrait>,
}

impl BudgetService {
    pub fn new(
        budget_repo: Arc<dyn BudgetRepositoryTrait>,
        category_repo: Arc<dyn CategoryRepositoryTrait>,
        expense_repo: Arc<dyn ExpenseRepositoryTrait>,
    ) -> Self {
        BudgetService {
            budget_repo,
            category_repo,
            expense_repo,
        }
    }

    fn validate_amount(amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(Error::invalid_input("Budget amount must be greater than zero"));
        }
        Ok(())
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    fn get_budgets(&self, user_id: &str) -> Result<Vec<Budget>> {
        self.budget_repo.get_budgets(user_id)
    }

    fn get_budget(&self, user_id: &str, budget_id: &str) -> Result<Budget> {
        self.budget_repo
            .get_budget_by_id(user_id, budget_id)?
            .ok_or_else(|| Error::NotFound(format!("Budget {}", budget_id)))
    }

    async fn create_budget(&self, user_id: &str, new_budget: NewBudget) -> Result<Budget> {
        Self::validate_amount(new_budget.amount)?;

        if self
            .category_repo
            .get_category_by_id(user_id, &new_budget.category_id)?
            .is_none()
        {
            return Err(Error::NotFound(format!("Category {}", new_budget.category_id)));
        }
        if self
            .budget_repo
            .get_budget_for_category(user_id, &new_budget.category_id)?
            .is_some()
        {
            return Err(Error::ConstraintViolation(format!(
                "A budget already exists for category {}",
                new_budget.category_id
            )));
        }

        let created = self
            .budget_repo
            .create_budget(NewBudget {
                user_id: user_id.to_string(),
                ..new_budget
            })
            .await?;
        debug!(
            "Created budget {} of {} for category {}",
            created.id, created.amount, created.category_id
        );
        Ok(created)
    }

    async fn update_budget(
        &self,
        user_id: &str,
        budget_id: &str,
        update: BudgetUpdate,
    ) -> Result<Budget> {
        Self::validate_amount(update.amount)?;
        self.get_budget(user_id, budget_id)?;
        self.budget_repo
            .update_budget(user_id, budget_id, update)
            .await
    }

    async fn delete_budget(&self, user_id: &str, budget_id: &str) -> Result<usize> {
        self.get_budget(user_id, budget_id)?;
        self.budget_repo.delete_budget(user_id, budget_id).await
    }

    fn get_budgets_with_spent(
        &self,
        user_id: &str,
        month: MonthWindow,
    ) -> Result<Vec<BudgetWithSpent>> {
        let budgets = self.budget_repo.get_budgets(user_id)?;
        let categories = self.category_repo.get_categories(user_id)?;
        let expenses = self.expense_repo.list_expenses(
            user_id,
            &ExpenseFilter {
                category_id: None,
                start: Some(month.start),
                end: Some(month.end),
            },
        )?;
        Ok(budgets_with_spent(&budgets, &categories, &expenses, &month))
    }
}
