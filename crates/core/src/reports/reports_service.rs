use std::sync::Arc;

use chrono::NaiveDate;
use log::debug;

use crate::budgets::BudgetRepositoryTrait;
use crate::categories::CategoryRepositoryTrait;
use crate::constants::RECENT_EXPENSES_LIMIT;
use crate::errors::Result;
use crate::expenses::{Expense, ExpenseFilter, ExpenseRepositoryTrait};
use crate::reports::reports_calculator::{
    budgets_with_spent, daily_spending, percent_change, spending_by_category, total_spent,
};
use crate::reports::reports_model::{DashboardSummary, SpendingReport};
use crate::reports::reports_traits::ReportServiceTrait;
use crate::utils::time_utils::{DateRange, MonthWindow, ReportRange};

pub struct ReportService {
    category_repo: Arc<dyn CategoryRepositoryTrait>,
    budget_repo: Arc<dyn BudgetRepositoryTrait>,
    expense_repo: Arc<dyn ExpenseRepositoryTrait>,
}

impl ReportService {
    pub fn new(
        category_repo: Arc<dyn CategoryRepositoryTrait>,
        budget_repo: Arc<dyn BudgetRepositoryTrait>,
        expense_repo: Arc<dyn ExpenseRepositoryTrait>,
    ) -> Self {
        ReportService {
            category_repo,
            budget_repo,
            expense_repo,
        }
    }

    fn expenses_in(&self, user_id: &str, range: &DateRange) -> Result<Vec<Expense>> {
        self.expense_repo.list_expenses(
            user_id,
            &ExpenseFilter {
                category_id: None,
                start: Some(range.start),
                end: Some(range.end),
            },
        )
    }
}

impl ReportServiceTrait for ReportService {
    fn get_dashboard_summary(&self, user_id: &str, month: MonthWindow) -> Result<DashboardSummary> {
        let categories = self.category_repo.get_categories(user_id)?;
        let budgets = self.budget_repo.get_budgets(user_id)?;
        let expenses = self.expenses_in(user_id, &month.as_range())?;
        let previous = self.expenses_in(user_id, &month.previous().as_range())?;

        let total = total_spent(&expenses);
        let previous_total = total_spent(&previous);
        debug!(
            "Dashboard for {} in {}: {} expenses, total {}",
            user_id,
            month.month_key(),
            expenses.len(),
            total
        );

        Ok(DashboardSummary {
            month: month.month_key(),
            total_spent: total,
            previous_month_total: previous_total,
            change_percent: percent_change(total, previous_total),
            budgets: budgets_with_spent(&budgets, &categories, &expenses, &month),
            spending_by_category: spending_by_category(&expenses, &categories),
            recent_expenses: self
                .expense_repo
                .list_recent_expenses(user_id, RECENT_EXPENSES_LIMIT)?,
        })
    }

    fn get_spending_report(
        &self,
        user_id: &str,
        range: ReportRange,
        today: NaiveDate,
    ) -> Result<SpendingReport> {
        let window = range.resolve(today);
        let categories = self.category_repo.get_categories(user_id)?;
        let budgets = self.budget_repo.get_budgets(user_id)?;
        let expenses = self.expenses_in(user_id, &window)?;

        let month = MonthWindow::containing(window.end);
        let month_expenses = self.expenses_in(user_id, &month.as_range())?;

        Ok(SpendingReport {
            range,
            start: window.start,
            end: window.end,
            total_spent: total_spent(&expenses),
            daily_spending: daily_spending(&expenses, &window),
            category_breakdown: spending_by_category(&expenses, &categories),
            budget_adherence: budgets_with_spent(&budgets, &categories, &month_expenses, &month),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dec, InMemoryStore};

    fn service(store: &Arc<InMemoryStore>) -> ReportService {
        ReportService::new(store.clone(), store.clone(), store.clone())
    }

    #[test]
    fn dashboard_compares_with_previous_month() {
        let store = Arc::new(InMemoryStore::default());
        let food = store.seed_category("user-1", "Food");
        store.seed_budget("user-1", &food.id, "100");
        store.seed_expense("user-1", &food.id, "40", "2024-04-12 10:00:00");
        store.seed_expense("user-1", &food.id, "50", "2024-05-02 10:00:00");
        store.seed_expense("user-1", &food.id, "10", "2024-05-20 10:00:00");
        store.seed_expense("user-2", &food.id, "999", "2024-05-20 10:00:00");

        let summary = service(&store)
            .get_dashboard_summary("user-1", MonthWindow::parse_month("2024-05").unwrap())
            .unwrap();

        assert_eq!(summary.month, "2024-05");
        assert_eq!(summary.total_spent, dec("60"));
        assert_eq!(summary.previous_month_total, dec("40"));
        assert_eq!(summary.change_percent, Some(50.0));
        assert_eq!(summary.budgets[0].spent, dec("60"));
        assert_eq!(summary.budgets[0].percent_used, 60.0);
        assert_eq!(summary.spending_by_category[0].category_name, "Food");
        assert_eq!(summary.recent_expenses.len(), 3);
        assert_eq!(summary.recent_expenses[0].amount, dec("10"));
    }

    #[test]
    fn recent_expenses_are_capped() {
        let store = Arc::new(InMemoryStore::default());
        let food = store.seed_category("user-1", "Food");
        for day in 1..=8 {
            store.seed_expense(
                "user-1",
                &food.id,
                "1",
                &format!("2024-05-{:02} 10:00:00", day),
            );
        }

        let summary = service(&store)
            .get_dashboard_summary("user-1", MonthWindow::parse_month("2024-05").unwrap())
            .unwrap();
        assert_eq!(summary.recent_expenses.len(), RECENT_EXPENSES_LIMIT as usize);
        assert!(summary.change_percent.is_none());
    }

    #[test]
    fn spending_report_covers_resolved_range() {
        let store = Arc::new(InMemoryStore::default());
        let food = store.seed_category("user-1", "Food");
        store.seed_expense("user-1", &food.id, "5", "2024-05-14 10:00:00");
        store.seed_expense("user-1", &food.id, "7", "2024-05-01 10:00:00");

        let today = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let report = service(&store)
            .get_spending_report("user-1", ReportRange::Last7Days, today)
            .unwrap();

        assert_eq!(report.total_spent, dec("5"));
        assert_eq!(report.daily_spending.len(), 8);
        assert_eq!(report.category_breakdown.len(), 1);
        assert!(report.budget_adherence.is_empty());
    }
}
