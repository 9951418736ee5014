//! Reports module - dashboard and spending aggregation.

mod reports_calculator;
mod reports_model;
mod reports_service;
mod reports_traits;

pub use reports_calculator::{
    budgets_with_spent, daily_spending, percent_change, percent_of, spending_by_category,
    total_spent,
};
pub use reports_model::{CategorySpending, DailySpending, DashboardSummary, SpendingReport};
pub use reports_service::ReportService;
pub use reports_traits::ReportServiceTrait;
