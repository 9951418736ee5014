use chrono::NaiveDate;

use crate::errors::Result;
use crate::reports::reports_model::{DashboardSummary, SpendingReport};
use crate::utils::time_utils::{MonthWindow, ReportRange};

/// Read-only aggregation over a user's records
pub trait ReportServiceTrait: Send + Sync {
    fn get_dashboard_summary(&self, user_id: &str, month: MonthWindow) -> Result<DashboardSummary>;

    /// Spending over `range` resolved against `today`.
    fn get_spending_report(
        &self,
        user_id: &str,
        range: ReportRange,
        today: NaiveDate,
    ) -> Result<SpendingReport>;
}
