use std::sync::Arc;

use crate::{api::budgets::month_or_current, auth::UserId, error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use budgetwise_core::{
    reports::{DashboardSummary, SpendingReport},
    utils::time_utils::{local_today, ReportRange},
};
use serde::Deserialize;

#[derive(Deserialize)]
struct DashboardQuery {
    month: Option<String>,
}

#[derive(Deserialize)]
struct SpendingQuery {
    range: Option<String>,
}

async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
    Query(q): Query<DashboardQuery>,
) -> ApiResult<Json<DashboardSummary>> {
    let month = month_or_current(q.month.as_deref())?;
    let summary = state
        .report_service
        .get_dashboard_summary(user.as_str(), month)?;
    Ok(Json(summary))
}

async fn get_spending_report(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<UserId>,
    Query(q): Query<SpendingQuery>,
) -> ApiResult<Json<SpendingReport>> {
    let range = match q.range.as_deref() {
        Some(r) => r.parse::<ReportRange>()?,
        None => ReportRange::default(),
    };
    let report = state
        .report_service
        .get_spending_report(user.as_str(), range, local_today())?;
    Ok(Json(report))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reports/dashboard", get(get_dashboard))
        .route("/reports/spending", get(get_spending_report))
}
