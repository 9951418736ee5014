use std::sync::Arc;

use crate::config::Config;
use crate::domain_events::{QueueWorkerDeps, WebDomainEventSink};
use budgetwise_core::{
    budget_warning::BudgetWarningEvaluator,
    budgets::{BudgetService, BudgetServiceTrait},
    categories::{CategoryService, CategoryServiceTrait},
    events::DomainEventSink,
    expenses::{ExpenseService, ExpenseServiceTrait},
    notifications::{NotificationService, NotificationServiceTrait},
    reports::{ReportService, ReportServiceTrait},
};
use budgetwise_storage_sqlite::{
    budgets::BudgetRepository, categories::CategoryRepository, db, expenses::ExpenseRepository,
    notifications::NotificationRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub category_service: Arc<dyn CategoryServiceTrait>,
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub expense_service: Arc<dyn ExpenseServiceTrait>,
    pub notification_service: Arc<dyn NotificationServiceTrait>,
    pub report_service: Arc<dyn ReportServiceTrait>,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Core crates log through `log`; `try_init` also installs the log bridge
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let category_repo = Arc::new(CategoryRepository::new(pool.clone(), writer.clone()));
    let budget_repo = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));
    let expense_repo = Arc::new(ExpenseRepository::new(pool.clone(), writer.clone()));
    let notification_repo = Arc::new(NotificationRepository::new(pool.clone(), writer.clone()));

    // Services that emit events need the sink before the worker can start
    let event_sink = Arc::new(WebDomainEventSink::new());

    let category_service = Arc::new(CategoryService::new(category_repo.clone()));
    let budget_service = Arc::new(BudgetService::new(
        budget_repo.clone(),
        category_repo.clone(),
        expense_repo.clone(),
    ));
    let expense_service = Arc::new(ExpenseService::new(
        expense_repo.clone(),
        category_repo.clone(),
        event_sink.clone() as Arc<dyn DomainEventSink>,
    ));
    let notification_service = Arc::new(NotificationService::new(notification_repo.clone()));
    let report_service = Arc::new(ReportService::new(
        category_repo.clone(),
        budget_repo.clone(),
        expense_repo.clone(),
    ));

    let budget_warning_evaluator = Arc::new(BudgetWarningEvaluator::new(
        budget_repo,
        category_repo,
        expense_repo,
        notification_repo,
    ));
    event_sink.start_worker(QueueWorkerDeps {
        budget_warning_evaluator,
    });

    Ok(Arc::new(AppState {
        category_service,
        budget_service,
        expense_service,
        notification_service,
        report_service,
    }))
}
