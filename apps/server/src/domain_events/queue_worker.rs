//! Event queue worker for processing domain events.
//!
//! Receives events from an mpsc channel and handles them one at a time, in
//! the order they were emitted.

use std::sync::Arc;

use budgetwise_core::budget_warning::BudgetWarningEvaluator;
use budgetwise_core::events::DomainEvent;
use tokio::sync::mpsc;

/// Dependencies needed by the queue worker for processing events.
pub struct QueueWorkerDeps {
    pub budget_warning_evaluator: Arc<BudgetWarningEvaluator>,
}

/// Runs the event queue worker until every sender is dropped.
pub async fn event_queue_worker(
    mut rx: mpsc::UnboundedReceiver<DomainEvent>,
    deps: Arc<QueueWorkerDeps>,
) {
    tracing::info!("Domain event queue worker started");

    while let Some(event) = rx.recv().await {
        process_event(&event, &deps).await;
    }

    tracing::info!("Domain event queue worker shutting down");
}

/// Processes a single domain event.
///
/// Failures are logged by the handlers and never stop the worker.
async fn process_event(event: &DomainEvent, deps: &QueueWorkerDeps) {
    match event {
        DomainEvent::ExpenseCreated { user_id, expense } => {
            tracing::debug!(
                "Checking budget for expense {} in category {}",
                expense.id,
                expense.category_id
            );
            // Outcome and failures are logged by the evaluator
            let _ = deps
                .budget_warning_evaluator
                .check_and_notify(user_id, expense)
                .await;
        }
    }
}
