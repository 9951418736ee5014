//! Web domain event sink implementation.
//!
//! Receives domain events and sends them to a background queue worker.

use std::sync::{Arc, Mutex};

use budgetwise_core::events::{DomainEvent, DomainEventSink};
use tokio::sync::mpsc;

use super::queue_worker::{event_queue_worker, QueueWorkerDeps};

/// Domain event sink for the web server runtime.
///
/// # Two-Phase Initialization
///
/// Services that emit events need the sink at construction time, while the
/// worker needs the repositories those services share. So:
///
/// 1. Create the sink with `new()`; this only creates the channel
/// 2. Call `start_worker()` once the dependencies exist; this spawns the worker
pub struct WebDomainEventSink {
    tx: mpsc::UnboundedSender<DomainEvent>,
    rx: Mutex<Option<mpsc::UnboundedReceiver<DomainEvent>>>,
}

impl WebDomainEventSink {
    /// Creates a new sink. Events emitted before `start_worker()` are buffered.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        Self {
            tx,
            rx: Mutex::new(Some(rx)),
        }
    }

    /// Spawns the background worker that processes events.
    ///
    /// Returns `false` if the worker was already started.
    pub fn start_worker(&self, deps: QueueWorkerDeps) -> bool {
        let rx = match self.rx.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        let Some(rx) = rx else {
            tracing::warn!("Domain event worker already started");
            return false;
        };

        tokio::spawn(event_queue_worker(rx, Arc::new(deps)));
        true
    }

    #[cfg(test)]
    pub fn with_sender(tx: mpsc::UnboundedSender<DomainEvent>) -> Self {
        Self {
            tx,
            rx: Mutex::new(None),
        }
    }
}

impl Default for WebDomainEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainEventSink for WebDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        // Unbounded send never blocks; it only fails once the worker is gone
        if let Err(e) = self.tx.send(event) {
            tracing::warn!("Failed to emit domain event: {}", e);
        }
    }
}
