//! Where core services hand off events for follow-up work.

use std::sync::{Arc, Mutex};

use super::DomainEvent;

/// Receiver of events raised by core services once a write has committed.
///
/// `emit` is called on the request path, after the data is already stored.
/// It must return immediately without touching the database, and it has no
/// way to report failure: a lost event never undoes the write.
pub trait DomainEventSink: Send + Sync {
    fn emit(&self, event: DomainEvent);
}

/// Sink that drops every event, for callers with no follow-up work.
#[derive(Clone, Default)]
pub struct NoOpDomainEventSink;

impl DomainEventSink for NoOpDomainEventSink {
    fn emit(&self, _event: DomainEvent) {}
}

/// Sink that records events in memory so tests can inspect them.
///
/// Clones share the same buffer.
#[derive(Clone, Default)]
pub struct MockDomainEventSink {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl MockDomainEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far, oldest first.
    pub fn events(&self) -> Vec<DomainEvent> {
        self.recorded().clone()
    }

    pub fn len(&self) -> usize {
        self.recorded().len()
    }

    pub fn is_empty(&self) -> bool {
        self.recorded().is_empty()
    }

    fn recorded(&self) -> std::sync::MutexGuard<'_, Vec<DomainEvent>> {
        match self.events.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl DomainEventSink for MockDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        self.recorded().push(event);
    }
}
