//! Domain events runtime bridge for the web server.
//!
//! Receives domain events via `DomainEventSink` and runs the follow-up work
//! on a background worker, off the request path:
//! - Budget warning check for every newly created expense

mod queue_worker;
mod sink;

pub use queue_worker::QueueWorkerDeps;
pub use sink::WebDomainEventSink;
