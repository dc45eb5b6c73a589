//! Event publisher adapters.
//!
//! - `InMemoryEventBus` - Captures published envelopes for assertions
//! - `TracingEventPublisher` - Writes every envelope to the tracing log

mod in_memory;
mod tracing_publisher;

pub use in_memory::InMemoryEventBus;
pub use tracing_publisher::TracingEventPublisher;
