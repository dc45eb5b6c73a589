//! Event publisher that writes envelopes to the tracing log.
//!
//! Used by the binary, where no broker is attached and the computed
//! profile is handed back to the caller directly.

use async_trait::async_trait;
use tracing::info;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventPublisher;

/// Logs every published event at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventPublisher;

impl TracingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        info!(
            event_id = %event.event_id,
            event_type = %event.event_type,
            aggregate_id = %event.aggregate_id,
            occurred_at = %event.occurred_at,
            "Event published"
        );
        Ok(())
    }
}
