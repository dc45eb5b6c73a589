//! Assessment domain events.

use serde::{Deserialize, Serialize};

use super::Profile;
use crate::domain::foundation::{domain_event, EventId, SessionId, Timestamp};

/// Published when a sealed ledger has been scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileComputed {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub profile: Profile,
    pub computed_at: Timestamp,
}

impl ProfileComputed {
    pub fn new(session_id: SessionId, profile: Profile) -> Self {
        Self {
            event_id: EventId::new(),
            session_id,
            profile,
            computed_at: Timestamp::now(),
        }
    }
}

domain_event!(
    ProfileComputed,
    event_type = "profile.computed.v1",
    aggregate_id = session_id,
    aggregate_type = "Assessment",
    occurred_at = computed_at,
    event_id = event_id
);
