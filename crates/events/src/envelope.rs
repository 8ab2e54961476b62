use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope for a published event.
///
/// Carries a unique event id so consumers can deduplicate (the bus may
/// deliver a message more than once) and so log lines are correlatable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<E> {
    event_id: Uuid,
    payload: E,
}

impl<E> Envelope<E> {
    /// Wrap a payload, assigning a fresh time-ordered event id.
    pub fn new(payload: E) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            payload,
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}
