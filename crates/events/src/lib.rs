//! Event abstractions: domain event trait + pub/sub bus mechanics.
//!
//! The bus is the **deferred notification** channel between a committed
//! lifecycle transition and any optional downstream consumer (the order
//! archive, in this deployment). Publication is best-effort: a failed publish
//! is reported to the caller but never rolls back the primary transition.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use envelope::Envelope;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
