//! Secondary order archive, fed from the event bus.
//!
//! The archive is a best-effort mirror of the primary order store: a
//! lifecycle operation succeeds or fails on the primary alone, and the
//! archive catches up from published events. Applying an event is an
//! idempotent snapshot upsert, so duplicate delivery is harmless.

use std::collections::BTreeMap;
use std::sync::RwLock;

use stockroom_core::OrderId;
use stockroom_events::Envelope;
use stockroom_orders::{OrderEvent, SupplierOrder};

/// In-memory order archive.
#[derive(Debug, Default)]
pub struct InMemoryOrderArchive {
    inner: RwLock<BTreeMap<OrderId, SupplierOrder>>,
}

impl InMemoryOrderArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror the order snapshot carried by the event.
    pub fn apply(&self, envelope: &Envelope<OrderEvent>) {
        let order = envelope.payload().order().clone();
        if let Ok(mut map) = self.inner.write() {
            map.insert(order.id(), order);
        }
    }

    pub fn get(&self, id: OrderId) -> Option<SupplierOrder> {
        self.inner.read().ok()?.get(&id).cloned()
    }

    pub fn list(&self) -> Vec<SupplierOrder> {
        match self.inner.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
