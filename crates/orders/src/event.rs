use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::OrderId;
use stockroom_events::Event;

use crate::order::{LineItem, OrderStatus, SupplierOrder};

/// Domain events emitted after a committed supplier-order transition.
///
/// Each event carries a full snapshot of the order so downstream consumers
/// (the order archive) can mirror state without a read back into the primary
/// store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OrderEvent {
    Created {
        order: SupplierOrder,
        occurred_at: DateTime<Utc>,
    },
    Received {
        order: SupplierOrder,
        items: Vec<LineItem>,
        occurred_at: DateTime<Utc>,
    },
    Cancelled {
        order: SupplierOrder,
        occurred_at: DateTime<Utc>,
    },
    StatusChanged {
        order: SupplierOrder,
        from: OrderStatus,
        to: OrderStatus,
        occurred_at: DateTime<Utc>,
    },
    Updated {
        order: SupplierOrder,
        occurred_at: DateTime<Utc>,
    },
}

impl OrderEvent {
    pub fn order(&self) -> &SupplierOrder {
        match self {
            OrderEvent::Created { order, .. }
            | OrderEvent::Received { order, .. }
            | OrderEvent::Cancelled { order, .. }
            | OrderEvent::StatusChanged { order, .. }
            | OrderEvent::Updated { order, .. } => order,
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.order().id()
    }
}

impl Event for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::Created { .. } => "orders.supplier.created",
            OrderEvent::Received { .. } => "orders.supplier.received",
            OrderEvent::Cancelled { .. } => "orders.supplier.cancelled",
            OrderEvent::StatusChanged { .. } => "orders.supplier.status_changed",
            OrderEvent::Updated { .. } => "orders.supplier.updated",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            OrderEvent::Created { occurred_at, .. }
            | OrderEvent::Received { occurred_at, .. }
            | OrderEvent::Cancelled { occurred_at, .. }
            | OrderEvent::StatusChanged { occurred_at, .. }
            | OrderEvent::Updated { occurred_at, .. } => *occurred_at,
        }
    }
}
