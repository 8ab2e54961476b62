use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, OrderId};
use stockroom_orders::LineItem;

/// Sales order status. `Cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalesStatus {
    Open,
    Cancelled,
}

impl SalesStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SalesStatus::Open => "open",
            SalesStatus::Cancelled => "cancelled",
        }
    }
}

/// Fields needed to create a sales order.
#[derive(Debug, Clone)]
pub struct NewSalesOrder {
    pub customer_name: String,
    pub items: Vec<LineItem>,
}

/// A front-of-house customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrder {
    id: OrderId,
    customer_name: String,
    items: Vec<LineItem>,
    total: Decimal,
    status: SalesStatus,
    created_at: DateTime<Utc>,
}

impl SalesOrder {
    pub fn create(id: OrderId, new: NewSalesOrder) -> DomainResult<Self> {
        if new.customer_name.trim().is_empty() {
            return Err(DomainError::validation("customer name is required"));
        }
        let total = new.items.iter().map(LineItem::line_total).sum();
        Ok(Self {
            id,
            customer_name: new.customer_name,
            items: new.items,
            total,
            status: SalesStatus::Open,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn status(&self) -> SalesStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn cancel(&mut self) -> DomainResult<()> {
        if self.status == SalesStatus::Cancelled {
            return Err(DomainError::invalid_transition("order is already cancelled"));
        }
        self.status = SalesStatus::Cancelled;
        Ok(())
    }
}
