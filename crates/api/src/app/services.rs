use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};

use stockroom_core::{DomainResult, OrderId, Sku};
use stockroom_events::{Envelope, EventBus, InMemoryEventBus};
use stockroom_inventory::{InventoryItem, ReceiptOutcome};
use stockroom_orders::{NewSupplierOrder, OrderEvent, OrderStatus, SupplierOrder};
use stockroom_sales::{NewSalesOrder, SalesOrder};
use stockroom_store::{
    InMemoryInventoryStore, InMemoryOrderArchive, InMemoryOrderStore, InMemorySalesStore,
    InventoryStore, OrderQuery, OrderStore, Page, ProjectionWorker, SalesStore, WorkerHandle,
    projections, query,
};

/// Default low-stock threshold when the caller does not supply one.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Fields a `PUT /api/supplier-orders/:id` may change. A `None` field is
/// "leave unchanged", not "clear".
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
    pub tracking_number: Option<String>,
    pub notes: Option<String>,
    pub expected_date: Option<NaiveDate>,
}

/// Result of receiving an order: the committed order, the per-line inventory
/// outcome, and whether the archive sync event was published.
#[derive(Debug)]
pub struct ReceiveOutcome {
    pub order: SupplierOrder,
    pub receipt: ReceiptOutcome,
    pub synced: bool,
}

#[derive(Debug)]
pub struct UpdateOutcome {
    pub order: SupplierOrder,
    /// Present only when the update moved the order to `received`.
    pub receipt: Option<ReceiptOutcome>,
    pub synced: bool,
}

/// Application services: the stores, the event bus, and the background
/// archive worker, behind the operations the HTTP handlers call.
///
/// All order mutations run under the store lock via `OrderStore::update`, so
/// two racing receives admit exactly one winner and inventory is incremented
/// exactly once per order.
pub struct AppServices {
    orders: InMemoryOrderStore,
    sales: InMemorySalesStore,
    inventory: InMemoryInventoryStore,
    bus: Arc<InMemoryEventBus<Envelope<OrderEvent>>>,
    archive: Arc<InMemoryOrderArchive>,
    archive_worker: WorkerHandle,
}

impl AppServices {
    /// Wire up in-memory stores plus the archive projection worker.
    pub fn in_memory(po_base: u64) -> Self {
        let bus = Arc::new(InMemoryEventBus::new());
        let archive = Arc::new(InMemoryOrderArchive::new());

        let worker_archive = Arc::clone(&archive);
        let archive_worker = ProjectionWorker::spawn(
            "order-archive",
            Arc::clone(&bus),
            move |envelope: Envelope<OrderEvent>| {
                worker_archive.apply(&envelope);
                Ok::<(), std::convert::Infallible>(())
            },
        );

        Self {
            orders: InMemoryOrderStore::with_base(po_base),
            sales: InMemorySalesStore::new(),
            inventory: InMemoryInventoryStore::new(),
            bus,
            archive,
            archive_worker,
        }
    }

    /// Stop the archive worker and wait for it. Used by tests; in the server
    /// the worker lives for the whole process.
    pub fn shutdown(self) {
        self.archive_worker.shutdown();
    }

    /// Best-effort publish of a lifecycle event. The store is the source of
    /// truth; a failed publish only means the archive mirror lags.
    fn publish(&self, event: OrderEvent) -> bool {
        match self.bus.publish(Envelope::new(event)) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = ?err, "event publish failed; archive mirror will lag");
                false
            }
        }
    }

    // --- supplier orders -------------------------------------------------

    pub fn create_order(&self, new: NewSupplierOrder) -> DomainResult<(SupplierOrder, bool)> {
        let order = self.orders.create(new)?;
        info!(
            order = %order.order_number(),
            supplier = %order.supplier_name(),
            "supplier order created"
        );
        let synced = self.publish(OrderEvent::Created {
            order: order.clone(),
            occurred_at: Utc::now(),
        });
        Ok((order, synced))
    }

    pub fn get_order(&self, id: OrderId) -> Option<SupplierOrder> {
        self.orders.get(id)
    }

    pub fn list_orders(&self, q: &OrderQuery) -> Page<SupplierOrder> {
        query::run(self.orders.list(), q)
    }

    pub fn orders_with_status(&self, status: OrderStatus) -> Vec<SupplierOrder> {
        self.orders
            .list()
            .into_iter()
            .filter(|o| o.status() == status)
            .collect()
    }

    /// Same query layer as `list_orders`, over the archive mirror. Eventually
    /// consistent with the primary store.
    pub fn archive_orders(&self, q: &OrderQuery) -> Page<SupplierOrder> {
        query::run(self.archive.list(), q)
    }

    pub fn receive_order(&self, id: OrderId) -> DomainResult<ReceiveOutcome> {
        let today = Utc::now().date_naive();
        let order = self.orders.update(id, &mut |o| o.receive(today))?;

        // Only the transition winner reaches this point, so the receipt is
        // applied at most once per order.
        let receipt = projections::apply_receipt(&self.inventory, order.items());
        info!(
            order = %order.order_number(),
            updated = receipt.updates.len(),
            skipped = receipt.errors.len(),
            "supplier order received"
        );

        let synced = self.publish(OrderEvent::Received {
            order: order.clone(),
            items: order.items().to_vec(),
            occurred_at: Utc::now(),
        });
        Ok(ReceiveOutcome {
            order,
            receipt,
            synced,
        })
    }

    pub fn cancel_order(&self, id: OrderId) -> DomainResult<(SupplierOrder, bool)> {
        let order = self.orders.update(id, &mut |o| o.cancel())?;
        info!(order = %order.order_number(), "supplier order cancelled");
        let synced = self.publish(OrderEvent::Cancelled {
            order: order.clone(),
            occurred_at: Utc::now(),
        });
        Ok((order, synced))
    }

    /// Apply a patch in one locked mutation. A rejected status transition
    /// fails the whole update, so field edits never commit alongside it.
    pub fn update_order(&self, id: OrderId, patch: OrderPatch) -> DomainResult<UpdateOutcome> {
        let today = Utc::now().date_naive();
        let mut from = None;
        let order = self.orders.update(id, &mut |o| {
            from = Some(o.status());
            if let Some(tracking) = patch.tracking_number.clone() {
                o.set_tracking_number(Some(tracking));
            }
            if let Some(notes) = patch.notes.clone() {
                o.set_notes(Some(notes));
            }
            if let Some(expected) = patch.expected_date {
                o.set_expected_date(Some(expected));
            }
            if let Some(status) = patch.status {
                o.set_status(status, today)?;
            }
            Ok(())
        })?;

        let receipt = match patch.status {
            Some(OrderStatus::Received) => {
                Some(projections::apply_receipt(&self.inventory, order.items()))
            }
            _ => None,
        };

        let event = match patch.status {
            Some(OrderStatus::Received) => OrderEvent::Received {
                order: order.clone(),
                items: order.items().to_vec(),
                occurred_at: Utc::now(),
            },
            Some(OrderStatus::Cancelled) => OrderEvent::Cancelled {
                order: order.clone(),
                occurred_at: Utc::now(),
            },
            Some(to) => OrderEvent::StatusChanged {
                order: order.clone(),
                from: from.unwrap_or(to),
                to,
                occurred_at: Utc::now(),
            },
            None => OrderEvent::Updated {
                order: order.clone(),
                occurred_at: Utc::now(),
            },
        };
        let synced = self.publish(event);

        Ok(UpdateOutcome {
            order,
            receipt,
            synced,
        })
    }

    // --- inventory -------------------------------------------------------

    pub fn list_inventory(&self) -> Vec<InventoryItem> {
        self.inventory.list()
    }

    /// Items at or below `threshold`.
    pub fn low_stock(&self, threshold: i64) -> Vec<InventoryItem> {
        self.inventory
            .list()
            .into_iter()
            .filter(|item| item.quantity() <= threshold)
            .collect()
    }

    pub fn add_book(
        &self,
        sku: Sku,
        title: String,
        quantity: i64,
        unit_price: Decimal,
    ) -> DomainResult<InventoryItem> {
        let item = InventoryItem::with_quantity(sku, title, quantity, unit_price)?;
        self.inventory.add_book(item.clone())?;
        info!(sku = %item.sku(), quantity, "book added to inventory");
        Ok(item)
    }

    pub fn add_delivery(&self, sku: &Sku, amount: i64) -> DomainResult<InventoryItem> {
        let item = self.inventory.add_delivery(sku, amount)?;
        info!(sku = %item.sku(), amount, new_total = item.quantity(), "delivery recorded");
        Ok(item)
    }

    // --- sales orders ----------------------------------------------------

    pub fn create_sales_order(&self, new: NewSalesOrder) -> DomainResult<SalesOrder> {
        let order = self.sales.create(new)?;
        info!(order = %order.id(), customer = %order.customer_name(), "sales order created");
        Ok(order)
    }

    pub fn list_sales_orders(&self) -> Vec<SalesOrder> {
        self.sales.list()
    }

    pub fn cancel_sales_order(&self, id: OrderId) -> DomainResult<SalesOrder> {
        self.sales.update(id, &mut |o| o.cancel())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rust_decimal::Decimal;

    use stockroom_core::DomainError;
    use stockroom_orders::LineItem;

    use super::*;

    fn new_order(supplier: &str, skus: &[(&str, i64)]) -> NewSupplierOrder {
        NewSupplierOrder {
            supplier_name: supplier.to_string(),
            date: Utc::now().date_naive(),
            items: skus
                .iter()
                .map(|(sku, qty)| LineItem {
                    sku: Sku::new(*sku),
                    title: format!("Book {sku}"),
                    quantity: *qty,
                    unit_price: Decimal::new(125, 1),
                })
                .collect(),
            total: None,
            expected_date: None,
            notes: None,
        }
    }

    #[test]
    fn receive_applies_inventory_once() {
        let services = AppServices::in_memory(5001);
        let (order, _) = services
            .create_order(new_order("Acme Books", &[("BK-001", 10)]))
            .unwrap();

        let outcome = services.receive_order(order.id()).unwrap();
        assert_eq!(outcome.receipt.updates.len(), 1);
        assert_eq!(outcome.receipt.updates[0].new_total, 10);

        let err = services.receive_order(order.id()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition(_)));
        let item = services.list_inventory().into_iter().next().unwrap();
        assert_eq!(item.quantity(), 10);

        services.shutdown();
    }

    #[test]
    fn rejected_status_update_commits_nothing() {
        let services = AppServices::in_memory(5001);
        let (order, _) = services
            .create_order(new_order("Acme Books", &[("BK-001", 1)]))
            .unwrap();
        services.cancel_order(order.id()).unwrap();

        let err = services
            .update_order(
                order.id(),
                OrderPatch {
                    status: Some(OrderStatus::Received),
                    tracking_number: Some("TRK-1".to_string()),
                    ..OrderPatch::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition(_)));

        let order = services.get_order(order.id()).unwrap();
        assert_eq!(order.tracking_number(), None);
        assert!(services.list_inventory().is_empty());

        services.shutdown();
    }

    #[test]
    fn archive_mirrors_lifecycle_eventually() {
        let services = AppServices::in_memory(5001);
        let (order, synced) = services
            .create_order(new_order("Acme Books", &[("BK-001", 2)]))
            .unwrap();
        assert!(synced);
        services.receive_order(order.id()).unwrap();

        // Worker runs on its own thread; poll briefly.
        let mut mirrored = None;
        for _ in 0..100 {
            let page = services.archive_orders(&OrderQuery::default());
            if let Some(o) = page.data.iter().find(|o| o.status().is_terminal()) {
                mirrored = Some(o.clone());
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        let mirrored = mirrored.expect("archive never caught up");
        assert_eq!(mirrored.id(), order.id());
        assert_eq!(mirrored.status(), OrderStatus::Received);

        services.shutdown();
    }
}
