//! Sales-order store abstraction and in-memory implementation.

use std::collections::BTreeMap;
use std::sync::Mutex;

use stockroom_core::{DomainError, DomainResult, OrderId};
use stockroom_sales::{NewSalesOrder, SalesOrder};

/// Mutation applied to a sales order under the store lock.
pub type SalesMutation<'a> = &'a mut dyn FnMut(&mut SalesOrder) -> DomainResult<()>;

/// Store of customer sales orders. Same locking contract as [`crate::OrderStore`].
pub trait SalesStore: Send + Sync {
    fn create(&self, new: NewSalesOrder) -> DomainResult<SalesOrder>;
    fn get(&self, id: OrderId) -> Option<SalesOrder>;
    fn list(&self) -> Vec<SalesOrder>;
    fn update(&self, id: OrderId, mutate: SalesMutation<'_>) -> DomainResult<SalesOrder>;
}

#[derive(Debug)]
struct Inner {
    orders: BTreeMap<OrderId, SalesOrder>,
    next_id: OrderId,
}

/// In-memory sales store. Sales orders number from 1.
#[derive(Debug)]
pub struct InMemorySalesStore {
    inner: Mutex<Inner>,
}

impl InMemorySalesStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                orders: BTreeMap::new(),
                next_id: OrderId::new(1),
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for InMemorySalesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SalesStore for InMemorySalesStore {
    fn create(&self, new: NewSalesOrder) -> DomainResult<SalesOrder> {
        let mut inner = self.lock();
        let id = inner.next_id;
        let order = SalesOrder::create(id, new)?;
        inner.next_id = id.next();
        inner.orders.insert(id, order.clone());
        Ok(order)
    }

    fn get(&self, id: OrderId) -> Option<SalesOrder> {
        self.lock().orders.get(&id).cloned()
    }

    fn list(&self) -> Vec<SalesOrder> {
        self.lock().orders.values().cloned().collect()
    }

    fn update(&self, id: OrderId, mutate: SalesMutation<'_>) -> DomainResult<SalesOrder> {
        let mut inner = self.lock();
        let order = inner
            .orders
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(format!("order {id} not found")))?;

        let mut draft = order.clone();
        mutate(&mut draft)?;
        *order = draft.clone();
        Ok(draft)
    }
}
