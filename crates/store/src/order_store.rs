//! Supplier-order store abstraction and in-memory implementation.

use std::collections::BTreeMap;
use std::sync::Mutex;

use stockroom_core::{DomainError, DomainResult, OrderId};
use stockroom_orders::{NewSupplierOrder, SupplierOrder};

/// Mutation applied to an order under the store lock.
pub type OrderMutation<'a> = &'a mut dyn FnMut(&mut SupplierOrder) -> DomainResult<()>;

/// Store of supplier orders.
///
/// `update` runs the mutation while the store holds its write lock, so a
/// status guard checked inside the closure cannot race with a concurrent
/// mutation of the same order: of two simultaneous receives, exactly one
/// passes the guard.
pub trait OrderStore: Send + Sync {
    /// Validate and persist a new order, allocating the next sequential id.
    /// The id counter does not advance when validation fails.
    fn create(&self, new: NewSupplierOrder) -> DomainResult<SupplierOrder>;

    fn get(&self, id: OrderId) -> Option<SupplierOrder>;

    /// All orders, in ascending id order.
    fn list(&self) -> Vec<SupplierOrder>;

    /// Mutate an order in place; returns the updated order.
    ///
    /// If the mutation returns an error, the order is left unchanged and the
    /// error is propagated.
    fn update(&self, id: OrderId, mutate: OrderMutation<'_>) -> DomainResult<SupplierOrder>;
}

#[derive(Debug)]
struct Inner {
    orders: BTreeMap<OrderId, SupplierOrder>,
    next_id: OrderId,
}

/// In-memory order store.
///
/// Single mutex around the whole map: mutating operations are fully
/// serialized, reads take a snapshot.
#[derive(Debug)]
pub struct InMemoryOrderStore {
    inner: Mutex<Inner>,
}

/// Default first purchase-order id. Deployments can override via
/// `with_base`; callers must not assume any specific base.
pub const DEFAULT_PO_BASE: u64 = 5001;

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::with_base(DEFAULT_PO_BASE)
    }

    pub fn with_base(base: u64) -> Self {
        Self {
            inner: Mutex::new(Inner {
                orders: BTreeMap::new(),
                next_id: OrderId::new(base),
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock means a panic mid-mutation; the store has no
        // partially-applied states (mutations are validate-then-assign), so
        // continuing with the inner data is sound.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderStore for InMemoryOrderStore {
    fn create(&self, new: NewSupplierOrder) -> DomainResult<SupplierOrder> {
        let mut inner = self.lock();
        let id = inner.next_id;
        let order = SupplierOrder::create(id, new)?;
        inner.next_id = id.next();
        inner.orders.insert(id, order.clone());
        Ok(order)
    }

    fn get(&self, id: OrderId) -> Option<SupplierOrder> {
        self.lock().orders.get(&id).cloned()
    }

    fn list(&self) -> Vec<SupplierOrder> {
        self.lock().orders.values().cloned().collect()
    }

    fn update(&self, id: OrderId, mutate: OrderMutation<'_>) -> DomainResult<SupplierOrder> {
        let mut inner = self.lock();
        let order = inner
            .orders
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(format!("order {id} not found")))?;

        // Mutate a scratch copy so a failed guard leaves the stored order
        // untouched.
        let mut draft = order.clone();
        mutate(&mut draft)?;
        *order = draft.clone();
        Ok(draft)
    }
}
