//! Inventory store abstraction and in-memory implementation.

use std::collections::BTreeMap;
use std::sync::RwLock;

use rust_decimal::Decimal;

use stockroom_core::{DomainError, DomainResult, Sku};
use stockroom_inventory::InventoryItem;

/// Store of per-SKU stock counters.
pub trait InventoryStore: Send + Sync {
    fn get(&self, sku: &Sku) -> Option<InventoryItem>;

    /// All items, in ascending SKU order.
    fn list(&self) -> Vec<InventoryItem>;

    /// Add a brand-new book. Fails with `Conflict` if the SKU exists.
    fn add_book(&self, item: InventoryItem) -> DomainResult<()>;

    /// Add delivered stock to a known SKU. `NotFound` if the SKU is unknown.
    fn add_delivery(&self, sku: &Sku, amount: i64) -> DomainResult<InventoryItem>;

    /// Receipt path: create the item at quantity 0 if unseen, refresh title
    /// and price (last-write-wins), then add `quantity`. Returns the updated
    /// item and whether it was created by this call.
    fn upsert_and_add(
        &self,
        sku: &Sku,
        title: &str,
        unit_price: Decimal,
        quantity: i64,
    ) -> DomainResult<(InventoryItem, bool)>;
}

/// In-memory inventory store.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    inner: RwLock<BTreeMap<Sku, InventoryItem>>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<Sku, InventoryItem>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<Sku, InventoryItem>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl InventoryStore for InMemoryInventoryStore {
    fn get(&self, sku: &Sku) -> Option<InventoryItem> {
        self.read().get(sku).cloned()
    }

    fn list(&self) -> Vec<InventoryItem> {
        self.read().values().cloned().collect()
    }

    fn add_book(&self, item: InventoryItem) -> DomainResult<()> {
        let mut map = self.write();
        if map.contains_key(item.sku()) {
            return Err(DomainError::conflict(format!(
                "book {} already exists in inventory",
                item.sku()
            )));
        }
        map.insert(item.sku().clone(), item);
        Ok(())
    }

    fn add_delivery(&self, sku: &Sku, amount: i64) -> DomainResult<InventoryItem> {
        let mut map = self.write();
        let item = map
            .get_mut(sku)
            .ok_or_else(|| DomainError::not_found(format!("book {sku} not found in inventory")))?;
        item.add_stock(amount)?;
        Ok(item.clone())
    }

    fn upsert_and_add(
        &self,
        sku: &Sku,
        title: &str,
        unit_price: Decimal,
        quantity: i64,
    ) -> DomainResult<(InventoryItem, bool)> {
        let mut map = self.write();
        let created = !map.contains_key(sku);
        let item = map
            .entry(sku.clone())
            .or_insert_with(|| InventoryItem::new(sku.clone(), title, unit_price));
        item.refresh(title, unit_price);
        item.add_stock(quantity)?;
        Ok((item.clone(), created))
    }
}
