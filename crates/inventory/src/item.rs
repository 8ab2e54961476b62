use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Sku};

/// A book in inventory, keyed by SKU.
///
/// Created lazily the first time a SKU is seen; persists indefinitely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    sku: Sku,
    title: String,
    quantity: i64,
    unit_price: Decimal,
    updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Create a new item with zero stock.
    pub fn new(sku: Sku, title: impl Into<String>, unit_price: Decimal) -> Self {
        Self {
            sku,
            title: title.into(),
            quantity: 0,
            unit_price,
            updated_at: Utc::now(),
        }
    }

    /// Create a new item with an initial quantity (direct add-book path).
    pub fn with_quantity(
        sku: Sku,
        title: impl Into<String>,
        quantity: i64,
        unit_price: Decimal,
    ) -> DomainResult<Self> {
        if quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        let mut item = Self::new(sku, title, unit_price);
        item.quantity = quantity;
        Ok(item)
    }

    pub fn sku(&self) -> &Sku {
        &self.sku
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Add delivered stock. The amount must be positive.
    pub fn add_stock(&mut self, amount: i64) -> DomainResult<()> {
        if amount <= 0 {
            return Err(DomainError::validation(
                "delivery amount must be a positive number",
            ));
        }
        self.quantity += amount;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Refresh title and last-known price (last-write-wins on receipt).
    pub fn refresh(&mut self, title: impl Into<String>, unit_price: Decimal) {
        self.title = title.into();
        self.unit_price = unit_price;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_starts_at_zero_stock() {
        let item = InventoryItem::new(Sku::new("BK-001"), "Intro to JS", Decimal::new(125, 1));
        assert_eq!(item.quantity(), 0);
    }

    #[test]
    fn add_stock_accumulates() {
        let mut item = InventoryItem::new(Sku::new("BK-001"), "Intro to JS", Decimal::ONE);
        item.add_stock(10).unwrap();
        item.add_stock(3).unwrap();
        assert_eq!(item.quantity(), 13);
    }

    #[test]
    fn add_stock_rejects_non_positive_amounts() {
        let mut item = InventoryItem::new(Sku::new("BK-001"), "Intro to JS", Decimal::ONE);
        assert!(item.add_stock(0).is_err());
        assert!(item.add_stock(-4).is_err());
        assert_eq!(item.quantity(), 0);
    }

    #[test]
    fn refresh_is_last_write_wins() {
        let mut item = InventoryItem::new(Sku::new("BK-001"), "Old Title", Decimal::ONE);
        item.refresh("New Title", Decimal::TWO);
        assert_eq!(item.title(), "New Title");
        assert_eq!(item.unit_price(), Decimal::TWO);
    }
}
