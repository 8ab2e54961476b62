//! Per-line outcome types for applying a supplier-order receipt to stock.

use serde::{Deserialize, Serialize};

use stockroom_core::Sku;

/// One successful stock increment produced by a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryUpdate {
    pub sku: Sku,
    pub title: String,
    pub quantity_added: i64,
    pub new_total: i64,
    /// Whether the item was created by this receipt (first sighting of the SKU).
    pub created: bool,
}

/// One skipped line item, with the reason it was skipped.
///
/// A malformed line degrades that line only; the rest of the receipt still
/// applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptError {
    /// SKU as supplied, possibly blank.
    pub sku: String,
    pub reason: String,
}

/// Aggregate outcome of applying one receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptOutcome {
    pub updates: Vec<InventoryUpdate>,
    pub errors: Vec<ReceiptError>,
}

impl ReceiptOutcome {
    pub fn push_update(&mut self, update: InventoryUpdate) {
        self.updates.push(update);
    }

    pub fn push_error(&mut self, sku: impl Into<String>, reason: impl Into<String>) {
        self.errors.push(ReceiptError {
            sku: sku.into(),
            reason: reason.into(),
        });
    }
}
