//! Inventory stock projection: applies a supplier-order receipt to stock.
//!
//! Per-item failure degrades that line only. The caller has already committed
//! the status transition; a line error here is reported alongside the
//! successful updates, never used to roll the order back.

use tracing::warn;

use stockroom_inventory::{InventoryUpdate, ReceiptOutcome};
use stockroom_orders::LineItem;

use crate::inventory_store::InventoryStore;

/// Increment stock for each line of a received order.
///
/// Lines with a blank SKU or non-positive quantity are skipped with a
/// recorded error. The order's transition guard is the sole protection
/// against this being applied twice for the same order.
pub fn apply_receipt<S: InventoryStore + ?Sized>(store: &S, items: &[LineItem]) -> ReceiptOutcome {
    let mut outcome = ReceiptOutcome::default();

    for item in items {
        if item.sku.is_empty() {
            warn!(title = %item.title, "skipping receipt line with no SKU");
            outcome.push_error("", "no valid SKU found in item");
            continue;
        }
        if item.quantity <= 0 {
            warn!(sku = %item.sku, quantity = item.quantity, "skipping receipt line with non-positive quantity");
            outcome.push_error(item.sku.as_str(), "quantity must be positive");
            continue;
        }

        match store.upsert_and_add(&item.sku, &item.title, item.unit_price, item.quantity) {
            Ok((updated, created)) => outcome.push_update(InventoryUpdate {
                sku: item.sku.clone(),
                title: updated.title().to_string(),
                quantity_added: item.quantity,
                new_total: updated.quantity(),
                created,
            }),
            Err(err) => {
                warn!(sku = %item.sku, error = %err, "failed to apply receipt line");
                outcome.push_error(item.sku.as_str(), err.to_string());
            }
        }
    }

    outcome
}
