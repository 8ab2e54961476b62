//! Inventory domain module.
//!
//! Per-SKU stock counters for the bookstore. Quantities are only ever
//! incremented by this core (via direct deliveries or supplier-order
//! receipts); decrements are out of scope.

pub mod item;
pub mod receipt;

pub use item::InventoryItem;
pub use receipt::{InventoryUpdate, ReceiptError, ReceiptOutcome};
