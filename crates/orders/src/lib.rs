//! Supplier purchase-order domain module.
//!
//! This crate contains business rules for supplier orders, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage). The status
//! state machine lives here; stores and HTTP handlers only call into it.

pub mod event;
pub mod order;

pub use event::OrderEvent;
pub use order::{LineItem, NewSupplierOrder, OrderStatus, SupplierOrder};
