//! Read-model builders driven by committed domain state.

pub mod inventory_stock;

pub use inventory_stock::apply_receipt;
