//! Customer sales-order module.
//!
//! Deliberately small: the back office only needs create, cancel, and list
//! for front-of-house orders. Fulfilment and stock decrements are out of
//! scope.

pub mod order;

pub use order::{NewSalesOrder, SalesOrder, SalesStatus};
