//! Storage and read-side infrastructure.
//!
//! Stores own their identifier allocators and are constructed once per
//! process, then passed by handle to callers. Nothing in here is global; a
//! fresh store per test gives full isolation.
//!
//! Layout:
//! - `order_store` / `sales_store` / `inventory_store`: store traits plus
//!   in-memory implementations
//! - `query`: the shared order filter/sort/paginate layer
//! - `projections`: applies a supplier-order receipt to inventory
//! - `archive`: secondary order mirror fed from the event bus
//! - `worker`: background consumer loop for bus subscriptions

pub mod archive;
pub mod inventory_store;
pub mod order_store;
pub mod projections;
pub mod query;
pub mod sales_store;
pub mod worker;

pub use archive::InMemoryOrderArchive;
pub use inventory_store::{InMemoryInventoryStore, InventoryStore};
pub use order_store::{InMemoryOrderStore, OrderStore};
pub use query::{OrderQuery, Page};
pub use sales_store::{InMemorySalesStore, SalesStore};
pub use worker::{ProjectionWorker, WorkerHandle};
