use axum::Router;

pub mod inventory;
pub mod sales;
pub mod supplier_orders;
pub mod system;

/// Router for all API endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/api/supplier-orders", supplier_orders::router())
        .nest("/api/inventory", inventory::router())
        .nest("/api/orders", sales::router())
}
