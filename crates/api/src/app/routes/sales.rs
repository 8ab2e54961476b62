use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use stockroom_core::OrderId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/:id/cancel", post(cancel_order))
}

pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let orders = services.list_sales_orders();
    Json(json!({
        "count": orders.len(),
        "orders": orders.iter().map(dto::sales_order_to_json).collect::<Vec<_>>(),
    }))
    .into_response()
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateSalesOrderRequest>,
) -> axum::response::Response {
    match services.create_sales_order(body.into_new_order()) {
        Ok(order) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "order": dto::sales_order_to_json(&order),
            })),
        )
            .into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn cancel_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<u64>,
) -> axum::response::Response {
    match services.cancel_sales_order(OrderId::new(id)) {
        Ok(order) => Json(json!({
            "success": true,
            "order": dto::sales_order_to_json(&order),
        }))
        .into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}
