use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde_json::json;

use stockroom_core::Sku;

use crate::app::services::{AppServices, DEFAULT_LOW_STOCK_THRESHOLD};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_inventory))
        .route("/low-stock", get(low_stock))
        .route("/add-book", post(add_book))
        .route("/add-delivery", post(add_delivery))
}

pub async fn list_inventory(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.list_inventory();
    Json(json!({
        "count": items.len(),
        "items": items.iter().map(dto::inventory_item_to_json).collect::<Vec<_>>(),
    }))
    .into_response()
}

pub async fn low_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::LowStockParams>,
) -> axum::response::Response {
    let threshold = params.threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);
    let items = services.low_stock(threshold);
    Json(json!({
        "threshold": threshold,
        "low_stock_count": items.len(),
        "items": items.iter().map(dto::inventory_item_to_json).collect::<Vec<_>>(),
    }))
    .into_response()
}

pub async fn add_book(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::AddBookRequest>,
) -> axum::response::Response {
    let price = body.price.unwrap_or(Decimal::ZERO);
    match services.add_book(Sku::new(body.sku), body.title, body.quantity, price) {
        Ok(item) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "message": format!("Book '{}' added to inventory", item.title()),
                "item": dto::inventory_item_to_json(&item),
            })),
        )
            .into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn add_delivery(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::AddDeliveryRequest>,
) -> axum::response::Response {
    match services.add_delivery(&Sku::new(body.sku), body.amount) {
        Ok(item) => Json(json!({
            "success": true,
            "message": format!(
                "{} copies added to {}. New quantity: {}",
                body.amount,
                item.title(),
                item.quantity()
            ),
            "item": dto::inventory_item_to_json(&item),
        }))
        .into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}
