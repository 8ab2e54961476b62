use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use serde_json::json;

use stockroom_core::OrderId;
use stockroom_orders::OrderStatus;
use stockroom_store::OrderQuery;

use crate::app::services::{AppServices, OrderPatch};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_order).get(list_orders))
        .route("/pending", get(pending_orders))
        .route("/received", get(received_orders))
        .route("/archive", get(archive_orders))
        .route("/:id", get(get_order).put(update_order))
        .route("/:id/receive", post(receive_order))
        .route("/:id/cancel", post(cancel_order))
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateSupplierOrderRequest>,
) -> axum::response::Response {
    let new = body.into_new_order(Utc::now().date_naive());
    match services.create_order(new) {
        Ok((order, synced)) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "message": format!(
                    "Purchase order {} created for {}",
                    order.order_number(),
                    order.supplier_name()
                ),
                "po_id": order.id(),
                "order_number": order.order_number(),
                "order": dto::order_to_json(&order),
                "sync": {"published": synced},
            })),
        )
            .into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<OrderQuery>,
) -> axum::response::Response {
    Json(dto::page_to_json(services.list_orders(&query))).into_response()
}

pub async fn pending_orders(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    status_view(&services, OrderStatus::Pending)
}

pub async fn received_orders(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    status_view(&services, OrderStatus::Received)
}

fn status_view(services: &AppServices, status: OrderStatus) -> axum::response::Response {
    let orders = services.orders_with_status(status);
    Json(json!({
        "count": orders.len(),
        "orders": orders.iter().map(dto::order_to_json).collect::<Vec<_>>(),
    }))
    .into_response()
}

pub async fn archive_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<OrderQuery>,
) -> axum::response::Response {
    Json(dto::page_to_json(services.archive_orders(&query))).into_response()
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<u64>,
) -> axum::response::Response {
    match services.get_order(OrderId::new(id)) {
        Some(order) => Json(dto::order_to_json(&order)).into_response(),
        None => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("supplier order {id} not found"),
        ),
    }
}

pub async fn update_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<u64>,
    Json(body): Json<dto::UpdateSupplierOrderRequest>,
) -> axum::response::Response {
    let status = match body.status.as_deref() {
        Some(s) => match OrderStatus::parse(s) {
            Ok(v) => Some(v),
            Err(err) => return errors::domain_error_to_response(err),
        },
        None => None,
    };
    let patch = OrderPatch {
        status,
        tracking_number: body.tracking_number,
        notes: body.notes,
        expected_date: body.expected_date,
    };

    match services.update_order(OrderId::new(id), patch) {
        Ok(outcome) => {
            let mut payload = json!({
                "success": true,
                "order": dto::order_to_json(&outcome.order),
                "sync": {"published": outcome.synced},
            });
            if let Some(receipt) = &outcome.receipt {
                payload["inventory_updates"] = json!(receipt.updates);
                payload["errors"] = dto::receipt_errors_to_json(receipt);
            }
            Json(payload).into_response()
        }
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn receive_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<u64>,
) -> axum::response::Response {
    match services.receive_order(OrderId::new(id)) {
        Ok(outcome) => Json(json!({
            "success": true,
            "message": format!("Order {} marked as received", outcome.order.order_number()),
            "order": dto::order_to_json(&outcome.order),
            "inventory_updates": outcome.receipt.updates,
            "errors": dto::receipt_errors_to_json(&outcome.receipt),
            "sync": {"published": outcome.synced},
        }))
        .into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn cancel_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<u64>,
) -> axum::response::Response {
    match services.cancel_order(OrderId::new(id)) {
        Ok((order, synced)) => Json(json!({
            "success": true,
            "message": format!("Order {} cancelled", order.order_number()),
            "order": dto::order_to_json(&order),
            "sync": {"published": synced},
        }))
        .into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}
