//! Request DTOs and JSON response mapping.
//!
//! Requests are deliberately loose (aliases, optional fields) because the
//! desktop front end is sloppy about field names. Responses use the wire
//! shapes the front end already expects.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};

use stockroom_core::Sku;
use stockroom_inventory::{InventoryItem, ReceiptOutcome};
use stockroom_orders::{LineItem, NewSupplierOrder, SupplierOrder};
use stockroom_sales::{NewSalesOrder, SalesOrder};
use stockroom_store::Page;

#[derive(Debug, Deserialize)]
pub struct CreateSupplierOrderRequest {
    #[serde(alias = "supplier")]
    pub supplier_name: String,
    pub items: Vec<LineItemRequest>,
    #[serde(default)]
    pub total: Option<Decimal>,
    /// Order date; defaults to today when omitted.
    #[serde(default, alias = "po_date")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub expected_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateSupplierOrderRequest {
    pub fn into_new_order(self, today: NaiveDate) -> NewSupplierOrder {
        NewSupplierOrder {
            supplier_name: self.supplier_name,
            date: self.date.unwrap_or(today),
            items: self
                .items
                .into_iter()
                .map(LineItemRequest::into_line_item)
                .collect(),
            total: self.total,
            expected_date: self.expected_date,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LineItemRequest {
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "qty")]
    pub quantity: i64,
    #[serde(default, alias = "price")]
    pub unit_price: Option<Decimal>,
}

impl LineItemRequest {
    /// Resolve loosely-typed request fields into a line item. Missing fields
    /// degrade to defaults here; receipt-time checks reject bad lines
    /// individually rather than failing the whole order.
    pub fn into_line_item(self) -> LineItem {
        let sku = self.sku.unwrap_or_default();
        let title = self.title.unwrap_or_else(|| format!("Book {sku}"));
        LineItem {
            sku: Sku::new(sku),
            title,
            quantity: self.quantity,
            unit_price: self.unit_price.unwrap_or(Decimal::ZERO),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSupplierOrderRequest {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "tracking")]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub expected_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct AddBookRequest {
    #[serde(alias = "book_id")]
    pub sku: String,
    pub title: String,
    #[serde(default, alias = "qty")]
    pub quantity: i64,
    #[serde(default, alias = "unit_price")]
    pub price: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct AddDeliveryRequest {
    #[serde(alias = "book_id")]
    pub sku: String,
    #[serde(alias = "qty")]
    pub amount: i64,
}

#[derive(Debug, Deserialize)]
pub struct LowStockParams {
    pub threshold: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSalesOrderRequest {
    #[serde(alias = "customer")]
    pub customer_name: String,
    #[serde(default)]
    pub items: Vec<LineItemRequest>,
}

impl CreateSalesOrderRequest {
    pub fn into_new_order(self) -> NewSalesOrder {
        NewSalesOrder {
            customer_name: self.customer_name,
            items: self
                .items
                .into_iter()
                .map(LineItemRequest::into_line_item)
                .collect(),
        }
    }
}

// --- response mapping ----------------------------------------------------

pub fn order_to_json(order: &SupplierOrder) -> Value {
    json!({
        "order_id": order.id(),
        "order_number": order.order_number(),
        "date": order.date().to_string(),
        "supplier": order.supplier_name(),
        "items": order.items().iter().map(line_item_to_json).collect::<Vec<_>>(),
        "total": order.total(),
        "status": order.status().as_str(),
        "tracking": order.tracking_number(),
        "expected_date": order.expected_date().map(|d| d.to_string()),
        "received_date": order.received_date().map(|d| d.to_string()),
        "notes": order.notes(),
        "created_at": order.created_at().to_rfc3339(),
    })
}

pub fn line_item_to_json(item: &LineItem) -> Value {
    json!({
        "sku": item.sku.as_str(),
        "title": item.title,
        "qty": item.quantity,
        "price": item.unit_price,
    })
}

pub fn page_to_json(page: Page<SupplierOrder>) -> Value {
    json!({
        "total": page.total,
        "page": page.page,
        "pageSize": page.page_size,
        "data": page.data.iter().map(order_to_json).collect::<Vec<_>>(),
    })
}

/// The front end treats `errors: null` as "clean receipt", so an empty list
/// collapses to null here.
pub fn receipt_errors_to_json(outcome: &ReceiptOutcome) -> Value {
    if outcome.errors.is_empty() {
        Value::Null
    } else {
        json!(outcome.errors)
    }
}

pub fn inventory_item_to_json(item: &InventoryItem) -> Value {
    json!({
        "book_id": item.sku().as_str(),
        "sku": item.sku().as_str(),
        "title": item.title(),
        "quantity": item.quantity(),
        "price": item.unit_price(),
        "updated_at": item.updated_at().to_rfc3339(),
    })
}

pub fn sales_order_to_json(order: &SalesOrder) -> Value {
    json!({
        "order_id": order.id(),
        "customer_name": order.customer_name(),
        "items": order.items().iter().map(line_item_to_json).collect::<Vec<_>>(),
        "total": order.total(),
        "status": order.status().as_str(),
        "created_at": order.created_at().to_rfc3339(),
    })
}
