//! Shared order query layer: filter, search, sort, paginate.
//!
//! Pure read-side transformation over a snapshot of orders — no persistence
//! side effects. The same implementation serves the primary order store and
//! the archive mirror. Filters compose conjunctively and apply strictly in
//! the order: supplier → status → search → sort → paginate.

use serde::{Deserialize, Serialize};

use stockroom_orders::SupplierOrder;

pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Query parameters for an order listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderQuery {
    /// Case-insensitive exact match on supplier name. Blank means "no filter".
    pub supplier: Option<String>,
    /// Case-insensitive exact match on status name.
    pub status: Option<String>,
    /// Case-insensitive substring search over id, supplier, date, and each
    /// line's sku and title.
    pub q: Option<String>,
    /// Sort key: `date`, `total`, or `status`; a leading `-` reverses.
    /// Unrecognized keys leave the order unchanged.
    pub sort: Option<String>,
    /// 1-indexed page number.
    pub page: Option<u32>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<u32>,
}

/// One page of results, plus the pre-pagination total.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub total: usize,
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    pub data: Vec<T>,
}

/// Run a query over a snapshot of orders.
pub fn run(mut orders: Vec<SupplierOrder>, query: &OrderQuery) -> Page<SupplierOrder> {
    if let Some(supplier) = non_blank(&query.supplier) {
        let needle = supplier.to_lowercase();
        orders.retain(|o| o.supplier_name().to_lowercase() == needle);
    }

    if let Some(status) = non_blank(&query.status) {
        let needle = status.to_lowercase();
        orders.retain(|o| o.status().as_str() == needle);
    }

    if let Some(q) = non_blank(&query.q) {
        let needle = q.to_lowercase();
        orders.retain(|o| haystack(o).contains(&needle));
    }

    if let Some(sort) = non_blank(&query.sort) {
        let (key, reverse) = match sort.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (sort, false),
        };
        match key {
            "date" => orders.sort_by_key(|o| o.date()),
            "total" => orders.sort_by(|a, b| a.total().cmp(&b.total())),
            "status" => orders.sort_by_key(|o| o.status().as_str()),
            // Unknown keys are a no-op, not an error.
            _ => {}
        }
        if reverse && matches!(key, "date" | "total" | "status") {
            orders.reverse();
        }
    }

    let total = orders.len();
    let page = query.page.unwrap_or(1).max(1);
    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);

    let start = (page as usize - 1).saturating_mul(page_size as usize);
    let data: Vec<SupplierOrder> = orders
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .collect();

    Page {
        total,
        page,
        page_size,
        data,
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn haystack(order: &SupplierOrder) -> String {
    let mut s = format!(
        "{} {} {} {}",
        order.id(),
        order.order_number(),
        order.supplier_name(),
        order.date()
    );
    for item in order.items() {
        s.push(' ');
        s.push_str(item.sku.as_str());
        s.push(' ');
        s.push_str(&item.title);
    }
    s.to_lowercase()
}
