use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, OrderId, Sku};

/// Supplier order status lifecycle.
///
/// `Received` and `Cancelled` are terminal: no transition leaves them.
/// `Processing`/`Shipped` are intermediate statuses reachable only via a
/// direct status update, never at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Received,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Received => "received",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Received | OrderStatus::Cancelled)
    }

    /// Parse a status name, case-insensitively.
    pub fn parse(s: &str) -> DomainResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "received" => Ok(OrderStatus::Received),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::validation(format!(
                "unknown order status: {other}"
            ))),
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supplier order line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub sku: Sku,
    pub title: String,
    pub quantity: i64,
    pub unit_price: Decimal,
}

impl LineItem {
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

/// Fields needed to create a supplier order (everything except the id,
/// which the store allocates).
#[derive(Debug, Clone)]
pub struct NewSupplierOrder {
    pub supplier_name: String,
    /// Order date; the service defaults this to "today" when the caller
    /// omits it.
    pub date: NaiveDate,
    pub items: Vec<LineItem>,
    /// Caller-supplied total. Trusted as-is when present; computed from the
    /// line items otherwise.
    pub total: Option<Decimal>,
    pub expected_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// A supplier purchase order.
///
/// Mutated in place by the lifecycle operations below; never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierOrder {
    id: OrderId,
    supplier_name: String,
    date: NaiveDate,
    items: Vec<LineItem>,
    total: Decimal,
    status: OrderStatus,
    tracking_number: Option<String>,
    notes: Option<String>,
    expected_date: Option<NaiveDate>,
    received_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
}

impl SupplierOrder {
    /// Create a new order in `Pending` status.
    ///
    /// Fails with a validation error if the supplier name is blank or the
    /// item list is empty — nothing else. Malformed lines (blank SKU,
    /// non-positive quantity) are allowed through here and rejected per-line
    /// at receipt time instead, so one bad line cannot block the rest of a
    /// delivery.
    pub fn create(id: OrderId, new: NewSupplierOrder) -> DomainResult<Self> {
        if new.supplier_name.trim().is_empty() {
            return Err(DomainError::validation("supplier name is required"));
        }
        if new.items.is_empty() {
            return Err(DomainError::validation(
                "order must contain at least one line item",
            ));
        }

        let total = match new.total {
            Some(t) => t,
            None => new.items.iter().map(LineItem::line_total).sum(),
        };

        Ok(Self {
            id,
            supplier_name: new.supplier_name,
            date: new.date,
            items: new.items,
            total,
            status: OrderStatus::Pending,
            tracking_number: None,
            notes: new.notes,
            expected_date: new.expected_date,
            received_date: None,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Human-facing order number, e.g. `ORD-5001`.
    pub fn order_number(&self) -> String {
        format!("ORD-{}", self.id)
    }

    pub fn supplier_name(&self) -> &str {
        &self.supplier_name
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn tracking_number(&self) -> Option<&str> {
        self.tracking_number.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn expected_date(&self) -> Option<NaiveDate> {
        self.expected_date
    }

    pub fn received_date(&self) -> Option<NaiveDate> {
        self.received_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn set_tracking_number(&mut self, tracking: Option<String>) {
        self.tracking_number = tracking;
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes;
    }

    pub fn set_expected_date(&mut self, expected: Option<NaiveDate>) {
        self.expected_date = expected;
    }

    /// Mark the order received.
    ///
    /// Legal from any non-terminal status. Sets `received_date` to `today`
    /// if it was not already set. Rejecting a second receive here is the sole
    /// idempotency mechanism protecting inventory from double-counting.
    pub fn receive(&mut self, today: NaiveDate) -> DomainResult<()> {
        if self.status.is_terminal() {
            return Err(DomainError::invalid_transition(format!(
                "cannot receive order {} in status {}",
                self.order_number(),
                self.status
            )));
        }
        self.status = OrderStatus::Received;
        if self.received_date.is_none() {
            self.received_date = Some(today);
        }
        Ok(())
    }

    /// Cancel the order. No inventory effect.
    pub fn cancel(&mut self) -> DomainResult<()> {
        match self.status {
            OrderStatus::Received => Err(DomainError::invalid_transition(
                "cannot cancel a received order",
            )),
            OrderStatus::Cancelled => {
                Err(DomainError::invalid_transition("order is already cancelled"))
            }
            _ => {
                self.status = OrderStatus::Cancelled;
                Ok(())
            }
        }
    }

    /// Move the order to `status` through the transition guard.
    ///
    /// Terminal targets delegate to `receive`/`cancel` so their invariants
    /// (received date, cancel error messages) hold on every path. Note that
    /// callers routing a receive through here are responsible for the
    /// inventory side effect, exactly as with `receive`.
    pub fn set_status(&mut self, status: OrderStatus, today: NaiveDate) -> DomainResult<()> {
        match status {
            OrderStatus::Received => self.receive(today),
            OrderStatus::Cancelled => self.cancel(),
            other => {
                if self.status.is_terminal() {
                    return Err(DomainError::invalid_transition(format!(
                        "cannot move order {} from {} to {}",
                        self.order_number(),
                        self.status,
                        other
                    )));
                }
                self.status = other;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn line(sku: &str, qty: i64, price: &str) -> LineItem {
        LineItem {
            sku: Sku::new(sku),
            title: format!("Book {sku}"),
            quantity: qty,
            unit_price: price.parse().unwrap(),
        }
    }

    fn new_order(items: Vec<LineItem>) -> NewSupplierOrder {
        NewSupplierOrder {
            supplier_name: "Acme Books".to_string(),
            date: today(),
            items,
            total: None,
            expected_date: None,
            notes: None,
        }
    }

    #[test]
    fn create_computes_total_from_line_items() {
        let order =
            SupplierOrder::create(OrderId::new(5001), new_order(vec![line("BK-001", 10, "12.5")]))
                .unwrap();

        assert_eq!(order.total(), "125.0".parse::<Decimal>().unwrap());
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.order_number(), "ORD-5001");
        assert_eq!(order.received_date(), None);
    }

    #[test]
    fn create_trusts_caller_supplied_total() {
        let mut new = new_order(vec![line("BK-001", 10, "12.5")]);
        new.total = Some("999".parse().unwrap());
        let order = SupplierOrder::create(OrderId::new(5001), new).unwrap();
        assert_eq!(order.total(), "999".parse::<Decimal>().unwrap());
    }

    #[test]
    fn create_rejects_blank_supplier_and_empty_items() {
        let mut new = new_order(vec![line("BK-001", 1, "1")]);
        new.supplier_name = "   ".to_string();
        let err = SupplierOrder::create(OrderId::new(1), new).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = SupplierOrder::create(OrderId::new(1), new_order(vec![])).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn create_keeps_malformed_lines_for_receipt_to_sort_out() {
        let order = SupplierOrder::create(
            OrderId::new(5001),
            new_order(vec![line("BK-001", 10, "12.5"), line("", 0, "3")]),
        )
        .unwrap();
        assert_eq!(order.items().len(), 2);
        assert_eq!(order.total(), "125.0".parse::<Decimal>().unwrap());
    }

    #[test]
    fn receive_sets_status_and_received_date() {
        let mut order =
            SupplierOrder::create(OrderId::new(5001), new_order(vec![line("BK-001", 5, "2")]))
                .unwrap();

        order.receive(today()).unwrap();
        assert_eq!(order.status(), OrderStatus::Received);
        assert_eq!(order.received_date(), Some(today()));
    }

    #[test]
    fn receive_twice_is_rejected() {
        let mut order =
            SupplierOrder::create(OrderId::new(5001), new_order(vec![line("BK-001", 5, "2")]))
                .unwrap();
        order.receive(today()).unwrap();

        let err = order.receive(today()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition(_)));
        assert_eq!(order.status(), OrderStatus::Received);
    }

    #[test]
    fn cancel_pending_order() {
        let mut order =
            SupplierOrder::create(OrderId::new(5001), new_order(vec![line("BK-001", 5, "2")]))
                .unwrap();
        order.cancel().unwrap();
        assert_eq!(order.status(), OrderStatus::Cancelled);
        assert_eq!(order.received_date(), None);
    }

    #[test]
    fn cancel_received_order_is_rejected_with_message() {
        let mut order =
            SupplierOrder::create(OrderId::new(5001), new_order(vec![line("BK-001", 5, "2")]))
                .unwrap();
        order.receive(today()).unwrap();

        let err = order.cancel().unwrap_err();
        match err {
            DomainError::InvalidTransition(msg) => {
                assert!(msg.contains("cannot cancel a received order"))
            }
            other => panic!("expected InvalidTransition, got {other:?}"),
        }
    }

    #[test]
    fn cancel_cancelled_order_is_rejected_not_silently_accepted() {
        let mut order =
            SupplierOrder::create(OrderId::new(5001), new_order(vec![line("BK-001", 5, "2")]))
                .unwrap();
        order.cancel().unwrap();

        let err = order.cancel().unwrap_err();
        match err {
            DomainError::InvalidTransition(msg) => {
                assert!(msg.contains("already cancelled"))
            }
            other => panic!("expected InvalidTransition, got {other:?}"),
        }
    }

    #[test]
    fn receive_is_legal_from_intermediate_statuses() {
        let mut order =
            SupplierOrder::create(OrderId::new(5001), new_order(vec![line("BK-001", 5, "2")]))
                .unwrap();
        order.set_status(OrderStatus::Processing, today()).unwrap();
        order.set_status(OrderStatus::Shipped, today()).unwrap();
        order.receive(today()).unwrap();
        assert_eq!(order.status(), OrderStatus::Received);
    }

    #[test]
    fn no_status_update_leaves_a_terminal_state() {
        let mut order =
            SupplierOrder::create(OrderId::new(5001), new_order(vec![line("BK-001", 5, "2")]))
                .unwrap();
        order.receive(today()).unwrap();

        for target in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Cancelled,
        ] {
            let err = order.set_status(target, today()).unwrap_err();
            assert!(matches!(err, DomainError::InvalidTransition(_)));
            assert_eq!(order.status(), OrderStatus::Received);
        }
    }

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(OrderStatus::parse("Received").unwrap(), OrderStatus::Received);
        assert_eq!(OrderStatus::parse(" PENDING ").unwrap(), OrderStatus::Pending);
        assert!(OrderStatus::parse("draft").is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn status_strategy() -> impl Strategy<Value = OrderStatus> {
            prop_oneof![
                Just(OrderStatus::Pending),
                Just(OrderStatus::Processing),
                Just(OrderStatus::Shipped),
                Just(OrderStatus::Received),
                Just(OrderStatus::Cancelled),
            ]
        }

        proptest! {
            /// Whatever sequence of status updates is attempted, the first
            /// terminal state reached is final, and `received_date` is set
            /// exactly when the order is received.
            #[test]
            fn terminal_states_are_sticky(targets in proptest::collection::vec(status_strategy(), 0..12)) {
                let mut order = SupplierOrder::create(
                    OrderId::new(5001),
                    NewSupplierOrder {
                        supplier_name: "Acme Books".to_string(),
                        date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
                        items: vec![LineItem {
                            sku: Sku::new("BK-001"),
                            title: "Intro to JS".to_string(),
                            quantity: 1,
                            unit_price: Decimal::ONE,
                        }],
                        total: None,
                        expected_date: None,
                        notes: None,
                    },
                ).unwrap();
                let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

                let mut settled: Option<OrderStatus> = None;
                for target in targets {
                    let before = order.status();
                    let result = order.set_status(target, today);

                    if let Some(terminal) = settled {
                        prop_assert!(result.is_err());
                        prop_assert_eq!(order.status(), terminal);
                    } else if result.is_ok() && order.status().is_terminal() {
                        settled = Some(order.status());
                    } else if result.is_err() {
                        prop_assert_eq!(order.status(), before);
                    }

                    prop_assert_eq!(
                        order.received_date().is_some(),
                        order.status() == OrderStatus::Received
                    );
                }
            }
        }
    }
}
