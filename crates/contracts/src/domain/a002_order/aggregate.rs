use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateRoot, HasStatus, Lifecycle, Searchable, StatusMut};
use crate::shared::list_state::{count_by_status, count_of, sum_by, StatusCount};

crate::status_enum! {
    /// Статус заказа
    pub enum OrderStatus {
        Pending => "Pending",
        Processing => "Processing",
        Shipped => "Shipped",
        Delivered => "Delivered",
        Cancelled => "Cancelled",
    }
}

impl Lifecycle for OrderStatus {
    fn successors(&self) -> &'static [Self] {
        use OrderStatus::*;
        match self {
            Pending => &[Processing, Cancelled],
            Processing => &[Shipped, Cancelled],
            Shipped => &[Delivered, Cancelled],
            Delivered | Cancelled => &[],
        }
    }
}

/// Заказ покупателя
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer: String,
    pub email: String,
    /// Состав заказа одной строкой
    pub products: String,
    pub total: f64,
    pub status: OrderStatus,
    pub date: NaiveDate,
}

impl Order {
    /// Заказ ещё можно отменить
    pub fn is_cancellable(&self) -> bool {
        self.status.can_transition_to(OrderStatus::Cancelled) && !self.status.is_terminal()
    }

    /// Выручка учитывает все заказы, кроме отменённых
    pub fn counts_as_revenue(&self) -> bool {
        self.status != OrderStatus::Cancelled
    }
}

impl AggregateRoot for Order {
    fn id(&self) -> &str {
        &self.id
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "orders"
    }

    fn element_name() -> &'static str {
        "Order"
    }

    fn list_name() -> &'static str {
        "Orders"
    }

    fn code_prefix() -> &'static str {
        "ORD-"
    }
}

impl Searchable for Order {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.id, &self.customer]
    }
}

impl HasStatus for Order {
    type Status = OrderStatus;

    fn status(&self) -> OrderStatus {
        self.status
    }
}

impl StatusMut for Order {
    fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }
}

/// Плитки страницы заказов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub total: usize,
    pub by_status: Vec<StatusCount<OrderStatus>>,
    /// Сумма `total` по всем заказам
    pub revenue: f64,
}

impl OrderSummary {
    pub fn from_records(orders: &[Order]) -> Self {
        Self {
            total: orders.len(),
            by_status: count_by_status(orders),
            revenue: sum_by(orders, |o| o.total),
        }
    }

    pub fn count(&self, status: OrderStatus) -> usize {
        count_of(&self.by_status, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::{StatusFilter, TransitionPolicy};
    use crate::shared::list_state::{filter_records, ListState};

    fn order(id: &str, customer: &str, total: f64, status: OrderStatus, day: u32) -> Order {
        Order {
            id: id.into(),
            customer: customer.into(),
            email: format!("{}@email.com", customer.to_lowercase().replace(' ', ".")),
            products: "Item".into(),
            total,
            status,
            date: NaiveDate::from_ymd_opt(2024, 2, day).unwrap(),
        }
    }

    fn sample_orders() -> Vec<Order> {
        vec![
            order("ORD-001", "Juan Dela Cruz", 75000.0, OrderStatus::Delivered, 8),
            order("ORD-002", "Maria Santos", 55000.0, OrderStatus::Processing, 9),
            order("ORD-003", "Pedro Reyes", 22000.0, OrderStatus::Pending, 10),
            order("ORD-004", "Ana Garcia", 8500.0, OrderStatus::Shipped, 10),
            order("ORD-005", "Carlos Miguel", 12000.0, OrderStatus::Processing, 11),
        ]
    }

    #[test]
    fn test_search_ana_finds_single_order() {
        let found = filter_records(&sample_orders(), "ana", StatusFilter::All);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "ORD-004");
        assert_eq!(found[0].customer, "Ana Garcia");
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let orders = sample_orders();
        assert_eq!(
            filter_records(&orders, "JUAN", StatusFilter::All),
            filter_records(&orders, "juan", StatusFilter::All)
        );
        assert_eq!(filter_records(&orders, "ord-00", StatusFilter::All).len(), 5);
    }

    #[test]
    fn test_approve_pending_order_updates_tiles() {
        let mut state = ListState::new(sample_orders());
        let before = OrderSummary::from_records(state.records());
        assert_eq!(before.count(OrderStatus::Pending), 1);
        assert_eq!(before.count(OrderStatus::Processing), 2);

        assert_eq!(state.transition("ORD-003", OrderStatus::Processing), Ok(true));

        let after = OrderSummary::from_records(state.records());
        assert_eq!(after.count(OrderStatus::Pending), 0);
        assert_eq!(after.count(OrderStatus::Processing), 3);
        assert_eq!(
            state.get("ORD-003").map(|o| o.status),
            Some(OrderStatus::Processing)
        );
        assert_eq!(after.revenue, before.revenue);
    }

    #[test]
    fn test_approve_with_single_processing_order() {
        let mut state = ListState::new(vec![
            order("ORD-001", "Juan Dela Cruz", 75000.0, OrderStatus::Delivered, 8),
            order("ORD-002", "Maria Santos", 55000.0, OrderStatus::Processing, 9),
            order("ORD-003", "Pedro Reyes", 22000.0, OrderStatus::Pending, 10),
        ]);
        let before = OrderSummary::from_records(state.records());
        assert_eq!(before.count(OrderStatus::Pending), 1);
        assert_eq!(before.count(OrderStatus::Processing), 1);

        assert_eq!(state.transition("ORD-003", OrderStatus::Processing), Ok(true));

        let after = OrderSummary::from_records(state.records());
        assert_eq!(after.count(OrderStatus::Pending), 0);
        assert_eq!(after.count(OrderStatus::Processing), 2);
        assert_eq!(after.count(OrderStatus::Delivered), 1);
    }

    #[test]
    fn test_lifecycle_table() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Shipped));
        assert!(Shipped.can_transition_to(Delivered));
        assert!(Shipped.can_transition_to(Cancelled));
        assert!(!Pending.can_transition_to(Shipped));
        assert!(!Delivered.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(Delivered.is_terminal() && Cancelled.is_terminal());
        assert_eq!(TransitionPolicy::default(), TransitionPolicy::Enforce);
    }

    #[test]
    fn test_cancellable() {
        let orders = sample_orders();
        assert!(!orders[0].is_cancellable());
        assert!(orders[2].is_cancellable());
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(&sample_orders()[2]).unwrap();
        assert_eq!(json["status"], "Pending");
        assert_eq!(json["date"], "2024-02-10");
        let back: Order = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample_orders()[2]);
    }
}
