use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateRoot, HasStatus, Lifecycle, Searchable, StatusMut};
use crate::shared::list_state::{count_by_status, count_of, sum_by, StatusCount};

crate::status_enum! {
    /// Статус заявки на возврат
    pub enum ReturnStatus {
        Pending => "Pending",
        Approved => "Approved",
        Rejected => "Rejected",
        Refunded => "Refunded",
    }
}

impl Lifecycle for ReturnStatus {
    fn successors(&self) -> &'static [Self] {
        use ReturnStatus::*;
        match self {
            Pending => &[Approved, Rejected],
            Approved => &[Refunded],
            Rejected | Refunded => &[],
        }
    }
}

/// Заявка на возврат / возмещение
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    pub id: String,
    /// Исходный заказ (например, "ORD-045")
    pub order_id: String,
    pub customer: String,
    pub product: String,
    pub reason: String,
    pub amount: f64,
    pub status: ReturnStatus,
    pub request_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    /// Причина отказа, заполняется при отклонении
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl AggregateRoot for ReturnRequest {
    fn id(&self) -> &str {
        &self.id
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "returns"
    }

    fn element_name() -> &'static str {
        "Return Request"
    }

    fn list_name() -> &'static str {
        "Returns & Refunds"
    }

    fn code_prefix() -> &'static str {
        "RET-"
    }
}

impl Searchable for ReturnRequest {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.id, &self.customer, &self.order_id]
    }
}

impl HasStatus for ReturnRequest {
    type Status = ReturnStatus;

    fn status(&self) -> ReturnStatus {
        self.status
    }
}

impl StatusMut for ReturnRequest {
    fn set_status(&mut self, status: ReturnStatus) {
        self.status = status;
    }
}

/// Тело запроса отклонения возврата
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RejectReturn {
    pub reason: String,
}

impl RejectReturn {
    pub fn validate(&self) -> Result<(), String> {
        if self.reason.trim().is_empty() {
            return Err("Rejection reason must not be empty".into());
        }
        Ok(())
    }
}

/// Плитки страницы возвратов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnSummary {
    pub total: usize,
    pub by_status: Vec<StatusCount<ReturnStatus>>,
    /// Сумма всех заявок
    pub requested_amount: f64,
    /// Сумма уже возмещённых заявок
    pub refunded_amount: f64,
}

impl ReturnSummary {
    pub fn from_records(returns: &[ReturnRequest]) -> Self {
        Self {
            total: returns.len(),
            by_status: count_by_status(returns),
            requested_amount: sum_by(returns, |r| r.amount),
            refunded_amount: sum_by(returns, |r| {
                if r.status == ReturnStatus::Refunded {
                    r.amount
                } else {
                    0.0
                }
            }),
        }
    }

    pub fn count(&self, status: ReturnStatus) -> usize {
        count_of(&self.by_status, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::{check_transition, StatusFilter};
    use crate::shared::list_state::filter_records;

    fn request(id: &str, order_id: &str, customer: &str, amount: f64, status: ReturnStatus) -> ReturnRequest {
        ReturnRequest {
            id: id.into(),
            order_id: order_id.into(),
            customer: customer.into(),
            product: "Item".into(),
            reason: "Defective".into(),
            amount,
            status,
            request_date: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            images: Vec::new(),
            rejection_reason: None,
        }
    }

    fn sample_returns() -> Vec<ReturnRequest> {
        vec![
            request("RET-001", "ORD-045", "Juan Dela Cruz", 75000.0, ReturnStatus::Pending),
            request("RET-002", "ORD-038", "Maria Santos", 8500.0, ReturnStatus::Approved),
            request("RET-003", "ORD-042", "Pedro Reyes", 55000.0, ReturnStatus::Rejected),
            request("RET-004", "ORD-031", "Ana Garcia", 22000.0, ReturnStatus::Refunded),
        ]
    }

    #[test]
    fn test_search_covers_order_id() {
        let found = filter_records(&sample_returns(), "ord-042", StatusFilter::All);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "RET-003");
    }

    #[test]
    fn test_lifecycle() {
        use ReturnStatus::*;
        assert!(check_transition(Pending, Approved).is_ok());
        assert!(check_transition(Pending, Rejected).is_ok());
        assert!(check_transition(Approved, Refunded).is_ok());
        assert!(check_transition(Pending, Refunded).is_err());
        assert!(check_transition(Rejected, Approved).is_err());
        assert!(Refunded.is_terminal());
    }

    #[test]
    fn test_summary() {
        let summary = ReturnSummary::from_records(&sample_returns());
        assert_eq!(summary.total, 4);
        assert_eq!(summary.count(ReturnStatus::Pending), 1);
        assert_eq!(summary.requested_amount, 160500.0);
        assert_eq!(summary.refunded_amount, 22000.0);
    }

    #[test]
    fn test_reject_requires_reason() {
        assert!(RejectReturn { reason: "  ".into() }.validate().is_err());
        assert!(RejectReturn { reason: "Outside window".into() }.validate().is_ok());
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let json = serde_json::to_value(&sample_returns()[0]).unwrap();
        assert_eq!(json["orderId"], "ORD-045");
        assert!(json.get("images").is_none());
        assert!(json.get("rejectionReason").is_none());
    }
}
