use contracts::domain::a003_return_request::aggregate::{
    RejectReturn, ReturnRequest, ReturnStatus, ReturnSummary,
};

use crate::shared::data::repository::{guard_transition, StatusStore};
use crate::shared::data::sample_date;
use crate::shared::error::ServiceError;
use crate::shared::listing::{get_or_not_found, list_visible, ListQuery};
use crate::shared::state::AppState;

pub async fn list(state: &AppState, query: &ListQuery) -> Result<Vec<ReturnRequest>, ServiceError> {
    list_visible(state.returns.as_ref(), query).await
}

pub async fn get_by_id(state: &AppState, id: &str) -> Result<ReturnRequest, ServiceError> {
    get_or_not_found(state.returns.as_ref(), id).await
}

pub async fn summary(state: &AppState) -> Result<ReturnSummary, ServiceError> {
    let returns = state.returns.list().await?;
    Ok(ReturnSummary::from_records(&returns))
}

pub async fn change_status(
    state: &AppState,
    id: &str,
    status: ReturnStatus,
) -> Result<ReturnRequest, ServiceError> {
    state
        .returns
        .upsert_status(id, status, state.transition_policy())
        .await
}

pub async fn approve(state: &AppState, id: &str) -> Result<ReturnRequest, ServiceError> {
    change_status(state, id, ReturnStatus::Approved).await
}

pub async fn refund(state: &AppState, id: &str) -> Result<ReturnRequest, ServiceError> {
    change_status(state, id, ReturnStatus::Refunded).await
}

/// Отклонение заявки с сохранением причины
pub async fn reject(
    state: &AppState,
    id: &str,
    body: RejectReturn,
) -> Result<ReturnRequest, ServiceError> {
    body.validate().map_err(ServiceError::Validation)?;
    let policy = state.transition_policy();
    let reason = body.reason.trim().to_string();
    let record_id = id.to_string();
    let updated = state
        .returns
        .modify(
            id,
            Box::new(move |request: &mut ReturnRequest| {
                guard_transition(&record_id, request.status, ReturnStatus::Rejected, policy)?;
                request.status = ReturnStatus::Rejected;
                request.rejection_reason = Some(reason);
                Ok(())
            }),
        )
        .await?;
    tracing::info!("Return Request {} rejected", updated.id);
    Ok(updated)
}

#[allow(clippy::too_many_arguments)]
fn request(
    id: &str,
    order_id: &str,
    customer: &str,
    product: &str,
    reason: &str,
    amount: f64,
    status: ReturnStatus,
    day: u32,
) -> ReturnRequest {
    ReturnRequest {
        id: id.into(),
        order_id: order_id.into(),
        customer: customer.into(),
        product: product.into(),
        reason: reason.into(),
        amount,
        status,
        request_date: sample_date(2024, 2, day),
        images: Vec::new(),
        rejection_reason: None,
    }
}

/// Начальные данные
pub fn sample_data() -> Vec<ReturnRequest> {
    vec![
        request(
            "RET-001",
            "ORD-045",
            "Juan Dela Cruz",
            "ROG Strix G16",
            "Defective - Screen flickering issue",
            75000.0,
            ReturnStatus::Pending,
            10,
        ),
        request(
            "RET-002",
            "ORD-038",
            "Maria Santos",
            "Logitech G Pro",
            "Not as described - Wrong color received",
            8500.0,
            ReturnStatus::Approved,
            9,
        ),
        request(
            "RET-003",
            "ORD-042",
            "Pedro Reyes",
            "RTX 4080",
            "Changed mind - Found better price elsewhere",
            55000.0,
            ReturnStatus::Rejected,
            8,
        ),
        request(
            "RET-004",
            "ORD-031",
            "Ana Garcia",
            "LG Monitor",
            "Damaged in shipping - Cracked screen",
            22000.0,
            ReturnStatus::Refunded,
            7,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::Config;

    fn state() -> AppState {
        AppState::in_memory(Config::default(), true)
    }

    #[tokio::test]
    async fn test_reject_stores_reason() {
        let state = state();
        let rejected = reject(
            &state,
            "RET-001",
            RejectReturn {
                reason: " Outside return window ".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(rejected.status, ReturnStatus::Rejected);
        assert_eq!(rejected.rejection_reason.as_deref(), Some("Outside return window"));
    }

    #[tokio::test]
    async fn test_reject_requires_pending() {
        let state = state();
        let err = reject(&state, "RET-004", RejectReturn { reason: "late".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Transition(_)));
        assert_eq!(get_by_id(&state, "RET-004").await.unwrap().rejection_reason, None);
    }

    #[tokio::test]
    async fn test_approve_then_refund() {
        let state = state();
        approve(&state, "RET-001").await.unwrap();
        let refunded = refund(&state, "RET-001").await.unwrap();
        assert_eq!(refunded.status, ReturnStatus::Refunded);
        let totals = summary(&state).await.unwrap();
        assert_eq!(totals.refunded_amount, 97000.0);
        assert_eq!(totals.count(ReturnStatus::Pending), 0);
    }

    #[tokio::test]
    async fn test_search_by_order_id() {
        let found = list(&state(), &ListQuery::new(None, Some("ORD-038"))).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "RET-002");
    }
}
