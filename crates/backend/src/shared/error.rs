use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::domain::a005_inventory::aggregate::InventoryError;
use contracts::domain::common::{TransitionError, UnknownStatus};
use contracts::shared::envelope::ApiEnvelope;

/// Ошибка сервисного слоя
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn not_found(element: &str, id: &str) -> Self {
        ServiceError::NotFound(format!("{} {} not found", element, id))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Conflict(_) | ServiceError::Transition(_) => StatusCode::CONFLICT,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<UnknownStatus> for ServiceError {
    fn from(e: UnknownStatus) -> Self {
        ServiceError::Validation(e.to_string())
    }
}

impl From<InventoryError> for ServiceError {
    fn from(e: InventoryError) -> Self {
        ServiceError::Validation(e.to_string())
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            ServiceError::Storage(e) => {
                tracing::error!("Storage failure: {:#}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ApiEnvelope::<()>::failure(message))).into_response()
    }
}

/// Результат обработчика: конверт с данными или ошибка с кодом статуса
pub type ApiResult<T> = Result<Json<ApiEnvelope<T>>, ServiceError>;

pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiEnvelope::ok(data)))
}

pub fn ok_with_message<T>(data: T, message: impl Into<String>) -> ApiResult<T> {
    Ok(Json(ApiEnvelope::ok_with_message(data, message)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_error_maps_to_envelope() {
        let response = ServiceError::not_found("Order", "ORD-404").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], "Order ORD-404 not found");
    }

    #[test]
    fn test_status_codes() {
        let transition = TransitionError {
            kind: "OrderStatus",
            from: "Delivered".into(),
            to: "Pending".into(),
        };
        assert_eq!(ServiceError::from(transition).status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ServiceError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::from(anyhow::anyhow!("disk")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
