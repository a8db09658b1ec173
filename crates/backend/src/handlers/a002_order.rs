use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use contracts::domain::a002_order::aggregate::{Order, OrderStatus, OrderSummary};
use contracts::domain::common::StatusChange;

use crate::domain::a002_order;
use crate::shared::error::{ok, ok_with_message, ApiResult};
use crate::shared::listing::ListQuery;
use crate::shared::state::AppState;

/// GET /api/orders?status=&search=
pub async fn list(State(state): State<AppState>, Query(query): Query<ListQuery>) -> ApiResult<Vec<Order>> {
    ok(a002_order::service::list(&state, &query).await?)
}

/// GET /api/orders/summary
pub async fn summary(State(state): State<AppState>) -> ApiResult<OrderSummary> {
    ok(a002_order::service::summary(&state).await?)
}

/// GET /api/orders/:id
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Order> {
    ok(a002_order::service::get_by_id(&state, &id).await?)
}

/// PUT|PATCH /api/orders/:id/status
pub async fn change_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StatusChange<OrderStatus>>, JsonRejection>,
) -> ApiResult<Order> {
    let Json(change) = payload?;
    let order = a002_order::service::change_status(&state, &id, change.status).await?;
    ok_with_message(order, "Order status updated successfully")
}

/// POST /api/orders/:id/cancel
pub async fn cancel(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Order> {
    let order = a002_order::service::cancel(&state, &id).await?;
    ok_with_message(order, "Order cancelled successfully")
}
