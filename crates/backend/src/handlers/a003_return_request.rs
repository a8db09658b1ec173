use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use contracts::domain::a003_return_request::aggregate::{
    RejectReturn, ReturnRequest, ReturnStatus, ReturnSummary,
};
use contracts::domain::common::StatusChange;

use crate::domain::a003_return_request;
use crate::shared::error::{ok, ok_with_message, ApiResult};
use crate::shared::listing::ListQuery;
use crate::shared::state::AppState;

/// GET /api/returns?status=&search=
pub async fn list(State(state): State<AppState>, Query(query): Query<ListQuery>) -> ApiResult<Vec<ReturnRequest>> {
    ok(a003_return_request::service::list(&state, &query).await?)
}

/// GET /api/returns/summary
pub async fn summary(State(state): State<AppState>) -> ApiResult<ReturnSummary> {
    ok(a003_return_request::service::summary(&state).await?)
}

/// GET /api/returns/:id
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<ReturnRequest> {
    ok(a003_return_request::service::get_by_id(&state, &id).await?)
}

/// PUT|PATCH /api/returns/:id/status
pub async fn change_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StatusChange<ReturnStatus>>, JsonRejection>,
) -> ApiResult<ReturnRequest> {
    let Json(change) = payload?;
    let request = a003_return_request::service::change_status(&state, &id, change.status).await?;
    ok_with_message(request, "Return status updated successfully")
}

/// POST /api/returns/:id/approve
pub async fn approve(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<ReturnRequest> {
    let request = a003_return_request::service::approve(&state, &id).await?;
    ok_with_message(request, "Return approved")
}

/// POST /api/returns/:id/reject
pub async fn reject(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RejectReturn>, JsonRejection>,
) -> ApiResult<ReturnRequest> {
    let Json(body) = payload?;
    let request = a003_return_request::service::reject(&state, &id, body).await?;
    ok_with_message(request, "Return rejected")
}

/// POST /api/returns/:id/refund
pub async fn refund(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<ReturnRequest> {
    let request = a003_return_request::service::refund(&state, &id).await?;
    ok_with_message(request, "Refund processed")
}
