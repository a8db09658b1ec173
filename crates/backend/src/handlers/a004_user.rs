use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use contracts::domain::a004_user::aggregate::{User, UserStatus, UserSummary};
use contracts::domain::common::StatusChange;

use crate::domain::a004_user;
use crate::shared::error::{ok, ok_with_message, ApiResult};
use crate::shared::listing::ListQuery;
use crate::shared::state::AppState;

/// GET /api/users?status=&search=
pub async fn list(State(state): State<AppState>, Query(query): Query<ListQuery>) -> ApiResult<Vec<User>> {
    ok(a004_user::service::list(&state, &query).await?)
}

/// GET /api/users/summary
pub async fn summary(State(state): State<AppState>) -> ApiResult<UserSummary> {
    ok(a004_user::service::summary(&state).await?)
}

/// GET /api/users/:id
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<User> {
    ok(a004_user::service::get_by_id(&state, &id).await?)
}

/// PUT|PATCH /api/users/:id/status
pub async fn change_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StatusChange<UserStatus>>, JsonRejection>,
) -> ApiResult<User> {
    let Json(change) = payload?;
    let user = a004_user::service::change_status(&state, &id, change.status).await?;
    ok_with_message(user, "User status updated successfully")
}

/// DELETE /api/users/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    a004_user::service::delete(&state, &id).await?;
    ok_with_message((), "User deleted successfully")
}
