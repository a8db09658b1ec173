use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use contracts::domain::a005_inventory::aggregate::{
    DamageReport, InventoryItem, InventorySummary, InventoryUpdate,
};
use contracts::domain::a005_inventory::log::{InventoryLog, InventoryLogInput};

use crate::domain::a005_inventory;
use crate::shared::error::{ok, ok_with_message, ApiResult};
use crate::shared::listing::ListQuery;
use crate::shared::state::AppState;

/// GET /api/inventory?status=&search=
pub async fn list(State(state): State<AppState>, Query(query): Query<ListQuery>) -> ApiResult<Vec<InventoryItem>> {
    ok(a005_inventory::service::list(&state, &query).await?)
}

/// GET /api/inventory/summary
pub async fn summary(State(state): State<AppState>) -> ApiResult<InventorySummary> {
    ok(a005_inventory::service::summary(&state).await?)
}

/// GET /api/inventory/:id
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<InventoryItem> {
    ok(a005_inventory::service::get_by_id(&state, &id).await?)
}

/// PUT /api/inventory/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<InventoryUpdate>, JsonRejection>,
) -> ApiResult<InventoryItem> {
    let Json(update) = payload?;
    let item = a005_inventory::service::update(&state, &id, update).await?;
    ok_with_message(item, "Inventory updated successfully")
}

/// POST /api/inventory/:id/damaged
pub async fn mark_damaged(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<DamageReport>, JsonRejection>,
) -> ApiResult<InventoryItem> {
    let Json(report) = payload?;
    let item = a005_inventory::service::mark_damaged(&state, &id, report).await?;
    ok_with_message(item, "Item marked as damaged")
}

/// GET /api/inventory/logs
pub async fn logs(State(state): State<AppState>) -> ApiResult<Vec<InventoryLog>> {
    ok(a005_inventory::service::logs(&state).await?)
}

/// POST /api/inventory/logs
pub async fn add_log(
    State(state): State<AppState>,
    payload: Result<Json<InventoryLogInput>, JsonRejection>,
) -> ApiResult<InventoryLog> {
    let Json(input) = payload?;
    let log = a005_inventory::service::add_log(&state, input).await?;
    ok_with_message(log, "Inventory log added")
}
