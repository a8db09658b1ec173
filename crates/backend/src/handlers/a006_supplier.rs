use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use contracts::domain::a006_supplier::aggregate::{Supplier, SupplierInput, SupplierSummary};

use crate::domain::a006_supplier;
use crate::shared::error::{ok, ok_with_message, ApiResult};
use crate::shared::listing::ListQuery;
use crate::shared::state::AppState;

/// GET /api/suppliers
pub async fn list(State(state): State<AppState>, Query(query): Query<ListQuery>) -> ApiResult<Vec<Supplier>> {
    ok(a006_supplier::service::list(&state, &query).await?)
}

/// GET /api/suppliers/summary
pub async fn summary(State(state): State<AppState>) -> ApiResult<SupplierSummary> {
    ok(a006_supplier::service::summary(&state).await?)
}

/// GET /api/suppliers/:id
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Supplier> {
    ok(a006_supplier::service::get_by_id(&state, &id).await?)
}

/// POST /api/suppliers
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<SupplierInput>, JsonRejection>,
) -> ApiResult<Supplier> {
    let Json(input) = payload?;
    let supplier = a006_supplier::service::create(&state, input).await?;
    ok_with_message(supplier, "Supplier created successfully")
}

/// PUT /api/suppliers/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SupplierInput>, JsonRejection>,
) -> ApiResult<Supplier> {
    let Json(input) = payload?;
    let supplier = a006_supplier::service::update(&state, &id, input).await?;
    ok_with_message(supplier, "Supplier updated successfully")
}

/// DELETE /api/suppliers/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    a006_supplier::service::delete(&state, &id).await?;
    ok_with_message((), "Supplier deleted successfully")
}
