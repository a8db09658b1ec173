use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use contracts::domain::a001_product::aggregate::{Product, ProductInput, ProductSummary, StockUpdate};

use crate::domain::a001_product;
use crate::shared::error::{ok, ok_with_message, ApiResult};
use crate::shared::listing::ListQuery;
use crate::shared::state::AppState;

/// GET /api/products
pub async fn list(State(state): State<AppState>, Query(query): Query<ListQuery>) -> ApiResult<Vec<Product>> {
    ok(a001_product::service::list(&state, &query).await?)
}

/// GET /api/products/summary
pub async fn summary(State(state): State<AppState>) -> ApiResult<ProductSummary> {
    ok(a001_product::service::summary(&state).await?)
}

/// GET /api/products/:id
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Product> {
    ok(a001_product::service::get_by_id(&state, &id).await?)
}

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<Product> {
    let Json(input) = payload?;
    let product = a001_product::service::create(&state, input).await?;
    ok_with_message(product, "Product created successfully")
}

/// PUT /api/products/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> ApiResult<Product> {
    let Json(input) = payload?;
    let product = a001_product::service::update(&state, &id, input).await?;
    ok_with_message(product, "Product updated successfully")
}

/// PUT /api/products/:id/stock
pub async fn update_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StockUpdate>, JsonRejection>,
) -> ApiResult<Product> {
    let Json(update) = payload?;
    ok(a001_product::service::update_stock(&state, &id, update).await?)
}

/// DELETE /api/products/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    a001_product::service::delete(&state, &id).await?;
    ok_with_message((), "Product deleted successfully")
}
