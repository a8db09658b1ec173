use axum::extract::{Query, State};
use contracts::dashboards::d400_overview::dto::{
    DashboardStats, LowStockItem, RecentOrder, SalesPeriod, SalesPoint,
};
use serde::Deserialize;

use crate::dashboards::d400_overview;
use crate::shared::error::{ok, ApiResult, ServiceError};
use crate::shared::state::AppState;

const DEFAULT_RECENT_LIMIT: usize = 4;

#[derive(Debug, Deserialize)]
pub struct SalesQuery {
    pub period: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

/// GET /api/dashboard/stats
pub async fn stats(State(state): State<AppState>) -> ApiResult<DashboardStats> {
    ok(d400_overview::service::stats(&state).await?)
}

/// GET /api/dashboard/sales?period=6months
pub async fn sales(State(state): State<AppState>, Query(query): Query<SalesQuery>) -> ApiResult<Vec<SalesPoint>> {
    let raw = query.period.unwrap_or_default();
    let period = SalesPeriod::parse(&raw)
        .ok_or_else(|| ServiceError::Validation(format!("Unknown sales period: {}", raw)))?;
    ok(d400_overview::service::sales(&state, period).await?)
}

/// GET /api/dashboard/recent-orders?limit=4
pub async fn recent_orders(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> ApiResult<Vec<RecentOrder>> {
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    ok(d400_overview::service::recent_orders(&state, limit).await?)
}

/// GET /api/dashboard/low-stock
pub async fn low_stock(State(state): State<AppState>) -> ApiResult<Vec<LowStockItem>> {
    ok(d400_overview::service::low_stock(&state).await?)
}
