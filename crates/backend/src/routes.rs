use axum::http::{header, Method};
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::shared::state::AppState;
use crate::system::middleware::request_logger::request_logger;
use crate::{handlers, system};

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // AUTH
        // ========================================
        .route("/api/auth/login", post(system::handlers::auth::login))
        .route("/api/auth/logout", post(system::handlers::auth::logout))
        .route(
            "/api/auth/forgot-password",
            post(system::handlers::auth::forgot_password),
        )
        .route(
            "/api/auth/reset-password",
            post(system::handlers::auth::reset_password),
        )
        .route(
            "/api/auth/verify-token",
            get(system::handlers::auth::verify_token),
        )
        // ========================================
        // A001 PRODUCTS
        // ========================================
        .route(
            "/api/products",
            get(handlers::a001_product::list).post(handlers::a001_product::create),
        )
        .route("/api/products/summary", get(handlers::a001_product::summary))
        .route(
            "/api/products/:id",
            get(handlers::a001_product::get_by_id)
                .put(handlers::a001_product::update)
                .delete(handlers::a001_product::delete),
        )
        .route(
            "/api/products/:id/stock",
            put(handlers::a001_product::update_stock),
        )
        // ========================================
        // A002 ORDERS
        // ========================================
        .route("/api/orders", get(handlers::a002_order::list))
        .route("/api/orders/summary", get(handlers::a002_order::summary))
        .route("/api/orders/:id", get(handlers::a002_order::get_by_id))
        .route(
            "/api/orders/:id/status",
            put(handlers::a002_order::change_status).patch(handlers::a002_order::change_status),
        )
        .route("/api/orders/:id/cancel", post(handlers::a002_order::cancel))
        // ========================================
        // A003 RETURNS
        // ========================================
        .route("/api/returns", get(handlers::a003_return_request::list))
        .route(
            "/api/returns/summary",
            get(handlers::a003_return_request::summary),
        )
        .route(
            "/api/returns/:id",
            get(handlers::a003_return_request::get_by_id),
        )
        .route(
            "/api/returns/:id/status",
            put(handlers::a003_return_request::change_status)
                .patch(handlers::a003_return_request::change_status),
        )
        .route(
            "/api/returns/:id/approve",
            post(handlers::a003_return_request::approve),
        )
        .route(
            "/api/returns/:id/reject",
            post(handlers::a003_return_request::reject),
        )
        .route(
            "/api/returns/:id/refund",
            post(handlers::a003_return_request::refund),
        )
        // ========================================
        // A004 USERS
        // ========================================
        .route("/api/users", get(handlers::a004_user::list))
        .route("/api/users/summary", get(handlers::a004_user::summary))
        .route(
            "/api/users/:id",
            get(handlers::a004_user::get_by_id).delete(handlers::a004_user::delete),
        )
        .route(
            "/api/users/:id/status",
            put(handlers::a004_user::change_status).patch(handlers::a004_user::change_status),
        )
        // ========================================
        // A005 INVENTORY
        // ========================================
        .route("/api/inventory", get(handlers::a005_inventory::list))
        .route(
            "/api/inventory/summary",
            get(handlers::a005_inventory::summary),
        )
        .route(
            "/api/inventory/logs",
            get(handlers::a005_inventory::logs).post(handlers::a005_inventory::add_log),
        )
        .route(
            "/api/inventory/:id",
            get(handlers::a005_inventory::get_by_id).put(handlers::a005_inventory::update),
        )
        .route(
            "/api/inventory/:id/damaged",
            post(handlers::a005_inventory::mark_damaged),
        )
        // ========================================
        // A006 SUPPLIERS
        // ========================================
        .route(
            "/api/suppliers",
            get(handlers::a006_supplier::list).post(handlers::a006_supplier::create),
        )
        .route(
            "/api/suppliers/summary",
            get(handlers::a006_supplier::summary),
        )
        .route(
            "/api/suppliers/:id",
            get(handlers::a006_supplier::get_by_id)
                .put(handlers::a006_supplier::update)
                .delete(handlers::a006_supplier::delete),
        )
        // ========================================
        // D400 DASHBOARD
        // ========================================
        .route("/api/dashboard/stats", get(handlers::d400_overview::stats))
        .route("/api/dashboard/sales", get(handlers::d400_overview::sales))
        .route(
            "/api/dashboard/recent-orders",
            get(handlers::d400_overview::recent_orders),
        )
        .route(
            "/api/dashboard/low-stock",
            get(handlers::d400_overview::low_stock),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            system::auth::middleware::require_session,
        ))
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
        .with_state(state)
}
