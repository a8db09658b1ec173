//! Типизированные обёртки над эндпоинтами `/api`

use contracts::dashboards::d400_overview::dto::{
    DashboardStats, LowStockItem, RecentOrder, SalesPeriod, SalesPoint,
};
use contracts::domain::a001_product::aggregate::{Product, ProductInput, ProductSummary, StockUpdate};
use contracts::domain::a002_order::aggregate::{Order, OrderStatus, OrderSummary};
use contracts::domain::a003_return_request::aggregate::{
    RejectReturn, ReturnRequest, ReturnStatus, ReturnSummary,
};
use contracts::domain::a004_user::aggregate::{User, UserStatus, UserSummary};
use contracts::domain::a005_inventory::aggregate::{
    DamageReport, InventoryItem, InventorySummary, InventoryUpdate,
};
use contracts::domain::a005_inventory::log::{InventoryLog, InventoryLogInput};
use contracts::domain::a006_supplier::aggregate::{Supplier, SupplierInput, SupplierSummary};
use contracts::domain::common::StatusChange;
use contracts::system::auth::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, ResetPasswordRequest, VerifyTokenResponse,
};
use serde_json::{json, Value};

use super::{ApiClient, ApiError};

/// `?status=..&search=..` для списков; пустые параметры пропускаются
fn list_query(status: Option<&str>, search: Option<&str>) -> String {
    let params: Vec<String> = [("status", status), ("search", search)]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .filter(|v| !v.is_empty())
                .map(|v| format!("{}={}", key, urlencoding::encode(v)))
        })
        .collect();
    if params.is_empty() {
        String::new()
    } else {
        format!("?{}", params.join("&"))
    }
}

fn path_id(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

impl ApiClient {
    // ---- auth ----

    /// Вход; в режиме Bearer токен запоминается для следующих запросов
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self.post("/auth/login", &request).await?;
        if response.token.is_some() {
            self.set_token(response.token.clone()).await;
        }
        Ok(response)
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        let _: Value = self.post("/auth/logout", &json!({})).await?;
        self.set_token(None).await;
        Ok(())
    }

    pub async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        let request = ForgotPasswordRequest {
            email: email.to_string(),
        };
        let _: Value = self.post("/auth/forgot-password", &request).await?;
        Ok(())
    }

    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<(), ApiError> {
        let _: Value = self.post("/auth/reset-password", request).await?;
        Ok(())
    }

    pub async fn verify_reset_token(&self, token: &str) -> Result<VerifyTokenResponse, ApiError> {
        self.get(&format!("/auth/verify-token?token={}", urlencoding::encode(token)))
            .await
    }

    // ---- products ----

    pub async fn products(&self, status: Option<&str>, search: Option<&str>) -> Result<Vec<Product>, ApiError> {
        self.get(&format!("/products{}", list_query(status, search))).await
    }

    pub async fn product(&self, id: &str) -> Result<Product, ApiError> {
        self.get(&format!("/products/{}", path_id(id))).await
    }

    pub async fn product_summary(&self) -> Result<ProductSummary, ApiError> {
        self.get("/products/summary").await
    }

    pub async fn create_product(&self, input: &ProductInput) -> Result<Product, ApiError> {
        self.post("/products", input).await
    }

    pub async fn update_product(&self, id: &str, input: &ProductInput) -> Result<Product, ApiError> {
        self.put(&format!("/products/{}", path_id(id)), input).await
    }

    pub async fn update_product_stock(&self, id: &str, stock: u32) -> Result<Product, ApiError> {
        self.put(&format!("/products/{}/stock", path_id(id)), &StockUpdate { stock })
            .await
    }

    pub async fn delete_product(&self, id: &str) -> Result<(), ApiError> {
        let _: Value = self.delete(&format!("/products/{}", path_id(id))).await?;
        Ok(())
    }

    // ---- orders ----

    pub async fn orders(&self, status: Option<&str>, search: Option<&str>) -> Result<Vec<Order>, ApiError> {
        self.get(&format!("/orders{}", list_query(status, search))).await
    }

    pub async fn order(&self, id: &str) -> Result<Order, ApiError> {
        self.get(&format!("/orders/{}", path_id(id))).await
    }

    pub async fn order_summary(&self) -> Result<OrderSummary, ApiError> {
        self.get("/orders/summary").await
    }

    pub async fn update_order_status(&self, id: &str, status: OrderStatus) -> Result<Order, ApiError> {
        self.put(&format!("/orders/{}/status", path_id(id)), &StatusChange { status })
            .await
    }

    pub async fn cancel_order(&self, id: &str) -> Result<Order, ApiError> {
        self.post(&format!("/orders/{}/cancel", path_id(id)), &json!({})).await
    }

    // ---- returns ----

    pub async fn returns(&self, status: Option<&str>, search: Option<&str>) -> Result<Vec<ReturnRequest>, ApiError> {
        self.get(&format!("/returns{}", list_query(status, search))).await
    }

    pub async fn return_request(&self, id: &str) -> Result<ReturnRequest, ApiError> {
        self.get(&format!("/returns/{}", path_id(id))).await
    }

    pub async fn return_summary(&self) -> Result<ReturnSummary, ApiError> {
        self.get("/returns/summary").await
    }

    pub async fn update_return_status(&self, id: &str, status: ReturnStatus) -> Result<ReturnRequest, ApiError> {
        self.put(&format!("/returns/{}/status", path_id(id)), &StatusChange { status })
            .await
    }

    pub async fn approve_return(&self, id: &str) -> Result<ReturnRequest, ApiError> {
        self.post(&format!("/returns/{}/approve", path_id(id)), &json!({})).await
    }

    pub async fn reject_return(&self, id: &str, reason: &str) -> Result<ReturnRequest, ApiError> {
        let body = RejectReturn {
            reason: reason.to_string(),
        };
        self.post(&format!("/returns/{}/reject", path_id(id)), &body).await
    }

    pub async fn refund_return(&self, id: &str) -> Result<ReturnRequest, ApiError> {
        self.post(&format!("/returns/{}/refund", path_id(id)), &json!({})).await
    }

    // ---- users ----

    pub async fn users(&self, status: Option<&str>, search: Option<&str>) -> Result<Vec<User>, ApiError> {
        self.get(&format!("/users{}", list_query(status, search))).await
    }

    pub async fn user(&self, id: &str) -> Result<User, ApiError> {
        self.get(&format!("/users/{}", path_id(id))).await
    }

    pub async fn user_summary(&self) -> Result<UserSummary, ApiError> {
        self.get("/users/summary").await
    }

    pub async fn update_user_status(&self, id: &str, status: UserStatus) -> Result<User, ApiError> {
        self.put(&format!("/users/{}/status", path_id(id)), &StatusChange { status })
            .await
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        let _: Value = self.delete(&format!("/users/{}", path_id(id))).await?;
        Ok(())
    }

    // ---- inventory ----

    pub async fn inventory(&self, status: Option<&str>, search: Option<&str>) -> Result<Vec<InventoryItem>, ApiError> {
        self.get(&format!("/inventory{}", list_query(status, search))).await
    }

    pub async fn inventory_item(&self, id: &str) -> Result<InventoryItem, ApiError> {
        self.get(&format!("/inventory/{}", path_id(id))).await
    }

    pub async fn inventory_summary(&self) -> Result<InventorySummary, ApiError> {
        self.get("/inventory/summary").await
    }

    pub async fn update_inventory(&self, id: &str, update: &InventoryUpdate) -> Result<InventoryItem, ApiError> {
        self.put(&format!("/inventory/{}", path_id(id)), update).await
    }

    pub async fn mark_damaged(&self, id: &str, report: &DamageReport) -> Result<InventoryItem, ApiError> {
        self.post(&format!("/inventory/{}/damaged", path_id(id)), report).await
    }

    pub async fn inventory_logs(&self) -> Result<Vec<InventoryLog>, ApiError> {
        self.get("/inventory/logs").await
    }

    pub async fn add_inventory_log(&self, input: &InventoryLogInput) -> Result<InventoryLog, ApiError> {
        self.post("/inventory/logs", input).await
    }

    // ---- suppliers ----

    pub async fn suppliers(&self, status: Option<&str>, search: Option<&str>) -> Result<Vec<Supplier>, ApiError> {
        self.get(&format!("/suppliers{}", list_query(status, search))).await
    }

    pub async fn supplier(&self, id: &str) -> Result<Supplier, ApiError> {
        self.get(&format!("/suppliers/{}", path_id(id))).await
    }

    pub async fn supplier_summary(&self) -> Result<SupplierSummary, ApiError> {
        self.get("/suppliers/summary").await
    }

    pub async fn create_supplier(&self, input: &SupplierInput) -> Result<Supplier, ApiError> {
        self.post("/suppliers", input).await
    }

    pub async fn update_supplier(&self, id: &str, input: &SupplierInput) -> Result<Supplier, ApiError> {
        self.put(&format!("/suppliers/{}", path_id(id)), input).await
    }

    pub async fn delete_supplier(&self, id: &str) -> Result<(), ApiError> {
        let _: Value = self.delete(&format!("/suppliers/{}", path_id(id))).await?;
        Ok(())
    }

    // ---- dashboard ----

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get("/dashboard/stats").await
    }

    pub async fn sales_data(&self, period: SalesPeriod) -> Result<Vec<SalesPoint>, ApiError> {
        self.get(&format!("/dashboard/sales?period={}", period.as_str())).await
    }

    pub async fn recent_orders(&self, limit: usize) -> Result<Vec<RecentOrder>, ApiError> {
        self.get(&format!("/dashboard/recent-orders?limit={}", limit)).await
    }

    pub async fn low_stock_items(&self) -> Result<Vec<LowStockItem>, ApiError> {
        self.get("/dashboard/low-stock").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::configure_routes;
    use crate::shared::config::{ApiConfig, AuthMode, Config};
    use crate::shared::state::AppState;
    use contracts::domain::a005_inventory::log::MovementKind;
    use tokio::net::TcpListener;

    /// Поднимает роутер на свободном порту и возвращает клиента к нему
    async fn spawn(config: Config) -> ApiClient {
        let mode = config.auth.mode;
        let state = AppState::in_memory(config, true);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, configure_routes(state)).await.unwrap();
        });
        let api = ApiConfig {
            base_url: format!("http://{}/api", addr),
        };
        ApiClient::new(&api, mode).unwrap()
    }

    #[test]
    fn test_list_query() {
        assert_eq!(list_query(None, None), "");
        assert_eq!(list_query(Some("Low Stock"), None), "?status=Low%20Stock");
        assert_eq!(list_query(Some(""), Some("ana")), "?search=ana");
    }

    #[tokio::test]
    async fn test_session_client_end_to_end() {
        let mut config = Config::default();
        config.auth.require_login = true;
        let client = spawn(config).await;

        match client.orders(None, None).await {
            Err(ApiError::Status { status, .. }) => assert_eq!(status, 401),
            other => panic!("expected 401, got {:?}", other.map(|o| o.len())),
        }

        let auth = client.login("admin@techzone.com", "password").await.unwrap();
        assert!(auth.token.is_none());
        assert_eq!(auth.user.email, "admin@techzone.com");

        let pending = client.orders(Some("Pending"), None).await.unwrap();
        assert_eq!(pending.len(), 1);
        let order = client
            .update_order_status("ORD-003", OrderStatus::Processing)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Processing);

        match client.update_order_status("ORD-001", OrderStatus::Pending).await {
            Err(ApiError::Status { status, message }) => {
                assert_eq!(status, 409);
                assert!(!message.is_empty());
            }
            other => panic!("expected 409, got {:?}", other.map(|o| o.id)),
        }

        client.logout().await.unwrap();
        assert!(client.order_summary().await.is_err());
    }

    #[tokio::test]
    async fn test_bearer_client_inventory_flow() {
        let mut config = Config::default();
        config.auth.mode = AuthMode::Bearer;
        config.auth.require_login = true;
        let client = spawn(config).await;

        let auth = client.login("admin@techzone.com", "password").await.unwrap();
        assert!(auth.token.is_some());

        let low = client.inventory(Some("Low Stock"), None).await.unwrap();
        assert!(low.iter().any(|i| i.id == "INV005"));

        let log = client
            .add_inventory_log(&InventoryLogInput {
                item_id: "INV005".into(),
                kind: MovementKind::StockIn,
                quantity: 20,
                notes: "Restock".into(),
            })
            .await
            .unwrap();
        assert_eq!(log.id, "LOG005");
        assert_eq!(client.inventory_item("INV005").await.unwrap().available(), 23);

        let logs = client.inventory_logs().await.unwrap();
        assert_eq!(logs[0].id, "LOG005");

        let recent = client.recent_orders(4).await.unwrap();
        assert_eq!(recent[0].amount, "₱12,000");

        let verify = client.verify_reset_token("missing").await.unwrap();
        assert!(!verify.valid);

        // axum отклоняет query текстом, без конверта
        let rejected = client
            .get::<serde_json::Value>("/dashboard/recent-orders?limit=many")
            .await;
        assert!(matches!(rejected, Err(ApiError::Status { status: 400, .. })));
    }
}
