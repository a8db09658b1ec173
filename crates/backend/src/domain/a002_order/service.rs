use contracts::domain::a002_order::aggregate::{Order, OrderStatus, OrderSummary};

use crate::shared::data::repository::StatusStore;
use crate::shared::data::sample_date;
use crate::shared::error::ServiceError;
use crate::shared::listing::{get_or_not_found, list_visible, ListQuery};
use crate::shared::state::AppState;

/// Список заказов с фильтрами страницы
pub async fn list(state: &AppState, query: &ListQuery) -> Result<Vec<Order>, ServiceError> {
    list_visible(state.orders.as_ref(), query).await
}

pub async fn get_by_id(state: &AppState, id: &str) -> Result<Order, ServiceError> {
    get_or_not_found(state.orders.as_ref(), id).await
}

/// Плитки считаются по всей коллекции, независимо от фильтров
pub async fn summary(state: &AppState) -> Result<OrderSummary, ServiceError> {
    let orders = state.orders.list().await?;
    Ok(OrderSummary::from_records(&orders))
}

/// Смена статуса заказа по таблице переходов
pub async fn change_status(
    state: &AppState,
    id: &str,
    status: OrderStatus,
) -> Result<Order, ServiceError> {
    state
        .orders
        .upsert_status(id, status, state.transition_policy())
        .await
}

pub async fn cancel(state: &AppState, id: &str) -> Result<Order, ServiceError> {
    change_status(state, id, OrderStatus::Cancelled).await
}

fn order(
    id: &str,
    customer: &str,
    email: &str,
    products: &str,
    total: f64,
    status: OrderStatus,
    day: u32,
) -> Order {
    Order {
        id: id.into(),
        customer: customer.into(),
        email: email.into(),
        products: products.into(),
        total,
        status,
        date: sample_date(2024, 2, day),
    }
}

/// Начальные данные
pub fn sample_data() -> Vec<Order> {
    vec![
        order("ORD-001", "Juan Dela Cruz", "juan@email.com", "ROG Strix G16", 75000.0, OrderStatus::Delivered, 8),
        order("ORD-002", "Maria Santos", "maria@email.com", "RTX 4080 Graphics Card", 55000.0, OrderStatus::Processing, 9),
        order("ORD-003", "Pedro Reyes", "pedro@email.com", "LG UltraGear Monitor", 22000.0, OrderStatus::Pending, 10),
        order("ORD-004", "Ana Garcia", "ana@email.com", "Logitech G Pro", 8500.0, OrderStatus::Shipped, 10),
        order("ORD-005", "Carlos Miguel", "carlos@email.com", "Corsair RAM 32GB", 12000.0, OrderStatus::Processing, 11),
    ]
}
