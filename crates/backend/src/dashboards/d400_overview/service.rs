use chrono::{Datelike, Local, NaiveDate};
use contracts::dashboards::d400_overview::dto::{
    DashboardStats, LowStockItem, RecentOrder, SalesPeriod, SalesPoint,
};
use contracts::domain::a002_order::aggregate::Order;
use contracts::domain::a004_user::aggregate::UserStatus;

use crate::shared::error::ServiceError;
use crate::shared::format::{format_change, format_peso};
use crate::shared::state::AppState;

/// Месяц как порядковый номер: year * 12 + (month - 1)
fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

fn month_label(index: i32) -> String {
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b").to_string())
        .unwrap_or_default()
}

/// Текущий месяц дашборда: месяц последнего заказа, иначе сегодня
fn anchor_month(orders: &[Order]) -> i32 {
    let latest = orders
        .iter()
        .map(|o| o.date)
        .max()
        .unwrap_or_else(|| Local::now().date_naive());
    month_index(latest)
}

fn revenue_in(orders: &[Order], month: i32) -> f64 {
    orders
        .iter()
        .filter(|o| o.counts_as_revenue() && month_index(o.date) == month)
        .map(|o| o.total)
        .sum()
}

fn orders_in(orders: &[Order], month: i32) -> usize {
    orders.iter().filter(|o| month_index(o.date) == month).count()
}

/// Плитки главной страницы
pub async fn stats(state: &AppState) -> Result<DashboardStats, ServiceError> {
    let orders = state.orders.list().await?;
    let products = state.products.list().await?;
    let users = state.users.list().await?;

    let current = anchor_month(&orders);
    let previous = current - 1;

    let total_revenue = orders
        .iter()
        .filter(|o| o.counts_as_revenue())
        .map(|o| o.total)
        .sum();

    let active = || users.iter().filter(|u| u.status == UserStatus::Active);
    let joined_in = |month: i32| active().filter(|u| month_index(u.join_date) == month).count();

    Ok(DashboardStats {
        total_revenue,
        revenue_change: format_change(revenue_in(&orders, current), revenue_in(&orders, previous)),
        total_orders: orders.len(),
        orders_change: format_change(
            orders_in(&orders, current) as f64,
            orders_in(&orders, previous) as f64,
        ),
        total_products: products.len(),
        products_change: format_change(0.0, 0.0),
        active_users: active().count(),
        users_change: format_change(joined_in(current) as f64, joined_in(previous) as f64),
    })
}

/// Помесячные продажи за период, последний месяц — месяц последнего заказа
pub async fn sales(state: &AppState, period: SalesPeriod) -> Result<Vec<SalesPoint>, ServiceError> {
    let orders = state.orders.list().await?;
    let last = anchor_month(&orders);
    let first = last - period.months() as i32 + 1;

    Ok((first..=last)
        .map(|month| SalesPoint {
            month: month_label(month),
            sales: revenue_in(&orders, month),
            orders: orders_in(&orders, month),
        })
        .collect())
}

/// Последние заказы, новые первыми
pub async fn recent_orders(state: &AppState, limit: usize) -> Result<Vec<RecentOrder>, ServiceError> {
    let mut orders = state.orders.list().await?;
    orders.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));

    Ok(orders
        .into_iter()
        .take(limit)
        .map(|o| RecentOrder {
            amount: format_peso(o.total),
            status: o.status.to_string(),
            id: o.id,
            customer: o.customer,
            product: o.products,
        })
        .collect())
}

/// Позиции склада на уровне точки заказа или ниже
pub async fn low_stock(state: &AppState) -> Result<Vec<LowStockItem>, ServiceError> {
    let items = state.inventory.list().await?;
    Ok(items
        .iter()
        .filter(|i| i.is_low_stock())
        .map(|i| LowStockItem {
            product: i.product.clone(),
            stock: i.available(),
            threshold: i.reorder_point,
        })
        .collect())
}
