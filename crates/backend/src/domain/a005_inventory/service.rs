use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use contracts::domain::a005_inventory::aggregate::{
    DamageReport, InventoryItem, InventorySummary, InventoryUpdate,
};
use contracts::domain::a005_inventory::log::{InventoryLog, InventoryLogInput, MovementKind};

use crate::shared::data::{sample_date, sample_datetime};
use crate::shared::error::ServiceError;
use crate::shared::listing::{get_or_not_found, list_visible, next_id, ListQuery};
use crate::shared::state::AppState;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(now)
}

pub async fn list(state: &AppState, query: &ListQuery) -> Result<Vec<InventoryItem>, ServiceError> {
    list_visible(state.inventory.as_ref(), query).await
}

pub async fn get_by_id(state: &AppState, id: &str) -> Result<InventoryItem, ServiceError> {
    get_or_not_found(state.inventory.as_ref(), id).await
}

pub async fn summary(state: &AppState) -> Result<InventorySummary, ServiceError> {
    let items = state.inventory.list().await?;
    Ok(InventorySummary::from_records(&items))
}

/// Частичное обновление остатков; `available` пересчитывается
pub async fn update(state: &AppState, id: &str, update: InventoryUpdate) -> Result<InventoryItem, ServiceError> {
    if update.is_empty() {
        return Err(ServiceError::Validation("Nothing to update".into()));
    }
    let date = today();
    let item = state
        .inventory
        .modify(
            id,
            Box::new(move |item: &mut InventoryItem| {
                item.apply_update(&update, date)?;
                Ok(())
            }),
        )
        .await?;
    tracing::info!(
        "Inventory {} updated: stock={} damaged={} reserved={} available={}",
        item.id,
        item.stock,
        item.damaged,
        item.reserved,
        item.available()
    );
    Ok(item)
}

/// Журнал движений, новые записи первыми
pub async fn logs(state: &AppState) -> Result<Vec<InventoryLog>, ServiceError> {
    let mut logs = state.inventory_logs.list().await?;
    logs.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(logs)
}

/// Провести движение по позиции и записать его в журнал
pub async fn add_log(state: &AppState, input: InventoryLogInput) -> Result<InventoryLog, ServiceError> {
    let (kind, quantity) = (input.kind, input.quantity);
    let date = today();
    let item = state
        .inventory
        .modify(
            &input.item_id,
            Box::new(move |item: &mut InventoryItem| {
                item.apply_movement(kind, quantity, date)?;
                Ok(())
            }),
        )
        .await?;
    write_log(state, &item, kind, quantity, input.notes).await
}

/// Списание в брак: `damaged += quantity` и запись `Damaged` в журнал
pub async fn mark_damaged(state: &AppState, id: &str, report: DamageReport) -> Result<InventoryItem, ServiceError> {
    let quantity = report.quantity;
    let date = today();
    let item = state
        .inventory
        .modify(
            id,
            Box::new(move |item: &mut InventoryItem| {
                item.apply_movement(MovementKind::Damaged, quantity, date)?;
                Ok(())
            }),
        )
        .await?;
    write_log(state, &item, MovementKind::Damaged, quantity, report.notes).await?;
    Ok(item)
}

async fn write_log(
    state: &AppState,
    item: &InventoryItem,
    kind: MovementKind,
    quantity: u32,
    notes: String,
) -> Result<InventoryLog, ServiceError> {
    let log = InventoryLog {
        id: next_id(state.inventory_logs.as_ref()).await?,
        item_id: Some(item.id.clone()),
        product: item.product.clone(),
        kind,
        quantity,
        date: now(),
        notes,
    };
    let log = state.inventory_logs.insert(log).await?;
    tracing::info!(
        "Inventory {} movement {}: {} x{} (available {})",
        item.id,
        log.id,
        kind,
        quantity,
        item.available()
    );
    Ok(log)
}

#[allow(clippy::too_many_arguments)]
fn item(
    id: &str,
    product: &str,
    sku: &str,
    stock: u32,
    damaged: u32,
    reserved: u32,
    reorder_point: u32,
    day: u32,
) -> InventoryItem {
    InventoryItem {
        id: id.into(),
        product: product.into(),
        sku: sku.into(),
        stock,
        damaged,
        reserved,
        reorder_point,
        last_updated: sample_date(2024, 2, day),
    }
}

/// Начальные данные склада
pub fn sample_data() -> Vec<InventoryItem> {
    vec![
        item("INV001", "ROG Strix G16 (2025) G614", "LAP-ROG-G16", 12, 1, 2, 10, 10),
        item("INV002", "NVIDIA RTX 4080", "GPU-RTX-4080", 8, 0, 3, 5, 11),
        item("INV003", "LG UltraGear 27\" Monitor", "MON-LG-27", 15, 2, 1, 8, 9),
        item("INV004", "Logitech G Pro Wireless", "PER-LOG-GPRO", 25, 1, 5, 15, 10),
        item("INV005", "Corsair Vengeance RAM 32GB", "RAM-COR-32GB", 5, 0, 2, 15, 11),
    ]
}

fn log(id: &str, product: &str, kind: MovementKind, quantity: u32, at: NaiveDateTime, notes: &str) -> InventoryLog {
    InventoryLog {
        id: id.into(),
        item_id: None,
        product: product.into(),
        kind,
        quantity,
        date: at,
        notes: notes.into(),
    }
}

/// Начальные данные журнала
pub fn sample_logs() -> Vec<InventoryLog> {
    vec![
        log("LOG001", "ROG Strix G16", MovementKind::StockIn, 10, sample_datetime(2024, 2, 10, 10, 30), "New shipment from supplier"),
        log("LOG002", "RTX 4080", MovementKind::StockOut, 2, sample_datetime(2024, 2, 10, 14, 15), "Sold - Order #ORD-045"),
        log("LOG003", "LG Monitor", MovementKind::Damaged, 1, sample_datetime(2024, 2, 9, 16, 20), "Screen crack during shipping"),
        log("LOG004", "Logitech G Pro", MovementKind::Returned, 1, sample_datetime(2024, 2, 9, 11, 0), "Customer return - defective"),
    ]
}
