use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::log::MovementKind;
use crate::domain::common::{AggregateRoot, HasStatus, Searchable};
use crate::shared::list_state::{count_by_status, count_of, sum_by, StatusCount};

crate::status_enum! {
    /// Уровень остатка; вычисляется из `available` и точки дозаказа
    pub enum StockLevel {
        InStock => "In Stock",
        LowStock => "Low Stock",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("damaged ({damaged}) + reserved ({reserved}) exceeds stock ({stock})")]
    Overcommitted {
        stock: u32,
        damaged: u32,
        reserved: u32,
    },
    #[error("requested {requested} units but only {available} available")]
    Insufficient { requested: u32, available: u32 },
    #[error("quantity must be greater than zero")]
    ZeroQuantity,
    #[error("stock {stock} + {quantity} exceeds the maximum quantity")]
    Overflow { stock: u32, quantity: u32 },
}

/// Складская позиция
///
/// `available` не хранится: всегда `stock - damaged - reserved`.
/// При сериализации добавляются вычисляемые поля `available` и `status`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub product: String,
    pub sku: String,
    pub stock: u32,
    pub damaged: u32,
    pub reserved: u32,
    pub reorder_point: u32,
    pub last_updated: NaiveDate,
}

impl Serialize for InventoryItem {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        InventoryItemView::from(self.clone()).serialize(serializer)
    }
}

impl InventoryItem {
    /// Доступно к продаже
    pub fn available(&self) -> u32 {
        self.stock
            .saturating_sub(self.damaged)
            .saturating_sub(self.reserved)
    }

    pub fn stock_level(&self) -> StockLevel {
        if self.available() <= self.reorder_point {
            StockLevel::LowStock
        } else {
            StockLevel::InStock
        }
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock_level() == StockLevel::LowStock
    }

    pub fn check_invariant(&self) -> Result<(), InventoryError> {
        let committed = self.damaged.checked_add(self.reserved);
        if committed.map_or(true, |c| c > self.stock) {
            return Err(InventoryError::Overcommitted {
                stock: self.stock,
                damaged: self.damaged,
                reserved: self.reserved,
            });
        }
        Ok(())
    }

    /// Применить частичное обновление; при нарушении инварианта запись не меняется
    pub fn apply_update(&mut self, update: &InventoryUpdate, today: NaiveDate) -> Result<(), InventoryError> {
        let mut next = self.clone();
        if let Some(stock) = update.stock {
            next.stock = stock;
        }
        if let Some(damaged) = update.damaged {
            next.damaged = damaged;
        }
        if let Some(reserved) = update.reserved {
            next.reserved = reserved;
        }
        if let Some(reorder_point) = update.reorder_point {
            next.reorder_point = reorder_point;
        }
        next.check_invariant()?;
        next.last_updated = today;
        *self = next;
        Ok(())
    }

    /// Применить складское движение
    ///
    /// Приход и возврат увеличивают остаток; расход и списание в брак
    /// ограничены доступным количеством.
    pub fn apply_movement(&mut self, kind: MovementKind, quantity: u32, today: NaiveDate) -> Result<(), InventoryError> {
        if quantity == 0 {
            return Err(InventoryError::ZeroQuantity);
        }
        let available = self.available();
        let outgoing = matches!(kind, MovementKind::StockOut | MovementKind::Damaged);
        if outgoing && quantity > available {
            return Err(InventoryError::Insufficient {
                requested: quantity,
                available,
            });
        }
        match kind {
            MovementKind::StockIn | MovementKind::Returned => {
                self.stock = self.stock.checked_add(quantity).ok_or(InventoryError::Overflow {
                    stock: self.stock,
                    quantity,
                })?;
            }
            // quantity <= available, поэтому вычитание и рост брака не переполняются
            MovementKind::StockOut => self.stock -= quantity,
            MovementKind::Damaged => self.damaged += quantity,
        }
        self.last_updated = today;
        Ok(())
    }
}

/// Представление позиции для ответа API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct InventoryItemView {
    id: String,
    product: String,
    sku: String,
    stock: u32,
    damaged: u32,
    reserved: u32,
    available: u32,
    reorder_point: u32,
    status: StockLevel,
    last_updated: NaiveDate,
}

impl From<InventoryItem> for InventoryItemView {
    fn from(item: InventoryItem) -> Self {
        let available = item.available();
        let status = item.stock_level();
        Self {
            id: item.id,
            product: item.product,
            sku: item.sku,
            stock: item.stock,
            damaged: item.damaged,
            reserved: item.reserved,
            available,
            reorder_point: item.reorder_point,
            status,
            last_updated: item.last_updated,
        }
    }
}

impl AggregateRoot for InventoryItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "inventory"
    }

    fn element_name() -> &'static str {
        "Inventory Item"
    }

    fn list_name() -> &'static str {
        "Inventory"
    }

    fn code_prefix() -> &'static str {
        "INV"
    }
}

impl Searchable for InventoryItem {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.product, &self.sku]
    }
}

impl HasStatus for InventoryItem {
    type Status = StockLevel;

    fn status(&self) -> StockLevel {
        self.stock_level()
    }
}

/// Тело `PUT /inventory/:id`; `available` не принимается
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InventoryUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damaged: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reorder_point: Option<u32>,
}

impl InventoryUpdate {
    pub fn is_empty(&self) -> bool {
        self.stock.is_none()
            && self.damaged.is_none()
            && self.reserved.is_none()
            && self.reorder_point.is_none()
    }
}

/// Тело `POST /inventory/:id/damaged`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DamageReport {
    pub quantity: u32,
    #[serde(default)]
    pub notes: String,
}

/// Плитки страницы склада
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total_items: usize,
    pub by_status: Vec<StatusCount<StockLevel>>,
    pub total_stock: u64,
    pub total_available: u64,
    pub low_stock_count: usize,
    pub total_damaged: u64,
}

impl InventorySummary {
    pub fn from_records(items: &[InventoryItem]) -> Self {
        let by_status = count_by_status(items);
        Self {
            total_items: items.len(),
            low_stock_count: count_of(&by_status, StockLevel::LowStock),
            by_status,
            total_stock: sum_by(items, |i| u64::from(i.stock)),
            total_available: sum_by(items, |i| u64::from(i.available())),
            total_damaged: sum_by(items, |i| u64::from(i.damaged)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::StatusFilter;
    use crate::shared::list_state::filter_records;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
    }

    fn item(id: &str, product: &str, sku: &str, stock: u32, damaged: u32, reserved: u32, reorder: u32) -> InventoryItem {
        InventoryItem {
            id: id.into(),
            product: product.into(),
            sku: sku.into(),
            stock,
            damaged,
            reserved,
            reorder_point: reorder,
            last_updated: day(10),
        }
    }

    fn corsair() -> InventoryItem {
        item("INV005", "Corsair Vengeance RAM 32GB", "RAM-COR-32GB", 5, 0, 2, 15)
    }

    fn lg_monitor() -> InventoryItem {
        item("INV003", "LG UltraGear 27\" Monitor", "MON-LG-27", 15, 2, 1, 8)
    }

    #[test]
    fn test_stock_level_is_derived() {
        assert_eq!(corsair().available(), 3);
        assert_eq!(corsair().stock_level(), StockLevel::LowStock);
        assert_eq!(lg_monitor().available(), 12);
        assert_eq!(lg_monitor().stock_level(), StockLevel::InStock);
    }

    #[test]
    fn test_available_equal_to_reorder_point_is_low() {
        let at_threshold = item("INV009", "Cable", "CAB-1", 10, 0, 0, 10);
        assert!(at_threshold.is_low_stock());
    }

    #[test]
    fn test_status_filter_on_derived_level() {
        let items = vec![lg_monitor(), corsair()];
        let low = filter_records(&items, "", StatusFilter::Only(StockLevel::LowStock));
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].id, "INV005");
        assert_eq!(filter_records(&items, "mon-lg", StatusFilter::All).len(), 1);
    }

    #[test]
    fn test_serialized_view_includes_derived_fields() {
        let json = serde_json::to_value(corsair()).unwrap();
        assert_eq!(json["available"], 3);
        assert_eq!(json["status"], "Low Stock");
        assert_eq!(json["reorderPoint"], 15);

        let back: InventoryItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, corsair());
    }

    #[test]
    fn test_update_rejects_available_field() {
        assert!(serde_json::from_str::<InventoryUpdate>(r#"{"available": 10}"#).is_err());
        let update: InventoryUpdate = serde_json::from_str(r#"{"reorderPoint": 2}"#).unwrap();
        assert_eq!(update.reorder_point, Some(2));
    }

    #[test]
    fn test_update_keeps_invariant() {
        let mut inv = corsair();
        let update = InventoryUpdate {
            damaged: Some(4),
            ..Default::default()
        };
        assert!(matches!(
            inv.apply_update(&update, day(12)),
            Err(InventoryError::Overcommitted { .. })
        ));
        assert_eq!(inv, corsair());

        let update = InventoryUpdate {
            stock: Some(30),
            ..Default::default()
        };
        inv.apply_update(&update, day(12)).unwrap();
        assert_eq!(inv.available(), 28);
        assert_eq!(inv.last_updated, day(12));
        assert_eq!(inv.stock_level(), StockLevel::InStock);
    }

    #[test]
    fn test_movements() {
        let mut inv = corsair();
        inv.apply_movement(MovementKind::StockIn, 10, day(11)).unwrap();
        assert_eq!(inv.stock, 15);
        inv.apply_movement(MovementKind::Damaged, 1, day(11)).unwrap();
        assert_eq!(inv.damaged, 1);
        assert_eq!(inv.available(), 12);
        assert_eq!(
            inv.apply_movement(MovementKind::StockOut, 13, day(11)),
            Err(InventoryError::Insufficient {
                requested: 13,
                available: 12
            })
        );
        assert_eq!(
            inv.apply_movement(MovementKind::Returned, 0, day(11)),
            Err(InventoryError::ZeroQuantity)
        );
    }

    #[test]
    fn test_huge_quantities_are_rejected_without_panic() {
        let mut inv = corsair();
        let update = InventoryUpdate {
            damaged: Some(u32::MAX),
            ..Default::default()
        };
        assert!(matches!(
            inv.apply_update(&update, day(12)),
            Err(InventoryError::Overcommitted { .. })
        ));
        assert_eq!(inv, corsair());

        assert_eq!(
            inv.apply_movement(MovementKind::StockIn, u32::MAX, day(12)),
            Err(InventoryError::Overflow {
                stock: 5,
                quantity: u32::MAX
            })
        );
        assert_eq!(inv, corsair());
    }

    #[test]
    fn test_summary_totals_do_not_overflow() {
        let full = item("INV010", "Bulk", "BULK-1", u32::MAX, 0, 0, 0);
        let summary = InventorySummary::from_records(&[full.clone(), full]);
        assert_eq!(summary.total_stock, 2 * u64::from(u32::MAX));
        assert_eq!(summary.total_available, 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_summary() {
        let summary = InventorySummary::from_records(&[lg_monitor(), corsair()]);
        assert_eq!(summary.total_stock, 20);
        assert_eq!(summary.total_available, 15);
        assert_eq!(summary.low_stock_count, 1);
        assert_eq!(summary.total_damaged, 2);
    }
}
