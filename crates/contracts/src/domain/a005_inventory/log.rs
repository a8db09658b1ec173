use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateRoot, HasStatus, Searchable};

crate::status_enum! {
    /// Тип складского движения
    pub enum MovementKind {
        StockIn => "Stock In",
        StockOut => "Stock Out",
        Damaged => "Damaged",
        Returned => "Returned",
    }
}

/// Запись журнала складских движений
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLog {
    pub id: String,
    /// Позиция склада, к которой применено движение
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    pub product: String,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    pub quantity: u32,
    #[serde(with = "log_date")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub notes: String,
}

impl AggregateRoot for InventoryLog {
    fn id(&self) -> &str {
        &self.id
    }

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "inventory_logs"
    }

    fn element_name() -> &'static str {
        "Inventory Log"
    }

    fn list_name() -> &'static str {
        "Inventory Logs"
    }

    fn code_prefix() -> &'static str {
        "LOG"
    }
}

impl Searchable for InventoryLog {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.product, &self.notes]
    }
}

impl HasStatus for InventoryLog {
    type Status = MovementKind;

    fn status(&self) -> MovementKind {
        self.kind
    }
}

/// Тело `POST /inventory/logs`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InventoryLogInput {
    pub item_id: String,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    pub quantity: u32,
    #[serde(default)]
    pub notes: String,
}

/// Формат даты журнала: "2024-02-10 10:30"
pub mod log_date {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let json = r#"{
            "id": "LOG001",
            "product": "ROG Strix G16",
            "type": "Stock In",
            "quantity": 10,
            "date": "2024-02-10 10:30",
            "notes": "New shipment from supplier"
        }"#;
        let log: InventoryLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.kind, MovementKind::StockIn);
        assert_eq!(log.item_id, None);

        let value = serde_json::to_value(&log).unwrap();
        assert_eq!(value["type"], "Stock In");
        assert_eq!(value["date"], "2024-02-10 10:30");
        assert!(value.get("itemId").is_none());
    }

    #[test]
    fn test_unknown_movement_kind_is_rejected() {
        let json = r#"{"itemId": "INV001", "type": "Lost", "quantity": 1}"#;
        assert!(serde_json::from_str::<InventoryLogInput>(json).is_err());
    }
}
