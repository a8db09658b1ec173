use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateRoot, HasStatus, Lifecycle, Searchable, StatusMut};
use crate::shared::list_state::{count_by_status, count_of, sum_by, StatusCount};

crate::status_enum! {
    /// Статус поставщика
    pub enum SupplierStatus {
        Active => "Active",
        Inactive => "Inactive",
    }
}

impl Lifecycle for SupplierStatus {
    fn successors(&self) -> &'static [Self] {
        match self {
            SupplierStatus::Active => &[SupplierStatus::Inactive],
            SupplierStatus::Inactive => &[SupplierStatus::Active],
        }
    }
}

/// Поставщик
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,
    pub name: String,
    /// Контактное лицо
    pub contact: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Категории поставляемых товаров
    pub products: Vec<String>,
    pub total_orders: u32,
    pub total_value: f64,
    pub status: SupplierStatus,
    pub rating: f64,
}

impl Supplier {
    /// Новый поставщик: без заказов и рейтинга
    pub fn from_input(id: String, input: SupplierInput) -> Self {
        Self {
            id,
            name: input.name.trim().to_string(),
            contact: input.contact.trim().to_string(),
            email: input.email.trim().to_string(),
            phone: input.phone,
            address: input.address,
            products: input.products.into_vec(),
            total_orders: 0,
            total_value: 0.0,
            status: input.status.unwrap_or(SupplierStatus::Active),
            rating: 0.0,
        }
    }

    /// Обновление из формы; счётчики заказов и рейтинг не трогаются
    pub fn apply_input(&mut self, input: SupplierInput) {
        self.name = input.name.trim().to_string();
        self.contact = input.contact.trim().to_string();
        self.email = input.email.trim().to_string();
        self.phone = input.phone;
        self.address = input.address;
        self.products = input.products.into_vec();
        if let Some(status) = input.status {
            self.status = status;
        }
    }
}

impl AggregateRoot for Supplier {
    fn id(&self) -> &str {
        &self.id
    }

    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn collection_name() -> &'static str {
        "suppliers"
    }

    fn element_name() -> &'static str {
        "Supplier"
    }

    fn list_name() -> &'static str {
        "Suppliers"
    }

    fn code_prefix() -> &'static str {
        "SUP-"
    }
}

impl Searchable for Supplier {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.contact]
    }
}

impl HasStatus for Supplier {
    type Status = SupplierStatus;

    fn status(&self) -> SupplierStatus {
        self.status
    }
}

impl StatusMut for Supplier {
    fn set_status(&mut self, status: SupplierStatus) {
        self.status = status;
    }
}

/// Список категорий из формы: массив или строка через запятую
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductList {
    List(Vec<String>),
    Csv(String),
}

impl Default for ProductList {
    fn default() -> Self {
        ProductList::List(Vec::new())
    }
}

impl ProductList {
    pub fn into_vec(self) -> Vec<String> {
        let items = match self {
            ProductList::List(items) => items,
            ProductList::Csv(raw) => raw.split(',').map(str::to_string).collect(),
        };
        items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Форма создания / редактирования поставщика
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SupplierInput {
    pub name: String,
    pub contact: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub products: ProductList,
    #[serde(default)]
    pub status: Option<SupplierStatus>,
}

impl SupplierInput {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Supplier name must not be empty".into());
        }
        if self.contact.trim().is_empty() {
            return Err("Contact person must not be empty".into());
        }
        if !self.email.contains('@') {
            return Err("Supplier email is not valid".into());
        }
        Ok(())
    }
}

/// Плитки страницы поставщиков
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierSummary {
    pub total: usize,
    pub active: usize,
    pub by_status: Vec<StatusCount<SupplierStatus>>,
    pub total_orders: u64,
    pub total_value: f64,
}

impl SupplierSummary {
    pub fn from_records(suppliers: &[Supplier]) -> Self {
        let by_status = count_by_status(suppliers);
        Self {
            total: suppliers.len(),
            active: count_of(&by_status, SupplierStatus::Active),
            by_status,
            total_orders: sum_by(suppliers, |s| u64::from(s.total_orders)),
            total_value: sum_by(suppliers, |s| s.total_value),
        }
    }
}
