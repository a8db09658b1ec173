use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateRoot, HasStatus, Lifecycle, Searchable, StatusMut};
use crate::shared::list_state::{count_by_status, count_of, sum_by, StatusCount};

crate::status_enum! {
    /// Статус товара в каталоге
    pub enum ProductStatus {
        Active => "Active",
        Inactive => "Inactive",
    }
}

impl Lifecycle for ProductStatus {
    fn successors(&self) -> &'static [Self] {
        match self {
            ProductStatus::Active => &[ProductStatus::Inactive],
            ProductStatus::Inactive => &[ProductStatus::Active],
        }
    }
}

/// Товар каталога
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: u32,
    pub status: ProductStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Product {
    pub fn from_input(id: String, input: ProductInput) -> Self {
        Self {
            id,
            name: input.name.trim().to_string(),
            category: input.category.trim().to_string(),
            price: input.price,
            stock: input.stock,
            status: input.status.unwrap_or(ProductStatus::Active),
            description: input.description,
            image: input.image,
        }
    }

    /// Обновить поля из формы, ID и (если не передан) статус сохраняются
    pub fn apply_input(&mut self, input: ProductInput) {
        let status = input.status.unwrap_or(self.status);
        *self = Self::from_input(std::mem::take(&mut self.id), input);
        self.status = status;
    }

    /// Стоимость складского остатка
    pub fn stock_value(&self) -> f64 {
        self.price * self.stock as f64
    }
}

impl AggregateRoot for Product {
    fn id(&self) -> &str {
        &self.id
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "products"
    }

    fn element_name() -> &'static str {
        "Product"
    }

    fn list_name() -> &'static str {
        "Products"
    }

    fn code_prefix() -> &'static str {
        "P"
    }
}

impl Searchable for Product {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.category]
    }
}

impl HasStatus for Product {
    type Status = ProductStatus;

    fn status(&self) -> ProductStatus {
        self.status
    }
}

impl StatusMut for Product {
    fn set_status(&mut self, status: ProductStatus) {
        self.status = status;
    }
}

/// Форма создания / редактирования товара
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductInput {
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub status: Option<ProductStatus>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl ProductInput {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Product name must not be empty".into());
        }
        if self.category.trim().is_empty() {
            return Err("Product category must not be empty".into());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err("Product price must be a non-negative number".into());
        }
        Ok(())
    }
}

/// Тело запроса `PUT /products/:id/stock`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StockUpdate {
    pub stock: u32,
}

/// Плитки каталога
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub total: usize,
    pub by_status: Vec<StatusCount<ProductStatus>>,
    pub total_stock: u64,
    pub stock_value: f64,
}

impl ProductSummary {
    pub fn from_records(products: &[Product]) -> Self {
        Self {
            total: products.len(),
            by_status: count_by_status(products),
            total_stock: sum_by(products, |p| u64::from(p.stock)),
            stock_value: sum_by(products, Product::stock_value),
        }
    }

    pub fn count(&self, status: ProductStatus) -> usize {
        count_of(&self.by_status, status)
    }
}
