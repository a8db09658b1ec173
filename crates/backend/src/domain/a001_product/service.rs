use contracts::domain::a001_product::aggregate::{
    Product, ProductInput, ProductStatus, ProductSummary, StockUpdate,
};

use crate::shared::error::ServiceError;
use crate::shared::listing::{delete_or_not_found, get_or_not_found, list_visible, next_id, ListQuery};
use crate::shared::state::AppState;

pub async fn list(state: &AppState, query: &ListQuery) -> Result<Vec<Product>, ServiceError> {
    list_visible(state.products.as_ref(), query).await
}

pub async fn get_by_id(state: &AppState, id: &str) -> Result<Product, ServiceError> {
    get_or_not_found(state.products.as_ref(), id).await
}

pub async fn summary(state: &AppState) -> Result<ProductSummary, ServiceError> {
    let products = state.products.list().await?;
    Ok(ProductSummary::from_records(&products))
}

/// Создание товара с кодом `P{NNN}`
pub async fn create(state: &AppState, input: ProductInput) -> Result<Product, ServiceError> {
    input.validate().map_err(ServiceError::Validation)?;
    let id = next_id(state.products.as_ref()).await?;
    let product = state.products.insert(Product::from_input(id, input)).await?;
    tracing::info!("Product {} created: {}", product.id, product.name);
    Ok(product)
}

pub async fn update(state: &AppState, id: &str, input: ProductInput) -> Result<Product, ServiceError> {
    input.validate().map_err(ServiceError::Validation)?;
    state
        .products
        .modify(
            id,
            Box::new(move |product: &mut Product| {
                product.apply_input(input);
                Ok(())
            }),
        )
        .await
}

pub async fn update_stock(state: &AppState, id: &str, update: StockUpdate) -> Result<Product, ServiceError> {
    let product = state
        .products
        .modify(
            id,
            Box::new(move |product: &mut Product| {
                product.stock = update.stock;
                Ok(())
            }),
        )
        .await?;
    tracing::info!("Product {} stock set to {}", product.id, product.stock);
    Ok(product)
}

pub async fn delete(state: &AppState, id: &str) -> Result<(), ServiceError> {
    delete_or_not_found(state.products.as_ref(), id).await
}

fn product(id: &str, name: &str, category: &str, price: f64, stock: u32) -> Product {
    Product {
        id: id.into(),
        name: name.into(),
        category: category.into(),
        price,
        stock,
        status: ProductStatus::Active,
        description: None,
        image: None,
    }
}

/// Начальные данные
pub fn sample_data() -> Vec<Product> {
    vec![
        product("P001", "ROG Strix G16 (2025) G614", "Laptops", 75000.0, 12),
        product("P002", "NVIDIA RTX 4080 Graphics Card", "Components", 55000.0, 8),
        product("P003", "LG UltraGear 27\" Monitor", "Peripherals", 22000.0, 15),
        product("P004", "Logitech G Pro Wireless", "Peripherals", 8500.0, 25),
        product("P005", "Corsair Vengeance RAM 32GB", "Components", 12000.0, 5),
    ]
}
