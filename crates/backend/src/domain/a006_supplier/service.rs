use contracts::domain::a006_supplier::aggregate::{
    Supplier, SupplierInput, SupplierStatus, SupplierSummary,
};

use crate::shared::error::ServiceError;
use crate::shared::listing::{delete_or_not_found, get_or_not_found, list_visible, next_id, ListQuery};
use crate::shared::state::AppState;

pub async fn list(state: &AppState, query: &ListQuery) -> Result<Vec<Supplier>, ServiceError> {
    list_visible(state.suppliers.as_ref(), query).await
}

pub async fn get_by_id(state: &AppState, id: &str) -> Result<Supplier, ServiceError> {
    get_or_not_found(state.suppliers.as_ref(), id).await
}

pub async fn summary(state: &AppState) -> Result<SupplierSummary, ServiceError> {
    let suppliers = state.suppliers.list().await?;
    Ok(SupplierSummary::from_records(&suppliers))
}

/// Новый поставщик с кодом `SUP-{NNN}`
pub async fn create(state: &AppState, input: SupplierInput) -> Result<Supplier, ServiceError> {
    input.validate().map_err(ServiceError::Validation)?;
    let id = next_id(state.suppliers.as_ref()).await?;
    let supplier = state.suppliers.insert(Supplier::from_input(id, input)).await?;
    tracing::info!("Supplier {} created: {}", supplier.id, supplier.name);
    Ok(supplier)
}

pub async fn update(state: &AppState, id: &str, input: SupplierInput) -> Result<Supplier, ServiceError> {
    input.validate().map_err(ServiceError::Validation)?;
    state
        .suppliers
        .modify(
            id,
            Box::new(move |supplier: &mut Supplier| {
                supplier.apply_input(input);
                Ok(())
            }),
        )
        .await
}

pub async fn delete(state: &AppState, id: &str) -> Result<(), ServiceError> {
    delete_or_not_found(state.suppliers.as_ref(), id).await
}

#[allow(clippy::too_many_arguments)]
fn supplier(
    id: &str,
    name: &str,
    contact: &str,
    email: &str,
    phone: &str,
    address: &str,
    products: &[&str],
    total_orders: u32,
    total_value: f64,
    rating: f64,
) -> Supplier {
    Supplier {
        id: id.into(),
        name: name.into(),
        contact: contact.into(),
        email: email.into(),
        phone: phone.into(),
        address: address.into(),
        products: products.iter().map(|p| p.to_string()).collect(),
        total_orders,
        total_value,
        status: SupplierStatus::Active,
        rating,
    }
}

/// Начальные данные
pub fn sample_data() -> Vec<Supplier> {
    vec![
        supplier(
            "SUP-001",
            "ASUS Philippines Inc.",
            "Michael Chen",
            "michael.chen@asus.com.ph",
            "+63 2 8888 4788",
            "8F, Summit One Tower, Makati City",
            &["Laptops", "Motherboards", "Graphics Cards"],
            45,
            5_400_000.0,
            4.8,
        ),
        supplier(
            "SUP-002",
            "MSI Technology Philippines",
            "Sarah Lim",
            "sarah@msi.com.ph",
            "+63 2 7755 0088",
            "Robinsons Cybergate, Mandaluyong City",
            &["Gaming Laptops", "Components"],
            32,
            3_200_000.0,
            4.6,
        ),
        supplier(
            "SUP-003",
            "Logitech Distribution Inc.",
            "David Santos",
            "david@logitech.ph",
            "+63 2 8856 3000",
            "BGC, Taguig City",
            &["Peripherals", "Accessories"],
            67,
            1_800_000.0,
            4.9,
        ),
        supplier(
            "SUP-004",
            "Corsair Tech Supply",
            "Jennifer Reyes",
            "jen@corsair-ph.com",
            "+63 2 8234 5678",
            "Ortigas Center, Pasig City",
            &["RAM", "Power Supply", "Cooling"],
            28,
            980_000.0,
            4.5,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::Config;
    use contracts::domain::a006_supplier::aggregate::ProductList;

    fn state() -> AppState {
        AppState::in_memory(Config::default(), true)
    }

    fn input() -> SupplierInput {
        SupplierInput {
            name: "Kingston Technology PH".into(),
            contact: "Rico Cruz".into(),
            email: "rico@kingston.ph".into(),
            phone: "+63 2 8123 4567".into(),
            address: "Quezon City".into(),
            products: ProductList::Csv("Storage, RAM".into()),
            status: None,
        }
    }

    #[tokio::test]
    async fn test_create_supplier() {
        let state = state();
        let created = create(&state, input()).await.unwrap();
        assert_eq!(created.id, "SUP-005");
        assert_eq!(created.products, vec!["Storage", "RAM"]);
        assert_eq!(created.total_orders, 0);

        let summary = summary(&state).await.unwrap();
        assert_eq!(summary.total, 5);
        assert_eq!(summary.active, 5);
        assert_eq!(summary.total_orders, 172);
    }

    #[tokio::test]
    async fn test_update_keeps_counters() {
        let state = state();
        let mut form = input();
        form.status = Some(SupplierStatus::Inactive);
        let updated = update(&state, "SUP-003", form).await.unwrap();
        assert_eq!(updated.total_orders, 67);
        assert_eq!(updated.rating, 4.9);
        assert_eq!(updated.status, SupplierStatus::Inactive);
        assert_eq!(summary(&state).await.unwrap().active, 3);
    }

    #[tokio::test]
    async fn test_search_by_contact() {
        let found = list(&state(), &ListQuery::new(Some("Active"), Some("jennifer"))).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "SUP-004");
    }
}
