use std::sync::Arc;

use contracts::domain::a001_product::aggregate::Product;
use contracts::domain::a002_order::aggregate::Order;
use contracts::domain::a003_return_request::aggregate::ReturnRequest;
use contracts::domain::a004_user::aggregate::User;
use contracts::domain::a005_inventory::aggregate::InventoryItem;
use contracts::domain::a005_inventory::log::InventoryLog;
use contracts::domain::a006_supplier::aggregate::Supplier;
use contracts::domain::common::{AggregateRoot, TransitionPolicy};
use sea_orm::DatabaseConnection;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{
    a001_product, a002_order, a003_return_request, a004_user, a005_inventory, a006_supplier,
};
use crate::shared::config::{get_database_path, Config, StorageBackend};
use crate::shared::data::db::initialize_database;
use crate::shared::data::memory::InMemoryRepository;
use crate::shared::data::record_store::SqliteRepository;
use crate::shared::data::repository::Repository;
use crate::shared::data::seed_collection;
use crate::system::auth::session::SessionStore;

/// Общее состояние обработчиков
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub products: Arc<dyn Repository<Product>>,
    pub orders: Arc<dyn Repository<Order>>,
    pub returns: Arc<dyn Repository<ReturnRequest>>,
    pub users: Arc<dyn Repository<User>>,
    pub inventory: Arc<dyn Repository<InventoryItem>>,
    pub inventory_logs: Arc<dyn Repository<InventoryLog>>,
    pub suppliers: Arc<dyn Repository<Supplier>>,
    pub sessions: Arc<SessionStore>,
}

fn memory<T>(records: Vec<T>) -> Arc<dyn Repository<T>>
where
    T: AggregateRoot + Clone + Send + Sync + 'static,
{
    Arc::new(InMemoryRepository::new(records))
}

fn sqlite<T>(conn: &DatabaseConnection) -> Arc<dyn Repository<T>>
where
    T: AggregateRoot + Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    Arc::new(SqliteRepository::new(conn.clone()))
}

impl AppState {
    /// Хранилища по настройкам `[storage]`; начальные данные при `seed = true`
    pub async fn from_config(config: Config) -> anyhow::Result<Self> {
        let state = match config.storage.backend {
            StorageBackend::Memory => Self::in_memory(config, false),
            StorageBackend::Sqlite => {
                let conn = initialize_database(&get_database_path(&config)).await?;
                Self::with_sqlite(config, &conn)
            }
        };
        if state.config.storage.seed {
            state.seed().await?;
        }
        Ok(state)
    }

    /// Хранилища в памяти; `seeded` сразу наполняет коллекции примерами
    pub fn in_memory(config: Config, seeded: bool) -> Self {
        fn pick<T>(seeded: bool, sample: fn() -> Vec<T>) -> Vec<T> {
            if seeded {
                sample()
            } else {
                Vec::new()
            }
        }
        Self {
            sessions: Arc::new(SessionStore::new(&config.auth)),
            config: Arc::new(config),
            products: memory(pick(seeded, a001_product::service::sample_data)),
            orders: memory(pick(seeded, a002_order::service::sample_data)),
            returns: memory(pick(seeded, a003_return_request::service::sample_data)),
            users: memory(pick(seeded, a004_user::service::sample_data)),
            inventory: memory(pick(seeded, a005_inventory::service::sample_data)),
            inventory_logs: memory(pick(seeded, a005_inventory::service::sample_logs)),
            suppliers: memory(pick(seeded, a006_supplier::service::sample_data)),
        }
    }

    pub fn with_sqlite(config: Config, conn: &DatabaseConnection) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new(&config.auth)),
            config: Arc::new(config),
            products: sqlite(conn),
            orders: sqlite(conn),
            returns: sqlite(conn),
            users: sqlite(conn),
            inventory: sqlite(conn),
            inventory_logs: sqlite(conn),
            suppliers: sqlite(conn),
        }
    }

    /// Начальные данные в пустые коллекции
    pub async fn seed(&self) -> anyhow::Result<()> {
        seed_collection(self.products.as_ref(), a001_product::service::sample_data()).await?;
        seed_collection(self.orders.as_ref(), a002_order::service::sample_data()).await?;
        seed_collection(self.returns.as_ref(), a003_return_request::service::sample_data()).await?;
        seed_collection(self.users.as_ref(), a004_user::service::sample_data()).await?;
        seed_collection(self.inventory.as_ref(), a005_inventory::service::sample_data()).await?;
        seed_collection(self.inventory_logs.as_ref(), a005_inventory::service::sample_logs()).await?;
        seed_collection(self.suppliers.as_ref(), a006_supplier::service::sample_data()).await?;
        Ok(())
    }

    pub fn transition_policy(&self) -> TransitionPolicy {
        self.config.transitions.policy
    }
}
