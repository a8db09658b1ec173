use async_trait::async_trait;
use chrono::Utc;
use contracts::domain::common::AggregateRoot;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, QueryOrder, Set, TransactionTrait};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use tokio::sync::Mutex;

use super::repository::{Mutation, Repository};
use crate::shared::error::ServiceError;

/// Строка общей таблицы записей: JSON записи в рамках коллекции
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "record_store")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub collection: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Порядок добавления внутри коллекции
    pub position: i64,
    pub payload: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn storage(e: impl Into<anyhow::Error>) -> ServiceError {
    ServiceError::Storage(e.into())
}

/// Хранилище коллекции в SQLite (таблица `record_store`)
pub struct SqliteRepository<T> {
    conn: DatabaseConnection,
    write_lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> SqliteRepository<T>
where
    T: AggregateRoot + Serialize + DeserializeOwned,
{
    pub fn new(conn: DatabaseConnection) -> Self {
        Self {
            conn,
            write_lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    fn collection() -> &'static str {
        T::collection_name()
    }

    async fn find_row<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<Model>, ServiceError> {
        Entity::find_by_id((Self::collection().to_string(), id.to_string()))
            .one(db)
            .await
            .map_err(storage)
    }

    fn decode(row: &Model) -> Result<T, ServiceError> {
        serde_json::from_str(&row.payload).map_err(|e| {
            ServiceError::Storage(anyhow::anyhow!(
                "corrupt {} record {}: {}",
                row.collection,
                row.id,
                e
            ))
        })
    }

    fn encode(record: &T) -> Result<String, ServiceError> {
        serde_json::to_string(record).map_err(storage)
    }
}

#[async_trait]
impl<T> Repository<T> for SqliteRepository<T>
where
    T: AggregateRoot + Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    async fn list(&self) -> Result<Vec<T>, ServiceError> {
        let rows = Entity::find()
            .filter(Column::Collection.eq(Self::collection()))
            .order_by_asc(Column::Position)
            .all(&self.conn)
            .await
            .map_err(storage)?;
        rows.iter().map(Self::decode).collect()
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<T>, ServiceError> {
        Self::find_row(&self.conn, id)
            .await?
            .as_ref()
            .map(Self::decode)
            .transpose()
    }

    async fn insert(&self, record: T) -> Result<T, ServiceError> {
        let _guard = self.write_lock.lock().await;
        if Self::find_row(&self.conn, record.id()).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "{} {} already exists",
                T::element_name(),
                record.id()
            )));
        }
        let last = Entity::find()
            .filter(Column::Collection.eq(Self::collection()))
            .order_by_desc(Column::Position)
            .one(&self.conn)
            .await
            .map_err(storage)?;
        let position = last.map(|row| row.position + 1).unwrap_or(0);

        let active = ActiveModel {
            collection: Set(Self::collection().to_string()),
            id: Set(record.id().to_string()),
            position: Set(position),
            payload: Set(Self::encode(&record)?),
            updated_at: Set(Utc::now().to_rfc3339()),
        };
        active.insert(&self.conn).await.map_err(storage)?;
        Ok(record)
    }

    async fn save(&self, record: T) -> Result<bool, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let Some(existing) = Self::find_row(&self.conn, record.id()).await? else {
            return Ok(false);
        };
        let mut active: ActiveModel = existing.into();
        active.payload = Set(Self::encode(&record)?);
        active.updated_at = Set(Utc::now().to_rfc3339());
        active.update(&self.conn).await.map_err(storage)?;
        Ok(true)
    }

    async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let result = Entity::delete_by_id((Self::collection().to_string(), id.to_string()))
            .exec(&self.conn)
            .await
            .map_err(storage)?;
        Ok(result.rows_affected > 0)
    }

    async fn modify(&self, id: &str, mutation: Mutation<T>) -> Result<T, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let txn = self.conn.begin().await.map_err(storage)?;
        let row = Self::find_row(&txn, id)
            .await?
            .ok_or_else(|| ServiceError::not_found(T::element_name(), id))?;
        let mut record = Self::decode(&row)?;
        mutation(&mut record)?;

        let mut active: ActiveModel = row.into();
        active.payload = Set(Self::encode(&record)?);
        active.updated_at = Set(Utc::now().to_rfc3339());
        active.update(&txn).await.map_err(storage)?;
        txn.commit().await.map_err(storage)?;
        Ok(record)
    }
}
