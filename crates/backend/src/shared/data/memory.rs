use async_trait::async_trait;
use contracts::domain::common::AggregateRoot;
use tokio::sync::RwLock;

use super::repository::{Mutation, Repository};
use crate::shared::error::ServiceError;

/// Хранилище коллекции в памяти процесса
pub struct InMemoryRepository<T> {
    records: RwLock<Vec<T>>,
}

impl<T> InMemoryRepository<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl<T> Repository<T> for InMemoryRepository<T>
where
    T: AggregateRoot + Clone + Send + Sync + 'static,
{
    async fn list(&self) -> Result<Vec<T>, ServiceError> {
        Ok(self.records.read().await.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<T>, ServiceError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    async fn insert(&self, record: T) -> Result<T, ServiceError> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(ServiceError::Conflict(format!(
                "{} {} already exists",
                T::element_name(),
                record.id()
            )));
        }
        records.push(record.clone());
        Ok(record)
    }

    async fn save(&self, record: T) -> Result<bool, ServiceError> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => {
                *slot = record;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id() != id);
        Ok(records.len() != before)
    }

    async fn modify(&self, id: &str, mutation: Mutation<T>) -> Result<T, ServiceError> {
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| ServiceError::not_found(T::element_name(), id))?;
        let mut next = slot.clone();
        mutation(&mut next)?;
        *slot = next.clone();
        Ok(next)
    }
}
