//! Общие операции страниц управления: список с фильтрами, запись по ID, новый код

use contracts::domain::common::{next_code, AggregateRoot, HasStatus, Searchable, StatusFilter};
use contracts::shared::list_state::ListState;
use serde::{Deserialize, Serialize};

use crate::shared::data::repository::Repository;
use crate::shared::error::ServiceError;

/// Query-параметры списка: `?status=Pending&search=ana`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

impl ListQuery {
    pub fn new(status: Option<&str>, search: Option<&str>) -> Self {
        Self {
            status: status.map(str::to_string),
            search: search.map(str::to_string),
        }
    }
}

/// Видимая выборка коллекции с учётом строки поиска и фильтра статуса
pub async fn list_visible<T>(
    repo: &dyn Repository<T>,
    query: &ListQuery,
) -> Result<Vec<T>, ServiceError>
where
    T: AggregateRoot + Searchable + HasStatus + Clone,
{
    let filter = StatusFilter::<T::Status>::parse_opt(query.status.as_deref())?;
    let records = repo.list().await?;
    let state = ListState::new(records)
        .with_query(query.search.clone().unwrap_or_default())
        .with_status_filter(filter);
    Ok(state.into_visible())
}

pub async fn get_or_not_found<T>(repo: &dyn Repository<T>, id: &str) -> Result<T, ServiceError>
where
    T: AggregateRoot,
{
    repo.get_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::not_found(T::element_name(), id))
}

/// Следующий код новой записи коллекции
pub async fn next_id<T>(repo: &dyn Repository<T>) -> Result<String, ServiceError>
where
    T: AggregateRoot,
{
    let records = repo.list().await?;
    Ok(next_code(
        T::code_prefix(),
        T::code_width(),
        records.iter().map(|r| r.id()),
    ))
}

pub async fn delete_or_not_found<T>(repo: &dyn Repository<T>, id: &str) -> Result<(), ServiceError>
where
    T: AggregateRoot,
{
    if repo.delete(id).await? {
        tracing::info!("{} {} deleted", T::element_name(), id);
        Ok(())
    } else {
        Err(ServiceError::not_found(T::element_name(), id))
    }
}
