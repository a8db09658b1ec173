use async_trait::async_trait;
use contracts::domain::common::{check_transition, AggregateRoot, Lifecycle, StatusMut, TransitionPolicy};

use crate::shared::error::ServiceError;

/// Проверка перехода статуса с учётом политики
///
/// При `Permissive` недопустимый переход только пишется в лог.
pub fn guard_transition<S: Lifecycle>(
    id: &str,
    from: S,
    to: S,
    policy: TransitionPolicy,
) -> Result<(), ServiceError> {
    if let Err(e) = check_transition(from, to) {
        if policy == TransitionPolicy::Enforce {
            tracing::warn!("Rejected status change of {}: {}", id, e);
            return Err(e.into());
        }
        tracing::warn!("Applying disallowed status change of {}: {}", id, e);
    }
    Ok(())
}

/// Изменение одной записи; при ошибке запись в хранилище не меняется
pub type Mutation<T> = Box<dyn FnOnce(&mut T) -> Result<(), ServiceError> + Send>;

/// Хранилище коллекции записей
///
/// Все изменения коллекции проходят через единственный путь записи
/// реализации, поэтому читатели не видят частично применённых изменений.
#[async_trait]
pub trait Repository<T>: Send + Sync {
    /// Вся коллекция в порядке добавления
    async fn list(&self) -> Result<Vec<T>, ServiceError>;

    async fn get_by_id(&self, id: &str) -> Result<Option<T>, ServiceError>;

    /// Добавить запись; `Conflict`, если ID уже занят
    async fn insert(&self, record: T) -> Result<T, ServiceError>;

    /// Заменить запись целиком; `false`, если ID не найден
    async fn save(&self, record: T) -> Result<bool, ServiceError>;

    async fn delete(&self, id: &str) -> Result<bool, ServiceError>;

    /// Атомарно применить изменение к записи и вернуть результат
    async fn modify(&self, id: &str, mutation: Mutation<T>) -> Result<T, ServiceError>;
}

/// Смена статуса через хранилище с проверкой таблицы переходов
#[async_trait]
pub trait StatusStore<T>: Repository<T>
where
    T: AggregateRoot + StatusMut + Send + 'static,
    T::Status: Lifecycle + Send,
{
    async fn upsert_status(
        &self,
        id: &str,
        status: T::Status,
        policy: TransitionPolicy,
    ) -> Result<T, ServiceError> {
        let record_id = id.to_string();
        let updated = self
            .modify(
                id,
                Box::new(move |record: &mut T| {
                    guard_transition(&record_id, record.status(), status, policy)?;
                    record.set_status(status);
                    Ok(())
                }),
            )
            .await?;
        tracing::info!(
            "{} {} status set to {}",
            T::element_name(),
            updated.id(),
            status
        );
        Ok(updated)
    }
}

impl<T, R> StatusStore<T> for R
where
    R: Repository<T> + ?Sized,
    T: AggregateRoot + StatusMut + Send + 'static,
    T::Status: Lifecycle + Send,
{
}
