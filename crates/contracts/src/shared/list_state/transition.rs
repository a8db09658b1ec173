use crate::domain::common::{
    check_transition, AggregateRoot, Lifecycle, StatusMut, TransitionError,
};

/// Заменяет статус записи с указанным ID
///
/// Безусловная перезапись: остальные записи не меняются, неизвестный ID
/// возвращает копию входной коллекции.
pub fn apply_status<T>(records: &[T], id: &str, status: T::Status) -> Vec<T>
where
    T: AggregateRoot + StatusMut + Clone,
{
    records
        .iter()
        .map(|record| {
            let mut record = record.clone();
            if record.id() == id {
                record.set_status(status);
            }
            record
        })
        .collect()
}

/// То же, что [`apply_status`], но с проверкой таблицы переходов
pub fn transition_status<T>(
    records: &[T],
    id: &str,
    status: T::Status,
) -> Result<Vec<T>, TransitionError>
where
    T: AggregateRoot + StatusMut + Clone,
    T::Status: Lifecycle,
{
    if let Some(current) = records.iter().find(|r| r.id() == id) {
        check_transition(current.status(), status)?;
    }
    Ok(apply_status(records, id, status))
}
