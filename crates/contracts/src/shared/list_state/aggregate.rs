use serde::{Deserialize, Serialize};

use crate::domain::common::{HasStatus, StatusEnum};

/// Плитка сводки: статус и количество записей в нём
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount<S> {
    pub status: S,
    pub count: usize,
}

/// Количество записей по каждому статусу за один проход
///
/// Результат содержит все значения перечисления (включая нулевые)
/// в порядке объявления.
pub fn count_by_status<T: HasStatus>(records: &[T]) -> Vec<StatusCount<T::Status>> {
    let all = <T::Status as StatusEnum>::ALL;
    let mut counts = vec![0usize; all.len()];
    for record in records {
        counts[record.status().ordinal()] += 1;
    }
    all.iter()
        .zip(counts)
        .map(|(status, count)| StatusCount {
            status: *status,
            count,
        })
        .collect()
}

/// Количество для статуса из готовой сводки
pub fn count_of<S: PartialEq + Copy>(tally: &[StatusCount<S>], status: S) -> usize {
    tally
        .iter()
        .find(|c| c.status == status)
        .map(|c| c.count)
        .unwrap_or(0)
}

/// Сумма числового поля по всей коллекции
pub fn sum_by<T, N, F>(records: &[T], field: F) -> N
where
    N: std::iter::Sum<N>,
    F: Fn(&T) -> N,
{
    records.iter().map(field).sum()
}

/// Среднее значение поля; для пустой коллекции 0
pub fn average_by<T, F>(records: &[T], field: F) -> f64
where
    F: Fn(&T) -> f64,
{
    if records.is_empty() {
        return 0.0;
    }
    sum_by::<T, f64, _>(records, field) / records.len() as f64
}
