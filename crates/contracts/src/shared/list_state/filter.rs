use crate::domain::common::{HasStatus, Searchable, StatusFilter};

/// Фильтрует список по строке поиска и статусу
///
/// Порядок записей сохраняется. Пустой запрос вместе с `StatusFilter::All`
/// возвращает коллекцию без изменений.
pub fn filter_records<T>(records: &[T], query: &str, status: StatusFilter<T::Status>) -> Vec<T>
where
    T: Searchable + HasStatus + Clone,
{
    records
        .iter()
        .filter(|record| record.matches_query(query) && status.matches(record.status()))
        .cloned()
        .collect()
}

/// Количество записей, прошедших фильтр (без копирования)
pub fn count_matching<T>(records: &[T], query: &str, status: StatusFilter<T::Status>) -> usize
where
    T: Searchable + HasStatus,
{
    records
        .iter()
        .filter(|record| record.matches_query(query) && status.matches(record.status()))
        .count()
}
