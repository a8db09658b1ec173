pub mod db;
pub mod memory;
pub mod record_store;
pub mod repository;

use contracts::domain::common::AggregateRoot;

use repository::Repository;

/// Заполнить пустую коллекцию начальными данными; возвращает число вставленных записей
pub async fn seed_collection<T>(repo: &dyn Repository<T>, records: Vec<T>) -> anyhow::Result<usize>
where
    T: AggregateRoot,
{
    if !repo.list().await?.is_empty() {
        return Ok(0);
    }
    let count = records.len();
    for record in records {
        repo.insert(record).await?;
    }
    tracing::info!("Seeded {} {}", count, T::collection_name());
    Ok(count)
}

/// Дата для начальных данных
pub fn sample_date(year: i32, month: u32, day: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Дата и время для начальных данных
pub fn sample_datetime(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> chrono::NaiveDateTime {
    sample_date(year, month, day)
        .and_hms_opt(hour, minute, 0)
        .unwrap_or_default()
}
