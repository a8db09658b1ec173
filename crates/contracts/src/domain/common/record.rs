use super::StatusEnum;

/// Трейт для записей, поддерживающих текстовый поиск в списке
pub trait Searchable {
    /// Поля, по которым ищет строка поиска
    fn search_fields(&self) -> Vec<&str>;

    /// Регистронезависимое вхождение подстроки хотя бы в одно поле.
    /// Пустой запрос соответствует любой записи.
    fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Запись со статусом (хранимым или вычисляемым)
pub trait HasStatus {
    type Status: StatusEnum;

    fn status(&self) -> Self::Status;
}

/// Запись с хранимым, изменяемым статусом
pub trait StatusMut: HasStatus {
    fn set_status(&mut self, status: Self::Status);
}
