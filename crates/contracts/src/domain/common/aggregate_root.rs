/// Трейт для корня агрегата
///
/// Определяет идентификатор записи и статические метаданные коллекции.
/// Идентификатор — бизнес-код вида "ORD-001", уникальный внутри коллекции.
pub trait AggregateRoot {
    /// Получить ID записи
    fn id(&self) -> &str;

    /// Индекс агрегата в системе (например, "a002")
    fn aggregate_index() -> &'static str
    where
        Self: Sized;

    /// Имя коллекции (например, "orders")
    fn collection_name() -> &'static str
    where
        Self: Sized;

    /// Имя элемента для UI (единственное число)
    fn element_name() -> &'static str
    where
        Self: Sized;

    /// Имя списка для UI (множественное число)
    fn list_name() -> &'static str
    where
        Self: Sized;

    /// Префикс кода новых записей (например, "ORD-")
    fn code_prefix() -> &'static str
    where
        Self: Sized;

    /// Ширина числовой части кода новых записей
    fn code_width() -> usize
    where
        Self: Sized,
    {
        3
    }

    /// Полное имя агрегата для системы (например, "a002_orders")
    fn full_name() -> String
    where
        Self: Sized,
    {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
