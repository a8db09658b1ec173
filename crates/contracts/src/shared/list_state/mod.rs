//! Состояние списка управления: коллекция записей, строка поиска,
//! фильтр по статусу, переходы статусов и сводные плитки.
//!
//! Сводки всегда считаются по полной коллекции, а не по видимой выборке.

pub mod aggregate;
pub mod filter;
pub mod transition;

pub use aggregate::{average_by, count_by_status, count_of, sum_by, StatusCount};
pub use filter::{count_matching, filter_records};
pub use transition::{apply_status, transition_status};

use crate::domain::common::{
    AggregateRoot, HasStatus, Lifecycle, Searchable, StatusFilter, StatusMut, TransitionError,
};

/// Запись с таким ID уже есть в коллекции
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("record {0} already exists")]
pub struct DuplicateId(pub String);

/// Контейнер состояния списка
#[derive(Debug, Clone)]
pub struct ListState<T: HasStatus> {
    records: Vec<T>,
    query: String,
    status_filter: StatusFilter<T::Status>,
}

impl<T> ListState<T>
where
    T: AggregateRoot + Searchable + HasStatus + Clone,
{
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records,
            query: String::new(),
            status_filter: StatusFilter::All,
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_status_filter(mut self, filter: StatusFilter<T::Status>) -> Self {
        self.status_filter = filter;
        self
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter<T::Status>) {
        self.status_filter = filter;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn status_filter(&self) -> StatusFilter<T::Status> {
        self.status_filter
    }

    /// Полная коллекция
    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Видимая выборка с учётом поиска и фильтра
    pub fn visible(&self) -> Vec<T> {
        filter_records(&self.records, &self.query, self.status_filter)
    }

    pub fn into_visible(self) -> Vec<T> {
        if self.query.is_empty() && self.status_filter == StatusFilter::All {
            return self.records;
        }
        filter_records(&self.records, &self.query, self.status_filter)
    }

    pub fn visible_count(&self) -> usize {
        count_matching(&self.records, &self.query, self.status_filter)
    }

    pub fn total_count(&self) -> usize {
        self.records.len()
    }

    /// Плитки "по статусам" (по полной коллекции)
    pub fn tally(&self) -> Vec<StatusCount<T::Status>> {
        count_by_status(&self.records)
    }

    /// Добавить новую запись в конец коллекции
    pub fn push(&mut self, record: T) -> Result<(), DuplicateId> {
        if self.get(record.id()).is_some() {
            return Err(DuplicateId(record.id().to_string()));
        }
        let mut next = self.records.clone();
        next.push(record);
        self.records = next;
        Ok(())
    }
}

impl<T> ListState<T>
where
    T: AggregateRoot + Searchable + StatusMut + Clone,
{
    /// Безусловная замена статуса; `false`, если ID не найден
    pub fn overwrite_status(&mut self, id: &str, status: T::Status) -> bool {
        let found = self.get(id).is_some();
        self.records = apply_status(&self.records, id, status);
        found
    }
}

impl<T> ListState<T>
where
    T: AggregateRoot + Searchable + StatusMut + Clone,
    T::Status: Lifecycle,
{
    /// Замена статуса с проверкой таблицы переходов
    pub fn transition(&mut self, id: &str, status: T::Status) -> Result<bool, TransitionError> {
        let found = self.get(id).is_some();
        self.records = transition_status(&self.records, id, status)?;
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::StatusEnum;

    crate::status_enum! {
        enum TicketStatus {
            Open => "Open",
            Closed => "Closed",
        }
    }

    impl Lifecycle for TicketStatus {
        fn successors(&self) -> &'static [Self] {
            match self {
                TicketStatus::Open => &[TicketStatus::Closed],
                TicketStatus::Closed => &[],
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Ticket {
        id: String,
        title: String,
        points: u32,
        status: TicketStatus,
    }

    impl AggregateRoot for Ticket {
        fn id(&self) -> &str {
            &self.id
        }
        fn aggregate_index() -> &'static str {
            "t000"
        }
        fn collection_name() -> &'static str {
            "tickets"
        }
        fn element_name() -> &'static str {
            "Ticket"
        }
        fn list_name() -> &'static str {
            "Tickets"
        }
        fn code_prefix() -> &'static str {
            "T-"
        }
    }

    impl Searchable for Ticket {
        fn search_fields(&self) -> Vec<&str> {
            vec![&self.id, &self.title]
        }
    }

    impl HasStatus for Ticket {
        type Status = TicketStatus;
        fn status(&self) -> TicketStatus {
            self.status
        }
    }

    impl StatusMut for Ticket {
        fn set_status(&mut self, status: TicketStatus) {
            self.status = status;
        }
    }

    fn ticket(id: &str, title: &str, points: u32, status: TicketStatus) -> Ticket {
        Ticket {
            id: id.into(),
            title: title.into(),
            points,
            status,
        }
    }

    fn tickets() -> Vec<Ticket> {
        vec![
            ticket("T-1", "Fix Login", 3, TicketStatus::Open),
            ticket("T-2", "Refund flow", 5, TicketStatus::Closed),
            ticket("T-3", "Login audit", 2, TicketStatus::Open),
        ]
    }

    #[test]
    fn test_identity_filter() {
        let all = tickets();
        assert_eq!(filter_records(&all, "", StatusFilter::All), all);
        assert_eq!(ListState::new(all.clone()).into_visible(), all);
    }

    #[test]
    fn test_filter_is_case_insensitive_and_stable() {
        let all = tickets();
        let upper = filter_records(&all, "LOGIN", StatusFilter::All);
        let lower = filter_records(&all, "login", StatusFilter::All);
        assert_eq!(upper, lower);
        let ids: Vec<_> = upper.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["T-1", "T-3"]);
    }

    #[test]
    fn test_filter_combines_query_and_status() {
        let all = tickets();
        assert!(filter_records(&all, "refund", StatusFilter::Only(TicketStatus::Open)).is_empty());
        assert_eq!(count_matching(&all, "", StatusFilter::Only(TicketStatus::Open)), 2);
        assert!(filter_records(&all, "nothing here", StatusFilter::All).is_empty());
    }

    #[test]
    fn test_apply_status_is_localized() {
        let all = tickets();
        let next = apply_status(&all, "T-1", TicketStatus::Closed);
        let changed: Vec<_> = all.iter().zip(&next).filter(|(a, b)| a != b).collect();
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].1.id, "T-1");
        assert_eq!(changed[0].1.status, TicketStatus::Closed);
    }

    #[test]
    fn test_apply_status_unknown_id_is_noop() {
        let all = tickets();
        assert_eq!(apply_status(&all, "T-404", TicketStatus::Closed), all);
    }

    #[test]
    fn test_apply_status_is_idempotent() {
        let all = tickets();
        let once = apply_status(&all, "T-3", TicketStatus::Closed);
        let twice = apply_status(&once, "T-3", TicketStatus::Closed);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_apply_status_ignores_lifecycle() {
        let all = tickets();
        let reopened = apply_status(&all, "T-2", TicketStatus::Open);
        assert_eq!(reopened[1].status, TicketStatus::Open);
    }

    #[test]
    fn test_guarded_transition_rejects_illegal_move() {
        let mut state = ListState::new(tickets());
        let err = state.transition("T-2", TicketStatus::Open).unwrap_err();
        assert_eq!(err.from, "Closed");
        assert_eq!(state.get("T-2").map(|t| t.status), Some(TicketStatus::Closed));

        assert_eq!(state.transition("T-1", TicketStatus::Closed), Ok(true));
        assert_eq!(state.transition("T-1", TicketStatus::Closed), Ok(true));
        assert_eq!(state.transition("T-404", TicketStatus::Closed), Ok(false));
    }

    #[test]
    fn test_tally_ignores_active_filter() {
        let mut state = ListState::new(tickets());
        let before = state.tally();
        let points_before: u32 = sum_by(state.records(), |t| t.points);

        state.set_query("refund");
        state.set_status_filter(StatusFilter::Only(TicketStatus::Closed));
        assert_eq!(state.visible_count(), 1);

        assert_eq!(state.tally(), before);
        assert_eq!(sum_by::<_, u32, _>(state.records(), |t| t.points), points_before);
        assert_eq!(count_of(&before, TicketStatus::Open), 2);
        assert_eq!(before.len(), TicketStatus::ALL.len());
    }

    #[test]
    fn test_empty_collection_aggregates() {
        let empty: Vec<Ticket> = Vec::new();
        let tally = count_by_status(&empty);
        assert!(tally.iter().all(|c| c.count == 0));
        assert_eq!(average_by(&empty, |t| t.points as f64), 0.0);
        assert_eq!(sum_by::<_, u32, _>(&empty, |t| t.points), 0);
    }

    #[test]
    fn test_push_rejects_duplicate_id() {
        let mut state = ListState::new(tickets());
        let err = state
            .push(ticket("T-1", "dup", 1, TicketStatus::Open))
            .unwrap_err();
        assert_eq!(err, DuplicateId("T-1".into()));
        state.push(ticket("T-4", "new", 1, TicketStatus::Open)).unwrap();
        assert_eq!(state.total_count(), 4);
        assert_eq!(state.records()[3].id, "T-4");
    }
}
