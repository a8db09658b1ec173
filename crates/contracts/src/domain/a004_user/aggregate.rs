use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateRoot, HasStatus, Lifecycle, Searchable, StatusMut};
use crate::shared::list_state::{average_by, count_by_status, count_of, StatusCount};

crate::status_enum! {
    /// Статус учётной записи покупателя
    pub enum UserStatus {
        Active => "Active",
        Inactive => "Inactive",
        Suspended => "Suspended",
    }
}

impl Lifecycle for UserStatus {
    fn successors(&self) -> &'static [Self] {
        use UserStatus::*;
        match self {
            Active => &[Suspended, Inactive],
            Suspended => &[Active],
            Inactive => &[Active],
        }
    }
}

/// Учётная запись покупателя магазина
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Количество заказов
    pub orders: u32,
    pub total_spent: f64,
    pub status: UserStatus,
    pub join_date: NaiveDate,
}

impl AggregateRoot for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "users"
    }

    fn element_name() -> &'static str {
        "User"
    }

    fn list_name() -> &'static str {
        "Users"
    }

    fn code_prefix() -> &'static str {
        "U"
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.email]
    }
}

impl HasStatus for User {
    type Status = UserStatus;

    fn status(&self) -> UserStatus {
        self.status
    }
}

impl StatusMut for User {
    fn set_status(&mut self, status: UserStatus) {
        self.status = status;
    }
}

/// Плитки страницы пользователей
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub total: usize,
    pub by_status: Vec<StatusCount<UserStatus>>,
    /// Средние траты на пользователя, округлённые до целого
    pub average_spend: f64,
}

impl UserSummary {
    pub fn from_records(users: &[User]) -> Self {
        Self {
            total: users.len(),
            by_status: count_by_status(users),
            average_spend: average_by(users, |u| u.total_spent).round(),
        }
    }

    pub fn count(&self, status: UserStatus) -> usize {
        count_of(&self.by_status, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::StatusFilter;
    use crate::shared::list_state::filter_records;

    fn user(id: &str, name: &str, spent: f64, status: UserStatus) -> User {
        User {
            id: id.into(),
            name: name.into(),
            email: format!("{}@email.com", name.split(' ').next().unwrap_or("").to_lowercase()),
            phone: "+63 900 000 0000".into(),
            orders: 1,
            total_spent: spent,
            status,
            join_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        }
    }

    #[test]
    fn test_summary_average_is_rounded() {
        let users = vec![
            user("U001", "Juan Dela Cruz", 245000.0, UserStatus::Active),
            user("U002", "Maria Santos", 156000.0, UserStatus::Active),
            user("U003", "Carlos Miguel", 1.0, UserStatus::Inactive),
        ];
        let summary = UserSummary::from_records(&users);
        assert_eq!(summary.average_spend, 133667.0);
        assert_eq!(summary.count(UserStatus::Active), 2);
        assert_eq!(summary.count(UserStatus::Suspended), 0);
    }

    #[test]
    fn test_summary_of_empty_collection() {
        let summary = UserSummary::from_records(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.average_spend, 0.0);
    }

    #[test]
    fn test_search_by_email() {
        let users = vec![
            user("U001", "Juan Dela Cruz", 0.0, UserStatus::Active),
            user("U002", "Maria Santos", 0.0, UserStatus::Suspended),
        ];
        let found = filter_records(&users, "MARIA@", StatusFilter::Only(UserStatus::Suspended));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "U002");
    }

    #[test]
    fn test_suspend_and_restore() {
        assert!(UserStatus::Active.can_transition_to(UserStatus::Suspended));
        assert!(UserStatus::Suspended.can_transition_to(UserStatus::Active));
        assert!(!UserStatus::Suspended.can_transition_to(UserStatus::Inactive));
    }
}
