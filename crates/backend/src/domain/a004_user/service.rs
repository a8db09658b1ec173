use contracts::domain::a004_user::aggregate::{User, UserStatus, UserSummary};

use crate::shared::data::repository::StatusStore;
use crate::shared::data::sample_date;
use crate::shared::error::ServiceError;
use crate::shared::listing::{delete_or_not_found, get_or_not_found, list_visible, ListQuery};
use crate::shared::state::AppState;

pub async fn list(state: &AppState, query: &ListQuery) -> Result<Vec<User>, ServiceError> {
    list_visible(state.users.as_ref(), query).await
}

pub async fn get_by_id(state: &AppState, id: &str) -> Result<User, ServiceError> {
    get_or_not_found(state.users.as_ref(), id).await
}

pub async fn summary(state: &AppState) -> Result<UserSummary, ServiceError> {
    let users = state.users.list().await?;
    Ok(UserSummary::from_records(&users))
}

/// Блокировка / активация учётной записи
pub async fn change_status(state: &AppState, id: &str, status: UserStatus) -> Result<User, ServiceError> {
    state
        .users
        .upsert_status(id, status, state.transition_policy())
        .await
}

pub async fn delete(state: &AppState, id: &str) -> Result<(), ServiceError> {
    delete_or_not_found(state.users.as_ref(), id).await
}

#[allow(clippy::too_many_arguments)]
fn user(
    id: &str,
    name: &str,
    email: &str,
    phone: &str,
    orders: u32,
    total_spent: f64,
    status: UserStatus,
    (year, month, day): (i32, u32, u32),
) -> User {
    User {
        id: id.into(),
        name: name.into(),
        email: email.into(),
        phone: phone.into(),
        orders,
        total_spent,
        status,
        join_date: sample_date(year, month, day),
    }
}

/// Начальные данные
pub fn sample_data() -> Vec<User> {
    vec![
        user("U001", "Juan Dela Cruz", "juan@email.com", "+63 912 345 6789", 12, 245000.0, UserStatus::Active, (2024, 1, 15)),
        user("U002", "Maria Santos", "maria@email.com", "+63 923 456 7890", 8, 156000.0, UserStatus::Active, (2024, 1, 20)),
        user("U003", "Pedro Reyes", "pedro@email.com", "+63 934 567 8901", 5, 89000.0, UserStatus::Active, (2024, 2, 1)),
        user("U004", "Ana Garcia", "ana@email.com", "+63 945 678 9012", 15, 312000.0, UserStatus::Active, (2023, 12, 10)),
        user("U005", "Carlos Miguel", "carlos@email.com", "+63 956 789 0123", 0, 0.0, UserStatus::Inactive, (2024, 2, 8)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::Config;

    fn state() -> AppState {
        AppState::in_memory(Config::default(), true)
    }

    #[tokio::test]
    async fn test_summary() {
        let summary = summary(&state()).await.unwrap();
        assert_eq!(summary.total, 5);
        assert_eq!(summary.count(UserStatus::Active), 4);
        assert_eq!(summary.count(UserStatus::Suspended), 0);
        assert_eq!(summary.average_spend, 160400.0);
    }

    #[tokio::test]
    async fn test_suspend_then_filter() {
        let state = state();
        change_status(&state, "U002", UserStatus::Suspended).await.unwrap();
        let suspended = list(&state, &ListQuery::new(Some("Suspended"), None)).await.unwrap();
        assert_eq!(suspended.len(), 1);
        assert_eq!(suspended[0].id, "U002");

        let err = change_status(&state, "U002", UserStatus::Inactive).await.unwrap_err();
        assert!(matches!(err, ServiceError::Transition(_)));
    }

    #[tokio::test]
    async fn test_delete() {
        let state = state();
        delete(&state, "U005").await.unwrap();
        assert!(matches!(delete(&state, "U005").await, Err(ServiceError::NotFound(_))));
        assert_eq!(summary(&state).await.unwrap().total, 4);
    }
}
