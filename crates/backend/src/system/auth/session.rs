use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use contracts::system::auth::AuthUser;
use tokio::sync::RwLock;

use crate::shared::config::AuthConfig;

struct Session {
    user: AuthUser,
    expires_at: DateTime<Utc>,
}

struct ResetToken {
    email: String,
    expires_at: DateTime<Utc>,
}

trait Expiring {
    fn expires_at(&self) -> DateTime<Utc>;
}

impl Expiring for Session {
    fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

impl Expiring for ResetToken {
    fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

/// Освободить место под новую запись: убрать просроченные, затем самые старые сверх предела
fn make_room<V: Expiring>(entries: &mut HashMap<String, V>, max_entries: usize, now: DateTime<Utc>) {
    entries.retain(|_, entry| entry.expires_at() > now);
    while !entries.is_empty() && entries.len() >= max_entries {
        let oldest = entries
            .iter()
            .min_by_key(|(_, entry)| entry.expires_at())
            .map(|(token, _)| token.clone());
        match oldest {
            Some(token) => {
                entries.remove(&token);
            }
            None => break,
        }
    }
}

/// Сессии администратора и токены сброса пароля (в памяти процесса)
///
/// Оба набора ограничены по времени жизни и по количеству записей.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    reset_tokens: RwLock<HashMap<String, ResetToken>>,
    session_ttl: Duration,
    reset_ttl: Duration,
    max_entries: usize,
}

impl SessionStore {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            reset_tokens: RwLock::new(HashMap::new()),
            session_ttl: Duration::minutes(config.session_ttl_minutes),
            reset_ttl: Duration::minutes(config.reset_token_ttl_minutes),
            max_entries: config.max_entries.max(1),
        }
    }

    /// Открыть сессию; учётные данные не проверяются
    pub async fn open(&self, email: &str) -> (String, AuthUser) {
        let token = uuid::Uuid::new_v4().to_string();
        let user = AuthUser {
            id: "ADMIN-001".into(),
            email: email.trim().to_string(),
            name: "Admin".into(),
            role: "admin".into(),
        };
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        make_room(&mut sessions, self.max_entries, now);
        sessions.insert(
            token.clone(),
            Session {
                user: user.clone(),
                expires_at: now + self.session_ttl,
            },
        );
        (token, user)
    }

    pub async fn user(&self, token: &str) -> Option<AuthUser> {
        self.sessions
            .read()
            .await
            .get(token)
            .filter(|s| s.expires_at > Utc::now())
            .map(|s| s.user.clone())
    }

    /// Закрыть сессию; `false`, если её не было
    pub async fn close(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    pub async fn issue_reset_token(&self, email: &str) -> String {
        let token = uuid::Uuid::new_v4().simple().to_string();
        let now = Utc::now();
        let mut tokens = self.reset_tokens.write().await;
        make_room(&mut tokens, self.max_entries, now);
        tokens.insert(
            token.clone(),
            ResetToken {
                email: email.trim().to_string(),
                expires_at: now + self.reset_ttl,
            },
        );
        token
    }

    /// Email владельца действующего токена; токен не расходуется
    pub async fn verify_reset_token(&self, token: &str) -> Option<String> {
        let tokens = self.reset_tokens.read().await;
        tokens
            .get(token)
            .filter(|t| t.expires_at > Utc::now())
            .map(|t| t.email.clone())
    }

    /// Погасить токен сброса; просроченный токен удаляется, но не принимается
    pub async fn consume_reset_token(&self, token: &str) -> Option<String> {
        let entry = self.reset_tokens.write().await.remove(token)?;
        (entry.expires_at > Utc::now()).then_some(entry.email)
    }

    #[cfg(test)]
    async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    #[cfg(test)]
    async fn reset_token_count(&self) -> usize {
        self.reset_tokens.read().await.len()
    }
}
