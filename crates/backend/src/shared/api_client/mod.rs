//! HTTP-клиент админки: конверт `{success, error, message, data}`, cookie-сессия или Bearer

pub mod endpoints;

use contracts::shared::envelope::{
    failure_message, unwrap_payload, EnvelopeError, DEFAULT_FAILURE_MESSAGE,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::shared::config::{ApiConfig, AuthMode};

/// Ошибка обращения к API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("{0}")]
    Rejected(String),
    #[error("unexpected response payload: {0}")]
    Decode(String),
}

impl From<EnvelopeError> for ApiError {
    fn from(e: EnvelopeError) -> Self {
        match e {
            EnvelopeError::Rejected(message) => ApiError::Rejected(message),
            EnvelopeError::Decode(e) => ApiError::Decode(e.to_string()),
        }
    }
}

/// HTTP-клиент для TechZone API
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    mode: AuthMode,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, mode: AuthMode) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .cookie_store(mode == AuthMode::Session)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            mode,
            token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    /// Запрос к `{base_url}{endpoint}` с разбором конверта
    pub async fn request<T, B>(&self, method: Method, endpoint: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!("API {} {}", method, url);

        let mut builder = self
            .client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");
        if self.mode == AuthMode::Bearer {
            if let Some(token) = self.token.read().await.as_deref() {
                builder = builder.bearer_auth(token);
            }
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = error_message(status, &text);
            tracing::warn!("API {} {} failed with {}: {}", method, url, status, message);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let value: Value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))?
        };
        Ok(unwrap_payload(value)?)
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::GET, endpoint, None).await
    }

    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, endpoint, Some(body)).await
    }

    pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, endpoint, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request::<T, ()>(Method::DELETE, endpoint, None).await
    }
}

/// Сообщение об ошибке из тела non-2xx ответа: конверт, затем сырой текст, затем reason phrase
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = failure_message(&value) {
            return message;
        }
    }
    let text = body.trim();
    if !text.is_empty() {
        return text.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or(DEFAULT_FAILURE_MESSAGE)
        .to_string()
}
