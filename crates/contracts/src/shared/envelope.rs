//! Конверт ответа API: `{ success, error, message?, data }`

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Сообщение по умолчанию для логического отказа без текста
pub const DEFAULT_FAILURE_MESSAGE: &str = "API request failed";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            error: false,
            message: None,
            data: Some(data),
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    /// `success: false` или `error: true`
    #[error("{0}")]
    Rejected(String),
    #[error("unexpected response payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Текст ошибки из тела ответа (поле `message`), если он есть
pub fn failure_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Проверка логического отказа в конверте
pub fn check_envelope(body: &Value) -> Result<(), EnvelopeError> {
    let rejected = body.get("success").and_then(Value::as_bool) == Some(false)
        || body.get("error").and_then(Value::as_bool) == Some(true);
    if rejected {
        let message =
            failure_message(body).unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
        return Err(EnvelopeError::Rejected(message));
    }
    Ok(())
}

/// Извлечение полезной нагрузки: `data`, а при её отсутствии — всё тело
pub fn unwrap_payload<T: DeserializeOwned>(body: Value) -> Result<T, EnvelopeError> {
    check_envelope(&body)?;
    let payload = match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) if !data.is_null() => data,
            Some(_) | None => Value::Object(map),
        },
        other => other,
    };
    Ok(serde_json::from_value(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_data() {
        let body = json!({"success": true, "error": false, "data": [1, 2, 3]});
        let data: Vec<u32> = unwrap_payload(body).unwrap();
        assert_eq!(data, vec![1, 2, 3]);
    }

    #[test]
    fn test_fallback_to_whole_payload() {
        #[derive(Deserialize)]
        struct Verify {
            valid: bool,
            email: Option<String>,
        }
        let body = json!({"success": true, "valid": true, "email": "admin@techzone.com"});
        let v: Verify = unwrap_payload(body).unwrap();
        assert!(v.valid);
        assert_eq!(v.email.as_deref(), Some("admin@techzone.com"));
    }

    #[test]
    fn test_plain_array_without_envelope() {
        let data: Vec<String> = unwrap_payload(json!(["a", "b"])).unwrap();
        assert_eq!(data, vec!["a", "b"]);
    }

    #[test]
    fn test_rejections() {
        let err = unwrap_payload::<Value>(json!({"success": false, "message": "Order not found"}))
            .unwrap_err();
        assert_eq!(err.to_string(), "Order not found");

        let err = unwrap_payload::<Value>(json!({"error": true})).unwrap_err();
        assert_eq!(err.to_string(), DEFAULT_FAILURE_MESSAGE);
    }

    #[test]
    fn test_failure_envelope_shape() {
        let value = serde_json::to_value(ApiEnvelope::<()>::failure("bad")).unwrap();
        assert_eq!(
            value,
            json!({"success": false, "error": true, "message": "bad", "data": null})
        );
    }
}
