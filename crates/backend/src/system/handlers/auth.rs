use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::envelope::ApiEnvelope;
use contracts::system::auth::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, ResetPasswordRequest, VerifyTokenResponse,
};
use serde::Deserialize;

use crate::shared::config::AuthMode;
use crate::shared::error::{ok, ok_with_message, ApiResult, ServiceError};
use crate::shared::state::AppState;
use crate::system::auth::{expired_session_cookie, session_cookie, session_token};

/// Login handler
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let Json(request) = payload?;
    request.validate().map_err(ServiceError::Validation)?;

    let (token, user) = state.sessions.open(&request.email).await;
    tracing::info!("Admin login: {}", user.email);

    let response = match state.config.auth.mode {
        AuthMode::Session => {
            let body = ApiEnvelope::ok_with_message(AuthResponse { token: None, user }, "Login successful");
            ([(header::SET_COOKIE, session_cookie(&token))], Json(body)).into_response()
        }
        AuthMode::Bearer => {
            let body = ApiEnvelope::ok_with_message(
                AuthResponse {
                    token: Some(token),
                    user,
                },
                "Login successful",
            );
            Json(body).into_response()
        }
    };
    Ok(response)
}

/// Logout handler
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        if state.sessions.close(&token).await {
            tracing::info!("Admin logout");
        }
    }
    let body = ApiEnvelope::ok_with_message((), "Logged out");
    ([(header::SET_COOKIE, expired_session_cookie())], Json(body)).into_response()
}

pub async fn forgot_password(
    State(state): State<AppState>,
    payload: Result<Json<ForgotPasswordRequest>, JsonRejection>,
) -> ApiResult<()> {
    let Json(request) = payload?;
    let email = request.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ServiceError::Validation("A valid email is required".into()));
    }

    let token = state.sessions.issue_reset_token(email).await;
    // Письмо не отправляется, ссылка только в логе
    tracing::info!("Password reset requested for {}", email);
    tracing::debug!("Reset token for {}: {}", email, token);

    ok_with_message((), "If the email exists, a reset link has been sent")
}

pub async fn reset_password(
    State(state): State<AppState>,
    payload: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> ApiResult<()> {
    let Json(request) = payload?;
    request.validate().map_err(ServiceError::Validation)?;

    let email = state
        .sessions
        .consume_reset_token(request.token.trim())
        .await
        .ok_or_else(|| ServiceError::Validation("Invalid or expired reset token".into()))?;
    tracing::info!("Password reset completed for {}", email);

    ok_with_message((), "Password has been reset")
}

#[derive(Debug, Deserialize)]
pub struct VerifyTokenQuery {
    pub token: Option<String>,
}

pub async fn verify_token(
    State(state): State<AppState>,
    Query(query): Query<VerifyTokenQuery>,
) -> ApiResult<VerifyTokenResponse> {
    let email = match query.token.as_deref().map(str::trim) {
        Some(token) if !token.is_empty() => state.sessions.verify_reset_token(token).await,
        _ => None,
    };
    ok(VerifyTokenResponse {
        valid: email.is_some(),
        email,
    })
}
