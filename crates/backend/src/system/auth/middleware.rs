use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::envelope::ApiEnvelope;

use super::session_token;
use crate::shared::state::AppState;

/// Пропускает запрос только с действующей сессией, если включено `auth.require_login`
///
/// Маршруты `/api/auth/*` и `/health` открыты всегда.
pub async fn require_session(State(state): State<AppState>, mut req: Request<Body>, next: Next) -> Response {
    let path = req.uri().path();
    if !state.config.auth.require_login || path.starts_with("/api/auth/") || path == "/health" {
        return next.run(req).await;
    }

    let user = match session_token(req.headers()) {
        Some(token) => state.sessions.user(&token).await,
        None => None,
    };

    match user {
        Some(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        None => {
            tracing::warn!("Unauthorized request to {}", req.uri().path());
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiEnvelope::<()>::failure("Authentication required")),
            )
                .into_response()
        }
    }
}
