use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{AppendHeaders, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
struct LoginRequest {
    #[serde(default)]
    password: Option<String>,
}

/// Verifies the shared password; on success the session cookie is set.
/// A wrong password gets 401 and no cookie.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Response> {
    let password = body.password.unwrap_or_default();
    if !state.sessions.verify_password(&password) {
        return Ok((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "error": "Invalid password" })),
        )
            .into_response());
    }

    let token = state.sessions.issue()?;
    Ok((
        AppendHeaders([(SET_COOKIE, state.sessions.cookie(&token))]),
        Json(json!({ "success": true })),
    )
        .into_response())
}

/// Clears the session cookie.
async fn logout(State(state): State<Arc<AppState>>) -> Response {
    (
        AppendHeaders([(SET_COOKIE, state.sessions.clear_cookie())]),
        Json(json!({ "success": true })),
    )
        .into_response()
}

/// Reports whether the caller currently holds a valid session.
async fn status(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Json<serde_json::Value> {
    let authenticated = state.sessions.session_from_headers(&headers).is_some();
    Json(json!({ "authenticated": authenticated }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/status", get(status))
}
