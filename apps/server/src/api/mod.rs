//! HTTP API: one router per resource, composed under `/api/v1`, with the
//! session gate layered in front of everything including the static
//! fallback.

pub mod auth;
pub mod board;
pub mod gifts;
pub mod health;
pub mod people;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{middleware, Router};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::main_lib::AppState;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let api = Router::new()
        .merge(people::router())
        .merge(gifts::router())
        .merge(board::router())
        .merge(auth::router())
        .merge(health::router());

    let static_dir = PathBuf::from(&config.static_dir);
    let index_file = static_dir.join("index.html");
    let static_service = ServeDir::new(static_dir).fallback(ServeFile::new(index_file));

    Router::new()
        .nest("/api/v1", api)
        .fallback_service(static_service)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_session,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
