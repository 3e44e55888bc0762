use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::{error::ApiResult, main_lib::AppState, models::CreatePersonRequest};
use giftwise_core::board::PersonWithStats;
use giftwise_core::people::{Person, PersonUpdate, PersonWithGifts};

/// People with their derived stats; the authoritative computation.
async fn list_people(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<PersonWithStats>>> {
    let people = state.person_service.get_people_with_stats()?;
    Ok(Json(people))
}

async fn create_person(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreatePersonRequest>,
) -> ApiResult<(StatusCode, Json<Person>)> {
    let person = state.person_service.create_person(body.into()).await?;
    Ok((StatusCode::CREATED, Json(person)))
}

async fn get_person(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PersonWithGifts>> {
    let person = state.person_service.get_person(&id)?;
    Ok(Json(person))
}

async fn update_person(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<PersonUpdate>,
) -> ApiResult<Json<Person>> {
    let person = state.person_service.update_person(id, body).await?;
    Ok(Json(person))
}

/// Deletes the person and cascades to all of their gifts.
async fn delete_person(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<serde_json::Value>> {
    let _ = state.person_service.delete_person(id).await?;
    Ok(Json(json!({ "success": true })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/people", get(list_people).post(create_person))
        .route(
            "/people/{id}",
            get(get_person).put(update_person).delete(delete_person),
        )
}
