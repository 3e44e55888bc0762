use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{CreateGiftRequest, ListGiftsParams, UpdateGiftRequest},
};
use giftwise_core::gifts::GiftWithPerson;

async fn list_gifts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListGiftsParams>,
) -> ApiResult<Json<Vec<GiftWithPerson>>> {
    let query = params.into_query()?;
    let gifts = state.gift_service.get_gifts(&query)?;
    Ok(Json(gifts))
}

async fn create_gift(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateGiftRequest>,
) -> ApiResult<(StatusCode, Json<GiftWithPerson>)> {
    let gift = state.gift_service.create_gift(body.into_new_gift()?).await?;
    Ok((StatusCode::CREATED, Json(gift)))
}

async fn get_gift(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<GiftWithPerson>> {
    let gift = state.gift_service.get_gift(&id)?;
    Ok(Json(gift))
}

/// Merge-patch update. A body carrying only `personId` is the
/// drag-and-drop reassignment.
async fn update_gift(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<UpdateGiftRequest>,
) -> ApiResult<Json<GiftWithPerson>> {
    let gift = state
        .gift_service
        .update_gift(id, body.into_update()?)
        .await?;
    Ok(Json(gift))
}

async fn delete_gift(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<serde_json::Value>> {
    let _ = state.gift_service.delete_gift(id).await?;
    Ok(Json(json!({ "success": true })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/gifts", get(list_gifts).post(create_gift))
        .route(
            "/gifts/{id}",
            get(get_gift).put(update_gift).delete(delete_gift),
        )
}
