use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::{error::ApiResult, main_lib::AppState};
use giftwise_core::board::{build_board, BoardView};
use giftwise_core::gifts::GiftQuery;

/// The grouped board: one lane per person plus the unassigned lane, with
/// per-person stats and global totals.
async fn get_board(State(state): State<Arc<AppState>>) -> ApiResult<Json<BoardView>> {
    let people = state.person_service.get_people()?;
    let gifts = state.gift_service.get_gifts(&GiftQuery::default())?;
    let gifts: Vec<_> = gifts.into_iter().map(|g| g.gift).collect();
    Ok(Json(build_board(&people, &gifts)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/board", get(get_board))
}
