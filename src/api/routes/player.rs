use axum::extract::{Path, State};
use axum::Json;
use tracing::instrument;

use crate::api::state::AppState;
use crate::api::{ApiError, DataResponse};
use crate::models::{Battle, PlayerProfile, PlayerTag};

#[instrument(skip(state))]
pub async fn get_player(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<Json<DataResponse<PlayerProfile>>, ApiError> {
    let tag = PlayerTag::parse(&tag)?;
    let player = state.game_api.player(&tag).await?;

    Ok(DataResponse::new(player))
}

/// Player profile without cards, badges and season history.
#[instrument(skip(state))]
pub async fn get_player_limited(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<Json<DataResponse<PlayerProfile>>, ApiError> {
    let tag = PlayerTag::parse(&tag)?;
    let player = state.game_api.player(&tag).await?;

    Ok(DataResponse::new(player.without_details()))
}

#[instrument(skip(state))]
pub async fn get_battle_log(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<Json<DataResponse<Vec<Battle>>>, ApiError> {
    let tag = PlayerTag::parse(&tag)?;
    let battles = state.game_api.battle_log(&tag).await?;

    Ok(DataResponse::new(battles))
}
