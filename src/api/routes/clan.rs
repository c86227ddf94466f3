use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::instrument;

use crate::api::state::AppState;
use crate::api::{ApiError, DataResponse};
use crate::models::{ClanProfile, ClanProfileView, ClanTag, RaceLogEntry};

/// Clan profile with its resolved badge key.
#[instrument(skip(state))]
pub async fn get_clan(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<Json<DataResponse<ClanProfileView>>, ApiError> {
    let tag = ClanTag::parse(&tag)?;
    let clan = state.game_api.clan(&tag).await?;
    let badge = state.badges.badge(clan.badge_id, clan.clan_war_trophies);

    Ok(DataResponse::new(ClanProfileView { badge, clan }))
}

/// Clan profile without the member list.
#[instrument(skip(state))]
pub async fn get_clan_limited(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<Json<DataResponse<ClanProfile>>, ApiError> {
    let tag = ClanTag::parse(&tag)?;
    let clan = state.game_api.clan(&tag).await?;

    Ok(DataResponse::new(clan.without_members()))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
}

/// Clans matching a name.
#[instrument(skip(state))]
pub async fn search_clans(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<DataResponse<Vec<ClanProfile>>>, ApiError> {
    let name = params
        .name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Field \"name\" - name cannot be empty".to_string()))?;
    let clans = state.game_api.search_clans(&name).await?;

    Ok(DataResponse::new(clans))
}

/// Finished races, newest first.
#[instrument(skip(state))]
pub async fn get_race_log(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<Json<DataResponse<Vec<RaceLogEntry>>>, ApiError> {
    let tag = ClanTag::parse(&tag)?;
    let log = state.game_api.race_log(&tag).await?;

    Ok(DataResponse::new(log))
}
