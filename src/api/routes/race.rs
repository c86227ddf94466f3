use axum::extract::{Path, State};
use axum::Json;
use tracing::{debug, instrument};

use crate::api::state::AppState;
use crate::api::{ApiError, DataResponse};
use crate::calculate::assemble;
use crate::models::{ClanTag, LimitedRaceView, RaceView};

async fn race_view(state: &AppState, tag: &str) -> Result<RaceView, ApiError> {
    let tag = ClanTag::parse(tag)?;
    let snapshot = state.game_api.river_race(&tag).await?;
    debug!(
        "Assembling {} race, period {}, {} clans",
        snapshot.period_type,
        snapshot.period_index,
        snapshot.clans.len()
    );

    Ok(assemble(&snapshot, &state.badges))
}

/// Assembled view of the clan's current race.
#[instrument(skip(state))]
pub async fn get_race(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<Json<DataResponse<RaceView>>, ApiError> {
    let view = race_view(&state, &tag).await?;
    Ok(DataResponse::new(view))
}

/// Race view without participant lists.
#[instrument(skip(state))]
pub async fn get_race_limited(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<Json<DataResponse<LimitedRaceView>>, ApiError> {
    let view = race_view(&state, &tag).await?;
    Ok(DataResponse::new(LimitedRaceView::from(view)))
}
