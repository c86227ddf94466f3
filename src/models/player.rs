//! Player profile and battle log passthrough models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Profile sections dropped from the limited player view.
const HEAVY_PLAYER_FIELDS: [&str; 11] = [
    "badges",
    "achievements",
    "cards",
    "supportCards",
    "currentDeck",
    "currentDeckSupportCards",
    "currentFavouriteCard",
    "lastPathOfLegendSeasonResult",
    "bestPathOfLegendSeasonResult",
    "leagueStatistics",
    "progress",
];

/// Player profile from the game API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub tag: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlayerProfile {
    /// Drop card collections, achievements and other bulky sections.
    pub fn without_details(mut self) -> Self {
        for field in HEAVY_PLAYER_FIELDS {
            self.extra.remove(field);
        }
        self
    }
}

/// One entry of a player's battle log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Battle {
    /// Battle mode, e.g. `riverRacePvP` or `PvP`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Upstream timestamp, e.g. `20240108T094523.000Z`.
    pub battle_time: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
