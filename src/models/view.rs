//! Assembled race views returned to clients.

use serde::{Serialize, Serializer};

use super::{Participant, PeriodType};

/// Serialize an optional position as its value, or `-1` when absent.
fn position_or_unset<S>(value: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) => serializer.serialize_i64(i64::from(*v)),
        None => serializer.serialize_i64(-1),
    }
}

/// One clan's derived race standing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceClanView {
    pub tag: String,
    pub name: String,
    pub badge: String,
    pub badge_id: i64,
    pub clan_score: i64,
    pub boat_points: u32,
    pub fame: u32,
    pub repair_points: u32,
    /// Fame per deck played so far.
    pub fame_avg: f64,
    /// Projected end-of-race fame.
    pub proj_fame: u32,
    pub decks_used: u32,
    pub slots_used: u32,
    pub crossed_finish_line: bool,
    /// Placement by current fame; `None` when unranked.
    #[serde(serialize_with = "position_or_unset")]
    pub current_place: Option<u32>,
    /// Placement by projected fame; `None` when unranked.
    #[serde(serialize_with = "position_or_unset")]
    pub proj_place: Option<u32>,
    pub participants: Vec<Participant>,
}

/// The full race view for `GET /clan/{tag}/race`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceView {
    /// Index of the requesting clan in `clans`.
    #[serde(serialize_with = "position_or_unset")]
    pub clan_index: Option<u32>,
    pub clans: Vec<RaceClanView>,
    pub day_index: u32,
    pub is_colosseum: bool,
    pub is_training: bool,
    pub period_index: u32,
    pub period_type: PeriodType,
    pub section_index: u32,
    pub state: String,
}

/// A clan standing without its participant list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitedRaceClanView {
    pub tag: String,
    pub name: String,
    pub badge: String,
    pub badge_id: i64,
    pub clan_score: i64,
    pub boat_points: u32,
    pub fame: u32,
    pub repair_points: u32,
    pub fame_avg: f64,
    pub proj_fame: u32,
    pub decks_used: u32,
    pub slots_used: u32,
    pub crossed_finish_line: bool,
    #[serde(serialize_with = "position_or_unset")]
    pub current_place: Option<u32>,
    #[serde(serialize_with = "position_or_unset")]
    pub proj_place: Option<u32>,
}

impl From<RaceClanView> for LimitedRaceClanView {
    fn from(clan: RaceClanView) -> Self {
        Self {
            tag: clan.tag,
            name: clan.name,
            badge: clan.badge,
            badge_id: clan.badge_id,
            clan_score: clan.clan_score,
            boat_points: clan.boat_points,
            fame: clan.fame,
            repair_points: clan.repair_points,
            fame_avg: clan.fame_avg,
            proj_fame: clan.proj_fame,
            decks_used: clan.decks_used,
            slots_used: clan.slots_used,
            crossed_finish_line: clan.crossed_finish_line,
            current_place: clan.current_place,
            proj_place: clan.proj_place,
        }
    }
}

/// Reduced race view for `GET /clan/{tag}/race/limited`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitedRaceView {
    #[serde(serialize_with = "position_or_unset")]
    pub clan_index: Option<u32>,
    pub clans: Vec<LimitedRaceClanView>,
    pub day_index: u32,
    pub is_colosseum: bool,
    pub is_training: bool,
    pub period_index: u32,
    pub period_type: PeriodType,
    pub section_index: u32,
    pub state: String,
}

impl From<RaceView> for LimitedRaceView {
    fn from(view: RaceView) -> Self {
        Self {
            clan_index: view.clan_index,
            clans: view.clans.into_iter().map(Into::into).collect(),
            day_index: view.day_index,
            is_colosseum: view.is_colosseum,
            is_training: view.is_training,
            period_index: view.period_index,
            period_type: view.period_type,
            section_index: view.section_index,
            state: view.state,
        }
    }
}
