//! Current river race snapshot, as served by the game API.

use serde::{Deserialize, Serialize};

/// Phase of the river race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PeriodType {
    WarDay,
    Training,
    Colosseum,
}

impl PeriodType {
    pub fn is_colosseum(self) -> bool {
        matches!(self, PeriodType::Colosseum)
    }

    pub fn is_training(self) -> bool {
        matches!(self, PeriodType::Training)
    }

    /// Read a clan's fame and boat points according to the phase.
    ///
    /// The upstream `fame` and `periodPoints` fields swap meaning in the
    /// colosseum: there `fame` carries boat points and `periodPoints` carries
    /// fame. Every other phase reports them the other way round.
    pub fn score(self, clan: &ClanRaceEntry) -> RaceScore {
        match self {
            PeriodType::Colosseum => RaceScore {
                fame: clan.period_points,
                boat_points: clan.fame,
            },
            PeriodType::WarDay | PeriodType::Training => RaceScore {
                fame: clan.fame,
                boat_points: clan.period_points,
            },
        }
    }
}

impl std::fmt::Display for PeriodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PeriodType::WarDay => write!(f, "warDay"),
            PeriodType::Training => write!(f, "training"),
            PeriodType::Colosseum => write!(f, "colosseum"),
        }
    }
}

/// Normalized scoring pair for one clan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RaceScore {
    pub fame: u32,
    pub boat_points: u32,
}

/// One member's participation in the current race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub tag: String,
    pub name: String,
    #[serde(default)]
    pub fame: u32,
    #[serde(default)]
    pub repair_points: u32,
    #[serde(default)]
    pub boat_attacks: u32,
    #[serde(default)]
    pub decks_used: u32,
    /// Decks played today, 0 to 4.
    #[serde(default)]
    pub decks_used_today: u32,
}

impl Participant {
    pub fn new(tag: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            name: name.into(),
            fame: 0,
            repair_points: 0,
            boat_attacks: 0,
            decks_used: 0,
            decks_used_today: 0,
        }
    }

    /// Builder method to set today's deck count.
    pub fn with_decks_used_today(mut self, decks: u32) -> Self {
        self.decks_used_today = decks;
        self.decks_used = self.decks_used.max(decks);
        self
    }

}

fn no_badge() -> i64 {
    -1
}

/// A clan participating in the race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClanRaceEntry {
    pub tag: String,
    pub name: String,
    /// -1 when the clan has no badge.
    #[serde(default = "no_badge")]
    pub badge_id: i64,
    /// War trophies, used for the league part of the badge.
    #[serde(default)]
    pub clan_score: i64,
    /// Raw first score field; see [`PeriodType::score`].
    #[serde(default)]
    pub fame: u32,
    /// Raw second score field; see [`PeriodType::score`].
    #[serde(default)]
    pub period_points: u32,
    #[serde(default)]
    pub repair_points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_time: Option<String>,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

impl ClanRaceEntry {
    pub fn new(tag: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            name: name.into(),
            badge_id: no_badge(),
            clan_score: 0,
            fame: 0,
            period_points: 0,
            repair_points: 0,
            finish_time: None,
            participants: Vec::new(),
        }
    }

    /// Builder method to set the badge and war trophies.
    pub fn with_badge(mut self, badge_id: i64, clan_score: i64) -> Self {
        self.badge_id = badge_id;
        self.clan_score = clan_score;
        self
    }

    /// Builder method to set the raw `fame` field.
    pub fn with_fame(mut self, fame: u32) -> Self {
        self.fame = fame;
        self
    }

    /// Builder method to set the raw `periodPoints` field.
    pub fn with_period_points(mut self, points: u32) -> Self {
        self.period_points = points;
        self
    }

    /// Builder method to set participants.
    pub fn with_participants(mut self, participants: Vec<Participant>) -> Self {
        self.participants = participants;
        self
    }
}

/// The current river race for one clan's group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceSnapshot {
    #[serde(default)]
    pub state: String,
    /// The requesting clan's own entry.
    pub clan: ClanRaceEntry,
    /// Every clan in the group, in upstream order.
    pub clans: Vec<ClanRaceEntry>,
    #[serde(default)]
    pub section_index: u32,
    /// Days elapsed since the race started.
    pub period_index: u32,
    pub period_type: PeriodType,
}

impl RaceSnapshot {
    pub fn new(
        period_type: PeriodType,
        period_index: u32,
        clan: ClanRaceEntry,
        clans: Vec<ClanRaceEntry>,
    ) -> Self {
        Self {
            state: "full".to_string(),
            clan,
            clans,
            section_index: 0,
            period_index,
            period_type,
        }
    }

    /// Day of the week within the current race, 0 to 6.
    pub fn day_index(&self) -> u32 {
        self.period_index % 7
    }
}
