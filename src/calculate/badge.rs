//! League tiers and clan badge keys.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

/// Badge key for clans without a badge.
pub const NO_CLAN: &str = "no_clan";

const EMBEDDED_BADGES: &str = include_str!("../../assets/badges.json");

/// War trophy league, named the way badge assets are keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum League {
    Legendary3,
    Legendary2,
    Legendary1,
    Gold3,
    Gold2,
    Gold1,
    Silver3,
    Silver2,
    Silver1,
    Bronze3,
    Bronze2,
    Bronze1,
}

/// Minimum trophies per league, highest first. Anything below is Bronze1.
const LEAGUE_THRESHOLDS: [(i64, League); 11] = [
    (5000, League::Legendary3),
    (4000, League::Legendary2),
    (3000, League::Legendary1),
    (2500, League::Gold3),
    (2000, League::Gold2),
    (1500, League::Gold1),
    (1200, League::Silver3),
    (900, League::Silver2),
    (600, League::Silver1),
    (400, League::Bronze3),
    (200, League::Bronze2),
];

impl League {
    /// League for a war trophy count.
    pub fn from_trophies(trophy_count: i64) -> Self {
        LEAGUE_THRESHOLDS
            .iter()
            .find(|(min, _)| trophy_count >= *min)
            .map(|(_, league)| *league)
            .unwrap_or(League::Bronze1)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            League::Legendary3 => "legendary-3",
            League::Legendary2 => "legendary-2",
            League::Legendary1 => "legendary-1",
            League::Gold3 => "gold-3",
            League::Gold2 => "gold-2",
            League::Gold1 => "gold-1",
            League::Silver3 => "silver-3",
            League::Silver2 => "silver-2",
            League::Silver1 => "silver-1",
            League::Bronze3 => "bronze-3",
            League::Bronze2 => "bronze-2",
            League::Bronze1 => "bronze-1",
        }
    }
}

impl std::fmt::Display for League {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// League for a war trophy count.
pub fn league(trophy_count: i64) -> League {
    League::from_trophies(trophy_count)
}

#[derive(Debug, Error)]
pub enum BadgeTableError {
    #[error("Failed to read badge table: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse badge table: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct BadgeRecord {
    id: i64,
    name: String,
}

/// Static badge id to badge name table.
#[derive(Debug, Clone, Default)]
pub struct BadgeTable {
    names: HashMap<i64, String>,
}

impl BadgeTable {
    /// Parse a table from `[{"id": .., "name": ..}]` JSON.
    pub fn from_json(json: &str) -> Result<Self, BadgeTableError> {
        let records: Vec<BadgeRecord> = serde_json::from_str(json)?;
        let names = records.into_iter().map(|r| (r.id, r.name)).collect();
        Ok(Self { names })
    }

    /// Load a table from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, BadgeTableError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// The table bundled with the binary.
    pub fn embedded() -> Self {
        Self::from_json(EMBEDDED_BADGES).unwrap_or_else(|e| {
            warn!("Embedded badge table unusable, all badges resolve to {}: {}", NO_CLAN, e);
            Self::default()
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Badge name registered for an id.
    pub fn name(&self, badge_id: i64) -> Option<&str> {
        self.names.get(&badge_id).map(String::as_str)
    }

    /// Composite badge key `<badgeName>_<league>`, or [`NO_CLAN`].
    ///
    /// Ids of `-1` and `0` mean "no badge".
    pub fn badge(&self, badge_id: i64, trophy_count: i64) -> String {
        if badge_id == -1 || badge_id == 0 {
            return NO_CLAN.to_string();
        }

        match self.name(badge_id) {
            Some(name) => format!("{}_{}", name, league(trophy_count)),
            None => NO_CLAN.to_string(),
        }
    }
}
