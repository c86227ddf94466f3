//! Clan profile and race log passthrough models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Participant;

/// A clan member listed on the clan profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClanMember {
    pub tag: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub trophies: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Clan profile from the game API.
///
/// Only the fields this service reads are typed; everything else is kept
/// verbatim in `extra` and forwarded to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClanProfile {
    pub tag: String,
    pub name: String,
    #[serde(default = "no_badge")]
    pub badge_id: i64,
    #[serde(default)]
    pub clan_war_trophies: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_list: Option<Vec<ClanMember>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn no_badge() -> i64 {
    -1
}

impl ClanProfile {
    /// Drop the member list, the only large part of the profile.
    pub fn without_members(mut self) -> Self {
        self.member_list = None;
        self
    }
}

/// Clan profile decorated with its resolved badge key.
#[derive(Debug, Clone, Serialize)]
pub struct ClanProfileView {
    pub badge: String,
    #[serde(flatten)]
    pub clan: ClanProfile,
}

/// A clan's final standing in a finished race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceLogClan {
    pub tag: String,
    pub name: String,
    #[serde(default = "no_badge")]
    pub badge_id: i64,
    #[serde(default)]
    pub clan_score: i64,
    #[serde(default)]
    pub fame: u32,
    #[serde(default)]
    pub period_points: u32,
    #[serde(default)]
    pub repair_points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_time: Option<String>,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceLogStanding {
    pub rank: u32,
    #[serde(default)]
    pub trophy_change: i32,
    pub clan: RaceLogClan,
}

/// One finished race in a clan's race log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceLogEntry {
    /// Upstream timestamp, e.g. `20240108T094523.000Z`.
    pub created_date: String,
    pub season_id: u32,
    pub section_index: u32,
    pub standings: Vec<RaceLogStanding>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLAN_JSON: &str = r##"{
        "tag": "#9U82JJ0Y",
        "name": "Alpha",
        "type": "inviteOnly",
        "badgeId": 16000002,
        "clanScore": 52000,
        "clanWarTrophies": 3400,
        "members": 1,
        "location": {"id": 57000000, "name": "Europe", "isCountry": false},
        "memberList": [
            {"tag": "#P1", "name": "one", "role": "leader", "trophies": 7500,
             "expLevel": 54, "donations": 120}
        ]
    }"##;

    #[test]
    fn test_profile_keeps_untyped_fields() {
        let clan: ClanProfile = serde_json::from_str(CLAN_JSON).unwrap();
        assert_eq!(clan.clan_war_trophies, 3400);
        assert_eq!(clan.member_list.as_ref().unwrap()[0].role, "leader");

        let json = serde_json::to_value(&clan).unwrap();
        assert_eq!(json["type"], "inviteOnly");
        assert_eq!(json["location"]["name"], "Europe");
        assert_eq!(json["memberList"][0]["expLevel"], 54);
    }

    #[test]
    fn test_without_members() {
        let clan: ClanProfile = serde_json::from_str(CLAN_JSON).unwrap();
        let json = serde_json::to_value(clan.without_members()).unwrap();

        assert!(json.get("memberList").is_none());
        assert_eq!(json["members"], 1);
    }

    #[test]
    fn test_profile_view_flattens() {
        let clan: ClanProfile = serde_json::from_str(CLAN_JSON).unwrap();
        let view = ClanProfileView {
            badge: "Flame_02_legendary-1".to_string(),
            clan,
        };
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["badge"], "Flame_02_legendary-1");
        assert_eq!(json["tag"], "#9U82JJ0Y");
    }

    #[test]
    fn test_race_log_deserialization() {
        let log: Vec<RaceLogEntry> = serde_json::from_str(
            r##"[{"seasonId": 120, "sectionIndex": 2, "createdDate": "20240108T094523.000Z",
                 "standings": [{"rank": 1, "trophyChange": 20,
                                "clan": {"tag": "#AAA", "name": "Alpha", "badgeId": 16000000,
                                         "fame": 10000, "repairPoints": 0,
                                         "finishTime": "20240107T101500.000Z",
                                         "periodPoints": 0, "clanScore": 3420,
                                         "participants": []}}]}]"##,
        )
        .unwrap();

        assert_eq!(log.len(), 1);
        assert_eq!(log[0].standings[0].rank, 1);
        assert_eq!(log[0].standings[0].clan.fame, 10000);
    }
}
