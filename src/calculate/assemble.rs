//! Assemble the client race view from a raw snapshot.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::aggregate::aggregate;
use super::badge::BadgeTable;
use super::projection::{fame_average, projected_fame, ProjectionInput};
use super::ranking::{rank, Standing};
use crate::models::{RaceClanView, RaceSnapshot, RaceView};

/// Build the ranked, projected and display-ordered view of a race.
///
/// Pure over its inputs: the snapshot is only read, and calling this twice
/// on the same snapshot yields the same view.
pub fn assemble(snapshot: &RaceSnapshot, badges: &BadgeTable) -> RaceView {
    let period = snapshot.period_type;
    let day_index = snapshot.day_index();
    let is_colosseum = period.is_colosseum();

    let mut clans: Vec<RaceClanView> = snapshot
        .clans
        .iter()
        .map(|clan| {
            let score = period.score(clan);
            let totals = aggregate(&clan.participants);
            let input = ProjectionInput {
                score,
                totals,
                day_index,
                is_colosseum,
            };

            RaceClanView {
                tag: clan.tag.clone(),
                name: clan.name.clone(),
                badge: badges.badge(clan.badge_id, clan.clan_score),
                badge_id: clan.badge_id,
                clan_score: clan.clan_score,
                boat_points: score.boat_points,
                fame: score.fame,
                repair_points: clan.repair_points,
                fame_avg: fame_average(&input),
                proj_fame: projected_fame(&input),
                decks_used: totals.decks_used,
                slots_used: totals.slots_used,
                crossed_finish_line: input.crossed_finish_line(),
                current_place: None,
                proj_place: None,
                participants: clan.participants.clone(),
            }
        })
        .collect();

    let current = places(rank(&clans, |c| c.tag.as_str(), |c| c.fame));
    let projected = places(rank(&clans, |c| c.tag.as_str(), |c| c.proj_fame));
    for clan in &mut clans {
        clan.current_place = current.get(&clan.tag).copied();
        clan.proj_place = projected.get(&clan.tag).copied();
    }

    clans.sort_by(display_order);

    let clan_index = clans
        .iter()
        .position(|c| c.tag == snapshot.clan.tag)
        .map(|i| i as u32);

    RaceView {
        clan_index,
        clans,
        day_index,
        is_colosseum,
        is_training: period.is_training(),
        period_index: snapshot.period_index,
        period_type: period,
        section_index: snapshot.section_index,
        state: snapshot.state.clone(),
    }
}

fn places(standings: Vec<Standing>) -> HashMap<String, u32> {
    standings.into_iter().map(|s| (s.tag, s.place)).collect()
}

/// Finished clans first, then by current place; unplaced clans last.
///
/// Used with a stable sort, so unplaced clans keep their upstream order.
fn display_order(a: &RaceClanView, b: &RaceClanView) -> Ordering {
    b.crossed_finish_line
        .cmp(&a.crossed_finish_line)
        .then_with(|| match (a.current_place, b.current_place) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClanRaceEntry, Participant, PeriodType};
    use pretty_assertions::assert_eq;

    fn roster(decks: &[u32]) -> Vec<Participant> {
        decks
            .iter()
            .enumerate()
            .map(|(i, d)| Participant::new(format!("#P{}", i), "member").with_decks_used_today(*d))
            .collect()
    }

    fn war_clan(tag: &str, fame: u32, boat_points: u32, decks: &[u32]) -> ClanRaceEntry {
        ClanRaceEntry::new(tag, format!("Clan {}", tag))
            .with_fame(fame)
            .with_period_points(boat_points)
            .with_participants(roster(decks))
    }

    fn badges() -> BadgeTable {
        BadgeTable::from_json(r#"[{"id": 16000000, "name": "Flame_01"}]"#).unwrap()
    }

    /// Five clans on day 4 of a war week; `#EEE` has already finished.
    fn war_day_snapshot() -> RaceSnapshot {
        let clans = vec![
            war_clan("#AAA", 6000, 4000, &[4, 4, 2, 2, 1]),
            war_clan("#BBB", 9000, 6000, &[4, 4, 4, 4, 2]),
            war_clan("#CCC", 0, 1000, &[]),
            war_clan("#DDD", 6000, 5000, &[4, 2]),
            war_clan("#EEE", 3000, 10_500, &[2]).with_badge(16000000, 3100),
        ];
        RaceSnapshot::new(PeriodType::WarDay, 11, clans[0].clone(), clans)
    }

    fn tags(view: &RaceView) -> Vec<&str> {
        view.clans.iter().map(|c| c.tag.as_str()).collect()
    }

    #[test]
    fn test_summary_fields() {
        let view = assemble(&war_day_snapshot(), &badges());

        assert_eq!(view.day_index, 4);
        assert!(!view.is_colosseum);
        assert!(!view.is_training);
        assert_eq!(view.period_type, PeriodType::WarDay);
        assert_eq!(view.period_index, 11);
    }

    #[test]
    fn test_finished_clan_sorts_first() {
        let view = assemble(&war_day_snapshot(), &badges());

        assert_eq!(tags(&view), vec!["#EEE", "#BBB", "#AAA", "#DDD", "#CCC"]);

        let finished = &view.clans[0];
        assert!(finished.crossed_finish_line);
        assert_eq!(finished.boat_points, 10_500);
        assert_eq!(finished.current_place, Some(4));
        assert_eq!(finished.fame_avg, 0.0);
        assert_eq!(finished.proj_fame, 0);
        assert_eq!(finished.proj_place, None);
        assert_eq!(finished.badge, "Flame_01_legendary-1");
    }

    #[test]
    fn test_current_places_share_ties() {
        let view = assemble(&war_day_snapshot(), &badges());
        let place = |tag: &str| view.clans.iter().find(|c| c.tag == tag).unwrap().current_place;

        assert_eq!(place("#BBB"), Some(1));
        assert_eq!(place("#AAA"), Some(2));
        assert_eq!(place("#DDD"), Some(2));
        assert_eq!(place("#EEE"), Some(4));
        assert_eq!(place("#CCC"), None);
    }

    #[test]
    fn test_clan_derivations() {
        let view = assemble(&war_day_snapshot(), &badges());
        let alpha = view.clans.iter().find(|c| c.tag == "#AAA").unwrap();

        assert_eq!(alpha.decks_used, 13);
        assert_eq!(alpha.slots_used, 5);
        assert_eq!(alpha.fame, 6000);
        assert_eq!(alpha.boat_points, 4000);
        assert!(alpha.fame_avg > 461.0 && alpha.fame_avg < 462.0);
        assert!(alpha.proj_fame >= alpha.fame);
        assert_eq!(alpha.badge, "no_clan");
        assert_eq!(alpha.participants.len(), 5);
    }

    #[test]
    fn test_clan_without_decks_is_unprojected() {
        let mut snapshot = war_day_snapshot();
        snapshot.clans[2] = war_clan("#CCC", 1500, 1000, &[0, 0]);

        let view = assemble(&snapshot, &badges());
        let idle = view.clans.iter().find(|c| c.tag == "#CCC").unwrap();

        assert_eq!(idle.fame, 1500);
        assert_eq!(idle.fame_avg, 0.0);
        assert_eq!(idle.proj_fame, 0);
        assert_eq!(idle.proj_place, None);
        assert_eq!(idle.current_place, Some(5));
    }

    #[test]
    fn test_clan_index_follows_display_order() {
        let mut snapshot = war_day_snapshot();
        snapshot.clan = snapshot.clans[3].clone();

        let view = assemble(&snapshot, &badges());
        assert_eq!(view.clan_index, Some(3));
        assert_eq!(view.clans[3].tag, "#DDD");
    }

    #[test]
    fn test_clan_index_missing() {
        let mut snapshot = war_day_snapshot();
        snapshot.clan = ClanRaceEntry::new("#ZZZ", "Elsewhere");

        assert_eq!(assemble(&snapshot, &badges()).clan_index, None);
    }

    #[test]
    fn test_unplaced_clans_keep_input_order() {
        let clans = vec![
            war_clan("#AAA", 0, 0, &[]),
            war_clan("#BBB", 500, 0, &[1]),
            war_clan("#CCC", 0, 0, &[]),
            war_clan("#DDD", 0, 0, &[]),
        ];
        let snapshot = RaceSnapshot::new(PeriodType::WarDay, 3, clans[0].clone(), clans);

        let view = assemble(&snapshot, &badges());
        assert_eq!(tags(&view), vec!["#BBB", "#AAA", "#CCC", "#DDD"]);
        assert_eq!(view.clan_index, Some(1));
    }

    #[test]
    fn test_training_day_has_no_projection() {
        let mut snapshot = war_day_snapshot();
        snapshot.period_type = PeriodType::Training;
        snapshot.period_index = 1;

        let view = assemble(&snapshot, &badges());
        assert!(view.is_training);
        assert_eq!(view.day_index, 1);
        assert!(view.clans.iter().all(|c| c.proj_fame == 0 && c.fame_avg == 0.0));
        assert!(view.clans.iter().all(|c| c.proj_place.is_none()));
    }

    #[test]
    fn test_colosseum_reads_swapped_fields() {
        let clans = vec![
            ClanRaceEntry::new("#AAA", "Alpha")
                .with_fame(2500)
                .with_period_points(35_000)
                .with_participants(roster(&[2; 50])),
            ClanRaceEntry::new("#BBB", "Bravo")
                .with_fame(1200)
                .with_period_points(20_000)
                .with_participants(roster(&[2; 10])),
        ];
        let snapshot = RaceSnapshot::new(PeriodType::Colosseum, 4, clans[1].clone(), clans);

        let view = assemble(&snapshot, &badges());
        assert!(view.is_colosseum);
        assert_eq!(tags(&view), vec!["#AAA", "#BBB"]);
        assert_eq!(view.clan_index, Some(1));

        let alpha = &view.clans[0];
        assert_eq!(alpha.fame, 35_000);
        assert_eq!(alpha.boat_points, 2500);
        assert_eq!(alpha.decks_used, 100);
        // 35000 fame over 100 decks today plus one full day behind.
        assert!((alpha.fame_avg - 35_000.0 / 300.0).abs() < 1e-9);
        assert_eq!(alpha.proj_fame, 90_000);
        assert_eq!(alpha.proj_place, Some(1));
    }

    #[test]
    fn test_assemble_is_idempotent_and_read_only() {
        let snapshot = war_day_snapshot();
        let before = snapshot.clone();

        let first = assemble(&snapshot, &badges());
        let second = assemble(&snapshot, &badges());

        assert_eq!(first, second);
        assert_eq!(snapshot, before);
    }
}
