//! Per-clan participation totals for the current day.

use crate::models::Participant;

/// Decks played today needed for a member to count as a completed duel.
const DUEL_DECKS: u32 = 2;

/// A clan's participation so far today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClanTotals {
    /// Decks played across all members.
    pub decks_used: u32,
    /// Members who played at least one deck.
    pub slots_used: u32,
    /// Members who played at least two decks. A duel is one member's
    /// 2-deck exchange, so a member on 3 or 4 decks still counts once.
    pub duels_completed: u32,
}

/// Fold a roster into today's totals.
///
/// Sums saturate, so malformed upstream counts cannot overflow.
pub fn aggregate(participants: &[Participant]) -> ClanTotals {
    participants
        .iter()
        .fold(ClanTotals::default(), |mut totals, p| {
            totals.decks_used = totals.decks_used.saturating_add(p.decks_used_today);
            if p.decks_used_today > 0 {
                totals.slots_used = totals.slots_used.saturating_add(1);
            }
            if p.decks_used_today >= DUEL_DECKS {
                totals.duels_completed = totals.duels_completed.saturating_add(1);
            }
            totals
        })
}
