//! Fame averages and end-of-race fame projections.
//!
//! Days 0-2 of every race week are unscored training days, so every
//! figure here is zero before day 3. The colosseum runs all four scored
//! days as one long race and carries earlier days forward at full daily
//! capacity; other phases project the current day alone.

use super::aggregate::ClanTotals;
use crate::models::RaceScore;

/// Boat points needed to finish the race.
pub const FINISH_LINE: u32 = 10_000;

/// First day of the week that counts towards the race.
pub const FIRST_SCORED_DAY: u32 = 3;

/// Last day of the race week.
pub const LAST_DAY: u32 = 6;

/// Fame for a completed duel.
pub const DUEL_FAME: i64 = 500;

/// Fame for a deck played outside a duel.
pub const DECK_FAME: i64 = 200;

/// Decks a full clan can play in one day (50 members x 4).
pub const DAILY_DECKS: i64 = 200;

/// Duels a full clan can complete in one day.
pub const DAILY_DUELS: i64 = 50;

/// Fame a clan can earn in one day at perfect efficiency.
pub const DAILY_MAX_FAME: i64 = 45_000;

/// Projection cap outside the colosseum.
pub const MAX_PROJECTED_FAME: u32 = 45_000;

/// Projection cap in the colosseum.
pub const MAX_COLOSSEUM_PROJECTED_FAME: u32 = 180_000;

/// Everything a projection needs for one clan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionInput {
    pub score: RaceScore,
    pub totals: ClanTotals,
    pub day_index: u32,
    pub is_colosseum: bool,
}

impl ProjectionInput {
    pub fn crossed_finish_line(&self) -> bool {
        self.score.boat_points >= FINISH_LINE
    }

    /// Whether the clan has nothing to project yet (or any more).
    fn is_unscored(&self) -> bool {
        if self.day_index < FIRST_SCORED_DAY || self.crossed_finish_line() {
            return true;
        }
        if self.totals.decks_used > 0 {
            return false;
        }
        // Later colosseum days still have earlier days' decks behind them.
        !self.is_colosseum || self.day_index == FIRST_SCORED_DAY
    }

    /// Scored days already completed before today.
    fn days_behind(&self) -> i64 {
        i64::from(self.day_index.saturating_sub(FIRST_SCORED_DAY))
    }

    /// Scored days still to come after today.
    fn days_ahead(&self) -> i64 {
        i64::from(LAST_DAY.saturating_sub(self.day_index))
    }
}

/// Fame value of a duel and deck count at perfect efficiency.
fn fame_value(duels: i64, decks: i64) -> i64 {
    duels * DUEL_FAME + (decks - duels * 2) * DECK_FAME
}

/// Fame earned per deck played so far.
pub fn fame_average(input: &ProjectionInput) -> f64 {
    if input.is_unscored() {
        return 0.0;
    }

    let mut attacks = i64::from(input.totals.decks_used);
    if input.is_colosseum {
        attacks += DAILY_DECKS * input.days_behind();
    }
    if attacks == 0 {
        return 0.0;
    }

    f64::from(input.score.fame) / attacks as f64
}

/// Projected end-of-race fame.
///
/// Extrapolates the clan's efficiency so far (fame earned over the best
/// fame possible for the same decks) across its remaining capacity, rounds
/// up to a multiple of 50 (or 25 when the fame is not a multiple of 10)
/// and caps at the phase maximum.
pub fn projected_fame(input: &ProjectionInput) -> u32 {
    if input.is_unscored() {
        return 0;
    }

    let fame = f64::from(input.score.fame);
    let decks = i64::from(input.totals.decks_used);
    let duels = i64::from(input.totals.duels_completed);

    let mut max_current = fame_value(duels, decks);
    if input.is_colosseum {
        max_current += DAILY_MAX_FAME * input.days_behind();
    }
    if max_current <= 0 {
        return 0;
    }

    let duels_left = (DAILY_DUELS - duels).max(0);
    let decks_left = (DAILY_DECKS - decks).max(0);
    let mut max_remaining = fame_value(duels_left, decks_left).max(0);
    if input.is_colosseum {
        max_remaining += DAILY_MAX_FAME * input.days_ahead();
    }

    let efficiency = fame / max_current as f64;
    let projection = fame + max_remaining as f64 * efficiency;
    if !projection.is_finite() {
        return 0;
    }

    let step = if input.score.fame % 10 == 0 { 50.0 } else { 25.0 };
    let rounded = (projection / step).ceil() * step;

    let cap = if input.is_colosseum {
        MAX_COLOSSEUM_PROJECTED_FAME
    } else {
        MAX_PROJECTED_FAME
    };

    (rounded as u32).min(cap)
}
