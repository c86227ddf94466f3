//! Race analytics engine.
//!
//! Turns a raw current-race snapshot into the view clients display:
//! - League and badge resolution
//! - Per-clan deck, slot and duel totals
//! - Fame averages and end-of-race projections
//! - Current and projected placements with shared ties
//! - Final display ordering
//!
//! Everything here is synchronous and side-effect free.

mod aggregate;
mod assemble;
mod badge;
mod projection;
mod ranking;

pub use aggregate::{aggregate, ClanTotals};
pub use assemble::assemble;
pub use badge::{league, BadgeTable, BadgeTableError, League, NO_CLAN};
pub use projection::{
    fame_average, projected_fame, ProjectionInput, FINISH_LINE, FIRST_SCORED_DAY,
    MAX_COLOSSEUM_PROJECTED_FAME, MAX_PROJECTED_FAME,
};
pub use ranking::{rank, Standing};
