//! Data models for the race API.

mod clan;
mod player;
mod race;
mod tag;
mod view;

pub use clan::*;
pub use player::*;
pub use race::*;
pub use tag::*;
pub use view::*;
