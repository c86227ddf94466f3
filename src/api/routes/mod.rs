pub mod clan;
pub mod health;
pub mod player;
pub mod race;
