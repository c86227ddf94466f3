//! # CWStats API
//!
//! Clan war race analytics over the official game API.
//!
//! ## Architecture
//!
//! - **models**: Wire types for races, clans and tags, plus the assembled views
//! - **calculate**: Badges, deck totals, fame projections, placements and view assembly
//! - **fetch**: Game API client
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod fetch;
pub mod models;

pub use models::*;
