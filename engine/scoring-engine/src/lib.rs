//! Scoring Engine - heuristic analytics for Sleeper leagues
//!
//! Scores individual players from their directory record, then aggregates
//! those scores per roster, per weekly matchup and per trade proposal. All
//! constants live in [`ScoringTables`], which can be loaded from TOML.

pub mod calculator;
pub mod config;
pub mod engine;
pub mod error;
pub mod league;
pub mod matchup;
pub mod models;
pub mod roster;
pub mod trade;

pub use calculator::PlayerScorer;
pub use config::{PlayerTables, RosterTables, ScoringTables};
pub use engine::AnalyticsService;
pub use error::ScoringError;
pub use models::*;
pub use roster::RosterAnalyzer;

pub type Result<T> = std::result::Result<T, ScoringError>;
