//! Sleeper client - typed, read-only access to the Sleeper fantasy API
//!
//! This crate provides the API records (users, leagues, rosters, matchups,
//! players, transactions, brackets) and a thin HTTP client over them.

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::SleeperClient;
pub use config::SleeperConfig;
pub use error::SleeperError;

// Re-export commonly used types
pub use types::{
    BracketKind, NflState, SleeperDraftPick, SleeperLeague, SleeperMatchup, SleeperPlayer,
    SleeperPlayoffBracket, SleeperRoster, SleeperTransaction, SleeperTrendingPlayer, SleeperUser,
    TrendKind,
};

// Result type alias
pub type Result<T> = std::result::Result<T, SleeperError>;
