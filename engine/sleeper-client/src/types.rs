//! Records returned by the Sleeper API
//!
//! Field names follow the API's snake_case JSON so the structs deserialize
//! without renames. The API is loose about nulls, so most fields are
//! optional or defaulted.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Treat JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Sleeper user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleeperUser {
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl SleeperUser {
    /// Name to show for the user, preferring the display name
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.username
        } else {
            &self.display_name
        }
    }
}

/// Sleeper league
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SleeperLeague {
    pub league_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub season: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub total_rosters: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub roster_positions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sport: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub season_type: String,
    #[serde(default)]
    pub scoring_settings: serde_json::Value,
    #[serde(default)]
    pub settings: serde_json::Value,
    #[serde(default)]
    pub previous_league_id: Option<String>,
    #[serde(default)]
    pub draft_id: Option<String>,
}

/// Sleeper roster
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SleeperRoster {
    pub roster_id: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub players: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub starters: Vec<String>,
    #[serde(default)]
    pub settings: serde_json::Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reserve: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub taxi: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub co_owners: Vec<String>,
}

impl SleeperRoster {
    /// Numeric roster setting; missing or non-numeric values read as 0
    pub fn setting(&self, key: &str) -> f64 {
        match self.settings.get(key) {
            Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    pub fn wins(&self) -> u32 {
        self.setting("wins").max(0.0) as u32
    }

    pub fn losses(&self) -> u32 {
        self.setting("losses").max(0.0) as u32
    }

    /// Season fantasy points, combining `fpts` and the hundredths in `fpts_decimal`
    pub fn season_points(&self) -> f64 {
        self.setting("fpts") + self.setting("fpts_decimal") / 100.0
    }

    pub fn is_starter(&self, player_id: &str) -> bool {
        self.starters.iter().any(|id| id == player_id)
    }
}

/// Player directory entry from `/players/nfl`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SleeperPlayer {
    #[serde(default, deserialize_with = "null_as_default")]
    pub player_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub team: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub height: Option<String>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub years_exp: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub injury_status: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fantasy_positions: Vec<String>,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub depth_chart_position: Option<serde_json::Value>,
    #[serde(default)]
    pub depth_chart_order: Option<u32>,
    #[serde(default)]
    pub search_rank: Option<u32>,
    #[serde(default)]
    pub hashtag: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub rookie_year: Option<serde_json::Value>,
    #[serde(default)]
    pub practice_participation: Option<String>,
    #[serde(default)]
    pub injury_start_date: Option<String>,
    #[serde(default)]
    pub injury_notes: Option<String>,
    #[serde(default)]
    pub news_updated: Option<i64>,
    #[serde(default)]
    pub espn_id: Option<serde_json::Value>,
    #[serde(default)]
    pub yahoo_id: Option<serde_json::Value>,
    #[serde(default)]
    pub sportradar_id: Option<String>,
}

impl SleeperPlayer {
    /// "First Last", as shown on the dashboard
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Injury status, if one is set and non-blank
    pub fn injury(&self) -> Option<&str> {
        self.injury_status.as_deref().filter(|status| !status.is_empty())
    }

    pub fn is_injured(&self) -> bool {
        self.injury().is_some()
    }
}

/// Weekly matchup entry; two entries with the same `matchup_id` face each other
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SleeperMatchup {
    pub roster_id: u32,
    /// `None` when the roster has no opponent this week
    #[serde(default)]
    pub matchup_id: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub starters: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub players: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: f64,
    #[serde(default)]
    pub custom_points: Option<f64>,
    #[serde(default)]
    pub players_points: Option<HashMap<String, f64>>,
    #[serde(default)]
    pub starters_points: Option<Vec<f64>>,
}

/// League transaction (trade, waiver, free agent move)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleeperTransaction {
    pub transaction_id: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub roster_ids: Vec<u32>,
    #[serde(default)]
    pub leg: u32,
    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub status_updated: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub creator: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub consenter_ids: Vec<u32>,
    #[serde(default)]
    pub adds: Option<HashMap<String, u32>>,
    #[serde(default)]
    pub drops: Option<HashMap<String, u32>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub draft_picks: Vec<SleeperDraftPick>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub waiver_budget: Vec<SleeperWaiverBudget>,
    #[serde(default)]
    pub settings: Option<serde_json::Value>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl SleeperTransaction {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.created).single()
    }
}

/// Draft pick that changed hands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleeperDraftPick {
    pub season: String,
    pub round: u32,
    pub roster_id: u32,
    #[serde(default)]
    pub previous_owner_id: Option<u32>,
    #[serde(default)]
    pub owner_id: Option<u32>,
}

/// FAAB moved as part of a trade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleeperWaiverBudget {
    pub sender: u32,
    pub receiver: u32,
    pub amount: u32,
}

/// Current NFL calendar position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NflState {
    pub week: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub season_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub season_start_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub season: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub previous_season: String,
    #[serde(default)]
    pub leg: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub league_season: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub league_create_season: String,
    #[serde(default)]
    pub display_week: u32,
}

/// Player trending on adds or drops
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleeperTrendingPlayer {
    pub player_id: String,
    pub count: u32,
}

/// Where a bracket slot's team comes from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BracketSource {
    /// Winner of match `w`
    #[serde(default)]
    pub w: Option<u32>,
    /// Loser of match `l`
    #[serde(default)]
    pub l: Option<u32>,
}

/// Playoff bracket match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleeperPlayoffBracket {
    /// Round
    pub r: u32,
    /// Match id
    pub m: u32,
    pub t1: Option<u32>,
    pub t2: Option<u32>,
    /// Winner roster id
    #[serde(default)]
    pub w: Option<u32>,
    /// Loser roster id
    #[serde(default)]
    pub l: Option<u32>,
    #[serde(default)]
    pub t1_from: Option<BracketSource>,
    #[serde(default)]
    pub t2_from: Option<BracketSource>,
    /// Placement decided by this match (consolation bracket)
    #[serde(default)]
    pub p: Option<u32>,
}

/// Which playoff bracket to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BracketKind {
    Winners,
    Losers,
}

impl BracketKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BracketKind::Winners => "winners",
            BracketKind::Losers => "losers",
        }
    }
}

/// Direction of a trending list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendKind {
    Add,
    Drop,
}

impl TrendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TrendKind::Add => "add",
            TrendKind::Drop => "drop",
        }
    }
}

impl fmt::Display for TrendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
