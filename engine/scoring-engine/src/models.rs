use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Injury risk bucket, for a single player or a whole roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InjuryRisk {
    Low,
    Medium,
    High,
}

impl fmt::Display for InjuryRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InjuryRisk::Low => write!(f, "Low"),
            InjuryRisk::Medium => write!(f, "Medium"),
            InjuryRisk::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendingStatus {
    Rising,
    Falling,
    Stable,
}

impl fmt::Display for TrendingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendingStatus::Rising => write!(f, "Rising"),
            TrendingStatus::Falling => write!(f, "Falling"),
            TrendingStatus::Stable => write!(f, "Stable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonProjection {
    pub total_points: f64,
    pub games_played: u32,
    pub average_points: f64,
}

/// Derived metrics for one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerAnalytics {
    pub player_id: String,
    pub name: String,
    pub position: String,
    pub team: String,
    pub age: u32,
    pub experience: u32,
    pub projected_points: f64,
    pub consistency_score: f64,
    pub injury_risk: InjuryRisk,
    pub trending_status: TrendingStatus,
    /// 0-100
    pub value_score: u32,
    pub position_rank: u32,
    pub overall_rank: u32,
    pub strength_of_schedule: f64,
    pub bye_week: u32,
    pub recent_performance: Vec<f64>,
    pub season_projection: SeasonProjection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeAnalysis {
    /// Rounded to one decimal
    pub average_age: f64,
    pub young_players: usize,
    pub veteran_players: usize,
    pub peak_age_players: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StartSitRecommendations {
    pub start: Vec<String>,
    pub sit: Vec<String>,
    pub flex: Vec<String>,
}

/// Aggregate metrics for one roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterAnalytics {
    pub roster_id: u32,
    pub owner_name: String,
    pub total_value: u32,
    pub projected_points: f64,
    pub strength_by_position: BTreeMap<String, u32>,
    pub weaknesses: Vec<String>,
    pub strengths: Vec<String>,
    pub age_analysis: AgeAnalysis,
    pub injury_risk: InjuryRisk,
    pub depth_score: u32,
    pub trade_targets: Vec<String>,
    pub drop_candidates: Vec<String>,
    pub start_sit_recommendations: StartSitRecommendations,
    pub playoff_odds: u32,
    pub championship_odds: u32,
    pub power_ranking: u32,
}

/// One side of a weekly matchup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupTeam {
    pub roster_id: u32,
    pub projected_points: f64,
    pub win_probability: u32,
    pub key_players: Vec<String>,
    pub advantages: Vec<String>,
    pub concerns: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Advantage {
    Team1,
    Team2,
    Even,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMatchup {
    pub position: String,
    pub team1_player: String,
    pub team2_player: String,
    pub advantage: Advantage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupAnalytics {
    pub matchup_id: u32,
    pub week: u32,
    pub team1: MatchupTeam,
    pub team2: MatchupTeam,
    /// 100 for identical projections
    pub closeness_rating: i32,
    pub upset_potential: u32,
    pub key_matchups: Vec<KeyMatchup>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankTrend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerRankingEntry {
    pub roster_id: u32,
    pub rank: u32,
    pub trend: RankTrend,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayoffPicture {
    pub locked: Vec<u32>,
    pub competing: Vec<u32>,
    pub eliminated: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeMarket {
    pub hot_commodities: Vec<String>,
    pub buy_low_candidates: Vec<String>,
    pub sell_high_candidates: Vec<String>,
}

/// League-wide summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueAnalytics {
    pub league_id: String,
    pub competitiveness: u32,
    pub parity_score: u32,
    pub average_experience: f64,
    pub most_active_traders: Vec<String>,
    pub waivers_most_active: Vec<String>,
    pub power_rankings: Vec<PowerRankingEntry>,
    pub playoff_picture: PlayoffPicture,
    pub trade_market: TradeMarket,
    pub waivers_hotlist: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    A,
    B,
    Even,
}

/// Value comparison of two sides of a proposed trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeAnalysis {
    pub side_a: Vec<PlayerAnalytics>,
    pub side_b: Vec<PlayerAnalytics>,
    pub side_a_total: u32,
    pub side_b_total: u32,
    /// Side A total minus side B total
    pub value_difference: i64,
    pub favored: TradeSide,
}
