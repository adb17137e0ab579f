use sleeper_client::SleeperRoster;
use std::collections::{BTreeMap, HashMap};

use crate::config::RosterTables;
use crate::models::*;

/// Positions checked for depth weaknesses, in reporting order
const DEPTH_POSITIONS: [&str; 4] = ["RB", "WR", "TE", "QB"];

/// Roster-level aggregation over already scored players
#[derive(Debug, Clone)]
pub struct RosterAnalyzer {
    tables: RosterTables,
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

fn count_positions(players: &[PlayerAnalytics]) -> HashMap<&str, u32> {
    let mut counts = HashMap::new();
    for player in players {
        *counts.entry(player.position.as_str()).or_insert(0) += 1;
    }
    counts
}

fn count_where(players: &[PlayerAnalytics], pred: impl Fn(&PlayerAnalytics) -> bool) -> usize {
    players.iter().filter(|p| pred(*p)).count()
}

impl RosterAnalyzer {
    pub fn new(tables: RosterTables) -> Self {
        Self { tables }
    }

    /// `players` holds the analytics for the roster's known players, in
    /// roster order; unknown ids have already been skipped.
    pub fn analyze(&self, roster: &SleeperRoster, owner_name: &str, players: &[PlayerAnalytics]) -> RosterAnalytics {
        let weaknesses = self.weaknesses(players);
        let trade_targets = self.trade_targets(&weaknesses);
        let playoff_odds = playoff_odds(roster);

        RosterAnalytics {
            roster_id: roster.roster_id,
            owner_name: owner_name.to_string(),
            total_value: players.iter().map(|p| p.value_score).sum(),
            projected_points: players.iter().map(|p| p.projected_points).sum(),
            strength_by_position: strength_by_position(players),
            weaknesses,
            strengths: strengths(players),
            age_analysis: age_analysis(players),
            injury_risk: roster_injury_risk(players),
            depth_score: self.depth_score(players),
            trade_targets,
            drop_candidates: drop_candidates(players),
            start_sit_recommendations: start_sit(roster, players),
            playoff_odds,
            championship_odds: championship_odds(playoff_odds),
            power_ranking: power_ranking(players),
        }
    }

    pub fn weaknesses(&self, players: &[PlayerAnalytics]) -> Vec<String> {
        let counts = count_positions(players);
        let mut weaknesses = Vec::new();

        for position in DEPTH_POSITIONS {
            let required = self.tables.required_depth.get(position).copied().unwrap_or(0);
            let actual = counts.get(position).copied().unwrap_or(0);
            if actual < required {
                weaknesses.push(format!("{position} depth"));
            }
        }

        if mean(players.iter().map(|p| p.age as f64)).is_some_and(|age| age > 28.0) {
            weaknesses.push("Aging roster".to_string());
        }

        if count_where(players, |p| p.injury_risk == InjuryRisk::High) > 3 {
            weaknesses.push("High injury risk".to_string());
        }

        weaknesses
    }

    /// Share of required roster slots that are filled, 0-100
    pub fn depth_score(&self, players: &[PlayerAnalytics]) -> u32 {
        let counts = count_positions(players);
        let (filled, required) = self.tables.required_depth.iter().fold((0, 0), |(filled, total), (pos, req)| {
            let actual = counts.get(pos.as_str()).copied().unwrap_or(0);
            (filled + actual.min(*req), total + req)
        });

        if required == 0 {
            return 100;
        }

        (filled as f64 / required as f64 * 100.0).round() as u32
    }

    pub fn trade_targets(&self, weaknesses: &[String]) -> Vec<String> {
        weaknesses
            .iter()
            .filter_map(|tag| self.tables.trade_targets.get(tag))
            .flatten()
            .cloned()
            .collect()
    }
}

impl Default for RosterAnalyzer {
    fn default() -> Self {
        Self::new(RosterTables::default())
    }
}

/// Rounded mean value score per position
pub fn strength_by_position(players: &[PlayerAnalytics]) -> BTreeMap<String, u32> {
    let mut groups: BTreeMap<String, Vec<u32>> = BTreeMap::new();
    for player in players {
        groups.entry(player.position.clone()).or_default().push(player.value_score);
    }

    groups
        .into_iter()
        .map(|(position, values)| {
            let avg = values.iter().sum::<u32>() as f64 / values.len() as f64;
            (position, avg.round() as u32)
        })
        .collect()
}

pub fn strengths(players: &[PlayerAnalytics]) -> Vec<String> {
    let mut strengths = Vec::new();

    if count_where(players, |p| p.overall_rank <= 24) >= 3 {
        strengths.push("Elite talent".to_string());
    }
    if count_where(players, |p| p.position_rank <= 36) >= 15 {
        strengths.push("Excellent depth".to_string());
    }
    if count_where(players, |p| p.age <= 25) >= 8 {
        strengths.push("Young core".to_string());
    }
    if count_where(players, |p| p.consistency_score >= 0.8) >= 6 {
        strengths.push("Consistent performers".to_string());
    }

    strengths
}

pub fn age_analysis(players: &[PlayerAnalytics]) -> AgeAnalysis {
    let average_age = mean(players.iter().map(|p| p.age as f64)).unwrap_or(0.0);

    AgeAnalysis {
        average_age: (average_age * 10.0).round() / 10.0,
        young_players: count_where(players, |p| p.age <= 25),
        veteran_players: count_where(players, |p| p.age >= 30),
        peak_age_players: count_where(players, |p| (26..=29).contains(&p.age)),
    }
}

pub fn roster_injury_risk(players: &[PlayerAnalytics]) -> InjuryRisk {
    let high = count_where(players, |p| p.injury_risk == InjuryRisk::High);
    let medium = count_where(players, |p| p.injury_risk == InjuryRisk::Medium);

    if high >= 4 {
        InjuryRisk::High
    } else if high >= 2 || medium >= 6 {
        InjuryRisk::Medium
    } else {
        InjuryRisk::Low
    }
}

pub fn drop_candidates(players: &[PlayerAnalytics]) -> Vec<String> {
    players
        .iter()
        .filter(|p| p.value_score < 30 && p.position_rank > 60)
        .map(|p| p.name.clone())
        .take(5)
        .collect()
}

/// Starters to start or sit and bench players worth a flex spot, at most
/// three names each
pub fn start_sit(roster: &SleeperRoster, players: &[PlayerAnalytics]) -> StartSitRecommendations {
    let by_id: HashMap<&str, &PlayerAnalytics> = players.iter().map(|p| (p.player_id.as_str(), p)).collect();

    let starters: Vec<&PlayerAnalytics> =
        roster.starters.iter().filter_map(|id| by_id.get(id.as_str()).copied()).collect();
    let bench: Vec<&PlayerAnalytics> = roster
        .players
        .iter()
        .filter(|id| !roster.is_starter(id))
        .filter_map(|id| by_id.get(id.as_str()).copied())
        .collect();

    let names = |group: &[&PlayerAnalytics], pred: &dyn Fn(f64) -> bool| -> Vec<String> {
        group.iter().filter(|p| pred(p.projected_points)).map(|p| p.name.clone()).take(3).collect()
    };

    StartSitRecommendations {
        start: names(&starters, &|points: f64| points >= 12.0),
        sit: names(&starters, &|points: f64| points < 8.0),
        flex: names(&bench, &|points: f64| points >= 10.0),
    }
}

/// Win percentage so far, 50 before any games are played
pub fn playoff_odds(roster: &SleeperRoster) -> u32 {
    let wins = roster.wins();
    let total = wins + roster.losses();

    if total == 0 {
        return 50;
    }

    (wins as f64 / total as f64 * 100.0).round() as u32
}

pub fn championship_odds(playoff_odds: u32) -> u32 {
    (playoff_odds as f64 * 0.3).round() as u32
}

pub fn power_ranking(players: &[PlayerAnalytics]) -> u32 {
    let avg_value = mean(players.iter().map(|p| p.value_score as f64)).unwrap_or(0.0);
    let avg_projection = mean(players.iter().map(|p| p.projected_points)).unwrap_or(0.0);

    ((avg_value + avg_projection) / 2.0).round() as u32
}
