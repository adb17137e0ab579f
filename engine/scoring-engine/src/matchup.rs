use sleeper_client::SleeperMatchup;
use std::collections::HashSet;

use crate::models::*;

/// Pair the week's matchup records by matchup id
///
/// Each roster appears in at most one pair. Records without a matchup id,
/// or whose id has no other unpaired roster, are dropped.
pub fn pair_matchups(matchups: &[SleeperMatchup]) -> Vec<(&SleeperMatchup, &SleeperMatchup)> {
    let mut processed = HashSet::new();
    let mut pairs = Vec::new();

    for matchup in matchups {
        let Some(matchup_id) = matchup.matchup_id else { continue };
        if processed.contains(&matchup.roster_id) {
            continue;
        }

        let opponent = matchups.iter().find(|m| {
            m.matchup_id == Some(matchup_id) && m.roster_id != matchup.roster_id && !processed.contains(&m.roster_id)
        });

        if let Some(opponent) = opponent {
            processed.insert(matchup.roster_id);
            processed.insert(opponent.roster_id);
            pairs.push((matchup, opponent));
        }
    }

    pairs
}

/// One side of a matchup, from the analytics of its known starters
pub fn analyze_team(roster_id: u32, starters: &[PlayerAnalytics]) -> MatchupTeam {
    MatchupTeam {
        roster_id,
        projected_points: starters.iter().map(|p| p.projected_points).sum(),
        win_probability: 50,
        key_players: starters.iter().take(3).map(|p| p.name.clone()).collect(),
        advantages: advantages(starters),
        concerns: concerns(starters),
    }
}

fn count_where(players: &[PlayerAnalytics], pred: impl Fn(&PlayerAnalytics) -> bool) -> usize {
    players.iter().filter(|p| pred(*p)).count()
}

pub fn advantages(starters: &[PlayerAnalytics]) -> Vec<String> {
    let mut advantages = Vec::new();

    if count_where(starters, |p| p.overall_rank <= 12) >= 2 {
        advantages.push("Elite talent advantage".to_string());
    }
    if count_where(starters, |p| p.consistency_score >= 0.8) >= 4 {
        advantages.push("High floor lineup".to_string());
    }
    if count_where(starters, |p| p.trending_status == TrendingStatus::Rising) >= 2 {
        advantages.push("Trending up players".to_string());
    }

    advantages
}

pub fn concerns(starters: &[PlayerAnalytics]) -> Vec<String> {
    let mut concerns = Vec::new();

    if count_where(starters, |p| p.injury_risk == InjuryRisk::High) >= 2 {
        concerns.push("Injury concerns".to_string());
    }
    if count_where(starters, |p| p.consistency_score < 0.6) >= 2 {
        concerns.push("Inconsistent performers".to_string());
    }
    if count_where(starters, |p| p.trending_status == TrendingStatus::Falling) >= 2 {
        concerns.push("Declining production".to_string());
    }

    concerns
}

/// 100 for identical projections, falling as the gap grows relative to the
/// mean projection
pub fn closeness_rating(team1: &MatchupTeam, team2: &MatchupTeam) -> i32 {
    let point_diff = (team1.projected_points - team2.projected_points).abs();
    let avg_points = (team1.projected_points + team2.projected_points) / 2.0;

    if avg_points == 0.0 {
        return 100;
    }

    round_half_up((1.0 - point_diff / avg_points) * 100.0) as i32
}

/// Halves round toward positive infinity, so -12.5 becomes -12
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

pub fn upset_potential(team1: &MatchupTeam, team2: &MatchupTeam) -> u32 {
    let point_diff = (team1.projected_points - team2.projected_points).abs();
    (50.0 - point_diff * 2.0).max(0.0).round() as u32
}

// TODO: compare starters slot by slot once lineups carry positions
pub fn key_matchups() -> Vec<KeyMatchup> {
    vec![KeyMatchup {
        position: "QB".to_string(),
        team1_player: "Player A".to_string(),
        team2_player: "Player B".to_string(),
        advantage: Advantage::Team1,
    }]
}

pub fn build(matchup_id: u32, week: u32, team1: MatchupTeam, team2: MatchupTeam) -> MatchupAnalytics {
    MatchupAnalytics {
        matchup_id,
        week,
        closeness_rating: closeness_rating(&team1, &team2),
        upset_potential: upset_potential(&team1, &team2),
        key_matchups: key_matchups(),
        team1,
        team2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(roster_id: u32, matchup_id: Option<u32>) -> SleeperMatchup {
        SleeperMatchup { roster_id, matchup_id, ..SleeperMatchup::default() }
    }

    fn team(roster_id: u32, projected_points: f64) -> MatchupTeam {
        MatchupTeam {
            roster_id,
            projected_points,
            win_probability: 50,
            key_players: vec![],
            advantages: vec![],
            concerns: vec![],
        }
    }

    fn starter(name: &str, trending_status: TrendingStatus, injury_risk: InjuryRisk) -> PlayerAnalytics {
        PlayerAnalytics {
            player_id: name.to_string(),
            name: name.to_string(),
            position: "WR".to_string(),
            team: "BUF".to_string(),
            age: 26,
            experience: 4,
            projected_points: 20.0,
            consistency_score: 0.5,
            injury_risk,
            trending_status,
            value_score: 20,
            position_rank: 10,
            overall_rank: 10,
            strength_of_schedule: 0.5,
            bye_week: 12,
            recent_performance: vec![],
            season_projection: SeasonProjection { total_points: 20.0, games_played: 17, average_points: 20.0 / 17.0 },
        }
    }

    #[test]
    fn test_pairs_share_matchup_id() {
        let records = vec![record(1, Some(1)), record(2, Some(2)), record(3, Some(1)), record(4, Some(2))];
        let pairs = pair_matchups(&records);

        assert_eq!(pairs.len(), 2);
        assert_eq!((pairs[0].0.roster_id, pairs[0].1.roster_id), (1, 3));
        assert_eq!((pairs[1].0.roster_id, pairs[1].1.roster_id), (2, 4));
    }

    #[test]
    fn test_unmatched_and_null_ids_dropped() {
        let records = vec![record(1, Some(1)), record(2, None), record(3, None), record(4, Some(1)), record(5, Some(7))];
        let pairs = pair_matchups(&records);

        assert_eq!(pairs.len(), 1);
        assert_eq!((pairs[0].0.roster_id, pairs[0].1.roster_id), (1, 4));
    }

    #[test]
    fn test_three_way_id_pairs_once() {
        let records = vec![record(1, Some(1)), record(2, Some(1)), record(3, Some(1))];
        let pairs = pair_matchups(&records);

        assert_eq!(pairs.len(), 1);
        assert_eq!((pairs[0].0.roster_id, pairs[0].1.roster_id), (1, 2));
    }

    #[test]
    fn test_closeness_and_upset() {
        let (a, b) = (team(1, 120.0), team(2, 100.0));
        assert_eq!(closeness_rating(&a, &b), 82);
        assert_eq!(upset_potential(&a, &b), 10);
        assert_eq!(closeness_rating(&b, &a), 82);
        assert_eq!(upset_potential(&b, &a), 10);
    }

    #[test]
    fn test_lopsided_closeness_rounds_half_up() {
        // 1 - 180/160 = -0.125
        assert_eq!(closeness_rating(&team(1, 250.0), &team(2, 70.0)), -12);
        assert_eq!(closeness_rating(&team(1, 70.0), &team(2, 250.0)), -12);
        assert_eq!(upset_potential(&team(1, 250.0), &team(2, 70.0)), 0);
    }

    #[test]
    fn test_identical_and_empty_projections() {
        assert_eq!(closeness_rating(&team(1, 95.0), &team(2, 95.0)), 100);
        assert_eq!(upset_potential(&team(1, 95.0), &team(2, 95.0)), 50);

        assert_eq!(closeness_rating(&team(1, 0.0), &team(2, 0.0)), 100);
        assert_eq!(upset_potential(&team(1, 200.0), &team(2, 0.0)), 0);
    }

    #[test]
    fn test_team_side() {
        let starters = vec![
            starter("A", TrendingStatus::Rising, InjuryRisk::High),
            starter("B", TrendingStatus::Rising, InjuryRisk::High),
            starter("C", TrendingStatus::Stable, InjuryRisk::Low),
            starter("D", TrendingStatus::Falling, InjuryRisk::Low),
        ];

        let side = analyze_team(7, &starters);
        assert_eq!(side.projected_points, 80.0);
        assert_eq!(side.key_players, vec!["A", "B", "C"]);
        assert_eq!(side.win_probability, 50);
        assert_eq!(side.advantages, vec!["Elite talent advantage", "Trending up players"]);
        assert_eq!(side.concerns, vec!["Injury concerns", "Inconsistent performers"]);
    }

    #[test]
    fn test_build_uses_static_key_matchup() {
        let analytics = build(4, 9, team(1, 120.0), team(2, 100.0));
        assert_eq!(analytics.matchup_id, 4);
        assert_eq!(analytics.week, 9);
        assert_eq!(analytics.key_matchups.len(), 1);
        assert_eq!(analytics.key_matchups[0].advantage, Advantage::Team1);
    }
}
