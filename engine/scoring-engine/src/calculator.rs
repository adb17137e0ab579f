use chrono::{Datelike, NaiveDate};
use sleeper_client::SleeperPlayer;
use tracing::debug;

use crate::config::PlayerTables;
use crate::models::*;

/// Per-player heuristics
///
/// Every method is a pure function of the player record, the lookup tables
/// and the reference year used for birth-date ages.
#[derive(Debug, Clone)]
pub struct PlayerScorer {
    tables: PlayerTables,
}

fn birth_year(birth_date: &str) -> Option<i32> {
    NaiveDate::parse_from_str(birth_date, "%Y-%m-%d")
        .map(|date| date.year())
        .ok()
        .or_else(|| birth_date.get(..4)?.parse().ok())
}

impl PlayerScorer {
    pub fn new(tables: PlayerTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &PlayerTables {
        &self.tables
    }

    /// Explicit age, else years since the birth year, else the default age
    pub fn calculate_age(&self, player: &SleeperPlayer, current_year: i32) -> u32 {
        if let Some(age) = player.age.filter(|age| *age > 0) {
            return age;
        }

        match player.birth_date.as_deref().and_then(birth_year) {
            Some(year) => (current_year - year).max(0) as u32,
            None => self.tables.default_age,
        }
    }

    pub fn experience(&self, player: &SleeperPlayer) -> u32 {
        player.years_exp.unwrap_or(0)
    }

    /// Multiplier in [floor, 1] shrinking with distance from the position's peak age
    pub fn age_adjustment(&self, age: u32, position: &str) -> f64 {
        let peak = self.tables.peak_age_for(position);
        let age_diff = (age as f64 - peak as f64).abs();

        (1.0 - age_diff * self.tables.age_curve_step).max(self.tables.age_curve_floor)
    }

    pub fn injury_adjustment(&self, player: &SleeperPlayer) -> f64 {
        if player.is_injured() {
            self.tables.injury_multiplier
        } else {
            1.0
        }
    }

    pub fn calculate_projected_points(&self, player: &SleeperPlayer, current_year: i32) -> f64 {
        let base = self.tables.base_points_for(&player.position);
        let age = self.calculate_age(player, current_year);
        let age_adjustment = self.age_adjustment(age, &player.position);
        let injury_adjustment = self.injury_adjustment(player);

        (base * age_adjustment * injury_adjustment).round()
    }

    /// Position baseline plus a capped experience bonus, at most 1.0
    pub fn calculate_consistency_score(&self, player: &SleeperPlayer) -> f64 {
        let base = self.tables.consistency_base_for(&player.position);
        let experience_bonus = (self.experience(player) as f64 * self.tables.experience_bonus_per_year)
            .min(self.tables.experience_bonus_cap);

        (base + experience_bonus).min(1.0)
    }

    /// Any injury status is High. Running backs are never Low: above 28 is
    /// High and everything else Medium. Other positions are High above 32,
    /// Medium above 28, otherwise Low.
    pub fn calculate_injury_risk(&self, player: &SleeperPlayer, current_year: i32) -> InjuryRisk {
        if player.is_injured() {
            return InjuryRisk::High;
        }

        let age = self.calculate_age(player, current_year);

        if player.position == "RB" {
            return if age > 28 { InjuryRisk::High } else { InjuryRisk::Medium };
        }

        if age > 32 {
            InjuryRisk::High
        } else if age > 28 {
            InjuryRisk::Medium
        } else {
            InjuryRisk::Low
        }
    }

    pub fn calculate_trending_status(&self, player: &SleeperPlayer, current_year: i32) -> TrendingStatus {
        let age = self.calculate_age(player, current_year);
        let experience = self.experience(player);

        if age < 25 && experience < 3 {
            TrendingStatus::Rising
        } else if age > 30 && experience > 8 {
            TrendingStatus::Falling
        } else {
            TrendingStatus::Stable
        }
    }

    /// round(100 x production x consistency x age score x experience score)
    pub fn calculate_value_score(&self, player: &SleeperPlayer, current_year: i32) -> u32 {
        let projected_points = self.calculate_projected_points(player, current_year);
        let consistency = self.calculate_consistency_score(player);
        let age = self.calculate_age(player, current_year);
        let experience = self.experience(player);

        let production_score = projected_points / self.tables.production_scale;
        let age_score = if age < 25 {
            1.0
        } else if age < 30 {
            0.8
        } else {
            0.6
        };
        let experience_score = if experience > 2 { 1.0 } else { 0.8 };

        let value = (production_score * consistency * age_score * experience_score * 100.0).round();
        value.max(0.0) as u32
    }

    /// Sleeper search rank, or the unranked sentinel
    pub fn calculate_position_rank(&self, player: &SleeperPlayer) -> u32 {
        player.search_rank.filter(|rank| *rank > 0).unwrap_or(self.tables.unranked)
    }

    // TODO: rank overall across positions once projections come from real stats
    pub fn calculate_overall_rank(&self, player: &SleeperPlayer) -> u32 {
        self.calculate_position_rank(player)
    }

    pub fn calculate_season_projection(&self, player: &SleeperPlayer, current_year: i32) -> SeasonProjection {
        let total_points = self.calculate_projected_points(player, current_year);
        let games_played = self.tables.season_games;

        SeasonProjection { total_points, games_played, average_points: total_points / games_played as f64 }
    }

    /// All player metrics in one record
    pub fn analyze(&self, player_id: &str, player: &SleeperPlayer, current_year: i32) -> PlayerAnalytics {
        let analytics = PlayerAnalytics {
            player_id: player_id.to_string(),
            name: player.display_name(),
            position: player.position.clone(),
            team: player.team.clone(),
            age: self.calculate_age(player, current_year),
            experience: self.experience(player),
            projected_points: self.calculate_projected_points(player, current_year),
            consistency_score: self.calculate_consistency_score(player),
            injury_risk: self.calculate_injury_risk(player, current_year),
            trending_status: self.calculate_trending_status(player, current_year),
            value_score: self.calculate_value_score(player, current_year),
            position_rank: self.calculate_position_rank(player),
            overall_rank: self.calculate_overall_rank(player),
            strength_of_schedule: self.tables.strength_of_schedule,
            bye_week: self.tables.bye_week_for(&player.team),
            recent_performance: self.tables.recent_performance.clone(),
            season_projection: self.calculate_season_projection(player, current_year),
        };

        debug!(
            "Scored player {} ({} {}): projected {:.0}, value {}",
            player_id, analytics.position, analytics.name, analytics.projected_points, analytics.value_score
        );

        analytics
    }
}

impl Default for PlayerScorer {
    fn default() -> Self {
        Self::new(PlayerTables::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: i32 = 2025;

    fn player(position: &str, age: Option<u32>, years_exp: Option<u32>) -> SleeperPlayer {
        SleeperPlayer {
            player_id: "1".to_string(),
            first_name: "Test".to_string(),
            last_name: "Player".to_string(),
            position: position.to_string(),
            team: "KC".to_string(),
            age,
            years_exp,
            ..SleeperPlayer::default()
        }
    }

    #[test]
    fn test_age_sources() {
        let scorer = PlayerScorer::default();

        assert_eq!(scorer.calculate_age(&player("WR", Some(31), None), YEAR), 31);

        let mut from_birth = player("WR", None, None);
        from_birth.birth_date = Some("1998-12-31".to_string());
        assert_eq!(scorer.calculate_age(&from_birth, YEAR), 27);

        assert_eq!(scorer.calculate_age(&player("WR", None, None), YEAR), 25);
        assert_eq!(scorer.calculate_age(&player("WR", Some(0), None), YEAR), 25);
    }

    #[test]
    fn test_injury_status_is_always_high() {
        let scorer = PlayerScorer::default();

        for (position, age) in [("QB", 22), ("RB", 23), ("WR", 27), ("K", 35)] {
            let mut p = player(position, Some(age), Some(1));
            p.injury_status = Some("Questionable".to_string());
            assert_eq!(scorer.calculate_injury_risk(&p, YEAR), InjuryRisk::High);
        }
    }

    #[test]
    fn test_running_back_injury_thresholds() {
        let scorer = PlayerScorer::default();

        // RBs are never Low, even when young
        assert_eq!(scorer.calculate_injury_risk(&player("RB", Some(29), None), YEAR), InjuryRisk::High);
        assert_eq!(scorer.calculate_injury_risk(&player("RB", Some(28), None), YEAR), InjuryRisk::Medium);
        assert_eq!(scorer.calculate_injury_risk(&player("RB", Some(26), None), YEAR), InjuryRisk::Medium);
        assert_eq!(scorer.calculate_injury_risk(&player("RB", Some(24), None), YEAR), InjuryRisk::Medium);
    }

    #[test]
    fn test_other_position_injury_thresholds() {
        let scorer = PlayerScorer::default();

        assert_eq!(scorer.calculate_injury_risk(&player("WR", Some(33), None), YEAR), InjuryRisk::High);
        assert_eq!(scorer.calculate_injury_risk(&player("WR", Some(32), None), YEAR), InjuryRisk::Medium);
        assert_eq!(scorer.calculate_injury_risk(&player("WR", Some(29), None), YEAR), InjuryRisk::Medium);
        assert_eq!(scorer.calculate_injury_risk(&player("WR", Some(28), None), YEAR), InjuryRisk::Low);
    }

    #[test]
    fn test_rookie_running_back() {
        let scorer = PlayerScorer::default();
        let rookie = player("RB", Some(22), Some(0));

        let analytics = scorer.analyze("1", &rookie, YEAR);
        assert_eq!(analytics.consistency_score, 0.65);
        assert_eq!(analytics.injury_risk, InjuryRisk::Medium);
        assert_eq!(analytics.trending_status, TrendingStatus::Rising);
        // 180 x (1 - 4 x 0.03) = 158.4
        assert_eq!(analytics.projected_points, 158.0);
        // 158/300 x 0.65 x 1.0 x 0.8 x 100 = 27.39
        assert_eq!(analytics.value_score, 27);
    }

    #[test]
    fn test_age_curve_floor_and_injury_discount() {
        let scorer = PlayerScorer::default();

        // 40-year-old QB is 12 years past peak: 1 - 0.36 = 0.64, floored at 0.7
        assert_eq!(scorer.calculate_projected_points(&player("QB", Some(40), None), YEAR), 196.0);

        let mut hurt = player("QB", Some(28), None);
        hurt.injury_status = Some("Out".to_string());
        assert_eq!(scorer.calculate_projected_points(&hurt, YEAR), 224.0);
    }

    #[test]
    fn test_consistency_bonus_is_capped() {
        let scorer = PlayerScorer::default();

        let veteran_qb = player("QB", Some(34), Some(15));
        assert_eq!(scorer.calculate_consistency_score(&veteran_qb), 1.0);

        let veteran_k = player("K", Some(34), Some(15));
        assert!((scorer.calculate_consistency_score(&veteran_k) - 0.75).abs() < 1e-9);

        let te = player("TE", Some(26), Some(3));
        assert!((scorer.calculate_consistency_score(&te) - 0.81).abs() < 1e-9);
    }

    #[test]
    fn test_trending_status() {
        let scorer = PlayerScorer::default();

        assert_eq!(scorer.calculate_trending_status(&player("WR", Some(23), Some(1)), YEAR), TrendingStatus::Rising);
        assert_eq!(scorer.calculate_trending_status(&player("WR", Some(31), Some(9)), YEAR), TrendingStatus::Falling);
        assert_eq!(scorer.calculate_trending_status(&player("WR", Some(31), Some(8)), YEAR), TrendingStatus::Stable);
        assert_eq!(scorer.calculate_trending_status(&player("WR", Some(24), Some(3)), YEAR), TrendingStatus::Stable);
    }

    #[test]
    fn test_value_score_bounded_and_deterministic() {
        let scorer = PlayerScorer::default();

        for position in ["QB", "RB", "WR", "TE", "K", "DEF", "LB"] {
            for age in [0, 21, 25, 29, 33, 45] {
                for exp in [0, 2, 3, 10, 20] {
                    let mut p = player(position, Some(age), Some(exp));
                    for injury in [None, Some("Doubtful".to_string())] {
                        p.injury_status = injury;
                        let first = scorer.calculate_value_score(&p, YEAR);
                        let second = scorer.calculate_value_score(&p, YEAR);
                        assert_eq!(first, second);
                        assert!(first <= 100);
                    }
                }
            }
        }
    }

    #[test]
    fn test_ranks_share_search_rank() {
        let scorer = PlayerScorer::default();

        let mut ranked = player("WR", Some(25), Some(3));
        ranked.search_rank = Some(14);
        assert_eq!(scorer.calculate_position_rank(&ranked), 14);
        assert_eq!(scorer.calculate_overall_rank(&ranked), 14);

        let unranked = player("WR", Some(25), Some(3));
        assert_eq!(scorer.calculate_position_rank(&unranked), 999);
        assert_eq!(scorer.calculate_overall_rank(&unranked), 999);
    }

    #[test]
    fn test_bye_week_and_placeholders() {
        let scorer = PlayerScorer::default();

        let mut free_agent = player("WR", Some(25), Some(3));
        free_agent.team = String::new();
        let analytics = scorer.analyze("1", &free_agent, YEAR);
        assert_eq!(analytics.bye_week, 0);
        assert_eq!(analytics.strength_of_schedule, 0.5);
        assert_eq!(analytics.recent_performance, vec![15.2, 8.7, 22.1, 12.4, 18.9]);

        let chief = scorer.analyze("1", &player("WR", Some(25), Some(3)), YEAR);
        assert_eq!(chief.bye_week, 6);
        assert_eq!(chief.season_projection.games_played, 17);
        assert!((chief.season_projection.average_points - chief.projected_points / 17.0).abs() < 1e-9);
    }
}
