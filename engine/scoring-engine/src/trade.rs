use std::cmp::Ordering;

use crate::models::*;

/// Compare the summed value scores of the two sides of a trade
pub fn compare(side_a: Vec<PlayerAnalytics>, side_b: Vec<PlayerAnalytics>) -> TradeAnalysis {
    let side_a_total: u32 = side_a.iter().map(|p| p.value_score).sum();
    let side_b_total: u32 = side_b.iter().map(|p| p.value_score).sum();
    let value_difference = side_a_total as i64 - side_b_total as i64;

    let favored = match value_difference.cmp(&0) {
        Ordering::Greater => TradeSide::A,
        Ordering::Less => TradeSide::B,
        Ordering::Equal => TradeSide::Even,
    };

    TradeAnalysis { side_a, side_b, side_a_total, side_b_total, value_difference, favored }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valued(id: &str, value_score: u32) -> PlayerAnalytics {
        PlayerAnalytics {
            player_id: id.to_string(),
            name: id.to_string(),
            position: "RB".to_string(),
            team: "DET".to_string(),
            age: 24,
            experience: 2,
            projected_points: 170.0,
            consistency_score: 0.69,
            injury_risk: InjuryRisk::Medium,
            trending_status: TrendingStatus::Rising,
            value_score,
            position_rank: 20,
            overall_rank: 20,
            strength_of_schedule: 0.5,
            bye_week: 5,
            recent_performance: vec![],
            season_projection: SeasonProjection { total_points: 170.0, games_played: 17, average_points: 10.0 },
        }
    }

    #[test]
    fn test_favored_side() {
        let analysis = compare(vec![valued("a", 31), valued("b", 12)], vec![valued("c", 40)]);
        assert_eq!(analysis.side_a_total, 43);
        assert_eq!(analysis.side_b_total, 40);
        assert_eq!(analysis.value_difference, 3);
        assert_eq!(analysis.favored, TradeSide::A);

        let analysis = compare(vec![valued("a", 10)], vec![valued("c", 40)]);
        assert_eq!(analysis.value_difference, -30);
        assert_eq!(analysis.favored, TradeSide::B);
    }

    #[test]
    fn test_empty_sides_are_even() {
        let analysis = compare(vec![], vec![]);
        assert_eq!(analysis.value_difference, 0);
        assert_eq!(analysis.favored, TradeSide::Even);
    }
}
