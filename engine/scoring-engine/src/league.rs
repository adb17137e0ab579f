use sleeper_client::SleeperLeague;

use crate::models::*;

// TODO: derive these from rosters and transactions instead of fixed values
pub fn analyze_league(league: &SleeperLeague) -> LeagueAnalytics {
    LeagueAnalytics {
        league_id: league.league_id.clone(),
        competitiveness: 75,
        parity_score: 82,
        average_experience: 4.2,
        most_active_traders: vec!["User1".to_string(), "User2".to_string()],
        waivers_most_active: vec!["User3".to_string(), "User4".to_string()],
        power_rankings: Vec::new(),
        playoff_picture: PlayoffPicture::default(),
        trade_market: TradeMarket::default(),
        waivers_hotlist: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_league_summary_is_fixed() {
        let league = SleeperLeague { league_id: "784512".to_string(), ..SleeperLeague::default() };
        let analytics = analyze_league(&league);

        assert_eq!(analytics.league_id, "784512");
        assert_eq!(analytics.competitiveness, 75);
        assert_eq!(analytics.parity_score, 82);
        assert_eq!(analytics.average_experience, 4.2);
        assert_eq!(analytics.most_active_traders, vec!["User1", "User2"]);
        assert_eq!(analytics.waivers_most_active, vec!["User3", "User4"]);
        assert!(analytics.power_rankings.is_empty());
        assert!(analytics.playoff_picture.locked.is_empty());
        assert!(analytics.trade_market.hot_commodities.is_empty());
        assert!(analytics.waivers_hotlist.is_empty());
    }
}
