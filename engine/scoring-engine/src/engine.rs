use chrono::{Datelike, Utc};
use player_cache::{CacheConfig, PlayerCache, PlayerSnapshot, PlayerSource};
use sleeper_client::{SleeperLeague, SleeperMatchup, SleeperRoster};
use tracing::{debug, info};

use crate::{
    calculator::PlayerScorer,
    config::ScoringTables,
    league, matchup,
    models::*,
    roster::RosterAnalyzer,
    trade, Result, ScoringError,
};

/// Analytics Service - scores players, rosters, matchups and trades
///
/// Every analysis first brings the player cache up to date, then works from
/// a single snapshot so the whole result sees one consistent directory.
pub struct AnalyticsService<S> {
    cache: PlayerCache<S>,
    scorer: PlayerScorer,
    roster_analyzer: RosterAnalyzer,
    reference_year: Option<i32>,
}

impl<S: PlayerSource> AnalyticsService<S> {
    pub fn new(cache: PlayerCache<S>, tables: ScoringTables) -> Self {
        info!("Creating analytics service");

        Self {
            cache,
            scorer: PlayerScorer::new(tables.players),
            roster_analyzer: RosterAnalyzer::new(tables.roster),
            reference_year: None,
        }
    }

    /// Cache TTL and scoring tables from the environment
    pub fn from_env(source: S) -> Result<Self> {
        let cache_config = CacheConfig::from_env()?;
        let tables = ScoringTables::from_env()?;
        Ok(Self::new(PlayerCache::new(source, cache_config), tables))
    }

    /// Pin the year used to turn birth dates into ages
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    pub fn cache(&self) -> &PlayerCache<S> {
        &self.cache
    }

    pub fn scorer(&self) -> &PlayerScorer {
        &self.scorer
    }

    fn current_year(&self) -> i32 {
        self.reference_year.unwrap_or_else(|| Utc::now().year())
    }

    /// Score every id known to the snapshot, in input order
    fn score_ids(&self, snapshot: &PlayerSnapshot, ids: &[String]) -> Vec<PlayerAnalytics> {
        let year = self.current_year();
        let scored: Vec<PlayerAnalytics> = ids
            .iter()
            .filter_map(|id| snapshot.get(id).map(|player| self.scorer.analyze(id, player, year)))
            .collect();

        if scored.len() < ids.len() {
            debug!("Skipped {} unknown player ids", ids.len() - scored.len());
        }
        scored
    }

    /// Metrics for one player, `None` if the id is not in the directory
    pub async fn analyze_player(&self, player_id: &str) -> Option<PlayerAnalytics> {
        self.cache.initialize_data().await;
        let snapshot = self.cache.snapshot().await;

        let player = snapshot.get(player_id)?;
        Some(self.scorer.analyze(player_id, player, self.current_year()))
    }

    /// Like [`analyze_player`](Self::analyze_player) but an unknown id is an error
    pub async fn require_player(&self, player_id: &str) -> Result<PlayerAnalytics> {
        self.analyze_player(player_id)
            .await
            .ok_or_else(|| ScoringError::PlayerNotFound { player_id: player_id.to_string() })
    }

    pub async fn analyze_roster(
        &self,
        roster: &SleeperRoster,
        league: &SleeperLeague,
        owner_name: &str,
    ) -> RosterAnalytics {
        self.cache.initialize_data().await;
        let snapshot = self.cache.snapshot().await;

        let players = self.score_ids(&snapshot, &roster.players);
        let analytics = self.roster_analyzer.analyze(roster, owner_name, &players);

        info!(
            "Analyzed roster {} in league {}: value {}, depth {}",
            roster.roster_id, league.league_id, analytics.total_value, analytics.depth_score
        );
        analytics
    }

    /// One entry per paired matchup; unpaired records are dropped
    pub async fn analyze_matchup(&self, matchups: &[SleeperMatchup], week: u32) -> Vec<MatchupAnalytics> {
        self.cache.initialize_data().await;
        let snapshot = self.cache.snapshot().await;

        let analytics: Vec<MatchupAnalytics> = matchup::pair_matchups(matchups)
            .into_iter()
            .filter_map(|(first, second)| {
                let matchup_id = first.matchup_id?;
                let team1 = matchup::analyze_team(first.roster_id, &self.score_ids(&snapshot, &first.starters));
                let team2 = matchup::analyze_team(second.roster_id, &self.score_ids(&snapshot, &second.starters));
                Some(matchup::build(matchup_id, week, team1, team2))
            })
            .collect();

        info!("Analyzed {} matchups for week {}", analytics.len(), week);
        analytics
    }

    pub async fn analyze_league(&self, league: &SleeperLeague) -> LeagueAnalytics {
        self.cache.initialize_data().await;
        league::analyze_league(league)
    }

    /// Unknown ids on either side are skipped
    pub async fn analyze_trade(&self, side_a: &[String], side_b: &[String]) -> TradeAnalysis {
        self.cache.initialize_data().await;
        let snapshot = self.cache.snapshot().await;

        let analysis = trade::compare(self.score_ids(&snapshot, side_a), self.score_ids(&snapshot, side_b));
        info!(
            "Trade value {} vs {} ({:?} favored)",
            analysis.side_a_total, analysis.side_b_total, analysis.favored
        );
        analysis
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use player_cache::PlayerMap;
    use serde_json::json;
    use sleeper_client::{NflState, SleeperPlayer};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FixedSource {
        players: PlayerMap,
        fetches: AtomicUsize,
    }

    #[async_trait]
    impl PlayerSource for FixedSource {
        async fn fetch_players(&self) -> sleeper_client::Result<Option<PlayerMap>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(Some(self.players.clone()))
        }

        async fn fetch_nfl_state(&self) -> sleeper_client::Result<Option<NflState>> {
            Ok(None)
        }
    }

    fn player(id: &str, position: &str, age: u32, years_exp: u32) -> SleeperPlayer {
        SleeperPlayer {
            player_id: id.to_string(),
            first_name: "Player".to_string(),
            last_name: id.to_string(),
            position: position.to_string(),
            team: "SF".to_string(),
            age: Some(age),
            years_exp: Some(years_exp),
            ..SleeperPlayer::default()
        }
    }

    fn service(players: Vec<SleeperPlayer>) -> (Arc<FixedSource>, AnalyticsService<Arc<FixedSource>>) {
        let source = Arc::new(FixedSource {
            players: players.into_iter().map(|p| (p.player_id.clone(), p)).collect(),
            fetches: AtomicUsize::new(0),
        });
        let cache = PlayerCache::new(Arc::clone(&source), CacheConfig::default());
        let service = AnalyticsService::new(cache, ScoringTables::default()).with_reference_year(2025);
        (source, service)
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_analyze_player() {
        let (source, service) = service(vec![player("4034", "RB", 22, 0)]);

        let analytics = service.analyze_player("4034").await.unwrap();
        assert_eq!(analytics.name, "Player 4034");
        assert_eq!(analytics.projected_points, 158.0);
        assert_eq!(analytics.bye_week, 9);

        assert!(service.analyze_player("missing").await.is_none());
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_require_player_reports_missing_id() {
        let (_, service) = service(vec![]);
        let err = service.require_player("missing").await.unwrap_err();
        assert!(matches!(err, ScoringError::PlayerNotFound { .. }));
    }

    #[tokio::test]
    async fn test_analysis_is_deterministic() {
        let (_, service) = service(vec![player("1", "WR", 29, 6), player("2", "TE", 31, 10)]);

        let first = service.analyze_trade(&ids(&["1"]), &ids(&["2"])).await;
        let second = service.analyze_trade(&ids(&["1"]), &ids(&["2"])).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_analyze_roster_skips_unknown_ids() {
        let (_, service) = service(vec![player("1", "QB", 28, 6), player("2", "WR", 24, 1)]);
        let roster = SleeperRoster {
            roster_id: 5,
            players: ids(&["1", "2", "ghost"]),
            starters: ids(&["1", "ghost"]),
            settings: json!({"wins": 4, "losses": 1}),
            ..SleeperRoster::default()
        };
        let league = SleeperLeague { league_id: "L1".to_string(), ..SleeperLeague::default() };

        let analytics = service.analyze_roster(&roster, &league, "Gridiron Guru").await;
        assert_eq!(analytics.roster_id, 5);
        assert_eq!(analytics.owner_name, "Gridiron Guru");
        assert_eq!(analytics.strength_by_position.len(), 2);
        assert_eq!(analytics.playoff_odds, 80);
        assert_eq!(analytics.championship_odds, 24);
        assert_eq!(analytics.start_sit_recommendations.start, vec!["Player 1"]);
        assert_eq!(analytics.start_sit_recommendations.flex, vec!["Player 2"]);
    }

    #[tokio::test]
    async fn test_analyze_matchup_pairs_records() {
        let (_, service) = service(vec![player("1", "QB", 28, 6), player("2", "QB", 28, 6)]);
        let matchups = vec![
            SleeperMatchup { roster_id: 1, matchup_id: Some(3), starters: ids(&["1"]), ..SleeperMatchup::default() },
            SleeperMatchup { roster_id: 2, matchup_id: None, starters: ids(&["2"]), ..SleeperMatchup::default() },
            SleeperMatchup { roster_id: 4, matchup_id: Some(3), starters: ids(&["2"]), ..SleeperMatchup::default() },
        ];

        let analytics = service.analyze_matchup(&matchups, 6).await;
        assert_eq!(analytics.len(), 1);
        assert_eq!(analytics[0].matchup_id, 3);
        assert_eq!(analytics[0].team1.roster_id, 1);
        assert_eq!(analytics[0].team2.roster_id, 4);
        assert_eq!(analytics[0].closeness_rating, 100);
        assert_eq!(analytics[0].upset_potential, 50);
    }

    #[tokio::test]
    async fn test_analyze_league_placeholder() {
        let (_, service) = service(vec![]);
        let league = SleeperLeague { league_id: "L9".to_string(), ..SleeperLeague::default() };

        let analytics = service.analyze_league(&league).await;
        assert_eq!(analytics.league_id, "L9");
        assert_eq!(analytics.competitiveness, 75);
    }
}
