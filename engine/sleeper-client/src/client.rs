//! Sleeper API integration

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::SleeperConfig;
use crate::types::*;
use crate::{Result, SleeperError};

/// Sleeper API client
///
/// Every endpoint is a plain GET. A non-success status becomes `None` or an
/// empty list rather than an error; only transport and decode failures are
/// returned as [`SleeperError`]. There is no retry or backoff.
#[derive(Debug, Clone)]
pub struct SleeperClient {
    config: SleeperConfig,
    client: Client,
}

impl SleeperClient {
    /// Create a new Sleeper API client
    pub fn new(config: SleeperConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &SleeperConfig {
        &self.config
    }

    /// GET `path` and decode the body, mapping a non-success status or a
    /// JSON `null` body to `None`
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let url = format!("{}{}", self.config.api_base_url, path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("Sleeper API returned {} for {}", status, path);
            return Ok(None);
        }

        let body = response.text().await?;
        serde_json::from_str::<Option<T>>(&body)
            .map_err(|source| SleeperError::Decode { endpoint: path.to_string(), source })
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        Ok(self.get_json::<Vec<T>>(path).await?.unwrap_or_default())
    }

    /// Look up a user by username or user id
    pub async fn get_user(&self, username_or_id: &str) -> Result<Option<SleeperUser>> {
        self.get_json(&format!("/user/{username_or_id}")).await
    }

    /// Get a user's NFL leagues for a season
    pub async fn get_user_leagues(&self, user_id: &str, season: &str) -> Result<Vec<SleeperLeague>> {
        let leagues: Vec<SleeperLeague> =
            self.get_list(&format!("/user/{user_id}/leagues/nfl/{season}")).await?;
        info!("Found {} leagues for user {} in season {}", leagues.len(), user_id, season);
        Ok(leagues)
    }

    pub async fn get_league(&self, league_id: &str) -> Result<Option<SleeperLeague>> {
        self.get_json(&format!("/league/{league_id}")).await
    }

    pub async fn get_rosters(&self, league_id: &str) -> Result<Vec<SleeperRoster>> {
        self.get_list(&format!("/league/{league_id}/rosters")).await
    }

    pub async fn get_league_users(&self, league_id: &str) -> Result<Vec<SleeperUser>> {
        self.get_list(&format!("/league/{league_id}/users")).await
    }

    /// Get all matchup entries for a week
    pub async fn get_matchups(&self, league_id: &str, week: u32) -> Result<Vec<SleeperMatchup>> {
        self.get_list(&format!("/league/{league_id}/matchups/{week}")).await
    }

    pub async fn get_transactions(
        &self,
        league_id: &str,
        week: u32,
    ) -> Result<Vec<SleeperTransaction>> {
        self.get_list(&format!("/league/{league_id}/transactions/{week}")).await
    }

    pub async fn get_traded_picks(&self, league_id: &str) -> Result<Vec<SleeperDraftPick>> {
        self.get_list(&format!("/league/{league_id}/traded_picks")).await
    }

    pub async fn get_playoff_bracket(
        &self,
        league_id: &str,
        kind: BracketKind,
    ) -> Result<Vec<SleeperPlayoffBracket>> {
        self.get_list(&format!("/league/{league_id}/{}_bracket", kind.as_str())).await
    }

    /// Get current NFL state
    pub async fn get_nfl_state(&self) -> Result<Option<NflState>> {
        self.get_json("/state/nfl").await
    }

    /// Fetch the full player directory, keyed by player id
    ///
    /// This is a large payload (several MB); callers are expected to cache it.
    pub async fn get_players(&self) -> Result<Option<HashMap<String, SleeperPlayer>>> {
        info!("Fetching full NFL player directory");
        let players: Option<HashMap<String, SleeperPlayer>> =
            self.get_json("/players/nfl").await?;
        if let Some(players) = &players {
            info!("Fetched {} players", players.len());
        }
        Ok(players)
    }

    pub async fn get_trending_players(
        &self,
        kind: TrendKind,
        lookback_hours: u32,
        limit: u32,
    ) -> Result<Vec<SleeperTrendingPlayer>> {
        self.get_list(&format!(
            "/players/nfl/trending/{kind}?lookback_hours={lookback_hours}&limit={limit}"
        ))
        .await
    }

    /// Health check for Sleeper API
    pub async fn health_check(&self) -> Result<()> {
        let url = format!("{}/state/nfl", self.config.api_base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(SleeperError::SleeperApiError {
                message: format!("Health check failed: {}", response.status()),
            });
        }

        Ok(())
    }

    /// Full-size avatar URL
    pub fn avatar_url(&self, avatar_id: &str) -> String {
        format!("{}/avatars/{}", self.config.cdn_base_url, avatar_id)
    }

    /// Thumbnail avatar URL
    pub fn avatar_thumb_url(&self, avatar_id: &str) -> String {
        format!("{}/avatars/thumbs/{}", self.config.cdn_base_url, avatar_id)
    }
}
