use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sleeper_client::SleeperPlayer;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Player directory keyed by Sleeper player id
pub type PlayerMap = HashMap<String, SleeperPlayer>;

pub const DEFAULT_PLAYER_TTL_SECS: i64 = 24 * 60 * 60;

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long a fetched player directory stays fresh
    pub player_ttl_secs: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { player_ttl_secs: DEFAULT_PLAYER_TTL_SECS }
    }
}

impl CacheConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(ttl) = std::env::var("PLAYER_CACHE_TTL_SECS") {
            config.player_ttl_secs = ttl
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid PLAYER_CACHE_TTL_SECS: {ttl}"))?;
        }

        Ok(config)
    }

    pub fn player_ttl(&self) -> Duration {
        Duration::seconds(self.player_ttl_secs)
    }
}

/// Immutable view of the player directory at one point in time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    players: PlayerMap,

    /// When the directory was fetched; `None` for a never-loaded cache
    fetched_at: Option<DateTime<Utc>>,
}

impl PlayerSnapshot {
    pub fn new(players: PlayerMap, fetched_at: DateTime<Utc>) -> Self {
        Self { players, fetched_at: Some(fetched_at) }
    }

    /// Snapshot that has never been loaded and is always stale
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from a list of players, keyed by their `player_id`
    pub fn from_players(players: Vec<SleeperPlayer>, fetched_at: DateTime<Utc>) -> Self {
        let players = players.into_iter().map(|p| (p.player_id.clone(), p)).collect();
        Self::new(players, fetched_at)
    }

    pub fn get(&self, player_id: &str) -> Option<&SleeperPlayer> {
        self.players.get(player_id)
    }

    pub fn players(&self) -> &PlayerMap {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    /// A snapshot is stale once strictly more than `ttl` has passed since it
    /// was fetched
    pub fn is_stale(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        match self.fetched_at {
            Some(fetched_at) => now - fetched_at > ttl,
            None => true,
        }
    }

    /// Search for players by partial name match
    pub fn search_players(&self, query: &str) -> Vec<&SleeperPlayer> {
        let query_lower = query.to_lowercase();
        let mut matches: Vec<&SleeperPlayer> = self
            .players
            .values()
            .filter(|player| player.display_name().to_lowercase().contains(&query_lower))
            .collect();
        matches.sort_by_cached_key(|player| {
            (player.search_rank.unwrap_or(u32::MAX), player.display_name(), player.player_id.clone())
        });
        matches
    }

    /// Load a previously saved directory from a JSON file
    pub async fn load_from_file<P: AsRef<Path>>(file_path: P) -> anyhow::Result<Self> {
        info!("Loading player snapshot from: {:?}", file_path.as_ref());

        let json_content = tokio::fs::read_to_string(&file_path).await?;
        let snapshot: PlayerSnapshot = serde_json::from_str(&json_content)?;

        info!("Loaded {} players from file", snapshot.len());
        Ok(snapshot)
    }

    /// Save the directory to a JSON file for offline use
    pub async fn save_to_file<P: AsRef<Path>>(&self, file_path: P) -> anyhow::Result<()> {
        let json = serde_json::to_string(self)?;
        tokio::fs::write(&file_path, json).await?;
        info!("Saved {} players to {:?}", self.len(), file_path.as_ref());
        Ok(())
    }
}

/// Result of one `initialize_data` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Snapshot was within its TTL, nothing fetched
    Fresh,

    /// Directory was re-fetched
    Refreshed { players: usize },

    /// Refresh failed; the previous snapshot (possibly empty) is still served
    KeptStale,
}
