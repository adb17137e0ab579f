use chrono::Utc;
use sleeper_client::{NflState, SleeperPlayer};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::source::PlayerSource;
use crate::types::{CacheConfig, PlayerSnapshot, RefreshOutcome};

struct CacheState {
    snapshot: Arc<PlayerSnapshot>,
    nfl_state: Option<NflState>,
}

/// Player Cache - the player directory plus the current NFL state
///
/// Readers take an `Arc` to the current snapshot and never wait on the
/// network. The lock is only held to swap pointers, so a refresh in flight
/// does not block readers. Overlapping refreshes are not coordinated; each
/// installs a complete snapshot and the last one wins.
pub struct PlayerCache<S> {
    source: S,
    config: CacheConfig,
    state: RwLock<CacheState>,
}

impl<S: PlayerSource> PlayerCache<S> {
    /// Create an empty cache; the first `initialize_data` call fetches
    pub fn new(source: S, config: CacheConfig) -> Self {
        Self::with_snapshot(source, config, PlayerSnapshot::empty())
    }

    /// Create a cache seeded with an existing snapshot
    ///
    /// No directory fetch happens until the snapshot's TTL lapses.
    pub fn with_snapshot(source: S, config: CacheConfig, snapshot: PlayerSnapshot) -> Self {
        Self {
            source,
            config,
            state: RwLock::new(CacheState { snapshot: Arc::new(snapshot), nfl_state: None }),
        }
    }

    /// Make sure the directory is fresh and refresh the NFL state
    ///
    /// A failed directory fetch leaves the previous snapshot in place. The
    /// NFL state is fetched on every call and becomes `None` if that fails.
    pub async fn initialize_data(&self) -> RefreshOutcome {
        let now = Utc::now();
        let stale = self.state.read().await.snapshot.is_stale(now, self.config.player_ttl());

        let outcome = if stale {
            match self.source.fetch_players().await {
                Ok(Some(players)) => {
                    let count = players.len();
                    let snapshot = Arc::new(PlayerSnapshot::new(players, now));
                    self.state.write().await.snapshot = snapshot;
                    info!("Player directory refreshed with {} players", count);
                    RefreshOutcome::Refreshed { players: count }
                }
                Ok(None) => {
                    warn!("Player directory unavailable, keeping cached snapshot");
                    RefreshOutcome::KeptStale
                }
                Err(e) => {
                    warn!("Player directory fetch failed, keeping cached snapshot: {}", e);
                    RefreshOutcome::KeptStale
                }
            }
        } else {
            debug!("Player directory still fresh");
            RefreshOutcome::Fresh
        };

        let nfl_state = match self.source.fetch_nfl_state().await {
            Ok(state) => state,
            Err(e) => {
                warn!("NFL state fetch failed: {}", e);
                None
            }
        };
        if let Some(state) = &nfl_state {
            debug!("NFL state: season {} week {} ({})", state.season, state.week, state.season_type);
        }
        self.state.write().await.nfl_state = nfl_state;

        outcome
    }

    /// Current snapshot; stays valid even if a refresh replaces it
    pub async fn snapshot(&self) -> Arc<PlayerSnapshot> {
        Arc::clone(&self.state.read().await.snapshot)
    }

    pub async fn nfl_state(&self) -> Option<NflState> {
        self.state.read().await.nfl_state.clone()
    }

    pub async fn get_player(&self, player_id: &str) -> Option<SleeperPlayer> {
        self.state.read().await.snapshot.get(player_id).cloned()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }
}
