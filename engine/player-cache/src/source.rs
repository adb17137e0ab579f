use async_trait::async_trait;
use sleeper_client::{NflState, SleeperClient};
use std::sync::Arc;

use crate::types::PlayerMap;

/// Where the cache gets its data from
///
/// Implemented for [`SleeperClient`]; tests supply in-memory sources.
#[async_trait]
pub trait PlayerSource: Send + Sync {
    /// Full player directory, `None` when the source has nothing to give
    async fn fetch_players(&self) -> sleeper_client::Result<Option<PlayerMap>>;

    async fn fetch_nfl_state(&self) -> sleeper_client::Result<Option<NflState>>;
}

#[async_trait]
impl PlayerSource for SleeperClient {
    async fn fetch_players(&self) -> sleeper_client::Result<Option<PlayerMap>> {
        self.get_players().await
    }

    async fn fetch_nfl_state(&self) -> sleeper_client::Result<Option<NflState>> {
        self.get_nfl_state().await
    }
}

#[async_trait]
impl<S: PlayerSource + ?Sized> PlayerSource for Arc<S> {
    async fn fetch_players(&self) -> sleeper_client::Result<Option<PlayerMap>> {
        (**self).fetch_players().await
    }

    async fn fetch_nfl_state(&self) -> sleeper_client::Result<Option<NflState>> {
        (**self).fetch_nfl_state().await
    }
}
