use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::error;

use clicktrack_core::{config::Config, store::TrackerStore};
use clicktrack_duckdb::DuckDbBackend;

/// Shared application state injected into every Axum handler via
/// [`axum::extract::State`].
pub struct AppState {
    /// Storage backend. DuckDB in production, anything implementing
    /// [`TrackerStore`] in tests.
    pub store: Arc<dyn TrackerStore>,

    /// Parsed configuration, loaded once at startup from environment variables.
    pub config: Arc<Config>,

    /// Campaign ids already seen on the ingest path.
    ///
    /// Filled lazily on the first ping for a campaign. Campaigns are never
    /// deleted, so entries are never evicted.
    campaign_cache: RwLock<HashSet<i64>>,
}

impl AppState {
    pub fn new(db: DuckDbBackend, config: Config) -> Self {
        Self::from_store(Arc::new(db), config)
    }

    pub fn from_store(store: Arc<dyn TrackerStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
            campaign_cache: RwLock::new(HashSet::new()),
        }
    }

    /// Return `true` if `campaign_id` exists.
    ///
    /// Checks the in-process cache first; on a miss falls back to the store
    /// and remembers positive answers. A failed lookup is reported as an error
    /// so the handler answers 500 rather than 404.
    pub async fn is_known_campaign(&self, campaign_id: i64) -> anyhow::Result<bool> {
        {
            let cache = self.campaign_cache.read().await;
            if cache.contains(&campaign_id) {
                return Ok(true);
            }
        }

        match self.store.campaign_exists(campaign_id).await {
            Ok(true) => {
                self.campaign_cache.write().await.insert(campaign_id);
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(e) => {
                error!(campaign_id, error = %e, "campaign_exists lookup failed");
                Err(e)
            }
        }
    }
}
