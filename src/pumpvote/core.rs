//! Application context and initialization - no request logic.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::config::{BaseConfig, StoreType};
use crate::metadata::MetadataResolver;
use crate::ratelimit::RateLimiter;
use crate::round::RoundService;
use crate::roundstore::{FileRoundStore, RoundStoreVariant};
use crate::store::{MemoryStore, RocksStore, StoreVariant};
use crate::traits::SubmissionStore;
use crate::types::now_ms;

/// Explicitly constructed, explicitly owned dependencies shared by request
/// handlers and background tasks. No module-level singletons.
pub struct AppContext {
    pub config: BaseConfig,
    pub store: Arc<StoreVariant>,
    pub round: Arc<tokio::sync::Mutex<RoundService>>,
    pub limiter: RateLimiter,
    pub metadata: MetadataResolver,
}

/// Main application: owns the context and the task lifecycle.
pub struct PumpVote {
    pub ctx: Arc<AppContext>,
}

impl PumpVote {
    /// Build all backends from configuration and restore round state.
    pub fn initialize(config: BaseConfig) -> Result<Self> {
        let store = match config.store {
            StoreType::Memory => StoreVariant::Memory(MemoryStore::new()),
            StoreType::Rocks => {
                let path = format!("{}/store", config.data_dir);
                StoreVariant::Rocks(RocksStore::open(&path)?)
            }
        };
        info!("Submission store: {}", store.name());
        let store = Arc::new(store);

        let round_store = RoundStoreVariant::File(FileRoundStore::new(&config.data_dir));
        let round = RoundService::load_or_init(
            round_store,
            Arc::clone(&store),
            config.voting_duration_secs,
            config.tiebreak_duration_secs,
            now_ms(),
        )?;
        info!(
            "Round state restored (phase={:?}, voting_duration_secs={})",
            round.phase(),
            config.voting_duration_secs
        );

        let ctx = AppContext {
            limiter: RateLimiter::new(config.vote_cooldown_secs),
            metadata: MetadataResolver::from_config(&config),
            store,
            round: Arc::new(tokio::sync::Mutex::new(round)),
            config,
        };

        Ok(Self { ctx: Arc::new(ctx) })
    }
}
