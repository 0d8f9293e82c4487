pub mod dexscreener;
pub mod mock;
pub mod moralis;
pub mod noop;
pub mod variant;

pub use dexscreener::DexScreenerProvider;
pub use mock::MockProvider;
pub use moralis::MoralisProvider;
pub use noop::NoopProvider;
pub use variant::MetadataProviderVariant;

use tracing::{debug, warn};

use crate::config::{BaseConfig, MetadataType};
use crate::traits::MetadataProvider;
use crate::types::TokenMetadata;

/// Best-effort token-metadata lookup over an ordered provider chain.
///
/// The first provider returning data wins; provider errors are logged and
/// treated as a miss, so lookup failure is fully recovered here and never
/// surfaced to the submitter.
pub struct MetadataResolver {
    providers: Vec<MetadataProviderVariant>,
}

impl MetadataResolver {
    pub fn new(providers: Vec<MetadataProviderVariant>) -> Self {
        Self { providers }
    }

    pub fn from_config(config: &BaseConfig) -> Self {
        match config.metadata {
            MetadataType::Live => Self::new(vec![
                MetadataProviderVariant::Moralis(MoralisProvider::new(
                    config.moralis_api_key.clone(),
                )),
                MetadataProviderVariant::DexScreener(DexScreenerProvider::new()),
            ]),
            MetadataType::Noop => Self::new(vec![MetadataProviderVariant::Noop(NoopProvider)]),
        }
    }

    /// Resolve metadata for a contract address, trying providers in order.
    pub async fn resolve(&self, contract_address: &str) -> Option<TokenMetadata> {
        for provider in &self.providers {
            match provider.lookup(contract_address).await {
                Ok(Some(metadata)) => {
                    debug!(
                        "Resolved metadata for {} via {}",
                        contract_address,
                        provider.name()
                    );
                    return Some(metadata);
                }
                Ok(None) => continue,
                Err(e) => {
                    warn!(
                        "Metadata lookup via {} failed for {}: {}",
                        provider.name(),
                        contract_address,
                        e
                    );
                }
            }
        }
        None
    }
}
