use anyhow::Result;
use async_trait::async_trait;

use crate::types::TokenMetadata;

/// Best-effort external token-metadata source.
///
/// `Ok(None)` means the provider has no data for the address; errors are
/// treated the same way by the resolver, so a failing provider never blocks
/// submission creation.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Human-readable provider name for logging.
    fn name(&self) -> &'static str;

    /// Look up metadata for a contract address.
    async fn lookup(&self, contract_address: &str) -> Result<Option<TokenMetadata>>;
}
