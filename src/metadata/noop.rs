use anyhow::Result;
use async_trait::async_trait;

use crate::traits::MetadataProvider;
use crate::types::TokenMetadata;

/// Provider that never resolves anything; callers fall back to submitted or
/// synthesized token display data.
pub struct NoopProvider;

#[async_trait]
impl MetadataProvider for NoopProvider {
    fn name(&self) -> &'static str {
        "noop-metadata"
    }

    async fn lookup(&self, _contract_address: &str) -> Result<Option<TokenMetadata>> {
        Ok(None)
    }
}
