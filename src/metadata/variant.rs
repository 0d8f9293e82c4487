use anyhow::Result;
use async_trait::async_trait;

use crate::traits::MetadataProvider;
use crate::types::TokenMetadata;

use super::{DexScreenerProvider, MockProvider, MoralisProvider, NoopProvider};

/// Enum representing all metadata-provider backends.
pub enum MetadataProviderVariant {
    Moralis(MoralisProvider),
    DexScreener(DexScreenerProvider),
    Noop(NoopProvider),
    Mock(MockProvider),
}

#[async_trait]
impl MetadataProvider for MetadataProviderVariant {
    fn name(&self) -> &'static str {
        match self {
            MetadataProviderVariant::Moralis(inner) => inner.name(),
            MetadataProviderVariant::DexScreener(inner) => inner.name(),
            MetadataProviderVariant::Noop(inner) => inner.name(),
            MetadataProviderVariant::Mock(inner) => inner.name(),
        }
    }

    async fn lookup(&self, contract_address: &str) -> Result<Option<TokenMetadata>> {
        match self {
            MetadataProviderVariant::Moralis(inner) => inner.lookup(contract_address).await,
            MetadataProviderVariant::DexScreener(inner) => inner.lookup(contract_address).await,
            MetadataProviderVariant::Noop(inner) => inner.lookup(contract_address).await,
            MetadataProviderVariant::Mock(inner) => inner.lookup(contract_address).await,
        }
    }
}
