use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::traits::MetadataProvider;
use crate::types::TokenMetadata;

/// Canned-response provider for tests.
#[derive(Default)]
pub struct MockProvider {
    response: Option<TokenMetadata>,
    fail: bool,
}

impl MockProvider {
    pub fn returning(metadata: TokenMetadata) -> Self {
        Self {
            response: Some(metadata),
            fail: false,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            fail: true,
        }
    }
}

#[async_trait]
impl MetadataProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock-metadata"
    }

    async fn lookup(&self, _contract_address: &str) -> Result<Option<TokenMetadata>> {
        if self.fail {
            return Err(anyhow!("mock metadata provider failure"));
        }
        Ok(self.response.clone())
    }
}
