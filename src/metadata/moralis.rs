use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::traits::MetadataProvider;
use crate::types::TokenMetadata;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct MoralisTokenResponse {
    mint: Option<String>,
    name: Option<String>,
    symbol: Option<String>,
    logo: Option<String>,
    decimals: Option<String>,
}

/// Moralis Solana gateway metadata provider. Requires an API key; without
/// one every lookup is a miss so the chain falls through to the next
/// provider.
pub struct MoralisProvider {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl MoralisProvider {
    pub fn new(api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client, api_key }
    }
}

#[async_trait]
impl MetadataProvider for MoralisProvider {
    fn name(&self) -> &'static str {
        "moralis"
    }

    async fn lookup(&self, contract_address: &str) -> Result<Option<TokenMetadata>> {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => {
                debug!("No Moralis API key configured, skipping lookup");
                return Ok(None);
            }
        };

        let url = format!(
            "https://solana-gateway.moralis.io/token/mainnet/{}/metadata",
            contract_address
        );
        let response = self
            .client
            .get(&url)
            .header("X-API-Key", api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("Moralis API error: {}", response.status());
            return Ok(None);
        }

        let data: MoralisTokenResponse = response.json().await?;
        let fallback_name = || format!("Token {}", prefix(contract_address, 4));
        Ok(Some(TokenMetadata {
            name: data.name.filter(|n| !n.is_empty()).unwrap_or_else(fallback_name),
            symbol: data
                .symbol
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "UNK".to_string()),
            logo: data.logo,
            decimals: data.decimals,
            mint: data.mint.unwrap_or_else(|| contract_address.to_string()),
        }))
    }
}

pub(crate) fn prefix(address: &str, len: usize) -> String {
    address.chars().take(len).collect()
}
