use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use crate::traits::MetadataProvider;
use crate::types::TokenMetadata;

use super::moralis::prefix;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct DexScreenerResponse {
    pairs: Option<Vec<DexPair>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DexPair {
    base_token: Option<DexToken>,
    quote_token: Option<DexToken>,
}

#[derive(Debug, Deserialize)]
struct DexToken {
    address: Option<String>,
    name: Option<String>,
    symbol: Option<String>,
}

/// DexScreener metadata provider; keyless, used as the fallback after
/// Moralis.
pub struct DexScreenerProvider {
    client: reqwest::Client,
}

impl DexScreenerProvider {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for DexScreenerProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetadataProvider for DexScreenerProvider {
    fn name(&self) -> &'static str {
        "dexscreener"
    }

    async fn lookup(&self, contract_address: &str) -> Result<Option<TokenMetadata>> {
        let url = format!(
            "https://api.dexscreener.com/latest/dex/tokens/{}",
            contract_address
        );
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Ok(None);
        }

        let data: DexScreenerResponse = response.json().await?;
        let pair = match data.pairs.as_ref().and_then(|pairs| pairs.first()) {
            Some(pair) => pair,
            None => return Ok(None),
        };

        // Prefer whichever side of the pair matches the queried address.
        let base_matches = pair
            .base_token
            .as_ref()
            .and_then(|t| t.address.as_deref())
            .map(|a| a == contract_address)
            .unwrap_or(false);
        let token = if base_matches {
            pair.base_token.as_ref()
        } else {
            pair.quote_token.as_ref()
        };

        let token = match token {
            Some(token) => token,
            None => return Ok(None),
        };

        Ok(Some(TokenMetadata {
            name: token
                .name
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| format!("Token {}", prefix(contract_address, 4))),
            symbol: token
                .symbol
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "UNK".to_string()),
            logo: None,
            decimals: None,
            mint: contract_address.to_string(),
        }))
    }
}
