use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Submission-store backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreType {
    /// In-memory maps; state is lost on restart.
    Memory,
    /// RocksDB under `{data_dir}/store`.
    Rocks,
}

/// Token-metadata resolver selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataType {
    /// Moralis first, DexScreener as keyless fallback.
    Live,
    /// No external lookups; callers fall back to submitted/synthesized data.
    Noop,
}

/// Base configuration for the service, parsed from CLI arguments.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "pumpvote", about = "Community token-pump voting service")]
pub struct BaseConfig {
    /// Address to bind the HTTP API to.
    #[arg(long, default_value = "127.0.0.1:5000")]
    pub bind_addr: String,

    /// Directory for durable state (round snapshot, RocksDB store).
    #[arg(long, default_value = "./data")]
    pub data_dir: String,

    /// Submission-store backend.
    #[arg(long, value_enum, default_value = "memory")]
    pub store: StoreType,

    /// Token-metadata resolver backend.
    #[arg(long, value_enum, default_value = "live")]
    pub metadata: MetadataType,

    /// Duration of the voting window in seconds.
    #[arg(long, default_value_t = 600)]
    pub voting_duration_secs: u64,

    /// Duration of the tie-break window in seconds.
    #[arg(long, default_value_t = 15)]
    pub tiebreak_duration_secs: u64,

    /// Per-(submission, voter) vote cooldown in seconds.
    #[arg(long, default_value_t = 10)]
    pub vote_cooldown_secs: u64,

    /// Interval of the background round ticker in milliseconds.
    #[arg(long, default_value_t = 1000)]
    pub tick_interval_ms: u64,

    /// Moralis API key for token-metadata lookups.
    #[arg(long, env = "MORALIS_API_KEY")]
    pub moralis_api_key: Option<String>,
}

impl Default for BaseConfig {
    fn default() -> Self {
        BaseConfig {
            bind_addr: "127.0.0.1:5000".to_string(),
            data_dir: "./data".to_string(),
            store: StoreType::Memory,
            metadata: MetadataType::Live,
            voting_duration_secs: 600,
            tiebreak_duration_secs: 15,
            vote_cooldown_secs: 10,
            tick_interval_ms: 1000,
            moralis_api_key: None,
        }
    }
}
