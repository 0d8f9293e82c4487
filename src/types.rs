use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time as unix milliseconds.
///
/// All round timing is derived from stored timestamps against this clock,
/// never from decrementing counters, so it stays correct across restarts.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System time before UNIX_EPOCH")
        .as_millis() as u64
}

/// A candidate token entry competing for votes in the current round.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    /// Unique key across all submissions.
    pub contract_address: String,
    pub token_name: Option<String>,
    pub token_symbol: Option<String>,
    pub submitted_by: Option<String>,
    /// Cached projection of the Vote records referencing this submission,
    /// recomputed on every vote. Reset to 0 at round resolution.
    pub votes: u64,
    pub created_at: u64,
}

/// Input for creating a submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
    pub contract_address: String,
    #[serde(default)]
    pub token_name: Option<String>,
    #[serde(default)]
    pub token_symbol: Option<String>,
    #[serde(default)]
    pub submitted_by: Option<String>,
}

/// A single vote. Immutable once created; counting is derived by scanning
/// Vote records, never by incrementing a counter independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: String,
    pub submission_id: String,
    pub voter_address: Option<String>,
    pub created_at: u64,
}

/// Immutable record of a past round's resolved winner.
///
/// `submission_id` is a historical reference: the submission may later be
/// deleted without invalidating history, which is why the address is
/// denormalized here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PumpHistory {
    pub id: String,
    pub submission_id: String,
    pub token_name: String,
    pub token_symbol: Option<String>,
    pub contract_address: String,
    pub amount_pumped: String,
    pub votes: u64,
    /// Placeholder for unintegrated blockchain data.
    pub price_impact: Option<String>,
    /// Placeholder for unintegrated blockchain data.
    pub transaction_hash: Option<String>,
    pub created_at: u64,
}

/// Input for recording a pump-history entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPumpHistory {
    pub submission_id: String,
    pub token_name: String,
    pub token_symbol: Option<String>,
    pub contract_address: String,
    pub amount_pumped: String,
    pub votes: u64,
    pub price_impact: Option<String>,
    pub transaction_hash: Option<String>,
}

/// Phase of the round lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundPhase {
    Voting,
    Tiebreak,
}

/// Tied candidate frozen at tie-detection time. Not recomputed from live
/// vote data for the duration of the tie-break.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TiebreakCandidate {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub address: String,
    pub votes: u64,
}

/// Durable round-state singleton, persisted as a single JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundState {
    pub phase: RoundPhase,
    pub voting_start_ms: u64,
    pub voting_duration_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiebreak_end_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiebreak_candidates: Option<Vec<TiebreakCandidate>>,
}

impl RoundState {
    /// Fresh voting phase starting at `now_ms`.
    pub fn fresh_voting(now_ms: u64, voting_duration_secs: u64) -> Self {
        RoundState {
            phase: RoundPhase::Voting,
            voting_start_ms: now_ms,
            voting_duration_secs,
            tiebreak_end_ms: None,
            tiebreak_candidates: None,
        }
    }

    /// End of the voting window in unix milliseconds.
    pub fn voting_end_ms(&self) -> u64 {
        self.voting_start_ms + self.voting_duration_secs * 1000
    }
}

/// Read-only round projection for polling clients.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum RoundDto {
    #[serde(rename_all = "camelCase")]
    Voting {
        remaining_seconds: u64,
        voting_start_ms: u64,
        voting_end_ms: u64,
    },
    #[serde(rename_all = "camelCase")]
    Tiebreak {
        remaining_seconds: u64,
        tiebreak_end_ms: u64,
        candidates: Vec<TiebreakCandidate>,
    },
}

/// Token metadata as returned by external providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub logo: Option<String>,
    pub decimals: Option<String>,
    pub mint: String,
}

/// Aggregate statistics for the landing page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDto {
    /// Static placeholder in absence of real-asset integration.
    pub total_pool: f64,
    pub total_votes: u64,
    pub submission_count: usize,
}
