//! Request operations, independent of the HTTP transport.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::round::core::synthesized_name;
use crate::traits::SubmissionStore;
use crate::types::{now_ms, NewSubmission, StatsDto, Submission};

use super::core::AppContext;

/// Static placeholder for the pump pool until real-asset integration lands.
const TOTAL_POOL_PLACEHOLDER: f64 = 12.4;

/// Where the created submission's display data came from.
#[derive(Debug, Clone, Serialize)]
pub struct MetadataSourceTag {
    pub source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// Created submission plus the provenance of its token metadata.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionResponse {
    #[serde(flatten)]
    pub submission: Submission,
    pub metadata: MetadataSourceTag,
}

/// Validate and normalize a contract address (Solana-style base58).
pub fn validate_contract_address(raw: &str) -> Result<String> {
    const BASE58: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

    let address = raw.trim();
    if address.is_empty() {
        return Err(Error::Validation {
            message: "contractAddress is required".to_string(),
        });
    }
    if !(32..=44).contains(&address.len()) {
        return Err(Error::Validation {
            message: "contractAddress must be 32-44 characters".to_string(),
        });
    }
    if !address.chars().all(|c| BASE58.contains(c)) {
        return Err(Error::Validation {
            message: "contractAddress must be base58".to_string(),
        });
    }
    Ok(address.to_string())
}

/// Create a submission: validate, reject duplicates, resolve metadata with
/// fallback, persist.
///
/// Metadata lookup happens before the record is persisted and holds no lock;
/// its failure falls back silently to caller-supplied or synthesized display
/// data.
pub async fn create_submission_once(
    ctx: &AppContext,
    req: NewSubmission,
) -> Result<SubmissionResponse> {
    let contract_address = validate_contract_address(&req.contract_address)?;

    if let Some(existing) = ctx.store.find_by_address(&contract_address).await? {
        return Err(Error::DuplicateAddress {
            submission_id: existing.id,
        });
    }

    let resolved = ctx.metadata.resolve(&contract_address).await;

    let token_name = resolved
        .as_ref()
        .map(|m| m.name.clone())
        .or(req.token_name)
        .unwrap_or_else(|| synthesized_name(&contract_address));
    let token_symbol = resolved
        .as_ref()
        .map(|m| m.symbol.clone())
        .or(req.token_symbol)
        .unwrap_or_else(|| "UNK".to_string());

    let submission = ctx
        .store
        .create_submission(NewSubmission {
            contract_address,
            token_name: Some(token_name),
            token_symbol: Some(token_symbol),
            submitted_by: req.submitted_by,
        })
        .await?;

    let metadata = match resolved {
        Some(m) => MetadataSourceTag {
            source: "api",
            logo: m.logo,
        },
        None => MetadataSourceTag {
            source: "fallback",
            logo: None,
        },
    };

    Ok(SubmissionResponse {
        submission,
        metadata,
    })
}

/// Cast a vote: existence check, duplicate-vote gate (identity-supplied
/// only), rate-limit gate, insert, recount, write the count back.
///
/// The recount reads strictly after the inserted vote within this operation,
/// so the cached projection always equals the number of Vote records.
pub async fn cast_vote_once(
    ctx: &AppContext,
    submission_id: &str,
    voter_address: Option<String>,
) -> Result<u64> {
    if ctx.store.find_submission(submission_id).await?.is_none() {
        return Err(Error::NotFound {
            message: "submission not found".to_string(),
        });
    }

    let voter = voter_address.filter(|v| !v.trim().is_empty());

    // Duplicate votes are permanent, so check them before consuming the
    // cooldown. Anonymous voting bypasses this check by design.
    if let Some(voter) = voter.as_deref() {
        if ctx.store.has_voted(submission_id, voter).await? {
            return Err(Error::DuplicateVote);
        }
    }

    ctx.limiter
        .try_acquire(submission_id, voter.as_deref(), now_ms())
        .map_err(|retry_after_seconds| Error::RateLimited {
            retry_after_seconds,
        })?;

    ctx.store.record_vote(submission_id, voter).await?;
    let vote_count = ctx.store.votes_for(submission_id).await?.len() as u64;
    ctx.store
        .update_vote_count(submission_id, vote_count)
        .await?;

    Ok(vote_count)
}

/// Aggregate statistics across all submissions.
pub async fn stats_once(ctx: &AppContext) -> Result<StatsDto> {
    let submissions = ctx.store.list_submissions().await?;
    let total_votes = submissions.iter().map(|s| s.votes).sum();
    Ok(StatsDto {
        total_pool: TOTAL_POOL_PLACEHOLDER,
        total_votes,
        submission_count: submissions.len(),
    })
}
