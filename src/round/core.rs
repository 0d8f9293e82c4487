use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::{info, warn};

use crate::error::Result;
use crate::roundstore::RoundStoreVariant;
use crate::store::StoreVariant;
use crate::traits::{RoundStore, SubmissionStore};
use crate::types::{
    NewPumpHistory, RoundDto, RoundPhase, RoundState, Submission, TiebreakCandidate,
};

/// Result of advancing the round past a phase boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// A winner was recorded and a fresh voting phase started.
    Picked,
    /// Multiple submissions tied at the top; entered the tie-break phase.
    Tiebreak,
    /// No submissions existed; reset to a fresh voting phase.
    NoSubmissions,
}

/// The round lifecycle state machine.
///
/// Owns its timing state exclusively; reads but does not own submissions and
/// votes; sole writer of pump history and sole invoker of the store's
/// reset-all-votes operation. Callers serialize access (one mutex around the
/// service); a transition runs to completion under that lock.
pub struct RoundService {
    state: RoundState,
    store: Arc<StoreVariant>,
    round_store: RoundStoreVariant,
    voting_duration_secs: u64,
    tiebreak_duration_secs: u64,
}

impl RoundService {
    /// Restore persisted round state or start a fresh voting phase.
    ///
    /// A persisted state whose voting window has already elapsed collapses
    /// to a fresh voting phase: a restart during an elapsed round forfeits
    /// that round's resolution. State is persisted once at startup either
    /// way.
    pub fn load_or_init(
        round_store: RoundStoreVariant,
        store: Arc<StoreVariant>,
        voting_duration_secs: u64,
        tiebreak_duration_secs: u64,
        now_ms: u64,
    ) -> anyhow::Result<Self> {
        let state = match round_store.load()? {
            None => RoundState::fresh_voting(now_ms, voting_duration_secs),
            Some(prior) => {
                if now_ms >= prior.voting_end_ms() {
                    info!("Persisted round window already elapsed, starting fresh");
                    RoundState::fresh_voting(now_ms, voting_duration_secs)
                } else {
                    prior
                }
            }
        };
        round_store.save(&state)?;

        Ok(Self {
            state,
            store,
            round_store,
            voting_duration_secs,
            tiebreak_duration_secs,
        })
    }

    pub fn phase(&self) -> RoundPhase {
        self.state.phase
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Whole seconds left in the voting window, floored at zero.
    pub fn voting_remaining_secs(&self, now_ms: u64) -> u64 {
        self.state.voting_end_ms().saturating_sub(now_ms) / 1000
    }

    /// Whole seconds left in the tie-break window; zero outside tie-break.
    pub fn tiebreak_remaining_secs(&self, now_ms: u64) -> u64 {
        match (self.state.phase, self.state.tiebreak_end_ms) {
            (RoundPhase::Tiebreak, Some(end_ms)) => end_ms.saturating_sub(now_ms) / 1000,
            _ => 0,
        }
    }

    /// Advance the round if the current phase's window has elapsed.
    ///
    /// Callable both from request handlers ("tick on read") and from the
    /// background ticker, so correctness does not depend on traffic
    /// arriving. Returns `None` when nothing was due.
    pub async fn advance_if_due(&mut self, now_ms: u64) -> Result<Option<RoundOutcome>> {
        match self.state.phase {
            RoundPhase::Voting if now_ms >= self.state.voting_end_ms() => {
                let outcome = self.finalize_voting(now_ms).await?;
                Ok(Some(outcome))
            }
            RoundPhase::Tiebreak
                if self.state.tiebreak_end_ms.map_or(true, |end| now_ms >= end) =>
            {
                self.resolve_tiebreak(now_ms).await?;
                Ok(Some(RoundOutcome::Picked))
            }
            _ => Ok(None),
        }
    }

    /// Close the voting window: pick the top submission, or enter tie-break
    /// when several share the top vote count.
    pub async fn finalize_voting(&mut self, now_ms: u64) -> Result<RoundOutcome> {
        let submissions = self.store.list_submissions().await?;
        if submissions.is_empty() {
            info!("Voting ended with no submissions, restarting round");
            self.commit(self.fresh_voting(now_ms))?;
            return Ok(RoundOutcome::NoSubmissions);
        }

        // list_submissions is ordered by votes descending.
        let top_votes = submissions[0].votes;
        let tied: Vec<&Submission> = submissions
            .iter()
            .filter(|s| s.votes == top_votes)
            .collect();

        if tied.len() <= 1 {
            let winner = &submissions[0];
            info!(
                "Voting ended, winner {} ({} votes)",
                winner.contract_address, winner.votes
            );
            self.record_winner(
                &winner.id,
                winner
                    .token_name
                    .clone()
                    .unwrap_or_else(|| synthesized_name(&winner.contract_address)),
                winner
                    .token_symbol
                    .clone()
                    .unwrap_or_else(|| "UNK".to_string()),
                &winner.contract_address,
                winner.votes,
            )
            .await?;
            self.store.reset_all_votes().await?;
            self.commit(self.fresh_voting(now_ms))?;
            return Ok(RoundOutcome::Picked);
        }

        // Freeze the tied candidates; the snapshot is never recomputed from
        // live vote data for the duration of the tie-break.
        let candidates: Vec<TiebreakCandidate> = tied
            .iter()
            .map(|s| TiebreakCandidate {
                id: s.id.clone(),
                name: s
                    .token_name
                    .clone()
                    .unwrap_or_else(|| synthesized_name(&s.contract_address)),
                symbol: s.token_symbol.clone().unwrap_or_else(|| "UNK".to_string()),
                address: s.contract_address.clone(),
                votes: s.votes,
            })
            .collect();
        info!(
            "Voting ended in a {}-way tie at {} votes, entering tie-break",
            candidates.len(),
            top_votes
        );

        let next = RoundState {
            phase: RoundPhase::Tiebreak,
            voting_start_ms: self.state.voting_start_ms,
            voting_duration_secs: self.state.voting_duration_secs,
            tiebreak_end_ms: Some(now_ms + self.tiebreak_duration_secs * 1000),
            tiebreak_candidates: Some(candidates),
        };
        self.commit(next)?;
        Ok(RoundOutcome::Tiebreak)
    }

    /// Pick one tie-break candidate uniformly at random, record it, and
    /// restart the round.
    pub async fn resolve_tiebreak(&mut self, now_ms: u64) -> Result<()> {
        let candidates = self.state.tiebreak_candidates.clone().unwrap_or_default();
        let winner = match candidates.choose(&mut rand::thread_rng()) {
            Some(winner) => winner.clone(),
            None => {
                // Degenerate state; reset rather than crash.
                warn!("Tie-break with empty candidate snapshot, restarting round");
                self.commit(self.fresh_voting(now_ms))?;
                return Ok(());
            }
        };

        info!(
            "Tie-break resolved, winner {} ({} votes)",
            winner.address, winner.votes
        );
        self.record_winner(
            &winner.id,
            winner.name.clone(),
            winner.symbol.clone(),
            &winner.address,
            winner.votes,
        )
        .await?;
        self.store.reset_all_votes().await?;
        self.commit(self.fresh_voting(now_ms))?;
        Ok(())
    }

    /// Read-only projection for polling clients.
    pub fn to_dto(&self, now_ms: u64) -> RoundDto {
        match self.state.phase {
            RoundPhase::Voting => RoundDto::Voting {
                remaining_seconds: self.voting_remaining_secs(now_ms),
                voting_start_ms: self.state.voting_start_ms,
                voting_end_ms: self.state.voting_end_ms(),
            },
            RoundPhase::Tiebreak => RoundDto::Tiebreak {
                remaining_seconds: self.tiebreak_remaining_secs(now_ms),
                tiebreak_end_ms: self.state.tiebreak_end_ms.unwrap_or(0),
                candidates: self.state.tiebreak_candidates.clone().unwrap_or_default(),
            },
        }
    }

    fn fresh_voting(&self, now_ms: u64) -> RoundState {
        RoundState::fresh_voting(now_ms, self.voting_duration_secs)
    }

    /// Persist `next`, then commit it to memory. In-memory state is only
    /// replaced after a successful save so memory and disk never diverge; a
    /// failed save aborts the transition and the next tick retries it.
    fn commit(&mut self, next: RoundState) -> Result<()> {
        self.round_store.save(&next)?;
        self.state = next;
        Ok(())
    }

    async fn record_winner(
        &self,
        submission_id: &str,
        token_name: String,
        token_symbol: String,
        contract_address: &str,
        votes: u64,
    ) -> Result<()> {
        self.store
            .record_pump_history(NewPumpHistory {
                submission_id: submission_id.to_string(),
                token_name,
                token_symbol: Some(token_symbol),
                contract_address: contract_address.to_string(),
                amount_pumped: "0".to_string(),
                votes,
                price_impact: None,
                transaction_hash: None,
            })
            .await?;
        Ok(())
    }
}

/// Display name synthesized from the address prefix when no token name is
/// known.
pub fn synthesized_name(contract_address: &str) -> String {
    let prefix: String = contract_address.chars().take(6).collect();
    format!("Token {}", prefix)
}
