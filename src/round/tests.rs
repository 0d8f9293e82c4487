//! Unit tests for the round transition logic, on in-memory backends.

use std::sync::Arc;

use crate::roundstore::{MemoryRoundStore, RoundStoreVariant};
use crate::store::{MemoryStore, StoreVariant};
use crate::traits::SubmissionStore;
use crate::types::{NewSubmission, RoundDto, RoundPhase, RoundState, Submission, TiebreakCandidate};

use super::core::{synthesized_name, RoundOutcome, RoundService};

const VOTING_SECS: u64 = 600;
const TIEBREAK_SECS: u64 = 15;

fn memory_store() -> Arc<StoreVariant> {
    Arc::new(StoreVariant::Memory(MemoryStore::new()))
}

async fn seed_submission(
    store: &StoreVariant,
    address: &str,
    token_name: Option<&str>,
    votes: u64,
) -> Submission {
    let submission = store
        .create_submission(NewSubmission {
            contract_address: address.to_string(),
            token_name: token_name.map(String::from),
            token_symbol: token_name.map(|_| "TKN".to_string()),
            submitted_by: None,
        })
        .await
        .expect("seed submission");
    store
        .update_vote_count(&submission.id, votes)
        .await
        .expect("seed votes");
    submission
}

fn fresh_service(store: Arc<StoreVariant>, now_ms: u64) -> RoundService {
    RoundService::load_or_init(
        RoundStoreVariant::Memory(MemoryRoundStore::new()),
        store,
        VOTING_SECS,
        TIEBREAK_SECS,
        now_ms,
    )
    .expect("init round service")
}

#[tokio::test]
async fn finalize_with_clear_winner_records_history_and_restarts() {
    let store = memory_store();
    let a = seed_submission(&store, "AddrA111111111111111111111111111", Some("Alpha"), 5).await;
    seed_submission(&store, "AddrB222222222222222222222222222", Some("Beta"), 3).await;

    let now = 1_000_000;
    let mut service = fresh_service(Arc::clone(&store), now);
    let resolve_at = now + VOTING_SECS * 1000;

    let outcome = service.finalize_voting(resolve_at).await.expect("finalize");
    assert_eq!(outcome, RoundOutcome::Picked);

    // Exactly one history entry, referencing the winner.
    let history = store.list_pump_history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].submission_id, a.id);
    assert_eq!(history[0].token_name, "Alpha");
    assert_eq!(history[0].votes, 5);
    assert_eq!(history[0].amount_pumped, "0");
    assert!(history[0].price_impact.is_none());
    assert!(history[0].transaction_hash.is_none());

    // All vote counts reset; fresh voting phase starting at resolution time.
    for s in store.list_submissions().await.unwrap() {
        assert_eq!(s.votes, 0);
    }
    assert_eq!(service.phase(), RoundPhase::Voting);
    assert_eq!(service.state().voting_start_ms, resolve_at);
    assert_eq!(service.voting_remaining_secs(resolve_at), VOTING_SECS);
}

#[tokio::test]
async fn finalize_with_tie_freezes_top_candidates_only() {
    let store = memory_store();
    let a = seed_submission(&store, "AddrA111111111111111111111111111", Some("Alpha"), 5).await;
    let b = seed_submission(&store, "AddrB222222222222222222222222222", Some("Beta"), 5).await;
    seed_submission(&store, "AddrC333333333333333333333333333", Some("Gamma"), 3).await;

    let now = 1_000_000;
    let mut service = fresh_service(Arc::clone(&store), now);
    let resolve_at = now + VOTING_SECS * 1000;

    let outcome = service.finalize_voting(resolve_at).await.expect("finalize");
    assert_eq!(outcome, RoundOutcome::Tiebreak);
    assert_eq!(service.phase(), RoundPhase::Tiebreak);

    // Snapshot contains exactly the tied pair, never the third entry.
    let candidates = service
        .state()
        .tiebreak_candidates
        .clone()
        .expect("candidates frozen");
    let ids: Vec<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(candidates.len(), 2);
    assert!(ids.contains(&a.id.as_str()));
    assert!(ids.contains(&b.id.as_str()));

    // Remaining time at the transition instant equals the full window.
    assert_eq!(service.tiebreak_remaining_secs(resolve_at), TIEBREAK_SECS);

    // Votes are not reset until the tie-break resolves; no history yet.
    assert_eq!(store.list_submissions().await.unwrap()[0].votes, 5);
    assert!(store.list_pump_history().await.unwrap().is_empty());
}

#[tokio::test]
async fn finalize_without_submissions_restarts_without_history() {
    let store = memory_store();
    let mut service = fresh_service(Arc::clone(&store), 1_000_000);

    let outcome = service.finalize_voting(2_000_000).await.expect("finalize");
    assert_eq!(outcome, RoundOutcome::NoSubmissions);
    assert_eq!(service.phase(), RoundPhase::Voting);
    assert_eq!(service.state().voting_start_ms, 2_000_000);
    assert!(store.list_pump_history().await.unwrap().is_empty());
}

#[tokio::test]
async fn tiebreak_resolution_picks_a_frozen_candidate() {
    let store = memory_store();
    let a = seed_submission(&store, "AddrA111111111111111111111111111", Some("Alpha"), 5).await;
    let b = seed_submission(&store, "AddrB222222222222222222222222222", Some("Beta"), 5).await;

    let now = 1_000_000;
    let mut service = fresh_service(Arc::clone(&store), now);
    service.finalize_voting(now + 1).await.expect("finalize");
    assert_eq!(service.phase(), RoundPhase::Tiebreak);

    let resolve_at = now + 1 + TIEBREAK_SECS * 1000;
    service
        .resolve_tiebreak(resolve_at)
        .await
        .expect("resolve tie-break");

    // Winner is always one of the frozen pair.
    let history = store.list_pump_history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert!(
        history[0].submission_id == a.id || history[0].submission_id == b.id,
        "winner {} not in frozen snapshot",
        history[0].submission_id
    );
    assert_eq!(history[0].votes, 5);

    // Votes reset, fresh voting phase.
    for s in store.list_submissions().await.unwrap() {
        assert_eq!(s.votes, 0);
    }
    assert_eq!(service.phase(), RoundPhase::Voting);
    assert_eq!(service.state().voting_start_ms, resolve_at);
}

#[tokio::test]
async fn empty_tiebreak_snapshot_resets_instead_of_crashing() {
    let store = memory_store();
    let now = 1_000_000;
    // A persisted tie-break whose candidate list was lost.
    let stale = RoundState {
        phase: RoundPhase::Tiebreak,
        voting_start_ms: now,
        voting_duration_secs: VOTING_SECS,
        tiebreak_end_ms: Some(now + 1),
        tiebreak_candidates: Some(Vec::new()),
    };
    let mut service = RoundService::load_or_init(
        RoundStoreVariant::Memory(MemoryRoundStore::with_state(stale)),
        Arc::clone(&store),
        VOTING_SECS,
        TIEBREAK_SECS,
        now,
    )
    .expect("init");
    assert_eq!(service.phase(), RoundPhase::Tiebreak);

    let advanced = service.advance_if_due(now + 2).await.expect("advance");
    assert_eq!(advanced, Some(RoundOutcome::Picked));
    assert_eq!(service.phase(), RoundPhase::Voting);
    assert!(store.list_pump_history().await.unwrap().is_empty());
}

#[tokio::test]
async fn advance_is_a_no_op_before_the_window_elapses() {
    let store = memory_store();
    seed_submission(&store, "AddrA111111111111111111111111111", None, 1).await;

    let now = 1_000_000;
    let mut service = fresh_service(store, now);

    assert_eq!(service.advance_if_due(now).await.unwrap(), None);
    assert_eq!(
        service
            .advance_if_due(now + VOTING_SECS * 1000 - 1)
            .await
            .unwrap(),
        None
    );
    assert_eq!(service.phase(), RoundPhase::Voting);
}

#[tokio::test]
async fn remaining_seconds_is_monotonically_non_increasing() {
    let store = memory_store();
    let now = 1_000_000;
    let service = fresh_service(store, now);

    let mut last = u64::MAX;
    for offset in [0, 1_500, 30_000, 599_000, 600_000, 700_000] {
        let remaining = service.voting_remaining_secs(now + offset);
        assert!(remaining <= last);
        last = remaining;
    }
    // Floored at zero past the window.
    assert_eq!(last, 0);
}

#[tokio::test]
async fn restart_with_elapsed_window_forfeits_the_round() {
    let store = memory_store();
    let stale = RoundState::fresh_voting(0, VOTING_SECS);
    let now = VOTING_SECS * 1000 + 5_000;

    let service = RoundService::load_or_init(
        RoundStoreVariant::Memory(MemoryRoundStore::with_state(stale)),
        store,
        VOTING_SECS,
        TIEBREAK_SECS,
        now,
    )
    .expect("init");

    assert_eq!(service.phase(), RoundPhase::Voting);
    assert_eq!(service.state().voting_start_ms, now);
}

#[tokio::test]
async fn restart_mid_window_preserves_the_running_round() {
    let store = memory_store();
    let start = 1_000_000;
    let prior = RoundState::fresh_voting(start, VOTING_SECS);
    let now = start + 5_000;

    let service = RoundService::load_or_init(
        RoundStoreVariant::Memory(MemoryRoundStore::with_state(prior)),
        store,
        VOTING_SECS,
        TIEBREAK_SECS,
        now,
    )
    .expect("init");

    assert_eq!(service.state().voting_start_ms, start);
    assert_eq!(service.voting_remaining_secs(now), VOTING_SECS - 5);
}

#[tokio::test]
async fn winner_without_metadata_gets_synthesized_display_data() {
    let store = memory_store();
    let address = "AddrX999999999999999999999999999";
    seed_submission(&store, address, None, 2).await;

    let now = 1_000_000;
    let mut service = fresh_service(Arc::clone(&store), now);
    service.finalize_voting(now + 1).await.expect("finalize");

    let history = store.list_pump_history().await.unwrap();
    assert_eq!(history[0].token_name, synthesized_name(address));
    assert_eq!(history[0].token_name, "Token AddrX9");
    assert_eq!(history[0].token_symbol.as_deref(), Some("UNK"));
}

#[tokio::test]
async fn dto_reflects_phase_and_candidates() {
    let store = memory_store();
    seed_submission(&store, "AddrA111111111111111111111111111", Some("Alpha"), 4).await;
    seed_submission(&store, "AddrB222222222222222222222222222", Some("Beta"), 4).await;

    let now = 1_000_000;
    let mut service = fresh_service(store, now);

    match service.to_dto(now) {
        RoundDto::Voting {
            remaining_seconds,
            voting_start_ms,
            voting_end_ms,
        } => {
            assert_eq!(remaining_seconds, VOTING_SECS);
            assert_eq!(voting_start_ms, now);
            assert_eq!(voting_end_ms, now + VOTING_SECS * 1000);
        }
        other => panic!("expected voting DTO, got {:?}", other),
    }

    let resolve_at = now + VOTING_SECS * 1000;
    service.finalize_voting(resolve_at).await.expect("finalize");
    match service.to_dto(resolve_at) {
        RoundDto::Tiebreak {
            remaining_seconds,
            tiebreak_end_ms,
            candidates,
        } => {
            assert_eq!(remaining_seconds, TIEBREAK_SECS);
            assert_eq!(tiebreak_end_ms, resolve_at + TIEBREAK_SECS * 1000);
            let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
            assert_eq!(candidates.len(), 2);
            assert!(names.contains(&"Alpha") && names.contains(&"Beta"));
        }
        other => panic!("expected tiebreak DTO, got {:?}", other),
    }
}

#[tokio::test]
async fn tiebreak_snapshot_is_not_recomputed_from_live_votes() {
    let store = memory_store();
    let a = seed_submission(&store, "AddrA111111111111111111111111111", Some("Alpha"), 5).await;
    seed_submission(&store, "AddrB222222222222222222222222222", Some("Beta"), 5).await;

    let now = 1_000_000;
    let mut service = fresh_service(Arc::clone(&store), now);
    service.finalize_voting(now + 1).await.expect("finalize");

    // Votes move after the snapshot is frozen; the DTO must still show the
    // counts captured at tie-detection time.
    store.update_vote_count(&a.id, 99).await.unwrap();

    let frozen: Vec<TiebreakCandidate> = match service.to_dto(now + 2) {
        RoundDto::Tiebreak { candidates, .. } => candidates,
        other => panic!("expected tiebreak DTO, got {:?}", other),
    };
    assert!(frozen.iter().all(|c| c.votes == 5));
}
