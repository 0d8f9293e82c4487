//! Round-state persistence tests: the JSON file store and restart recovery
//! through `RoundService::load_or_init`.

use std::fs;
use std::sync::Arc;

use anyhow::Result;
use pumpvote::roundstore::{FileRoundStore, RoundStoreVariant};
use pumpvote::store::{MemoryStore, StoreVariant};
use pumpvote::traits::RoundStore;
use pumpvote::types::{RoundPhase, RoundState, TiebreakCandidate};
use pumpvote::RoundService;
use tempfile::TempDir;

const VOTING_SECS: u64 = 600;
const TIEBREAK_SECS: u64 = 15;

fn service_at(dir: &TempDir, now_ms: u64) -> Result<RoundService> {
    let round_store = RoundStoreVariant::File(FileRoundStore::new(dir.path()));
    let store = Arc::new(StoreVariant::Memory(MemoryStore::new()));
    RoundService::load_or_init(round_store, store, VOTING_SECS, TIEBREAK_SECS, now_ms)
}

#[test]
fn save_and_load_round_trip() -> Result<()> {
    let dir = TempDir::new()?;
    let store = FileRoundStore::new(dir.path());

    let state = RoundState {
        phase: RoundPhase::Tiebreak,
        voting_start_ms: 1_000,
        voting_duration_secs: VOTING_SECS,
        tiebreak_end_ms: Some(700_000),
        tiebreak_candidates: Some(vec![TiebreakCandidate {
            id: "sub-1".to_string(),
            name: "Alpha".to_string(),
            symbol: "ALP".to_string(),
            address: "addr-1".to_string(),
            votes: 3,
        }]),
    };
    store.save(&state)?;

    let loaded = store.load()?.expect("state present");
    assert_eq!(loaded.phase, RoundPhase::Tiebreak);
    assert_eq!(loaded.voting_start_ms, 1_000);
    assert_eq!(loaded.tiebreak_end_ms, Some(700_000));
    let candidates = loaded.tiebreak_candidates.expect("candidates present");
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].name, "Alpha");
    Ok(())
}

#[test]
fn missing_file_loads_as_none() -> Result<()> {
    let dir = TempDir::new()?;
    let store = FileRoundStore::new(dir.path());
    assert!(store.load()?.is_none());
    Ok(())
}

#[test]
fn corrupt_file_loads_as_none() -> Result<()> {
    let dir = TempDir::new()?;
    let store = FileRoundStore::new(dir.path());
    fs::write(store.path(), "{not json")?;
    assert!(store.load()?.is_none());
    Ok(())
}

#[test]
fn save_creates_missing_data_dir() -> Result<()> {
    let dir = TempDir::new()?;
    let nested = dir.path().join("data").join("nested");
    let store = FileRoundStore::new(&nested);

    store.save(&RoundState::fresh_voting(1_000, VOTING_SECS))?;
    assert!(store.path().exists());
    assert!(store.load()?.is_some());
    Ok(())
}

#[test]
fn startup_without_prior_state_persists_a_fresh_round() -> Result<()> {
    let dir = TempDir::new()?;
    let service = service_at(&dir, 10_000)?;
    assert_eq!(service.phase(), RoundPhase::Voting);
    assert_eq!(service.state().voting_start_ms, 10_000);

    // Startup writes the state back so a crash right after boot restores
    // the same window.
    let reloaded = FileRoundStore::new(dir.path()).load()?.expect("persisted");
    assert_eq!(reloaded.voting_start_ms, 10_000);
    Ok(())
}

#[test]
fn restart_within_window_resumes_the_same_round() -> Result<()> {
    let dir = TempDir::new()?;
    {
        let service = service_at(&dir, 10_000)?;
        assert_eq!(service.state().voting_start_ms, 10_000);
    }

    // Simulated restart 30s later, well inside the 600s window.
    let service = service_at(&dir, 40_000)?;
    assert_eq!(service.phase(), RoundPhase::Voting);
    assert_eq!(service.state().voting_start_ms, 10_000);
    Ok(())
}

#[test]
fn restart_after_window_forfeits_the_round() -> Result<()> {
    let dir = TempDir::new()?;
    {
        let _ = service_at(&dir, 10_000)?;
    }

    // Restart after the voting window elapsed: the unresolved round is
    // forfeited, no winner is recorded.
    let later = 10_000 + VOTING_SECS * 1000;
    let service = service_at(&dir, later)?;
    assert_eq!(service.phase(), RoundPhase::Voting);
    assert_eq!(service.state().voting_start_ms, later);

    let reloaded = FileRoundStore::new(dir.path()).load()?.expect("persisted");
    assert_eq!(reloaded.voting_start_ms, later);
    Ok(())
}

#[test]
fn restart_during_stale_tiebreak_forfeits_the_round() -> Result<()> {
    let dir = TempDir::new()?;
    let store = FileRoundStore::new(dir.path());
    // A tie-break persisted for a voting window that has since elapsed.
    store.save(&RoundState {
        phase: RoundPhase::Tiebreak,
        voting_start_ms: 10_000,
        voting_duration_secs: VOTING_SECS,
        tiebreak_end_ms: Some(10_000 + VOTING_SECS * 1000 + 5_000),
        tiebreak_candidates: Some(vec![]),
    })?;

    let later = 10_000 + VOTING_SECS * 1000 + 1;
    let service = service_at(&dir, later)?;
    assert_eq!(service.phase(), RoundPhase::Voting);
    assert_eq!(service.state().voting_start_ms, later);
    Ok(())
}
