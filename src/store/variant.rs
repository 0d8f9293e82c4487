use async_trait::async_trait;

use crate::error::Result;
use crate::traits::SubmissionStore;
use crate::types::{NewPumpHistory, NewSubmission, PumpHistory, Submission, Vote};

use super::{MemoryStore, RocksStore};

/// Enum representing all submission-store backends.
pub enum StoreVariant {
    Memory(MemoryStore),
    Rocks(RocksStore),
}

#[async_trait]
impl SubmissionStore for StoreVariant {
    fn name(&self) -> &'static str {
        match self {
            StoreVariant::Memory(inner) => inner.name(),
            StoreVariant::Rocks(inner) => inner.name(),
        }
    }

    async fn list_submissions(&self) -> Result<Vec<Submission>> {
        match self {
            StoreVariant::Memory(inner) => inner.list_submissions().await,
            StoreVariant::Rocks(inner) => inner.list_submissions().await,
        }
    }

    async fn find_submission(&self, id: &str) -> Result<Option<Submission>> {
        match self {
            StoreVariant::Memory(inner) => inner.find_submission(id).await,
            StoreVariant::Rocks(inner) => inner.find_submission(id).await,
        }
    }

    async fn find_by_address(&self, contract_address: &str) -> Result<Option<Submission>> {
        match self {
            StoreVariant::Memory(inner) => inner.find_by_address(contract_address).await,
            StoreVariant::Rocks(inner) => inner.find_by_address(contract_address).await,
        }
    }

    async fn create_submission(&self, new: NewSubmission) -> Result<Submission> {
        match self {
            StoreVariant::Memory(inner) => inner.create_submission(new).await,
            StoreVariant::Rocks(inner) => inner.create_submission(new).await,
        }
    }

    async fn update_vote_count(&self, id: &str, votes: u64) -> Result<()> {
        match self {
            StoreVariant::Memory(inner) => inner.update_vote_count(id, votes).await,
            StoreVariant::Rocks(inner) => inner.update_vote_count(id, votes).await,
        }
    }

    async fn record_vote(
        &self,
        submission_id: &str,
        voter_address: Option<String>,
    ) -> Result<Vote> {
        match self {
            StoreVariant::Memory(inner) => inner.record_vote(submission_id, voter_address).await,
            StoreVariant::Rocks(inner) => inner.record_vote(submission_id, voter_address).await,
        }
    }

    async fn votes_for(&self, submission_id: &str) -> Result<Vec<Vote>> {
        match self {
            StoreVariant::Memory(inner) => inner.votes_for(submission_id).await,
            StoreVariant::Rocks(inner) => inner.votes_for(submission_id).await,
        }
    }

    async fn has_voted(&self, submission_id: &str, voter_address: &str) -> Result<bool> {
        match self {
            StoreVariant::Memory(inner) => inner.has_voted(submission_id, voter_address).await,
            StoreVariant::Rocks(inner) => inner.has_voted(submission_id, voter_address).await,
        }
    }

    async fn reset_all_votes(&self) -> Result<()> {
        match self {
            StoreVariant::Memory(inner) => inner.reset_all_votes().await,
            StoreVariant::Rocks(inner) => inner.reset_all_votes().await,
        }
    }

    async fn record_pump_history(&self, new: NewPumpHistory) -> Result<PumpHistory> {
        match self {
            StoreVariant::Memory(inner) => inner.record_pump_history(new).await,
            StoreVariant::Rocks(inner) => inner.record_pump_history(new).await,
        }
    }

    async fn list_pump_history(&self) -> Result<Vec<PumpHistory>> {
        match self {
            StoreVariant::Memory(inner) => inner.list_pump_history().await,
            StoreVariant::Rocks(inner) => inner.list_pump_history().await,
        }
    }
}
