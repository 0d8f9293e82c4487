use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{Error, Result};
use crate::traits::SubmissionStore;
use crate::types::{NewPumpHistory, NewSubmission, PumpHistory, Submission, Vote};

use super::{build_pump_history, build_submission, build_vote, sort_pump_history, sort_submissions};

#[derive(Default)]
struct Inner {
    submissions: HashMap<String, Submission>,
    votes: HashMap<String, Vote>,
    pump_history: HashMap<String, PumpHistory>,
}

/// In-memory submission store. The production default; state is lost on
/// restart, which the round persistence layer tolerates by design.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory-store"
    }

    async fn list_submissions(&self) -> Result<Vec<Submission>> {
        let inner = self.inner.lock().await;
        let mut out: Vec<Submission> = inner.submissions.values().cloned().collect();
        sort_submissions(&mut out);
        Ok(out)
    }

    async fn find_submission(&self, id: &str) -> Result<Option<Submission>> {
        let inner = self.inner.lock().await;
        Ok(inner.submissions.get(id).cloned())
    }

    async fn find_by_address(&self, contract_address: &str) -> Result<Option<Submission>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .submissions
            .values()
            .find(|s| s.contract_address == contract_address)
            .cloned())
    }

    async fn create_submission(&self, new: NewSubmission) -> Result<Submission> {
        let mut inner = self.inner.lock().await;
        if let Some(existing) = inner
            .submissions
            .values()
            .find(|s| s.contract_address == new.contract_address)
        {
            return Err(Error::DuplicateAddress {
                submission_id: existing.id.clone(),
            });
        }
        let submission = build_submission(new);
        inner
            .submissions
            .insert(submission.id.clone(), submission.clone());
        Ok(submission)
    }

    async fn update_vote_count(&self, id: &str, votes: u64) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if let Some(submission) = inner.submissions.get_mut(id) {
            submission.votes = votes;
        }
        Ok(())
    }

    async fn record_vote(
        &self,
        submission_id: &str,
        voter_address: Option<String>,
    ) -> Result<Vote> {
        let mut inner = self.inner.lock().await;
        let vote = build_vote(submission_id, voter_address);
        inner.votes.insert(vote.id.clone(), vote.clone());
        Ok(vote)
    }

    async fn votes_for(&self, submission_id: &str) -> Result<Vec<Vote>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .votes
            .values()
            .filter(|v| v.submission_id == submission_id)
            .cloned()
            .collect())
    }

    async fn has_voted(&self, submission_id: &str, voter_address: &str) -> Result<bool> {
        let inner = self.inner.lock().await;
        Ok(inner.votes.values().any(|v| {
            v.submission_id == submission_id && v.voter_address.as_deref() == Some(voter_address)
        }))
    }

    async fn reset_all_votes(&self) -> Result<()> {
        let mut inner = self.inner.lock().await;
        for submission in inner.submissions.values_mut() {
            submission.votes = 0;
        }
        Ok(())
    }

    async fn record_pump_history(&self, new: NewPumpHistory) -> Result<PumpHistory> {
        let mut inner = self.inner.lock().await;
        let entry = build_pump_history(new);
        inner.pump_history.insert(entry.id.clone(), entry.clone());
        Ok(entry)
    }

    async fn list_pump_history(&self) -> Result<Vec<PumpHistory>> {
        let inner = self.inner.lock().await;
        let mut out: Vec<PumpHistory> = inner.pump_history.values().cloned().collect();
        sort_pump_history(&mut out);
        Ok(out)
    }
}
