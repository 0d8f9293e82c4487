use async_trait::async_trait;

use crate::error::Result;
use crate::types::{NewPumpHistory, NewSubmission, PumpHistory, Submission, Vote};

/// Storage contract the round core and the operation layer depend on.
///
/// Implementations own submissions, votes, and pump-history records and
/// enforce contract-address uniqueness. Vote counts on submissions are a
/// cached projection: callers recount via `votes_for` and write the result
/// back with `update_vote_count`.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Human-readable backend name for logging.
    fn name(&self) -> &'static str;

    /// All submissions, ordered by vote count descending.
    async fn list_submissions(&self) -> Result<Vec<Submission>>;

    /// Lookup a submission by id.
    async fn find_submission(&self, id: &str) -> Result<Option<Submission>>;

    /// Lookup a submission by its unique contract address.
    async fn find_by_address(&self, contract_address: &str) -> Result<Option<Submission>>;

    /// Insert a new submission. Fails with `Error::DuplicateAddress` if the
    /// address is already present; a duplicate attempt never creates a
    /// second record.
    async fn create_submission(&self, new: NewSubmission) -> Result<Submission>;

    /// Replace the cached vote count. Unknown ids are a silent no-op.
    async fn update_vote_count(&self, id: &str, votes: u64) -> Result<()>;

    /// Insert a vote record for a submission.
    async fn record_vote(&self, submission_id: &str, voter_address: Option<String>)
        -> Result<Vote>;

    /// All votes referencing a submission.
    async fn votes_for(&self, submission_id: &str) -> Result<Vec<Vote>>;

    /// Whether this voter already voted for this submission. Only consulted
    /// when a voter identity is supplied; anonymous voting bypasses it.
    async fn has_voted(&self, submission_id: &str, voter_address: &str) -> Result<bool>;

    /// Set every submission's cached vote count to 0. Vote records are not
    /// deleted: historical rows remain for audit but no longer count.
    async fn reset_all_votes(&self) -> Result<()>;

    /// Record a round winner. Entries are never mutated or deleted.
    async fn record_pump_history(&self, new: NewPumpHistory) -> Result<PumpHistory>;

    /// Pump history, most recent first.
    async fn list_pump_history(&self) -> Result<Vec<PumpHistory>>;
}
