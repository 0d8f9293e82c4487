pub mod memory;
pub mod rocks;
pub mod variant;

pub use memory::MemoryStore;
pub use rocks::RocksStore;
pub use variant::StoreVariant;

use uuid::Uuid;

use crate::types::{now_ms, NewPumpHistory, NewSubmission, PumpHistory, Submission, Vote};

/// Materialize a submission record with a fresh id and zeroed vote count.
pub(crate) fn build_submission(new: NewSubmission) -> Submission {
    Submission {
        id: Uuid::new_v4().to_string(),
        contract_address: new.contract_address,
        token_name: new.token_name,
        token_symbol: new.token_symbol,
        submitted_by: new.submitted_by,
        votes: 0,
        created_at: now_ms(),
    }
}

/// Materialize a vote record.
pub(crate) fn build_vote(submission_id: &str, voter_address: Option<String>) -> Vote {
    Vote {
        id: Uuid::new_v4().to_string(),
        submission_id: submission_id.to_string(),
        voter_address,
        created_at: now_ms(),
    }
}

/// Materialize a pump-history record.
pub(crate) fn build_pump_history(new: NewPumpHistory) -> PumpHistory {
    PumpHistory {
        id: Uuid::new_v4().to_string(),
        submission_id: new.submission_id,
        token_name: new.token_name,
        token_symbol: new.token_symbol,
        contract_address: new.contract_address,
        amount_pumped: new.amount_pumped,
        votes: new.votes,
        price_impact: new.price_impact,
        transaction_hash: new.transaction_hash,
        created_at: now_ms(),
    }
}

/// Canonical listing order: vote count descending, then oldest first so that
/// ties keep submission order stable across backends.
pub(crate) fn sort_submissions(submissions: &mut [Submission]) {
    submissions.sort_by(|a, b| {
        b.votes
            .cmp(&a.votes)
            .then(a.created_at.cmp(&b.created_at))
            .then(a.id.cmp(&b.id))
    });
}

/// Canonical history order: most recent first.
pub(crate) fn sort_pump_history(history: &mut [PumpHistory]) {
    history.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}
