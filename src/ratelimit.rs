use std::collections::HashMap;
use std::sync::Mutex;

/// Marker used in place of a voter identity for anonymous votes.
pub const ANON_VOTER: &str = "anon";

/// Per-(submission, voter) vote cooldown gate.
///
/// Held in process memory only and lost on restart; its purpose is abuse
/// dampening, not correctness. Layered under the duplicate-vote check: this
/// gate is unconditional, the duplicate check applies only when a voter
/// identity is present.
pub struct RateLimiter {
    cooldown_ms: u64,
    last_vote_ms: Mutex<HashMap<(String, String), u64>>,
}

impl RateLimiter {
    pub fn new(cooldown_secs: u64) -> Self {
        Self {
            cooldown_ms: cooldown_secs * 1000,
            last_vote_ms: Mutex::new(HashMap::new()),
        }
    }

    /// Attempt a vote for `(submission_id, voter)` at `now_ms`.
    ///
    /// On success the timestamp is recorded and `Ok(())` returned. Within
    /// the cooldown the attempt is denied with the number of whole seconds
    /// (rounded up) after which a retry will succeed.
    pub fn try_acquire(
        &self,
        submission_id: &str,
        voter_address: Option<&str>,
        now_ms: u64,
    ) -> Result<(), u64> {
        let voter = voter_address.filter(|v| !v.is_empty()).unwrap_or(ANON_VOTER);
        let key = (submission_id.to_string(), voter.to_string());

        let mut map = self.last_vote_ms.lock().expect("rate limiter lock poisoned");
        if let Some(&last) = map.get(&key) {
            let elapsed = now_ms.saturating_sub(last);
            if elapsed < self.cooldown_ms {
                let retry_after_seconds = (self.cooldown_ms - elapsed).div_ceil(1000);
                return Err(retry_after_seconds);
            }
        }
        map.insert(key, now_ms);
        Ok(())
    }
}
