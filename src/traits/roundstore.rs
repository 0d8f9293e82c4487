use anyhow::Result;

use crate::types::RoundState;

/// Durable snapshot/restore of the round-state singleton.
///
/// Single-writer discipline: the round service is the only caller, so
/// implementations need no internal coordination beyond backend safety.
pub trait RoundStore: Send + Sync {
    /// Human-readable backend name for logging.
    fn name(&self) -> &'static str;

    /// Load the previously persisted state, if any. Unreadable or corrupt
    /// state is treated as absent.
    fn load(&self) -> Result<Option<RoundState>>;

    /// Persist the given state. A failure here must abort the transition
    /// that produced `state`.
    fn save(&self, state: &RoundState) -> Result<()>;
}
