use std::sync::Mutex;

use anyhow::Result;

use crate::traits::RoundStore;
use crate::types::RoundState;

/// In-memory round persistence, for tests and ephemeral deployments.
#[derive(Default)]
pub struct MemoryRoundStore {
    slot: Mutex<Option<RoundState>>,
}

impl MemoryRoundStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a pre-existing state, as if left by an earlier process.
    pub fn with_state(state: RoundState) -> Self {
        Self {
            slot: Mutex::new(Some(state)),
        }
    }
}

impl RoundStore for MemoryRoundStore {
    fn name(&self) -> &'static str {
        "memory-round-store"
    }

    fn load(&self) -> Result<Option<RoundState>> {
        Ok(self.slot.lock().expect("round store lock poisoned").clone())
    }

    fn save(&self, state: &RoundState) -> Result<()> {
        *self.slot.lock().expect("round store lock poisoned") = Some(state.clone());
        Ok(())
    }
}
