use anyhow::Result;

use crate::traits::RoundStore;
use crate::types::RoundState;

use super::{FileRoundStore, MemoryRoundStore};

/// Enum representing all round-persistence backends.
pub enum RoundStoreVariant {
    File(FileRoundStore),
    Memory(MemoryRoundStore),
}

impl RoundStore for RoundStoreVariant {
    fn name(&self) -> &'static str {
        match self {
            RoundStoreVariant::File(inner) => inner.name(),
            RoundStoreVariant::Memory(inner) => inner.name(),
        }
    }

    fn load(&self) -> Result<Option<RoundState>> {
        match self {
            RoundStoreVariant::File(inner) => inner.load(),
            RoundStoreVariant::Memory(inner) => inner.load(),
        }
    }

    fn save(&self, state: &RoundState) -> Result<()> {
        match self {
            RoundStoreVariant::File(inner) => inner.save(state),
            RoundStoreVariant::Memory(inner) => inner.save(state),
        }
    }
}
