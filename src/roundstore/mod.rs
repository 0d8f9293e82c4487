pub mod file;
pub mod memory;
pub mod variant;

pub use file::FileRoundStore;
pub use memory::MemoryRoundStore;
pub use variant::RoundStoreVariant;
