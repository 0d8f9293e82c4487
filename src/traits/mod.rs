pub mod metadata;
pub mod roundstore;
pub mod store;

pub use metadata::MetadataProvider;
pub use roundstore::RoundStore;
pub use store::SubmissionStore;
