// Library exports for testing and external use

pub mod config;
pub mod error;
pub mod http;
pub mod metadata;
pub mod pumpvote;
pub mod ratelimit;
pub mod round;
pub mod roundstore;
pub mod store;
pub mod telemetry;
pub mod traits;
pub mod types;

// Re-export commonly used types and traits
pub use config::{BaseConfig, MetadataType, StoreType};
pub use error::Error;
pub use pumpvote::{AppContext, PumpVote};
pub use ratelimit::RateLimiter;
pub use round::{RoundOutcome, RoundService};
pub use traits::{MetadataProvider, RoundStore, SubmissionStore};
pub use types::{
    NewPumpHistory, NewSubmission, PumpHistory, RoundDto, RoundPhase, RoundState, StatsDto,
    Submission, TiebreakCandidate, TokenMetadata, Vote,
};

// Re-export variant enums for convenience
pub use metadata::{MetadataProviderVariant, MetadataResolver};
pub use roundstore::RoundStoreVariant;
pub use store::StoreVariant;
