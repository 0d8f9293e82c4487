//! PumpVote application orchestrator.
//!
//! This module provides:
//! - `core`: the application context and initialization
//! - `ops`: request operations (testable "*_once" functions)
//! - `tasks`: task orchestration with tokio::spawn
//! - `tests`: unit tests for the operations

pub mod core;
pub mod ops;
pub mod tasks;

pub use core::{AppContext, PumpVote};
pub use ops::{MetadataSourceTag, SubmissionResponse};
