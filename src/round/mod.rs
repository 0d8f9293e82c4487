//! Round lifecycle state machine.
//!
//! This module provides:
//! - `core`: the `RoundService` state machine and its transitions
//! - `tasks`: the background ticker that advances the round
//! - `tests`: unit tests for the transition logic

pub mod core;
pub mod tasks;

pub use core::{RoundOutcome, RoundService};

#[cfg(test)]
mod tests;
