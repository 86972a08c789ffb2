//! Error types for scheduler construction and simulation setup.
//!
//! Scheduling entry points never fail; they report "no change" through
//! `Option`. Only building a scheduler or a simulation can fail.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised while configuring a scheduler or simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchedulerError {
    /// A scheduler needs at least one core.
    #[error("scheduler requires at least one core")]
    NoCores,

    /// Policy name did not match any known scheme.
    #[error("unknown scheduling policy: {0}")]
    UnknownPolicy(String),

    /// Round-robin was selected without a quantum.
    #[error("round-robin scheduling requires a quantum")]
    MissingQuantum,

    /// Quantum must be strictly positive.
    #[error("invalid quantum: {0}")]
    InvalidQuantum(i64),

    /// Workload failed validation.
    #[error("invalid workload: {} error(s), first: {}", .0.len(), .0.first().map(|e| e.message.as_str()).unwrap_or(""))]
    InvalidWorkload(Vec<ValidationError>),
}
