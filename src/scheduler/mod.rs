//! Event-driven CPU scheduler and completion statistics.
//!
//! `Scheduler` holds the core slots, the waiting queue and the policy, and
//! reacts to arrival, completion and quantum-expiry events supplied by an
//! external driver. `SchedulerStats` accumulates response, wait and
//! turnaround totals as jobs finish.
//!
//! # References
//!
//! - Silberschatz, Galvin, Gagne (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7-8

mod core;
mod stats;

pub use self::core::{JobView, Scheduler};
pub use stats::SchedulerStats;
