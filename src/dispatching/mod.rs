//! Dispatching rules for CPU scheduling.
//!
//! Each rule is a total comparison between two jobs. The waiting queue is
//! kept sorted by the active rule, and preemptive policies use the same
//! rule to decide whether an arrival displaces a running job.
//!
//! # Usage
//!
//! ```
//! use u_cpusched::dispatching::{rules, DispatchingRule};
//! use u_cpusched::models::Job;
//! use std::cmp::Ordering;
//!
//! let short = Job::new(1, 0, 3, 0);
//! let long = Job::new(2, 0, 9, 0);
//! assert_eq!(rules::Sjf.compare(&short, &long), Ordering::Less);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin, Gagne (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7-9

pub mod rules;

use std::cmp::Ordering;
use std::fmt::Debug;

use crate::models::Job;

/// An ordering between jobs.
///
/// # Ordering Convention
/// **`Less` = runs first.** A job compared with itself (same pid) is
/// always `Equal`.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "FCFS", "SJF").
    fn name(&self) -> &'static str;

    /// Compares two jobs. `Less` means `a` should be dispatched before `b`.
    fn compare(&self, a: &Job, b: &Job) -> Ordering;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
