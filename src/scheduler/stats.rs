//! Completion statistics.
//!
//! Accumulates per-job timings as jobs finish and reports the classic
//! averages.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Response | first dispatch - arrival |
//! | Wait | completion - arrival - burst |
//! | Turnaround | completion - arrival |
//!
//! For non-preemptive, non-round-robin policies a job runs to completion
//! once dispatched, so its wait and response coincide; the response
//! average is then reported from the wait total.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use crate::models::{Job, Policy, Time};

/// Running totals over completed jobs.
///
/// All time values are in ticks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchedulerStats {
    /// Number of jobs that finished.
    pub completed: usize,
    /// Sum of (first dispatch - arrival).
    pub total_response: Time,
    /// Sum of (completion - arrival - burst).
    pub total_wait: Time,
    /// Sum of (completion - arrival).
    pub total_turnaround: Time,
}

impl SchedulerStats {
    /// Empty accumulators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accounts for a job finishing at `finish_time`.
    pub fn record(&mut self, job: &Job, finish_time: Time) {
        let start = job.start_time.unwrap_or(job.arrival_time);
        self.total_response += start - job.arrival_time;
        self.total_wait += finish_time - job.arrival_time - job.running_time;
        self.total_turnaround += finish_time - job.arrival_time;
        self.completed += 1;
    }

    /// Mean wait time, 0.0 when nothing completed.
    pub fn average_waiting_time(&self) -> f64 {
        self.mean(self.total_wait)
    }

    /// Mean turnaround time, 0.0 when nothing completed.
    pub fn average_turnaround_time(&self) -> f64 {
        self.mean(self.total_turnaround)
    }

    /// Mean response time under `policy`, 0.0 when nothing completed.
    pub fn average_response_time(&self, policy: Policy) -> f64 {
        if !policy.is_preemptive() && !policy.is_round_robin() {
            self.mean(self.total_wait)
        } else {
            self.mean(self.total_response)
        }
    }

    fn mean(&self, total: Time) -> f64 {
        if self.completed == 0 {
            0.0
        } else {
            total as f64 / self.completed as f64
        }
    }
}
