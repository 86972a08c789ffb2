//! Job model.
//!
//! A job is a single CPU burst submitted to the scheduler. `JobSpec` is the
//! immutable description a driver feeds in; `Job` is the scheduler's live
//! record with remaining-time bookkeeping.
//!
//! # Time Representation
//! All times are integer ticks of the simulated clock, which the external
//! driver owns. The scheduler never reads a wall clock.

use serde::{Deserialize, Serialize};

/// Caller-assigned, globally unique job identifier.
pub type JobId = u32;

/// Simulated time in ticks.
pub type Time = i64;

/// Workload entry: one job as submitted by a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    /// Unique job identifier.
    pub pid: JobId,
    /// Arrival time (ticks).
    pub arrival: Time,
    /// Total CPU time the job needs (ticks).
    pub running_time: Time,
    /// Scheduling priority (lower = more urgent).
    #[serde(default)]
    pub priority: i32,
}

impl JobSpec {
    /// Creates a job spec with priority 0.
    pub fn new(pid: JobId, arrival: Time, running_time: Time) -> Self {
        Self {
            pid,
            arrival,
            running_time,
            priority: 0,
        }
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// A job owned by the scheduler.
///
/// Lives either on exactly one core or exactly once in the waiting queue
/// from arrival until completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Unique job identifier.
    pub pid: JobId,
    /// Scheduling priority (lower = more urgent).
    pub priority: i32,
    /// Arrival time (ticks).
    pub arrival_time: Time,
    /// First dispatch time. `None` until the job truly starts on a core.
    pub start_time: Option<Time>,
    /// CPU time still owed, as of the scheduler's last event.
    pub time_remaining: Time,
    /// Original burst length.
    pub running_time: Time,
}

impl Job {
    /// Creates a job that has just arrived and has not run yet.
    pub fn new(pid: JobId, arrival_time: Time, running_time: Time, priority: i32) -> Self {
        Self {
            pid,
            priority,
            arrival_time,
            start_time: None,
            time_remaining: running_time,
            running_time,
        }
    }

    /// Whether the job has been dispatched at least once.
    pub fn has_started(&self) -> bool {
        self.start_time.is_some()
    }

    /// Records the first dispatch; later dispatches keep the original time.
    pub fn mark_started(&mut self, time: Time) {
        if self.start_time.is_none() {
            self.start_time = Some(time);
        }
    }
}

impl From<JobSpec> for Job {
    fn from(spec: JobSpec) -> Self {
        Job::new(spec.pid, spec.arrival, spec.running_time, spec.priority)
    }
}
