//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Arrival-based**: FCFS, RR
//! - **Time-based**: SJF (shared by SJF and PSJF)
//! - **Priority**: PRI (shared by PRI and PPRI)
//!
//! Ties on the primary key fall back to arrival time.

use std::cmp::Ordering;

use super::DispatchingRule;
use crate::models::Job;

// ======================== Arrival-based rules ========================

/// First Come, First Served.
///
/// Orders jobs by arrival time.
#[derive(Debug, Clone, Copy)]
pub struct Fcfs;

impl DispatchingRule for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn compare(&self, a: &Job, b: &Job) -> Ordering {
        if a.pid == b.pid {
            return Ordering::Equal;
        }
        a.arrival_time.cmp(&b.arrival_time)
    }

    fn description(&self) -> &'static str {
        "First Come, First Served"
    }
}

/// Round Robin.
///
/// Never reorders: every existing job ranks ahead of a newcomer, so an
/// offered job always lands at the tail of the queue.
#[derive(Debug, Clone, Copy)]
pub struct Rr;

impl DispatchingRule for Rr {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn compare(&self, a: &Job, b: &Job) -> Ordering {
        if a.pid == b.pid {
            return Ordering::Equal;
        }
        Ordering::Less
    }

    fn description(&self) -> &'static str {
        "Round Robin"
    }
}

// ======================== Time-based rules ========================

/// Shortest Job First.
///
/// Orders by remaining time, so the same rule serves the preemptive
/// variant (shortest remaining time first). Running jobs are compared on
/// remaining time as of the scheduler's last clock advance.
#[derive(Debug, Clone, Copy)]
pub struct Sjf;

impl DispatchingRule for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn compare(&self, a: &Job, b: &Job) -> Ordering {
        if a.pid == b.pid {
            return Ordering::Equal;
        }
        a.time_remaining
            .cmp(&b.time_remaining)
            .then_with(|| a.arrival_time.cmp(&b.arrival_time))
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}

// ======================== Priority rules ========================

/// Priority.
///
/// Lower priority value runs first.
#[derive(Debug, Clone, Copy)]
pub struct Pri;

impl DispatchingRule for Pri {
    fn name(&self) -> &'static str {
        "PRI"
    }

    fn compare(&self, a: &Job, b: &Job) -> Ordering {
        if a.pid == b.pid {
            return Ordering::Equal;
        }
        a.priority
            .cmp(&b.priority)
            .then_with(|| a.arrival_time.cmp(&b.arrival_time))
    }

    fn description(&self) -> &'static str {
        "Priority"
    }
}
