//! Scheduling policy selection.
//!
//! A policy fixes two things for the lifetime of a scheduler: the ordering
//! rule used for the waiting queue and preemption checks, and whether an
//! arrival may displace a running job.
//!
//! | Policy | Ordering rule | Preemptive |
//! |--------|---------------|------------|
//! | FCFS | arrival | no |
//! | SJF | remaining time, arrival | no |
//! | PSJF | remaining time, arrival | yes |
//! | PRI | priority, arrival | no |
//! | PPRI | priority, arrival | yes |
//! | RR | FIFO append | no (quantum driven) |

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Job;
use crate::dispatching::rules::{Fcfs, Pri, Rr, Sjf};
use crate::dispatching::DispatchingRule;
use crate::error::SchedulerError;

/// One of the six supported scheduling schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// First come, first served.
    #[default]
    Fcfs,
    /// Shortest job first, non-preemptive.
    Sjf,
    /// Preemptive shortest job first (shortest remaining time).
    Psjf,
    /// Priority, non-preemptive.
    Pri,
    /// Priority, preemptive.
    Ppri,
    /// Round robin.
    Rr,
}

impl Policy {
    /// All policies, in declaration order.
    pub const ALL: [Policy; 6] = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::Psjf,
        Policy::Pri,
        Policy::Ppri,
        Policy::Rr,
    ];

    /// Ordering rule backing this policy.
    pub fn rule(&self) -> &'static dyn DispatchingRule {
        match self {
            Policy::Fcfs => &Fcfs,
            Policy::Sjf | Policy::Psjf => &Sjf,
            Policy::Pri | Policy::Ppri => &Pri,
            Policy::Rr => &Rr,
        }
    }

    /// Compares two jobs under this policy. `Less` means `a` runs first.
    pub fn compare(&self, a: &Job, b: &Job) -> Ordering {
        self.rule().compare(a, b)
    }

    /// Whether an arrival may preempt a running job.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Policy::Psjf | Policy::Ppri)
    }

    /// Whether jobs are time-sliced by quantum expiry.
    pub fn is_round_robin(&self) -> bool {
        matches!(self, Policy::Rr)
    }

    /// Short scheme name.
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Fcfs => "FCFS",
            Policy::Sjf => "SJF",
            Policy::Psjf => "PSJF",
            Policy::Pri => "PRI",
            Policy::Ppri => "PPRI",
            Policy::Rr => "RR",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Policy::Fcfs),
            "sjf" => Ok(Policy::Sjf),
            "psjf" => Ok(Policy::Psjf),
            "pri" => Ok(Policy::Pri),
            "ppri" => Ok(Policy::Ppri),
            "rr" => Ok(Policy::Rr),
            _ => Err(SchedulerError::UnknownPolicy(s.to_string())),
        }
    }
}
