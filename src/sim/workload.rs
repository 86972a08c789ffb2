//! Synthetic workload generation.
//!
//! Produces reproducible job streams from a seeded RNG: at every tick a job
//! arrives with probability `p_arrival`, and is short with probability
//! `p_short`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::{JobId, JobSpec, Time};

/// Parameters for a Bernoulli arrival process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadGenerator {
    /// Number of ticks during which jobs may arrive.
    pub ticks: Time,
    /// Per-tick arrival probability.
    pub p_arrival: f64,
    /// Probability an arriving job is short.
    pub p_short: f64,
    /// Running time of short jobs.
    pub short_ticks: Time,
    /// Running time of long jobs.
    pub long_ticks: Time,
    /// Priorities are drawn uniformly from `0..=max_priority`.
    pub max_priority: i32,
    /// RNG seed.
    pub seed: u64,
}

impl Default for WorkloadGenerator {
    fn default() -> Self {
        Self {
            ticks: 100,
            p_arrival: 0.3,
            p_short: 0.3,
            short_ticks: 2,
            long_ticks: 6,
            max_priority: 4,
            seed: 0,
        }
    }
}

impl WorkloadGenerator {
    /// Creates a generator with default rates and the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Sets the arrival window.
    pub fn with_ticks(mut self, ticks: Time) -> Self {
        self.ticks = ticks;
        self
    }

    /// Sets the per-tick arrival probability.
    pub fn with_arrival_probability(mut self, p: f64) -> Self {
        self.p_arrival = p;
        self
    }

    /// Sets short/long running times and the short-job probability.
    pub fn with_bursts(mut self, short_ticks: Time, long_ticks: Time, p_short: f64) -> Self {
        self.short_ticks = short_ticks;
        self.long_ticks = long_ticks;
        self.p_short = p_short;
        self
    }

    /// Sets the largest priority value drawn.
    pub fn with_max_priority(mut self, max_priority: i32) -> Self {
        self.max_priority = max_priority;
        self
    }

    /// Generates jobs in arrival order with pids 0, 1, 2, ...
    pub fn generate(&self) -> Vec<JobSpec> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut jobs = Vec::new();

        for t in 0..self.ticks {
            if rng.random::<f64>() < self.p_arrival {
                let running_time = if rng.random::<f64>() < self.p_short {
                    self.short_ticks
                } else {
                    self.long_ticks
                };
                let priority = rng.random_range(0..=self.max_priority.max(0));

                jobs.push(
                    JobSpec::new(jobs.len() as JobId, t, running_time).with_priority(priority),
                );
            }
        }

        jobs
    }
}
