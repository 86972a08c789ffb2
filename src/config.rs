//! Configuration types for the scheduler and the simulation driver.

use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;
use crate::models::{Policy, Time};

/// Scheduler setup: how many cores and which policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Number of cores, addressed as 0..cores.
    pub cores: usize,
    /// Scheduling policy.
    pub policy: Policy,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            cores: 1,
            policy: Policy::Fcfs,
        }
    }
}

impl SchedulerConfig {
    /// Creates a config with the given core count and policy.
    pub fn new(cores: usize, policy: Policy) -> Self {
        Self { cores, policy }
    }

    /// Sets the number of cores.
    pub fn with_cores(mut self, cores: usize) -> Self {
        self.cores = cores;
        self
    }

    /// Sets the policy.
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Checks the core count.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.cores == 0 {
            return Err(SchedulerError::NoCores);
        }
        Ok(())
    }
}

/// Simulation setup: scheduler config plus the round-robin quantum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Scheduler configuration.
    #[serde(flatten)]
    pub scheduler: SchedulerConfig,
    /// Time slice for round-robin (ticks). Ignored by other policies.
    pub quantum: Option<Time>,
}

impl SimulationConfig {
    /// Creates a config without a quantum.
    pub fn new(cores: usize, policy: Policy) -> Self {
        Self {
            scheduler: SchedulerConfig::new(cores, policy),
            quantum: None,
        }
    }

    /// Sets the round-robin quantum.
    pub fn with_quantum(mut self, quantum: Time) -> Self {
        self.quantum = Some(quantum);
        self
    }

    /// Checks the scheduler config and, for round-robin, the quantum.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        self.scheduler.validate()?;
        match (self.scheduler.policy.is_round_robin(), self.quantum) {
            (true, None) => Err(SchedulerError::MissingQuantum),
            (true, Some(q)) if q <= 0 => Err(SchedulerError::InvalidQuantum(q)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SchedulerConfig::default();
        assert_eq!(config.cores, 1);
        assert_eq!(config.policy, Policy::Fcfs);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_cores_rejected() {
        let config = SchedulerConfig::default().with_cores(0);
        assert_eq!(config.validate(), Err(SchedulerError::NoCores));
    }

    #[test]
    fn test_quantum_rules() {
        let rr = SimulationConfig::new(2, Policy::Rr);
        assert_eq!(rr.validate(), Err(SchedulerError::MissingQuantum));
        assert_eq!(
            rr.with_quantum(0).validate(),
            Err(SchedulerError::InvalidQuantum(0))
        );
        assert!(rr.with_quantum(4).validate().is_ok());

        // Non round-robin policies ignore the quantum entirely.
        assert!(SimulationConfig::new(1, Policy::Sjf).validate().is_ok());
        assert!(SimulationConfig::new(1, Policy::Sjf)
            .with_quantum(-3)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_deserialize_flattened() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"cores":4,"policy":"rr","quantum":2}"#).unwrap();
        assert_eq!(config.scheduler.cores, 4);
        assert_eq!(config.scheduler.policy, Policy::Rr);
        assert_eq!(config.quantum, Some(2));
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: SimulationConfig = serde_json::from_str(r#"{"policy":"ppri"}"#).unwrap();
        assert_eq!(config.scheduler.cores, 1);
        assert_eq!(config.scheduler.policy, Policy::Ppri);
        assert_eq!(config.quantum, None);
    }
}
