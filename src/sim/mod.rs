//! Event-driven simulation driver.
//!
//! Replays a workload against a [`Scheduler`](crate::scheduler::Scheduler),
//! producing arrival, completion and quantum-expiry events in
//! non-decreasing time order, and summarizes the run.
//!
//! # Usage
//!
//! ```
//! use u_cpusched::config::SimulationConfig;
//! use u_cpusched::models::{JobSpec, Policy};
//! use u_cpusched::sim::Simulation;
//!
//! let jobs = vec![JobSpec::new(0, 0, 5), JobSpec::new(1, 1, 3)];
//! let report = Simulation::new(SimulationConfig::new(1, Policy::Fcfs), jobs)
//!     .unwrap()
//!     .run();
//! assert_eq!(report.makespan, 8);
//! ```

mod driver;
mod workload;

pub use driver::{CompletionRecord, SimEvent, Simulation, SimulationReport};
pub use workload::WorkloadGenerator;
