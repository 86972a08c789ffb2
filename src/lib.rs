//! Discrete-event CPU scheduling core for the U-Engine ecosystem.
//!
//! Provides a comparator-ordered queue and a multi-core job scheduler
//! implementing six classic policies (FCFS, SJF, PSJF, PRI, PPRI, RR). An
//! external driver owns the simulated clock and reports arrivals,
//! completions and quantum expiries; the scheduler answers with core
//! assignments and keeps response/wait/turnaround statistics.
//!
//! # Modules
//!
//! - **`queue`**: `OrderedQueue`, a stable comparator-ordered sequence
//! - **`models`**: Domain types: `Job`, `JobSpec`, `Policy`
//! - **`dispatching`**: Ordering rules behind each policy
//! - **`scheduler`**: `Scheduler` decisions and `SchedulerStats`
//! - **`sim`**: Event-driven driver and synthetic workloads
//! - **`validation`**: Workload integrity checks
//! - **`config`**: Serde-loadable scheduler and simulation settings
//!
//! # References
//!
//! - Silberschatz, Galvin, Gagne (2018), "Operating System Concepts", Ch. 5
//! - Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces", Ch. 7-9

pub mod config;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod queue;
pub mod scheduler;
pub mod sim;
pub mod validation;

pub use config::{SchedulerConfig, SimulationConfig};
pub use error::SchedulerError;
pub use models::{Job, JobId, JobSpec, Policy, Time};
pub use queue::OrderedQueue;
pub use scheduler::{Scheduler, SchedulerStats};
