//! Scheduling domain models.
//!
//! Provides the data types shared by the scheduler, the simulation driver
//! and validation.
//!
//! # Domain Mappings
//!
//! | u-cpusched | Operating system | Batch cluster |
//! |------------|------------------|---------------|
//! | Job | Process burst | Batch job |
//! | core slot | CPU | Worker node |
//! | Policy | Scheduling class | Queue discipline |

mod job;
mod policy;

pub use job::{Job, JobId, JobSpec, Time};
pub use policy::Policy;
