use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::error::SchedulerError;
use crate::models::{JobId, JobSpec, Policy, Time};
use crate::scheduler::{Scheduler, SchedulerStats};
use crate::validation::validate_workload;

/// One event the driver fed to the scheduler, with the scheduler's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    /// A job entered the system.
    Arrival {
        /// Arrival time.
        time: Time,
        /// Arriving job.
        pid: JobId,
        /// Core the job was placed on, `None` if it was queued.
        core: Option<usize>,
    },
    /// A job ran out of remaining time.
    Finished {
        /// Completion time.
        time: Time,
        /// Finished job.
        pid: JobId,
        /// Core the job ran on.
        core: usize,
        /// Job dispatched to the freed core.
        next: Option<JobId>,
    },
    /// A round-robin time slice ended.
    QuantumExpired {
        /// Expiry time.
        time: Time,
        /// Core whose slice ended.
        core: usize,
        /// Job running on the core after the expiry.
        next: Option<JobId>,
    },
}

/// Per-job outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Job identifier.
    pub pid: JobId,
    /// Core the job finished on.
    pub core: usize,
    /// Arrival time.
    pub arrival: Time,
    /// Total CPU time the job needed.
    pub running_time: Time,
    /// First dispatch time.
    pub start_time: Option<Time>,
    /// Time the job finished.
    pub completion_time: Time,
}

/// Summary of a finished simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Policy the run used.
    pub policy: Policy,
    /// Number of cores.
    pub cores: usize,
    /// Mean wait time.
    pub average_waiting_time: f64,
    /// Mean turnaround time.
    pub average_turnaround_time: f64,
    /// Mean response time, reported per the policy.
    pub average_response_time: f64,
    /// Completion time of the last job.
    pub makespan: Time,
    /// Raw totals behind the averages.
    pub stats: SchedulerStats,
    /// Jobs in completion order.
    pub jobs: Vec<CompletionRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum EventKind {
    // Same-time order: completions free cores before expiries and arrivals.
    Finish,
    Quantum,
    Arrival,
}

/// Replays a workload against a [`Scheduler`].
///
/// Owns the simulated clock: completion times follow from each running
/// job's remaining time, quantum expiries from dispatch times, and
/// arrivals from the workload.
#[derive(Debug)]
pub struct Simulation {
    scheduler: Scheduler,
    arrivals: Vec<JobSpec>,
    cursor: usize,
    quantum: Option<Time>,
    slice_end: Vec<Option<Time>>,
    records: Vec<CompletionRecord>,
}

impl Simulation {
    /// Validates `config` and `workload` and prepares the run.
    ///
    /// The workload need not be sorted; arrivals are replayed by time, then pid.
    pub fn new(
        config: SimulationConfig,
        mut workload: Vec<JobSpec>,
    ) -> Result<Self, SchedulerError> {
        config.validate()?;
        validate_workload(&workload).map_err(SchedulerError::InvalidWorkload)?;

        workload.sort_by(|a, b| a.arrival.cmp(&b.arrival).then_with(|| a.pid.cmp(&b.pid)));

        let scheduler = Scheduler::from_config(&config.scheduler)?;
        let quantum = if config.scheduler.policy.is_round_robin() {
            config.quantum
        } else {
            None
        };

        Ok(Self {
            slice_end: vec![None; scheduler.cores()],
            scheduler,
            arrivals: workload,
            cursor: 0,
            quantum,
            records: Vec::new(),
        })
    }

    /// Scheduler under simulation.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Whether every job has arrived and finished.
    pub fn is_finished(&self) -> bool {
        self.cursor == self.arrivals.len()
            && self.scheduler.waiting_len() == 0
            && (0..self.scheduler.cores()).all(|core| self.scheduler.running_job(core).is_none())
    }

    /// Processes the next event. Returns `None` once the workload has drained.
    pub fn step(&mut self) -> Option<SimEvent> {
        let (time, kind, core) = self.next_event()?;

        let event = match kind {
            EventKind::Finish => self.finish(core, time)?,
            EventKind::Quantum => {
                let next = self.scheduler.quantum_expired(core, time);
                self.start_slice(core, next.map(|_| time));
                SimEvent::QuantumExpired { time, core, next }
            }
            EventKind::Arrival => {
                let spec = self.arrivals[self.cursor];
                self.cursor += 1;
                let placed = self
                    .scheduler
                    .new_job(spec.pid, time, spec.running_time, spec.priority);
                if let Some(core) = placed {
                    self.start_slice(core, Some(time));
                }
                SimEvent::Arrival {
                    time,
                    pid: spec.pid,
                    core: placed,
                }
            }
        };

        debug!(?event, "Simulation event");
        Some(event)
    }

    /// Runs to completion and returns the report.
    pub fn run(mut self) -> SimulationReport {
        while self.step().is_some() {}

        let report = SimulationReport {
            policy: self.scheduler.policy(),
            cores: self.scheduler.cores(),
            average_waiting_time: self.scheduler.average_waiting_time(),
            average_turnaround_time: self.scheduler.average_turnaround_time(),
            average_response_time: self.scheduler.average_response_time(),
            makespan: self.records.last().map_or(0, |r| r.completion_time),
            stats: self.scheduler.stats().clone(),
            jobs: std::mem::take(&mut self.records),
        };
        self.scheduler.clean_up();

        info!(
            policy = %report.policy,
            completed = report.stats.completed,
            makespan = report.makespan,
            "Simulation finished"
        );
        report
    }

    fn finish(&mut self, core: usize, time: Time) -> Option<SimEvent> {
        let job = self.scheduler.running_job(core)?;
        let pid = job.pid;
        self.records.push(CompletionRecord {
            pid,
            core,
            arrival: job.arrival_time,
            running_time: job.running_time,
            start_time: job.start_time,
            completion_time: time,
        });

        let next = self.scheduler.job_finished(core, pid, time);
        self.start_slice(core, next.map(|_| time));
        Some(SimEvent::Finished {
            time,
            pid,
            core,
            next,
        })
    }

    fn start_slice(&mut self, core: usize, dispatched_at: Option<Time>) {
        self.slice_end[core] = match (self.quantum, dispatched_at) {
            (Some(q), Some(t)) => Some(t + q),
            _ => None,
        };
    }

    fn next_event(&self) -> Option<(Time, EventKind, usize)> {
        let now = self.scheduler.now();
        let mut best: Option<(Time, EventKind, usize)> = None;
        let mut consider = |candidate: (Time, EventKind, usize)| {
            let earlier = match best {
                None => true,
                Some(current) => candidate.cmp(&current) == Ordering::Less,
            };
            if earlier {
                best = Some(candidate);
            }
        };

        for core in 0..self.scheduler.cores() {
            if let Some(job) = self.scheduler.running_job(core) {
                consider((now + job.time_remaining, EventKind::Finish, core));
                if let Some(end) = self.slice_end[core] {
                    consider((end, EventKind::Quantum, core));
                }
            }
        }
        if let Some(spec) = self.arrivals.get(self.cursor) {
            consider((spec.arrival, EventKind::Arrival, 0));
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::WorkloadGenerator;
    use crate::validation::ValidationErrorKind;

    fn run(
        cores: usize,
        policy: Policy,
        quantum: Option<Time>,
        jobs: Vec<JobSpec>,
    ) -> SimulationReport {
        let mut config = SimulationConfig::new(cores, policy);
        config.quantum = quantum;
        Simulation::new(config, jobs).unwrap().run()
    }

    #[test]
    fn test_fcfs_example() {
        let report = run(
            1,
            Policy::Fcfs,
            None,
            vec![JobSpec::new(0, 0, 5), JobSpec::new(1, 1, 3)],
        );
        assert!((report.average_waiting_time - 2.0).abs() < 1e-10);
        assert!((report.average_response_time - 2.0).abs() < 1e-10);
        assert!((report.average_turnaround_time - 6.0).abs() < 1e-10);
        assert_eq!(report.makespan, 8);
        assert_eq!(report.jobs[1].start_time, Some(5));
    }

    #[test]
    fn test_psjf_preemption_timeline() {
        let mut sim = Simulation::new(
            SimulationConfig::new(1, Policy::Psjf),
            vec![JobSpec::new(0, 0, 10), JobSpec::new(1, 2, 3)],
        )
        .unwrap();

        assert_eq!(
            sim.step(),
            Some(SimEvent::Arrival { time: 0, pid: 0, core: Some(0) })
        );
        assert_eq!(
            sim.step(),
            Some(SimEvent::Arrival { time: 2, pid: 1, core: Some(0) })
        );
        assert_eq!(
            sim.step(),
            Some(SimEvent::Finished { time: 5, pid: 1, core: 0, next: Some(0) })
        );
        assert_eq!(
            sim.step(),
            Some(SimEvent::Finished { time: 13, pid: 0, core: 0, next: None })
        );
        assert_eq!(sim.step(), None);
        assert!(sim.is_finished());
    }

    #[test]
    fn test_rr_timeline() {
        let report = run(
            1,
            Policy::Rr,
            Some(2),
            vec![JobSpec::new(0, 0, 4), JobSpec::new(1, 0, 4)],
        );
        assert!((report.average_response_time - 1.0).abs() < 1e-10);
        assert!((report.average_waiting_time - 3.0).abs() < 1e-10);
        assert!((report.average_turnaround_time - 7.0).abs() < 1e-10);
        let order: Vec<JobId> = report.jobs.iter().map(|r| r.pid).collect();
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn test_finish_before_arrival_at_same_time() {
        let report = run(
            1,
            Policy::Fcfs,
            None,
            vec![JobSpec::new(0, 0, 3), JobSpec::new(1, 3, 2)],
        );
        // Job 1 arrives as job 0 finishes and finds the core idle.
        assert_eq!(report.jobs[1].start_time, Some(3));
        assert!((report.average_waiting_time - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_unsorted_workload_is_replayed_in_order() {
        let report = run(
            1,
            Policy::Fcfs,
            None,
            vec![JobSpec::new(2, 4, 1), JobSpec::new(1, 0, 2), JobSpec::new(0, 0, 2)],
        );
        let order: Vec<JobId> = report.jobs.iter().map(|r| r.pid).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_rejects_bad_setup() {
        let err = Simulation::new(SimulationConfig::new(1, Policy::Rr), vec![]).unwrap_err();
        assert_eq!(err, SchedulerError::MissingQuantum);

        let err = Simulation::new(
            SimulationConfig::new(1, Policy::Fcfs),
            vec![JobSpec::new(0, 0, 1), JobSpec::new(0, 1, 1)],
        )
        .unwrap_err();
        match err {
            SchedulerError::InvalidWorkload(errors) => {
                assert_eq!(errors[0].kind, ValidationErrorKind::DuplicatePid)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_workload() {
        let report = run(2, Policy::Ppri, None, vec![]);
        assert_eq!(report.stats.completed, 0);
        assert_eq!(report.makespan, 0);
        assert!((report.average_response_time - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_random_workloads_drain_under_every_policy() {
        let jobs = WorkloadGenerator::with_seed(42)
            .with_ticks(300)
            .with_bursts(2, 7, 0.4)
            .generate();
        let mean_burst =
            jobs.iter().map(|j| j.running_time).sum::<Time>() as f64 / jobs.len() as f64;

        for policy in Policy::ALL {
            for cores in [1, 3] {
                let quantum = policy.is_round_robin().then_some(3);
                let report = run(cores, policy, quantum, jobs.clone());

                assert_eq!(report.stats.completed, jobs.len(), "{policy} x{cores}");
                assert!(
                    (report.average_turnaround_time - report.average_waiting_time - mean_burst)
                        .abs()
                        < 1e-9,
                    "{policy} x{cores}"
                );
                for record in &report.jobs {
                    let start = record.start_time.unwrap();
                    assert!(start >= record.arrival);
                    assert!(record.completion_time - start >= record.running_time);
                    assert!(record.core < cores);
                }
                if !policy.is_preemptive() && !policy.is_round_robin() {
                    assert!(
                        (report.average_response_time - report.average_waiting_time).abs()
                            < 1e-10
                    );
                }
            }
        }
    }

    #[test]
    fn test_more_cores_never_hurt_fcfs() {
        let jobs = WorkloadGenerator::with_seed(5).with_ticks(200).generate();
        let one = run(1, Policy::Fcfs, None, jobs.clone());
        let four = run(4, Policy::Fcfs, None, jobs);
        assert!(four.average_waiting_time <= one.average_waiting_time);
        assert!(four.makespan <= one.makespan);
    }

    #[test]
    fn test_report_serializes() {
        let report = run(1, Policy::Sjf, None, vec![JobSpec::new(0, 0, 2)]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["policy"], "sjf");
        assert_eq!(json["makespan"], 2);
        assert_eq!(json["jobs"][0]["pid"], 0);
    }
}
