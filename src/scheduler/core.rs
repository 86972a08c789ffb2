//! Multi-core scheduling decisions.
//!
//! # Algorithm
//!
//! The scheduler is event driven. The external driver owns the clock and
//! calls one of three entry points per event, with non-decreasing times:
//!
//! 1. `new_job`: place an arrival on the lowest idle core, or (preemptive
//!    policies) displace the least-favored running job that ranks after
//!    it, or enqueue it.
//! 2. `job_finished`: account the job's timings, then refill the core
//!    from the head of the waiting queue.
//! 3. `quantum_expired`: requeue the running job and dispatch the head,
//!    unless nothing else is waiting.
//!
//! Remaining time is tracked lazily: each entry point first charges the
//! elapsed time since the previous event to every running job, so
//! remaining-time orderings are current before any comparison.
//!
//! # Complexity
//! O(c + q) per event, c = cores, q = waiting jobs.

use std::cmp::Ordering;

use tracing::{debug, trace, warn};

use super::SchedulerStats;
use crate::config::SchedulerConfig;
use crate::error::SchedulerError;
use crate::models::{Job, JobId, Policy, Time};
use crate::queue::OrderedQueue;

/// A job's placement at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobView {
    /// Job identifier.
    pub pid: JobId,
    /// Core the job runs on, `None` while waiting.
    pub core: Option<usize>,
    /// Remaining time as of the scheduler's clock.
    pub time_remaining: Time,
    /// First dispatch time, if any.
    pub start_time: Option<Time>,
}

/// Event-driven multi-core job scheduler.
///
/// Owns every unfinished job: each one sits in exactly one core slot or
/// exactly once in the waiting queue.
///
/// # Example
///
/// ```
/// use u_cpusched::models::Policy;
/// use u_cpusched::scheduler::Scheduler;
///
/// let mut s = Scheduler::new(1, Policy::Fcfs).unwrap();
/// assert_eq!(s.new_job(0, 0, 5, 0), Some(0));
/// assert_eq!(s.new_job(1, 1, 3, 0), None);
/// assert_eq!(s.job_finished(0, 0, 5), Some(1));
/// assert_eq!(s.job_finished(0, 1, 8), None);
/// assert!((s.average_waiting_time() - 2.0).abs() < 1e-10);
/// ```
#[derive(Debug)]
pub struct Scheduler {
    cores: Vec<Option<Job>>,
    queue: OrderedQueue<Job, Policy>,
    policy: Policy,
    stats: SchedulerStats,
    now: Time,
}

impl Scheduler {
    /// Starts a scheduler with `cores` idle cores and the given policy.
    ///
    /// The clock and all statistics start at zero.
    pub fn new(cores: usize, policy: Policy) -> Result<Self, SchedulerError> {
        Self::from_config(&SchedulerConfig::new(cores, policy))
    }

    /// Starts a scheduler from a config.
    pub fn from_config(config: &SchedulerConfig) -> Result<Self, SchedulerError> {
        config.validate()?;
        debug!(cores = config.cores, policy = %config.policy, "Scheduler started");
        Ok(Self {
            cores: vec![None; config.cores],
            queue: OrderedQueue::new(config.policy),
            policy: config.policy,
            stats: SchedulerStats::new(),
            now: 0,
        })
    }

    /// Handles an arrival at `time`.
    ///
    /// # Returns
    /// * `Some(core)` - the job runs on `core` from now (preempting its
    ///   previous occupant, if any)
    /// * `None` - the job waits; no scheduling change
    pub fn new_job(
        &mut self,
        pid: JobId,
        time: Time,
        running_time: Time,
        priority: i32,
    ) -> Option<usize> {
        self.advance_clock(time);

        let mut job = Job::new(pid, time, running_time, priority);

        if let Some(core) = self.idle_core() {
            job.start_time = Some(time);
            self.cores[core] = Some(job);
            debug!(pid, core, time, "Arrival dispatched to idle core");
            return Some(core);
        }

        if self.policy.is_preemptive() {
            if let Some(core) = self.preemption_victim(&job) {
                job.start_time = Some(time);
                if let Some(mut victim) = self.cores[core].replace(job) {
                    // Dispatched this very tick: it never truly ran.
                    if victim.start_time == Some(time) {
                        victim.start_time = None;
                    }
                    debug!(
                        pid,
                        victim = victim.pid,
                        remaining = victim.time_remaining,
                        core,
                        time,
                        "Arrival preempted running job"
                    );
                    self.queue.offer(victim);
                }
                return Some(core);
            }
        }

        let position = self.queue.offer(job);
        debug!(pid, position, time, "Arrival queued");
        None
    }

    /// Handles completion of `pid` on `core` at `time`.
    ///
    /// # Returns
    /// * `Some(pid)` - job now dispatched to `core`
    /// * `None` - `core` stays idle
    pub fn job_finished(&mut self, core: usize, pid: JobId, time: Time) -> Option<JobId> {
        self.advance_clock(time);

        match self.cores.get_mut(core).and_then(Option::take) {
            Some(job) => {
                if job.pid != pid {
                    warn!(core, expected = pid, actual = job.pid, "Finished pid mismatch");
                }
                self.stats.record(&job, time);
                debug!(pid = job.pid, core, time, "Job finished");
            }
            None => warn!(core, pid, time, "Finish reported for idle core"),
        }

        self.dispatch(core, time)
    }

    /// Handles a round-robin quantum expiry on `core` at `time`.
    ///
    /// With other jobs waiting, the running job goes back into the queue
    /// and the head takes the core. Otherwise the running job continues.
    ///
    /// The requeued job is offered under the active policy's order. Under
    /// round robin that is the tail; under other policies a job that still
    /// ranks first is polled straight back onto the core.
    ///
    /// # Returns
    /// * `Some(pid)` - job that runs on `core` from now
    /// * `None` - `core` is idle and nothing waits
    pub fn quantum_expired(&mut self, core: usize, time: Time) -> Option<JobId> {
        self.advance_clock(time);

        let slot = self.cores.get_mut(core)?;
        if self.queue.is_empty() {
            return slot.as_ref().map(|job| job.pid);
        }

        if let Some(current) = slot.take() {
            trace!(pid = current.pid, core, time, "Quantum expired, requeueing");
            self.queue.offer(current);
        }
        self.dispatch(core, time)
    }

    /// Mean wait time over completed jobs, 0.0 if none completed.
    ///
    /// Meaningful only once the workload has drained.
    pub fn average_waiting_time(&self) -> f64 {
        self.stats.average_waiting_time()
    }

    /// Mean turnaround time over completed jobs, 0.0 if none completed.
    ///
    /// Meaningful only once the workload has drained.
    pub fn average_turnaround_time(&self) -> f64 {
        self.stats.average_turnaround_time()
    }

    /// Mean response time over completed jobs, 0.0 if none completed.
    ///
    /// Non-preemptive, non-round-robin policies report the wait average;
    /// the others report first-dispatch latency. Meaningful only once the
    /// workload has drained.
    pub fn average_response_time(&self) -> f64 {
        self.stats.average_response_time(self.policy)
    }

    /// Releases all remaining jobs and returns the final statistics.
    pub fn clean_up(mut self) -> SchedulerStats {
        let running = self.cores.iter().flatten().count();
        if running > 0 || !self.queue.is_empty() {
            warn!(
                running,
                waiting = self.queue.len(),
                "Cleaning up with unfinished jobs"
            );
        }
        self.queue.clear();
        self.cores.iter_mut().for_each(|slot| *slot = None);
        std::mem::take(&mut self.stats)
    }

    /// Renders running jobs as `pid(core)` then waiting jobs as `pid(-1)`,
    /// in queue order.
    ///
    /// Running jobs live in core slots, outside the queue, so they are
    /// listed by core rather than at their rank among the waiting jobs.
    pub fn show_queue(&self) -> String {
        self.snapshot()
            .iter()
            .map(|view| format!("{}({})", view.pid, view.core.map_or(-1, |c| c as i64)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Every unfinished job: running jobs by core, then the waiting queue.
    pub fn snapshot(&self) -> Vec<JobView> {
        let running = self.cores.iter().enumerate().filter_map(|(core, slot)| {
            slot.as_ref().map(|job| JobView {
                pid: job.pid,
                core: Some(core),
                time_remaining: job.time_remaining,
                start_time: job.start_time,
            })
        });
        let waiting = self.queue.iter().map(|job| JobView {
            pid: job.pid,
            core: None,
            time_remaining: job.time_remaining,
            start_time: job.start_time,
        });
        running.chain(waiting).collect()
    }

    /// Time of the most recent event.
    pub fn now(&self) -> Time {
        self.now
    }

    /// Number of cores.
    pub fn cores(&self) -> usize {
        self.cores.len()
    }

    /// Active policy.
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Job running on `core`, if any.
    pub fn running_job(&self, core: usize) -> Option<&Job> {
        self.cores.get(core).and_then(Option::as_ref)
    }

    /// Number of jobs waiting for a core.
    pub fn waiting_len(&self) -> usize {
        self.queue.len()
    }

    /// Number of jobs that have finished.
    pub fn completed_jobs(&self) -> usize {
        self.stats.completed
    }

    /// Statistics accumulated so far.
    pub fn stats(&self) -> &SchedulerStats {
        &self.stats
    }

    fn advance_clock(&mut self, time: Time) {
        let elapsed = time - self.now;
        if elapsed != 0 {
            for job in self.cores.iter_mut().flatten() {
                job.time_remaining -= elapsed;
            }
            trace!(from = self.now, to = time, "Clock advanced");
        }
        self.now = time;
    }

    fn idle_core(&self) -> Option<usize> {
        self.cores.iter().position(Option::is_none)
    }

    /// Core whose occupant the arrival should displace.
    ///
    /// Walks the cores keeping the least-favored job seen so far, starting
    /// from the arrival itself; a core is picked only if its occupant ranks
    /// after everything kept before it. On equally ranked occupants the
    /// lowest core wins.
    fn preemption_victim(&self, incoming: &Job) -> Option<usize> {
        let mut worst = incoming;
        let mut victim = None;
        for (core, slot) in self.cores.iter().enumerate() {
            if let Some(running) = slot {
                if self.policy.compare(worst, running) == Ordering::Less {
                    worst = running;
                    victim = Some(core);
                }
            }
        }
        victim
    }

    fn dispatch(&mut self, core: usize, time: Time) -> Option<JobId> {
        let slot = self.cores.get_mut(core)?;
        let mut next = self.queue.poll()?;
        next.mark_started(time);
        let pid = next.pid;
        debug!(pid, core, time, remaining = next.time_remaining, "Dispatched from queue");
        *slot = Some(next);
        Some(pid)
    }
}
