//! CPU scheduling engine.
//!
//! Simulates a single CPU running a set of jobs under a classical policy
//! and reports the execution timeline plus per-job metrics.
//!
//! # Policies
//!
//! | Policy | Preemptive | Selection |
//! |--------|-----------|-----------|
//! | FCFS | no | earliest arrival |
//! | SJF | no | shortest burst |
//! | SRTF | yes | shortest remaining time |
//! | Priority | no | lowest priority number |
//! | Priority (preemptive) | yes | lowest priority number |
//! | Round Robin | yes | FIFO queue, fixed time slice |
//!
//! Ties always fall back to earliest arrival, then input order.
//!
//! # Usage
//!
//! ```
//! use os_sched_sim::cpu::{CpuPolicy, CpuScheduler};
//! use os_sched_sim::models::Job;
//!
//! let jobs = vec![Job::new("P1", 0, 8), Job::new("P2", 1, 4)];
//! let schedule = CpuScheduler::new(CpuPolicy::Srtf).run(&jobs).unwrap();
//!
//! assert_eq!(schedule.segments.len(), 3);
//! assert_eq!(schedule.metrics_for("P2").unwrap().waiting_time, 0);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod metrics;
mod nonpreemptive;
mod preemptive;
mod round_robin;
pub mod selection;

pub use metrics::{job_metrics, CpuKpi, JobMetrics};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::models::{Job, Timeline};
use crate::validation::{
    validate_jobs, validate_quantum, SimulationResult, ValidationError, ValidationErrorKind,
};
use selection::{EarliestArrival, HighestPriority, ShortestBurst, ShortestRemaining};

/// Time slice used by round robin when neither the job nor the scheduler sets one.
pub const DEFAULT_TIME_QUANTUM: i64 = 2;

/// CPU scheduling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CpuPolicy {
    /// First come, first served.
    Fcfs,
    /// Shortest job first (non-preemptive).
    Sjf,
    /// Shortest remaining time first (preemptive SJF).
    Srtf,
    /// Priority scheduling, run to completion.
    PriorityNonPreemptive,
    /// Priority scheduling with preemption on a strictly more urgent arrival.
    PriorityPreemptive,
    /// Round robin with a fixed time quantum.
    RoundRobin,
}

impl CpuPolicy {
    /// All policies, in presentation order.
    pub const ALL: [CpuPolicy; 6] = [
        CpuPolicy::Fcfs,
        CpuPolicy::Sjf,
        CpuPolicy::Srtf,
        CpuPolicy::PriorityNonPreemptive,
        CpuPolicy::PriorityPreemptive,
        CpuPolicy::RoundRobin,
    ];

    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            CpuPolicy::Fcfs => "FCFS",
            CpuPolicy::Sjf => "SJF",
            CpuPolicy::Srtf => "SRTF",
            CpuPolicy::PriorityNonPreemptive => "Priority (Non-Preemptive)",
            CpuPolicy::PriorityPreemptive => "Priority (Preemptive)",
            CpuPolicy::RoundRobin => "RR",
        }
    }

    /// Whether a running job can lose the CPU before it finishes.
    pub fn is_preemptive(&self) -> bool {
        matches!(
            self,
            CpuPolicy::Srtf | CpuPolicy::PriorityPreemptive | CpuPolicy::RoundRobin
        )
    }
}

impl fmt::Display for CpuPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CpuPolicy {
    type Err = ValidationError;

    /// Parses common abbreviations, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' ', '_'], "");
        match normalized.as_str() {
            "FCFS" | "FIFO" => Ok(CpuPolicy::Fcfs),
            "SJF" => Ok(CpuPolicy::Sjf),
            "SRTF" | "SRJF" => Ok(CpuPolicy::Srtf),
            "PRIORITY" | "PRIORITYNONPREEMPTIVE" => Ok(CpuPolicy::PriorityNonPreemptive),
            "PRIORITYPREEMPTIVE" => Ok(CpuPolicy::PriorityPreemptive),
            "RR" | "ROUNDROBIN" => Ok(CpuPolicy::RoundRobin),
            _ => Err(ValidationError {
                kind: ValidationErrorKind::InvalidParameter,
                message: format!("Unknown CPU policy: {s}"),
            }),
        }
    }
}

/// Result of a CPU simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuSchedule {
    /// Policy that produced this schedule.
    pub policy: CpuPolicy,
    /// Execution segments in time order.
    pub segments: Timeline,
    /// Per-job metrics, in input order.
    pub metrics: Vec<JobMetrics>,
}

impl CpuSchedule {
    /// Metrics for a job.
    pub fn metrics_for(&self, job_id: &str) -> Option<&JobMetrics> {
        self.metrics.iter().find(|m| m.job_id == job_id)
    }

    /// Completion time of the whole run.
    pub fn makespan(&self) -> i64 {
        self.segments.makespan()
    }

    /// Run-level KPIs.
    pub fn kpi(&self) -> CpuKpi {
        CpuKpi::calculate(&self.segments, &self.metrics)
    }
}

/// Input container for a CPU run.
///
/// Lets a wrapper deserialize one document and run it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuRequest {
    /// Jobs to schedule.
    pub jobs: Vec<Job>,
    /// Policy to apply.
    pub policy: CpuPolicy,
    /// Default round robin quantum.
    #[serde(default = "default_time_quantum")]
    pub time_quantum: i64,
}

fn default_time_quantum() -> i64 {
    DEFAULT_TIME_QUANTUM
}

impl CpuRequest {
    /// Creates a request with the default time quantum.
    pub fn new(jobs: Vec<Job>, policy: CpuPolicy) -> Self {
        Self {
            jobs,
            policy,
            time_quantum: DEFAULT_TIME_QUANTUM,
        }
    }

    /// Sets the default round robin quantum.
    pub fn with_time_quantum(mut self, quantum: i64) -> Self {
        self.time_quantum = quantum;
        self
    }

    /// Runs the request.
    pub fn run(&self) -> SimulationResult<CpuSchedule> {
        CpuScheduler::new(self.policy)
            .with_time_quantum(self.time_quantum)
            .run(&self.jobs)
    }
}

/// Configured CPU scheduler.
///
/// Holds configuration only; every [`run`](Self::run) starts from fresh
/// state, so one scheduler can be reused across runs and threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuScheduler {
    policy: CpuPolicy,
    time_quantum: i64,
}

impl CpuScheduler {
    /// Creates a scheduler for a policy.
    pub fn new(policy: CpuPolicy) -> Self {
        Self {
            policy,
            time_quantum: DEFAULT_TIME_QUANTUM,
        }
    }

    /// Sets the default round robin quantum.
    pub fn with_time_quantum(mut self, quantum: i64) -> Self {
        self.time_quantum = quantum;
        self
    }

    /// Configured policy.
    pub fn policy(&self) -> CpuPolicy {
        self.policy
    }

    /// Configured default quantum.
    pub fn time_quantum(&self) -> i64 {
        self.time_quantum
    }

    /// Simulates the jobs under the configured policy.
    ///
    /// Input is validated before anything runs. On failure every detected
    /// problem is returned and no partial schedule is produced. An empty
    /// job list yields an empty schedule.
    #[instrument(skip(self, jobs), fields(policy = %self.policy, jobs = jobs.len()))]
    pub fn run(&self, jobs: &[Job]) -> SimulationResult<CpuSchedule> {
        self.validate(jobs).inspect_err(|errors| {
            debug!(errors = errors.len(), "rejected cpu input");
        })?;

        let segments = match self.policy {
            CpuPolicy::Fcfs => nonpreemptive::run(jobs, &EarliestArrival),
            CpuPolicy::Sjf => nonpreemptive::run(jobs, &ShortestBurst),
            CpuPolicy::Srtf => preemptive::run(jobs, &ShortestRemaining),
            CpuPolicy::PriorityNonPreemptive => nonpreemptive::run(jobs, &HighestPriority),
            CpuPolicy::PriorityPreemptive => preemptive::run(jobs, &HighestPriority),
            CpuPolicy::RoundRobin => round_robin::run(jobs, self.time_quantum),
        };
        let metrics = job_metrics(jobs, &segments);

        debug!(
            segments = segments.len(),
            makespan = segments.makespan(),
            "cpu simulation finished"
        );

        Ok(CpuSchedule {
            policy: self.policy,
            segments,
            metrics,
        })
    }

    fn validate(&self, jobs: &[Job]) -> Result<(), Vec<ValidationError>> {
        let mut errors = validate_jobs(jobs).err().unwrap_or_default();
        if self.policy == CpuPolicy::RoundRobin {
            if let Err(e) = validate_quantum(self.time_quantum) {
                errors.extend(e);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// First-come-first-served.
pub fn fcfs(jobs: &[Job]) -> SimulationResult<CpuSchedule> {
    CpuScheduler::new(CpuPolicy::Fcfs).run(jobs)
}

/// Non-preemptive shortest job first.
pub fn sjf(jobs: &[Job]) -> SimulationResult<CpuSchedule> {
    CpuScheduler::new(CpuPolicy::Sjf).run(jobs)
}

/// Shortest remaining time first.
pub fn srtf(jobs: &[Job]) -> SimulationResult<CpuSchedule> {
    CpuScheduler::new(CpuPolicy::Srtf).run(jobs)
}

/// Non-preemptive priority scheduling.
pub fn priority(jobs: &[Job]) -> SimulationResult<CpuSchedule> {
    CpuScheduler::new(CpuPolicy::PriorityNonPreemptive).run(jobs)
}

/// Preemptive priority scheduling.
pub fn priority_preemptive(jobs: &[Job]) -> SimulationResult<CpuSchedule> {
    CpuScheduler::new(CpuPolicy::PriorityPreemptive).run(jobs)
}

/// Round robin with the given default quantum.
pub fn round_robin(jobs: &[Job], time_quantum: i64) -> SimulationResult<CpuSchedule> {
    CpuScheduler::new(CpuPolicy::RoundRobin)
        .with_time_quantum(time_quantum)
        .run(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Segment;
    use crate::workload::WorkloadGenerator;

    fn classic_jobs() -> Vec<Job> {
        vec![
            Job::new("P1", 0, 8).with_priority(3),
            Job::new("P2", 1, 4).with_priority(1),
            Job::new("P3", 2, 9).with_priority(4),
            Job::new("P4", 3, 5).with_priority(2),
        ]
    }

    fn assert_invariants(jobs: &[Job], schedule: &CpuSchedule) {
        assert_eq!(schedule.metrics.len(), jobs.len());
        for job in jobs {
            // No work created or lost.
            assert_eq!(schedule.segments.service_time(&job.id), job.burst_time);

            let m = schedule.metrics_for(&job.id).unwrap();
            assert!(m.completion_time >= job.earliest_completion());
            assert!(m.waiting_time >= 0);
            assert!(m.response_time >= 0);
            assert!(m.response_time <= m.waiting_time);

            let last = schedule.segments.segments_for_job(&job.id).last().unwrap();
            assert!(last.completed);
        }
        for s in &schedule.segments {
            assert!(s.start_time < s.end_time);
        }
        for w in schedule.segments.segments().windows(2) {
            assert!(w[0].end_time <= w[1].start_time);
        }
    }

    #[test]
    fn test_all_policies_conserve_work() {
        let jobs = classic_jobs();
        for policy in CpuPolicy::ALL {
            let schedule = CpuScheduler::new(policy).run(&jobs).unwrap();
            assert_eq!(schedule.policy, policy);
            assert_invariants(&jobs, &schedule);
            assert_eq!(schedule.makespan(), 26);
        }
    }

    #[test]
    fn test_generated_workloads_hold_invariants() {
        for seed in 0..20 {
            let jobs = WorkloadGenerator::new(seed).with_job_count(12).jobs();
            for policy in CpuPolicy::ALL {
                let schedule = CpuScheduler::new(policy)
                    .with_time_quantum(3)
                    .run(&jobs)
                    .unwrap();
                assert_invariants(&jobs, &schedule);
            }
        }
    }

    #[test]
    fn test_srtf_preempts_on_strictly_shorter_arrival() {
        let schedule = srtf(&classic_jobs()).unwrap();
        assert_eq!(schedule.segments.segments()[0], Segment::new("P1", 0, 1, false));
        assert!((schedule.kpi().avg_waiting_time - 6.5).abs() < 1e-10);
    }

    #[test]
    fn test_fcfs_metrics() {
        let schedule = fcfs(&classic_jobs()).unwrap();
        let waits: Vec<i64> = schedule.metrics.iter().map(|m| m.waiting_time).collect();
        assert_eq!(waits, vec![0, 7, 10, 18]);
        assert_eq!(schedule.segments.context_switches(), 3);
    }

    #[test]
    fn test_sjf_order() {
        let schedule = sjf(&classic_jobs()).unwrap();
        let order: Vec<&str> = schedule.segments.iter().map(|s| s.job_id.as_str()).collect();
        assert_eq!(order, vec!["P1", "P2", "P4", "P3"]);
    }

    #[test]
    fn test_priority_policies() {
        let np = priority(&classic_jobs()).unwrap();
        let order: Vec<&str> = np.segments.iter().map(|s| s.job_id.as_str()).collect();
        assert_eq!(order, vec!["P1", "P2", "P4", "P3"]);

        let p = priority_preemptive(&classic_jobs()).unwrap();
        assert_eq!(
            p.segments.segments(),
            &[
                Segment::new("P1", 0, 1, false),
                Segment::new("P2", 1, 5, true),
                Segment::new("P4", 5, 10, true),
                Segment::new("P1", 10, 17, true),
                Segment::new("P3", 17, 26, true),
            ]
        );
    }

    #[test]
    fn test_round_robin_quantum() {
        let schedule = round_robin(&classic_jobs(), 4).unwrap();
        assert_eq!(schedule.segments.segments()[0], Segment::new("P1", 0, 4, false));
        assert_eq!(schedule.segments.segments()[1], Segment::new("P2", 4, 8, true));
    }

    #[test]
    fn test_single_job() {
        let jobs = vec![Job::new("solo", 3, 4)];
        for policy in CpuPolicy::ALL {
            let schedule = CpuScheduler::new(policy).run(&jobs).unwrap();
            assert_eq!(schedule.segments.segments(), &[Segment::new("solo", 3, 7, true)]);
            let m = schedule.metrics_for("solo").unwrap();
            assert_eq!(m.turnaround_time, 4);
            assert_eq!(m.waiting_time, 0);
            assert_eq!(m.response_time, 0);
        }
    }

    #[test]
    fn test_empty_input() {
        for policy in CpuPolicy::ALL {
            let schedule = CpuScheduler::new(policy).run(&[]).unwrap();
            assert!(schedule.segments.is_empty());
            assert!(schedule.metrics.is_empty());
            assert_eq!(schedule.makespan(), 0);
        }
    }

    #[test]
    fn test_deterministic() {
        let jobs = WorkloadGenerator::new(7).with_job_count(15).jobs();
        for policy in CpuPolicy::ALL {
            let scheduler = CpuScheduler::new(policy);
            assert_eq!(scheduler.run(&jobs).unwrap(), scheduler.run(&jobs).unwrap());
        }
    }

    #[test]
    fn test_rejects_invalid_jobs() {
        let jobs = vec![Job::new("P1", 0, 0), Job::new("P1", 0, 2)];
        let errors = fcfs(&jobs).unwrap_err();
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::InvalidJob));
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_rejects_time_range_overflow() {
        let jobs = vec![Job::new("A", i64::MAX - 1, 5)];
        for policy in CpuPolicy::ALL {
            let errors = CpuScheduler::new(policy).run(&jobs).unwrap_err();
            assert_eq!(errors[0].kind, ValidationErrorKind::InvalidJob);
        }
    }

    #[test]
    fn test_runs_up_to_time_range_limit() {
        // Latest arrival plus total burst is exactly i64::MAX.
        let jobs = vec![Job::new("A", 0, 3), Job::new("B", i64::MAX - 7, 4)];
        for policy in CpuPolicy::ALL {
            let schedule = CpuScheduler::new(policy).run(&jobs).unwrap();
            assert_eq!(schedule.makespan(), i64::MAX - 3, "{policy}");
            let kpi = schedule.kpi();
            assert!(kpi.avg_turnaround_time >= 3.0);
        }
    }

    #[test]
    fn test_rejects_bad_quantum_only_for_round_robin() {
        let jobs = vec![Job::new("P1", 0, 2)];
        let errors = round_robin(&jobs, 0).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidParameter);

        assert!(CpuScheduler::new(CpuPolicy::Fcfs)
            .with_time_quantum(0)
            .run(&jobs)
            .is_ok());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("srjf".parse::<CpuPolicy>().unwrap(), CpuPolicy::Srtf);
        assert_eq!("Round Robin".parse::<CpuPolicy>().unwrap(), CpuPolicy::RoundRobin);
        assert_eq!(
            "priority-preemptive".parse::<CpuPolicy>().unwrap(),
            CpuPolicy::PriorityPreemptive
        );
        let err = "MLFQ".parse::<CpuPolicy>().unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidParameter);
    }

    #[test]
    fn test_policy_flags() {
        assert!(!CpuPolicy::Sjf.is_preemptive());
        assert!(CpuPolicy::Srtf.is_preemptive());
        assert_eq!(CpuPolicy::Srtf.to_string(), "SRTF");
    }

    #[test]
    fn test_request_json() {
        let request: CpuRequest = serde_json::from_str(
            r#"{
                "jobs": [
                    {"id": "P1", "arrivalTime": 0, "burstTime": 3},
                    {"id": "P2", "arrivalTime": 1, "burstTime": 1}
                ],
                "policy": "ROUND_ROBIN"
            }"#,
        )
        .unwrap();
        assert_eq!(request.time_quantum, DEFAULT_TIME_QUANTUM);

        let schedule = request.run().unwrap();
        let json = serde_json::to_value(&schedule).unwrap();
        assert_eq!(json["policy"], "ROUND_ROBIN");
        assert_eq!(json["segments"][0]["jobId"], "P1");
        assert_eq!(json["metrics"][1]["turnaroundTime"], 2);
    }
}
