//! Per-job metrics and run-level KPIs.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Completion | Latest segment end of the job |
//! | Turnaround | completion - arrival |
//! | Waiting | turnaround - burst |
//! | Response | first segment start - arrival |
//! | Makespan | End of the last segment |
//! | Throughput | Jobs completed per tick over the makespan |
//! | CPU Utilization | Busy ticks / makespan |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2

use serde::{Deserialize, Serialize};

use crate::models::{Job, Timeline};

/// Performance metrics for one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMetrics {
    /// Job ID.
    pub job_id: String,
    /// Submitted arrival time.
    pub arrival_time: i64,
    /// Submitted burst time.
    pub burst_time: i64,
    /// Tick at which the job finished.
    pub completion_time: i64,
    /// completion - arrival.
    pub turnaround_time: i64,
    /// turnaround - burst.
    pub waiting_time: i64,
    /// first start - arrival.
    pub response_time: i64,
}

impl JobMetrics {
    /// Derives metrics for `job` from a finished timeline.
    ///
    /// Returns `None` if the job never ran.
    pub fn from_timeline(job: &Job, timeline: &Timeline) -> Option<Self> {
        let completion_time = timeline.completion_time(&job.id)?;
        let first_start = timeline.first_start(&job.id)?;
        let turnaround_time = completion_time - job.arrival_time;
        let waiting_time = turnaround_time - job.burst_time;
        let response_time = first_start - job.arrival_time;

        debug_assert!(waiting_time >= 0, "negative waiting time for {}", job.id);
        debug_assert!(response_time >= 0, "negative response time for {}", job.id);

        Some(Self {
            job_id: job.id.clone(),
            arrival_time: job.arrival_time,
            burst_time: job.burst_time,
            completion_time,
            turnaround_time,
            waiting_time,
            response_time,
        })
    }
}

/// Metrics for every job that ran, in input order.
pub fn job_metrics(jobs: &[Job], timeline: &Timeline) -> Vec<JobMetrics> {
    jobs.iter()
        .filter_map(|job| JobMetrics::from_timeline(job, timeline))
        .collect()
}

/// Run-level performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuKpi {
    /// End of the last segment.
    pub makespan: i64,
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
    /// Mean waiting time.
    pub avg_waiting_time: f64,
    /// Mean response time.
    pub avg_response_time: f64,
    /// Completed jobs per tick over the makespan.
    pub throughput: f64,
    /// Busy ticks / makespan (0.0..1.0).
    pub cpu_utilization: f64,
    /// Ticks with no job running before the makespan.
    pub idle_time: i64,
    /// Switches between different jobs.
    pub context_switches: usize,
}

impl CpuKpi {
    /// Computes KPIs from a timeline and its per-job metrics.
    pub fn calculate(timeline: &Timeline, metrics: &[JobMetrics]) -> Self {
        let makespan = timeline.makespan();
        let n = metrics.len();

        let mean = |f: fn(&JobMetrics) -> i64| -> f64 {
            if n == 0 {
                0.0
            } else {
                metrics.iter().map(|m| f(m) as f64).sum::<f64>() / n as f64
            }
        };

        let (throughput, cpu_utilization) = if makespan <= 0 {
            (0.0, 0.0)
        } else {
            (
                n as f64 / makespan as f64,
                timeline.busy_time() as f64 / makespan as f64,
            )
        };

        Self {
            makespan,
            avg_turnaround_time: mean(|m| m.turnaround_time),
            avg_waiting_time: mean(|m| m.waiting_time),
            avg_response_time: mean(|m| m.response_time),
            throughput,
            cpu_utilization,
            idle_time: timeline.idle_time(),
            context_switches: timeline.context_switches(),
        }
    }
}
