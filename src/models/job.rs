//! Job (process) model.
//!
//! A job is a unit of CPU work submitted to the CPU engine. It is
//! immutable once submitted; engines derive their own working copies.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

use serde::{Deserialize, Serialize};

/// A process submitted for CPU scheduling.
///
/// # Time Representation
/// All times are integer ticks relative to the simulation epoch (t=0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Unique job identifier (e.g. "P1").
    pub id: String,
    /// Tick at which the job becomes eligible to run.
    pub arrival_time: i64,
    /// Total CPU time the job needs.
    pub burst_time: i64,
    /// Scheduling priority (lower = more urgent). `None` ranks last.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// Queue level for multilevel policies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_level: Option<i32>,
    /// Per-job time slice for round robin. `None` = scheduler default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_quantum: Option<i64>,
}

impl Job {
    /// Creates a job with the given id, arrival time and burst time.
    pub fn new(id: impl Into<String>, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            id: id.into(),
            arrival_time,
            burst_time,
            priority: None,
            queue_level: None,
            time_quantum: None,
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the queue level.
    pub fn with_queue_level(mut self, level: i32) -> Self {
        self.queue_level = Some(level);
        self
    }

    /// Sets the round robin time quantum.
    pub fn with_time_quantum(mut self, quantum: i64) -> Self {
        self.time_quantum = Some(quantum);
        self
    }

    /// Earliest tick at which this job could possibly finish.
    #[inline]
    pub fn earliest_completion(&self) -> i64 {
        self.arrival_time.saturating_add(self.burst_time)
    }
}
