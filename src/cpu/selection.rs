//! Job selection rules for CPU scheduling decisions.
//!
//! Every decision point (engine idle, job completed, tick boundary) asks a
//! rule to rank the ready jobs. Ranking is a total order:
//!
//! 1. rule key (lower = runs first)
//! 2. earliest arrival time
//! 3. input order
//!
//! so no decision depends on iteration order.
//!
//! # Score Convention
//! **Lower key = higher precedence**, as with SPT in the dispatching
//! literature.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 4: Priority Dispatching

use std::cmp::Ordering;
use std::fmt::Debug;

use crate::models::Job;

/// Key returned by a selection rule. Lower runs first.
pub type RuleKey = i64;

/// Engine-side working copy of a submitted job.
///
/// Carries the mutable remaining time and the job's position in the input,
/// which is the last-resort tie-breaker.
#[derive(Debug, Clone)]
pub struct ReadyJob<'a> {
    job: &'a Job,
    index: usize,
    remaining: i64,
}

impl<'a> ReadyJob<'a> {
    /// Builds working copies for a job set, preserving input order.
    pub fn from_jobs(jobs: &'a [Job]) -> Vec<Self> {
        jobs.iter()
            .enumerate()
            .map(|(index, job)| Self {
                job,
                index,
                remaining: job.burst_time,
            })
            .collect()
    }

    /// The submitted job.
    pub fn job(&self) -> &'a Job {
        self.job
    }

    /// Position in the input job list.
    pub fn index(&self) -> usize {
        self.index
    }

    /// CPU time still needed.
    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    /// Whether the job has received all of its burst.
    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Whether the job has arrived by `now` and still needs CPU time.
    pub fn is_active(&self, now: i64) -> bool {
        !self.is_finished() && self.job.arrival_time <= now
    }

    /// Consumes up to `ticks` of remaining time and returns the amount used.
    pub(crate) fn consume(&mut self, ticks: i64) -> i64 {
        let used = ticks.min(self.remaining);
        self.remaining -= used;
        used
    }
}

/// A rule that ranks ready jobs.
pub trait SelectionRule: Send + Sync + Debug {
    /// Rule name (e.g., "SJF").
    fn name(&self) -> &'static str;

    /// Ranking key for a job. Lower = selected first.
    fn key(&self, job: &ReadyJob<'_>) -> RuleKey;
}

/// Earliest arrival first.
///
/// Arrival ties fall back to input order, so running this rule to
/// completion is first-come-first-served.
#[derive(Debug, Clone, Copy)]
pub struct EarliestArrival;

impl SelectionRule for EarliestArrival {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn key(&self, job: &ReadyJob<'_>) -> RuleKey {
        job.job.arrival_time
    }
}

/// Shortest total burst first.
#[derive(Debug, Clone, Copy)]
pub struct ShortestBurst;

impl SelectionRule for ShortestBurst {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn key(&self, job: &ReadyJob<'_>) -> RuleKey {
        job.job.burst_time
    }
}

/// Shortest remaining time first.
#[derive(Debug, Clone, Copy)]
pub struct ShortestRemaining;

impl SelectionRule for ShortestRemaining {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn key(&self, job: &ReadyJob<'_>) -> RuleKey {
        job.remaining
    }
}

/// Most urgent priority first.
///
/// Lower priority numbers are more urgent. Jobs without a priority rank
/// after every prioritised job.
#[derive(Debug, Clone, Copy)]
pub struct HighestPriority;

impl SelectionRule for HighestPriority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn key(&self, job: &ReadyJob<'_>) -> RuleKey {
        job.job.priority.map(RuleKey::from).unwrap_or(RuleKey::MAX)
    }
}

/// Total order used for every selection: rule key, then arrival, then input order.
pub fn compare<R: SelectionRule + ?Sized>(
    rule: &R,
    a: &ReadyJob<'_>,
    b: &ReadyJob<'_>,
) -> Ordering {
    rule.key(a)
        .cmp(&rule.key(b))
        .then_with(|| a.job.arrival_time.cmp(&b.job.arrival_time))
        .then_with(|| a.index.cmp(&b.index))
}

/// Returns the position (in `jobs`) of the best eligible job.
pub fn select_best<R, F>(rule: &R, jobs: &[ReadyJob<'_>], eligible: F) -> Option<usize>
where
    R: SelectionRule + ?Sized,
    F: Fn(&ReadyJob<'_>) -> bool,
{
    jobs.iter()
        .enumerate()
        .filter(|(_, j)| eligible(*j))
        .min_by(|(_, a), (_, b)| compare(rule, *a, *b))
        .map(|(i, _)| i)
}

/// Earliest arrival among jobs that still need CPU time.
pub(crate) fn next_arrival(jobs: &[ReadyJob<'_>]) -> Option<i64> {
    jobs.iter()
        .filter(|j| !j.is_finished())
        .map(|j| j.job.arrival_time)
        .min()
}

/// Earliest arrival strictly after `now`.
pub(crate) fn next_arrival_after(jobs: &[ReadyJob<'_>], now: i64) -> Option<i64> {
    jobs.iter()
        .map(|j| j.job.arrival_time)
        .filter(|&t| t > now)
        .min()
}
