//! Non-preemptive rule-driven scheduling (FCFS, SJF, non-preemptive priority).
//!
//! # Algorithm
//!
//! 1. At each decision point, collect jobs with `arrival <= clock` that
//!    have not run yet.
//! 2. Pick the best one by the selection rule and run it to completion.
//! 3. If nothing has arrived, jump the clock to the earliest pending
//!    arrival. The jump is idle time and produces no segment.
//!
//! # Complexity
//! O(n²) for n jobs.

use tracing::{debug, trace};

use super::selection::{next_arrival, select_best, ReadyJob, SelectionRule};
use crate::models::{Job, Segment, Timeline};

pub(crate) fn run<R: SelectionRule + ?Sized>(jobs: &[Job], rule: &R) -> Timeline {
    let mut work = ReadyJob::from_jobs(jobs);
    let mut timeline = Timeline::new();
    let mut clock = 0;

    loop {
        match select_best(rule, &work, |j| j.is_active(clock)) {
            Some(i) => {
                let job = &mut work[i];
                trace!(rule = rule.name(), job = %job.job().id, clock, "selected");
                let start = clock;
                clock += job.consume(job.remaining());
                timeline.push(Segment::new(&job.job().id, start, clock, true));
            }
            None => match next_arrival(&work) {
                Some(t) => {
                    debug!(from = clock, to = t, "cpu idle until next arrival");
                    clock = t;
                }
                None => break,
            },
        }
    }

    timeline
}
