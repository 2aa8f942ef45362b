//! Preemptive rule-driven scheduling (SRTF, preemptive priority).
//!
//! # Algorithm
//!
//! Decisions are taken at tick boundaries:
//!
//! 1. Rank the active jobs (arrived, unfinished) by the selection rule.
//! 2. Keep the running job unless the best candidate has a strictly lower
//!    key. Equal keys never preempt.
//! 3. A change of job closes the previous segment as preempted; reaching
//!    zero remaining closes it as completed.
//!
//! Between two arrivals only the running job's key can move, and it never
//! increases, so the chosen job runs straight to the next arrival or to its
//! completion, whichever comes first. With no active job the clock jumps to
//! the next arrival. Segment boundaries are the same as stepping one tick
//! at a time.
//!
//! # Complexity
//! O(n²) for n jobs: at most one decision per arrival and per completion.

use tracing::{debug, trace};

use super::selection::{next_arrival, next_arrival_after, select_best, ReadyJob, SelectionRule};
use crate::models::{Job, Timeline};

/// Runs `jobs` under `rule` with preemption.
///
/// The rule's key for a job must not increase while that job runs.
pub(crate) fn run<R: SelectionRule + ?Sized>(jobs: &[Job], rule: &R) -> Timeline {
    let mut work = ReadyJob::from_jobs(jobs);
    let mut timeline = Timeline::new();
    let mut clock = 0;
    let mut running: Option<usize> = None;

    loop {
        let Some(best) = select_best(rule, &work, |j| j.is_active(clock)) else {
            match next_arrival(&work) {
                Some(t) => {
                    debug!(from = clock, to = t, "cpu idle until next arrival");
                    clock = t;
                    running = None;
                    continue;
                }
                None => break,
            }
        };

        let chosen = match running {
            Some(cur) if rule.key(&work[best]) >= rule.key(&work[cur]) => cur,
            Some(cur) => {
                debug!(
                    clock,
                    preempted = %work[cur].job().id,
                    by = %work[best].job().id,
                    "preemption"
                );
                best
            }
            None => best,
        };

        let horizon = next_arrival_after(&work, clock);
        let job = &mut work[chosen];
        let span = match horizon {
            Some(t) => job.remaining().min(t - clock),
            None => job.remaining(),
        };
        trace!(rule = rule.name(), job = %job.job().id, clock, span, "run");

        let start = clock;
        clock += job.consume(span);
        let completed = job.is_finished();
        timeline.run(&job.job().id, start, clock, completed);

        running = if completed { None } else { Some(chosen) };
    }

    timeline
}
