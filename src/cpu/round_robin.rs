//! Round robin scheduling.
//!
//! # Algorithm
//!
//! 1. Jobs enter a FIFO ready queue in arrival order (ties: input order).
//! 2. The head of the queue runs for `min(quantum, remaining)` ticks. The
//!    quantum is the job's own `time_quantum` if set, else the default.
//! 3. Jobs that arrived during the slice, including at its last tick, are
//!    queued before the preempted job goes back to the tail.
//!
//! A job that is immediately rescheduled after its own slice continues the
//! same segment.

use std::collections::VecDeque;

use tracing::{debug, trace};

use super::selection::ReadyJob;
use crate::models::{Job, Timeline};

pub(crate) fn run(jobs: &[Job], default_quantum: i64) -> Timeline {
    let mut work = ReadyJob::from_jobs(jobs);
    let mut arrivals: Vec<usize> = (0..work.len()).collect();
    arrivals.sort_by_key(|&i| jobs[i].arrival_time);

    let mut timeline = Timeline::new();
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut next = 0;
    let mut clock = 0;

    loop {
        while next < arrivals.len() && jobs[arrivals[next]].arrival_time <= clock {
            queue.push_back(arrivals[next]);
            next += 1;
        }

        let Some(i) = queue.pop_front() else {
            match arrivals.get(next) {
                Some(&i) => {
                    debug!(from = clock, to = jobs[i].arrival_time, "cpu idle until next arrival");
                    clock = jobs[i].arrival_time;
                    continue;
                }
                None => break,
            }
        };

        let job = &mut work[i];
        let quantum = job.job().time_quantum.unwrap_or(default_quantum);
        let start = clock;
        clock += job.consume(quantum);
        let completed = job.is_finished();
        trace!(job = %job.job().id, start, end = clock, quantum, "slice");
        timeline.run(&job.job().id, start, clock, completed);

        while next < arrivals.len() && jobs[arrivals[next]].arrival_time <= clock {
            queue.push_back(arrivals[next]);
            next += 1;
        }
        if !completed {
            queue.push_back(i);
        }
    }

    timeline
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Segment;

    #[test]
    fn test_round_robin_slices() {
        let jobs = vec![
            Job::new("P1", 0, 5),
            Job::new("P2", 1, 3),
            Job::new("P3", 2, 1),
        ];
        let t = run(&jobs, 2);
        assert_eq!(
            t.segments(),
            &[
                Segment::new("P1", 0, 2, false),
                Segment::new("P2", 2, 4, false),
                Segment::new("P3", 4, 5, true),
                Segment::new("P1", 5, 7, false),
                Segment::new("P2", 7, 8, true),
                Segment::new("P1", 8, 9, true),
            ]
        );
    }

    #[test]
    fn test_round_robin_lone_job_is_one_segment() {
        let t = run(&[Job::new("P1", 0, 7)], 2);
        assert_eq!(t.segments(), &[Segment::new("P1", 0, 7, true)]);
    }

    #[test]
    fn test_round_robin_per_job_quantum() {
        let jobs = vec![
            Job::new("wide", 0, 6).with_time_quantum(4),
            Job::new("narrow", 0, 3),
        ];
        let t = run(&jobs, 1);
        assert_eq!(
            t.segments(),
            &[
                Segment::new("wide", 0, 4, false),
                Segment::new("narrow", 4, 5, false),
                Segment::new("wide", 5, 7, true),
                Segment::new("narrow", 7, 9, true),
            ]
        );
    }

    #[test]
    fn test_round_robin_idle_gap() {
        let jobs = vec![Job::new("A", 1, 1), Job::new("B", 4, 2)];
        let t = run(&jobs, 3);
        assert_eq!(
            t.segments(),
            &[Segment::new("A", 1, 2, true), Segment::new("B", 4, 6, true)]
        );
    }

    #[test]
    fn test_empty() {
        assert!(run(&[], 2).is_empty());
    }
}
