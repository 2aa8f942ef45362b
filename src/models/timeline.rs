//! Execution timeline (Gantt chart) model.
//!
//! A timeline is the ordered list of execution segments produced by a
//! CPU simulation run. Preemptive policies emit several segments for the
//! same job; idle time produces no segment at all.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3

use serde::{Deserialize, Serialize};

/// A contiguous span during which one job held the CPU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Job that ran.
    pub job_id: String,
    /// First tick of the span.
    pub start_time: i64,
    /// Tick at which the span ended (exclusive).
    pub end_time: i64,
    /// Whether the job finished at `end_time` (false = preempted).
    pub completed: bool,
}

impl Segment {
    /// Creates a segment.
    pub fn new(job_id: impl Into<String>, start_time: i64, end_time: i64, completed: bool) -> Self {
        Self {
            job_id: job_id.into(),
            start_time,
            end_time,
            completed,
        }
    }

    /// Span length in ticks.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end_time - self.start_time
    }
}

/// Ordered sequence of execution segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    segments: Vec<Segment>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a segment.
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Runs `job_id` over `[start, end)`.
    ///
    /// If the previous segment belongs to the same job and ends exactly at
    /// `start`, it is extended instead of opening a new segment.
    pub fn run(&mut self, job_id: &str, start: i64, end: i64, completed: bool) {
        if let Some(last) = self.segments.last_mut() {
            if last.job_id == job_id && last.end_time == start && !last.completed {
                last.end_time = end;
                last.completed = completed;
                return;
            }
        }
        self.push(Segment::new(job_id, start, end, completed));
    }

    /// All segments in execution order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the timeline has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterates over segments in execution order.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Makespan: end of the last segment (0 when empty).
    pub fn makespan(&self) -> i64 {
        self.segments.iter().map(|s| s.end_time).max().unwrap_or(0)
    }

    /// Segments belonging to a job, in execution order.
    pub fn segments_for_job<'a>(&'a self, job_id: &'a str) -> impl Iterator<Item = &'a Segment> {
        self.segments.iter().filter(move |s| s.job_id == job_id)
    }

    /// Completion time of a job (latest end of its segments).
    pub fn completion_time(&self, job_id: &str) -> Option<i64> {
        self.segments_for_job(job_id).map(|s| s.end_time).max()
    }

    /// First tick at which a job ran.
    pub fn first_start(&self, job_id: &str) -> Option<i64> {
        self.segments_for_job(job_id).map(|s| s.start_time).min()
    }

    /// Total ticks a job held the CPU.
    pub fn service_time(&self, job_id: &str) -> i64 {
        self.segments_for_job(job_id).map(Segment::duration).sum()
    }

    /// Total ticks the CPU was busy.
    pub fn busy_time(&self) -> i64 {
        self.segments.iter().map(Segment::duration).sum()
    }

    /// Ticks between 0 and the makespan with no job running.
    pub fn idle_time(&self) -> i64 {
        self.makespan() - self.busy_time()
    }

    /// Number of times the CPU switched from one job to a different one.
    pub fn context_switches(&self) -> usize {
        self.segments
            .windows(2)
            .filter(|w| w[0].job_id != w[1].job_id)
            .count()
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl From<Vec<Segment>> for Timeline {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}
