//! Seeded random workloads.
//!
//! Generates job sets and disk request lists for demos and property tests.
//! Output depends only on the seed and the configured ranges, so the same
//! generator always produces the same workload.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::disk::{DiskRequest, DEFAULT_MAX_TRACK};
use crate::models::Job;

/// Random workload generator.
///
/// # Example
/// ```
/// use os_sched_sim::workload::WorkloadGenerator;
///
/// let generator = WorkloadGenerator::new(42).with_job_count(5);
/// let jobs = generator.jobs();
/// assert_eq!(jobs.len(), 5);
/// assert_eq!(jobs, generator.jobs());
/// ```
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    seed: u64,
    job_count: usize,
    max_arrival: i64,
    burst_range: (i64, i64),
    priority_levels: i32,
    quantum_probability: f64,
    request_count: usize,
    max_track: i64,
}

impl WorkloadGenerator {
    /// Creates a generator with small, textbook-sized defaults.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            job_count: 6,
            max_arrival: 10,
            burst_range: (1, 10),
            priority_levels: 5,
            quantum_probability: 0.25,
            request_count: 8,
            max_track: DEFAULT_MAX_TRACK,
        }
    }

    /// Sets the number of jobs.
    pub fn with_job_count(mut self, count: usize) -> Self {
        self.job_count = count;
        self
    }

    /// Sets the latest possible arrival time.
    pub fn with_max_arrival(mut self, max_arrival: i64) -> Self {
        self.max_arrival = max_arrival.max(0);
        self
    }

    /// Sets the inclusive burst time range. Bounds are clamped to at least 1.
    pub fn with_burst_range(mut self, min: i64, max: i64) -> Self {
        let min = min.max(1);
        self.burst_range = (min, max.max(min));
        self
    }

    /// Sets the number of distinct priorities (1..=levels).
    pub fn with_priority_levels(mut self, levels: i32) -> Self {
        self.priority_levels = levels.max(1);
        self
    }

    /// Sets the chance that a job carries its own time quantum.
    pub fn with_quantum_probability(mut self, p: f64) -> Self {
        self.quantum_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the number of disk requests.
    pub fn with_request_count(mut self, count: usize) -> Self {
        self.request_count = count;
        self
    }

    /// Sets the highest track for generated disk requests.
    pub fn with_max_track(mut self, max_track: i64) -> Self {
        self.max_track = max_track.max(0);
        self
    }

    /// Generates a job set with ids `P1..Pn`.
    pub fn jobs(&self) -> Vec<Job> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let (min_burst, max_burst) = self.burst_range;

        (1..=self.job_count)
            .map(|i| {
                let mut job = Job::new(
                    format!("P{i}"),
                    rng.random_range(0..=self.max_arrival),
                    rng.random_range(min_burst..=max_burst),
                )
                .with_priority(rng.random_range(1..=self.priority_levels));
                if rng.random_bool(self.quantum_probability) {
                    job = job.with_time_quantum(rng.random_range(1..=4));
                }
                job
            })
            .collect()
    }

    /// Generates track requests in `[0, max_track]`.
    pub fn requests(&self) -> Vec<i64> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        (0..self.request_count)
            .map(|_| rng.random_range(0..=self.max_track))
            .collect()
    }

    /// Generates a complete disk request with a random start position.
    pub fn disk_request(&self) -> DiskRequest {
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(1));
        let start = rng.random_range(0..=self.max_track);
        DiskRequest::new(self.requests(), start).with_max_track(self.max_track)
    }
}
