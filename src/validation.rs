//! Input validation for simulation runs.
//!
//! Every check runs eagerly before a simulation starts, and all detected
//! problems are reported together. Detects:
//! - Non-positive burst times, negative arrival times, non-positive quanta
//! - Duplicate job IDs
//! - Job sets whose schedule could end past `i64::MAX`
//! - Negative or out-of-range disk tracks
//! - Inconsistent disk geometry (start position beyond the last track)
//! - Disk geometry whose worst-case seek does not fit in `i64`
//!
//! Empty input is never an error: it resolves to an empty result.

use std::collections::HashSet;
use std::fmt;

use crate::models::Job;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Result of a simulation run: the finished output or every input problem found.
pub type SimulationResult<T> = Result<T, Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A job has a non-positive burst, a negative arrival or a non-positive quantum.
    InvalidJob,
    /// Two jobs share the same ID.
    DuplicateId,
    /// A disk track or head position is negative or beyond the last track.
    InvalidTrack,
    /// A scheduler-level parameter is out of range.
    InvalidParameter,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates a job set for CPU scheduling.
///
/// Checks:
/// 1. No duplicate job IDs
/// 2. Burst time is positive
/// 3. Arrival time is non-negative
/// 4. Per-job time quantum, when present, is positive
/// 5. The latest arrival plus the total burst fits in `i64`. No schedule
///    ends later than that, so no engine clock can overflow.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_jobs(jobs: &[Job]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for job in jobs {
        if !ids.insert(job.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate job ID: {}", job.id),
            ));
        }

        if job.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidJob,
                format!(
                    "Job '{}' has non-positive burst time {}",
                    job.id, job.burst_time
                ),
            ));
        }

        if job.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidJob,
                format!(
                    "Job '{}' has negative arrival time {}",
                    job.id, job.arrival_time
                ),
            ));
        }

        if let Some(q) = job.time_quantum {
            if q <= 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidJob,
                    format!("Job '{}' has non-positive time quantum {q}", job.id),
                ));
            }
        }
    }

    if time_horizon(jobs).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidJob,
            "Latest arrival plus total burst time exceeds the representable time range",
        ));
    }

    finish(errors)
}

/// Latest arrival plus total burst, or `None` on overflow.
fn time_horizon(jobs: &[Job]) -> Option<i64> {
    let latest = jobs.iter().map(|j| j.arrival_time.max(0)).max().unwrap_or(0);
    jobs.iter()
        .try_fold(latest, |acc, j| acc.checked_add(j.burst_time.max(0)))
}

/// Validates the scheduler-wide default time quantum.
pub fn validate_quantum(quantum: i64) -> ValidationResult {
    if quantum <= 0 {
        return Err(vec![ValidationError::new(
            ValidationErrorKind::InvalidParameter,
            format!("Time quantum must be positive, got {quantum}"),
        )]);
    }
    Ok(())
}

/// Validates disk geometry and a track request list.
///
/// Checks:
/// 1. `max_track` and `start_position` are non-negative
/// 2. `start_position <= max_track`
/// 3. Every request lies in `[0, max_track]`
/// 4. `(requests + 2) * max_track` fits in `i64`: every head movement spans
///    at most `max_track`, and C-SCAN adds an edge sweep and a wrap to the
///    moves that service requests
pub fn validate_tracks(requests: &[i64], start_position: i64, max_track: i64) -> ValidationResult {
    let mut errors = Vec::new();

    if max_track < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidTrack,
            format!("Max track must be non-negative, got {max_track}"),
        ));
    }

    if start_position < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidTrack,
            format!("Start position must be non-negative, got {start_position}"),
        ));
    } else if max_track >= 0 && start_position > max_track {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidTrack,
            format!("Start position {start_position} is beyond max track {max_track}"),
        ));
    }

    for (i, &track) in requests.iter().enumerate() {
        if track < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTrack,
                format!("Request #{i} has negative track {track}"),
            ));
        } else if max_track >= 0 && track > max_track {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTrack,
                format!("Request #{i} track {track} is beyond max track {max_track}"),
            ));
        }
    }

    let seek_overflows = max_track > 0 && worst_case_seek(requests.len(), max_track).is_none();
    if !requests.is_empty() && seek_overflows {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidTrack,
            format!(
                "Max track {max_track} is too large for {} requests: total seek could overflow",
                requests.len()
            ),
        ));
    }

    finish(errors)
}

fn worst_case_seek(request_count: usize, max_track: i64) -> Option<i64> {
    i64::try_from(request_count)
        .ok()?
        .checked_add(2)?
        .checked_mul(max_track)
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
