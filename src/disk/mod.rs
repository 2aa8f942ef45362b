//! Disk-head scheduling engine.
//!
//! Orders a list of track requests for a single disk arm and reports the
//! serviced path and the total head movement (seek).
//!
//! # Policies
//!
//! | Policy | Order |
//! |--------|-------|
//! | FCFS | input order |
//! | SSTF | nearest pending request first |
//! | SCAN | sweep in `direction`, then reverse |
//! | LOOK | same as SCAN here |
//! | C-SCAN | sweep up, run to `max_track`, wrap to 0, sweep up again |
//! | C-LOOK | sweep up, jump to the lowest pending request, sweep up again |
//!
//! # Usage
//!
//! ```
//! use os_sched_sim::disk::{DiskPolicy, DiskRequest};
//!
//! let request = DiskRequest::new(vec![176, 79, 34, 60, 92, 11, 41, 114], 50);
//! let schedule = request.run(DiskPolicy::Fcfs).unwrap();
//! assert_eq!(schedule.total_seek, 510);
//! ```
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 11.2

mod algorithms;
mod kpi;

pub use kpi::DiskKpi;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::validation::{validate_tracks, SimulationResult, ValidationError, ValidationErrorKind};
use algorithms::Head;

/// Highest track number when none is given (a 200-cylinder disk).
pub const DEFAULT_MAX_TRACK: i64 = 199;

/// Initial sweep direction for SCAN and LOOK.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards higher track numbers.
    #[default]
    Up,
    /// Towards track 0.
    Down,
}

impl FromStr for Direction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => Err(ValidationError {
                kind: ValidationErrorKind::InvalidParameter,
                message: format!("Unknown direction: {s}"),
            }),
        }
    }
}

/// Disk scheduling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiskPolicy {
    /// First come, first served.
    Fcfs,
    /// Shortest seek time first.
    Sstf,
    /// Elevator.
    Scan,
    /// Circular SCAN.
    CScan,
    /// Elevator bounded by the requests.
    Look,
    /// Circular LOOK.
    CLook,
}

impl DiskPolicy {
    /// All policies, in presentation order.
    pub const ALL: [DiskPolicy; 6] = [
        DiskPolicy::Fcfs,
        DiskPolicy::Sstf,
        DiskPolicy::Scan,
        DiskPolicy::CScan,
        DiskPolicy::Look,
        DiskPolicy::CLook,
    ];

    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            DiskPolicy::Fcfs => "FCFS",
            DiskPolicy::Sstf => "SSTF",
            DiskPolicy::Scan => "SCAN",
            DiskPolicy::CScan => "C-SCAN",
            DiskPolicy::Look => "LOOK",
            DiskPolicy::CLook => "C-LOOK",
        }
    }
}

impl fmt::Display for DiskPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DiskPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' ', '_'], "");
        match normalized.as_str() {
            "FCFS" => Ok(DiskPolicy::Fcfs),
            "SSTF" => Ok(DiskPolicy::Sstf),
            "SCAN" => Ok(DiskPolicy::Scan),
            "CSCAN" => Ok(DiskPolicy::CScan),
            "LOOK" => Ok(DiskPolicy::Look),
            "CLOOK" => Ok(DiskPolicy::CLook),
            _ => Err(ValidationError {
                kind: ValidationErrorKind::InvalidParameter,
                message: format!("Unknown disk policy: {s}"),
            }),
        }
    }
}

/// Why the head moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveKind {
    /// Travel to a request, which is then serviced.
    Service,
    /// Travel to the disk edge without servicing (C-SCAN).
    Sweep,
    /// Wrap-around travel (C-SCAN to track 0, C-LOOK to the lowest request).
    Return,
}

/// One head movement, for replaying a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadMove {
    /// Track before the move.
    pub from: i64,
    /// Track after the move.
    pub to: i64,
    /// Purpose of the move.
    pub kind: MoveKind,
}

impl HeadMove {
    /// Tracks crossed.
    #[inline]
    pub fn distance(&self) -> i64 {
        (self.to - self.from).abs()
    }
}

/// Input container for a disk run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskRequest {
    /// Requested tracks, in arrival order. Duplicates are serviced per entry.
    pub requests: Vec<i64>,
    /// Head position before the first move.
    pub start_position: i64,
    /// Initial direction for SCAN and LOOK.
    #[serde(default)]
    pub direction: Direction,
    /// Highest valid track.
    #[serde(default = "default_max_track")]
    pub max_track: i64,
}

fn default_max_track() -> i64 {
    DEFAULT_MAX_TRACK
}

impl DiskRequest {
    /// Creates a request moving up on a 200-track disk.
    pub fn new(requests: Vec<i64>, start_position: i64) -> Self {
        Self {
            requests,
            start_position,
            direction: Direction::Up,
            max_track: DEFAULT_MAX_TRACK,
        }
    }

    /// Sets the initial sweep direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the highest valid track.
    pub fn with_max_track(mut self, max_track: i64) -> Self {
        self.max_track = max_track;
        self
    }

    /// Runs the request under a policy.
    ///
    /// Geometry and tracks are validated first; an empty request list
    /// yields an empty path with zero seek.
    #[instrument(skip(self), fields(requests = self.requests.len(), start = self.start_position))]
    pub fn run(&self, policy: DiskPolicy) -> SimulationResult<DiskSchedule> {
        validate_tracks(&self.requests, self.start_position, self.max_track).inspect_err(
            |errors| {
                debug!(errors = errors.len(), "rejected disk input");
            },
        )?;

        let requests = &self.requests;
        let start = self.start_position;
        let head = match policy {
            DiskPolicy::Fcfs => algorithms::fcfs(requests, start),
            DiskPolicy::Sstf => algorithms::sstf(requests, start),
            DiskPolicy::Scan => algorithms::scan(requests, start, self.direction),
            DiskPolicy::CScan => algorithms::c_scan(requests, start, self.max_track),
            DiskPolicy::Look => algorithms::look(requests, start, self.direction),
            DiskPolicy::CLook => algorithms::c_look(requests, start),
        };

        let schedule = DiskSchedule::from_head(policy, start, head);
        debug!(total_seek = schedule.total_seek, "disk simulation finished");
        Ok(schedule)
    }
}

/// Result of a disk run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskSchedule {
    /// Policy that produced this schedule.
    pub policy: DiskPolicy,
    /// Head position before the first move.
    pub start_position: i64,
    /// Tracks in the order they were serviced.
    pub path: Vec<i64>,
    /// Total tracks crossed by the head.
    pub total_seek: i64,
    /// Every head movement, including non-servicing travel.
    pub movements: Vec<HeadMove>,
}

impl DiskSchedule {
    fn from_head(policy: DiskPolicy, start_position: i64, head: Head) -> Self {
        let (path, movements) = head.finish();
        let total_seek = movements.iter().map(HeadMove::distance).sum();
        Self {
            policy,
            start_position,
            path,
            total_seek,
            movements,
        }
    }

    /// Final head position.
    pub fn end_position(&self) -> i64 {
        self.movements
            .last()
            .map(|m| m.to)
            .unwrap_or(self.start_position)
    }

    /// Run-level KPIs.
    pub fn kpi(&self) -> DiskKpi {
        DiskKpi::calculate(self)
    }
}

/// Disk FCFS.
pub fn fcfs(request: &DiskRequest) -> SimulationResult<DiskSchedule> {
    request.run(DiskPolicy::Fcfs)
}

/// Shortest seek time first.
pub fn sstf(request: &DiskRequest) -> SimulationResult<DiskSchedule> {
    request.run(DiskPolicy::Sstf)
}

/// SCAN (elevator).
pub fn scan(request: &DiskRequest) -> SimulationResult<DiskSchedule> {
    request.run(DiskPolicy::Scan)
}

/// Circular SCAN.
pub fn c_scan(request: &DiskRequest) -> SimulationResult<DiskSchedule> {
    request.run(DiskPolicy::CScan)
}

/// LOOK.
pub fn look(request: &DiskRequest) -> SimulationResult<DiskSchedule> {
    request.run(DiskPolicy::Look)
}

/// Circular LOOK.
pub fn c_look(request: &DiskRequest) -> SimulationResult<DiskSchedule> {
    request.run(DiskPolicy::CLook)
}
