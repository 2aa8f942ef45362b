//! Classical operating-system scheduling simulator.
//!
//! Deterministic engines for CPU process scheduling and disk-head
//! scheduling, built for teaching and visualization. Each run is a pure
//! function from (input, policy, parameters) to a finished result; a
//! consumer that animates the result replays it on its own.
//!
//! # Modules
//!
//! - **`models`**: Input/output records: `Job`, `Segment`, `Timeline`
//! - **`cpu`**: FCFS, SJF, SRTF, priority and round robin, with per-job
//!   metrics (`JobMetrics`) and run KPIs (`CpuKpi`)
//! - **`disk`**: FCFS, SSTF, SCAN, C-SCAN, LOOK and C-LOOK with total seek
//!   and a replayable head movement list
//! - **`validation`**: Eager input checks (burst, arrival, duplicate IDs, tracks)
//! - **`report`**: Plain-text Gantt line, metrics table and head path
//! - **`workload`**: Seeded random jobs and track requests
//!
//! # Non-goals
//!
//! No I/O waits, multiple CPUs or context-switch cost. Time advances in
//! unit ticks or jumps straight to the next arrival.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5, 11
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4, 5.4

pub mod cpu;
pub mod disk;
pub mod models;
pub mod report;
pub mod validation;
pub mod workload;
