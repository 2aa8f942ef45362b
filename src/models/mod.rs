//! Scheduling domain models.
//!
//! Provides the input and output records shared by the CPU engine and
//! its consumers.
//!
//! # Domain Mappings
//!
//! | os-sched-sim | Textbook term | Visualizer |
//! |--------------|---------------|------------|
//! | Job | Process / PCB | Process card |
//! | Segment | Gantt bar | Animated bar |
//! | Timeline | Gantt chart | Chart row |

mod job;
mod timeline;

pub use job::Job;
pub use timeline::{Segment, Timeline};
