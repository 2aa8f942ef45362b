//! Disk run performance indicators.

use serde::{Deserialize, Serialize};

use super::{DiskSchedule, HeadMove, MoveKind};

/// Seek statistics for one disk run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskKpi {
    /// Total tracks crossed.
    pub total_seek: i64,
    /// Requests serviced.
    pub requests_serviced: usize,
    /// total_seek / requests_serviced (0.0 when nothing was serviced).
    pub average_seek: f64,
    /// Largest single head movement.
    pub longest_move: i64,
    /// Tracks crossed without servicing anything (C-SCAN edge run, wraps).
    pub overhead_travel: i64,
}

impl DiskKpi {
    /// Computes KPIs for a finished disk schedule.
    pub fn calculate(schedule: &DiskSchedule) -> Self {
        let requests_serviced = schedule.path.len();
        let average_seek = if requests_serviced == 0 {
            0.0
        } else {
            schedule.total_seek as f64 / requests_serviced as f64
        };

        Self {
            total_seek: schedule.total_seek,
            requests_serviced,
            average_seek,
            longest_move: schedule
                .movements
                .iter()
                .map(HeadMove::distance)
                .max()
                .unwrap_or(0),
            overhead_travel: schedule
                .movements
                .iter()
                .filter(|m| m.kind != MoveKind::Service)
                .map(HeadMove::distance)
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::disk::{DiskPolicy, DiskRequest};

    fn reference() -> DiskRequest {
        DiskRequest::new(vec![176, 79, 34, 60, 92, 11, 41, 114], 50)
    }

    #[test]
    fn test_fcfs_kpi() {
        let kpi = reference().run(DiskPolicy::Fcfs).unwrap().kpi();
        assert_eq!(kpi.total_seek, 510);
        assert_eq!(kpi.requests_serviced, 8);
        assert!((kpi.average_seek - 63.75).abs() < 1e-10);
        assert_eq!(kpi.longest_move, 126);
        assert_eq!(kpi.overhead_travel, 0);
    }

    #[test]
    fn test_c_scan_overhead() {
        let kpi = reference().run(DiskPolicy::CScan).unwrap().kpi();
        assert_eq!(kpi.overhead_travel, 23 + 199);
        assert_eq!(kpi.longest_move, 199);
    }

    #[test]
    fn test_c_look_overhead() {
        let kpi = reference().run(DiskPolicy::CLook).unwrap().kpi();
        assert_eq!(kpi.overhead_travel, 165);
    }

    #[test]
    fn test_empty_kpi() {
        let kpi = DiskRequest::new(vec![], 0).run(DiskPolicy::Sstf).unwrap().kpi();
        assert_eq!(kpi.total_seek, 0);
        assert_eq!(kpi.average_seek, 0.0);
        assert_eq!(kpi.longest_move, 0);
    }
}
