//! Disk-head scheduling algorithms.
//!
//! Every algorithm drives a [`Head`] that records each movement, so the
//! serviced path, the total seek and the replayable movement list always
//! agree.
//!
//! SCAN here reverses at the last request instead of sweeping to the disk
//! edge, which makes it identical to LOOK. C-SCAN still charges the trip to
//! `max_track` and the wrap back to track 0.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 11.2

use tracing::debug;

use super::{Direction, HeadMove, MoveKind};

/// Disk arm state during one run.
#[derive(Debug)]
pub(crate) struct Head {
    position: i64,
    path: Vec<i64>,
    movements: Vec<HeadMove>,
}

impl Head {
    pub(crate) fn new(start: i64) -> Self {
        Self {
            position: start,
            path: Vec::new(),
            movements: Vec::new(),
        }
    }

    fn travel(&mut self, to: i64, kind: MoveKind) {
        self.movements.push(HeadMove {
            from: self.position,
            to,
            kind,
        });
        self.position = to;
    }

    fn service(&mut self, track: i64) {
        self.travel(track, MoveKind::Service);
        self.path.push(track);
    }

    pub(crate) fn finish(self) -> (Vec<i64>, Vec<HeadMove>) {
        (self.path, self.movements)
    }
}

fn sorted(requests: &[i64]) -> Vec<i64> {
    let mut tracks = requests.to_vec();
    tracks.sort_unstable();
    tracks
}

pub(crate) fn fcfs(requests: &[i64], start: i64) -> Head {
    let mut head = Head::new(start);
    for &track in requests {
        head.service(track);
    }
    head
}

/// Greedy nearest request. Equal distances go to the earliest entry still
/// pending, in input order.
pub(crate) fn sstf(requests: &[i64], start: i64) -> Head {
    let mut head = Head::new(start);
    let mut pending = requests.to_vec();

    while !pending.is_empty() {
        let mut best = 0;
        for (i, &track) in pending.iter().enumerate().skip(1) {
            if (track - head.position).abs() < (pending[best] - head.position).abs() {
                best = i;
            }
        }
        let track = pending.remove(best);
        head.service(track);
    }

    head
}

pub(crate) fn scan(requests: &[i64], start: i64, direction: Direction) -> Head {
    let tracks = sorted(requests);
    let mut head = Head::new(start);

    match direction {
        Direction::Up => {
            for &t in tracks.iter().filter(|&&t| t >= start) {
                head.service(t);
            }
            for &t in tracks.iter().rev().filter(|&&t| t < start) {
                head.service(t);
            }
        }
        Direction::Down => {
            for &t in tracks.iter().rev().filter(|&&t| t <= start) {
                head.service(t);
            }
            for &t in tracks.iter().filter(|&&t| t > start) {
                head.service(t);
            }
        }
    }

    head
}

pub(crate) fn look(requests: &[i64], start: i64, direction: Direction) -> Head {
    scan(requests, start, direction)
}

pub(crate) fn c_scan(requests: &[i64], start: i64, max_track: i64) -> Head {
    let tracks = sorted(requests);
    let mut head = Head::new(start);

    for &t in tracks.iter().filter(|&&t| t >= start) {
        head.service(t);
    }

    if tracks.iter().any(|&t| t < start) {
        debug!(from = head.position, max_track, "c-scan sweep to edge and wrap to 0");
        head.travel(max_track, MoveKind::Sweep);
        head.travel(0, MoveKind::Return);
        for &t in tracks.iter().filter(|&&t| t < start) {
            head.service(t);
        }
    }

    head
}

pub(crate) fn c_look(requests: &[i64], start: i64) -> Head {
    let tracks = sorted(requests);
    let mut head = Head::new(start);

    for &t in tracks.iter().filter(|&&t| t >= start) {
        head.service(t);
    }

    if let Some(&lowest) = tracks.iter().find(|&&t| t < start) {
        debug!(from = head.position, to = lowest, "c-look jump to lowest pending request");
        head.travel(lowest, MoveKind::Return);
        for &t in tracks.iter().filter(|&&t| t < start) {
            head.service(t);
        }
    }

    head
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUESTS: [i64; 8] = [176, 79, 34, 60, 92, 11, 41, 114];

    fn seek(head: &Head) -> i64 {
        head.movements.iter().map(HeadMove::distance).sum()
    }

    #[test]
    fn test_fcfs_path_is_input_order() {
        let head = fcfs(&REQUESTS, 50);
        assert_eq!(head.path, REQUESTS.to_vec());
        assert_eq!(seek(&head), 510);
    }

    #[test]
    fn test_sstf_nearest_first() {
        let head = sstf(&REQUESTS, 50);
        assert_eq!(head.path, vec![41, 34, 11, 60, 79, 92, 114, 176]);
        assert_eq!(seek(&head), 204);
    }

    #[test]
    fn test_sstf_tie_goes_to_first_pending() {
        let head = sstf(&[60, 40], 50);
        assert_eq!(head.path, vec![60, 40]);

        let head = sstf(&[40, 60], 50);
        assert_eq!(head.path, vec![40, 60]);
    }

    #[test]
    fn test_sstf_services_duplicates_each_time() {
        let head = sstf(&[10, 10, 12], 11);
        assert_eq!(head.path, vec![10, 10, 12]);
        assert_eq!(seek(&head), 3);
    }

    #[test]
    fn test_scan_up() {
        let head = scan(&REQUESTS, 50, Direction::Up);
        assert_eq!(head.path, vec![60, 79, 92, 114, 176, 41, 34, 11]);
        assert_eq!(seek(&head), 291);
    }

    #[test]
    fn test_scan_down() {
        let head = scan(&REQUESTS, 50, Direction::Down);
        assert_eq!(head.path, vec![41, 34, 11, 60, 79, 92, 114, 176]);
        assert_eq!(seek(&head), 204);
    }

    #[test]
    fn test_scan_services_request_at_head() {
        let head = scan(&[50, 20, 80], 50, Direction::Down);
        assert_eq!(head.path, vec![50, 20, 80]);
        let head = scan(&[50, 20, 80], 50, Direction::Up);
        assert_eq!(head.path, vec![50, 80, 20]);
    }

    #[test]
    fn test_look_matches_scan() {
        for direction in [Direction::Up, Direction::Down] {
            let a = scan(&REQUESTS, 50, direction);
            let b = look(&REQUESTS, 50, direction);
            assert_eq!(a.path, b.path);
            assert_eq!(seek(&a), seek(&b));
        }
    }

    #[test]
    fn test_c_scan_wraps_through_edge() {
        let head = c_scan(&REQUESTS, 50, 199);
        assert_eq!(head.path, vec![60, 79, 92, 114, 176, 11, 34, 41]);
        // 126 up, 23 to the edge, 199 back to 0, 41 up again.
        assert_eq!(seek(&head), 389);
        assert_eq!(
            head.movements.iter().filter(|m| m.kind != MoveKind::Service).count(),
            2
        );
    }

    #[test]
    fn test_c_scan_no_wrap_when_all_above() {
        let head = c_scan(&[60, 70], 50, 199);
        assert_eq!(seek(&head), 20);
        assert!(head.movements.iter().all(|m| m.kind == MoveKind::Service));
    }

    #[test]
    fn test_c_look_jumps_to_lowest() {
        let head = c_look(&REQUESTS, 50);
        assert_eq!(head.path, vec![60, 79, 92, 114, 176, 11, 34, 41]);
        assert_eq!(seek(&head), 321);
    }

    #[test]
    fn test_c_look_all_below_start() {
        let head = c_look(&[10, 5], 50);
        assert_eq!(head.path, vec![5, 10]);
        assert_eq!(seek(&head), 50);
    }

    #[test]
    fn test_empty_requests() {
        for head in [
            fcfs(&[], 50),
            sstf(&[], 50),
            scan(&[], 50, Direction::Up),
            c_scan(&[], 50, 199),
            c_look(&[], 50),
        ] {
            assert!(head.path.is_empty());
            assert!(head.movements.is_empty());
        }
    }
}
