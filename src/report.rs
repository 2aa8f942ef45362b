//! Plain-text rendering of simulation results.
//!
//! Thin helpers for consumers that want a readable dump without a UI:
//! a one-line Gantt chart, a per-job metrics table and a disk head path.

use crate::cpu::CpuSchedule;
use crate::disk::{DiskSchedule, MoveKind};
use crate::models::Timeline;

/// Renders a timeline as `0 |P1| 1 |P2| 5`, with idle spans shown as `|--|`.
pub fn gantt_line(timeline: &Timeline) -> String {
    let mut out = String::new();
    let mut clock: Option<i64> = None;

    for seg in timeline {
        match clock {
            None => {
                if seg.start_time > 0 {
                    out.push_str("0 |--| ");
                }
                out.push_str(&seg.start_time.to_string());
            }
            Some(c) if c < seg.start_time => {
                out.push_str(&format!(" |--| {}", seg.start_time));
            }
            Some(_) => {}
        }
        out.push_str(&format!(" |{}| {}", seg.job_id, seg.end_time));
        clock = Some(seg.end_time);
    }

    out
}

/// Renders per-job metrics as an aligned table followed by averages.
pub fn metrics_table(schedule: &CpuSchedule) -> String {
    const HEADERS: [&str; 7] = [
        "Job",
        "Arrival",
        "Burst",
        "Completion",
        "Turnaround",
        "Waiting",
        "Response",
    ];

    let rows: Vec<[String; 7]> = schedule
        .metrics
        .iter()
        .map(|m| {
            [
                m.job_id.clone(),
                m.arrival_time.to_string(),
                m.burst_time.to_string(),
                m.completion_time.to_string(),
                m.turnaround_time.to_string(),
                m.waiting_time.to_string(),
                m.response_time.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }

    let kpi = schedule.kpi();
    out.push_str(&format!(
        "{} | avg turnaround {:.2} | avg waiting {:.2} | avg response {:.2}\n",
        schedule.policy, kpi.avg_turnaround_time, kpi.avg_waiting_time, kpi.avg_response_time
    ));
    out
}

fn push_row(out: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &w))| {
            if i == 0 {
                format!("{cell:<w$}")
            } else {
                format!("{cell:>w$}")
            }
        })
        .collect();
    out.push_str(&line.join("  "));
    out.push('\n');
}

/// Renders the head path, with non-servicing stops in parentheses.
///
/// `50 -> 60 -> 176 -> (199) -> (0) -> 11 [C-SCAN, seek 389]`
pub fn disk_path(schedule: &DiskSchedule) -> String {
    let mut out = schedule.start_position.to_string();
    for m in &schedule.movements {
        match m.kind {
            MoveKind::Service => {
                out.push_str(&format!(" -> {}", m.to));
            }
            MoveKind::Sweep | MoveKind::Return => {
                out.push_str(&format!(" -> ({})", m.to));
            }
        }
    }
    out.push_str(&format!(" [{}, seek {}]", schedule.policy, schedule.total_seek));
    out
}
