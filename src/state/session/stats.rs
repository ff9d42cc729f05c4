//! Rate statistics derived from cycles and marks.
//!
//! Counts here are always recomputed from the mark list, independent of the
//! cached `Cycle::mark_count`.

use serde::Serialize;

use super::mark::count_marks_in_range;
use super::{Cycle, Mark, ShotType};

/// Duration-weighted marks per second over all cycles with positive duration.
///
/// Zero-length cycles contribute to neither the mark total nor the duration total.
pub fn average_rate(cycles: &[Cycle], marks: &[Mark]) -> f64 {
    let (total_duration, total_marks) =
        cycles
            .iter()
            .fold((0.0_f64, 0_usize), |(duration_acc, marks_acc), cycle| {
                let duration = cycle.duration();
                if duration <= 0.0 {
                    return (duration_acc, marks_acc);
                }
                let count = count_marks_in_range(marks, cycle.start_time, cycle.end_time);
                (duration_acc + duration, marks_acc + count)
            });
    if total_duration > 0.0 {
        total_marks as f64 / total_duration
    } else {
        0.0
    }
}

/// One row of the per-cycle breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleSummary {
    /// 1-based position in creation order
    pub number: usize,
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
    pub mark_count: usize,
    /// Marks per second, 0 for zero-length cycles
    pub rate: f64,
    pub shot_type: ShotType,
}

pub fn cycle_summaries(cycles: &[Cycle], marks: &[Mark]) -> Vec<CycleSummary> {
    cycles
        .iter()
        .enumerate()
        .map(|(index, cycle)| {
            let mark_count = count_marks_in_range(marks, cycle.start_time, cycle.end_time);
            let duration = cycle.end_time - cycle.start_time;
            let rate = if duration > 0.0 {
                mark_count as f64 / duration
            } else {
                0.0
            };
            CycleSummary {
                number: index + 1,
                start_time: cycle.start_time,
                end_time: cycle.end_time,
                duration,
                mark_count,
                rate,
                shot_type: cycle.shot_type,
            }
        })
        .collect()
}
