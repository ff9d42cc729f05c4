//! Annotation session model
//!
//! Marks, cycles and the coordinator that keeps them consistent.

mod mark;
mod cycle;
mod session;
mod stats;
mod persistence;

pub use mark::{count_marks_in_range, is_valid_mark_time, Mark, MarkStore, ShotType};
pub use cycle::{Cycle, CycleState, CycleStore};
pub use session::{RemovedCycle, Session};
pub use stats::{average_rate, cycle_summaries, CycleSummary};
