use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{MarkStore, ShotType};
use crate::state::CycleTag;

/// A closed cycle: a time interval grouping marks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cycle {
    /// Unique identifier
    pub id: Uuid,
    /// Start time in seconds
    pub start_time: f64,
    /// End time in seconds, never earlier than `start_time`
    pub end_time: f64,
    /// Category selected when the cycle was closed
    pub shot_type: ShotType,
    /// Cached count of marks inside `[start_time, end_time]`
    pub mark_count: usize,
    /// Display tag
    pub tag: CycleTag,
}

impl Cycle {
    /// Inclusive on both ends.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start_time && time <= self.end_time
    }

    pub fn duration(&self) -> f64 {
        (self.end_time - self.start_time).max(0.0)
    }
}

/// Whether a cycle is currently being recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum CycleState {
    #[default]
    Idle,
    Active { start_time: f64 },
}

/// Closed cycles in creation order plus the single in-progress cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleStore {
    cycles: Vec<Cycle>,
    state: CycleState,
}

impl CycleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    pub fn active_start(&self) -> Option<f64> {
        match self.state {
            CycleState::Active { start_time } => Some(start_time),
            CycleState::Idle => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, CycleState::Active { .. })
    }

    /// `Idle -> Active(now)`. No-op when already active or the time is unknown.
    pub fn start(&mut self, now: Option<f64>) -> bool {
        if self.is_active() {
            return false;
        }
        let Some(now) = now.filter(|now| now.is_finite()) else {
            return false;
        };
        self.state = CycleState::Active { start_time: now };
        true
    }

    /// `Active(start) -> Idle`, appending the closed cycle.
    ///
    /// The end is clamped to `start` so a backwards seek yields a zero-length
    /// cycle. `mark_count` is counted from `marks` and the tag is chosen by
    /// `pick_tag` given the tags already in use.
    pub fn close(
        &mut self,
        now: Option<f64>,
        shot_type: ShotType,
        marks: &MarkStore,
        pick_tag: impl FnOnce(&[CycleTag]) -> CycleTag,
    ) -> Option<&Cycle> {
        let start_time = self.active_start()?;
        let now = now.filter(|now| now.is_finite())?;
        let end_time = now.max(start_time);
        let tag = pick_tag(&self.tags_in_use());
        self.cycles.push(Cycle {
            id: Uuid::new_v4(),
            start_time,
            end_time,
            shot_type,
            mark_count: marks.count_in_range(start_time, end_time),
            tag,
        });
        self.state = CycleState::Idle;
        self.cycles.last()
    }

    /// Remove a closed cycle by id. The active cycle has no id and is unaffected.
    pub fn remove(&mut self, id: Uuid) -> Option<Cycle> {
        let index = self.cycles.iter().position(|cycle| cycle.id == id)?;
        Some(self.cycles.remove(index))
    }

    /// Drop all closed cycles and return to `Idle`.
    pub fn clear(&mut self) {
        self.cycles.clear();
        self.state = CycleState::Idle;
    }

    /// Bump the count of every cycle containing `time`. Returns how many changed.
    pub fn increment_containing(&mut self, time: f64) -> usize {
        let mut touched = 0;
        for cycle in self.cycles.iter_mut().filter(|cycle| cycle.contains(time)) {
            cycle.mark_count += 1;
            touched += 1;
        }
        touched
    }

    /// Decrement (floored at zero) every cycle containing `time`.
    pub fn decrement_containing(&mut self, time: f64) -> usize {
        let mut touched = 0;
        for cycle in self.cycles.iter_mut().filter(|cycle| cycle.contains(time)) {
            cycle.mark_count = cycle.mark_count.saturating_sub(1);
            touched += 1;
        }
        touched
    }

    /// Recompute every cached count from scratch.
    pub fn recount(&mut self, marks: &MarkStore) {
        for cycle in self.cycles.iter_mut() {
            cycle.mark_count = marks.count_in_range(cycle.start_time, cycle.end_time);
        }
    }

    pub fn tags_in_use(&self) -> Vec<CycleTag> {
        self.cycles.iter().map(|cycle| cycle.tag).collect()
    }

    pub fn get(&self, id: Uuid) -> Option<&Cycle> {
        self.cycles.iter().find(|cycle| cycle.id == id)
    }

    /// 1-based number of the first cycle containing `time`.
    pub fn number_for(&self, time: f64) -> Option<usize> {
        self.cycles
            .iter()
            .position(|cycle| cycle.contains(time))
            .map(|index| index + 1)
    }

    pub fn as_slice(&self) -> &[Cycle] {
        &self.cycles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cycle> {
        self.cycles.iter()
    }

    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }
}
