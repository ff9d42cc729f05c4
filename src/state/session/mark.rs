use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category attached to marks and cycles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotType {
    #[default]
    Shooting,
    Feeding,
}

impl ShotType {
    pub const ALL: [ShotType; 2] = [ShotType::Shooting, ShotType::Feeding];

    pub fn as_str(self) -> &'static str {
        match self {
            ShotType::Shooting => "shooting",
            ShotType::Feeding => "feeding",
        }
    }
}

impl fmt::Display for ShotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShotType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "shooting" => Ok(ShotType::Shooting),
            "feeding" => Ok(ShotType::Feeding),
            other => Err(format!("Unknown shot type: {}", other)),
        }
    }
}

/// A single tagged instant (a "shot").
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Mark {
    /// Unique identifier
    pub id: Uuid,
    /// Seconds from the start of the loaded media
    pub time: f64,
    /// Category selected when the mark was created
    pub shot_type: ShotType,
}

impl Mark {
    /// Create a new mark at the given time
    pub fn new(time: f64, shot_type: ShotType) -> Self {
        Self {
            id: Uuid::new_v4(),
            time,
            shot_type,
        }
    }
}

/// Mark times must be finite and non-negative.
pub fn is_valid_mark_time(time: f64) -> bool {
    time.is_finite() && time >= 0.0
}

/// Marks in insertion order.
///
/// Insertion order is what undo walks back through; marks created after a
/// backwards seek are still "later" even though their time is earlier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkStore {
    marks: Vec<Mark>,
}

impl MarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a mark. Returns `None` (and stores nothing) for an invalid time.
    pub fn add(&mut self, time: f64, shot_type: ShotType) -> Option<Mark> {
        if !is_valid_mark_time(time) {
            return None;
        }
        let mark = Mark::new(time, shot_type);
        self.marks.push(mark);
        Some(mark)
    }

    /// Remove a mark by id, if present.
    pub fn remove(&mut self, id: Uuid) -> Option<Mark> {
        let index = self.marks.iter().position(|mark| mark.id == id)?;
        Some(self.marks.remove(index))
    }

    /// Remove the most recently appended mark.
    pub fn remove_last(&mut self) -> Option<Mark> {
        self.marks.pop()
    }

    /// Remove every mark with `start <= time <= end`, returning them in insertion order.
    pub fn remove_in_range(&mut self, start: f64, end: f64) -> Vec<Mark> {
        let (removed, kept): (Vec<Mark>, Vec<Mark>) = self
            .marks
            .drain(..)
            .partition(|mark| mark.time >= start && mark.time <= end);
        self.marks = kept;
        removed
    }

    pub fn clear(&mut self) {
        self.marks.clear();
    }

    /// Number of marks with `start <= time <= end`.
    pub fn count_in_range(&self, start: f64, end: f64) -> usize {
        count_marks_in_range(&self.marks, start, end)
    }

    pub fn get(&self, id: Uuid) -> Option<&Mark> {
        self.marks.iter().find(|mark| mark.id == id)
    }

    pub fn last(&self) -> Option<&Mark> {
        self.marks.last()
    }

    pub fn as_slice(&self) -> &[Mark] {
        &self.marks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mark> {
        self.marks.iter()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}

/// Inclusive interval membership count.
pub fn count_marks_in_range(marks: &[Mark], start: f64, end: f64) -> usize {
    marks
        .iter()
        .filter(|mark| mark.time >= start && mark.time <= end)
        .count()
}
