use tracing::debug;
use uuid::Uuid;

use super::stats::{average_rate, cycle_summaries, CycleSummary};
use super::{Cycle, CycleStore, Mark, MarkStore, ShotType};
use crate::core::TimeSource;
use crate::state::TagPicker;

/// A cycle removed by [`Session::remove_cycle`] and the marks that went with it.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedCycle {
    pub cycle: Cycle,
    pub marks: Vec<Mark>,
}

/// One editing session: marks, cycles, the selected category and the tag source.
///
/// Every mutation goes through here so cached cycle counts stay in step with
/// the mark list. A cycle's `mark_count` always equals the number of marks in
/// `[start_time, end_time]`; overlapping cycles each count a shared mark.
#[derive(Debug, Clone, Default)]
pub struct Session {
    marks: MarkStore,
    cycles: CycleStore,
    shot_type: ShotType,
    tags: TagPicker,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session with a caller-provided tag source (seed it in tests).
    pub fn with_tag_picker(tags: TagPicker) -> Self {
        Self {
            tags,
            ..Self::default()
        }
    }

    // =========================================================================
    // Marks
    // =========================================================================

    /// Mark a shot at the source's current time. No-op without a time.
    pub fn mark_shot<T: TimeSource + ?Sized>(&mut self, source: &T) -> Option<Mark> {
        let time = source.current_time()?;
        self.add_mark(time)
    }

    /// Append a mark with the current category and count it in every containing cycle.
    pub fn add_mark(&mut self, time: f64) -> Option<Mark> {
        let mark = self.marks.add(time, self.shot_type)?;
        let touched = self.cycles.increment_containing(mark.time);
        debug!(time = mark.time, shot_type = %mark.shot_type, cycles = touched, "Mark added");
        Some(mark)
    }

    pub fn remove_mark(&mut self, id: Uuid) -> Option<Mark> {
        let mark = self.marks.remove(id)?;
        let touched = self.cycles.decrement_containing(mark.time);
        debug!(time = mark.time, cycles = touched, "Mark removed");
        Some(mark)
    }

    /// Undo the most recently added mark (insertion order).
    pub fn undo_last_mark(&mut self) -> Option<Mark> {
        let mark = self.marks.remove_last()?;
        let touched = self.cycles.decrement_containing(mark.time);
        debug!(time = mark.time, cycles = touched, "Mark undone");
        Some(mark)
    }

    // =========================================================================
    // Cycles
    // =========================================================================

    pub fn start_cycle(&mut self, now: Option<f64>) -> bool {
        let started = self.cycles.start(now);
        if started {
            debug!(start = ?now, "Cycle started");
        }
        started
    }

    /// Close the active cycle at `now` (clamped up to its start).
    pub fn end_cycle(&mut self, now: Option<f64>) -> Option<Cycle> {
        let tags = &mut self.tags;
        let cycle = self
            .cycles
            .close(now, self.shot_type, &self.marks, |used| tags.pick(used))?
            .clone();
        debug!(
            start = cycle.start_time,
            end = cycle.end_time,
            marks = cycle.mark_count,
            tag = %cycle.tag,
            "Cycle closed"
        );
        Some(cycle)
    }

    /// Remove a closed cycle and every mark inside its interval.
    ///
    /// Surviving cycles are recounted afterwards, so a mark shared with an
    /// overlapping cycle is no longer counted there once it is gone.
    pub fn remove_cycle(&mut self, id: Uuid) -> Option<RemovedCycle> {
        let cycle = self.cycles.remove(id)?;
        let marks = self.marks.remove_in_range(cycle.start_time, cycle.end_time);
        if !marks.is_empty() {
            self.cycles.recount(&self.marks);
        }
        debug!(
            start = cycle.start_time,
            end = cycle.end_time,
            marks = marks.len(),
            "Cycle removed"
        );
        Some(RemovedCycle { cycle, marks })
    }

    /// Drop all marks and cycles and return to idle.
    pub fn clear_all(&mut self) {
        self.marks.clear();
        self.cycles.clear();
        debug!("Session cleared");
    }

    // =========================================================================
    // Category
    // =========================================================================

    pub fn shot_type(&self) -> ShotType {
        self.shot_type
    }

    pub fn set_shot_type(&mut self, shot_type: ShotType) {
        self.shot_type = shot_type;
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn marks(&self) -> &MarkStore {
        &self.marks
    }

    pub fn cycles(&self) -> &CycleStore {
        &self.cycles
    }

    pub fn active_cycle_start(&self) -> Option<f64> {
        self.cycles.active_start()
    }

    /// Marks per second across all closed cycles.
    pub fn average_rate(&self) -> f64 {
        average_rate(self.cycles.as_slice(), self.marks.as_slice())
    }

    pub fn cycle_summaries(&self) -> Vec<CycleSummary> {
        cycle_summaries(self.cycles.as_slice(), self.marks.as_slice())
    }

    /// Marks recorded so far in the active cycle, 0 when idle or the time is unknown.
    pub fn active_cycle_marks(&self, now: Option<f64>) -> usize {
        match (self.cycles.active_start(), now) {
            (Some(start), Some(now)) if now >= start => self.marks.count_in_range(start, now),
            _ => 0,
        }
    }

    /// 1-based number of the first cycle containing `time`.
    pub fn cycle_number_for(&self, time: f64) -> Option<usize> {
        self.cycles.number_for(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MediaClock;
    use crate::state::CycleTag;

    fn session() -> Session {
        Session::with_tag_picker(TagPicker::seeded(11))
    }

    fn close_cycle(session: &mut Session, start: f64, end: f64) -> Cycle {
        assert!(session.start_cycle(Some(start)));
        session.end_cycle(Some(end)).unwrap()
    }

    fn assert_counts_consistent(session: &Session) {
        for cycle in session.cycles().iter() {
            assert_eq!(
                cycle.mark_count,
                session.marks().count_in_range(cycle.start_time, cycle.end_time),
                "cached count out of sync for [{}, {}]",
                cycle.start_time,
                cycle.end_time
            );
        }
    }

    #[test]
    fn test_random_mark_sequences_keep_counts_in_sync() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut session = session();
            close_cycle(&mut session, 0.0, 10.0);
            close_cycle(&mut session, 5.0, 15.0);
            close_cycle(&mut session, 20.0, 20.0);
            close_cycle(&mut session, 25.0, 32.5);

            for _ in 0..200 {
                // Quarter-second grid so marks land exactly on cycle edges.
                let time = rng.random_range(0..=160) as f64 * 0.25;
                match rng.random_range(0..4) {
                    0 | 1 => {
                        session.add_mark(time);
                    }
                    2 if !session.marks().is_empty() => {
                        let index = rng.random_range(0..session.marks().len());
                        let id = session.marks().as_slice()[index].id;
                        assert!(session.remove_mark(id).is_some());
                    }
                    _ => {
                        session.undo_last_mark();
                    }
                }
                assert_counts_consistent(&session);
            }
        }
    }

    #[test]
    fn test_marks_before_cycle_are_counted_on_close() {
        let mut session = session();
        session.add_mark(3.0);
        session.add_mark(7.0);
        let cycle = close_cycle(&mut session, 0.0, 10.0);
        assert_eq!(cycle.mark_count, 2);
    }

    #[test]
    fn test_end_before_start_produces_zero_length_cycle() {
        let mut session = session();
        let cycle = close_cycle(&mut session, 8.0, 2.0);
        assert_eq!(cycle.end_time, 8.0);
        assert!(cycle.end_time >= cycle.start_time);
    }

    #[test]
    fn test_add_and_remove_keep_counts_in_sync() {
        let mut session = session();
        close_cycle(&mut session, 0.0, 10.0);
        close_cycle(&mut session, 5.0, 15.0);
        close_cycle(&mut session, 20.0, 20.0);

        let a = session.add_mark(7.0).unwrap();
        let b = session.add_mark(12.0).unwrap();
        session.add_mark(20.0).unwrap();
        session.add_mark(30.0).unwrap();
        assert_counts_consistent(&session);
        assert_eq!(session.cycles().as_slice()[0].mark_count, 1);
        assert_eq!(session.cycles().as_slice()[1].mark_count, 2);
        assert_eq!(session.cycles().as_slice()[2].mark_count, 1);

        session.remove_mark(a.id);
        assert_counts_consistent(&session);
        session.remove_mark(b.id);
        session.undo_last_mark();
        assert_counts_consistent(&session);
        assert_eq!(session.marks().len(), 1);
    }

    #[test]
    fn test_undo_removes_latest_insert_not_latest_time() {
        let mut session = session();
        close_cycle(&mut session, 0.0, 5.0);
        session.add_mark(9.0);
        session.add_mark(1.0);
        let undone = session.undo_last_mark().unwrap();
        assert_eq!(undone.time, 1.0);
        assert_eq!(session.cycles().as_slice()[0].mark_count, 0);
        assert_eq!(session.marks().as_slice()[0].time, 9.0);
    }

    #[test]
    fn test_remove_cycle_removes_exactly_contained_marks() {
        let mut session = session();
        for time in [1.0, 2.0, 3.0] {
            session.add_mark(time);
        }
        let cycle = close_cycle(&mut session, 0.0, 2.0);
        let removed = session.remove_cycle(cycle.id).unwrap();
        assert_eq!(removed.marks.len(), 2);
        let left: Vec<f64> = session.marks().iter().map(|mark| mark.time).collect();
        assert_eq!(left, vec![3.0]);
        assert!(session.cycles().is_empty());
    }

    #[test]
    fn test_remove_cycle_recounts_overlapping_siblings() {
        let mut session = session();
        let first = close_cycle(&mut session, 0.0, 10.0);
        close_cycle(&mut session, 5.0, 15.0);
        session.add_mark(7.0);
        session.add_mark(12.0);
        session.remove_cycle(first.id);
        assert_eq!(session.cycles().len(), 1);
        assert_eq!(session.cycles().as_slice()[0].mark_count, 1);
        assert_counts_consistent(&session);
    }

    #[test]
    fn test_remove_unknown_cycle_is_noop() {
        let mut session = session();
        session.add_mark(1.0);
        assert!(session.remove_cycle(Uuid::new_v4()).is_none());
        assert_eq!(session.marks().len(), 1);
    }

    #[test]
    fn test_remove_cycle_leaves_active_cycle_alone() {
        let mut session = session();
        let cycle = close_cycle(&mut session, 0.0, 1.0);
        session.start_cycle(Some(4.0));
        session.remove_cycle(cycle.id);
        assert_eq!(session.active_cycle_start(), Some(4.0));
    }

    #[test]
    fn test_missing_time_source_is_silent() {
        let mut session = session();
        let clock = MediaClock::unloaded();
        assert!(session.mark_shot(&clock).is_none());
        assert!(!session.start_cycle(None));
        assert!(session.end_cycle(None).is_none());
        assert!(session.marks().is_empty());
    }

    #[test]
    fn test_mark_shot_reads_time_source() {
        let mut session = session();
        session.set_shot_type(ShotType::Feeding);
        let mut clock = MediaClock::new();
        clock.seek(4.25);
        let mark = session.mark_shot(&clock).unwrap();
        assert_eq!(mark.time, 4.25);
        assert_eq!(mark.shot_type, ShotType::Feeding);
    }

    #[test]
    fn test_cycle_captures_category_at_close() {
        let mut session = session();
        session.start_cycle(Some(0.0));
        session.set_shot_type(ShotType::Feeding);
        let cycle = session.end_cycle(Some(3.0)).unwrap();
        assert_eq!(cycle.shot_type, ShotType::Feeding);
    }

    #[test]
    fn test_sixth_cycle_gets_unused_tag() {
        let mut session = session();
        for i in 0..6 {
            close_cycle(&mut session, i as f64 * 10.0, i as f64 * 10.0 + 1.0);
        }
        let mut tags = session.cycles().tags_in_use();
        tags.sort_by_key(|tag| tag.name());
        let mut palette = CycleTag::PALETTE.to_vec();
        palette.sort_by_key(|tag| tag.name());
        assert_eq!(tags, palette);
    }

    #[test]
    fn test_clear_all() {
        let mut session = session();
        session.add_mark(1.0);
        close_cycle(&mut session, 0.0, 2.0);
        session.start_cycle(Some(3.0));
        session.clear_all();
        assert!(session.marks().is_empty());
        assert!(session.cycles().is_empty());
        assert_eq!(session.active_cycle_start(), None);
    }

    #[test]
    fn test_active_cycle_marks_and_cycle_number() {
        let mut session = session();
        session.add_mark(1.0);
        session.add_mark(4.0);
        session.start_cycle(Some(2.0));
        assert_eq!(session.active_cycle_marks(Some(5.0)), 1);
        assert_eq!(session.active_cycle_marks(None), 0);
        session.end_cycle(Some(5.0));
        assert_eq!(session.cycle_number_for(4.0), Some(1));
        assert_eq!(session.cycle_number_for(1.0), None);
        assert_eq!(session.active_cycle_marks(Some(6.0)), 0);
    }
}
