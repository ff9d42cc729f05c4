use super::Session;
use crate::state::SessionMetadata;
use crate::store::{CycleInput, SaveSessionRequest};

impl Session {
    // =========================================================================
    // Save payload
    // =========================================================================

    /// Build the save payload: cycles numbered from 1 in creation order,
    /// carrying their cached mark counts.
    pub fn save_request(&self, metadata: SessionMetadata) -> SaveSessionRequest {
        let cycles = self
            .cycles()
            .iter()
            .enumerate()
            .map(|(index, cycle)| CycleInput {
                cycle_number: index as u32 + 1,
                start_timestamp: cycle.start_time,
                end_timestamp: cycle.end_time,
                number_of_balls: cycle.mark_count as u32,
                cycle_type: cycle.shot_type,
            })
            .collect();
        SaveSessionRequest { metadata, cycles }
    }
}
