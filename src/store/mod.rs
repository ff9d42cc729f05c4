//! Session persistence
//!
//! A document-style store with two collections: session metadata and the
//! cycles saved with it. Writes go through [`save_session`], which stamps
//! every record with one timestamp and commits them together.

mod records;
mod json_store;

pub use records::*;
pub use json_store::JsonStore;

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::state::SessionMetadata;

/// Insert/query surface of the backing store.
pub trait DocumentStore {
    fn insert_metadata(&mut self, metadata: SessionMetadata, timestamp: &str) -> Result<MetadataId>;

    fn insert_cycle(&mut self, metadata_id: MetadataId, cycle: CycleInput, timestamp: &str) -> Result<Uuid>;

    /// All metadata, newest first.
    fn list_metadata(&self) -> Vec<MetadataRecord>;

    fn metadata_by_id(&self, id: MetadataId) -> Option<MetadataRecord>;

    fn list_cycles(&self) -> Vec<CycleRecord>;

    fn cycles_for_metadata(&self, id: MetadataId) -> Vec<CycleRecord> {
        self.list_cycles()
            .into_iter()
            .filter(|cycle| cycle.metadata_id == id)
            .collect()
    }

    /// Make pending inserts durable.
    fn commit(&mut self) -> Result<()>;

    /// Discard inserts made since the last commit.
    fn rollback(&mut self);
}

/// Current local time in RFC 3339, seconds precision.
pub fn formatted_timestamp() -> String {
    chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, false)
}

/// Write one metadata record and one record per cycle, all or nothing.
pub fn save_session<S: DocumentStore + ?Sized>(
    store: &mut S,
    request: SaveSessionRequest,
) -> Result<MetadataId> {
    let timestamp = formatted_timestamp();
    let cycle_count = request.cycles.len();
    let result = write_session(store, request, &timestamp);
    match &result {
        Ok(id) => info!(metadata_id = %id, cycles = cycle_count, "Session saved"),
        Err(err) => {
            store.rollback();
            warn!("Session save failed: {}", err);
        }
    }
    result
}

fn write_session<S: DocumentStore + ?Sized>(
    store: &mut S,
    request: SaveSessionRequest,
    timestamp: &str,
) -> Result<MetadataId> {
    let metadata_id = store.insert_metadata(request.metadata, timestamp)?;
    for cycle in request.cycles {
        store.insert_cycle(metadata_id, cycle, timestamp)?;
    }
    store.commit()?;
    Ok(metadata_id)
}
