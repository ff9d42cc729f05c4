//! State management module
//!
//! This module contains the in-memory data for one scouting session:
//! - Session: marks, cycles and the active-cycle state machine
//! - CycleTag: display tags picked for new cycles
//! - MetadataForm: match details entered before saving

mod session;
mod tags;
mod metadata;

pub use session::*;
pub use tags::*;
pub use metadata::*;
