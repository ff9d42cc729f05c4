use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::{SessionMetadata, ShotType};

pub type MetadataId = Uuid;

/// One cycle as submitted with a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleInput {
    /// 1-based position within the session
    pub cycle_number: u32,
    pub start_timestamp: f64,
    pub end_timestamp: f64,
    pub number_of_balls: u32,
    pub cycle_type: ShotType,
}

/// Everything written by one save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveSessionRequest {
    pub metadata: SessionMetadata,
    pub cycles: Vec<CycleInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    pub id: MetadataId,
    #[serde(flatten)]
    pub metadata: SessionMetadata,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleRecord {
    pub id: Uuid,
    pub metadata_id: MetadataId,
    #[serde(flatten)]
    pub cycle: CycleInput,
    pub created_at: String,
    pub updated_at: String,
}
