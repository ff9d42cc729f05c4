use std::fs;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use super::{CycleInput, CycleRecord, DocumentStore, MetadataId, MetadataRecord};
use crate::constants::{CYCLES_FILE_NAME, METADATA_FILE_NAME};
use crate::error::{Result, ScoutError};
use crate::state::SessionMetadata;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Tables {
    metadata: Vec<MetadataRecord>,
    cycles: Vec<CycleRecord>,
}

/// Document store kept as `metadata.json` and `cycles.json` in a folder.
///
/// Records are held in insertion order. Inserts stay in memory until
/// [`DocumentStore::commit`] writes both files; an in-memory store never
/// touches disk.
#[derive(Debug, Clone, Default)]
pub struct JsonStore {
    root: Option<PathBuf>,
    tables: Tables,
    /// State as of the last commit, present while inserts are pending.
    committed: Option<Tables>,
}

impl JsonStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open (creating if needed) a store folder and load any existing documents.
    pub fn open(folder: &Path) -> Result<Self> {
        fs::create_dir_all(folder)?;
        let tables = Tables {
            metadata: read_documents(&folder.join(METADATA_FILE_NAME))?,
            cycles: read_documents(&folder.join(CYCLES_FILE_NAME))?,
        };
        debug!(
            folder = %folder.display(),
            metadata = tables.metadata.len(),
            cycles = tables.cycles.len(),
            "Store opened"
        );
        Ok(Self {
            root: Some(folder.to_path_buf()),
            tables,
            committed: None,
        })
    }

    fn stage(&mut self) {
        if self.committed.is_none() {
            self.committed = Some(self.tables.clone());
        }
    }

    /// Stage both documents as temp files, then swap them in.
    ///
    /// If the cycles swap fails after the metadata swap, the metadata document
    /// is put back to its last committed contents.
    fn write_to(&self, folder: &Path) -> Result<()> {
        fs::create_dir_all(folder)?;
        let metadata_path = folder.join(METADATA_FILE_NAME);
        let cycles_path = folder.join(CYCLES_FILE_NAME);

        let metadata_tmp = stage_documents(&metadata_path, &self.tables.metadata)?;
        let cycles_tmp = match stage_documents(&cycles_path, &self.tables.cycles) {
            Ok(tmp) => tmp,
            Err(err) => {
                discard(&[metadata_tmp.as_path()]);
                return Err(err);
            }
        };

        if let Err(err) = fs::rename(&metadata_tmp, &metadata_path) {
            discard(&[metadata_tmp.as_path(), cycles_tmp.as_path()]);
            return Err(err.into());
        }
        if let Err(err) = fs::rename(&cycles_tmp, &cycles_path) {
            discard(&[cycles_tmp.as_path()]);
            let previous = self.committed.as_ref().unwrap_or(&self.tables);
            if let Err(restore_err) = write_documents(&metadata_path, &previous.metadata) {
                warn!(
                    path = %metadata_path.display(),
                    "Could not restore metadata document: {}",
                    restore_err
                );
            }
            return Err(err.into());
        }
        Ok(())
    }
}

impl DocumentStore for JsonStore {
    fn insert_metadata(&mut self, metadata: SessionMetadata, timestamp: &str) -> Result<MetadataId> {
        self.stage();
        let record = MetadataRecord {
            id: Uuid::new_v4(),
            metadata,
            created_at: timestamp.to_string(),
            updated_at: timestamp.to_string(),
        };
        let id = record.id;
        self.tables.metadata.push(record);
        Ok(id)
    }

    fn insert_cycle(&mut self, metadata_id: MetadataId, cycle: CycleInput, timestamp: &str) -> Result<Uuid> {
        if !self.tables.metadata.iter().any(|record| record.id == metadata_id) {
            return Err(ScoutError::NotFound(format!("metadata {}", metadata_id)));
        }
        self.stage();
        let record = CycleRecord {
            id: Uuid::new_v4(),
            metadata_id,
            cycle,
            created_at: timestamp.to_string(),
            updated_at: timestamp.to_string(),
        };
        let id = record.id;
        self.tables.cycles.push(record);
        Ok(id)
    }

    fn list_metadata(&self) -> Vec<MetadataRecord> {
        self.tables.metadata.iter().rev().cloned().collect()
    }

    fn metadata_by_id(&self, id: MetadataId) -> Option<MetadataRecord> {
        self.tables
            .metadata
            .iter()
            .find(|record| record.id == id)
            .cloned()
    }

    fn list_cycles(&self) -> Vec<CycleRecord> {
        self.tables.cycles.clone()
    }

    fn commit(&mut self) -> Result<()> {
        if let Some(root) = self.root.as_deref() {
            self.write_to(root)?;
        }
        self.committed = None;
        Ok(())
    }

    fn rollback(&mut self) {
        if let Some(committed) = self.committed.take() {
            self.tables = committed;
        }
    }
}

fn read_documents<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let json = fs::read_to_string(path)?;
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&json)
        .map_err(|err| ScoutError::Store(format!("{} is not a document list: {}", path.display(), err)))
}

/// Write `documents` to a sibling temp file and return its path.
fn stage_documents<T: Serialize>(path: &Path, documents: &[T]) -> Result<PathBuf> {
    let json = serde_json::to_string_pretty(documents)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    Ok(tmp)
}

fn write_documents<T: Serialize>(path: &Path, documents: &[T]) -> Result<()> {
    let tmp = stage_documents(path, documents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn discard(paths: &[&Path]) {
    for path in paths {
        let _ = fs::remove_file(path);
    }
}
