//! Persisted slot state
//!
//! Only the five slots are written, wrapped in a versioned record:
//!
//! ```json
//! { "version": 1, "slots": [ { "entity": { "id": "Ahri", "name": "Ahri" }, ... }, ... ] }
//! ```
//!
//! Restoring a record goes through [`TimerStore::restore`], which drops
//! end times that passed while the program was not running.
//!
//! [`TimerStore::restore`]: super::TimerStore::restore

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::PersistenceError;
use crate::slot::{EntitySlot, SLOT_COUNT, Slots};

/// Current schema version of the state file
pub const STATE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub version: u32,
    pub slots: Vec<EntitySlot>,
}

impl PersistedState {
    pub fn from_slots(slots: &Slots) -> Self {
        Self {
            version: STATE_VERSION,
            slots: slots.to_vec(),
        }
    }

    /// Read a state file. A missing file is `Ok(None)`.
    pub fn load(path: &Path) -> Result<Option<Self>, PersistenceError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|source| PersistenceError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| PersistenceError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Write the state file, replacing any previous one
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| PersistenceError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = serde_json::to_string_pretty(self).map_err(PersistenceError::Serialize)?;

        // Write next to the target and rename so a crash never leaves half a file
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, content).map_err(|source| PersistenceError::Write {
            path: tmp_path.clone(),
            source,
        })?;
        std::fs::rename(&tmp_path, path).map_err(|source| PersistenceError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validate schema version and slot count
    pub fn into_slots(self) -> Result<Slots, PersistenceError> {
        if self.version != STATE_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: self.version,
                expected: STATE_VERSION,
            });
        }

        let found = self.slots.len();
        Slots::try_from(self.slots).map_err(|_| PersistenceError::SlotCount {
            found,
            expected: SLOT_COUNT,
        })
    }
}
