//! Durable storage for the sobriety record

use crate::domain::SobrietyRecord;
use crate::error::{Result, SobrietyError};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Abstract storage for the single persisted record
pub trait RecordStorage {
    /// Read the persisted record; `Ok(None)` when nothing has been saved yet
    fn load(&self) -> Result<Option<SobrietyRecord>>;

    /// Replace the persisted record
    fn save(&self, record: &SobrietyRecord) -> Result<()>;

    /// Move unreadable data out of the way, returning where it went
    fn quarantine(&self, at: DateTime<Utc>) -> Result<Option<PathBuf>>;
}

/// JSON file implementation of RecordStorage
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: PathBuf) -> Self {
        JsonFileStorage { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<SobrietyRecord>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SobrietyError::Io(e)),
        };

        // Invalid UTF-8 surfaces as a decode error, same as malformed JSON
        let record = serde_json::from_slice(&bytes)?;
        Ok(Some(record))
    }

    fn save(&self, record: &SobrietyRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }

    fn quarantine(&self, at: DateTime<Utc>) -> Result<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".corrupt-{}", at.format("%Y%m%dT%H%M%S")));
        let target = PathBuf::from(name);

        fs::rename(&self.path, &target)?;
        Ok(Some(target))
    }
}
