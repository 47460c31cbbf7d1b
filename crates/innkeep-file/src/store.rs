//! Filesystem storage for one entity's records.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use fs2::FileExt;
use serde_json::Value;
use tracing::{debug, instrument};

use innkeep_core::error::{Error, LoadError, StoreError, ValidationError};
use innkeep_core::record::{Fields, ID_FIELD, Record, parse_collection, to_collection_string};
use innkeep_core::traits::{RecordLoader, RecordStore, next_store_id};
use innkeep_core::Result;

fn map_io(path: &Path, err: io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

fn now_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}

/// A collection stored as a single pretty-printed JSON array.
///
/// Every append reads the whole document, adds one record and writes the
/// document back. Writers serialize on an exclusive lock held on a
/// sibling `.lock` file, and the document is replaced by rename so a
/// reader never sees a half-written file.
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    path: PathBuf,
}

impl FileRecordStore {
    /// A store over the JSON document at `path`. The file need not exist.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the JSON document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }

    /// Read the document. A missing file is an empty collection.
    fn read_all(&self) -> std::result::Result<Vec<Record>, LoadError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(LoadError::Io {
                    source_name: self.path.display().to_string(),
                    message: err.to_string(),
                });
            }
        };
        parse_collection(&content)
    }

    fn write_all(&self, records: &[Record]) -> std::result::Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| map_io(parent, e))?;
        }

        let content = to_collection_string(records)?;
        let temp_path = self.temp_path();
        fs::write(&temp_path, content).map_err(|e| map_io(&temp_path, e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| map_io(&self.path, e))?;
        Ok(())
    }

    /// Run `f` while holding the exclusive writer lock.
    fn locked<R>(&self, f: impl FnOnce() -> Result<R>) -> Result<R> {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| map_io(parent, e))?;
        }

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| map_io(&lock_path, e))?;

        lock_file
            .lock_exclusive()
            .map_err(|e| map_io(&lock_path, e))?;

        let result = f();

        lock_file.unlock().map_err(|e| map_io(&lock_path, e))?;

        result
    }

    /// Replace the whole document with `records`.
    #[instrument(skip(self, records), fields(path = %self.path.display(), count = records.len()))]
    pub async fn overwrite(&self, records: &[Record]) -> Result<()> {
        self.locked(|| {
            self.write_all(records)?;
            debug!("Overwrote record document");
            Ok(())
        })
    }
}

#[async_trait]
impl RecordStore for FileRecordStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn list(&self) -> Result<Vec<Record>> {
        self.read_all().map_err(|e| Error::Store(e.into()))
    }

    #[instrument(skip(self, fields), fields(path = %self.path.display()))]
    async fn append(&self, fields: Fields) -> Result<Record> {
        if fields.iter().all(|(name, _)| name == ID_FIELD) {
            return Err(ValidationError::InvalidRecord {
                reason: "record has no fields".to_string(),
            }
            .into());
        }

        self.locked(|| {
            let mut records = self.read_all().map_err(|e| Error::Store(e.into()))?;

            let id = match fields.id()? {
                Some(id) if records.iter().any(|r| r.id() == id) => {
                    return Err(Error::DuplicateId { id });
                }
                Some(id) => id,
                None => next_store_id(&records, now_millis()),
            };

            let mut body = fields;
            body.set(ID_FIELD, id.get());
            let record = Record::from_value(Value::Object(body.into_map()))?;

            records.push(record.clone());
            self.write_all(&records)?;

            debug!(id = %record.id(), total = records.len(), "Appended record");
            Ok(record)
        })
    }
}

#[async_trait]
impl RecordLoader for FileRecordStore {
    async fn load(&self) -> std::result::Result<Vec<Record>, LoadError> {
        self.read_all()
    }
}
