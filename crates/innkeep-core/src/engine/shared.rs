//! Thread-safe engine handle.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::Result;
use crate::error::Error;
use crate::query::{DerivedView, QueryDescriptor};
use crate::record::{Fields, Record};
use crate::traits::RecordLoader;
use crate::types::RecordId;

use super::ListViewEngine;

/// A [`ListViewEngine`] shared between several callers.
///
/// Each logical operation takes the lock once, so a query always observes
/// a consistent collection and no caller sees a half-applied mutation.
/// Clones share the same engine.
#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<ListViewEngine>>,
}

impl SharedEngine {
    pub fn new(engine: ListViewEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    fn lock(&self, operation: &'static str) -> Result<MutexGuard<'_, ListViewEngine>> {
        self.inner
            .lock()
            .map_err(|_| Error::LockPoisoned { operation })
    }

    pub fn initialize(&self, records: Vec<Record>) -> Result<()> {
        self.lock("initialize")?.initialize(records)
    }

    /// Load outside the lock, then apply the result under it.
    pub async fn initialize_from<L>(&self, loader: &L) -> Result<usize>
    where
        L: RecordLoader + ?Sized,
    {
        let loaded = loader.load().await;
        self.lock("initialize")?.initialize_loaded(loaded)
    }

    pub fn query(&self, query: &QueryDescriptor) -> Result<DerivedView> {
        self.lock("query")?.query(query)
    }

    pub fn create(&self, fields: Fields) -> Result<Record> {
        self.lock("create")?.create(fields)
    }

    pub fn update(&self, id: RecordId, fields: Fields) -> Result<Record> {
        self.lock("update")?.update(id, fields)
    }

    pub fn delete(&self, id: RecordId) -> Result<()> {
        self.lock("delete")?.delete(id)
    }

    pub fn set_status(&self, id: RecordId, status: &str) -> Result<Record> {
        self.lock("set_status")?.set_status(id, status)
    }

    pub fn get(&self, id: RecordId) -> Result<Option<Record>> {
        Ok(self.lock("get")?.get(id).cloned())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.lock("len")?.len())
    }

    pub fn status_counts(&self) -> Result<Vec<(String, usize)>> {
        Ok(self.lock("status_counts")?.status_counts())
    }

    /// A copy of the collection in insertion order.
    pub fn snapshot(&self) -> Result<Vec<Record>> {
        Ok(self.lock("snapshot")?.records().to_vec())
    }

    /// Run `f` with the engine locked.
    pub fn with<R>(&self, f: impl FnOnce(&ListViewEngine) -> R) -> Result<R> {
        let guard = self.lock("read")?;
        Ok(f(&guard))
    }
}
