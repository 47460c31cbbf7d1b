//! Loading and persisting one entity.

use anyhow::{Context, Result, bail};
use tracing::info;

use innkeep_core::{Fields, ListViewEngine, Record, RecordStore};
use innkeep_file::FileRecordStore;

use crate::config::Config;
use crate::output;

use super::Entity;

/// An entity's engine together with the document it was loaded from.
pub struct EntityContext {
    entity: Entity,
    store: FileRecordStore,
    engine: ListViewEngine,
    load_failed: bool,
}

impl EntityContext {
    /// Load `<data-dir>/<entity>.json`.
    ///
    /// A document that fails to load is reported and replaced by an empty
    /// collection; the command still runs, but nothing is written back.
    pub async fn open(config: &Config, entity: Entity) -> Self {
        let store = FileRecordStore::new(config.entity_path(entity));
        let mut engine = ListViewEngine::new(entity.schema());

        let load_failed = match engine.initialize_from(&store).await {
            Ok(count) => {
                info!(%entity, count, "Loaded records");
                false
            }
            Err(err) => {
                output::warning(&format!(
                    "Could not load {}: {}. Showing an empty list.",
                    store.path().display(),
                    err
                ));
                true
            }
        };

        Self {
            entity,
            store,
            engine,
            load_failed,
        }
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn engine(&self) -> &ListViewEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ListViewEngine {
        &mut self.engine
    }

    pub fn into_engine(self) -> ListViewEngine {
        self.engine
    }

    /// Validate through the engine, then append to the document.
    pub async fn create(&mut self, fields: Fields) -> Result<Record> {
        self.ensure_writable()?;
        let record = self
            .engine
            .create(fields)
            .with_context(|| format!("Invalid {} record", self.entity))?;

        self.store
            .append(Fields::from(record))
            .await
            .with_context(|| format!("Failed to save {}", self.store.path().display()))
    }

    /// Write the engine's collection back after an in-memory mutation.
    pub async fn persist(&self) -> Result<()> {
        self.ensure_writable()?;
        self.store
            .overwrite(self.engine.records())
            .await
            .with_context(|| format!("Failed to save {}", self.store.path().display()))
    }

    fn ensure_writable(&self) -> Result<()> {
        if self.load_failed {
            bail!(
                "Refusing to modify {}: it could not be loaded",
                self.store.path().display()
            );
        }
        Ok(())
    }
}

