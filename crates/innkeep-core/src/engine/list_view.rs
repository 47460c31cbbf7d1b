//! The list view engine.

use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, instrument, trace, warn};

use crate::error::{Error, LoadError, ValidationError};
use crate::query::{DerivedView, QueryDescriptor, derive_view};
use crate::record::{Fields, ID_FIELD, Record};
use crate::schema::{STATUS_FIELD, Schema};
use crate::traits::RecordLoader;
use crate::types::RecordId;
use crate::Result;

/// Owns one entity's collection and answers queries and mutations
/// against it.
///
/// The collection keeps insertion order. Queries never reorder it; they
/// produce a [`DerivedView`]. Every mutation either applies completely or
/// leaves the collection untouched.
///
/// # Example
///
/// ```
/// use innkeep_core::{Fields, ListViewEngine, QueryDescriptor, Schema};
///
/// let mut engine = ListViewEngine::new(Schema::user());
/// let ana = engine
///     .create(Fields::new().with("name", "Ana").with("email", "ana@example.com"))
///     .unwrap();
/// assert_eq!(ana.id().get(), 1);
///
/// let view = engine.query(&QueryDescriptor::new().search("ana")).unwrap();
/// assert_eq!(view.total_matching(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ListViewEngine {
    schema: Schema,
    records: Vec<Record>,
    generation: u64,
}

impl ListViewEngine {
    /// An engine with an empty collection.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            records: Vec::new(),
            generation: 0,
        }
    }

    /// An engine initialized with `records`.
    pub fn with_records(schema: Schema, records: Vec<Record>) -> Result<Self> {
        let mut engine = Self::new(schema);
        engine.initialize(records)?;
        Ok(engine)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The collection in insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Bumped by every successful mutation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True if no mutation happened since `view` was derived.
    pub fn is_current(&self, view: &DerivedView) -> bool {
        view.generation() == self.generation
    }

    /// Replace the collection wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateId`] if two records share an id; the
    /// collection is left unchanged.
    #[instrument(skip(self, records), fields(entity = %self.schema.entity(), count = records.len()))]
    pub fn initialize(&mut self, records: Vec<Record>) -> Result<()> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id()) {
                return Err(Error::DuplicateId { id: record.id() });
            }
        }

        self.records = records;
        self.touch();
        debug!("Initialized collection");
        Ok(())
    }

    /// Initialize from a loader.
    ///
    /// Returns the number of records loaded. On failure the collection is
    /// left empty and usable, and the error is returned so the caller can
    /// surface it.
    pub async fn initialize_from<L>(&mut self, loader: &L) -> Result<usize>
    where
        L: RecordLoader + ?Sized,
    {
        let loaded = loader.load().await;
        self.initialize_loaded(loaded)
    }

    /// Apply the outcome of a [`RecordLoader::load`] call.
    pub fn initialize_loaded(
        &mut self,
        loaded: std::result::Result<Vec<Record>, LoadError>,
    ) -> Result<usize> {
        let result = loaded
            .map_err(Error::from)
            .and_then(|records| {
                let count = records.len();
                self.initialize(records).map(|()| count)
            });

        if let Err(err) = &result {
            warn!(
                entity = %self.schema.entity(),
                error = %err,
                "Failed to load records, continuing with an empty collection"
            );
            self.records.clear();
            self.touch();
        }

        result
    }

    /// Derive a filtered, sorted page of the collection.
    pub fn query(&self, query: &QueryDescriptor) -> Result<DerivedView> {
        let view = derive_view(&self.schema, &self.records, query, self.generation)?;
        trace!(
            entity = %self.schema.entity(),
            matching = view.total_matching(),
            page = view.page(),
            "Derived view"
        );
        Ok(view)
    }

    /// Validate and append a new record.
    ///
    /// Without an explicit id the record gets one past the largest id in
    /// the collection (1 for an empty one). Declared defaults fill absent
    /// fields before validation.
    #[instrument(skip(self, fields), fields(entity = %self.schema.entity()))]
    pub fn create(&mut self, fields: Fields) -> Result<Record> {
        let id = match fields.id()? {
            Some(id) => {
                if self.position(id).is_some() {
                    return Err(Error::DuplicateId { id });
                }
                id
            }
            None => self.next_id()?,
        };

        let mut body = fields.into_map();
        body.remove(ID_FIELD);
        body.retain(|_, value| !value.is_null());
        self.schema.apply_defaults(&mut body);
        self.schema.validate(&body)?;

        let record = Record::new(id, body);
        self.records.push(record.clone());
        self.touch();

        debug!(id = %id, "Created record");
        Ok(record)
    }

    /// Merge `fields` into an existing record.
    ///
    /// An `id` in `fields` is ignored. A null value clears the field, which
    /// fails for required fields.
    #[instrument(skip(self, fields), fields(entity = %self.schema.entity()))]
    pub fn update(&mut self, id: RecordId, fields: Fields) -> Result<Record> {
        let index = self.position(id).ok_or(Error::NotFound { id })?;

        let mut merged = self.records[index].fields().clone();
        for (name, value) in fields.into_map() {
            if name == ID_FIELD {
                trace!(id = %id, "Ignoring id in update");
                continue;
            }
            if value.is_null() {
                merged.remove(&name);
            } else {
                merged.insert(name, value);
            }
        }
        self.schema.validate(&merged)?;

        let record = &mut self.records[index];
        *record.fields_mut() = merged;
        let updated = record.clone();
        self.touch();

        debug!(id = %id, "Updated record");
        Ok(updated)
    }

    /// Remove a record. Deleting the same id twice fails the second time.
    #[instrument(skip(self), fields(entity = %self.schema.entity()))]
    pub fn delete(&mut self, id: RecordId) -> Result<()> {
        let index = self.position(id).ok_or(Error::NotFound { id })?;
        self.records.remove(index);
        self.touch();

        debug!(id = %id, "Deleted record");
        Ok(())
    }

    /// Set the `status` field of a record.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::NoStatusField`] if the entity has no status
    /// - [`Error::NotFound`] if the record does not exist
    /// - [`ValidationError::UnknownStatus`] if `status` is not declared
    pub fn set_status(&mut self, id: RecordId, status: &str) -> Result<Record> {
        self.schema.require_status_field()?;
        self.update(
            id,
            Fields::new().with(STATUS_FIELD, Value::String(status.to_string())),
        )
    }

    /// Record count per declared status, in declaration order.
    ///
    /// Empty for entities without a status field.
    pub fn status_counts(&self) -> Vec<(String, usize)> {
        let Some(values) = self.schema.status_values() else {
            return Vec::new();
        };
        values
            .iter()
            .map(|value| {
                let count = self
                    .records
                    .iter()
                    .filter(|r| r.status() == Some(value.as_str()))
                    .count();
                (value.clone(), count)
            })
            .collect()
    }

    fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    fn next_id(&self) -> Result<RecordId> {
        match self.records.iter().map(Record::id).max() {
            None => Ok(RecordId::new(1)),
            Some(max) => max.checked_next().ok_or_else(|| {
                ValidationError::InvalidId {
                    value: max.to_string(),
                    reason: "no id left after the largest existing id".to_string(),
                }
                .into()
            }),
        }
    }

    fn touch(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}
