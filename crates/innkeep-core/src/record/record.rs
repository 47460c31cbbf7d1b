//! Stored record type.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::{ID_FIELD, check_scalar, kind_name};
use crate::error::ValidationError;
use crate::schema::STATUS_FIELD;
use crate::types::RecordId;

/// A stored record.
///
/// This type guarantees that:
/// - the record has a non-negative integer `id`
/// - every other field holds a scalar JSON value
///
/// The JSON form is a flat object with `id` alongside the other fields.
///
/// # Example
///
/// ```
/// use innkeep_core::Record;
/// use serde_json::json;
///
/// let record = Record::from_value(json!({
///     "id": 1,
///     "name": "John Doe",
///     "status": "Confirmed"
/// })).unwrap();
///
/// assert_eq!(record.id().get(), 1);
/// assert_eq!(record.status(), Some("Confirmed"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: RecordId,
    fields: Map<String, Value>,
}

impl Record {
    pub(crate) fn new(id: RecordId, fields: Map<String, Value>) -> Self {
        Self { id, fields }
    }

    /// Build a record from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidRecord`] if the value is not an
    /// object, has no valid `id`, or carries a non-scalar field.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        let Value::Object(mut fields) = value else {
            return Err(ValidationError::InvalidRecord {
                reason: format!("expected a JSON object, found {}", kind_name(&value)),
            });
        };

        let id = match fields.remove(ID_FIELD) {
            Some(raw) => raw.as_u64().map(RecordId::new).ok_or_else(|| {
                ValidationError::InvalidRecord {
                    reason: format!("id must be a non-negative integer, found {}", raw),
                }
            })?,
            None => {
                return Err(ValidationError::InvalidRecord {
                    reason: "missing id".to_string(),
                });
            }
        };

        for (name, value) in &fields {
            check_scalar(name, value)?;
        }

        Ok(Self { id, fields })
    }

    /// Returns the record id.
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Get a field value. The id is not part of the field map.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Get a field as a string slice.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Returns the `status` field, if the record has one.
    pub fn status(&self) -> Option<&str> {
        self.get_str(STATUS_FIELD)
    }

    /// All non-id fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub(crate) fn fields_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.fields
    }

    pub(crate) fn into_parts(self) -> (RecordId, Map<String, Value>) {
        (self.id, self.fields)
    }

    /// The flat JSON object for this record.
    pub fn to_value(&self) -> Value {
        let mut object = Map::with_capacity(self.fields.len() + 1);
        object.insert(ID_FIELD.to_string(), Value::from(self.id.get()));
        for (name, value) in &self.fields {
            object.insert(name.clone(), value.clone());
        }
        Value::Object(object)
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry(ID_FIELD, &self.id)?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Record::from_value(value).map_err(serde::de::Error::custom)
    }
}
