//! Partial record type used by mutations.

use serde::Serialize;
use serde_json::{Map, Value};

use super::{ID_FIELD, Record, check_scalar, kind_name};
use crate::error::ValidationError;
use crate::schema::Schema;
use crate::types::RecordId;

/// A partial record: the field values supplied to `create` or `update`.
///
/// An `id` may be present. On create it requests that id; on update it is
/// ignored. A null value on update clears the field.
///
/// # Example
///
/// ```
/// use innkeep_core::Fields;
///
/// let fields = Fields::new()
///     .with("name", "Carol")
///     .with("status", "Confirmed");
/// assert_eq!(fields.len(), 2);
///
/// let parsed = Fields::from_pairs(["capacity=4", "category=Suite"]).unwrap();
/// assert_eq!(parsed.get("capacity"), Some(&serde_json::json!(4)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Fields(Map<String, Value>);

impl Fields {
    /// An empty set of fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a field, builder style.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Add or replace a field.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    /// Build fields from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidRecord`] if the value is not an
    /// object or carries a non-scalar value.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        let Value::Object(map) = value else {
            return Err(ValidationError::InvalidRecord {
                reason: format!("expected a JSON object, found {}", kind_name(&value)),
            });
        };
        for (name, value) in &map {
            check_scalar(name, value)?;
        }
        Ok(Self(map))
    }

    /// Parse `key=value` assignments.
    ///
    /// Values that parse as JSON numbers become numbers, `null` becomes
    /// null, anything else is kept as a string. Use
    /// [`Fields::from_pairs_for`] when the target schema is known.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fields = Self::new();
        for pair in pairs {
            let (key, raw) = split_pair(pair.as_ref())?;
            fields.set(key, parse_scalar(raw));
        }
        Ok(fields)
    }

    /// Parse `key=value` assignments using the declared field kinds.
    ///
    /// Text, date and status fields keep the raw text, so `room=101` stays
    /// a string. Integer and number fields are parsed as JSON numbers; a
    /// value that does not parse is kept as text and fails validation
    /// later. `null` clears a field of any kind.
    pub fn from_pairs_for<I, S>(schema: &Schema, pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fields = Self::new();
        for pair in pairs {
            let (key, raw) = split_pair(pair.as_ref())?;
            let value = match schema.field(key) {
                Some(def) if !def.kind().is_numeric() => {
                    if raw.trim() == "null" {
                        Value::Null
                    } else {
                        Value::String(raw.to_string())
                    }
                }
                _ => parse_scalar(raw),
            };
            fields.set(key, value);
        }
        Ok(fields)
    }

    /// The requested id, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidId`] if `id` is present but not a
    /// non-negative integer.
    pub fn id(&self) -> Result<Option<RecordId>, ValidationError> {
        match self.0.get(ID_FIELD) {
            None | Some(Value::Null) => Ok(None),
            Some(raw) => raw
                .as_u64()
                .map(|id| Some(RecordId::new(id)))
                .ok_or_else(|| ValidationError::InvalidId {
                    value: raw.to_string(),
                    reason: "must be a non-negative integer".to_string(),
                }),
        }
    }

    /// Get a field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Iterate over the fields.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Consume and return the field map.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Merge another set of fields into this one; later values win.
    pub fn merge(&mut self, other: Fields) {
        self.0.extend(other.0);
    }
}

impl From<Record> for Fields {
    fn from(record: Record) -> Self {
        let (id, mut map) = record.into_parts();
        map.insert(ID_FIELD.to_string(), Value::from(id.get()));
        Self(map)
    }
}

fn split_pair(pair: &str) -> Result<(&str, &str), ValidationError> {
    let invalid = || ValidationError::InvalidAssignment {
        input: pair.to_string(),
    };
    let (key, raw) = pair.split_once('=').ok_or_else(invalid)?;
    let key = key.trim();
    if key.is_empty() {
        return Err(invalid());
    }
    Ok((key, raw))
}

fn parse_scalar(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed == "null" {
        return Value::Null;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(number @ Value::Number(_)) => number,
        _ => Value::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pairs_infer_numbers() {
        let fields =
            Fields::from_pairs(["name=Garden View", "price=120.5", "capacity=2"]).unwrap();
        assert_eq!(fields.get("name"), Some(&json!("Garden View")));
        assert_eq!(fields.get("price"), Some(&json!(120.5)));
        assert_eq!(fields.get("capacity"), Some(&json!(2)));
    }

    #[test]
    fn pairs_keep_dates_as_text() {
        let fields = Fields::from_pairs(["date=2024-03-15"]).unwrap();
        assert_eq!(fields.get("date"), Some(&json!("2024-03-15")));
    }

    #[test]
    fn pairs_allow_equals_in_value() {
        let fields = Fields::from_pairs(["note=a=b"]).unwrap();
        assert_eq!(fields.get("note"), Some(&json!("a=b")));
    }

    #[test]
    fn schema_pairs_follow_field_kinds() {
        let fields = Fields::from_pairs_for(
            &Schema::booking(),
            ["room=101", "name=007", "date=2024-03-15", "price=250", "id=9"],
        )
        .unwrap();
        assert_eq!(fields.get("room"), Some(&json!("101")));
        assert_eq!(fields.get("name"), Some(&json!("007")));
        assert_eq!(fields.get("price"), Some(&json!(250)));
        assert_eq!(fields.id().unwrap(), Some(RecordId::new(9)));
    }

    #[test]
    fn schema_pairs_leave_bad_numbers_for_validation() {
        let schema = Schema::room();
        let fields = Fields::from_pairs_for(&schema, ["capacity=two", "category=null"]).unwrap();
        assert_eq!(fields.get("capacity"), Some(&json!("two")));
        assert_eq!(fields.get("category"), Some(&Value::Null));

        let err = Fields::from_pairs_for(&schema, ["=1"]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAssignment { .. }));
    }

    #[test]
    fn pairs_null_clears() {
        let fields = Fields::from_pairs(["price=null"]).unwrap();
        assert_eq!(fields.get("price"), Some(&Value::Null));
    }

    #[test]
    fn pairs_without_equals_fail() {
        let err = Fields::from_pairs(["name"]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAssignment { .. }));
        assert!(Fields::from_pairs(["=x"]).is_err());
    }

    #[test]
    fn id_must_be_integer() {
        assert_eq!(Fields::new().id().unwrap(), None);
        assert_eq!(
            Fields::new().with("id", 5).id().unwrap(),
            Some(RecordId::new(5))
        );
        assert!(Fields::new().with("id", "five").id().is_err());
    }

    #[test]
    fn from_value_rejects_nested() {
        assert!(Fields::from_value(json!({ "a": { "b": 1 } })).is_err());
        assert!(Fields::from_value(json!("text")).is_err());
        assert_eq!(Fields::from_value(json!({ "a": 1 })).unwrap().len(), 1);
    }

    #[test]
    fn merge_prefers_later_values() {
        let mut base = Fields::new().with("name", "A").with("room", "Suite");
        base.merge(Fields::new().with("name", "B"));
        assert_eq!(base.get("name"), Some(&json!("B")));
        assert_eq!(base.get("room"), Some(&json!("Suite")));
    }
}
