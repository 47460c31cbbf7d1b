//! Entity schemas.
//!
//! A [`Schema`] names an entity and declares its fields: their kinds,
//! which are required, which take part in search and sort, and which
//! carry range constraints. The engine validates mutations and query
//! descriptors against it.

mod field;
mod presets;

pub use field::{DATE_FORMAT, FieldDef, FieldKind};
pub use presets::{BOOKING_STATUSES, ROOM_STATUSES};

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::record::ID_FIELD;

/// Name of the status field used by status filters and `set_status`.
pub const STATUS_FIELD: &str = "status";

/// The declared shape of one entity's records.
///
/// # Example
///
/// ```
/// use innkeep_core::{FieldDef, Schema};
///
/// let schema = Schema::builder("guest")
///     .field(FieldDef::text("name").required().searchable().sortable())
///     .field(FieldDef::status("status", ["Confirmed", "Pending"]))
///     .build()
///     .unwrap();
///
/// assert_eq!(schema.entity(), "guest");
/// assert!(schema.status_field().is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    entity: String,
    fields: Vec<FieldDef>,
}

impl Schema {
    /// Start building a schema for the named entity.
    pub fn builder(entity: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            entity: entity.into(),
            fields: Vec::new(),
        }
    }

    /// The entity name, e.g. `booking`.
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Field definitions in declaration order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Look up a field definition.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// The `status` field, if this entity has one.
    pub fn status_field(&self) -> Option<&FieldDef> {
        self.field(STATUS_FIELD)
    }

    /// Declared status values, if this entity has a status field.
    pub fn status_values(&self) -> Option<&[String]> {
        self.status_field().and_then(FieldDef::status_values)
    }

    /// Fields searched when a query names none.
    pub fn searchable_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.is_searchable())
    }

    /// Fields a view may be sorted by, not counting `id`.
    pub fn sortable_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.is_sortable())
    }

    /// The status field, or [`ValidationError::NoStatusField`].
    pub fn require_status_field(&self) -> Result<&FieldDef, ValidationError> {
        self.status_field()
            .ok_or_else(|| ValidationError::NoStatusField {
                entity: self.entity.clone(),
            })
    }

    /// Check that `value` is a declared status.
    pub fn check_status(&self, value: &str) -> Result<(), ValidationError> {
        self.require_status_field()?
            .check(&Value::String(value.to_string()))
    }

    /// Fill in declared defaults for fields that are absent or null.
    pub fn apply_defaults(&self, fields: &mut Map<String, Value>) {
        for def in &self.fields {
            if let Some(default) = def.default_value() {
                let missing = fields.get(def.name()).is_none_or(Value::is_null);
                if missing {
                    fields.insert(def.name().to_string(), default.clone());
                }
            }
        }
    }

    /// Validate a complete record body (everything except `id`).
    ///
    /// Null values count as absent.
    pub fn validate(&self, fields: &Map<String, Value>) -> Result<(), ValidationError> {
        for name in fields.keys() {
            if self.field(name).is_none() {
                return Err(ValidationError::UnknownField {
                    field: name.clone(),
                });
            }
        }

        for def in &self.fields {
            match fields.get(def.name()) {
                None | Some(Value::Null) => {
                    if def.is_required() {
                        return Err(ValidationError::MissingField {
                            field: def.name().to_string(),
                        });
                    }
                }
                Some(value) => def.check(value)?,
            }
        }

        Ok(())
    }
}

/// Builder for [`Schema`].
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    entity: String,
    fields: Vec<FieldDef>,
}

impl SchemaBuilder {
    /// Append a field definition.
    pub fn field(mut self, def: FieldDef) -> Self {
        self.fields.push(def);
        self
    }

    /// Check the definitions and produce the schema.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSchema`] when the entity name is
    /// empty, a field name is not an identifier or is `id`, a name repeats,
    /// `status` is not a status field, a status field declares no values,
    /// or a default does not satisfy its own field.
    pub fn build(self) -> Result<Schema, ValidationError> {
        let invalid = |reason: String| ValidationError::InvalidSchema {
            entity: self.entity.clone(),
            reason,
        };

        if self.entity.trim().is_empty() {
            return Err(invalid("entity name cannot be empty".to_string()));
        }

        for (index, def) in self.fields.iter().enumerate() {
            let name = def.name();
            if !is_identifier(name) {
                return Err(invalid(format!("'{}' is not a valid field name", name)));
            }
            if name == ID_FIELD {
                return Err(invalid("'id' is reserved".to_string()));
            }
            if self.fields[..index].iter().any(|f| f.name() == name) {
                return Err(invalid(format!("field '{}' is declared twice", name)));
            }
            if let FieldKind::Status(values) = def.kind() {
                if values.is_empty() {
                    return Err(invalid(format!("status field '{}' has no values", name)));
                }
            } else if name == STATUS_FIELD {
                return Err(invalid(format!(
                    "'{}' must be a status field, found {}",
                    STATUS_FIELD,
                    def.kind().name()
                )));
            }
            if let Some(default) = def.default_value() {
                def.check(default)
                    .map_err(|e| invalid(format!("bad default for '{}': {}", name, e)))?;
            }
        }

        Ok(Schema {
            entity: self.entity,
            fields: self.fields,
        })
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn guest() -> Schema {
        Schema::builder("guest")
            .field(FieldDef::text("name").required().searchable().sortable())
            .field(FieldDef::number("price").positive())
            .field(
                FieldDef::status("status", ["Confirmed", "Pending"]).with_default("Pending"),
            )
            .build()
            .unwrap()
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn validate_accepts_complete_record() {
        let schema = guest();
        let fields = object(json!({ "name": "Alice", "status": "Confirmed", "price": 10 }));
        assert!(schema.validate(&fields).is_ok());
    }

    #[test]
    fn validate_reports_missing_required() {
        let err = guest().validate(&object(json!({ "price": 10 }))).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                field: "name".to_string()
            }
        );
    }

    #[test]
    fn validate_treats_null_as_missing() {
        let err = guest()
            .validate(&object(json!({ "name": null })))
            .unwrap_err();
        assert!(matches!(err, ValidationError::MissingField { .. }));
    }

    #[test]
    fn validate_rejects_unknown_fields() {
        let err = guest()
            .validate(&object(json!({ "name": "A", "colour": "red" })))
            .unwrap_err();
        assert!(matches!(err, ValidationError::UnknownField { .. }));
    }

    #[test]
    fn defaults_fill_absent_fields_only() {
        let schema = guest();
        let mut fields = object(json!({ "name": "A" }));
        schema.apply_defaults(&mut fields);
        assert_eq!(fields.get("status"), Some(&json!("Pending")));

        let mut fields = object(json!({ "name": "A", "status": "Confirmed" }));
        schema.apply_defaults(&mut fields);
        assert_eq!(fields.get("status"), Some(&json!("Confirmed")));
    }

    #[test]
    fn check_status_requires_status_field() {
        let schema = Schema::builder("user")
            .field(FieldDef::text("name"))
            .build()
            .unwrap();
        assert!(matches!(
            schema.check_status("Pending"),
            Err(ValidationError::NoStatusField { .. })
        ));
        assert!(guest().check_status("Pending").is_ok());
        assert!(guest().check_status("Gone").is_err());
    }

    #[test]
    fn build_rejects_reserved_and_duplicate_names() {
        assert!(
            Schema::builder("x")
                .field(FieldDef::integer("id"))
                .build()
                .is_err()
        );
        assert!(
            Schema::builder("x")
                .field(FieldDef::text("name"))
                .field(FieldDef::text("name"))
                .build()
                .is_err()
        );
        assert!(
            Schema::builder("x")
                .field(FieldDef::text("first name"))
                .build()
                .is_err()
        );
    }

    #[test]
    fn build_rejects_non_status_status_field() {
        let err = Schema::builder("x")
            .field(FieldDef::text("status"))
            .build()
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSchema { .. }));
    }

    #[test]
    fn build_rejects_invalid_default() {
        let err = Schema::builder("x")
            .field(FieldDef::status("status", ["A"]).with_default("B"))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("bad default"));
    }

    #[test]
    fn searchable_and_sortable_listings() {
        let schema = guest();
        let searchable: Vec<&str> = schema.searchable_fields().map(FieldDef::name).collect();
        assert_eq!(searchable, vec!["name"]);
        let sortable: Vec<&str> = schema.sortable_fields().map(FieldDef::name).collect();
        assert_eq!(sortable, vec!["name"]);
    }
}
