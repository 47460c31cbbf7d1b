//! Records and collections.
//!
//! A [`Record`] is one row of an entity (booking, room, user): an integer
//! `id` plus a flat mapping of scalar fields. [`Fields`] is the partial
//! form accepted by `create` and `update`.

mod collection;
mod fields;
mod record;

pub use collection::{parse_collection, to_collection_string};
pub use fields::Fields;
pub use record::Record;

/// Name of the identifier field in serialized records.
pub const ID_FIELD: &str = "id";

/// JSON kind name used in error messages.
pub(crate) fn kind_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Records only carry scalar values.
pub(crate) fn check_scalar(
    field: &str,
    value: &serde_json::Value,
) -> Result<(), crate::ValidationError> {
    if value.is_array() || value.is_object() {
        return Err(crate::ValidationError::InvalidRecord {
            reason: format!(
                "field '{}' must be a scalar value, found {}",
                field,
                kind_name(value)
            ),
        });
    }
    Ok(())
}
