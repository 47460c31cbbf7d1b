//! JSON encoding of whole collections.

use serde_json::Value;

use super::{Record, kind_name};
use crate::error::{LoadError, StoreError};

/// Parse a JSON array of records.
///
/// # Errors
///
/// - [`LoadError::Malformed`] if the text is not JSON
/// - [`LoadError::NotAnArray`] if the payload is not an array
/// - [`LoadError::InvalidRecord`] if an element is not a valid record
pub fn parse_collection(text: &str) -> Result<Vec<Record>, LoadError> {
    let value: Value = serde_json::from_str(text).map_err(|e| LoadError::Malformed {
        message: e.to_string(),
    })?;

    let Value::Array(items) = value else {
        return Err(LoadError::NotAnArray {
            found: kind_name(&value),
        });
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            Record::from_value(item).map_err(|e| LoadError::InvalidRecord {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Encode records as a pretty-printed JSON array.
pub fn to_collection_string(records: &[Record]) -> Result<String, StoreError> {
    serde_json::to_string_pretty(records).map_err(|e| StoreError::Malformed {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_array_in_order() {
        let records = parse_collection(
            r#"[{"id": 3, "name": "C"}, {"id": 1, "name": "A"}]"#,
        )
        .unwrap();
        let ids: Vec<u64> = records.iter().map(|r| r.id().get()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn empty_array_is_empty_collection() {
        assert!(parse_collection("[]").unwrap().is_empty());
    }

    #[test]
    fn malformed_json() {
        let err = parse_collection("[{").unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
    }

    #[test]
    fn object_payload_is_not_an_array() {
        let err = parse_collection(r#"{"id": 1}"#).unwrap_err();
        assert_eq!(err, LoadError::NotAnArray { found: "object" });
    }

    #[test]
    fn reports_index_of_bad_record() {
        let err = parse_collection(r#"[{"id": 1}, {"name": "no id"}]"#).unwrap_err();
        assert!(matches!(err, LoadError::InvalidRecord { index: 1, .. }));
    }

    #[test]
    fn encode_then_parse_keeps_records() {
        let records = parse_collection(r#"[{"id": 1, "price": 99.5}]"#).unwrap();
        let text = to_collection_string(&records).unwrap();
        assert_eq!(parse_collection(&text).unwrap(), records);
    }
}
