//! Field definitions.

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::ValidationError;

/// ISO date format accepted by [`FieldKind::Date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The declared type of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// ISO calendar date, `YYYY-MM-DD`.
    Date,
    /// Whole number.
    Integer,
    /// Any number.
    Number,
    /// One of a fixed set of values.
    Status(Vec<String>),
}

impl FieldKind {
    /// Short name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Date => "date",
            FieldKind::Integer => "integer",
            FieldKind::Number => "number",
            FieldKind::Status(_) => "status",
        }
    }

    /// Numeric kinds sort numerically, everything else lexicographically.
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Integer | FieldKind::Number)
    }
}

/// One field of an entity schema.
///
/// # Example
///
/// ```
/// use innkeep_core::FieldDef;
///
/// let price = FieldDef::number("price").required().positive().sortable();
/// assert!(price.is_required());
/// assert!(!price.is_searchable());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    name: String,
    kind: FieldKind,
    required: bool,
    searchable: bool,
    sortable: bool,
    positive: bool,
    default: Option<Value>,
}

impl FieldDef {
    /// A field of the given kind with no flags set.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            searchable: false,
            sortable: false,
            positive: false,
            default: None,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Date)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number)
    }

    /// A status field with the given allowed values.
    pub fn status<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            FieldKind::Status(values.into_iter().map(Into::into).collect()),
        )
    }

    /// The field must be present (and non-empty for text) on every record.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// The field takes part in free-text search.
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    /// Views may be sorted by this field.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Numeric values must be strictly greater than zero.
    pub fn positive(mut self) -> Self {
        self.positive = true;
        self
    }

    /// Value applied on create when the field is not supplied.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn is_positive(&self) -> bool {
        self.positive
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Allowed values for a status field.
    pub fn status_values(&self) -> Option<&[String]> {
        match &self.kind {
            FieldKind::Status(values) => Some(values),
            _ => None,
        }
    }

    /// Check a present, non-null value against this definition.
    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        match &self.kind {
            FieldKind::Text => {
                let text = self.expect_str(value, "a string")?;
                self.check_not_blank(text)
            }
            FieldKind::Date => {
                let text = self.expect_str(value, "an ISO date (YYYY-MM-DD)")?;
                self.check_not_blank(text)?;
                NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
                    .map(|_| ())
                    .map_err(|_| self.wrong_type("an ISO date (YYYY-MM-DD)"))
            }
            FieldKind::Integer => {
                let number = value
                    .as_i64()
                    .ok_or_else(|| self.wrong_type("an integer"))?;
                self.check_positive(number as f64)
            }
            FieldKind::Number => {
                let number = value.as_f64().ok_or_else(|| self.wrong_type("a number"))?;
                self.check_positive(number)
            }
            FieldKind::Status(values) => {
                let text = self.expect_str(value, "a string")?;
                if values.iter().any(|v| v == text) {
                    Ok(())
                } else {
                    Err(ValidationError::UnknownStatus {
                        value: text.to_string(),
                        expected: values.join(", "),
                    })
                }
            }
        }
    }

    fn expect_str<'a>(
        &self,
        value: &'a Value,
        expected: &'static str,
    ) -> Result<&'a str, ValidationError> {
        value.as_str().ok_or_else(|| self.wrong_type(expected))
    }

    fn check_not_blank(&self, text: &str) -> Result<(), ValidationError> {
        if self.required && text.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: self.name.clone(),
            });
        }
        Ok(())
    }

    fn check_positive(&self, number: f64) -> Result<(), ValidationError> {
        if self.positive && number <= 0.0 {
            return Err(ValidationError::OutOfRange {
                field: self.name.clone(),
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    fn wrong_type(&self, expected: &'static str) -> ValidationError {
        ValidationError::WrongType {
            field: self.name.clone(),
            expected,
        }
    }
}
