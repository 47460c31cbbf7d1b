//! Error types for innkeep.
//!
//! The engine reports four kinds of failure to its caller: validation,
//! missing records, id collisions and load failures. Collaborator errors
//! (record stores) and lock poisoning in [`SharedEngine`](crate::SharedEngine)
//! get their own variants.

use thiserror::Error;

use crate::types::RecordId;

/// The unified error type for innkeep operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A field, query parameter or schema definition was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The mutation target does not exist.
    #[error("record {id} not found")]
    NotFound { id: RecordId },

    /// The operation would leave two records with the same id.
    #[error("duplicate record id {id}")]
    DuplicateId { id: RecordId },

    /// The initial record set could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A record store failed to read or write.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A previous holder of the engine lock panicked.
    #[error("engine lock poisoned during {operation}")]
    LockPoisoned { operation: &'static str },
}

impl Error {
    /// Returns true for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Returns true for [`Error::Validation`].
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Returns true for [`Error::DuplicateId`].
    pub fn is_duplicate_id(&self) -> bool {
        matches!(self, Error::DuplicateId { .. })
    }
}

/// Field, query and schema validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent or null.
    #[error("missing required field '{field}'")]
    MissingField { field: String },

    /// A required text field is empty.
    #[error("field '{field}' cannot be empty")]
    EmptyField { field: String },

    /// A field holds a value of the wrong type.
    #[error("field '{field}' must be {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    /// A numeric field is outside its allowed range.
    #[error("field '{field}' {reason}")]
    OutOfRange { field: String, reason: String },

    /// The field is not declared by the schema.
    #[error("unknown field '{field}'")]
    UnknownField { field: String },

    /// The field is unknown or not declared searchable.
    #[error("field '{field}' is not searchable")]
    NotSearchable { field: String },

    /// The field is unknown or not declared sortable.
    #[error("field '{field}' is not sortable")]
    NotSortable { field: String },

    /// The status value is not one the schema declares.
    #[error("unknown status '{value}' (expected one of: {expected})")]
    UnknownStatus { value: String, expected: String },

    /// A status operation was issued against an entity without a status field.
    #[error("entity '{entity}' has no status field")]
    NoStatusField { entity: String },

    /// Page size must be at least one.
    #[error("page size must be at least 1")]
    InvalidPageSize,

    /// A record id could not be parsed or assigned.
    #[error("invalid id '{value}': {reason}")]
    InvalidId { value: String, reason: String },

    /// A raw value could not be turned into a record.
    #[error("invalid record: {reason}")]
    InvalidRecord { reason: String },

    /// A `key=value` assignment was malformed.
    #[error("invalid assignment '{input}': expected key=value")]
    InvalidAssignment { input: String },

    /// A schema definition is inconsistent.
    #[error("invalid schema '{entity}': {reason}")]
    InvalidSchema { entity: String, reason: String },
}

/// Failures while fetching the initial record set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The backing file could not be read.
    #[error("failed to read {source_name}: {message}")]
    Io {
        source_name: String,
        message: String,
    },

    /// The payload is not valid JSON.
    #[error("malformed JSON: {message}")]
    Malformed { message: String },

    /// The payload is valid JSON but not an array.
    #[error("expected a JSON array, found {found}")]
    NotAnArray { found: &'static str },

    /// An element of the array is not a valid record.
    #[error("record at index {index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// The remote source answered with a non-success status.
    #[error("HTTP {status}")]
    Http { status: u16 },

    /// The remote source could not be reached.
    #[error("transport error: {message}")]
    Transport { message: String },
}

/// Failures of a record store collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Filesystem failure.
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// The stored document could not be parsed or produced.
    #[error("malformed store document: {message}")]
    Malformed { message: String },

    /// The remote store answered with a non-success status.
    #[error("HTTP {status}")]
    Http { status: u16 },

    /// The remote store could not be reached.
    #[error("transport error: {message}")]
    Transport { message: String },
}

impl From<LoadError> for StoreError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Io {
                source_name,
                message,
            } => StoreError::Io {
                path: source_name,
                message,
            },
            LoadError::Http { status } => StoreError::Http { status },
            LoadError::Transport { message } => StoreError::Transport { message },
            other => StoreError::Malformed {
                message: other.to_string(),
            },
        }
    }
}
