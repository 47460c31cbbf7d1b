//! Query descriptor types.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ValidationError};
use crate::record::ID_FIELD;

/// Page size used when a descriptor does not set one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(ValidationError::WrongType {
                field: format!("sortDirection '{}'", other),
                expected: "'asc' or 'desc'",
            }
            .into()),
        }
    }
}

/// Parameters for a single derivation of a view.
///
/// Descriptors are transient: callers build one per query. The JSON form
/// uses camelCase keys and every key is optional.
///
/// # Example
///
/// ```
/// use innkeep_core::{QueryDescriptor, SortDirection};
///
/// let query = QueryDescriptor::new()
///     .search("smith")
///     .status("Pending")
///     .sort_by("date", SortDirection::Desc)
///     .page(2)
///     .page_size(5);
///
/// assert_eq!(query.page, 2);
/// assert_eq!(query.sort_field, "date");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryDescriptor {
    /// Case-insensitive substring to look for. Empty matches everything.
    pub search_text: String,
    /// Fields to search. Empty means every searchable field of the schema.
    pub search_fields: BTreeSet<String>,
    /// Keep only records with this status.
    pub status_filter: Option<String>,
    pub sort_field: String,
    pub sort_direction: SortDirection,
    /// One-based page number; clamped into range when the view is derived.
    pub page: usize,
    pub page_size: usize,
}

impl Default for QueryDescriptor {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            search_fields: BTreeSet::new(),
            status_filter: None,
            sort_field: ID_FIELD.to_string(),
            sort_direction: SortDirection::Asc,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryDescriptor {
    /// A descriptor matching everything, sorted by id, first page.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Restrict search to `field`. May be called repeatedly.
    pub fn search_in(mut self, field: impl Into<String>) -> Self {
        self.search_fields.insert(field.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status_filter = Some(status.into());
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_field = field.into();
        self.sort_direction = direction;
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}
