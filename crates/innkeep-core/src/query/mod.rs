//! Filter, sort and paginate.
//!
//! [`derive_view`] is a pure function of a schema, a collection and a
//! [`QueryDescriptor`]. The descriptor is checked against the schema first,
//! so an unknown sort or search field is an error rather than a silent
//! no-op.

mod descriptor;
mod view;

pub use descriptor::{DEFAULT_PAGE_SIZE, QueryDescriptor, SortDirection};
pub use view::DerivedView;

use std::cmp::Ordering;

use serde_json::Value;

use crate::error::ValidationError;
use crate::record::{ID_FIELD, Record};
use crate::schema::{FieldDef, Schema};

/// Derive one page of `records` according to `query`.
///
/// `generation` is stamped on the view so the engine can later tell
/// whether it is stale.
pub fn derive_view(
    schema: &Schema,
    records: &[Record],
    query: &QueryDescriptor,
    generation: u64,
) -> Result<DerivedView, ValidationError> {
    let plan = Plan::resolve(schema, query)?;

    let mut matching: Vec<&Record> = records.iter().filter(|r| plan.matches(r)).collect();

    // `sort_by` is stable: equal keys keep collection order in both directions.
    matching.sort_by(|a, b| {
        let ordering = plan.sort.compare(a, b);
        match query.sort_direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    let page_size = query.page_size;
    let total_matching = matching.len();
    let total_pages = total_matching.div_ceil(page_size).max(1);
    let page = query.page.clamp(1, total_pages);

    let records = matching
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect();

    Ok(DerivedView::new(
        records,
        page,
        page_size,
        total_pages,
        total_matching,
        generation,
    ))
}

/// A descriptor resolved against a schema.
struct Plan<'a> {
    needle: String,
    search: Vec<&'a FieldDef>,
    status: Option<&'a str>,
    sort: SortKey<'a>,
}

impl<'a> Plan<'a> {
    fn resolve(schema: &'a Schema, query: &'a QueryDescriptor) -> Result<Self, ValidationError> {
        if query.page_size == 0 {
            return Err(ValidationError::InvalidPageSize);
        }

        let search = if query.search_fields.is_empty() {
            schema.searchable_fields().collect()
        } else {
            query
                .search_fields
                .iter()
                .map(|name| {
                    schema
                        .field(name)
                        .filter(|def| def.is_searchable())
                        .ok_or_else(|| ValidationError::NotSearchable {
                            field: name.clone(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?
        };

        let status = match &query.status_filter {
            Some(value) => {
                schema.check_status(value)?;
                Some(value.as_str())
            }
            None => None,
        };

        let sort = if query.sort_field == ID_FIELD {
            SortKey::Id
        } else {
            schema
                .field(&query.sort_field)
                .filter(|def| def.is_sortable())
                .map(SortKey::Field)
                .ok_or_else(|| ValidationError::NotSortable {
                    field: query.sort_field.clone(),
                })?
        };

        Ok(Self {
            needle: query.search_text.to_lowercase(),
            search,
            status,
            sort,
        })
    }

    fn matches(&self, record: &Record) -> bool {
        if let Some(status) = self.status
            && record.status() != Some(status)
        {
            return false;
        }

        if self.needle.is_empty() {
            return true;
        }

        self.search.iter().any(|def| {
            record
                .get(def.name())
                .and_then(searchable_text)
                .is_some_and(|text| text.to_lowercase().contains(&self.needle))
        })
    }
}

/// Text form of a scalar for substring search.
fn searchable_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

enum SortKey<'a> {
    Id,
    Field(&'a FieldDef),
}

/// A field value reduced to its natural ordering.
///
/// Missing values, and values whose JSON type does not match the declared
/// kind, sort before everything else.
#[derive(Debug, PartialEq)]
enum Key<'a> {
    Missing,
    Number(f64),
    Text(&'a str),
}

impl SortKey<'_> {
    fn compare(&self, a: &Record, b: &Record) -> Ordering {
        match self {
            SortKey::Id => a.id().cmp(&b.id()),
            SortKey::Field(def) => compare_keys(&key(def, a), &key(def, b)),
        }
    }
}

fn key<'r>(def: &FieldDef, record: &'r Record) -> Key<'r> {
    let Some(value) = record.get(def.name()) else {
        return Key::Missing;
    };
    if def.kind().is_numeric() {
        value.as_f64().map_or(Key::Missing, Key::Number)
    } else {
        value.as_str().map_or(Key::Missing, Key::Text)
    }
}

fn compare_keys(a: &Key<'_>, b: &Key<'_>) -> Ordering {
    match (a, b) {
        (Key::Missing, Key::Missing) => Ordering::Equal,
        (Key::Missing, _) => Ordering::Less,
        (_, Key::Missing) => Ordering::Greater,
        (Key::Number(x), Key::Number(y)) => x.total_cmp(y),
        (Key::Text(x), Key::Text(y)) => x.cmp(y),
        (Key::Number(_), Key::Text(_)) => Ordering::Less,
        (Key::Text(_), Key::Number(_)) => Ordering::Greater,
    }
}
