//! innkeep-core - Schema-driven list views for the innkeep dashboard.
//!
//! Every screen of the dashboard (bookings, rooms, users) is the same
//! pipeline over a different record shape: hold a collection, derive a
//! filtered, sorted, paginated view of it, and apply create, update and
//! delete commands. This crate implements that pipeline once as
//! [`ListViewEngine`], parameterized by a [`Schema`].

pub mod engine;
pub mod error;
pub mod query;
pub mod record;
pub mod schema;
pub mod traits;
pub mod types;

pub use engine::{ListViewEngine, SharedEngine};
pub use error::{Error, LoadError, StoreError, ValidationError};
pub use query::{DEFAULT_PAGE_SIZE, DerivedView, QueryDescriptor, SortDirection};
pub use record::{Fields, Record, parse_collection, to_collection_string};
pub use schema::{FieldDef, FieldKind, Schema};
pub use traits::{RecordLoader, RecordStore, StaticLoader};
pub use types::RecordId;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
