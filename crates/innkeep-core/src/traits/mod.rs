//! Collaborator traits.
//!
//! The engine never performs I/O itself. Initial records come from a
//! [`RecordLoader`]; the one persisted entity goes through a
//! [`RecordStore`].

mod loader;
mod store;

pub use loader::{RecordLoader, StaticLoader};
pub use store::{RecordStore, next_store_id};
