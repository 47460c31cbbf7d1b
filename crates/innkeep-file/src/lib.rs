//! innkeep-file - JSON-file-backed record store.

mod store;

pub use store::FileRecordStore;
