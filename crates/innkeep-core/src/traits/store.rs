//! Record store trait.

use async_trait::async_trait;

use crate::Result;
use crate::record::{Fields, Record};
use crate::types::RecordId;

/// An append-only record store backed by a single document.
///
/// The store owns its own id policy: a record appended without an id gets
/// a time-based one (see [`next_store_id`]).
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every stored record, in storage order.
    async fn list(&self) -> Result<Vec<Record>>;

    /// Append a record and return it as stored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateId`](crate::Error::DuplicateId) if the
    /// requested id is taken.
    async fn append(&self, fields: Fields) -> Result<Record>;
}

/// Pick an id for a store append: the current time in milliseconds, or
/// one past the largest existing id if the clock is behind it.
pub fn next_store_id(existing: &[Record], now_millis: u64) -> RecordId {
    let floor = existing
        .iter()
        .map(Record::id)
        .max()
        .and_then(RecordId::checked_next)
        .map_or(0, RecordId::get);
    RecordId::new(now_millis.max(floor))
}
