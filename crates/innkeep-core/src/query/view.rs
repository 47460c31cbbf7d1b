//! Derived view type.

use serde::Serialize;

use crate::record::Record;

/// One page of a filtered, sorted collection.
///
/// A view is a snapshot: later mutations of the engine do not change it.
/// Use [`ListViewEngine::is_current`](crate::ListViewEngine::is_current)
/// to tell whether it still reflects the collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedView {
    records: Vec<Record>,
    page: usize,
    page_size: usize,
    total_pages: usize,
    total_matching: usize,
    #[serde(skip)]
    generation: u64,
}

impl DerivedView {
    pub(crate) fn new(
        records: Vec<Record>,
        page: usize,
        page_size: usize,
        total_pages: usize,
        total_matching: usize,
        generation: u64,
    ) -> Self {
        Self {
            records,
            page,
            page_size,
            total_pages,
            total_matching,
            generation,
        }
    }

    /// Records on this page, in view order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// The page actually returned, after clamping.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// At least 1, even when nothing matches.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Records matching the filters across all pages.
    pub fn total_matching(&self) -> usize {
        self.total_matching
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }
}
