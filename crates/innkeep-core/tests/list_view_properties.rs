//! Properties of derived views over a varied booking collection.

use std::collections::HashSet;

use innkeep_core::{
    DerivedView, Fields, ListViewEngine, QueryDescriptor, RecordId, Schema, SortDirection,
};

const NAMES: [&str; 7] = [
    "John Doe",
    "Jane Smith",
    "Alice Brown",
    "bob lee",
    "Ann Marie",
    "Joan Jett",
    "Ian Annan",
];
const ROOMS: [&str; 4] = ["Deluxe", "Suite", "Standard", "Family"];
const STATUSES: [&str; 3] = ["Confirmed", "Pending", "Cancelled"];

fn engine() -> ListViewEngine {
    let mut engine = ListViewEngine::new(Schema::booking());
    for i in 0..37usize {
        let mut fields = Fields::new()
            .with("name", NAMES[i % NAMES.len()])
            .with("room", ROOMS[(i * 3) % ROOMS.len()])
            .with("date", format!("2024-03-{:02}", 1 + (i * 7) % 28))
            .with("status", STATUSES[(i * 5) % STATUSES.len()]);
        if i % 4 != 0 {
            fields.set("price", (i * 37 % 11) as u64 * 100 + 50);
        }
        engine.create(fields).unwrap();
    }
    engine
}

fn queries() -> Vec<QueryDescriptor> {
    let mut queries = Vec::new();
    for search in ["", "an", "J", "suite", "zzz"] {
        for status in [None, Some("Pending"), Some("Cancelled")] {
            for (field, direction) in [
                ("id", SortDirection::Asc),
                ("name", SortDirection::Desc),
                ("price", SortDirection::Asc),
                ("date", SortDirection::Desc),
                ("status", SortDirection::Asc),
            ] {
                let mut query = QueryDescriptor::new()
                    .search(search)
                    .sort_by(field, direction)
                    .page_size(4);
                if let Some(status) = status {
                    query = query.status(status);
                }
                queries.push(query);
            }
        }
    }
    queries
}

/// All pages of `query`, concatenated.
fn all_pages(engine: &ListViewEngine, query: &QueryDescriptor) -> (DerivedView, Vec<RecordId>) {
    let first = engine.query(&query.clone().page(1)).unwrap();
    let mut ids = Vec::new();
    for page in 1..=first.total_pages() {
        let view = engine.query(&query.clone().page(page)).unwrap();
        assert_eq!(view.page(), page);
        ids.extend(view.records().iter().map(|r| r.id()));
    }
    (first, ids)
}

fn matches(engine: &ListViewEngine, query: &QueryDescriptor) -> Vec<RecordId> {
    let needle = query.search_text.to_lowercase();
    engine
        .records()
        .iter()
        .filter(|r| {
            query
                .status_filter
                .as_deref()
                .is_none_or(|status| r.status() == Some(status))
        })
        .filter(|r| {
            ["name", "room"].iter().any(|field| {
                r.get_str(field)
                    .is_some_and(|v| v.to_lowercase().contains(&needle))
            })
        })
        .map(|r| r.id())
        .collect()
}

#[test]
fn total_matching_counts_exactly_the_matching_records() {
    let engine = engine();
    for query in queries() {
        let view = engine.query(&query).unwrap();
        assert_eq!(view.total_matching(), matches(&engine, &query).len(), "{:?}", query);
    }
}

#[test]
fn pages_concatenate_to_the_full_sorted_sequence() {
    let engine = engine();
    for query in queries() {
        let (first, ids) = all_pages(&engine, &query);
        assert_eq!(ids.len(), first.total_matching());

        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len(), "duplicate across pages: {:?}", query);

        let expected: HashSet<_> = matches(&engine, &query).into_iter().collect();
        assert_eq!(ids.iter().copied().collect::<HashSet<_>>(), expected);

        let expected_pages = first.total_matching().div_ceil(4).max(1);
        assert_eq!(first.total_pages(), expected_pages);
    }
}

#[test]
fn longer_search_text_never_matches_more() {
    let engine = engine();
    for (short, long) in [("a", "an"), ("an", "ann"), ("j", "jo"), ("jo", "joan")] {
        for status in [None, Some("Confirmed")] {
            let mut narrow = QueryDescriptor::new().search(long);
            let mut wide = QueryDescriptor::new().search(short);
            if let Some(status) = status {
                narrow = narrow.status(status);
                wide = wide.status(status);
            }
            let narrow = engine.query(&narrow).unwrap().total_matching();
            let wide = engine.query(&wide).unwrap().total_matching();
            assert!(narrow <= wide, "'{}' matched more than '{}'", long, short);
        }
    }
}

#[test]
fn requery_without_mutation_is_identical() {
    let engine = engine();
    for query in queries() {
        let first = engine.query(&query).unwrap();
        let second = engine.query(&query).unwrap();
        assert_eq!(first, second);
        assert!(engine.is_current(&first));
    }
}

#[test]
fn sorted_pages_respect_the_ordering() {
    let engine = engine();
    let query = QueryDescriptor::new()
        .sort_by("date", SortDirection::Asc)
        .page_size(5);
    let (_, ids) = all_pages(&engine, &query);

    let dates: Vec<&str> = ids
        .iter()
        .map(|id| engine.get(*id).and_then(|r| r.get_str("date")).unwrap())
        .collect();
    assert!(dates.windows(2).all(|w| w[0] <= w[1]));

    // Records without a price come first in ascending order.
    let query = QueryDescriptor::new()
        .sort_by("price", SortDirection::Asc)
        .page_size(50);
    let view = engine.query(&query).unwrap();
    let missing = view
        .records()
        .iter()
        .take_while(|r| r.get("price").is_none())
        .count();
    assert_eq!(missing, 10);
}

#[test]
fn mutation_makes_old_views_stale() {
    let mut engine = engine();
    let view = engine.query(&QueryDescriptor::new()).unwrap();
    engine.set_status(RecordId::new(1), "Cancelled").unwrap();
    assert!(!engine.is_current(&view));

    let refreshed = engine.query(&QueryDescriptor::new()).unwrap();
    assert!(engine.is_current(&refreshed));
    assert_eq!(
        refreshed.records()[0].status(),
        Some("Cancelled"),
    );
}
