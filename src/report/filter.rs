//! Record filtering
//!
//! Free-text search over a configurable set of string fields, combined
//! with a caller-supplied predicate such as a progress threshold.

use crate::domain::RosterEntry;

/// Accessor for one searchable text field of a record.
pub type TextField<T> = fn(&T) -> &str;

/// Return the records that match `query` and satisfy `predicate`.
///
/// `query` matches when it is a case-insensitive substring of at least one
/// of `fields`. An empty query matches every record; a non-empty query
/// matches nothing when `fields` is empty.
pub fn filter_records<'a, T, P>(
    records: &'a [T],
    query: &str,
    fields: &[TextField<T>],
    predicate: P,
) -> Vec<&'a T>
where
    P: Fn(&T) -> bool,
{
    let needle = query.to_lowercase();

    records
        .iter()
        .filter(|record| matches_query(*record, &needle, fields) && predicate(*record))
        .collect()
}

fn matches_query<T>(record: &T, needle: &str, fields: &[TextField<T>]) -> bool {
    needle.is_empty()
        || fields
            .iter()
            .any(|field| field(record).to_lowercase().contains(needle))
}

/// Predicate that accepts every record.
pub fn any_record<T>(_: &T) -> bool {
    true
}

/// Predicate holding when `value(record) >= threshold`.
pub fn at_least<T, V, F>(threshold: V, value: F) -> impl Fn(&T) -> bool
where
    V: PartialOrd,
    F: Fn(&T) -> V,
{
    move |record| value(record) >= threshold
}

/// Searchable fields of a gradebook roster row.
pub fn roster_fields() -> [TextField<RosterEntry>; 2] {
    [roster_name, roster_email]
}

fn roster_name(entry: &RosterEntry) -> &str {
    &entry.name
}

fn roster_email(entry: &RosterEntry) -> &str {
    &entry.email
}

/// Filter a roster by name/email and an optional minimum progress.
pub fn search_roster<'a>(
    entries: &'a [RosterEntry],
    query: &str,
    min_progress: Option<f64>,
) -> Vec<&'a RosterEntry> {
    match min_progress {
        Some(threshold) => filter_records(
            entries,
            query,
            &roster_fields(),
            at_least(threshold, RosterEntry::progress),
        ),
        None => filter_records(entries, query, &roster_fields(), any_record),
    }
}
