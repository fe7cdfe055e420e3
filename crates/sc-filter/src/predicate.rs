//! Filter predicate: AND across active fields, OR within a field.

use sc_catalog::dates::parse_date;
use sc_catalog::{FilterField, RecordField, SimulationRecord};

use crate::state::{FilterState, FilterValue};

/// Whether `record` satisfies every active field of `filters`.
pub fn matches(record: &SimulationRecord, filters: &FilterState) -> bool {
    filters
        .iter()
        .all(|(field, value)| field_matches(record, field, value))
}

fn field_matches(record: &SimulationRecord, field: FilterField, value: &FilterValue) -> bool {
    match value {
        FilterValue::Many(selected) => {
            if selected.is_empty() {
                return true;
            }
            let Some(record_field) = field.record_field() else {
                return true;
            };
            record
                .values(record_field)
                .iter()
                .any(|v| selected.iter().any(|s| s == v))
        }
        FilterValue::One(text) => match field {
            FilterField::Search => search_matches(record, text),
            FilterField::StartAfter => {
                date_bound_matches(record, text, |start, bound| start >= bound)
            }
            FilterField::StartBefore => {
                date_bound_matches(record, text, |start, bound| start <= bound)
            }
            _ => field
                .record_field()
                .is_none_or(|rf| record.values(rf).contains(&text.as_str())),
        },
    }
}

fn search_matches(record: &SimulationRecord, text: &str) -> bool {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [
        RecordField::Name,
        RecordField::CaseName,
        RecordField::Description,
    ]
    .into_iter()
    .filter_map(|f| record.field(f))
    .any(|haystack| haystack.to_lowercase().contains(&needle))
}

fn date_bound_matches<F>(record: &SimulationRecord, bound: &str, within: F) -> bool
where
    F: Fn(chrono::NaiveDate, chrono::NaiveDate) -> bool,
{
    let Some(bound) = parse_date(bound) else {
        return true;
    };
    record
        .field(RecordField::SimulationStartDate)
        .and_then(parse_date)
        .is_some_and(|start| within(start, bound))
}

/// Records passing `filters`, in input order.
pub fn filter_records<'a>(
    records: &'a [SimulationRecord],
    filters: &FilterState,
) -> Vec<&'a SimulationRecord> {
    let filtered: Vec<&SimulationRecord> =
        records.iter().filter(|r| matches(r, filters)).collect();
    tracing::debug!(
        total = records.len(),
        matched = filtered.len(),
        active_fields = filters.len(),
        "records filtered"
    );
    filtered
}
