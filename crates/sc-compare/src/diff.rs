//! Per-row difference detection across the visible columns.

use std::borrow::Cow;

use crate::matrix::{CellValue, MetricRow};

/// Placeholder used for absent values when comparing.
pub const EMPTY_MARK: &str = "—";

/// Comparable form of a cell: lists as compact JSON, absent as
/// [`EMPTY_MARK`], text as-is.
pub fn normalize(value: &CellValue) -> Cow<'_, str> {
    match value {
        CellValue::Empty => Cow::Borrowed(EMPTY_MARK),
        CellValue::Text(text) if text.is_empty() => Cow::Borrowed(EMPTY_MARK),
        CellValue::Text(text) => Cow::Borrowed(text.as_str()),
        CellValue::Links(links) => Cow::Owned(serde_json::to_string(links).unwrap_or_default()),
    }
}

/// Whether any two visible cells of `row` disagree. `visible` holds indices
/// into the selection, in display order; indices outside the row are
/// ignored. Zero or one visible column never differs.
pub fn row_differs(row: &MetricRow, visible: &[usize]) -> bool {
    let mut cells = visible.iter().filter_map(|&i| row.values.get(i));
    let Some(first) = cells.next() else {
        return false;
    };
    let first = normalize(first);
    cells.any(|cell| normalize(cell) != first)
}

/// Highlight flags for `rows`. All `false` when highlighting is off.
pub fn highlight<'a, I>(rows: I, visible: &[usize], enabled: bool) -> Vec<bool>
where
    I: IntoIterator<Item = &'a MetricRow>,
{
    rows.into_iter()
        .map(|row| enabled && row_differs(row, visible))
        .collect()
}
