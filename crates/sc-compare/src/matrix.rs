//! Projection of the selected records into labeled metric rows.

use serde::Serialize;

use sc_catalog::dates::{describe_duration, format_timestamp};
use sc_catalog::{Catalog, LinkRef, RecordField, SimulationRecord};

use crate::metrics::{MetricDef, MetricSource, Section};

/// One cell of the matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    Empty,
    Text(String),
    Links(Vec<LinkRef>),
}

impl CellValue {
    fn text(value: Option<impl Into<String>>) -> Self {
        match value {
            Some(text) => CellValue::Text(text.into()),
            None => CellValue::Empty,
        }
    }

    /// Plain-text rendering for terminals and exports.
    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(text) => text.clone(),
            CellValue::Links(links) => links
                .iter()
                .map(|l| l.url.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// A labeled row. `values[i]` belongs to the `i`th selected id, not to the
/// `i`th displayed column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricRow {
    pub label: &'static str,
    pub values: Vec<CellValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionRows {
    pub section: Section,
    pub rows: Vec<MetricRow>,
}

/// Every section's rows for one selection, in declared section order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ComparisonMatrix {
    pub ids: Vec<String>,
    pub sections: Vec<SectionRows>,
}

impl ComparisonMatrix {
    pub fn rows(&self) -> impl Iterator<Item = (Section, &MetricRow)> {
        self.sections
            .iter()
            .flat_map(|s| s.rows.iter().map(move |row| (s.section, row)))
    }

    pub fn section(&self, section: Section) -> Option<&SectionRows> {
        self.sections.iter().find(|s| s.section == section)
    }
}

fn fallback(source: MetricSource) -> CellValue {
    if source.is_grouped() {
        CellValue::Links(Vec::new())
    } else {
        CellValue::Empty
    }
}

/// Evaluate one metric against one record.
pub fn cell(record: &SimulationRecord, source: MetricSource) -> CellValue {
    match source {
        MetricSource::Field(field) => CellValue::text(record.field(field)),
        MetricSource::Date(field) => CellValue::text(record.field(field).and_then(format_timestamp)),
        MetricSource::Duration => {
            let span = record
                .field(RecordField::SimulationStartDate)
                .zip(record.field(RecordField::SimulationEndDate))
                .and_then(|(start, end)| describe_duration(start, end));
            CellValue::text(span)
        }
        MetricSource::MachineName => CellValue::text(record.machine_name()),
        MetricSource::Grouped(kind) => CellValue::Links(record.grouped(kind)),
    }
}

fn metric_row(metric: &MetricDef, records: &[Option<&SimulationRecord>]) -> MetricRow {
    let values = records
        .iter()
        .map(|record| match record {
            Some(record) => cell(record, metric.source),
            None => fallback(metric.source),
        })
        .collect();
    MetricRow {
        label: metric.label,
        values,
    }
}

/// Build the matrix for `selection`. Ids with no record in the catalog get
/// fallback cells rather than being dropped, so rows stay index-aligned.
pub fn build_matrix(selection: &[String], catalog: &Catalog) -> ComparisonMatrix {
    let records: Vec<Option<&SimulationRecord>> =
        selection.iter().map(|id| catalog.get(id)).collect();

    let missing = records.iter().filter(|r| r.is_none()).count();
    if missing > 0 {
        tracing::debug!(missing, "selected ids without a catalog record");
    }

    let sections = Section::ALL
        .into_iter()
        .map(|section| SectionRows {
            section,
            rows: section
                .metrics()
                .iter()
                .map(|metric| metric_row(metric, &records))
                .collect(),
        })
        .collect();

    ComparisonMatrix {
        ids: selection.to_vec(),
        sections,
    }
}
