//! Comparison page: persisted selection, column controls, and the
//! display-ready report.

use sc_catalog::Catalog;
use sc_compare::{CellValue, ComparisonSession, SelectOutcome, Section};
use sc_store::{FileStore, KvStore};

use crate::config::BrowserConfig;
use crate::error::{AppError, AppResult};

/// Open the comparison session stored under the config's state directory.
pub fn open_comparison(config: &BrowserConfig) -> AppResult<ComparisonSession<FileStore>> {
    let store = FileStore::new(config.state_dir.clone())?;
    Ok(ComparisonSession::load(store).with_highlight(config.highlight_differences))
}

/// Add a record to the comparison. Unknown ids are an error; a full
/// selection is reported through the outcome.
pub fn select_record<S: KvStore>(
    session: &mut ComparisonSession<S>,
    catalog: &Catalog,
    id: &str,
) -> AppResult<SelectOutcome> {
    if !catalog.contains(id) {
        return Err(AppError::UnknownRecord(id.to_string()));
    }
    Ok(session.select(id))
}

/// Drag one selected column onto another, by id.
pub fn reorder_columns<S: KvStore>(
    session: &mut ComparisonSession<S>,
    dragged: &str,
    target: &str,
) -> AppResult<bool> {
    for id in [dragged, target] {
        if !session.columns().contains(id) {
            return Err(AppError::InvalidInput(format!(
                "'{}' is not in the comparison",
                id
            )));
        }
    }
    Ok(session.reorder(dragged, target))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub label: &'static str,
    /// Cells in visible column order.
    pub cells: Vec<CellValue>,
    pub differs: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub section: Section,
    pub expanded: bool,
    pub rows: Vec<ReportRow>,
}

/// Matrix projected onto the visible columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonReport {
    pub headers: Vec<String>,
    pub hidden: Vec<String>,
    pub sections: Vec<ReportSection>,
}

impl ComparisonReport {
    pub fn differing_rows(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| &s.rows)
            .filter(|r| r.differs)
            .count()
    }
}

pub fn comparison_report<S: KvStore>(
    session: &ComparisonSession<S>,
    catalog: &Catalog,
) -> ComparisonReport {
    let matrix = session.matrix(catalog);
    let visible = session.columns().visible_order();
    let mut flags = session.differences(&matrix).into_iter();

    let sections = matrix
        .sections
        .iter()
        .map(|section| ReportSection {
            section: section.section,
            expanded: session.expanded().is_expanded(section.section),
            rows: section
                .rows
                .iter()
                .map(|row| ReportRow {
                    label: row.label,
                    cells: visible
                        .iter()
                        .filter_map(|&i| row.values.get(i).cloned())
                        .collect(),
                    differs: flags.next().unwrap_or(false),
                })
                .collect(),
        })
        .collect();

    ComparisonReport {
        headers: session
            .headers(catalog)
            .into_iter()
            .map(|h| h.title)
            .collect(),
        hidden: session.columns().hidden().to_vec(),
        sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_catalog::SimulationRecord;
    use sc_store::MemoryStore;

    fn catalog() -> Catalog {
        let record = |id: &str, grid: &str| SimulationRecord {
            id: id.to_string(),
            grid_name: Some(grid.to_string()),
            ..Default::default()
        };
        Catalog::new(vec![record("a", "ne30pg2"), record("b", "ne120pg2")], Vec::new())
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let catalog = catalog();
        let mut session = ComparisonSession::load(MemoryStore::new());
        assert!(matches!(
            select_record(&mut session, &catalog, "zzz"),
            Err(AppError::UnknownRecord(_))
        ));
        assert_eq!(
            select_record(&mut session, &catalog, "a").unwrap(),
            SelectOutcome::Added
        );
        assert!(reorder_columns(&mut session, "a", "b").is_err());
    }

    #[test]
    fn report_follows_visible_order() {
        let catalog = catalog();
        let mut session = ComparisonSession::load(MemoryStore::new()).with_highlight(true);
        session.replace_selection(["a", "b"]);
        session.reorder("b", "a");

        let report = comparison_report(&session, &catalog);
        assert_eq!(report.headers, vec!["b", "a"]);
        let grid = report
            .sections
            .iter()
            .flat_map(|s| &s.rows)
            .find(|r| r.label == "Grid Name")
            .unwrap();
        assert_eq!(
            grid.cells,
            vec![
                CellValue::Text("ne120pg2".to_string()),
                CellValue::Text("ne30pg2".to_string()),
            ]
        );
        assert!(grid.differs);
        assert_eq!(report.differing_rows(), 1);
        assert!(report.sections[0].expanded);
    }
}
