//! Catalog loading and record summaries.

use std::path::Path;

use sc_catalog::{Catalog, Machine, SimulationRecord, load_machines, load_records};

use crate::config::BrowserConfig;
use crate::error::{AppError, AppResult};

fn read_records(path: &Path) -> AppResult<Vec<SimulationRecord>> {
    load_records(path).map_err(|source| AppError::CatalogFileRead {
        path: path.to_path_buf(),
        source,
    })
}

fn read_machines(path: &Path) -> AppResult<Vec<Machine>> {
    load_machines(path).map_err(|source| AppError::CatalogFileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Load records (and machines, when configured) and join them.
pub fn load_catalog(config: &BrowserConfig) -> AppResult<Catalog> {
    let records = read_records(&config.records)?;
    let machines = match &config.machines {
        Some(path) => read_machines(path)?,
        None => Vec::new(),
    };
    tracing::info!(
        records = records.len(),
        machines = machines.len(),
        path = %config.records.display(),
        "catalog loaded"
    );
    Ok(Catalog::new(records, machines))
}

/// Summary line for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    pub id: String,
    pub name: String,
    pub campaign: Option<String>,
    pub status: Option<String>,
    pub machine: Option<String>,
}

pub fn summarize(record: &SimulationRecord) -> RecordSummary {
    RecordSummary {
        id: record.id.clone(),
        name: record.display_name().to_string(),
        campaign: record.campaign_id.clone().filter(|c| !c.is_empty()),
        status: record.status.clone().filter(|s| !s.is_empty()),
        machine: record.machine_name().map(str::to_string),
    }
}
