//! In-memory catalog: records joined with their machines.

use std::collections::HashMap;

use crate::record::{Machine, SimulationRecord};

/// Read-only record set handed to the filter and comparison engines.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<SimulationRecord>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, attaching each record's machine by `machineId` when the
    /// record does not already embed one. Unknown machine ids stay unjoined.
    pub fn new(records: Vec<SimulationRecord>, machines: Vec<Machine>) -> Self {
        let machine_index: HashMap<&str, &Machine> =
            machines.iter().map(|m| (m.id.as_str(), m)).collect();

        let records: Vec<SimulationRecord> = records
            .into_iter()
            .map(|mut record| {
                if record.machine.is_none()
                    && let Some(machine) = record
                        .machine_id
                        .as_deref()
                        .and_then(|id| machine_index.get(id))
                {
                    record.machine = Some((*machine).clone());
                }
                record
            })
            .collect();

        let mut by_id = HashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            by_id.entry(record.id.clone()).or_insert(index);
        }

        tracing::debug!(
            records = records.len(),
            machines = machines.len(),
            "catalog assembled"
        );

        Self { records, by_id }
    }

    pub fn records(&self) -> &[SimulationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record with the given id.
    pub fn get(&self, id: &str) -> Option<&SimulationRecord> {
        self.by_id.get(id).map(|&index| &self.records[index])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

}
