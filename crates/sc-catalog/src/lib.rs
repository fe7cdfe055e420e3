//! sc-catalog: simulation records, machines, and the field accessor layer.

pub mod catalog;
pub mod dates;
pub mod fields;
pub mod links;
pub mod record;

pub use catalog::Catalog;
pub use fields::{FacetGroup, FieldKind, FilterField, RecordField};
pub use links::LinkRef;
pub use record::{Artifact, ExternalLink, Machine, SimulationRecord};

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON array of {what}")]
    NotAnArray { what: &'static str },
}

/// Parse a JSON array of simulation records.
///
/// Entries that fail to deserialize or carry no `id` are skipped with a
/// warning so one bad record does not hide the rest of the catalog.
pub fn parse_records(content: &str) -> CatalogResult<Vec<SimulationRecord>> {
    parse_array(content, "simulation records", |r: &SimulationRecord| &r.id)
}

/// Parse a JSON array of machines, skipping malformed or id-less entries.
pub fn parse_machines(content: &str) -> CatalogResult<Vec<Machine>> {
    parse_array(content, "machines", |m: &Machine| &m.id)
}

pub fn load_records(path: &std::path::Path) -> CatalogResult<Vec<SimulationRecord>> {
    let content = std::fs::read_to_string(path)?;
    parse_records(&content)
}

pub fn load_machines(path: &std::path::Path) -> CatalogResult<Vec<Machine>> {
    let content = std::fs::read_to_string(path)?;
    parse_machines(&content)
}

fn parse_array<T>(
    content: &str,
    what: &'static str,
    id_of: fn(&T) -> &String,
) -> CatalogResult<Vec<T>>
where
    T: serde::de::DeserializeOwned,
{
    let value: serde_json::Value = serde_json::from_str(content)?;
    let serde_json::Value::Array(entries) = value else {
        return Err(CatalogError::NotAnArray { what });
    };

    let mut items = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value(entry) {
            Ok(item) if id_of(&item).trim().is_empty() => {
                tracing::warn!(index, "skipping {} entry without an id", what)
            }
            Ok(item) => items.push(item),
            Err(err) => tracing::warn!(index, %err, "skipping malformed {}", what),
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_entries_are_skipped() {
        let json = r#"[
            {"id": "a", "name": "first"},
            {"id": "b", "name": 42},
            {"id": "c"}
        ]"#;
        let records = parse_records(json).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn entries_without_id_are_skipped() {
        let json = r#"[
            {"name": "no id"},
            {"id": "", "name": "blank id"},
            {"id": "  "},
            {"id": "kept"}
        ]"#;
        let records = parse_records(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "kept");

        let machines = parse_machines(r#"[{"name": "anon"}, {"id": "m1", "name": "pm"}]"#).unwrap();
        assert_eq!(machines.len(), 1);
        assert_eq!(machines[0].id, "m1");
    }

    #[test]
    fn non_array_is_rejected() {
        let err = parse_machines(r#"{"id": "m"}"#).unwrap_err();
        assert!(matches!(err, CatalogError::NotAnArray { .. }));
    }
}
