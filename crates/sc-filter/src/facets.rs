//! Facet index: every distinct value observed per multi-select field.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use sc_catalog::{FilterField, SimulationRecord};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Label used for machines that are referenced but not joined.
pub const UNKNOWN_MACHINE: &str = "Unknown machine";

/// Available values per multi-select field, sorted case-insensitively.
///
/// Depends only on the record set, never on the current filter state, so the
/// side panel always lists every discoverable value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FacetOptions {
    values: BTreeMap<FilterField, Vec<String>>,
}

impl FacetOptions {
    /// Options for a field; empty for unknown or scalar fields.
    pub fn values(&self, field: FilterField) -> &[String] {
        self.values.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterField, &[String])> {
        self.values
            .iter()
            .map(|(field, values)| (*field, values.as_slice()))
    }

    pub fn fields(&self) -> impl Iterator<Item = FilterField> + '_ {
        self.values.keys().copied()
    }
}

/// `{value, label}` pair for facets whose stored value is an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetOption {
    pub value: String,
    pub label: String,
}

/// Primary collation key: canonical decomposition with combining marks
/// dropped, then lowercased. `Émile` and `emile` share a key.
pub fn collation_key(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Accent- and case-insensitive ordering with the raw string as
/// tie-breaker so the result is total and deterministic.
pub fn compare_case_insensitive(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn sort_case_insensitive(values: &mut [String]) {
    values.sort_by_cached_key(|v| (collation_key(v), v.clone()));
}

/// Build options for every multi-select field in the registry.
pub fn build_facets(records: &[SimulationRecord]) -> FacetOptions {
    build_facets_for(records, &FilterField::MULTI_SELECT)
}

/// Build options for the given fields in a single pass over `records`.
/// Scalar fields in `fields` are ignored.
pub fn build_facets_for(records: &[SimulationRecord], fields: &[FilterField]) -> FacetOptions {
    let targets: Vec<(FilterField, sc_catalog::RecordField)> = fields
        .iter()
        .filter_map(|field| field.record_field().map(|rf| (*field, rf)))
        .collect();

    let mut seen: HashMap<FilterField, HashSet<&str>> = HashMap::new();
    let mut values: BTreeMap<FilterField, Vec<String>> = targets
        .iter()
        .map(|(field, _)| (*field, Vec::new()))
        .collect();

    for record in records {
        for (field, record_field) in &targets {
            for value in record.values(*record_field) {
                if seen.entry(*field).or_default().insert(value)
                    && let Some(bucket) = values.get_mut(field)
                {
                    bucket.push(value.to_string());
                }
            }
        }
    }

    for bucket in values.values_mut() {
        sort_case_insensitive(bucket);
    }

    tracing::debug!(
        records = records.len(),
        fields = values.len(),
        "facet options rebuilt"
    );

    FacetOptions { values }
}

/// Machine facet entries: machine id with its display name.
///
/// Records without a joined machine name are labeled [`UNKNOWN_MACHINE`].
/// When records disagree on a machine's name, the smallest real name wins.
pub fn machine_options(records: &[SimulationRecord]) -> Vec<FacetOption> {
    let mut labels: HashMap<&str, Option<&str>> = HashMap::new();
    for record in records {
        let Some(id) = record.machine_id() else {
            continue;
        };
        let name = record.machine_name();
        let entry = labels.entry(id).or_insert(name);
        if let Some(name) = name
            && entry.is_none_or(|current| name < current)
        {
            *entry = Some(name);
        }
    }

    let mut options: Vec<FacetOption> = labels
        .into_iter()
        .map(|(id, name)| FacetOption {
            value: id.to_string(),
            label: name.unwrap_or(UNKNOWN_MACHINE).to_string(),
        })
        .collect();
    options.sort_by(|a, b| {
        compare_case_insensitive(&a.label, &b.label).then_with(|| a.value.cmp(&b.value))
    });
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_catalog::Machine;

    fn record(id: &str, campaign: Option<&str>, compset: Option<&str>) -> SimulationRecord {
        SimulationRecord {
            id: id.to_string(),
            campaign_id: campaign.map(str::to_string),
            compset: compset.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn values_are_distinct_and_sorted_case_insensitively() {
        let records = vec![
            record("1", Some("beta"), Some("F2010")),
            record("2", Some("Alpha"), None),
            record("3", Some("beta"), Some("")),
            record("4", Some("alpha"), Some("B1850")),
        ];
        let facets = build_facets(&records);
        assert_eq!(
            facets.values(FilterField::CampaignId),
            ["Alpha", "alpha", "beta"]
        );
        assert_eq!(facets.values(FilterField::Compset), ["B1850", "F2010"]);
        assert!(facets.values(FilterField::Status).is_empty());
        assert!(facets.values(FilterField::Search).is_empty());
        assert_eq!(facets.fields().count(), FilterField::MULTI_SELECT.len());
    }

    #[test]
    fn accented_values_sort_with_their_base_letters() {
        let records: Vec<SimulationRecord> = ["zoe", "Émile", "eve"]
            .into_iter()
            .map(|author| SimulationRecord {
                id: author.to_string(),
                created_by: Some(author.to_string()),
                ..Default::default()
            })
            .collect();
        let facets = build_facets(&records);
        assert_eq!(facets.values(FilterField::CreatedBy), ["Émile", "eve", "zoe"]);
        assert_eq!(collation_key("Émile"), "emile");
        assert_eq!(compare_case_insensitive("émile", "Emile"), Ordering::Greater);
    }

    #[test]
    fn restricted_field_list() {
        let records = vec![record("1", Some("x"), Some("y"))];
        let facets = build_facets_for(&records, &[FilterField::Compset, FilterField::Search]);
        assert_eq!(facets.fields().collect::<Vec<_>>(), vec![FilterField::Compset]);
        assert!(facets.values(FilterField::CampaignId).is_empty());
    }

    #[test]
    fn machine_options_fall_back_to_unknown() {
        let mut joined = record("1", None, None);
        joined.machine = Some(Machine {
            id: "m1".to_string(),
            name: "chrysalis".to_string(),
            ..Default::default()
        });
        let mut legacy = record("2", None, None);
        legacy.machine_id = Some("m2".to_string());
        let mut again = record("3", None, None);
        again.machine_id = Some("m1".to_string());
        let mut accented = record("4", None, None);
        accented.machine = Some(Machine {
            id: "m3".to_string(),
            name: "Édison".to_string(),
            ..Default::default()
        });

        let options = machine_options(&[legacy, joined, again, accented]);
        assert_eq!(
            options,
            vec![
                FacetOption {
                    value: "m1".to_string(),
                    label: "chrysalis".to_string(),
                },
                FacetOption {
                    value: "m3".to_string(),
                    label: "Édison".to_string(),
                },
                FacetOption {
                    value: "m2".to_string(),
                    label: UNKNOWN_MACHINE.to_string(),
                },
            ]
        );
    }
}
