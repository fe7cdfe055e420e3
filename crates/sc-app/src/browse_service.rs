//! Browse page state: filters, the address bar, and the facet panel.

use sc_catalog::{Catalog, FacetGroup, FilterField, SimulationRecord};
use sc_filter::{
    FacetOption, FacetOptions, FilterChip, FilterState, Navigation, UrlSync, build_facets,
    filter_records, machine_options,
};

/// One field of the facet side panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetPanelField {
    pub field: FilterField,
    pub options: Vec<FacetOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetPanelGroup {
    pub group: FacetGroup,
    pub fields: Vec<FacetPanelField>,
}

/// Filter state kept in step with the query string. Every editing method
/// returns the replace navigation to apply, if the encoding changed.
#[derive(Debug, Clone, Default)]
pub struct BrowseSession {
    filters: FilterState,
    sync: UrlSync,
    facets: FacetOptions,
    machines: Vec<FacetOption>,
}

impl BrowseSession {
    pub fn new(catalog: &Catalog) -> Self {
        let mut session = Self::default();
        session.reload(catalog);
        session
    }

    /// Recompute facet options after the record set changed. The filter
    /// state is kept.
    pub fn reload(&mut self, catalog: &Catalog) {
        self.facets = build_facets(catalog.records());
        self.machines = machine_options(catalog.records());
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn facets(&self) -> &FacetOptions {
        &self.facets
    }

    /// Apply an address-bar change. Returns a replace navigation when the
    /// canonical query differs from what arrived.
    pub fn apply_location(&mut self, query: &str) -> Option<Navigation> {
        let step = self.sync.on_location(&self.filters, query);
        self.filters = step.state;
        step.navigation
    }

    fn edited(&mut self) -> Option<Navigation> {
        self.sync.on_state(&self.filters)
    }

    pub fn toggle(&mut self, field: FilterField, value: &str) -> Option<Navigation> {
        self.filters.toggle(field, value);
        self.edited()
    }

    pub fn set_values<I, S>(&mut self, field: FilterField, values: I) -> Option<Navigation>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.set_values(field, values);
        self.edited()
    }

    pub fn set_text(&mut self, field: FilterField, text: &str) -> Option<Navigation> {
        self.filters.set_text(field, text);
        self.edited()
    }

    pub fn remove_chip(&mut self, chip: &FilterChip) -> Option<Navigation> {
        self.filters.remove_value(chip.field, &chip.value);
        self.edited()
    }

    pub fn clear_field(&mut self, field: FilterField) -> Option<Navigation> {
        self.filters.clear_field(field);
        self.edited()
    }

    pub fn clear(&mut self) -> Option<Navigation> {
        self.filters.clear();
        self.edited()
    }

    pub fn has_active_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    pub fn chips(&self) -> Vec<FilterChip> {
        self.filters.chips()
    }

    pub fn filtered<'a>(&self, catalog: &'a Catalog) -> Vec<&'a SimulationRecord> {
        filter_records(catalog.records(), &self.filters)
    }

    /// Facet panel in group order. Machine options carry display names;
    /// every other field uses the raw value as its label.
    pub fn panel(&self) -> Vec<FacetPanelGroup> {
        FacetGroup::ALL
            .into_iter()
            .map(|group| FacetPanelGroup {
                group,
                fields: group
                    .fields()
                    .map(|field| FacetPanelField {
                        field,
                        options: self.options(field),
                    })
                    .collect(),
            })
            .collect()
    }

    fn options(&self, field: FilterField) -> Vec<FacetOption> {
        if field == FilterField::MachineId {
            return self.machines.clone();
        }
        self.facets
            .values(field)
            .iter()
            .map(|value| FacetOption {
                value: value.clone(),
                label: value.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_catalog::Machine;

    fn catalog() -> Catalog {
        let record = |id: &str, campaign: &str, machine: &str| SimulationRecord {
            id: id.to_string(),
            campaign_id: Some(campaign.to_string()),
            machine_id: Some(machine.to_string()),
            ..Default::default()
        };
        Catalog::new(
            vec![record("a", "X", "m1"), record("b", "Y", "m2")],
            vec![Machine {
                id: "m1".to_string(),
                name: "chrysalis".to_string(),
                ..Default::default()
            }],
        )
    }

    #[test]
    fn edits_navigate_once() {
        let catalog = catalog();
        let mut session = BrowseSession::new(&catalog);
        assert!(session.apply_location("").is_none());

        let nav = session.toggle(FilterField::CampaignId, "X").unwrap();
        assert_eq!(nav.query, "campaignId=X");
        assert!(session.apply_location("campaignId=X").is_none());
        assert_eq!(session.filtered(&catalog).len(), 1);

        let chip = session.chips().remove(0);
        assert_eq!(session.remove_chip(&chip).unwrap().query, "");
        assert!(!session.has_active_filters());
        assert!(session.clear().is_none());
    }

    #[test]
    fn panel_labels_machines() {
        let session = BrowseSession::new(&catalog());
        let panel = session.panel();
        assert_eq!(panel.len(), FacetGroup::ALL.len());

        let execution = panel
            .iter()
            .find(|g| g.group == FacetGroup::ExecutionDetails)
            .unwrap();
        let machine = execution
            .fields
            .iter()
            .find(|f| f.field == FilterField::MachineId)
            .unwrap();
        let labels: Vec<&str> = machine.options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["chrysalis", sc_filter::UNKNOWN_MACHINE]);
    }
}
