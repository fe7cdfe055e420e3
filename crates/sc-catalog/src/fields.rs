//! Canonical field registry.
//!
//! `RecordField` names every readable scalar on a [`SimulationRecord`]
//! (including the machine relation). `FilterField` is the closed set of keys a
//! filter state or query string may carry.
//!
//! [`SimulationRecord`]: crate::SimulationRecord

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordField {
    Id,
    Name,
    CaseName,
    Description,
    Compset,
    CompsetAlias,
    GridName,
    GridResolution,
    ParentSimulationId,
    SimulationType,
    Status,
    CampaignId,
    ExperimentTypeId,
    InitializationType,
    GroupName,
    MachineId,
    MachineName,
    SimulationStartDate,
    SimulationEndDate,
    RunStartDate,
    RunEndDate,
    Compiler,
    KeyFeatures,
    KnownIssues,
    NotesMarkdown,
    GitRepoUrl,
    GitBranch,
    GitTag,
    GitCommitHash,
    CreatedBy,
    LastUpdatedBy,
    CreatedAt,
    UpdatedAt,
}

/// How a filter field's value is shaped and matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Ordered set of values, OR-matched against the record.
    MultiSelect,
    /// Free text, substring-matched.
    Text,
    /// Calendar date bound.
    Date,
}

/// Side-panel grouping for multi-select fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetGroup {
    ScientificGoal,
    SimulationContext,
    ExecutionDetails,
    MetadataProvenance,
}

impl FacetGroup {
    pub const ALL: [FacetGroup; 4] = [
        FacetGroup::ScientificGoal,
        FacetGroup::SimulationContext,
        FacetGroup::ExecutionDetails,
        FacetGroup::MetadataProvenance,
    ];

    pub fn title(self) -> &'static str {
        match self {
            FacetGroup::ScientificGoal => "Scientific Goal",
            FacetGroup::SimulationContext => "Simulation Context",
            FacetGroup::ExecutionDetails => "Execution Details",
            FacetGroup::MetadataProvenance => "Metadata & Provenance",
        }
    }

    pub fn fields(self) -> impl Iterator<Item = FilterField> {
        FilterField::MULTI_SELECT
            .into_iter()
            .filter(move |f| f.group() == Some(self))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterField {
    CampaignId,
    ExperimentTypeId,
    SimulationType,
    InitializationType,
    Compset,
    GridName,
    GridResolution,
    MachineId,
    Compiler,
    Status,
    GitTag,
    CreatedBy,
    Search,
    StartAfter,
    StartBefore,
}

impl FilterField {
    /// Registry order. Encoding and chip listing follow this order.
    pub const ALL: [FilterField; 15] = [
        FilterField::CampaignId,
        FilterField::ExperimentTypeId,
        FilterField::SimulationType,
        FilterField::InitializationType,
        FilterField::Compset,
        FilterField::GridName,
        FilterField::GridResolution,
        FilterField::MachineId,
        FilterField::Compiler,
        FilterField::Status,
        FilterField::GitTag,
        FilterField::CreatedBy,
        FilterField::Search,
        FilterField::StartAfter,
        FilterField::StartBefore,
    ];

    pub const MULTI_SELECT: [FilterField; 12] = [
        FilterField::CampaignId,
        FilterField::ExperimentTypeId,
        FilterField::SimulationType,
        FilterField::InitializationType,
        FilterField::Compset,
        FilterField::GridName,
        FilterField::GridResolution,
        FilterField::MachineId,
        FilterField::Compiler,
        FilterField::Status,
        FilterField::GitTag,
        FilterField::CreatedBy,
    ];

    /// Query-string key.
    pub fn key(self) -> &'static str {
        match self {
            FilterField::CampaignId => "campaignId",
            FilterField::ExperimentTypeId => "experimentTypeId",
            FilterField::SimulationType => "simulationType",
            FilterField::InitializationType => "initializationType",
            FilterField::Compset => "compset",
            FilterField::GridName => "gridName",
            FilterField::GridResolution => "gridResolution",
            FilterField::MachineId => "machineId",
            FilterField::Compiler => "compiler",
            FilterField::Status => "status",
            FilterField::GitTag => "gitTag",
            FilterField::CreatedBy => "createdBy",
            FilterField::Search => "search",
            FilterField::StartAfter => "startAfter",
            FilterField::StartBefore => "startBefore",
        }
    }

    pub fn from_key(key: &str) -> Option<FilterField> {
        FilterField::ALL.into_iter().find(|f| f.key() == key)
    }

    pub fn kind(self) -> FieldKind {
        match self {
            FilterField::Search => FieldKind::Text,
            FilterField::StartAfter | FilterField::StartBefore => FieldKind::Date,
            _ => FieldKind::MultiSelect,
        }
    }

    pub fn is_multi_select(self) -> bool {
        self.kind() == FieldKind::MultiSelect
    }

    /// Record field read by a multi-select filter. `None` for scalar filters,
    /// which match through their own rules.
    pub fn record_field(self) -> Option<RecordField> {
        let field = match self {
            FilterField::CampaignId => RecordField::CampaignId,
            FilterField::ExperimentTypeId => RecordField::ExperimentTypeId,
            FilterField::SimulationType => RecordField::SimulationType,
            FilterField::InitializationType => RecordField::InitializationType,
            FilterField::Compset => RecordField::Compset,
            FilterField::GridName => RecordField::GridName,
            FilterField::GridResolution => RecordField::GridResolution,
            FilterField::MachineId => RecordField::MachineId,
            FilterField::Compiler => RecordField::Compiler,
            FilterField::Status => RecordField::Status,
            FilterField::GitTag => RecordField::GitTag,
            FilterField::CreatedBy => RecordField::CreatedBy,
            FilterField::Search | FilterField::StartAfter | FilterField::StartBefore => {
                return None;
            }
        };
        Some(field)
    }

    pub fn group(self) -> Option<FacetGroup> {
        match self {
            FilterField::CampaignId
            | FilterField::ExperimentTypeId
            | FilterField::SimulationType
            | FilterField::InitializationType => Some(FacetGroup::ScientificGoal),
            FilterField::Compset | FilterField::GridName | FilterField::GridResolution => {
                Some(FacetGroup::SimulationContext)
            }
            FilterField::MachineId | FilterField::Compiler | FilterField::Status => {
                Some(FacetGroup::ExecutionDetails)
            }
            FilterField::GitTag | FilterField::CreatedBy => Some(FacetGroup::MetadataProvenance),
            FilterField::Search | FilterField::StartAfter | FilterField::StartBefore => None,
        }
    }

    /// Short chip label, e.g. `campaign` for `campaignId`.
    pub fn chip_label(self) -> &'static str {
        let key = self.key();
        key.strip_suffix("Id").unwrap_or(key)
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for field in FilterField::ALL {
            assert_eq!(FilterField::from_key(field.key()), Some(field));
        }
        assert_eq!(FilterField::from_key("unknownKey"), None);
    }

    #[test]
    fn every_multi_select_field_reads_a_record_field_and_has_a_group() {
        for field in FilterField::MULTI_SELECT {
            assert!(field.is_multi_select());
            assert!(field.record_field().is_some());
            assert!(field.group().is_some());
        }
        let grouped: usize = FacetGroup::ALL.iter().map(|g| g.fields().count()).sum();
        assert_eq!(grouped, FilterField::MULTI_SELECT.len());
    }

    #[test]
    fn chip_labels_drop_id_suffix() {
        assert_eq!(FilterField::CampaignId.chip_label(), "campaign");
        assert_eq!(FilterField::Compset.chip_label(), "compset");
    }
}
