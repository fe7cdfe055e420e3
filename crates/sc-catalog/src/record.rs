//! Simulation record and machine definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::fields::RecordField;
use crate::links::LinkRef;

/// A simulation as delivered by the catalog API.
///
/// Every field except `id` may be missing or `null` on the wire. Legacy
/// field names are accepted as aliases so older exports still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationRecord {
    pub id: String,

    // Configuration
    pub name: Option<String>,
    pub case_name: Option<String>,
    pub description: Option<String>,
    pub compset: Option<String>,
    pub compset_alias: Option<String>,
    pub grid_name: Option<String>,
    pub grid_resolution: Option<String>,
    pub parent_simulation_id: Option<String>,

    // Model setup
    pub simulation_type: Option<String>,
    pub status: Option<String>,
    pub campaign_id: Option<String>,
    pub experiment_type_id: Option<String>,
    pub initialization_type: Option<String>,
    pub group_name: Option<String>,

    // Timeline
    pub machine_id: Option<String>,
    pub simulation_start_date: Option<String>,
    pub simulation_end_date: Option<String>,
    pub run_start_date: Option<String>,
    pub run_end_date: Option<String>,
    pub compiler: Option<String>,

    // Notes
    pub key_features: Option<String>,
    pub known_issues: Option<String>,
    pub notes_markdown: Option<String>,

    // Version control
    #[serde(alias = "repoUrl")]
    pub git_repo_url: Option<String>,
    #[serde(alias = "branch")]
    pub git_branch: Option<String>,
    #[serde(alias = "versionTag")]
    pub git_tag: Option<String>,
    #[serde(alias = "commitHash")]
    pub git_commit_hash: Option<String>,

    // Provenance
    pub created_by: Option<String>,
    pub last_updated_by: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty", deserialize_with = "null_as_default")]
    pub extra: BTreeMap<String, serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine: Option<Machine>,
    #[serde(deserialize_with = "null_as_default")]
    pub artifacts: Vec<Artifact>,
    #[serde(deserialize_with = "null_as_default")]
    pub links: Vec<ExternalLink>,
}

/// HPC machine a simulation ran on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Machine {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduler: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpu: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// File or directory produced by a simulation (outputs, archives, scripts).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Artifact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub kind: String,
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Link to an external diagnostic, performance or documentation page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ExternalLink {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(alias = "linkType")]
    pub kind: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Kind tags arrive both as `run_script` and `runScript`; compare them with
/// underscores removed and case folded.
pub fn same_kind(a: &str, b: &str) -> bool {
    let fold = |s: &str| {
        s.chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect::<String>()
    };
    fold(a) == fold(b)
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

impl SimulationRecord {
    /// Normalized scalar access. Empty strings read as absent.
    pub fn field(&self, field: RecordField) -> Option<&str> {
        match field {
            RecordField::Id => Some(self.id.as_str()).filter(|s| !s.is_empty()),
            RecordField::Name => non_empty(self.name.as_ref()),
            RecordField::CaseName => non_empty(self.case_name.as_ref()),
            RecordField::Description => non_empty(self.description.as_ref()),
            RecordField::Compset => non_empty(self.compset.as_ref()),
            RecordField::CompsetAlias => non_empty(self.compset_alias.as_ref()),
            RecordField::GridName => non_empty(self.grid_name.as_ref()),
            RecordField::GridResolution => non_empty(self.grid_resolution.as_ref()),
            RecordField::ParentSimulationId => non_empty(self.parent_simulation_id.as_ref()),
            RecordField::SimulationType => non_empty(self.simulation_type.as_ref()),
            RecordField::Status => non_empty(self.status.as_ref()),
            RecordField::CampaignId => non_empty(self.campaign_id.as_ref()),
            RecordField::ExperimentTypeId => non_empty(self.experiment_type_id.as_ref()),
            RecordField::InitializationType => non_empty(self.initialization_type.as_ref()),
            RecordField::GroupName => non_empty(self.group_name.as_ref()),
            RecordField::MachineId => self.machine_id(),
            RecordField::MachineName => self.machine_name(),
            RecordField::SimulationStartDate => non_empty(self.simulation_start_date.as_ref()),
            RecordField::SimulationEndDate => non_empty(self.simulation_end_date.as_ref()),
            RecordField::RunStartDate => non_empty(self.run_start_date.as_ref()),
            RecordField::RunEndDate => non_empty(self.run_end_date.as_ref()),
            RecordField::Compiler => non_empty(self.compiler.as_ref()),
            RecordField::KeyFeatures => non_empty(self.key_features.as_ref()),
            RecordField::KnownIssues => non_empty(self.known_issues.as_ref()),
            RecordField::NotesMarkdown => non_empty(self.notes_markdown.as_ref()),
            RecordField::GitRepoUrl => non_empty(self.git_repo_url.as_ref()),
            RecordField::GitBranch => non_empty(self.git_branch.as_ref()),
            RecordField::GitTag => non_empty(self.git_tag.as_ref()),
            RecordField::GitCommitHash => non_empty(self.git_commit_hash.as_ref()),
            RecordField::CreatedBy => non_empty(self.created_by.as_ref()),
            RecordField::LastUpdatedBy => non_empty(self.last_updated_by.as_ref()),
            RecordField::CreatedAt => non_empty(self.created_at.as_ref()),
            RecordField::UpdatedAt => non_empty(self.updated_at.as_ref()),
        }
    }

    /// Multi-valued view of a field: zero or one element for scalar fields.
    pub fn values(&self, field: RecordField) -> Vec<&str> {
        self.field(field).into_iter().collect()
    }

    /// Machine id, preferring the joined machine over the flat legacy id.
    pub fn machine_id(&self) -> Option<&str> {
        self.machine
            .as_ref()
            .map(|m| m.id.as_str())
            .filter(|id| !id.is_empty())
            .or_else(|| non_empty(self.machine_id.as_ref()))
    }

    pub fn machine_name(&self) -> Option<&str> {
        self.machine
            .as_ref()
            .map(|m| m.name.as_str())
            .filter(|name| !name.is_empty())
    }

    pub fn artifacts_of_kind<'a>(&'a self, kind: &str) -> impl Iterator<Item = &'a Artifact> {
        self.artifacts.iter().filter(move |a| same_kind(&a.kind, kind))
    }

    pub fn links_of_kind<'a>(&'a self, kind: &str) -> impl Iterator<Item = &'a ExternalLink> {
        self.links.iter().filter(move |l| same_kind(&l.kind, kind))
    }

    /// Artifact URIs of the given kind, skipping blank entries.
    pub fn paths(&self, kind: &str) -> Vec<&str> {
        self.artifacts_of_kind(kind)
            .map(|a| a.uri.as_str())
            .filter(|uri| !uri.is_empty())
            .collect()
    }

    /// Artifacts grouped by kind, in kind order.
    pub fn grouped_artifacts(&self) -> BTreeMap<&str, Vec<&Artifact>> {
        let mut grouped: BTreeMap<&str, Vec<&Artifact>> = BTreeMap::new();
        for artifact in &self.artifacts {
            grouped.entry(artifact.kind.as_str()).or_default().push(artifact);
        }
        grouped
    }

    /// Collection slice for a kind: artifacts of that kind, or links of that
    /// kind when no artifact matches.
    pub fn grouped(&self, kind: &str) -> Vec<LinkRef> {
        let artifacts: Vec<LinkRef> = self
            .artifacts_of_kind(kind)
            .filter_map(|a| LinkRef::new(&a.uri, a.label.as_deref()))
            .collect();
        if !artifacts.is_empty() {
            return artifacts;
        }
        self.links_of_kind(kind)
            .filter_map(|l| LinkRef::new(&l.url, l.label.as_deref()))
            .collect()
    }

    /// Header label: record name, or the id when unnamed.
    pub fn display_name(&self) -> &str {
        self.field(RecordField::Name).unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_machine_id_is_used_without_joined_machine() {
        let record = SimulationRecord {
            id: "a".to_string(),
            machine_id: Some("m-1".to_string()),
            ..Default::default()
        };
        assert_eq!(record.field(RecordField::MachineId), Some("m-1"));
        assert_eq!(record.field(RecordField::MachineName), None);
    }

    #[test]
    fn joined_machine_takes_precedence() {
        let record = SimulationRecord {
            id: "a".to_string(),
            machine_id: Some("legacy".to_string()),
            machine: Some(Machine {
                id: "m-2".to_string(),
                name: "perlmutter".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(record.machine_id(), Some("m-2"));
        assert_eq!(record.machine_name(), Some("perlmutter"));
    }

    #[test]
    fn empty_strings_read_as_absent() {
        let record = SimulationRecord {
            id: "a".to_string(),
            compset: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(record.field(RecordField::Compset), None);
        assert!(record.values(RecordField::Compset).is_empty());
    }

    #[test]
    fn grouped_falls_back_to_links() {
        let record = SimulationRecord {
            id: "a".to_string(),
            artifacts: vec![Artifact {
                kind: "output".to_string(),
                uri: "/scratch/run/out".to_string(),
                ..Default::default()
            }],
            links: vec![ExternalLink {
                kind: "diagnostic".to_string(),
                url: "https://diag.example.org/a".to_string(),
                label: Some("E3SM diags".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };

        let outputs = record.grouped("output");
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].url, "/scratch/run/out");

        let diags = record.grouped("diagnostic");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].label, "E3SM diags");

        assert!(record.grouped("performance").is_empty());
    }

    #[test]
    fn deserializes_nulls_and_legacy_names() {
        let json = r#"{
            "id": "s1",
            "name": null,
            "versionTag": "v3.0.0",
            "branch": "main",
            "artifacts": null,
            "links": [{"linkType": "performance", "url": "https://pace.example.org/1"}]
        }"#;
        let record: SimulationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.git_tag.as_deref(), Some("v3.0.0"));
        assert_eq!(record.git_branch.as_deref(), Some("main"));
        assert!(record.artifacts.is_empty());
        assert_eq!(record.links[0].kind, "performance");
        assert_eq!(record.display_name(), "s1");
    }

    #[test]
    fn grouped_artifacts_by_kind() {
        let record = SimulationRecord {
            id: "a".to_string(),
            artifacts: vec![
                Artifact {
                    kind: "output".to_string(),
                    uri: "/o1".to_string(),
                    ..Default::default()
                },
                Artifact {
                    kind: "archive".to_string(),
                    uri: "/a1".to_string(),
                    ..Default::default()
                },
                Artifact {
                    kind: "output".to_string(),
                    uri: "/o2".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let grouped = record.grouped_artifacts();
        assert_eq!(grouped.keys().copied().collect::<Vec<_>>(), vec!["archive", "output"]);
        assert_eq!(grouped["output"].len(), 2);
        assert_eq!(record.paths("output"), vec!["/o1", "/o2"]);
    }

    #[test]
    fn kind_tags_match_across_casing_styles() {
        assert!(same_kind("run_script", "runScript"));
        assert!(same_kind("batchLog", "batch_log"));
        assert!(!same_kind("output", "archive"));

        let record = SimulationRecord {
            id: "a".to_string(),
            artifacts: vec![Artifact {
                kind: "runScript".to_string(),
                uri: "/home/user/run.sh".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(record.paths("run_script"), vec!["/home/user/run.sh"]);
    }
}
