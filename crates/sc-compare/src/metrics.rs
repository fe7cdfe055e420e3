//! Comparison sections and the metric rows each one shows.

use std::fmt;

use serde::Serialize;

use sc_catalog::RecordField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Configuration,
    ModelSetup,
    Timeline,
    KeyFeatures,
    KnownIssues,
    Locations,
    Diagnostics,
    Performance,
    Notes,
    VersionControl,
}

/// How a metric reads its value from a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricSource {
    /// Scalar field as stored.
    Field(RecordField),
    /// Timestamp field rendered as `YYYY-MM-DD HH:MM:SS`.
    Date(RecordField),
    /// Span from simulation start to simulation end.
    Duration,
    /// Joined machine's display name.
    MachineName,
    /// Artifacts (or links) of one kind.
    Grouped(&'static str),
}

impl MetricSource {
    pub fn is_grouped(self) -> bool {
        matches!(self, MetricSource::Grouped(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDef {
    pub label: &'static str,
    pub source: MetricSource,
}

const fn field(label: &'static str, field: RecordField) -> MetricDef {
    MetricDef {
        label,
        source: MetricSource::Field(field),
    }
}

const fn date(label: &'static str, field: RecordField) -> MetricDef {
    MetricDef {
        label,
        source: MetricSource::Date(field),
    }
}

const fn grouped(label: &'static str, kind: &'static str) -> MetricDef {
    MetricDef {
        label,
        source: MetricSource::Grouped(kind),
    }
}

const SECTION_COUNT: usize = 10;

const CONFIGURATION: &[MetricDef] = &[
    field("Simulation Name", RecordField::Name),
    field("Case Name", RecordField::CaseName),
    field("Model Version", RecordField::GitTag),
    field("Compset", RecordField::Compset),
    field("Grid Name", RecordField::GridName),
    field("Grid Resolution", RecordField::GridResolution),
    field("Initialization Type", RecordField::InitializationType),
    field("Compiler", RecordField::Compiler),
    field("Parent Simulation ID", RecordField::ParentSimulationId),
];

const MODEL_SETUP: &[MetricDef] = &[
    field("Simulation Type", RecordField::SimulationType),
    field("Status", RecordField::Status),
    field("Campaign ID", RecordField::CampaignId),
    field("Experiment Type ID", RecordField::ExperimentTypeId),
    MetricDef {
        label: "Machine Name",
        source: MetricSource::MachineName,
    },
    field("Branch", RecordField::GitBranch),
];

const TIMELINE: &[MetricDef] = &[
    date("Model Start", RecordField::SimulationStartDate),
    date("Model End", RecordField::SimulationEndDate),
    MetricDef {
        label: "Duration",
        source: MetricSource::Duration,
    },
    date("Calendar Start", RecordField::RunStartDate),
    date("Calendar End Date", RecordField::RunEndDate),
];

const KEY_FEATURES: &[MetricDef] = &[field("Key Features", RecordField::KeyFeatures)];

const KNOWN_ISSUES: &[MetricDef] = &[field("Known Issues", RecordField::KnownIssues)];

const LOCATIONS: &[MetricDef] = &[
    grouped("Output Paths", "output"),
    grouped("Archive Paths", "archive"),
    grouped("Run Script Paths", "run_script"),
    grouped("Batch Logs", "batch_log"),
];

const DIAGNOSTICS: &[MetricDef] = &[grouped("Diagnostic Links", "diagnostic")];

const PERFORMANCE: &[MetricDef] = &[grouped("PACE Links", "performance")];

const NOTES: &[MetricDef] = &[field("Notes", RecordField::NotesMarkdown)];

const VERSION_CONTROL: &[MetricDef] = &[
    field("Repository URL", RecordField::GitRepoUrl),
    field("Branch", RecordField::GitBranch),
    field("Version/Tag", RecordField::GitTag),
    field("Commit Hash", RecordField::GitCommitHash),
];

impl Section {
    /// Display order.
    pub const ALL: [Section; SECTION_COUNT] = [
        Section::Configuration,
        Section::ModelSetup,
        Section::Timeline,
        Section::KeyFeatures,
        Section::KnownIssues,
        Section::Locations,
        Section::Diagnostics,
        Section::Performance,
        Section::Notes,
        Section::VersionControl,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Section::Configuration => "configuration",
            Section::ModelSetup => "modelSetup",
            Section::Timeline => "timeline",
            Section::KeyFeatures => "keyFeatures",
            Section::KnownIssues => "knownIssues",
            Section::Locations => "locations",
            Section::Diagnostics => "diagnostics",
            Section::Performance => "performance",
            Section::Notes => "notes",
            Section::VersionControl => "versionControl",
        }
    }

    pub fn from_key(key: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.key() == key)
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Configuration => "Configuration",
            Section::ModelSetup => "Model Setup",
            Section::Timeline => "Timeline",
            Section::KeyFeatures => "Key Features",
            Section::KnownIssues => "Known Issues",
            Section::Locations => "Locations",
            Section::Diagnostics => "Diagnostics",
            Section::Performance => "Performance",
            Section::Notes => "Notes",
            Section::VersionControl => "Version Control",
        }
    }

    /// Whether the section starts expanded.
    pub fn default_expanded(self) -> bool {
        matches!(
            self,
            Section::Configuration | Section::ModelSetup | Section::Timeline
        )
    }

    pub fn metrics(self) -> &'static [MetricDef] {
        match self {
            Section::Configuration => CONFIGURATION,
            Section::ModelSetup => MODEL_SETUP,
            Section::Timeline => TIMELINE,
            Section::KeyFeatures => KEY_FEATURES,
            Section::KnownIssues => KNOWN_ISSUES,
            Section::Locations => LOCATIONS,
            Section::Diagnostics => DIAGNOSTICS,
            Section::Performance => PERFORMANCE,
            Section::Notes => NOTES,
            Section::VersionControl => VERSION_CONTROL,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Per-section expand/collapse flags, seeded from the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedSections {
    expanded: [bool; SECTION_COUNT],
}

impl Default for ExpandedSections {
    fn default() -> Self {
        Self {
            expanded: Section::ALL.map(Section::default_expanded),
        }
    }
}

impl ExpandedSections {
    fn index(section: Section) -> usize {
        section as usize
    }

    pub fn is_expanded(&self, section: Section) -> bool {
        self.expanded[Self::index(section)]
    }

    /// Flip one section; returns the new state.
    pub fn toggle(&mut self, section: Section) -> bool {
        let slot = &mut self.expanded[Self::index(section)];
        *slot = !*slot;
        *slot
    }

    pub fn set_all(&mut self, expanded: bool) {
        self.expanded = [expanded; SECTION_COUNT];
    }
}
