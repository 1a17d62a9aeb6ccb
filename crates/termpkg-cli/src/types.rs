use std::path::PathBuf;

use termpkg_model::{AddressingStrategy, PlacedResource, ResourceKind};
use termpkg_output::WriteReport;

/// Resource counts for one resource type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTally {
    pub kind: ResourceKind,
    pub resources: usize,
    /// Concepts for catalogs and subsets, mapped elements for mapping tables.
    pub entries: usize,
    /// Resources with no entries at all.
    pub empty: usize,
}

impl ResourceTally {
    /// Tally `resources` per type, in CodeSystem, ValueSet, ConceptMap order.
    pub fn collect(resources: &[PlacedResource]) -> Vec<Self> {
        [
            ResourceKind::CodeSystem,
            ResourceKind::ValueSet,
            ResourceKind::ConceptMap,
        ]
        .into_iter()
        .map(|kind| {
            let mut tally = Self {
                kind,
                resources: 0,
                entries: 0,
                empty: 0,
            };
            for placed in resources.iter().filter(|p| p.resource.kind() == kind) {
                let entries = placed.resource.entry_count();
                tally.resources += 1;
                tally.entries += entries;
                if entries == 0 {
                    tally.empty += 1;
                }
            }
            tally
        })
        .collect()
    }
}

/// Outcome of one conversion run.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    pub input: PathBuf,
    /// Local coding system URI used for the run.
    pub local_uri: String,
    pub addressing: AddressingStrategy,
    pub tallies: Vec<ResourceTally>,
    /// Destination chosen for the archive.
    pub output: PathBuf,
    /// Absent on a dry run.
    pub archive: Option<WriteReport>,
    pub loader_url: String,
}

impl ConvertResult {
    pub fn resource_count(&self) -> usize {
        self.tallies.iter().map(|t| t.resources).sum()
    }
}
