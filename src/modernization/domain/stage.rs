use serde::Serialize;
use std::fmt;

/// States a plugin moves through during one run.
///
/// The main chain is linear; `MetadataCollected` is the end state of a
/// metadata-only run and `ForkDeleted` the optional cleanup after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineStage {
    Created,
    ForkEnsured,
    Synced,
    Fetched,
    BranchCheckedOut,
    Transformed,
    Verified,
    Committed,
    Pushed,
    PullRequestOpened,
    MetadataCollected,
    ForkDeleted,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Created => "created",
            PipelineStage::ForkEnsured => "fork-ensured",
            PipelineStage::Synced => "synced",
            PipelineStage::Fetched => "fetched",
            PipelineStage::BranchCheckedOut => "branch-checked-out",
            PipelineStage::Transformed => "transformed",
            PipelineStage::Verified => "verified",
            PipelineStage::Committed => "committed",
            PipelineStage::Pushed => "pushed",
            PipelineStage::PullRequestOpened => "pull-request-opened",
            PipelineStage::MetadataCollected => "metadata-collected",
            PipelineStage::ForkDeleted => "fork-deleted",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
