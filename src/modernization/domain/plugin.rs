use super::jdk::Jdk;
use super::metadata::PluginMetadata;
use super::stage::PipelineStage;
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Maximum length for plugin names (security limit)
const MAX_PLUGIN_NAME_LENGTH: usize = 255;

/// NewType wrapper for plugin name with validation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PluginName(String);

impl PluginName {
    pub fn new(name: String) -> Result<Self> {
        let name = name.trim().to_string();
        if name.is_empty() {
            anyhow::bail!("Plugin name cannot be empty");
        }

        if name.len() > MAX_PLUGIN_NAME_LENGTH {
            anyhow::bail!(
                "Plugin name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_PLUGIN_NAME_LENGTH
            );
        }

        // Plugin names end up in URLs, cache paths and branch names
        if name.starts_with('.')
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            anyhow::bail!(
                "Plugin name '{}' contains invalid characters. Only ASCII alphanumeric, hyphens, underscores and dots are allowed.",
                name
            );
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PluginName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An error recorded against a plugin, with the stage that raised it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginError {
    pub stage: PipelineStage,
    pub message: String,
    /// Underlying causes, outermost first
    pub causes: Vec<String>,
}

impl PluginError {
    pub fn new(stage: PipelineStage, error: &anyhow::Error) -> Self {
        Self {
            stage,
            message: error.to_string(),
            causes: error.chain().skip(1).map(|cause| cause.to_string()).collect(),
        }
    }
}

/// Line and file counts of the changes a transformation produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub additions: u64,
    pub deletions: u64,
    pub changed_files: Vec<String>,
}

impl DiffStats {
    pub fn changed_file_count(&self) -> usize {
        self.changed_files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changed_files.is_empty()
    }
}

/// Plugin aggregate - one unit of work in a modernization run
///
/// Created from a name when the batch is built, then mutated by whichever
/// pipeline stage runs. Never shared between plugins.
#[derive(Debug, Clone)]
pub struct Plugin {
    name: PluginName,
    local_path: Option<PathBuf>,
    checkout_path: Option<PathBuf>,
    repository_name: Option<String>,
    jdk: Option<&'static Jdk>,
    metadata: Option<PluginMetadata>,
    stage: PipelineStage,
    has_commits: bool,
    has_changes_pushed: bool,
    has_pull_request: bool,
    pull_request_url: Option<String>,
    baseline_before: Option<String>,
    baseline_after: Option<String>,
    bom_target: Option<String>,
    diff_stats: Option<DiffStats>,
    tags: BTreeSet<String>,
    skip_reason: Option<String>,
    errors: Vec<PluginError>,
}

impl Plugin {
    /// A plugin resolved against the remote catalog
    pub fn new(name: String) -> Result<Self> {
        Ok(Self::with_name(PluginName::new(name)?, None))
    }

    /// A plugin checked out on disk; catalog-only facts do not apply to it
    pub fn local(name: String, path: PathBuf) -> Result<Self> {
        Ok(Self::with_name(PluginName::new(name)?, Some(path)))
    }

    fn with_name(name: PluginName, local_path: Option<PathBuf>) -> Self {
        Self {
            name,
            local_path,
            checkout_path: None,
            repository_name: None,
            jdk: None,
            metadata: None,
            stage: PipelineStage::Created,
            has_commits: false,
            has_changes_pushed: false,
            has_pull_request: false,
            pull_request_url: None,
            baseline_before: None,
            baseline_after: None,
            bom_target: None,
            diff_stats: None,
            tags: BTreeSet::new(),
            skip_reason: None,
            errors: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn is_local(&self) -> bool {
        self.local_path.is_some()
    }

    pub fn local_path(&self) -> Option<&Path> {
        self.local_path.as_deref()
    }

    pub fn set_checkout_path(&mut self, path: PathBuf) {
        self.checkout_path = Some(path);
    }

    /// Directory the build runs in: the fetched working copy, else the
    /// local checkout
    pub fn working_dir(&self) -> Option<&Path> {
        self.checkout_path.as_deref().or(self.local_path.as_deref())
    }

    pub fn repository_name(&self) -> Option<&str> {
        self.repository_name.as_deref()
    }

    pub fn set_repository_name(&mut self, repository_name: String) {
        self.repository_name = Some(repository_name);
    }

    pub fn jdk(&self) -> Option<&'static Jdk> {
        self.jdk
    }

    pub fn set_jdk(&mut self, jdk: &'static Jdk) {
        self.jdk = Some(jdk);
    }

    pub fn metadata(&self) -> Option<&PluginMetadata> {
        self.metadata.as_ref()
    }

    pub fn set_metadata(&mut self, metadata: PluginMetadata) {
        self.metadata = Some(metadata);
    }

    /// Core baseline from the collected metadata
    pub fn core_baseline(&self) -> Option<&str> {
        self.metadata.as_ref()?.core_baseline.as_deref()
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    pub fn advance(&mut self, stage: PipelineStage) {
        self.stage = stage;
    }

    pub fn has_commits(&self) -> bool {
        self.has_commits
    }

    pub fn set_has_commits(&mut self, value: bool) {
        self.has_commits = value;
    }

    pub fn has_changes_pushed(&self) -> bool {
        self.has_changes_pushed
    }

    pub fn set_has_changes_pushed(&mut self, value: bool) {
        self.has_changes_pushed = value;
    }

    pub fn has_pull_request(&self) -> bool {
        self.has_pull_request
    }

    pub fn pull_request_url(&self) -> Option<&str> {
        self.pull_request_url.as_deref()
    }

    pub fn set_pull_request(&mut self, url: String) {
        self.has_pull_request = true;
        self.pull_request_url = Some(url);
    }

    pub fn baseline_before(&self) -> Option<&str> {
        self.baseline_before.as_deref()
    }

    pub fn set_baseline_before(&mut self, baseline: Option<String>) {
        self.baseline_before = baseline;
    }

    pub fn baseline_after(&self) -> Option<&str> {
        self.baseline_after.as_deref()
    }

    pub fn set_baseline_after(&mut self, baseline: Option<String>) {
        self.baseline_after = baseline;
    }

    /// BOM version the transformation should move to, if any
    pub fn bom_target(&self) -> Option<&str> {
        self.bom_target.as_deref()
    }

    pub fn set_bom_target(&mut self, version: String) {
        self.bom_target = Some(version);
    }

    pub fn diff_stats(&self) -> Option<&DiffStats> {
        self.diff_stats.as_ref()
    }

    pub fn set_diff_stats(&mut self, stats: DiffStats) {
        self.diff_stats = Some(stats);
    }

    pub fn modified_files(&self) -> &[String] {
        self.diff_stats
            .as_ref()
            .map(|stats| stats.changed_files.as_slice())
            .unwrap_or(&[])
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn add_tag(&mut self, tag: &str) {
        self.tags.insert(tag.to_string());
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Marks the plugin as intentionally not processed; not an error
    pub fn skip(&mut self, reason: impl Into<String>) {
        self.skip_reason = Some(reason.into());
    }

    pub fn skip_reason(&self) -> Option<&str> {
        self.skip_reason.as_deref()
    }

    pub fn is_skipped(&self) -> bool {
        self.skip_reason.is_some()
    }

    pub fn errors(&self) -> &[PluginError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Records an error raised while attempting `stage`
    pub fn add_error(&mut self, stage: PipelineStage, error: &anyhow::Error) {
        self.errors.push(PluginError::new(stage, error));
    }
}
