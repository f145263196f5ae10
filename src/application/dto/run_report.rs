use crate::modernization::domain::{PipelineStage, Plugin, PluginError};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of one plugin in a run
#[derive(Debug, Clone, Serialize)]
pub struct PluginSummary {
    pub name: String,
    pub repository: Option<String>,
    /// Last stage the plugin reached
    pub stage: PipelineStage,
    pub jdk: Option<u32>,
    pub baseline_before: Option<String>,
    pub baseline_after: Option<String>,
    pub bom_target: Option<String>,
    pub pull_request_url: Option<String>,
    pub additions: u64,
    pub deletions: u64,
    pub modified_files: Vec<String>,
    pub tags: Vec<String>,
    pub skipped: Option<String>,
    pub errors: Vec<PluginError>,
}

impl PluginSummary {
    pub fn from_plugin(plugin: &Plugin) -> Self {
        let stats = plugin.diff_stats().cloned().unwrap_or_default();
        Self {
            name: plugin.name().to_string(),
            repository: plugin.repository_name().map(String::from),
            stage: plugin.stage(),
            jdk: plugin.jdk().map(|jdk| jdk.major()),
            baseline_before: plugin.baseline_before().map(String::from),
            baseline_after: plugin.baseline_after().map(String::from),
            bom_target: plugin.bom_target().map(String::from),
            pull_request_url: plugin.pull_request_url().map(String::from),
            additions: stats.additions,
            deletions: stats.deletions,
            modified_files: stats.changed_files,
            tags: plugin.tags().iter().cloned().collect(),
            skipped: plugin.skip_reason().map(String::from),
            errors: plugin.errors().to_vec(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Counts over a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunTotals {
    pub plugins: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    pub pull_requests: usize,
}

/// RunReport - externally observable result of a modernization run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub dry_run: bool,
    /// True when the run was aborted before every plugin was processed
    pub aborted: bool,
    pub totals: RunTotals,
    pub plugins: Vec<PluginSummary>,
}

impl RunReport {
    pub fn new(plugins: Vec<PluginSummary>, dry_run: bool, aborted: bool) -> Self {
        let mut totals = RunTotals {
            plugins: plugins.len(),
            ..Default::default()
        };
        for summary in &plugins {
            if summary.has_errors() {
                totals.failed += 1;
            } else if summary.skipped.is_some() {
                totals.skipped += 1;
            } else {
                totals.succeeded += 1;
            }
            if summary.pull_request_url.is_some() {
                totals.pull_requests += 1;
            }
        }

        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            dry_run,
            aborted,
            totals,
            plugins,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.totals.failed > 0
    }

    /// Summaries of plugins that recorded at least one error
    pub fn failures(&self) -> impl Iterator<Item = &PluginSummary> {
        self.plugins.iter().filter(|p| p.has_errors())
    }
}
