use super::plugin::Plugin;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Cache key the record is stored under, inside the plugin's private scope
pub const RECORD_KEY: &str = "modernization-metadata.json";

/// Persisted outcome of modernizing one plugin, for downstream reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModernizationRecord {
    pub plugin_name: String,
    pub plugin_repository: Option<String>,
    pub jdk_version: Option<u32>,
    pub baseline_before: Option<String>,
    pub baseline_after: Option<String>,
    pub pull_request_url: Option<String>,
    pub pull_request_status: Option<String>,
    pub additions: u64,
    pub deletions: u64,
    pub changed_files: usize,
    pub dry_run: bool,
    pub tags: BTreeSet<String>,
    pub timestamp: DateTime<Utc>,
}

impl ModernizationRecord {
    pub fn from_plugin(plugin: &Plugin, dry_run: bool) -> Self {
        let stats = plugin.diff_stats().cloned().unwrap_or_default();
        Self {
            plugin_name: plugin.name().to_string(),
            plugin_repository: plugin.repository_name().map(String::from),
            jdk_version: plugin.jdk().map(|jdk| jdk.major()),
            baseline_before: plugin.baseline_before().map(String::from),
            baseline_after: plugin.baseline_after().map(String::from),
            pull_request_url: plugin.pull_request_url().map(String::from),
            pull_request_status: plugin.has_pull_request().then(|| "open".to_string()),
            additions: stats.additions,
            deletions: stats.deletions,
            changed_files: stats.changed_file_count(),
            dry_run,
            tags: plugin.tags().clone(),
            timestamp: Utc::now(),
        }
    }

    /// Names of required fields that are not set
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.plugin_name.trim().is_empty() {
            missing.push("plugin_name");
        }
        if self.plugin_repository.is_none() {
            missing.push("plugin_repository");
        }
        if self.jdk_version.is_none() {
            missing.push("jdk_version");
        }
        if self.baseline_before.is_none() {
            missing.push("baseline_before");
        }
        missing
    }
}
