use plugin_modernizer::prelude::*;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Mock SourceForge recording every operation as `plugin:operation`
///
/// Working copies are reported under `checkout_root/<plugin>`; the mock
/// does not create them.
#[derive(Clone, Default)]
pub struct MockForge {
    pub calls: Arc<Mutex<Vec<String>>>,
    pub checkout_root: PathBuf,
    pub archived: HashSet<String>,
    pub failing: Option<(String, String)>,
    pub unchanged: HashSet<String>,
}

impl MockForge {
    pub fn new(checkout_root: impl Into<PathBuf>) -> Self {
        Self {
            checkout_root: checkout_root.into(),
            ..Default::default()
        }
    }

    pub fn with_archived(mut self, plugin: &str) -> Self {
        self.archived.insert(plugin.to_string());
        self
    }

    /// Makes `operation` fail for `plugin`
    pub fn with_failure(mut self, plugin: &str, operation: &str) -> Self {
        self.failing = Some((plugin.to_string(), operation.to_string()));
        self
    }

    /// The transformation leaves `plugin` unchanged
    pub fn with_unchanged(mut self, plugin: &str) -> Self {
        self.unchanged.insert(plugin.to_string());
        self
    }

    pub fn operations_for(&self, plugin: &str) -> Vec<String> {
        let prefix = format!("{}:", plugin);
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|call| call.strip_prefix(&prefix).map(String::from))
            .collect()
    }

    fn record(&self, plugin: &Plugin, operation: &str) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}:{}", plugin.name(), operation));
        match &self.failing {
            Some((name, op)) if name == plugin.name() && op == operation => {
                anyhow::bail!("Mock forge failure: {} refused", operation)
            }
            _ => Ok(()),
        }
    }
}

impl SourceForge for MockForge {
    fn fork(&self, plugin: &Plugin, _kind: RepoKind) -> Result<()> {
        self.record(plugin, "fork")
    }

    fn is_forked(&self, plugin: &Plugin, _kind: RepoKind) -> Result<bool> {
        self.record(plugin, "is_forked")?;
        Ok(false)
    }

    fn is_archived(&self, plugin: &Plugin, _kind: RepoKind) -> Result<bool> {
        self.record(plugin, "is_archived")?;
        Ok(self.archived.contains(plugin.name()))
    }

    fn delete_fork(&self, plugin: &Plugin, _kind: RepoKind) -> Result<()> {
        self.record(plugin, "delete_fork")
    }

    fn sync(&self, plugin: &Plugin, _kind: RepoKind) -> Result<()> {
        self.record(plugin, "sync")
    }

    fn fetch(&self, plugin: &Plugin, _kind: RepoKind) -> Result<PathBuf> {
        self.record(plugin, "fetch")?;
        Ok(self.checkout_root.join(plugin.name()))
    }

    fn checkout_branch(&self, plugin: &Plugin, _kind: RepoKind) -> Result<()> {
        self.record(plugin, "checkout_branch")
    }

    fn commit_changes(&self, plugin: &Plugin, _kind: RepoKind) -> Result<bool> {
        self.record(plugin, "commit_changes")?;
        Ok(true)
    }

    fn push_changes(&self, plugin: &Plugin, _kind: RepoKind) -> Result<()> {
        self.record(plugin, "push_changes")
    }

    fn open_pull_request(&self, plugin: &Plugin, _kind: RepoKind) -> Result<String> {
        self.record(plugin, "open_pull_request")?;
        Ok(format!(
            "https://github.com/jenkinsci/{}/pull/42",
            plugin.repository_name().unwrap_or(plugin.name())
        ))
    }

    fn get_repository(&self, plugin: &Plugin, _kind: RepoKind) -> Result<RemoteRepository> {
        self.record(plugin, "get_repository")?;
        let name = plugin.repository_name().unwrap_or(plugin.name());
        Ok(RemoteRepository {
            full_name: format!("jenkinsci/{}", name),
            clone_url: format!("https://github.com/jenkinsci/{}.git", name),
        })
    }

    fn diff_stats(&self, plugin: &Plugin, _dry_run: bool) -> Result<DiffStats> {
        self.record(plugin, "diff_stats")?;
        if self.unchanged.contains(plugin.name()) {
            return Ok(DiffStats::default());
        }
        Ok(DiffStats {
            additions: 7,
            deletions: 3,
            changed_files: vec!["pom.xml".to_string(), "Jenkinsfile".to_string()],
        })
    }
}
