use crate::modernization::domain::{DiffStats, Plugin};
use crate::shared::Result;
use std::fmt;
use std::path::PathBuf;

/// Which of a plugin's repositories an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepoKind {
    /// The plugin's source code
    Plugin,
    /// The repository tracking modernization records
    Metadata,
}

impl fmt::Display for RepoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoKind::Plugin => write!(f, "plugin"),
            RepoKind::Metadata => write!(f, "metadata"),
        }
    }
}

/// Remote repository coordinates as known to the forge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepository {
    pub full_name: String,
    pub clone_url: String,
}

/// SourceForge port for fork, clone, commit and pull request operations
///
/// Every operation is idempotent against an existing state: forking an
/// already forked repository or checking out the current branch again is a
/// no-op. Existence checks (`is_forked`, `is_archived`) let the pipeline
/// skip work before calling a mutating operation.
pub trait SourceForge: Send + Sync {
    fn fork(&self, plugin: &Plugin, kind: RepoKind) -> Result<()>;

    fn is_forked(&self, plugin: &Plugin, kind: RepoKind) -> Result<bool>;

    fn is_archived(&self, plugin: &Plugin, kind: RepoKind) -> Result<bool>;

    fn delete_fork(&self, plugin: &Plugin, kind: RepoKind) -> Result<()>;

    /// Brings the fork up to date with its upstream
    fn sync(&self, plugin: &Plugin, kind: RepoKind) -> Result<()>;

    /// Clones or updates the working copy
    ///
    /// # Returns
    /// The directory holding the working copy
    fn fetch(&self, plugin: &Plugin, kind: RepoKind) -> Result<PathBuf>;

    fn checkout_branch(&self, plugin: &Plugin, kind: RepoKind) -> Result<()>;

    /// Commits pending changes
    ///
    /// # Returns
    /// `false` when there was nothing to commit
    fn commit_changes(&self, plugin: &Plugin, kind: RepoKind) -> Result<bool>;

    fn push_changes(&self, plugin: &Plugin, kind: RepoKind) -> Result<()>;

    /// Opens (or finds the already open) pull request
    ///
    /// # Returns
    /// The pull request URL
    fn open_pull_request(&self, plugin: &Plugin, kind: RepoKind) -> Result<String>;

    fn get_repository(&self, plugin: &Plugin, kind: RepoKind) -> Result<RemoteRepository>;

    /// Additions, deletions and changed files of the working copy
    fn diff_stats(&self, plugin: &Plugin, dry_run: bool) -> Result<DiffStats>;
}
