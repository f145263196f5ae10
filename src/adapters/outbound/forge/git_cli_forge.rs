use crate::modernization::domain::{DiffStats, Plugin};
use crate::ports::outbound::{RemoteRepository, RepoKind, SourceForge};
use crate::shared::error::ModernizerError;
use crate::shared::security::validate_url_component;
use crate::shared::Result;
use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

const METADATA_REPOSITORY: &str = "metadata-plugin-modernizer";
const COMMIT_MESSAGE: &str = "Modernize plugin build and code";

/// Where repositories live and which branch changes go to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeSettings {
    pub base_url: String,
    /// Upstream owner; repositories are only ever read from it
    pub organization: String,
    /// Owner of existing forks that changes are pushed to
    pub fork_owner: Option<String>,
    pub branch: String,
}

impl Default for ForgeSettings {
    fn default() -> Self {
        Self {
            base_url: "https://github.com".to_string(),
            organization: "jenkinsci".to_string(),
            fork_owner: None,
            branch: "plugin-modernizer".to_string(),
        }
    }
}

/// GitCliForge adapter driving the `git` command line
///
/// Working copies are cloned from the upstream organization under
/// `work_root/<repository>`. Pushes only go to `fork_owner`, which must
/// name forks that already exist; without one a plugin counts as not
/// forked. Without a hosting API repositories are never archived, and
/// forks cannot be created or deleted nor pull requests opened.
pub struct GitCliForge {
    settings: ForgeSettings,
    work_root: PathBuf,
}

impl GitCliForge {
    pub fn new(settings: ForgeSettings, work_root: impl Into<PathBuf>) -> Self {
        Self {
            settings,
            work_root: work_root.into(),
        }
    }

    fn repository_name(&self, plugin: &Plugin, kind: RepoKind) -> Result<String> {
        let name = match kind {
            RepoKind::Plugin => plugin
                .repository_name()
                .ok_or_else(|| ModernizerError::InvalidArgument {
                    message: format!("plugin '{}' has no repository name yet", plugin.name()),
                })?
                .to_string(),
            RepoKind::Metadata => METADATA_REPOSITORY.to_string(),
        };
        validate_url_component(&name, "repository name")?;
        Ok(name)
    }

    fn checkout_dir(&self, plugin: &Plugin, kind: RepoKind) -> Result<PathBuf> {
        if kind == RepoKind::Plugin {
            if let Some(dir) = plugin.working_dir() {
                return Ok(dir.to_path_buf());
            }
        }
        Ok(self.work_root.join(self.repository_name(plugin, kind)?))
    }

    /// Runs git in `dir` and returns its stdout
    fn git(&self, dir: &Path, args: &[&str]) -> Result<String> {
        debug!(dir = %dir.display(), args = ?args, "running git");
        let output = Command::new("git")
            .current_dir(dir)
            .args(args)
            .output()
            .with_context(|| format!("failed to launch git {}", args.join(" ")))?;

        if !output.status.success() {
            return Err(anyhow!(
                "git {} failed with {}: {}",
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn owner_url(&self, owner: &str, plugin: &Plugin, kind: RepoKind) -> Result<RemoteRepository> {
        validate_url_component(owner, "repository owner")?;
        let full_name = format!("{}/{}", owner, self.repository_name(plugin, kind)?);
        let clone_url = format!(
            "{}/{}.git",
            self.settings.base_url.trim_end_matches('/'),
            full_name
        );
        Ok(RemoteRepository {
            full_name,
            clone_url,
        })
    }

    /// The fork changes are pushed to; never the upstream repository
    fn fork_repository(&self, plugin: &Plugin, kind: RepoKind) -> Result<RemoteRepository> {
        let owner = self.settings.fork_owner.as_deref().ok_or_else(|| {
            ModernizerError::InvalidArgument {
                message: "no fork owner configured, set forge.fork_owner to push changes"
                    .to_string(),
            }
        })?;
        if owner.eq_ignore_ascii_case(&self.settings.organization) {
            return Err(ModernizerError::InvalidArgument {
                message: format!(
                    "fork owner '{}' is the upstream organization, refusing to push there",
                    owner
                ),
            }
            .into());
        }
        self.owner_url(owner, plugin, kind)
    }

    fn requires_hosting_api(operation: &str) -> anyhow::Error {
        anyhow!(
            "{} requires a hosting API, which the git command line forge does not provide",
            operation
        )
    }
}

/// Parses `git diff --numstat` output; binary files count as changed
/// without line counts.
fn parse_numstat(output: &str) -> DiffStats {
    let mut stats = DiffStats::default();
    for line in output.lines() {
        let mut fields = line.splitn(3, '\t');
        let (Some(added), Some(deleted), Some(path)) = (fields.next(), fields.next(), fields.next())
        else {
            continue;
        };
        stats.additions += added.parse::<u64>().unwrap_or(0);
        stats.deletions += deleted.parse::<u64>().unwrap_or(0);
        stats.changed_files.push(path.to_string());
    }
    stats
}

impl SourceForge for GitCliForge {
    fn fork(&self, plugin: &Plugin, kind: RepoKind) -> Result<()> {
        debug!(plugin = plugin.name(), %kind, "cannot create forks");
        Err(Self::requires_hosting_api("creating a fork"))
    }

    fn is_forked(&self, plugin: &Plugin, kind: RepoKind) -> Result<bool> {
        match self.fork_repository(plugin, kind) {
            Ok(_) => Ok(true),
            Err(e) => {
                debug!(plugin = plugin.name(), error = %e, "no usable fork");
                Ok(false)
            }
        }
    }

    fn is_archived(&self, _plugin: &Plugin, _kind: RepoKind) -> Result<bool> {
        Ok(false)
    }

    fn delete_fork(&self, _plugin: &Plugin, _kind: RepoKind) -> Result<()> {
        Err(Self::requires_hosting_api("deleting a fork"))
    }

    fn sync(&self, plugin: &Plugin, kind: RepoKind) -> Result<()> {
        let dir = self.checkout_dir(plugin, kind)?;
        if dir.join(".git").exists() {
            self.git(&dir, &["fetch", "--quiet", "origin"])?;
        }
        Ok(())
    }

    fn fetch(&self, plugin: &Plugin, kind: RepoKind) -> Result<PathBuf> {
        let dir = self.work_root.join(self.repository_name(plugin, kind)?);
        if dir.join(".git").exists() {
            self.git(&dir, &["fetch", "--quiet", "origin"])?;
            return Ok(dir);
        }

        let repository = self.get_repository(plugin, kind)?;
        fs::create_dir_all(&self.work_root).map_err(|e| ModernizerError::FileWriteError {
            path: self.work_root.clone(),
            details: e.to_string(),
        })?;
        let target = dir.to_string_lossy().into_owned();
        self.git(
            &self.work_root,
            &["clone", "--quiet", &repository.clone_url, &target],
        )?;
        info!(plugin = plugin.name(), repository = %repository.full_name, "cloned");
        Ok(dir)
    }

    fn checkout_branch(&self, plugin: &Plugin, kind: RepoKind) -> Result<()> {
        let dir = self.checkout_dir(plugin, kind)?;
        self.git(&dir, &["checkout", "--quiet", "-B", &self.settings.branch])?;
        Ok(())
    }

    fn commit_changes(&self, plugin: &Plugin, kind: RepoKind) -> Result<bool> {
        let dir = self.checkout_dir(plugin, kind)?;
        self.git(&dir, &["add", "--all"])?;
        if self.git(&dir, &["status", "--porcelain"])?.trim().is_empty() {
            debug!(plugin = plugin.name(), "nothing to commit");
            return Ok(false);
        }
        self.git(&dir, &["commit", "--quiet", "-m", COMMIT_MESSAGE])?;
        Ok(true)
    }

    fn push_changes(&self, plugin: &Plugin, kind: RepoKind) -> Result<()> {
        let fork = self.fork_repository(plugin, kind)?;
        let dir = self.checkout_dir(plugin, kind)?;
        let refspec = format!("HEAD:refs/heads/{}", self.settings.branch);
        self.git(
            &dir,
            &["push", "--quiet", "--force", &fork.clone_url, &refspec],
        )?;
        info!(plugin = plugin.name(), fork = %fork.full_name, "pushed");
        Ok(())
    }

    fn open_pull_request(&self, _plugin: &Plugin, _kind: RepoKind) -> Result<String> {
        Err(Self::requires_hosting_api("opening a pull request"))
    }

    fn get_repository(&self, plugin: &Plugin, kind: RepoKind) -> Result<RemoteRepository> {
        self.owner_url(&self.settings.organization, plugin, kind)
    }

    fn diff_stats(&self, plugin: &Plugin, dry_run: bool) -> Result<DiffStats> {
        let dir = self.checkout_dir(plugin, RepoKind::Plugin)?;
        // new files only show up in the diff once git knows about them
        self.git(&dir, &["add", "--all", "--intent-to-add"])?;
        let stats = parse_numstat(&self.git(&dir, &["diff", "--numstat"])?);
        debug!(
            plugin = plugin.name(),
            dry_run,
            files = stats.changed_file_count(),
            "collected diff statistics"
        );
        Ok(stats)
    }
}
