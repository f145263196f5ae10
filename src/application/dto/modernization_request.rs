use crate::shared::error::ModernizerError;
use crate::shared::Result;
use std::path::PathBuf;

/// Default worker count: plugins are processed one after another
pub const DEFAULT_WORKERS: usize = 1;

/// Health score below which a plugin is tagged `low-score`
pub const DEFAULT_LOW_SCORE_THRESHOLD: u32 = 80;

/// ModernizationRequest - run configuration for the modernization use case
///
/// Built by the CLI from arguments and the config file, then passed
/// explicitly to the use case.
#[derive(Debug, Clone)]
pub struct ModernizationRequest {
    /// Plugins resolved against the update center
    pub plugins: Vec<String>,
    /// Plugins already checked out on disk
    pub local_plugins: Vec<PathBuf>,
    /// Transformation recipes to apply
    pub recipes: Vec<String>,
    /// Perform read-only steps only; no commit, push or pull request
    pub dry_run: bool,
    /// Only collect metadata; skip compile, transform and verify
    pub fetch_metadata_only: bool,
    /// Delete forks that did not end with an open pull request
    pub clean_forks: bool,
    /// Skip plugins the update center lists as deprecated
    pub skip_deprecated: bool,
    /// Wipe the cache before the run
    pub clean_cache: bool,
    /// Plugins processed concurrently
    pub workers: usize,
    pub low_score_threshold: u32,
}

impl ModernizationRequest {
    pub fn new(plugins: Vec<String>) -> Self {
        Self {
            plugins,
            local_plugins: Vec::new(),
            recipes: Vec::new(),
            dry_run: false,
            fetch_metadata_only: false,
            clean_forks: false,
            skip_deprecated: false,
            clean_cache: false,
            workers: DEFAULT_WORKERS,
            low_score_threshold: DEFAULT_LOW_SCORE_THRESHOLD,
        }
    }

    /// Number of plugins in the batch
    pub fn batch_size(&self) -> usize {
        self.plugins.len() + self.local_plugins.len()
    }

    /// Rejects requests the pipeline cannot run
    pub fn validate(&self) -> Result<()> {
        if self.batch_size() == 0 {
            return Err(ModernizerError::Validation {
                message: "no plugins to modernize. Pass --plugins, --plugin-file or --local"
                    .to_string(),
            }
            .into());
        }

        if self.workers == 0 {
            return Err(ModernizerError::Validation {
                message: "workers must be at least 1".to_string(),
            }
            .into());
        }

        if self.recipes.iter().any(|r| r.trim().is_empty()) {
            return Err(ModernizerError::Validation {
                message: "recipe names cannot be blank".to_string(),
            }
            .into());
        }

        if self.low_score_threshold > 100 {
            return Err(ModernizerError::Validation {
                message: format!(
                    "low score threshold must be between 0 and 100, got {}",
                    self.low_score_threshold
                ),
            }
            .into());
        }

        Ok(())
    }
}
