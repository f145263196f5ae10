use crate::application::dto::{ModernizationRequest, PluginSummary, RunReport};
use crate::application::services::PluginMetadataService;
use crate::modernization::domain::jdk;
use crate::modernization::domain::record::RECORD_KEY;
use crate::modernization::domain::{Jdk, ModernizationRecord, PipelineStage, Plugin};
use crate::modernization::services::BomUpgradeResolver;
use crate::ports::inbound::ModernizationPort;
use crate::ports::outbound::{
    BuildDescriptorReader, BuildToolInvoker, CacheEntry, CacheStore, DataFetcher,
    ProgressReporter, RepoKind, SourceForge,
};
use crate::shared::error::ModernizerError;
use crate::shared::Result;
use anyhow::Context;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn};

/// Tags set while preparing a plugin
pub mod tags {
    pub const DEPRECATED: &str = "deprecated";
    pub const ADOPTION: &str = "adoption";
    pub const API_PLUGIN: &str = "api-plugin";
    pub const MAX_SCORE: &str = "max-score";
    pub const LOW_SCORE: &str = "low-score";
    pub const NO_INSTALLATIONS: &str = "no-installations";
    pub const LOCAL: &str = "local";
}

const COMPILE_GOAL: &str = "compile";
const VERIFY_GOAL: &str = "verify";

/// Cooperative cancellation for a run
///
/// Checked between plugins: the plugin in progress finishes its current
/// stage chain and the remaining ones are reported as skipped.
#[derive(Debug, Clone, Default)]
pub struct AbortHandle {
    aborted: Arc<AtomicBool>,
}

impl AbortHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn abort(&self) {
        self.aborted.store(true, Ordering::SeqCst);
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::SeqCst)
    }
}

/// ModernizePluginsUseCase - drives every plugin through the pipeline
///
/// Stages run strictly in order for one plugin:
/// fork, sync, fetch, checkout, transform, verify, commit, push and pull
/// request. The first failing stage is recorded on the plugin and ends its
/// chain; the batch moves on to the next plugin. Dry runs keep every
/// read-only step and skip the remote writes.
///
/// # Type Parameters
/// * `SF` - SourceForge implementation
/// * `BT` - BuildToolInvoker implementation
/// * `F` - DataFetcher implementation
/// * `C` - CacheStore implementation
/// * `R` - BuildDescriptorReader implementation
/// * `PR` - ProgressReporter implementation
pub struct ModernizePluginsUseCase<SF, BT, F, C, R, PR>
where
    F: DataFetcher,
    C: CacheStore,
    R: BuildDescriptorReader,
{
    forge: SF,
    build_tool: BT,
    metadata: PluginMetadataService<F, C, R>,
    progress_reporter: PR,
    resolver: BomUpgradeResolver,
    abort: AbortHandle,
}

impl<SF, BT, F, C, R, PR> ModernizePluginsUseCase<SF, BT, F, C, R, PR>
where
    SF: SourceForge,
    BT: BuildToolInvoker,
    F: DataFetcher,
    C: CacheStore,
    R: BuildDescriptorReader,
    PR: ProgressReporter,
{
    /// Creates a new ModernizePluginsUseCase with injected dependencies
    pub fn new(
        forge: SF,
        build_tool: BT,
        metadata: PluginMetadataService<F, C, R>,
        progress_reporter: PR,
    ) -> Self {
        Self {
            forge,
            build_tool,
            metadata,
            progress_reporter,
            resolver: BomUpgradeResolver::new(),
            abort: AbortHandle::new(),
        }
    }

    pub fn with_resolver(mut self, resolver: BomUpgradeResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_abort_handle(mut self, abort: AbortHandle) -> Self {
        self.abort = abort;
        self
    }

    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    /// Executes the modernization use case
    ///
    /// # Returns
    /// The run report with one summary per requested plugin, in request
    /// order
    pub fn execute(&self, request: ModernizationRequest) -> Result<RunReport> {
        request.validate()?;

        if request.clean_cache {
            self.progress_reporter.report("🧹 Wiping the metadata cache");
            self.metadata.cache().wipe()?;
        }

        let plugins = Self::build_batch(&request)?;
        let total = plugins.len();
        self.progress_reporter.report(&format!(
            "🔧 Modernizing {} plugin(s){}",
            total,
            if request.dry_run { " (dry run)" } else { "" }
        ));

        let processed = if request.workers > 1 && total > 1 {
            self.run_parallel(plugins, &request)?
        } else {
            self.run_sequential(plugins, &request)
        };

        let aborted = self.abort.is_aborted();
        let summaries: Vec<PluginSummary> = processed.iter().map(PluginSummary::from_plugin).collect();
        let report = RunReport::new(summaries, request.dry_run, aborted);

        self.progress_reporter.report_completion(&format!(
            "✅ Run finished: {} succeeded, {} failed, {} skipped, {} pull request(s)",
            report.totals.succeeded,
            report.totals.failed,
            report.totals.skipped,
            report.totals.pull_requests
        ));

        Ok(report)
    }

    /// Creates the plugin aggregates for the batch, catalog plugins first
    fn build_batch(request: &ModernizationRequest) -> Result<Vec<Plugin>> {
        let mut plugins = Vec::with_capacity(request.batch_size());
        for name in &request.plugins {
            plugins.push(Plugin::new(name.clone())?);
        }
        for path in &request.local_plugins {
            let canonical = path.canonicalize().unwrap_or_else(|_| path.clone());
            let name = canonical
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| ModernizerError::InvalidArgument {
                    message: format!("cannot derive a plugin name from '{}'", path.display()),
                })?;
            plugins.push(Plugin::local(name, canonical)?);
        }
        Ok(plugins)
    }

    fn run_sequential(&self, plugins: Vec<Plugin>, request: &ModernizationRequest) -> Vec<Plugin> {
        let total = plugins.len();
        let mut processed = Vec::with_capacity(total);
        for (index, mut plugin) in plugins.into_iter().enumerate() {
            self.process_or_skip(&mut plugin, request);
            self.progress_reporter
                .report_progress(index + 1, total, Some(plugin.name()));
            processed.push(plugin);
        }
        processed
    }

    /// Processes plugins on a rayon pool sized to `request.workers`
    fn run_parallel(
        &self,
        mut plugins: Vec<Plugin>,
        request: &ModernizationRequest,
    ) -> Result<Vec<Plugin>> {
        let total = plugins.len();
        let pool = ThreadPoolBuilder::new()
            .num_threads(request.workers.min(total))
            .build()
            .context("building the worker pool")?;
        let finished = AtomicUsize::new(0);

        pool.install(|| {
            plugins.par_iter_mut().for_each(|plugin| {
                self.process_or_skip(plugin, request);
                let count = finished.fetch_add(1, Ordering::SeqCst) + 1;
                self.progress_reporter
                    .report_progress(count, total, Some(plugin.name()));
            })
        });

        Ok(plugins)
    }

    fn process_or_skip(&self, plugin: &mut Plugin, request: &ModernizationRequest) {
        if self.abort.is_aborted() {
            plugin.skip("run aborted");
            return;
        }

        let span = info_span!("plugin", name = %plugin.name());
        let _entered = span.enter();

        self.process(plugin, request);
        self.clean_fork(plugin, request);
        self.persist_record(plugin, request);
    }

    fn process(&self, plugin: &mut Plugin, request: &ModernizationRequest) -> Option<()> {
        info!("processing plugin");
        self.prepare(plugin, request)?;

        if request.fetch_metadata_only {
            return self.collect_metadata_only(plugin);
        }

        self.ensure_fork(plugin, request)?;
        self.fetch(plugin)?;

        self.stage(plugin, PipelineStage::BranchCheckedOut, |plugin| {
            self.forge.checkout_branch(plugin, RepoKind::Plugin)
        })?;

        self.transform(plugin, request)?;

        self.stage(plugin, PipelineStage::Verified, |plugin| {
            let jdk = build_jdk(plugin);
            self.build_tool.invoke_goal(plugin, VERIFY_GOAL, jdk)
        })?;

        self.publish(plugin, request)
    }

    /// Resolves the repository, skips archived or deprecated plugins and
    /// collects tags
    fn prepare(&self, plugin: &mut Plugin, request: &ModernizationRequest) -> Option<()> {
        if let Err(e) = self.metadata.repository_name_for(plugin) {
            // already recorded on the plugin
            self.report_failure(plugin, PipelineStage::Created, &e);
            return None;
        }

        if plugin.is_local() {
            plugin.add_tag(tags::LOCAL);
            return Some(());
        }

        let archived = self.stage(plugin, PipelineStage::Created, |plugin| {
            self.forge.is_archived(plugin, RepoKind::Plugin)
        })?;
        if archived {
            info!("repository is archived, skipping");
            plugin.skip("repository is archived");
            return None;
        }

        self.stage(plugin, PipelineStage::Created, |plugin| {
            self.collect_tags(plugin, request.low_score_threshold)
        })?;

        if request.skip_deprecated && plugin.has_tag(tags::DEPRECATED) {
            info!("plugin is deprecated, skipping");
            plugin.skip("plugin is deprecated");
            return None;
        }

        Some(())
    }

    fn collect_tags(&self, plugin: &mut Plugin, low_score_threshold: u32) -> Result<()> {
        if self.metadata.is_deprecated(plugin)? {
            plugin.add_tag(tags::DEPRECATED);
        }
        if self.metadata.is_for_adoption(plugin)? {
            plugin.add_tag(tags::ADOPTION);
        }
        if self.metadata.is_api_plugin(plugin)? {
            plugin.add_tag(tags::API_PLUGIN);
        }
        if self.metadata.has_max_score(plugin)? == Some(true) {
            plugin.add_tag(tags::MAX_SCORE);
        }
        if self.metadata.has_low_score(plugin, low_score_threshold)? == Some(true) {
            plugin.add_tag(tags::LOW_SCORE);
        }
        if self.metadata.has_no_known_installations(plugin)? == Some(true) {
            plugin.add_tag(tags::NO_INSTALLATIONS);
        }
        debug!(tags = ?plugin.tags(), "tags collected");
        Ok(())
    }

    fn collect_metadata_only(&self, plugin: &mut Plugin) -> Option<()> {
        if !plugin.is_local() {
            self.stage(plugin, PipelineStage::Fetched, |plugin| {
                let path = self.forge.fetch(plugin, RepoKind::Plugin)?;
                plugin.set_checkout_path(path);
                Ok(())
            })?;
        }

        self.stage(plugin, PipelineStage::MetadataCollected, |plugin| {
            self.build_tool.ensure_minimal_build(plugin)?;
            self.refresh_metadata(plugin)
        })
    }

    fn ensure_fork(&self, plugin: &mut Plugin, request: &ModernizationRequest) -> Option<()> {
        if plugin.is_local() {
            return Some(());
        }

        self.stage(plugin, PipelineStage::ForkEnsured, |plugin| {
            if self.forge.is_forked(plugin, RepoKind::Plugin)? {
                debug!("fork already exists");
            } else if request.dry_run {
                info!("dry run, not forking");
            } else {
                self.forge.fork(plugin, RepoKind::Plugin)?;
            }
            Ok(())
        })?;

        if request.dry_run {
            return Some(());
        }
        self.stage(plugin, PipelineStage::Synced, |plugin| {
            self.forge.sync(plugin, RepoKind::Plugin)
        })
    }

    fn fetch(&self, plugin: &mut Plugin) -> Option<()> {
        self.stage(plugin, PipelineStage::Fetched, |plugin| {
            if !plugin.is_local() {
                let repository = self.forge.get_repository(plugin, RepoKind::Plugin)?;
                debug!(repository = %repository.full_name, url = %repository.clone_url, "fetching");
                let path = self.forge.fetch(plugin, RepoKind::Plugin)?;
                plugin.set_checkout_path(path);
            }
            self.build_tool.ensure_minimal_build(plugin)?;
            self.refresh_metadata(plugin)
        })
    }

    /// Collects metadata and, on the first call, the baseline and JDK
    fn refresh_metadata(&self, plugin: &mut Plugin) -> Result<()> {
        let metadata = self.build_tool.collect_metadata(plugin)?;
        let baseline = metadata.core_baseline.clone();
        plugin.set_metadata(metadata);

        if plugin.baseline_before().is_none() {
            plugin.set_baseline_before(baseline.clone());
        }
        if plugin.jdk().is_none() {
            let jdk = lowest_compatible_jdk(baseline.as_deref())?;
            debug!(jdk = %jdk, baseline = baseline.as_deref().unwrap_or("-"), "selected JDK");
            plugin.set_jdk(jdk);
        }
        Ok(())
    }

    fn transform(&self, plugin: &mut Plugin, request: &ModernizationRequest) -> Option<()> {
        self.stage(plugin, PipelineStage::Transformed, |plugin| {
            let jdk = build_jdk(plugin);
            self.build_tool.invoke_goal(plugin, COMPILE_GOAL, jdk)?;

            self.plan_bom_upgrade(plugin);
            self.build_tool
                .invoke_transform(plugin, &request.recipes, jdk)?;

            let stats = self.forge.diff_stats(plugin, request.dry_run)?;
            info!(
                additions = stats.additions,
                deletions = stats.deletions,
                files = stats.changed_file_count(),
                "transformation finished"
            );
            plugin.set_diff_stats(stats);

            let after = self.build_tool.collect_metadata(plugin)?;
            plugin.set_baseline_after(after.core_baseline.clone());
            plugin.set_metadata(after);
            Ok(())
        })
    }

    /// Stores the BOM upgrade target for the transformation; a failed
    /// lookup leaves the BOM unchanged
    fn plan_bom_upgrade(&self, plugin: &mut Plugin) {
        let Some(bom) = plugin.metadata().and_then(|m| m.bom.clone()) else {
            return;
        };
        match self
            .resolver
            .resolve(&bom.coordinates, &bom.version, &self.metadata)
        {
            Ok(Some(target)) => {
                info!(bom = %bom.coordinates, from = %bom.version, to = %target, "BOM upgrade planned");
                plugin.set_bom_target(target);
            }
            Ok(None) => debug!(bom = %bom.coordinates, "BOM is up to date"),
            Err(e) => warn!(bom = %bom.coordinates, error = %e, "could not resolve BOM upgrade, leaving it unchanged"),
        }
    }

    fn publish(&self, plugin: &mut Plugin, request: &ModernizationRequest) -> Option<()> {
        if request.dry_run {
            info!("dry run, not committing");
            return Some(());
        }
        if plugin.diff_stats().is_none_or(|stats| stats.is_empty()) {
            info!("no changes, nothing to publish");
            return Some(());
        }

        let committed = self.stage(plugin, PipelineStage::Committed, |plugin| {
            let committed = self.forge.commit_changes(plugin, RepoKind::Plugin)?;
            plugin.set_has_commits(committed);
            Ok(committed)
        })?;
        if !committed {
            info!("nothing to commit");
            return Some(());
        }

        self.stage(plugin, PipelineStage::Pushed, |plugin| {
            self.forge.push_changes(plugin, RepoKind::Plugin)?;
            plugin.set_has_changes_pushed(true);
            Ok(())
        })?;

        self.stage(plugin, PipelineStage::PullRequestOpened, |plugin| {
            let url = self.forge.open_pull_request(plugin, RepoKind::Plugin)?;
            info!(url = %url, "pull request opened");
            self.progress_reporter
                .report(&format!("🔀 {}: {}", plugin.name(), url));
            plugin.set_pull_request(url);
            Ok(())
        })
    }

    /// Deletes the fork of a plugin that finished cleanly without a pull
    /// request
    fn clean_fork(&self, plugin: &mut Plugin, request: &ModernizationRequest) {
        if !request.clean_forks
            || request.dry_run
            || request.fetch_metadata_only
            || plugin.is_local()
            || plugin.is_skipped()
            || plugin.has_errors()
            || plugin.has_pull_request()
        {
            return;
        }

        self.stage(plugin, PipelineStage::ForkDeleted, |plugin| {
            if self.forge.is_forked(plugin, RepoKind::Plugin)? {
                self.forge.delete_fork(plugin, RepoKind::Plugin)?;
                info!("fork deleted");
            }
            Ok(())
        });
    }

    /// Persists the run record in the plugin's private cache scope
    fn persist_record(&self, plugin: &mut Plugin, request: &ModernizationRequest) {
        if plugin.is_skipped() || plugin.has_errors() {
            return;
        }

        let record = ModernizationRecord::from_plugin(plugin, request.dry_run);
        let missing = record.missing_fields();
        if !missing.is_empty() {
            warn!(missing = ?missing, "modernization record incomplete, not persisted");
            return;
        }

        let entry = CacheEntry::new(PathBuf::from(plugin.name()), RECORD_KEY, record);
        if let Err(e) = self.metadata.cache().put(&entry) {
            let stage = plugin.stage();
            plugin.add_error(stage, &e);
            self.report_failure(plugin, stage, &e);
        }
    }

    /// Runs one stage operation, advancing on success
    ///
    /// On failure the error is recorded on the plugin and `None` ends the
    /// plugin's stage chain.
    fn stage<T>(
        &self,
        plugin: &mut Plugin,
        stage: PipelineStage,
        operation: impl FnOnce(&mut Plugin) -> Result<T>,
    ) -> Option<T> {
        debug!(stage = %stage, "running stage");
        match operation(plugin) {
            Ok(value) => {
                plugin.advance(stage);
                Some(value)
            }
            Err(e) => {
                let e = e.context(ModernizerError::StageFailed {
                    plugin: plugin.name().to_string(),
                    stage: stage.to_string(),
                });
                plugin.add_error(stage, &e);
                self.report_failure(plugin, stage, &e);
                None
            }
        }
    }

    fn report_failure(&self, plugin: &Plugin, stage: PipelineStage, e: &anyhow::Error) {
        let chain = format!("{:#}", e);
        error!(stage = %stage, error = %chain, "stage failed");
        self.progress_reporter
            .report_error(&format!(
                "❌ {}: {} failed: {}",
                plugin.name(),
                stage,
                e.root_cause()
            ));
    }
}

impl<SF, BT, F, C, R, PR> ModernizationPort for ModernizePluginsUseCase<SF, BT, F, C, R, PR>
where
    SF: SourceForge,
    BT: BuildToolInvoker,
    F: DataFetcher,
    C: CacheStore,
    R: BuildDescriptorReader,
    PR: ProgressReporter,
{
    fn modernize(&self, request: ModernizationRequest) -> Result<RunReport> {
        self.execute(request)
    }
}

/// Lowest JDK compatible with the baseline; the catalog minimum when the
/// baseline is unknown
fn lowest_compatible_jdk(baseline: Option<&str>) -> Result<&'static Jdk> {
    match baseline {
        Some(baseline) => Ok(jdk::minimum(&jdk::compatible_jdks(baseline)?)),
        None => Ok(jdk::minimum(&[])),
    }
}

/// JDK assigned at fetch time, reused for compile and verify
fn build_jdk(plugin: &Plugin) -> &'static Jdk {
    plugin.jdk().unwrap_or_else(|| jdk::minimum(&[]))
}
