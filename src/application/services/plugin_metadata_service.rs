use super::remote_datasets::{
    parse_maven_metadata, HealthScoreData, InstallationStatsData, UpdateCenterData,
    UpdateCenterPlugin, ADOPTION_LABEL, API_PLUGIN_LABEL, API_PLUGIN_SUFFIX, MAX_HEALTH_SCORE,
};
use crate::modernization::domain::descriptor::trailing_segment;
use crate::modernization::domain::{ArtifactCoordinates, Plugin};
use crate::ports::outbound::{
    BuildDescriptorReader, CacheEntry, CacheStore, DataFetcher, VersionIndex, SHARED_SCOPE,
};
use crate::shared::error::ModernizerError;
use crate::shared::security::validate_url_component;
use crate::shared::Result;
use anyhow::Context;
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

const UPDATE_CENTER_KEY: &str = "update-center.json";
const HEALTH_SCORES_KEY: &str = "plugin-health-scores.json";
const INSTALLATION_STATS_KEY: &str = "plugin-installation-stats.json";

/// Remote endpoints the datasets are downloaded from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MetadataEndpoints {
    pub update_center: String,
    pub health_scores: String,
    pub installation_stats: String,
    /// Base URL of the Maven repository serving `maven-metadata.xml`
    pub maven_repository: String,
}

impl Default for MetadataEndpoints {
    fn default() -> Self {
        Self {
            update_center: "https://updates.jenkins.io/current/update-center.actual.json"
                .to_string(),
            health_scores: "https://plugin-health.jenkins.io/api/scores".to_string(),
            installation_stats:
                "https://raw.githubusercontent.com/jenkins-infra/infra-statistics/gh-pages/plugin-installation-trend/latest.csv"
                    .to_string(),
            maven_repository: "https://repo.jenkins-ci.org/public".to_string(),
        }
    }
}

/// Memoised dataset; concurrent first loads may both download, the first
/// stored value wins.
struct Memo<T> {
    cell: OnceLock<Arc<T>>,
}

impl<T> Memo<T> {
    fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    fn get_or_load(&self, load: impl FnOnce() -> Result<T>) -> Result<Arc<T>> {
        if let Some(value) = self.cell.get() {
            return Ok(Arc::clone(value));
        }
        let value = Arc::new(load()?);
        Ok(Arc::clone(self.cell.get_or_init(|| value)))
    }
}

/// PluginMetadataService - typed queries over the remote plugin datasets
///
/// Every dataset follows the same sequence on first use per service
/// instance: read it from the cache store, else download it, persist it
/// and return it. Later uses are served from memory.
pub struct PluginMetadataService<F, C, R>
where
    F: DataFetcher,
    C: CacheStore,
    R: BuildDescriptorReader,
{
    fetcher: F,
    cache: Arc<C>,
    descriptor_reader: R,
    endpoints: MetadataEndpoints,
    update_center: Memo<UpdateCenterData>,
    health_scores: Memo<HealthScoreData>,
    installation_stats: Memo<InstallationStatsData>,
    version_indices: DashMap<ArtifactCoordinates, Arc<Vec<String>>>,
}

impl<F, C, R> PluginMetadataService<F, C, R>
where
    F: DataFetcher,
    C: CacheStore,
    R: BuildDescriptorReader,
{
    pub fn new(fetcher: F, cache: Arc<C>, descriptor_reader: R, endpoints: MetadataEndpoints) -> Self {
        Self {
            fetcher,
            cache,
            descriptor_reader,
            endpoints,
            update_center: Memo::new(),
            health_scores: Memo::new(),
            installation_stats: Memo::new(),
            version_indices: DashMap::new(),
        }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn descriptor_reader(&self) -> &R {
        &self.descriptor_reader
    }

    /// Get-or-download-then-cache for one shared dataset
    ///
    /// An unreadable cached copy is logged and replaced by a fresh download.
    /// A failed write is logged; the downloaded data is still returned.
    fn load_shared<T>(&self, key: &str, url: &str, parse: impl FnOnce(&str) -> Result<T>) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
    {
        match self.cache.get::<T>(Path::new(SHARED_SCOPE), key) {
            Ok(Some(data)) => return Ok(data),
            Ok(None) => {}
            Err(e) => warn!(key, error = %e, "discarding unreadable cache entry"),
        }

        debug!(key, url, "dataset not cached, downloading");
        let body = self.fetcher.fetch_text(url)?;
        let data = parse(&body).with_context(|| format!("Failed to parse dataset from {}", url))?;
        if let Err(e) = self.cache.put(&CacheEntry::shared(key, &data)) {
            warn!(key, error = %e, "could not cache dataset, using the downloaded copy");
        }
        Ok(data)
    }

    fn update_center(&self) -> Result<Arc<UpdateCenterData>> {
        self.update_center.get_or_load(|| {
            self.load_shared(UPDATE_CENTER_KEY, &self.endpoints.update_center, |body| {
                Ok(serde_json::from_str(body)?)
            })
        })
    }

    fn health_scores(&self) -> Result<Arc<HealthScoreData>> {
        self.health_scores.get_or_load(|| {
            self.load_shared(HEALTH_SCORES_KEY, &self.endpoints.health_scores, |body| {
                Ok(serde_json::from_str(body)?)
            })
        })
    }

    fn installation_stats(&self) -> Result<Arc<InstallationStatsData>> {
        self.installation_stats.get_or_load(|| {
            self.load_shared(
                INSTALLATION_STATS_KEY,
                &self.endpoints.installation_stats,
                InstallationStatsData::from_csv,
            )
        })
    }

    fn catalog_entry(&self, plugin: &Plugin) -> Result<Option<UpdateCenterPlugin>> {
        Ok(self.update_center()?.plugins.get(plugin.name()).cloned())
    }

    /// Resolves and stores the plugin's hosted repository name
    ///
    /// Local plugins use their build descriptor's SCM hints; catalog plugins
    /// use the catalog's SCM URL.
    ///
    /// # Errors
    /// A `PluginNotFound` error (or a descriptor read failure) is recorded on
    /// the plugin, then returned.
    pub fn repository_name_for(&self, plugin: &mut Plugin) -> Result<String> {
        match self.lookup_repository_name(plugin) {
            Ok(name) => {
                plugin.set_repository_name(name.clone());
                Ok(name)
            }
            Err(e) => {
                plugin.add_error(plugin.stage(), &e);
                Err(e)
            }
        }
    }

    fn lookup_repository_name(&self, plugin: &Plugin) -> Result<String> {
        let name = if let Some(path) = plugin.local_path() {
            self.descriptor_reader.read_descriptor(path)?.repository_name()
        } else {
            self.catalog_entry(plugin)?
                .and_then(|entry| entry.scm)
                .as_deref()
                .and_then(trailing_segment)
        };

        name.ok_or_else(|| {
            ModernizerError::PluginNotFound {
                plugin: plugin.name().to_string(),
                details: "no SCM information in the update center or build descriptor"
                    .to_string(),
            }
            .into()
        })
    }

    pub fn is_deprecated(&self, plugin: &Plugin) -> Result<bool> {
        Ok(self.update_center()?.deprecations.contains_key(plugin.name()))
    }

    pub fn is_for_adoption(&self, plugin: &Plugin) -> Result<bool> {
        Ok(self
            .catalog_entry(plugin)?
            .is_some_and(|entry| entry.has_label(ADOPTION_LABEL)))
    }

    /// Best-effort: relies on both the label and the naming convention
    pub fn is_api_plugin(&self, plugin: &Plugin) -> Result<bool> {
        if !plugin.name().ends_with(API_PLUGIN_SUFFIX) {
            return Ok(false);
        }
        Ok(self
            .catalog_entry(plugin)?
            .is_some_and(|entry| entry.has_label(API_PLUGIN_LABEL)))
    }

    /// Latest released version; `None` for local plugins
    ///
    /// # Errors
    /// `PluginNotFound` when a catalog plugin is missing from the catalog.
    pub fn current_version(&self, plugin: &Plugin) -> Result<Option<String>> {
        if plugin.is_local() {
            return Ok(None);
        }
        let entry = self.catalog_entry(plugin)?.ok_or_else(|| ModernizerError::PluginNotFound {
            plugin: plugin.name().to_string(),
            details: "not listed in the update center".to_string(),
        })?;
        Ok(Some(entry.version.ok_or_else(|| ModernizerError::PluginNotFound {
            plugin: plugin.name().to_string(),
            details: "the update center lists no version".to_string(),
        })?))
    }

    pub fn health_score(&self, plugin: &Plugin) -> Result<Option<f64>> {
        if plugin.is_local() {
            return Ok(None);
        }
        Ok(self
            .health_scores()?
            .plugins
            .get(plugin.name())
            .map(|score| score.value))
    }

    pub fn has_max_score(&self, plugin: &Plugin) -> Result<Option<bool>> {
        Ok(self
            .health_score(plugin)?
            .map(|score| score >= MAX_HEALTH_SCORE))
    }

    pub fn has_low_score(&self, plugin: &Plugin, threshold: u32) -> Result<Option<bool>> {
        Ok(self
            .health_score(plugin)?
            .map(|score| score < f64::from(threshold)))
    }

    pub fn install_count(&self, plugin: &Plugin) -> Result<Option<u64>> {
        if plugin.is_local() {
            return Ok(None);
        }
        Ok(self
            .installation_stats()?
            .plugins
            .get(plugin.name())
            .copied())
    }

    /// True when the statistics list no installation of the plugin
    pub fn has_no_known_installations(&self, plugin: &Plugin) -> Result<Option<bool>> {
        if plugin.is_local() {
            return Ok(None);
        }
        Ok(Some(self.install_count(plugin)?.unwrap_or(0) == 0))
    }

    fn maven_metadata_url(&self, artifact: &ArtifactCoordinates) -> Result<String> {
        validate_url_component(&artifact.group_id, "Group id")?;
        validate_url_component(&artifact.artifact_id, "Artifact id")?;

        let group_path = artifact
            .group_id
            .split('.')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        Ok(format!(
            "{}/{}/{}/maven-metadata.xml",
            self.endpoints.maven_repository.trim_end_matches('/'),
            group_path,
            urlencoding::encode(&artifact.artifact_id)
        ))
    }
}

impl<F, C, R> VersionIndex for PluginMetadataService<F, C, R>
where
    F: DataFetcher,
    C: CacheStore,
    R: BuildDescriptorReader,
{
    fn published_versions(&self, artifact: &ArtifactCoordinates) -> Result<Vec<String>> {
        if let Some(versions) = self.version_indices.get(artifact) {
            return Ok(versions.as_ref().clone());
        }

        let url = self.maven_metadata_url(artifact)?;
        let key = format!("{}-{}.json", artifact.group_id, artifact.artifact_id);
        let versions = self.load_shared(&key, &url, parse_maven_metadata)?;

        self.version_indices
            .insert(artifact.clone(), Arc::new(versions.clone()));
        Ok(versions)
    }
}
