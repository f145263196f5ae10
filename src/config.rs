//! Configuration file support for plugin-modernizer.
//!
//! Provides YAML-based configuration through `plugin-modernizer.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::{bail, Context};
use plugin_modernizer::adapters::outbound::forge::ForgeSettings;
use plugin_modernizer::application::services::MetadataEndpoints;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

use plugin_modernizer::shared::Result;

pub const CONFIG_FILENAME: &str = "plugin-modernizer.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub plugins: Option<Vec<String>>,
    pub recipes: Option<Vec<String>>,
    pub dry_run: Option<bool>,
    pub fetch_metadata_only: Option<bool>,
    pub cache_path: Option<PathBuf>,
    pub workers: Option<usize>,
    pub format: Option<String>,
    pub clean_forks: Option<bool>,
    pub skip_deprecated: Option<bool>,
    pub low_score_threshold: Option<u32>,
    pub maven_executable: Option<PathBuf>,
    /// JDK major version to its home directory
    pub jdk_homes: Option<HashMap<u32, PathBuf>>,
    pub endpoints: Option<MetadataEndpoints>,
    pub forge: Option<ForgeSettings>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.workers == Some(0) {
        bail!(
            "Invalid config: workers must be at least 1.\n\n\
             💡 Hint: Use 1 to process plugins one after another."
        );
    }
    if let Some(ref plugins) = config.plugins {
        for (i, plugin) in plugins.iter().enumerate() {
            if plugin.trim().is_empty() {
                bail!(
                    "Invalid config: plugins[{}] must not be empty.\n\n\
                     💡 Hint: Each entry is a plugin name as listed in the update center (e.g., \"git\").",
                    i
                );
            }
        }
    }
    if let Some(ref recipes) = config.recipes {
        for (i, recipe) in recipes.iter().enumerate() {
            if recipe.trim().is_empty() {
                bail!("Invalid config: recipes[{}] must not be blank.", i);
            }
        }
    }
    if let Some(threshold) = config.low_score_threshold {
        if threshold > 100 {
            bail!(
                "Invalid config: low_score_threshold must be between 0 and 100, got {}.",
                threshold
            );
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        warn!("Unknown config field '{}' will be ignored.", key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
plugins:
  - git
  - mailer
recipes:
  - io.jenkins.tools.pluginmodernizer.UpgradeParentVersion
dry_run: true
workers: 4
format: markdown
low_score_threshold: 60
jdk_homes:
  17: /opt/jdk-17
  21: /opt/jdk-21
endpoints:
  maven_repository: https://mirror.example.com/maven
forge:
  organization: my-org
  fork_owner: my-bot
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(
            config.plugins.as_deref(),
            Some(&["git".to_string(), "mailer".to_string()][..])
        );
        assert_eq!(config.recipes.map(|r| r.len()), Some(1));
        assert_eq!(config.dry_run, Some(true));
        assert_eq!(config.workers, Some(4));
        assert_eq!(config.format.as_deref(), Some("markdown"));
        assert_eq!(config.low_score_threshold, Some(60));

        let homes = config.jdk_homes.unwrap();
        assert_eq!(homes.get(&17), Some(&PathBuf::from("/opt/jdk-17")));

        let endpoints = config.endpoints.unwrap();
        assert_eq!(endpoints.maven_repository, "https://mirror.example.com/maven");
        assert_eq!(
            endpoints.update_center,
            MetadataEndpoints::default().update_center
        );

        let forge = config.forge.unwrap();
        assert_eq!(forge.organization, "my-org");
        assert_eq!(forge.fork_owner.as_deref(), Some("my-bot"));
        assert_eq!(forge.branch, ForgeSettings::default().branch);
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "skip_deprecated: true\n").unwrap();

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.skip_deprecated, Some(true));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        let config = discover_config(dir.path()).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/config.yml"));
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("bad.yml");
        fs::write(&config_path, "invalid: yaml: [[[broken").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "workers: 0\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("workers must be at least 1"));
    }

    #[test]
    fn test_empty_plugin_name_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "plugins:\n  - git\n  - \"  \"\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("plugins[1] must not be empty"));
    }

    #[test]
    fn test_blank_recipe_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, "recipes:\n  - \"\"\n").unwrap();

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("recipes[0] must not be blank"));
    }

    #[test]
    fn test_unknown_fields_kept_for_warning() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(
            &config_path,
            r#"
format: json
unknown_field: true
another_unknown: value
"#,
        )
        .unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.unknown_fields.len(), 2);
        assert!(config.unknown_fields.contains_key("unknown_field"));
        assert!(config.unknown_fields.contains_key("another_unknown"));
    }

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();
        assert!(config.plugins.is_none());
        assert!(config.workers.is_none());
        assert!(config.forge.is_none());
        assert!(config.unknown_fields.is_empty());
    }
}
