use crate::shared::Result;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Label the update center puts on plugins looking for a maintainer
pub const ADOPTION_LABEL: &str = "adopt-this-plugin";

/// Label the update center puts on library wrapper plugins
pub const API_PLUGIN_LABEL: &str = "api-plugin";

/// Name suffix API plugins follow by convention
pub const API_PLUGIN_SUFFIX: &str = "-api";

/// Highest health score a plugin can have
pub const MAX_HEALTH_SCORE: f64 = 100.0;

/// Update center catalog of every published plugin
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCenterData {
    #[serde(default)]
    pub plugins: HashMap<String, UpdateCenterPlugin>,
    #[serde(default)]
    pub deprecations: HashMap<String, Deprecation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCenterPlugin {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub scm: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl UpdateCenterPlugin {
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Deprecation {
    #[serde(default)]
    pub url: Option<String>,
}

/// Health score per plugin
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthScoreData {
    #[serde(default)]
    pub plugins: HashMap<String, HealthScore>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HealthScore {
    pub value: f64,
}

/// Known installation count per plugin
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallationStatsData {
    pub plugins: HashMap<String, u64>,
}

impl InstallationStatsData {
    /// Parses the headerless `name,count` CSV export
    pub fn from_csv(body: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_reader(body.as_bytes());

        let mut plugins = HashMap::new();
        for result in reader.deserialize() {
            let (name, count): (String, u64) = result?;
            plugins.insert(name, count);
        }
        Ok(Self { plugins })
    }
}

/// Published versions listed in a `maven-metadata.xml`
pub fn parse_maven_metadata(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut versions = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                path.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Event::End(_) => {
                path.pop();
            }
            Event::Text(e) => {
                let in_versions = path.len() >= 3
                    && path[path.len() - 3..] == ["versioning", "versions", "version"];
                if in_versions {
                    let version = e.unescape()?.trim().to_string();
                    if !version.is_empty() {
                        versions.push(version);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(versions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_center_json() {
        let json = r#"{
            "connectionCheckUrl": "https://www.google.com/",
            "plugins": {
                "git": {
                    "name": "git",
                    "version": "5.2.1",
                    "scm": "https://github.com/jenkinsci/git-plugin",
                    "labels": ["scm"]
                }
            },
            "deprecations": {
                "old": { "url": "https://example/old" }
            }
        }"#;
        let data: UpdateCenterData = serde_json::from_str(json).unwrap();
        let git = &data.plugins["git"];
        assert_eq!(git.version.as_deref(), Some("5.2.1"));
        assert!(git.has_label("scm"));
        assert!(data.deprecations.contains_key("old"));
    }

    #[test]
    fn test_installation_stats_csv() {
        let stats = InstallationStatsData::from_csv("git,250000\nmailer, 180000\nunused,0\n").unwrap();
        assert_eq!(stats.plugins["git"], 250000);
        assert_eq!(stats.plugins["mailer"], 180000);
        assert_eq!(stats.plugins["unused"], 0);
    }

    #[test]
    fn test_installation_stats_csv_rejects_bad_counts() {
        assert!(InstallationStatsData::from_csv("git,many\n").is_err());
    }

    #[test]
    fn test_parse_maven_metadata() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<metadata>
  <groupId>io.jenkins.tools.bom</groupId>
  <artifactId>bom-2.440.x</artifactId>
  <versioning>
    <latest>3208.vb_21177d4b_cd9</latest>
    <release>3208.vb_21177d4b_cd9</release>
    <versions>
      <version>2746.vb_79a_1d3e7b_c8</version>
      <version>3208.vb_21177d4b_cd9</version>
    </versions>
    <lastUpdated>20240701000000</lastUpdated>
  </versioning>
</metadata>"#;
        assert_eq!(
            parse_maven_metadata(xml).unwrap(),
            vec!["2746.vb_79a_1d3e7b_c8", "3208.vb_21177d4b_cd9"]
        );
    }

    #[test]
    fn test_parse_maven_metadata_without_versions() {
        assert!(parse_maven_metadata("<metadata/>").unwrap().is_empty());
    }
}
