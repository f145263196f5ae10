use plugin_modernizer::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const UPDATE_CENTER: &str = r#"{
    "plugins": {
        "git": { "name": "git", "version": "5.2.1", "scm": "https://github.com/jenkinsci/git-plugin", "labels": ["scm"] },
        "mailer": { "name": "mailer", "version": "472.vf7c289a_4b_420", "scm": "https://github.com/jenkinsci/mailer-plugin", "labels": [] },
        "legacy-auth": { "name": "legacy-auth", "version": "1.0", "scm": "https://github.com/jenkinsci/legacy-auth-plugin", "labels": ["adopt-this-plugin"] },
        "jackson2-api": { "name": "jackson2-api", "version": "2.17.0", "scm": "https://github.com/jenkinsci/jackson2-api-plugin", "labels": ["api-plugin"] }
    },
    "deprecations": {
        "legacy-auth": { "url": "https://plugins.jenkins.io/legacy-auth" }
    }
}"#;

pub const HEALTH_SCORES: &str = r#"{
    "plugins": {
        "git": { "value": 100 },
        "mailer": { "value": 91 },
        "legacy-auth": { "value": 23 },
        "jackson2-api": { "value": 97 }
    }
}"#;

pub const INSTALLATION_STATS: &str = "git,310000\nmailer,250000\nlegacy-auth,0\njackson2-api,280000\n";

pub const BOM_METADATA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<metadata>
  <groupId>io.jenkins.tools.bom</groupId>
  <artifactId>bom-2.440.x</artifactId>
  <versioning>
    <versions>
      <version>2746.vb_79a_1d3e7b_c8</version>
      <version>3120.v4d898e1e9fc4</version>
      <version>3208.vb_21177d4b_cd9</version>
    </versions>
  </versioning>
</metadata>"#;

/// Mock DataFetcher serving canned bodies per URL and counting requests
#[derive(Clone)]
pub struct MockDataFetcher {
    pub bodies: HashMap<String, String>,
    pub requests: Arc<AtomicUsize>,
}

impl MockDataFetcher {
    pub fn new() -> Self {
        Self {
            bodies: HashMap::new(),
            requests: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Serves the standard catalog at the default endpoints
    pub fn with_catalog() -> Self {
        let endpoints = MetadataEndpoints::default();
        Self::new()
            .with_body(&endpoints.update_center, UPDATE_CENTER)
            .with_body(&endpoints.health_scores, HEALTH_SCORES)
            .with_body(&endpoints.installation_stats, INSTALLATION_STATS)
            .with_body(
                &format!(
                    "{}/io/jenkins/tools/bom/bom-2.440.x/maven-metadata.xml",
                    endpoints.maven_repository
                ),
                BOM_METADATA,
            )
    }

    pub fn with_body(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl Default for MockDataFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl DataFetcher for MockDataFetcher {
    fn fetch_text(&self, url: &str) -> Result<String> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Mock fetcher: no body for {}", url))
    }
}
