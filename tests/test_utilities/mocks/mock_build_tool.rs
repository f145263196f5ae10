use plugin_modernizer::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock BuildToolInvoker with a per-plugin core baseline
///
/// Every invocation is recorded as `(plugin, goal, jdk major)`; the
/// transformation is recorded with the goal `transform`.
#[derive(Clone, Default)]
pub struct MockBuildTool {
    pub invocations: Arc<Mutex<Vec<(String, String, u32)>>>,
    pub baselines: HashMap<String, String>,
    pub failing: Option<(String, String)>,
}

impl MockBuildTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_baseline(mut self, plugin: &str, baseline: &str) -> Self {
        self.baselines
            .insert(plugin.to_string(), baseline.to_string());
        self
    }

    /// Makes `goal` fail for `plugin`
    pub fn with_failing_goal(mut self, plugin: &str, goal: &str) -> Self {
        self.failing = Some((plugin.to_string(), goal.to_string()));
        self
    }

    pub fn goals_for(&self, plugin: &str) -> Vec<(String, u32)> {
        self.invocations
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _, _)| name == plugin)
            .map(|(_, goal, jdk)| (goal.clone(), *jdk))
            .collect()
    }

    fn record(&self, plugin: &Plugin, goal: &str, jdk: &Jdk) -> Result<()> {
        self.invocations
            .lock()
            .unwrap()
            .push((plugin.name().to_string(), goal.to_string(), jdk.major()));
        match &self.failing {
            Some((name, failing)) if name == plugin.name() && failing == goal => {
                anyhow::bail!("Mock build failure: {} failed", goal)
            }
            _ => Ok(()),
        }
    }
}

impl BuildToolInvoker for MockBuildTool {
    fn invoke_goal(&self, plugin: &Plugin, goal: &str, jdk: &Jdk) -> Result<()> {
        self.record(plugin, goal, jdk)
    }

    fn invoke_transform(&self, plugin: &Plugin, _recipes: &[String], jdk: &Jdk) -> Result<()> {
        self.record(plugin, "transform", jdk)
    }

    fn collect_metadata(&self, plugin: &Plugin) -> Result<PluginMetadata> {
        Ok(PluginMetadata {
            plugin_name: plugin.name().to_string(),
            core_baseline: self.baselines.get(plugin.name()).cloned(),
            bom: Some(BomReference {
                coordinates: ArtifactCoordinates::new("io.jenkins.tools.bom", "bom-2.440.x"),
                version: "2746.vb_79a_1d3e7b_c8".to_string(),
            }),
            ..Default::default()
        })
    }

    fn ensure_minimal_build(&self, _plugin: &Plugin) -> Result<()> {
        Ok(())
    }
}
