use crate::modernization::domain::{Jdk, Plugin, PluginMetadata};
use crate::shared::Result;

/// BuildToolInvoker port for running the plugin's build
///
/// All calls run in the plugin's working directory and block until the
/// build finishes. A failing build is returned as an error and recorded on
/// the plugin by the pipeline.
pub trait BuildToolInvoker: Send + Sync {
    /// Runs a single build goal (e.g. `compile`, `verify`) with the given JDK
    fn invoke_goal(&self, plugin: &Plugin, goal: &str, jdk: &Jdk) -> Result<()>;

    /// Runs the code transformation with the given recipes
    fn invoke_transform(&self, plugin: &Plugin, recipes: &[String], jdk: &Jdk) -> Result<()>;

    /// Gathers facts about the plugin from its build
    fn collect_metadata(&self, plugin: &Plugin) -> Result<PluginMetadata>;

    /// Makes sure the minimal prerequisites for a build are in place
    fn ensure_minimal_build(&self, plugin: &Plugin) -> Result<()>;
}
