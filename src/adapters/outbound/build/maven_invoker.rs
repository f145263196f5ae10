use crate::adapters::outbound::filesystem::{FileSystemReader, DESCRIPTOR_FILE};
use crate::modernization::domain::{Jdk, Plugin, PluginMetadata};
use crate::ports::outbound::{BuildDescriptorReader, BuildToolInvoker};
use crate::shared::error::ModernizerError;
use crate::shared::Result;
use anyhow::{anyhow, Context};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

pub const DEFAULT_MAVEN_EXECUTABLE: &str = "mvn";

/// Goal running the recipe-driven code transformation
const TRANSFORM_GOAL: &str = "org.openrewrite.maven:rewrite-maven-plugin:run";
const ACTIVE_RECIPES_PROPERTY: &str = "rewrite.activeRecipes";

/// Flags passed to every invocation: batch mode, no download progress
const COMMON_FLAGS: &[&str] = &["-B", "-ntp"];

/// MavenInvoker adapter running the Maven CLI against a plugin checkout
///
/// Each call spawns the configured executable in the plugin's working
/// directory and blocks until it exits. `JAVA_HOME` is taken from the
/// configured JDK homes; when the requested major has no home the
/// inherited environment is used.
pub struct MavenInvoker {
    executable: PathBuf,
    jdk_homes: HashMap<u32, PathBuf>,
    reader: FileSystemReader,
}

impl MavenInvoker {
    pub fn new(executable: impl Into<PathBuf>, jdk_homes: HashMap<u32, PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            jdk_homes,
            reader: FileSystemReader::new(),
        }
    }

    fn working_dir<'a>(&self, plugin: &'a Plugin) -> Result<&'a Path> {
        plugin.working_dir().ok_or_else(|| {
            ModernizerError::InvalidArgument {
                message: format!("plugin '{}' has no working copy yet", plugin.name()),
            }
            .into()
        })
    }

    /// Prepares the command without running it
    fn command(&self, plugin: &Plugin, args: &[String], jdk: Option<&Jdk>) -> Result<Command> {
        let mut command = Command::new(&self.executable);
        command
            .current_dir(self.working_dir(plugin)?)
            .args(COMMON_FLAGS)
            .args(args);

        if let Some(jdk) = jdk {
            match self.jdk_homes.get(&jdk.major()) {
                Some(home) => {
                    command.env("JAVA_HOME", home);
                }
                None => warn!(
                    plugin = plugin.name(),
                    jdk = jdk.major(),
                    "no home configured for {}, using the inherited JAVA_HOME",
                    jdk
                ),
            }
        }
        Ok(command)
    }

    fn run(&self, plugin: &Plugin, args: &[String], jdk: Option<&Jdk>) -> Result<()> {
        let mut command = self.command(plugin, args, jdk)?;
        let description = format!("{} {}", self.executable.display(), args.join(" "));
        debug!(plugin = plugin.name(), command = %description, "running build");

        let output = command
            .output()
            .with_context(|| format!("failed to launch {}", description))?;

        if !output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            // Maven reports build errors on stdout
            let tail: Vec<&str> = stdout.lines().rev().take(20).collect();
            return Err(anyhow!(
                "{} failed with {}\n{}",
                description,
                output.status,
                tail.into_iter().rev().collect::<Vec<_>>().join("\n")
            ));
        }
        info!(plugin = plugin.name(), command = %description, "build succeeded");
        Ok(())
    }
}

impl Default for MavenInvoker {
    fn default() -> Self {
        Self::new(DEFAULT_MAVEN_EXECUTABLE, HashMap::new())
    }
}

fn transform_args(recipes: &[String]) -> Vec<String> {
    vec![
        TRANSFORM_GOAL.to_string(),
        format!("-D{}={}", ACTIVE_RECIPES_PROPERTY, recipes.join(",")),
    ]
}

impl BuildToolInvoker for MavenInvoker {
    fn invoke_goal(&self, plugin: &Plugin, goal: &str, jdk: &Jdk) -> Result<()> {
        self.run(plugin, &[goal.to_string()], Some(jdk))
    }

    fn invoke_transform(&self, plugin: &Plugin, recipes: &[String], jdk: &Jdk) -> Result<()> {
        if recipes.is_empty() {
            debug!(plugin = plugin.name(), "no recipes, nothing to transform");
            return Ok(());
        }
        self.run(plugin, &transform_args(recipes), Some(jdk))
    }

    fn collect_metadata(&self, plugin: &Plugin) -> Result<PluginMetadata> {
        let descriptor = self.reader.read_descriptor(self.working_dir(plugin)?)?;
        Ok(PluginMetadata::from_descriptor(plugin.name(), &descriptor))
    }

    fn ensure_minimal_build(&self, plugin: &Plugin) -> Result<()> {
        let pom = self.working_dir(plugin)?.join(DESCRIPTOR_FILE);
        if !pom.is_file() {
            return Err(ModernizerError::FileReadError {
                path: pom,
                details: "the working copy has no build descriptor".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
