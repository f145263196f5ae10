use super::descriptor::{BomReference, BuildDescriptor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Facts gathered about one plugin, owned by its [`super::Plugin`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMetadata {
    pub plugin_name: String,
    pub core_baseline: Option<String>,
    pub parent_version: Option<String>,
    pub bom: Option<BomReference>,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl PluginMetadata {
    pub fn from_descriptor(plugin_name: &str, descriptor: &BuildDescriptor) -> Self {
        Self {
            plugin_name: plugin_name.to_string(),
            core_baseline: descriptor.baseline(),
            parent_version: descriptor.parent_version.clone(),
            bom: descriptor.bom.clone(),
            properties: descriptor.properties.clone(),
        }
    }
}
