/// Application services backing the use cases
mod plugin_metadata_service;
mod remote_datasets;

pub use plugin_metadata_service::{MetadataEndpoints, PluginMetadataService};
pub use remote_datasets::{
    HealthScoreData, InstallationStatsData, UpdateCenterData, ADOPTION_LABEL, API_PLUGIN_LABEL,
};
