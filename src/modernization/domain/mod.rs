pub mod descriptor;
pub mod jdk;
pub mod metadata;
pub mod plugin;
pub mod record;
pub mod stage;
pub mod version;

pub use descriptor::{ArtifactCoordinates, BomReference, BuildDescriptor};
pub use jdk::Jdk;
pub use metadata::PluginMetadata;
pub use plugin::{DiffStats, Plugin, PluginError, PluginName};
pub use record::ModernizationRecord;
pub use stage::PipelineStage;
pub use version::DottedVersion;
