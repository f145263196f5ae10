//! plugin-modernizer - batch modernization of plugins
//!
//! Resolves which JDKs a plugin can be built with, keeps remote plugin
//! metadata in a durable cache, picks BOM upgrade targets and drives each
//! plugin through a fork-to-pull-request pipeline. The code follows a
//! hexagonal architecture:
//!
//! - **Domain Layer** (`modernization`): JDK catalog, versions, the plugin aggregate
//!   and the BOM upgrade resolver
//! - **Application Layer** (`application`): the modernization use case, the
//!   remote metadata service and report DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use plugin_modernizer::prelude::*;
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<()> {
//! let cache = Arc::new(FileCacheStore::new(".plugin-modernizer-cache"));
//! let metadata = PluginMetadataService::new(
//!     HttpDataFetcher::new()?,
//!     cache,
//!     FileSystemReader::new(),
//!     MetadataEndpoints::default(),
//! );
//!
//! let use_case = ModernizePluginsUseCase::new(
//!     GitCliForge::new(ForgeSettings::default(), ".checkouts"),
//!     MavenInvoker::new("mvn", HashMap::new()),
//!     metadata,
//!     StderrProgressReporter::new(),
//! );
//!
//! let mut request = ModernizationRequest::new(vec!["git".to_string()]);
//! request.dry_run = true;
//! let report = use_case.execute(request)?;
//!
//! println!("{}", MarkdownReportFormatter::new().format(&report)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod modernization;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::build::MavenInvoker;
    pub use crate::adapters::outbound::cache::FileCacheStore;
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::forge::{ForgeSettings, GitCliForge};
    pub use crate::adapters::outbound::formatters::{JsonReportFormatter, MarkdownReportFormatter};
    pub use crate::adapters::outbound::network::HttpDataFetcher;
    pub use crate::application::dto::{
        ModernizationRequest, OutputFormat, PluginSummary, RunReport, RunTotals,
    };
    pub use crate::application::services::{MetadataEndpoints, PluginMetadataService};
    pub use crate::application::use_cases::{tags, AbortHandle, ModernizePluginsUseCase};
    pub use crate::modernization::domain::jdk::{
        compatible_jdks, highest_two, lts_jdks, maximum, minimum,
    };
    pub use crate::modernization::domain::{
        ArtifactCoordinates, BomReference, BuildDescriptor, DiffStats, DottedVersion, Jdk,
        ModernizationRecord, PipelineStage, Plugin, PluginError, PluginMetadata,
    };
    pub use crate::modernization::policies::{CurrentBomFormat, LegacyBomFormat, VersionFormat};
    pub use crate::modernization::services::BomUpgradeResolver;
    pub use crate::ports::inbound::ModernizationPort;
    pub use crate::ports::outbound::{
        BuildDescriptorReader, BuildToolInvoker, CacheEntry, CacheStore, DataFetcher,
        OutputPresenter, ProgressReporter, RemoteRepository, RepoKind, ReportFormatter,
        SourceForge, VersionIndex, SHARED_SCOPE,
    };
    pub use crate::shared::error::{ExitCode, ModernizerError};
    pub use crate::shared::Result;
}
