/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, network, forge, build tool, console).
pub mod build_descriptor_reader;
pub mod build_tool;
pub mod cache_store;
pub mod data_fetcher;
pub mod output_presenter;
pub mod progress_reporter;
pub mod report_formatter;
pub mod source_forge;
pub mod version_index;

pub use build_descriptor_reader::BuildDescriptorReader;
pub use build_tool::BuildToolInvoker;
pub use cache_store::{CacheEntry, CacheStore, SHARED_SCOPE};
pub use data_fetcher::DataFetcher;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use report_formatter::ReportFormatter;
pub use source_forge::{RemoteRepository, RepoKind, SourceForge};
pub use version_index::VersionIndex;
