/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod modernization_request;
mod output_format;
mod run_report;

pub use modernization_request::{
    ModernizationRequest, DEFAULT_LOW_SCORE_THRESHOLD, DEFAULT_WORKERS,
};
pub use output_format::OutputFormat;
pub use run_report::{PluginSummary, RunReport, RunTotals};
