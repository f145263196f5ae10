use crate::application::dto::{ModernizationRequest, RunReport};
use crate::shared::Result;

/// ModernizationPort - Inbound port for the modernization use case
///
/// This port defines the interface that external adapters (CLI, etc.)
/// use to run a batch. It represents the application's public API.
pub trait ModernizationPort {
    /// Runs every requested plugin through the pipeline
    ///
    /// Per-plugin failures are recorded in the returned report and never
    /// abort the batch.
    ///
    /// # Errors
    /// Returns an error only when the batch cannot start (invalid request,
    /// cache wipe failure, unreadable local plugin directory).
    fn modernize(&self, request: ModernizationRequest) -> Result<RunReport>;
}
