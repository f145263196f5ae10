use crate::application::dto::RunReport;
use crate::shared::Result;

/// ReportFormatter port for rendering the end-of-run report
pub trait ReportFormatter {
    /// Formats the run report
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, report: &RunReport) -> Result<String>;
}
