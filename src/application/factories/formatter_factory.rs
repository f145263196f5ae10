use crate::adapters::outbound::formatters::{JsonReportFormatter, MarkdownReportFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::ReportFormatter;

/// Factory for creating run report formatters
///
/// Selects the infrastructure adapter for an output format so callers only
/// deal with the `ReportFormatter` port.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use plugin_modernizer::application::dto::OutputFormat;
    /// use plugin_modernizer::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Markdown);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn ReportFormatter> {
        match format {
            OutputFormat::Json => Box::new(JsonReportFormatter::new()),
            OutputFormat::Markdown => Box::new(MarkdownReportFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Json => "📝 Writing JSON run report...",
            OutputFormat::Markdown => "📝 Writing Markdown run report...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::RunReport;

    #[test]
    fn test_create_json_formatter() {
        let formatter = FormatterFactory::create(OutputFormat::Json);
        let output = formatter.format(&RunReport::new(vec![], false, false)).unwrap();
        assert!(output.trim_start().starts_with('{'));
    }

    #[test]
    fn test_create_markdown_formatter() {
        let formatter = FormatterFactory::create(OutputFormat::Markdown);
        let output = formatter.format(&RunReport::new(vec![], false, false)).unwrap();
        assert!(output.starts_with("# "));
    }

    #[test]
    fn test_progress_message() {
        assert_eq!(
            FormatterFactory::progress_message(OutputFormat::Json),
            "📝 Writing JSON run report..."
        );
        assert_eq!(
            FormatterFactory::progress_message(OutputFormat::Markdown),
            "📝 Writing Markdown run report..."
        );
    }
}
