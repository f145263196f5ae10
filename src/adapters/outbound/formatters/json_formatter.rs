use crate::application::dto::RunReport;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// JsonReportFormatter adapter rendering the run report as pretty JSON
pub struct JsonReportFormatter;

impl JsonReportFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonReportFormatter {
    fn format(&self, report: &RunReport) -> Result<String> {
        let mut output = serde_json::to_string_pretty(report)?;
        output.push('\n');
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::PluginSummary;
    use crate::modernization::domain::{PipelineStage, Plugin};

    #[test]
    fn test_format_report() {
        let mut plugin = Plugin::new("git".to_string()).unwrap();
        plugin.add_tag("max-score");
        plugin.advance(PipelineStage::Verified);
        let report = RunReport::new(vec![PluginSummary::from_plugin(&plugin)], true, false);

        let output = JsonReportFormatter::new().format(&report).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["dry_run"], true);
        assert_eq!(json["totals"]["succeeded"], 1);
        assert_eq!(json["plugins"][0]["name"], "git");
        assert_eq!(json["plugins"][0]["stage"], "verified");
        assert_eq!(json["plugins"][0]["tags"][0], "max-score");
        assert!(json["run_id"].as_str().is_some());
    }

    #[test]
    fn test_format_errors_with_causes() {
        let mut plugin = Plugin::new("git".to_string()).unwrap();
        let err = anyhow::anyhow!("exit status 1").context("mvn verify failed");
        plugin.add_error(PipelineStage::Verified, &err);
        let report = RunReport::new(vec![PluginSummary::from_plugin(&plugin)], false, false);

        let output = JsonReportFormatter::new().format(&report).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        let error = &json["plugins"][0]["errors"][0];
        assert_eq!(error["stage"], "verified");
        assert_eq!(error["message"], "mvn verify failed");
        assert_eq!(error["causes"][0], "exit status 1");
    }
}
