use crate::application::dto::{PluginSummary, RunReport};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

const SUMMARY_TABLE_HEADER: &str = "| Metric | Count |\n";
const SUMMARY_TABLE_SEPARATOR: &str = "|--------|-------|\n";

const PLUGIN_TABLE_HEADER: &str =
    "| Plugin | Stage | JDK | Baseline | BOM | Changes | Pull request | Tags |\n";
const PLUGIN_TABLE_SEPARATOR: &str =
    "|--------|-------|-----|----------|-----|---------|--------------|------|\n";

const NONE_CELL: &str = "-";

/// MarkdownReportFormatter adapter rendering the run report as Markdown
///
/// Sections: a header with the run identity, a totals table, one row per
/// plugin, then the failures with their error chains and any skipped
/// plugins.
pub struct MarkdownReportFormatter;

impl MarkdownReportFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes characters that would break a Markdown table row
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn cell(value: Option<&str>) -> String {
        value
            .map(Self::escape_markdown_table_cell)
            .unwrap_or_else(|| NONE_CELL.to_string())
    }

    fn render_header(output: &mut String, report: &RunReport) {
        output.push_str("# Plugin Modernization Report\n\n");
        output.push_str(&format!("- Run: `{}`\n", report.run_id));
        output.push_str(&format!(
            "- Generated: {}\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        if report.dry_run {
            output.push_str("- Mode: dry run (nothing was pushed)\n");
        }
        if report.aborted {
            output.push_str("- ⚠️ The run was aborted before every plugin was processed\n");
        }
        output.push('\n');
    }

    fn render_totals(output: &mut String, report: &RunReport) {
        output.push_str("## Summary\n\n");
        output.push_str(SUMMARY_TABLE_HEADER);
        output.push_str(SUMMARY_TABLE_SEPARATOR);
        let totals = &report.totals;
        for (metric, count) in [
            ("Plugins", totals.plugins),
            ("Succeeded", totals.succeeded),
            ("Failed", totals.failed),
            ("Skipped", totals.skipped),
            ("Pull requests", totals.pull_requests),
        ] {
            output.push_str(&format!("| {} | {} |\n", metric, count));
        }
        output.push('\n');
    }

    fn render_plugins(output: &mut String, plugins: &[PluginSummary]) {
        output.push_str("## Plugins\n\n");
        if plugins.is_empty() {
            output.push_str("No plugins were processed.\n\n");
            return;
        }
        output.push_str(PLUGIN_TABLE_HEADER);
        output.push_str(PLUGIN_TABLE_SEPARATOR);
        for plugin in plugins {
            let baseline = match (&plugin.baseline_before, &plugin.baseline_after) {
                (Some(before), Some(after)) if before != after => {
                    format!("{} → {}", before, after)
                }
                (Some(before), _) => before.clone(),
                (None, Some(after)) => after.clone(),
                (None, None) => NONE_CELL.to_string(),
            };
            let changes = if plugin.modified_files.is_empty() {
                NONE_CELL.to_string()
            } else {
                format!(
                    "+{} -{} ({} files)",
                    plugin.additions,
                    plugin.deletions,
                    plugin.modified_files.len()
                )
            };
            let tags = if plugin.tags.is_empty() {
                NONE_CELL.to_string()
            } else {
                plugin.tags.join(", ")
            };
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&plugin.name),
                plugin.stage,
                plugin
                    .jdk
                    .map(|jdk| jdk.to_string())
                    .unwrap_or_else(|| NONE_CELL.to_string()),
                Self::escape_markdown_table_cell(&baseline),
                Self::cell(plugin.bom_target.as_deref()),
                changes,
                Self::cell(plugin.pull_request_url.as_deref()),
                Self::escape_markdown_table_cell(&tags),
            ));
        }
        output.push('\n');
    }

    fn render_failures(output: &mut String, report: &RunReport) {
        if !report.has_failures() {
            return;
        }
        output.push_str("## Failures\n\n");
        for plugin in report.failures() {
            output.push_str(&format!("### {}\n\n", plugin.name));
            for error in &plugin.errors {
                output.push_str(&format!("- **{}**: {}\n", error.stage, error.message));
                for cause in &error.causes {
                    output.push_str(&format!("  - caused by: {}\n", cause));
                }
            }
            output.push('\n');
        }
    }

    fn render_skipped(output: &mut String, plugins: &[PluginSummary]) {
        let skipped: Vec<_> = plugins
            .iter()
            .filter_map(|p| p.skipped.as_deref().map(|reason| (&p.name, reason)))
            .collect();
        if skipped.is_empty() {
            return;
        }
        output.push_str("## Skipped\n\n");
        for (name, reason) in skipped {
            output.push_str(&format!("- {}: {}\n", name, reason));
        }
        output.push('\n');
    }
}

impl Default for MarkdownReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownReportFormatter {
    fn format(&self, report: &RunReport) -> Result<String> {
        let mut output = String::new();
        Self::render_header(&mut output, report);
        Self::render_totals(&mut output, report);
        Self::render_plugins(&mut output, &report.plugins);
        Self::render_failures(&mut output, report);
        Self::render_skipped(&mut output, &report.plugins);
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modernization::domain::{DiffStats, PipelineStage, Plugin};

    fn succeeded() -> PluginSummary {
        let mut plugin = Plugin::new("git".to_string()).unwrap();
        plugin.set_baseline_before(Some("2.440.3".to_string()));
        plugin.set_baseline_after(Some("2.452.4".to_string()));
        plugin.set_diff_stats(DiffStats {
            additions: 12,
            deletions: 3,
            changed_files: vec!["pom.xml".to_string()],
        });
        plugin.set_pull_request("https://github.com/jenkinsci/git-plugin/pull/1".to_string());
        plugin.add_tag("max-score");
        plugin.advance(PipelineStage::PullRequestOpened);
        PluginSummary::from_plugin(&plugin)
    }

    fn failed() -> PluginSummary {
        let mut plugin = Plugin::new("beta".to_string()).unwrap();
        let err = anyhow::anyhow!("exit status 1").context("mvn verify failed");
        plugin.add_error(PipelineStage::Verified, &err);
        PluginSummary::from_plugin(&plugin)
    }

    #[test]
    fn test_escape_markdown_table_cell() {
        assert_eq!(
            MarkdownReportFormatter::escape_markdown_table_cell("a|b\nc"),
            "a\\|b c"
        );
    }

    #[test]
    fn test_format_summary_and_rows() {
        let report = RunReport::new(vec![succeeded(), failed()], false, false);
        let output = MarkdownReportFormatter::new().format(&report).unwrap();

        assert!(output.starts_with("# Plugin Modernization Report"));
        assert!(output.contains("| Plugins | 2 |"));
        assert!(output.contains("| Failed | 1 |"));
        assert!(output.contains("| Pull requests | 1 |"));
        assert!(output.contains("2.440.3 → 2.452.4"));
        assert!(output.contains("+12 -3 (1 files)"));
        assert!(output.contains("https://github.com/jenkinsci/git-plugin/pull/1"));
    }

    #[test]
    fn test_format_failures_with_causes() {
        let report = RunReport::new(vec![succeeded(), failed()], false, false);
        let output = MarkdownReportFormatter::new().format(&report).unwrap();

        assert!(output.contains("## Failures"));
        assert!(output.contains("### beta"));
        assert!(output.contains("- **verified**: mvn verify failed"));
        assert!(output.contains("  - caused by: exit status 1"));
    }

    #[test]
    fn test_format_clean_run_has_no_failures_section() {
        let report = RunReport::new(vec![succeeded()], true, false);
        let output = MarkdownReportFormatter::new().format(&report).unwrap();
        assert!(!output.contains("## Failures"));
        assert!(output.contains("dry run"));
    }

    #[test]
    fn test_format_skipped_and_aborted() {
        let mut plugin = Plugin::new("old".to_string()).unwrap();
        plugin.skip("repository is archived");
        let report = RunReport::new(vec![PluginSummary::from_plugin(&plugin)], false, true);
        let output = MarkdownReportFormatter::new().format(&report).unwrap();
        assert!(output.contains("## Skipped"));
        assert!(output.contains("- old: repository is archived"));
        assert!(output.contains("aborted"));
    }

    #[test]
    fn test_format_empty_report() {
        let report = RunReport::new(vec![], false, false);
        let output = MarkdownReportFormatter::new().format(&report).unwrap();
        assert!(output.contains("No plugins were processed."));
    }
}
