use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::config::Config;
use crate::output::plan_rows;
use crate::report::Report;

pub fn render_report_table(report: &Report) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Prompt", "Drift Score", "Passed"]);

    for r in &report.prompt_details {
        let passed_cell = if r.passed {
            Cell::new("YES").fg(Color::Green)
        } else {
            Cell::new("NO").fg(Color::Red)
        };
        table.add_row(Row::from(vec![
            Cell::new(&r.name),
            Cell::new(format!("{:.4}", r.drift_score)),
            passed_cell,
        ]));
    }

    format!(
        "{table}\n{}/{} prompts passed (threshold {:.4}, at {})",
        report.passed_count,
        report.total_prompts,
        report.threshold,
        report.timestamp.to_rfc3339()
    )
}

pub fn render_plan_table(config: &Config) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Setting", "Value"]);
    for (setting, value) in plan_rows(config) {
        table.add_row(vec![setting.to_string(), value]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::config::Config;
    use crate::output::table::{render_plan_table, render_report_table};
    use crate::report::{PromptResult, Report};

    #[test]
    fn report_table_lists_prompts_and_summary() {
        let report = Report {
            timestamp: Utc::now(),
            total_prompts: 1,
            passed_count: 0,
            failed_count: 1,
            threshold: 0.5,
            prompt_details: vec![PromptResult::from_score("orthogonal", 1.0, 0.5)],
        };
        let rendered = render_report_table(&report);
        assert!(rendered.contains("orthogonal"));
        assert!(rendered.contains("1.0000"));
        assert!(rendered.contains("0/1 prompts passed (threshold 0.5000"));
    }

    #[test]
    fn plan_table_shows_policy() {
        let rendered = render_plan_table(&Config::default());
        assert!(rendered.contains("gpt-4"));
        assert!(rendered.contains("suite.json"));
        assert!(rendered.contains("0.050"));
        assert!(rendered.contains("disabled"));
    }
}
