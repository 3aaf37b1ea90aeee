pub mod csv;
pub mod table;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use crate::config::Config;
use crate::report::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn render_report(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(table::render_report_table(report)),
        OutputFormat::Json => render_json(report),
        OutputFormat::Csv => csv::report_to_csv(report),
    }
}

/// Resolved policy as (setting, value) pairs, in display order.
pub fn plan_rows(config: &Config) -> Vec<(&'static str, String)> {
    let alerts = if config.webhook().is_some() {
        "webhook"
    } else {
        "disabled"
    };
    vec![
        ("Model", config.policy.model.clone()),
        ("Baseline", config.policy.baseline.clone()),
        ("Prompt Suite", config.policy.prompt_suite.clone()),
        ("Threshold", format!("{:.3}", config.policy.alert_threshold)),
        ("Alerts", alerts.to_string()),
        ("Report", config.report.apply_path.clone()),
    ]
}
