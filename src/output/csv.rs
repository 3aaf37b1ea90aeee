use anyhow::Result;

use crate::config::Config;
use crate::output::plan_rows;
use crate::report::Report;

pub fn report_to_csv(report: &Report) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["name", "drift_score", "passed"])?;
    for result in &report.prompt_details {
        writer.write_record([
            result.name.clone(),
            format!("{:.4}", result.drift_score),
            result.passed.to_string(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn plan_to_csv(config: &Config) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["setting", "value"])?;
    for (setting, value) in plan_rows(config) {
        writer.write_record([setting, value.as_str()])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}
