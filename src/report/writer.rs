use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::error::DriftError;

/// Writes any report as indented JSON, creating parent directories as needed.
pub fn write_report<T: Serialize + ?Sized>(report: &T, path: &Path) -> Result<(), DriftError> {
    let write_err = |source: io::Error| DriftError::Write {
        path: path.to_path_buf(),
        source,
    };
    let body = serde_json::to_string_pretty(report).map_err(|err| write_err(err.into()))?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }
    fs::write(path, body).map_err(write_err)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::{TimeZone, Utc};

    use crate::error::DriftError;
    use crate::report::{write_report, PromptResult, Report};

    fn sample_report() -> Report {
        Report {
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            total_prompts: 2,
            passed_count: 1,
            failed_count: 1,
            threshold: 0.05,
            prompt_details: vec![
                PromptResult {
                    name: "summarize".to_string(),
                    drift_score: 0.01,
                    passed: true,
                },
                PromptResult {
                    name: "classify".to_string(),
                    drift_score: 1.0,
                    passed: false,
                },
            ],
        }
    }

    #[test]
    fn writes_fields_in_declared_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out").join("apply_report.json");
        write_report(&sample_report(), &path).expect("write report");

        let text = fs::read_to_string(&path).expect("read back");
        let keys = [
            "\"timestamp\"",
            "\"total_prompts\"",
            "\"passed_count\"",
            "\"failed_count\"",
            "\"threshold\"",
            "\"prompt_details\"",
        ];
        let positions: Vec<usize> = keys
            .iter()
            .map(|k| text.find(k).unwrap_or_else(|| panic!("missing {k}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(text.contains("\"timestamp\": \"2024-05-01T12:00:00Z\""));
        assert!(text.contains("\n  \"total_prompts\": 2"));

        let parsed: Report = serde_json::from_str(&text).expect("parse back");
        assert_eq!(parsed, sample_report());
    }

    #[test]
    fn io_failure_is_write_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").expect("write blocker");

        let err = write_report(&sample_report(), &blocker.join("report.json")).unwrap_err();
        assert!(matches!(err, DriftError::Write { .. }));
    }
}
