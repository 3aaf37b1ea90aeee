use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use tracing::{error, info};

use crate::alert::AlertDispatcher;
use crate::config::Config;
use crate::error::DriftError;
use crate::evaluation::aggregate;
use crate::metric::cosine_distance;
use crate::report::{write_report, DetectReport, Report};
use crate::suite::load_suite;
use crate::vectors::VectorStore;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FATAL: u8 = 1;
/// The report was written but the alert could not be delivered.
pub const EXIT_ALERT_FAILED: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub number: u8,
    pub total: u8,
    pub name: &'static str,
}

impl Stage {
    pub const LOAD_CONFIG: Stage = Stage::apply(1, "load config");
    pub const LOAD_SUITE: Stage = Stage::apply(2, "load prompt suite");
    pub const ANALYZE: Stage = Stage::apply(3, "drift analysis");
    pub const SEND_ALERT: Stage = Stage::apply(4, "send alert");
    pub const WRITE_REPORT: Stage = Stage::apply(5, "write report");

    pub const READ_BASELINE: Stage = Stage::detect(1, "read baseline vector");
    pub const READ_CURRENT: Stage = Stage::detect(2, "read current vector");
    pub const COMPUTE_DRIFT: Stage = Stage::detect(3, "compute drift score");
    pub const WRITE_DETECT_REPORT: Stage = Stage::detect(4, "write report");

    const fn apply(number: u8, name: &'static str) -> Self {
        Self {
            number,
            total: 5,
            name,
        }
    }

    const fn detect(number: u8, name: &'static str) -> Self {
        Self {
            number,
            total: 4,
            name,
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "stage {}/{} ({})", self.number, self.total, self.name)
    }
}

pub fn start_stage(stage: Stage) {
    info!("{stage} started");
}

/// Logs the stage outcome and tags failures with the stage for the operator.
pub fn finish_stage<T>(stage: Stage, result: Result<T>) -> Result<T> {
    match result {
        Ok(value) => {
            info!("{stage} succeeded");
            Ok(value)
        }
        Err(err) => {
            error!("{stage} failed: {err:#}");
            Err(err.context(format!("{stage} failed")))
        }
    }
}

#[derive(Debug)]
pub enum AlertOutcome {
    NoFailures,
    Disabled,
    Delivered { attempts: u32 },
    Failed(DriftError),
}

#[derive(Debug)]
pub struct ApplyOutcome {
    pub report: Report,
    pub report_path: PathBuf,
    pub alert: AlertOutcome,
}

impl ApplyOutcome {
    pub fn alert_failed(&self) -> bool {
        matches!(self.alert, AlertOutcome::Failed(_))
    }

    /// Process status for a run that produced its report. Fatal errors never
    /// reach an outcome and exit with [`EXIT_FATAL`].
    pub fn exit_code(&self) -> u8 {
        if self.alert_failed() {
            EXIT_ALERT_FAILED
        } else {
            EXIT_SUCCESS
        }
    }
}

/// Suite → analysis → optional alert → report. Alert delivery failure is
/// recorded in the outcome and does not stop the report from being written;
/// every other failure aborts the run.
pub async fn run_apply(
    config: &Config,
    store: &dyn VectorStore,
    dispatcher: Option<&AlertDispatcher>,
) -> Result<ApplyOutcome> {
    start_stage(Stage::LOAD_SUITE);
    let specs = finish_stage(Stage::LOAD_SUITE, load_suite(&config.resolved_suite_path()))?;
    info!(prompts = specs.len(), "prompt suite loaded");

    start_stage(Stage::ANALYZE);
    let threshold = config.policy.alert_threshold;
    let report = finish_stage(
        Stage::ANALYZE,
        aggregate(store, &specs, threshold).map_err(Into::into),
    )?;
    info!(
        passed = report.passed_count,
        failed = report.failed_count,
        "drift analysis complete"
    );

    let alert = match (report.has_failures(), dispatcher) {
        (false, _) => {
            info!("{} skipped: no prompts exceeded the threshold", Stage::SEND_ALERT);
            AlertOutcome::NoFailures
        }
        (true, None) => {
            info!("{} skipped: no webhook configured", Stage::SEND_ALERT);
            AlertOutcome::Disabled
        }
        (true, Some(dispatcher)) => {
            start_stage(Stage::SEND_ALERT);
            match dispatcher.dispatch(&report).await {
                Ok(attempts) => {
                    info!("{} succeeded", Stage::SEND_ALERT);
                    AlertOutcome::Delivered { attempts }
                }
                Err(err) => {
                    error!("{} failed: {err}", Stage::SEND_ALERT);
                    AlertOutcome::Failed(err)
                }
            }
        }
    };

    start_stage(Stage::WRITE_REPORT);
    let report_path = config.resolved_apply_path();
    finish_stage(
        Stage::WRITE_REPORT,
        write_report(&report, &report_path).map_err(Into::into),
    )?;

    Ok(ApplyOutcome {
        report,
        report_path,
        alert,
    })
}

/// Single-pair comparison written as `{drift_score, timestamp}`.
pub fn run_detect(
    store: &dyn VectorStore,
    baseline: &str,
    current: &str,
    out_path: &Path,
) -> Result<DetectReport> {
    start_stage(Stage::READ_BASELINE);
    let baseline = finish_stage(Stage::READ_BASELINE, store.load(baseline).map_err(Into::into))?;

    start_stage(Stage::READ_CURRENT);
    let current = finish_stage(Stage::READ_CURRENT, store.load(current).map_err(Into::into))?;

    start_stage(Stage::COMPUTE_DRIFT);
    let drift_score = finish_stage(
        Stage::COMPUTE_DRIFT,
        cosine_distance(&baseline, &current).map_err(Into::into),
    )?;
    info!("drift_score={drift_score:.4}");

    let report = DetectReport {
        drift_score,
        timestamp: Utc::now(),
    };
    start_stage(Stage::WRITE_DETECT_REPORT);
    finish_stage(
        Stage::WRITE_DETECT_REPORT,
        write_report(&report, out_path).map_err(Into::into),
    )?;
    Ok(report)
}
