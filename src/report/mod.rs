pub mod writer;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metric::round_score;

pub use writer::write_report;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptResult {
    pub name: String,
    pub drift_score: f64,
    pub passed: bool,
}

impl PromptResult {
    /// Classifies on the raw score; only the stored score is rounded.
    pub fn from_score(name: impl Into<String>, score: f64, threshold: f64) -> Self {
        Self {
            name: name.into(),
            drift_score: round_score(score),
            passed: score <= threshold,
        }
    }
}

/// Outcome of one `apply` run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub timestamp: DateTime<Utc>,
    pub total_prompts: usize,
    pub passed_count: usize,
    pub failed_count: usize,
    pub threshold: f64,
    pub prompt_details: Vec<PromptResult>,
}

impl Report {
    pub fn has_failures(&self) -> bool {
        self.failed_count > 0
    }

    pub fn failed_prompts(&self) -> impl Iterator<Item = &PromptResult> {
        self.prompt_details.iter().filter(|r| !r.passed)
    }
}

/// Outcome of a single-pair `detect` run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectReport {
    pub drift_score: f64,
    pub timestamp: DateTime<Utc>,
}
