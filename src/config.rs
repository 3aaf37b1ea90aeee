use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "driftdune.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub alerts: AlertsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolicyConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_baseline")]
    pub baseline: String,
    #[serde(default = "default_prompt_suite")]
    pub prompt_suite: String,
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    #[serde(default = "default_apply_path")]
    pub apply_path: String,
    #[serde(default = "default_detect_path")]
    pub detect_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AlertsConfig {
    /// Empty disables alerting.
    #[serde(default)]
    pub webhook: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub prompt_suite: Option<String>,
    pub alert_threshold: Option<f64>,
    pub webhook: Option<String>,
    pub apply_path: Option<String>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        PathBuf::from(DEFAULT_CONFIG_FILE)
    }

    /// Falls back to defaults when the file does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(suite) = overrides.prompt_suite {
            self.policy.prompt_suite = suite;
        }
        if let Some(threshold) = overrides.alert_threshold {
            self.policy.alert_threshold = threshold;
        }
        if let Some(webhook) = overrides.webhook {
            self.alerts.webhook = webhook;
        }
        if let Some(path) = overrides.apply_path {
            self.report.apply_path = path;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.policy.alert_threshold.is_finite() {
            bail!(
                "alert_threshold must be a finite number, got {}",
                self.policy.alert_threshold
            );
        }
        Ok(())
    }

    /// Refuses to overwrite an existing policy file.
    pub fn write_template(path: &Path) -> Result<()> {
        if path.exists() {
            bail!("{} already exists", path.display());
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed creating config directory: {}", parent.display())
                })?;
            }
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn webhook(&self) -> Option<&str> {
        let trimmed = self.alerts.webhook.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub fn webhook_timeout(&self) -> Option<Duration> {
        self.alerts.timeout_secs.map(Duration::from_secs)
    }

    pub fn resolved_suite_path(&self) -> PathBuf {
        expand_tilde(&self.policy.prompt_suite)
    }

    pub fn resolved_apply_path(&self) -> PathBuf {
        expand_tilde(&self.report.apply_path)
    }

    pub fn resolved_detect_path(&self) -> PathBuf {
        expand_tilde(&self.report.detect_path)
    }

    pub fn default_template() -> String {
        let template = r#"# DriftDune policy
[policy]
model = "gpt-4"
baseline = "gpt-3.5"
prompt_suite = "suite.json"
alert_threshold = 0.05

[report]
apply_path = "apply_report.json"
detect_path = "report.json"

[alerts]
# Chat webhook receiving {"text": ...}; leave empty to disable alerts.
webhook = ""
# timeout_secs = 10
"#;
        template.to_string()
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            baseline: default_baseline(),
            prompt_suite: default_prompt_suite(),
            alert_threshold: default_alert_threshold(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            apply_path: default_apply_path(),
            detect_path: default_detect_path(),
        }
    }
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_baseline() -> String {
    "gpt-3.5".to_string()
}

fn default_prompt_suite() -> String {
    "suite.json".to_string()
}

fn default_alert_threshold() -> f64 {
    0.05
}

fn default_apply_path() -> String {
    "apply_report.json".to_string()
}

fn default_detect_path() -> String {
    "report.json".to_string()
}
