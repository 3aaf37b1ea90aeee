use serde::{Deserialize, Serialize};

use crate::report::Report;

/// Chat-webhook payload: a single `text` field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlertMessage {
    pub text: String,
}

impl AlertMessage {
    pub fn from_report(report: &Report) -> Self {
        let names = report
            .failed_prompts()
            .map(|r| r.name.as_str())
            .collect::<Vec<_>>();
        let text = format!(
            "DriftDune Alert: {}/{} prompts exceeded threshold {:.4}:\n• {}",
            report.failed_count,
            report.total_prompts,
            report.threshold,
            names.join("\n• ")
        );
        Self { text }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::alert::message::AlertMessage;
    use crate::report::{PromptResult, Report};

    #[test]
    fn lists_failing_prompts_in_report_order() {
        let report = Report {
            timestamp: Utc::now(),
            total_prompts: 3,
            passed_count: 1,
            failed_count: 2,
            threshold: 0.05,
            prompt_details: vec![
                PromptResult::from_score("translate", 0.3, 0.05),
                PromptResult::from_score("summarize", 0.01, 0.05),
                PromptResult::from_score("classify", 1.0, 0.05),
            ],
        };
        let message = AlertMessage::from_report(&report);
        assert_eq!(
            message.text,
            "DriftDune Alert: 2/3 prompts exceeded threshold 0.0500:\n• translate\n• classify"
        );
        assert_eq!(
            serde_json::to_value(&message).expect("serialize"),
            serde_json::json!({ "text": message.text })
        );
    }
}
