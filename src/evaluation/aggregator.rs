use chrono::Utc;
use tracing::error;

use crate::error::DriftError;
use crate::evaluation::evaluate_prompt;
use crate::report::Report;
use crate::suite::PromptSpec;
use crate::vectors::VectorStore;

/// Evaluates the suite in order. The first failing prompt aborts the run and
/// no partial report is returned.
pub fn aggregate(
    store: &dyn VectorStore,
    specs: &[PromptSpec],
    threshold: f64,
) -> Result<Report, DriftError> {
    let timestamp = Utc::now();
    let mut prompt_details = Vec::with_capacity(specs.len());
    let mut passed_count = 0usize;
    let mut failed_count = 0usize;

    for spec in specs {
        let result = evaluate_prompt(store, spec, threshold)
            .inspect_err(|err| error!(prompt = %spec.name, "drift evaluation failed: {err}"))?;
        if result.passed {
            passed_count += 1;
        } else {
            failed_count += 1;
        }
        prompt_details.push(result);
    }

    Ok(Report {
        timestamp,
        total_prompts: prompt_details.len(),
        passed_count,
        failed_count,
        threshold,
        prompt_details,
    })
}
