use tracing::debug;

use crate::error::DriftError;
use crate::metric::cosine_distance;
use crate::report::PromptResult;
use crate::suite::PromptSpec;
use crate::vectors::VectorStore;

pub fn evaluate_prompt(
    store: &dyn VectorStore,
    spec: &PromptSpec,
    threshold: f64,
) -> Result<PromptResult, DriftError> {
    let baseline = store.load(&spec.baseline)?;
    let current = store.load(&spec.current)?;
    let score = cosine_distance(&baseline, &current)?;
    let result = PromptResult::from_score(spec.name.clone(), score, threshold);
    debug!(
        prompt = %spec.name,
        score,
        passed = result.passed,
        "evaluated prompt"
    );
    Ok(result)
}
