use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One prompt of a suite: a name plus the identifiers of its two vectors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptSpec {
    pub name: String,
    pub baseline: String,
    pub current: String,
}

impl PromptSpec {
    pub fn new(
        name: impl Into<String>,
        baseline: impl Into<String>,
        current: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            baseline: baseline.into(),
            current: current.into(),
        }
    }
}

/// Reads a suite file: a JSON array of prompt specs, kept in file order.
pub fn load_suite(path: &Path) -> Result<Vec<PromptSpec>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed reading prompt suite: {}", path.display()))?;
    let specs: Vec<PromptSpec> = serde_json::from_str(&data)
        .with_context(|| format!("failed parsing prompt suite: {}", path.display()))?;
    Ok(specs)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{load_suite, PromptSpec};

    #[test]
    fn loads_suite_in_file_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("suite.json");
        fs::write(
            &path,
            r#"[
                {"name": "summarize", "baseline": "b/summarize.json", "current": "c/summarize.json"},
                {"name": "classify", "baseline": "b/classify.json", "current": "c/classify.json"}
            ]"#,
        )
        .expect("write suite");

        let specs = load_suite(&path).expect("load suite");
        assert_eq!(
            specs,
            vec![
                PromptSpec::new("summarize", "b/summarize.json", "c/summarize.json"),
                PromptSpec::new("classify", "b/classify.json", "c/classify.json"),
            ]
        );
    }

    #[test]
    fn rejects_missing_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("suite.json");
        fs::write(&path, r#"[{"name": "x", "baseline": "b.json"}]"#).expect("write suite");

        let err = load_suite(&path).unwrap_err();
        assert!(err.to_string().contains("failed parsing prompt suite"));
    }
}
