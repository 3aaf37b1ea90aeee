use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::expand_tilde;
use crate::error::DriftError;
use crate::vectors::{Vector, VectorStore};

/// Reads vectors stored as JSON arrays of numbers, one file per vector.
#[derive(Debug, Clone, Default)]
pub struct FileVectorStore {
    root: Option<PathBuf>,
}

impl FileVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Relative identifiers resolve against `root` instead of the working directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    pub fn resolve(&self, identifier: &str) -> PathBuf {
        let path = expand_tilde(identifier);
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path,
        }
    }
}

impl VectorStore for FileVectorStore {
    fn load(&self, identifier: &str) -> Result<Vector, DriftError> {
        let path = self.resolve(identifier);
        let data = fs::read(&path).map_err(|err| DriftError::NotFound {
            identifier: identifier.to_string(),
            reason: describe_read_error(&path, &err),
        })?;
        let vector: Vector =
            serde_json::from_slice(&data).map_err(|err| DriftError::Parse {
                identifier: identifier.to_string(),
                reason: err.to_string(),
            })?;
        debug!(path = %path.display(), dims = vector.len(), "loaded vector");
        Ok(vector)
    }
}

fn describe_read_error(path: &Path, err: &std::io::Error) -> String {
    match err.kind() {
        ErrorKind::NotFound => format!("no such file: {}", path.display()),
        _ => format!("{}: {err}", path.display()),
    }
}
