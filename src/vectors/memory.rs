use std::collections::HashMap;

use crate::error::DriftError;
use crate::vectors::{Vector, VectorStore};

/// In-process vector source keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct MemoryVectorStore {
    vectors: HashMap<String, Vector>,
}

impl MemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, identifier: impl Into<String>, vector: Vector) {
        self.vectors.insert(identifier.into(), vector);
    }

    pub fn with(mut self, identifier: impl Into<String>, vector: Vector) -> Self {
        self.insert(identifier, vector);
        self
    }
}

impl VectorStore for MemoryVectorStore {
    fn load(&self, identifier: &str) -> Result<Vector, DriftError> {
        self.vectors
            .get(identifier)
            .cloned()
            .ok_or_else(|| DriftError::NotFound {
                identifier: identifier.to_string(),
                reason: "not present in memory store".to_string(),
            })
    }
}
