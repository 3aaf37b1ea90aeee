pub mod file;
pub mod memory;

use crate::error::DriftError;

pub use file::FileVectorStore;
pub use memory::MemoryVectorStore;

pub type Vector = Vec<f64>;

/// Source of embedding vectors addressed by a path-like identifier.
pub trait VectorStore {
    fn load(&self, identifier: &str) -> Result<Vector, DriftError>;
}
