pub mod alert;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod metric;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod suite;
pub mod vectors;

pub use error::DriftError;
