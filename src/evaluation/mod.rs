pub mod aggregator;
pub mod evaluator;

pub use aggregator::aggregate;
pub use evaluator::evaluate_prompt;
