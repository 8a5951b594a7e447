//! Trait-Based Architecture.
//!
//! Traits at the boundaries between the term graph and the procedures that
//! consume it.

pub mod evaluator;

pub use evaluator::TheoryEvaluator;
