//! Property-based tests for ackr-core
//!
//! Hash-consing of the term graph and agreement of the ground evaluator
//! with machine arithmetic.

mod ast_properties;
mod evaluator_properties;
