//! Property-based tests for ackr-solver
//!
//! Congruence checking against a brute-force oracle, plus determinism,
//! memoization and completion of the model constructor.

mod congruence_properties;
mod model_properties;
