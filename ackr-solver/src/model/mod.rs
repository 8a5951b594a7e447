//! Models for Ackermann-based solving.
//!
//! [`Model`] is what the solver returns for the abstracted formula;
//! [`ConstructedModel`] is what congruence checking recovers for the
//! original one.

pub mod abstract_model;
pub mod constructed;

pub use abstract_model::Model;
pub use constructed::{ConstructedModel, FuncInterp};
