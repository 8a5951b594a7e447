//! Error types.
//!
//! Everything here is a defect in the input handed to this crate: a term that
//! is not ground, a model entry that is not a literal, an application that was
//! never abstracted. Congruence conflicts are not errors and never show up
//! here.

use crate::ast::{DeclId, TermId};
use crate::sort::SortId;
use thiserror::Error;

/// Result type for term graph and model construction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the term graph, the theory evaluator and the model
/// constructor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A term id that the term manager never produced.
    #[error("unknown term {0:?}")]
    UnknownTerm(TermId),

    /// A declaration id that the term manager never produced.
    #[error("unknown declaration {0:?}")]
    UnknownDecl(DeclId),

    /// A sort id that the sort manager never produced.
    #[error("unknown sort {0:?}")]
    UnknownSort(SortId),

    /// Application built with the wrong number of arguments.
    #[error("arity mismatch for `{symbol}`: expected {expected}, found {found}")]
    ArityMismatch {
        /// Symbol being applied.
        symbol: String,
        /// Arity of the declaration.
        expected: usize,
        /// Number of supplied arguments.
        found: usize,
    },

    /// Application built with an argument of the wrong sort.
    #[error("sort mismatch for `{symbol}`: expected {expected:?}, found {found:?}")]
    SortMismatch {
        /// Symbol being applied.
        symbol: String,
        /// Sort required at this position.
        expected: SortId,
        /// Sort of the supplied argument.
        found: SortId,
    },

    /// Operator applied to a sort outside its theory.
    #[error("`{symbol}` does not accept arguments of sort {found:?}")]
    InvalidSort {
        /// Symbol being applied.
        symbol: String,
        /// Sort of the rejected argument.
        found: SortId,
    },

    /// A bound variable or quantifier reached a ground-only procedure.
    #[error("term {term:?} is not ground and quantifier-free")]
    NonGround {
        /// Offending term.
        term: TermId,
    },

    /// Evaluation produced something other than a literal value.
    #[error("evaluation of {term:?} produced non-literal {result:?}")]
    NotAValue {
        /// Term being evaluated.
        term: TermId,
        /// What it evaluated to.
        result: TermId,
    },

    /// An uninterpreted application has no Ackermann constant.
    #[error("application {term:?} has no abstraction constant")]
    MissingAbstraction {
        /// Offending application.
        term: TermId,
    },

    /// The theory evaluator cannot fold this application.
    #[error("cannot evaluate {term:?}: {reason}")]
    Unsupported {
        /// Offending application.
        term: TermId,
        /// Why folding failed.
        reason: String,
    },
}

impl Error {
    /// Build an [`Error::Unsupported`].
    pub fn unsupported(term: TermId, reason: impl Into<String>) -> Self {
        Self::Unsupported {
            term,
            reason: reason.into(),
        }
    }

    /// Whether this error means the input was not ground.
    #[must_use]
    pub fn is_non_ground(&self) -> bool {
        matches!(self, Self::NonGround { .. })
    }
}
