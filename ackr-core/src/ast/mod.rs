//! Abstract Syntax Tree for ground terms.
//!
//! Terms are hash-consed by [`TermManager`]: building the same term twice
//! yields the same [`TermId`], so structural sharing in a formula is sharing
//! of ids, and identity comparison is an integer comparison.

mod decl;
mod manager;

pub use decl::{DeclId, DeclKind, FuncDecl, Op};
pub use manager::{TermDisplay, TermManager};

use num_bigint::{BigInt, BigUint};
use smallvec::SmallVec;

use crate::sort::SortId;

/// Interned term identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TermId(pub u32);

impl TermId {
    /// Get the raw index.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// The shape of a term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TermKind {
    /// Boolean literal `true`.
    True,
    /// Boolean literal `false`.
    False,
    /// Integer literal.
    IntConst(BigInt),
    /// Bit-vector literal, `value < 2^width`.
    BitVecConst {
        /// Unsigned value.
        value: BigUint,
        /// Width in bits.
        width: u32,
    },
    /// Abstract element of an uninterpreted sort.
    ModelValue {
        /// Sort the element belongs to.
        sort: SortId,
        /// Index of the element within the sort's universe.
        index: u32,
    },
    /// Application of a declaration; 0-ary applications are constants.
    App {
        /// Applied declaration.
        decl: DeclId,
        /// Arguments, in order.
        args: SmallVec<[TermId; 4]>,
    },
    /// De Bruijn indexed bound variable.
    BoundVar {
        /// De Bruijn index.
        index: u32,
        /// Sort of the variable.
        sort: SortId,
    },
    /// Quantified formula.
    Quantifier {
        /// `true` for `forall`, `false` for `exists`.
        universal: bool,
        /// Sorts of the bound variables.
        sorts: SmallVec<[SortId; 2]>,
        /// Body.
        body: TermId,
    },
}

impl TermKind {
    /// Whether this is a literal value.
    #[must_use]
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            TermKind::True
                | TermKind::False
                | TermKind::IntConst(_)
                | TermKind::BitVecConst { .. }
                | TermKind::ModelValue { .. }
        )
    }

    /// Arguments of an application, empty for every other kind.
    #[must_use]
    pub fn args(&self) -> &[TermId] {
        match self {
            TermKind::App { args, .. } => args,
            _ => &[],
        }
    }
}

/// A node of the term graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// Identifier of this term.
    pub id: TermId,
    /// Shape of the term.
    pub kind: TermKind,
    /// Sort of the term.
    pub sort: SortId,
}

impl Term {
    /// Whether this is a literal value.
    #[must_use]
    pub fn is_value(&self) -> bool {
        self.kind.is_value()
    }
}
