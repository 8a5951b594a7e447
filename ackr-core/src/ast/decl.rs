//! Function declarations and built-in operators.

use lasso::Spur;
use smallvec::SmallVec;
use std::fmt;

use crate::sort::SortId;

/// Interned function declaration identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeclId(pub u32);

impl DeclId {
    /// Get the raw index.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Built-in operators with a fixed theory interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Boolean negation.
    Not,
    /// N-ary conjunction.
    And,
    /// N-ary disjunction.
    Or,
    /// Exclusive or.
    Xor,
    /// Implication.
    Implies,
    /// If-then-else over any sort.
    Ite,
    /// Equality over any sort.
    Eq,
    /// Pairwise disequality over any sort.
    Distinct,
    /// Integer negation.
    Neg,
    /// Integer addition.
    Add,
    /// Integer subtraction.
    Sub,
    /// Integer multiplication.
    Mul,
    /// Integer less-than.
    Lt,
    /// Integer less-or-equal.
    Le,
    /// Integer greater-than.
    Gt,
    /// Integer greater-or-equal.
    Ge,
    /// Bitwise not.
    BvNot,
    /// Two's complement negation.
    BvNeg,
    /// Bitwise and.
    BvAnd,
    /// Bitwise or.
    BvOr,
    /// Bitwise xor.
    BvXor,
    /// Modular addition.
    BvAdd,
    /// Modular subtraction.
    BvSub,
    /// Modular multiplication.
    BvMul,
    /// Unsigned less-than.
    BvUlt,
    /// Unsigned less-or-equal.
    BvUle,
}

/// Shape of the arguments an operator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Signature {
    /// All arguments Boolean.
    Bool,
    /// All arguments integers.
    Int,
    /// All arguments the same bit-vector sort.
    BitVec,
    /// All arguments the same sort.
    Same,
    /// Boolean condition followed by two branches of the same sort.
    Ite,
}

impl Op {
    /// SMT-LIB symbol of this operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Op::Not => "not",
            Op::And => "and",
            Op::Or => "or",
            Op::Xor => "xor",
            Op::Implies => "=>",
            Op::Ite => "ite",
            Op::Eq => "=",
            Op::Distinct => "distinct",
            Op::Neg => "-",
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Lt => "<",
            Op::Le => "<=",
            Op::Gt => ">",
            Op::Ge => ">=",
            Op::BvNot => "bvnot",
            Op::BvNeg => "bvneg",
            Op::BvAnd => "bvand",
            Op::BvOr => "bvor",
            Op::BvXor => "bvxor",
            Op::BvAdd => "bvadd",
            Op::BvSub => "bvsub",
            Op::BvMul => "bvmul",
            Op::BvUlt => "bvult",
            Op::BvUle => "bvule",
        }
    }

    /// Accepted number of arguments as `(min, max)`.
    #[must_use]
    pub const fn arity(self) -> (usize, Option<usize>) {
        match self {
            Op::Not | Op::Neg | Op::BvNot | Op::BvNeg => (1, Some(1)),
            Op::Ite => (3, Some(3)),
            Op::And | Op::Or | Op::Add | Op::Mul => (1, None),
            Op::Distinct => (2, None),
            _ => (2, Some(2)),
        }
    }

    /// Whether the result is Boolean regardless of the argument sorts.
    #[must_use]
    pub const fn is_predicate(self) -> bool {
        matches!(
            self,
            Op::Not
                | Op::And
                | Op::Or
                | Op::Xor
                | Op::Implies
                | Op::Eq
                | Op::Distinct
                | Op::Lt
                | Op::Le
                | Op::Gt
                | Op::Ge
                | Op::BvUlt
                | Op::BvUle
        )
    }

    pub(crate) const fn signature(self) -> Signature {
        match self {
            Op::Not | Op::And | Op::Or | Op::Xor | Op::Implies => Signature::Bool,
            Op::Neg | Op::Add | Op::Sub | Op::Mul | Op::Lt | Op::Le | Op::Gt | Op::Ge => {
                Signature::Int
            }
            Op::Ite => Signature::Ite,
            Op::Eq | Op::Distinct => Signature::Same,
            _ => Signature::BitVec,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Whether a declaration is a user symbol or a built-in operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    /// User symbol; its meaning comes only from a model.
    Uninterpreted,
    /// Built-in operator.
    Interpreted(Op),
}

/// A function declaration: name, signature and interpretation kind.
///
/// Constants are 0-ary declarations. Built-in operators get one declaration
/// per concrete argument-sort tuple, so rebuilding an application over
/// argument values of the same sorts reuses the same declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FuncDecl {
    /// Interned symbol name.
    pub name: Spur,
    /// Argument sorts.
    pub domain: SmallVec<[SortId; 4]>,
    /// Result sort.
    pub range: SortId,
    /// Interpretation kind.
    pub kind: DeclKind,
}

impl FuncDecl {
    /// Number of arguments.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.domain.len()
    }

    /// Whether this is a user symbol.
    #[must_use]
    pub fn is_uninterpreted(&self) -> bool {
        self.kind == DeclKind::Uninterpreted
    }

    /// The built-in operator, if any.
    #[must_use]
    pub fn op(&self) -> Option<Op> {
        match self.kind {
            DeclKind::Interpreted(op) => Some(op),
            DeclKind::Uninterpreted => None,
        }
    }
}
