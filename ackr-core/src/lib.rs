//! Ackr Core - Terms, Sorts and Ground Evaluation
//!
//! This crate provides the foundational types the Ackermann model constructor
//! works over:
//! - Hash-consed terms with efficient [`TermId`] references
//! - Interned function declarations ([`DeclId`]) and sorts ([`SortId`])
//! - The [`TheoryEvaluator`] seam and a [`GroundEvaluator`] for Booleans,
//!   integers and bit-vectors
//!
//! # Examples
//!
//! ## Creating Terms
//!
//! ```
//! use ackr_core::TermManager;
//!
//! let mut tm = TermManager::new();
//! let int = tm.sorts.int_sort;
//!
//! let f = tm.declare_fun("f", &[int], int);
//! let a = tm.declare_const("a", int);
//! let a = tm.mk_const(a).unwrap();
//!
//! // Building the same application twice yields the same id
//! let fa = tm.mk_app(f, &[a]).unwrap();
//! assert_eq!(fa, tm.mk_app(f, &[a]).unwrap());
//! ```
//!
//! ## Folding Ground Terms
//!
//! ```
//! use ackr_core::{GroundEvaluator, Op, TermManager, TheoryEvaluator};
//!
//! let mut tm = TermManager::new();
//! let two = tm.mk_int(2);
//! let three = tm.mk_int(3);
//! let sum = tm.mk_interp(Op::Add, &[two, three]).unwrap();
//!
//! let five = GroundEvaluator::new().evaluate(sum, &mut tm).unwrap();
//! assert_eq!(five, tm.mk_int(5));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod ast;
pub mod error;
pub mod sort;
pub mod theory_eval;
pub mod traits;

pub use ast::{DeclId, DeclKind, FuncDecl, Op, Term, TermDisplay, TermId, TermKind, TermManager};
pub use error::{Error, Result};
pub use sort::{Sort, SortId, SortKind, SortManager};
pub use theory_eval::{GroundEvaluator, GroundEvaluatorStats};
pub use traits::TheoryEvaluator;
