//! Ackr Solver - Model Reconstruction for Lazy Ackermannization
//!
//! Ackermannization replaces every application of an uninterpreted function
//! by a fresh constant and solves the function-free result. The model that
//! comes back may violate function congruence, since the abstraction forgot
//! that equal arguments force equal results. This crate checks such a model
//! against the original terms and either reconstructs a model of the
//! original formula or reports the colliding applications.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use ackr_core::{GroundEvaluator, TermManager};
//! use ackr_solver::{AckrInfo, Model, ModelConstructor};
//!
//! let mut tm = TermManager::new();
//! let int = tm.sorts.int_sort;
//! let f = tm.declare_fun("f", &[int], int);
//! let a = tm.declare_const("a", int);
//! let b = tm.declare_const("b", int);
//! let a_term = tm.mk_const(a).unwrap();
//! let b_term = tm.mk_const(b).unwrap();
//! let fa = tm.mk_app(f, &[a_term]).unwrap();
//! let fb = tm.mk_app(f, &[b_term]).unwrap();
//!
//! let mut info = AckrInfo::new();
//! let c_fa = info.abstract_app(&mut tm, fa).unwrap();
//! let c_fb = info.abstract_app(&mut tm, fb).unwrap();
//!
//! // a = b, but f(a) and f(b) were given different values
//! let one = tm.mk_int(1);
//! let five = tm.mk_int(5);
//! let seven = tm.mk_int(7);
//! let mut model = Model::new();
//! model.set(a, one);
//! model.set(b, one);
//! model.set(ackr_solver::const_decl_of(&tm, c_fa).unwrap(), five);
//! model.set(ackr_solver::const_decl_of(&tm, c_fb).unwrap(), seven);
//!
//! let mut constructor = ModelConstructor::new(Arc::new(info));
//! let ok = constructor
//!     .check(&mut tm, &model, &mut GroundEvaluator::new())
//!     .unwrap();
//! assert!(!ok);
//! assert_eq!(constructor.conflicts()[0].as_pair(), (fa, fb));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod ackr;
pub mod model;

pub use ackr::{
    AckrInfo, CheckStatus, Conflict, ConflictPolicy, CongruenceTable, ModelConstructor,
    ModelConstructorConfig, ModelConstructorStats,
};
pub use model::{ConstructedModel, FuncInterp, Model};

use ackr_core::{DeclId, Result, TermId, TermManager};

/// Declaration of a constant term such as an Ackermann constant.
pub fn const_decl_of(tm: &TermManager, constant: TermId) -> Result<DeclId> {
    ackr::info::const_decl(tm, constant)
}
