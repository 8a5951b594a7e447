//! Abstract Model.
//!
//! The satisfying assignment of the Ackermannized (function-free) formula:
//! one literal value per constant, Ackermann constants included. Nothing in
//! it is known to respect function congruence yet.

use ackr_core::{DeclId, Error, Result, SortId, SortKind, TermId, TermManager};
use rustc_hash::FxHashMap;

/// Constant interpretations of an abstracted formula.
///
/// Constants are enumerated in the order they were first assigned, so every
/// traversal seeded from a model is deterministic.
#[derive(Debug, Clone, Default)]
pub struct Model {
    order: Vec<DeclId>,
    interps: FxHashMap<DeclId, TermId>,
}

impl Model {
    /// Create an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `value` to the constant `decl`, replacing any earlier value.
    pub fn set(&mut self, decl: DeclId, value: TermId) {
        if self.interps.insert(decl, value).is_none() {
            self.order.push(decl);
        }
    }

    /// Interpretation of a constant, if assigned.
    #[must_use]
    pub fn get_const_interp(&self, decl: DeclId) -> Option<TermId> {
        self.interps.get(&decl).copied()
    }

    /// Interpretation of a constant, completed with [`Model::some_value`]
    /// when unassigned. The model itself is not extended.
    pub fn const_interp_or_some(&self, tm: &mut TermManager, decl: DeclId) -> Result<TermId> {
        match self.get_const_interp(decl) {
            Some(value) => Ok(value),
            None => {
                let sort = tm.decl(decl)?.range;
                Self::some_value(tm, sort)
            }
        }
    }

    /// Assigned constants in assignment order.
    pub fn constants(&self) -> impl Iterator<Item = DeclId> + '_ {
        self.order.iter().copied()
    }

    /// The `i`-th assigned constant.
    #[must_use]
    pub fn get_constant(&self, i: usize) -> Option<DeclId> {
        self.order.get(i).copied()
    }

    /// Number of assigned constants.
    #[must_use]
    pub fn num_constants(&self) -> usize {
        self.order.len()
    }

    /// Whether no constant is assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// An arbitrary but fixed value of `sort`.
    ///
    /// The choice depends only on the sort: `false`, `0`, the all-zero
    /// bit-vector, or the first element of an uninterpreted sort.
    pub fn some_value(tm: &mut TermManager, sort: SortId) -> Result<TermId> {
        let kind = tm
            .sorts
            .get(sort)
            .map(|s| s.kind.clone())
            .ok_or(Error::UnknownSort(sort))?;
        Ok(match kind {
            SortKind::Bool => tm.mk_false(),
            SortKind::Int => tm.mk_int(0),
            SortKind::BitVec(width) => tm.mk_bitvec(0u32, width),
            SortKind::Uninterpreted(_) => tm.mk_model_value(sort, 0),
        })
    }
}
