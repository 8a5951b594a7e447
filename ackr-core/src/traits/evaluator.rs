//! Theory Evaluator Trait.
//!
//! The seam between model reconstruction and theory reasoning: whoever checks
//! a model hands every interpreted application, with its arguments already
//! replaced by literal values, to a [`TheoryEvaluator`].

use crate::error::Result;
use crate::{TermId, TermManager};

/// Folds ground interpreted applications to literal values.
pub trait TheoryEvaluator {
    /// Name of this evaluator (e.g., "ground", "bv").
    fn name(&self) -> &str;

    /// Evaluate `term`, an interpreted application whose arguments are all
    /// literal values, to a literal value.
    ///
    /// Implementations may intern new value terms in `tm` but must not rely
    /// on any term outside `term`'s own sub-graph.
    fn evaluate(&mut self, term: TermId, tm: &mut TermManager) -> Result<TermId>;
}

impl<T: TheoryEvaluator + ?Sized> TheoryEvaluator for &mut T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn evaluate(&mut self, term: TermId, tm: &mut TermManager) -> Result<TermId> {
        (**self).evaluate(term, tm)
    }
}

impl<T: TheoryEvaluator + ?Sized> TheoryEvaluator for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn evaluate(&mut self, term: TermId, tm: &mut TermManager) -> Result<TermId> {
        (**self).evaluate(term, tm)
    }
}
