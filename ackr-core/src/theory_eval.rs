//! Ground Theory Evaluation.
//!
//! Folds interpreted applications over literal arguments to literal values
//! for the Boolean, integer and bit-vector theories.
//!
//! ## Semantics
//!
//! - **Core**: `not`, `and`, `or`, `xor`, `=>`, `ite`, `=`, `distinct`
//! - **Integers**: arbitrary precision `-`, `+`, `*`, `<`, `<=`, `>`, `>=`
//! - **Bit-vectors**: modular arithmetic, bitwise operations and unsigned
//!   comparisons
//!
//! Equality of literals is identity of their hash-consed ids.
//!
//! ## References
//!
//! - Z3's `model/model_evaluator.cpp`

use num_bigint::{BigInt, BigUint};
use num_traits::One;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::trace;

use crate::ast::{Op, TermId, TermKind, TermManager};
use crate::error::{Error, Result};
use crate::traits::TheoryEvaluator;

/// Statistics for ground evaluation.
#[derive(Debug, Clone, Default)]
pub struct GroundEvaluatorStats {
    /// Applications folded.
    pub evaluations: u64,
    /// Boolean applications folded.
    pub bool_evaluations: u64,
    /// Integer applications folded.
    pub int_evaluations: u64,
    /// Bit-vector applications folded.
    pub bv_evaluations: u64,
}

/// Evaluator for ground Boolean, integer and bit-vector applications.
#[derive(Debug, Default)]
pub struct GroundEvaluator {
    stats: GroundEvaluatorStats,
}

impl GroundEvaluator {
    /// Create a new evaluator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get statistics.
    #[must_use]
    pub fn stats(&self) -> &GroundEvaluatorStats {
        &self.stats
    }

    /// Reset statistics.
    pub fn reset_stats(&mut self) {
        self.stats = GroundEvaluatorStats::default();
    }

    fn eval_bool(
        &mut self,
        term: TermId,
        op: Op,
        args: &[TermId],
        tm: &mut TermManager,
    ) -> Result<TermId> {
        self.stats.bool_evaluations += 1;
        let b = |i: usize| bool_arg(tm, term, args[i]);
        let value = match op {
            Op::Not => !b(0)?,
            Op::And => {
                let mut all = true;
                for i in 0..args.len() {
                    all &= b(i)?;
                }
                all
            }
            Op::Or => {
                let mut any = false;
                for i in 0..args.len() {
                    any |= b(i)?;
                }
                any
            }
            Op::Xor => b(0)? ^ b(1)?,
            Op::Implies => !b(0)? || b(1)?,
            Op::Ite => return Ok(if b(0)? { args[1] } else { args[2] }),
            Op::Eq => {
                literal_args(tm, term, args)?;
                args[0] == args[1]
            }
            Op::Distinct => {
                literal_args(tm, term, args)?;
                let mut seen = FxHashSet::default();
                args.iter().all(|a| seen.insert(*a))
            }
            _ => return Err(Error::unsupported(term, format!("`{op}` is not Boolean"))),
        };
        Ok(tm.mk_bool(value))
    }

    fn eval_int(
        &mut self,
        term: TermId,
        op: Op,
        args: &[TermId],
        tm: &mut TermManager,
    ) -> Result<TermId> {
        self.stats.int_evaluations += 1;
        let values = args
            .iter()
            .map(|&a| int_arg(tm, term, a))
            .collect::<Result<SmallVec<[BigInt; 4]>>>()?;

        let cmp = |f: fn(&BigInt, &BigInt) -> bool| f(&values[0], &values[1]);
        match op {
            Op::Neg => Ok(tm.mk_int(-&values[0])),
            Op::Add => Ok(tm.mk_int(values.iter().sum::<BigInt>())),
            Op::Sub => Ok(tm.mk_int(&values[0] - &values[1])),
            Op::Mul => Ok(tm.mk_int(values.iter().product::<BigInt>())),
            Op::Lt => Ok(tm.mk_bool(cmp(|a, b| a < b))),
            Op::Le => Ok(tm.mk_bool(cmp(|a, b| a <= b))),
            Op::Gt => Ok(tm.mk_bool(cmp(|a, b| a > b))),
            Op::Ge => Ok(tm.mk_bool(cmp(|a, b| a >= b))),
            _ => Err(Error::unsupported(term, format!("`{op}` is not arithmetic"))),
        }
    }

    fn eval_bv(
        &mut self,
        term: TermId,
        op: Op,
        args: &[TermId],
        tm: &mut TermManager,
    ) -> Result<TermId> {
        self.stats.bv_evaluations += 1;
        let mut width = 0;
        let mut values: SmallVec<[BigUint; 2]> = SmallVec::new();
        for &arg in args {
            let (value, w) = tm
                .bv_value(arg)
                .ok_or_else(|| Error::unsupported(term, "operand is not a bit-vector literal"))?;
            width = w;
            values.push(value.clone());
        }
        let modulus = BigUint::one() << (width as usize);

        // mk_bitvec reduces modulo 2^width
        let result = match op {
            Op::BvNot => &modulus - BigUint::one() - &values[0],
            Op::BvNeg => &modulus - &values[0],
            Op::BvAnd => &values[0] & &values[1],
            Op::BvOr => &values[0] | &values[1],
            Op::BvXor => &values[0] ^ &values[1],
            Op::BvAdd => &values[0] + &values[1],
            Op::BvSub => &values[0] + &modulus - &values[1],
            Op::BvMul => &values[0] * &values[1],
            Op::BvUlt => return Ok(tm.mk_bool(values[0] < values[1])),
            Op::BvUle => return Ok(tm.mk_bool(values[0] <= values[1])),
            _ => {
                return Err(Error::unsupported(
                    term,
                    format!("`{op}` is not a bit-vector operator"),
                ));
            }
        };
        Ok(tm.mk_bitvec(result, width))
    }
}

impl TheoryEvaluator for GroundEvaluator {
    fn name(&self) -> &str {
        "ground"
    }

    fn evaluate(&mut self, term: TermId, tm: &mut TermManager) -> Result<TermId> {
        let (decl, args) = match &tm.term(term)?.kind {
            kind if kind.is_value() => return Ok(term),
            TermKind::App { decl, args } => (*decl, args.clone()),
            TermKind::BoundVar { .. } | TermKind::Quantifier { .. } => {
                return Err(Error::NonGround { term });
            }
            _ => return Err(Error::unsupported(term, "not an application")),
        };
        let op = tm
            .decl(decl)?
            .op()
            .ok_or_else(|| Error::unsupported(term, "uninterpreted symbol"))?;

        self.stats.evaluations += 1;
        trace!(target: "ground_eval", %op, arity = args.len(), "fold");
        match op {
            Op::Not
            | Op::And
            | Op::Or
            | Op::Xor
            | Op::Implies
            | Op::Ite
            | Op::Eq
            | Op::Distinct => self.eval_bool(term, op, &args, tm),
            Op::Neg | Op::Add | Op::Sub | Op::Mul | Op::Lt | Op::Le | Op::Gt | Op::Ge => {
                self.eval_int(term, op, &args, tm)
            }
            _ => self.eval_bv(term, op, &args, tm),
        }
    }
}

fn bool_arg(tm: &TermManager, term: TermId, arg: TermId) -> Result<bool> {
    tm.bool_value(arg)
        .ok_or_else(|| Error::unsupported(term, "operand is not a Boolean literal"))
}

fn int_arg(tm: &TermManager, term: TermId, arg: TermId) -> Result<BigInt> {
    tm.int_value(arg)
        .cloned()
        .ok_or_else(|| Error::unsupported(term, "operand is not an integer literal"))
}

fn literal_args(tm: &TermManager, term: TermId, args: &[TermId]) -> Result<()> {
    if args.iter().all(|&a| tm.is_value(a)) {
        Ok(())
    } else {
        Err(Error::unsupported(term, "operand is not a literal"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(tm: &mut TermManager, op: Op, args: &[TermId]) -> TermId {
        let app = tm.mk_interp(op, args).unwrap();
        GroundEvaluator::new().evaluate(app, tm).unwrap()
    }

    #[test]
    fn test_boolean_connectives() {
        let mut tm = TermManager::new();
        let t = tm.mk_true();
        let f = tm.mk_false();

        assert_eq!(eval(&mut tm, Op::Not, &[t]), f);
        assert_eq!(eval(&mut tm, Op::And, &[t, f, t]), f);
        assert_eq!(eval(&mut tm, Op::Or, &[f, f, t]), t);
        assert_eq!(eval(&mut tm, Op::Xor, &[t, t]), f);
        assert_eq!(eval(&mut tm, Op::Implies, &[f, f]), t);
    }

    #[test]
    fn test_ite_selects_branch() {
        let mut tm = TermManager::new();
        let t = tm.mk_true();
        let one = tm.mk_int(1);
        let two = tm.mk_int(2);
        assert_eq!(eval(&mut tm, Op::Ite, &[t, one, two]), one);
    }

    #[test]
    fn test_equality_on_literals() {
        let mut tm = TermManager::new();
        let one = tm.mk_int(1);
        let other_one = tm.mk_int(1);
        let two = tm.mk_int(2);

        assert_eq!(eval(&mut tm, Op::Eq, &[one, other_one]), tm.mk_true());
        assert_eq!(eval(&mut tm, Op::Eq, &[one, two]), tm.mk_false());
        assert_eq!(eval(&mut tm, Op::Distinct, &[one, two, one]), tm.mk_false());
    }

    #[test]
    fn test_integer_arithmetic() {
        let mut tm = TermManager::new();
        let three = tm.mk_int(3);
        let four = tm.mk_int(4);

        let sum = eval(&mut tm, Op::Add, &[three, four]);
        assert_eq!(tm.int_value(sum), Some(&BigInt::from(7)));
        let diff = eval(&mut tm, Op::Sub, &[three, four]);
        assert_eq!(tm.int_value(diff), Some(&BigInt::from(-1)));
        let prod = eval(&mut tm, Op::Mul, &[three, four]);
        assert_eq!(tm.int_value(prod), Some(&BigInt::from(12)));
        assert_eq!(eval(&mut tm, Op::Lt, &[three, four]), tm.mk_true());
        assert_eq!(eval(&mut tm, Op::Ge, &[three, four]), tm.mk_false());
    }

    #[test]
    fn test_bitvector_wraps() {
        let mut tm = TermManager::new();
        let a = tm.mk_bitvec(250u32, 8);
        let b = tm.mk_bitvec(10u32, 8);

        let sum = eval(&mut tm, Op::BvAdd, &[a, b]);
        assert_eq!(tm.bv_value(sum), Some((&BigUint::from(4u32), 8)));

        let diff = eval(&mut tm, Op::BvSub, &[b, a]);
        assert_eq!(tm.bv_value(diff), Some((&BigUint::from(16u32), 8)));

        let not = eval(&mut tm, Op::BvNot, &[b]);
        assert_eq!(tm.bv_value(not), Some((&BigUint::from(245u32), 8)));

        let zero = tm.mk_bitvec(0u32, 8);
        let neg = eval(&mut tm, Op::BvNeg, &[zero]);
        assert_eq!(neg, zero);

        assert_eq!(eval(&mut tm, Op::BvUlt, &[b, a]), tm.mk_true());
    }

    #[test]
    fn test_rejects_non_literal_operands() {
        let mut tm = TermManager::new();
        let bool_sort = tm.sorts.bool_sort;
        let p = tm.declare_const("p", bool_sort);
        let p = tm.mk_const(p).unwrap();
        let not_p = tm.mk_not(p).unwrap();

        let err = GroundEvaluator::new().evaluate(not_p, &mut tm).unwrap_err();
        assert!(matches!(err, Error::Unsupported { .. }));
    }

    #[test]
    fn test_rejects_uninterpreted() {
        let mut tm = TermManager::new();
        let int = tm.sorts.int_sort;
        let f = tm.declare_fun("f", &[int], int);
        let one = tm.mk_int(1);
        let fa = tm.mk_app(f, &[one]).unwrap();

        assert!(GroundEvaluator::new().evaluate(fa, &mut tm).is_err());
    }

    #[test]
    fn test_values_pass_through() {
        let mut tm = TermManager::new();
        let one = tm.mk_int(1);
        let mut ev = GroundEvaluator::new();
        assert_eq!(ev.evaluate(one, &mut tm).unwrap(), one);
        assert_eq!(ev.stats().evaluations, 0);
    }
}
