//! Property-based tests for the ground evaluator
//!
//! Integer operators agree with `i128` arithmetic, bit-vector operators
//! agree with arithmetic modulo `2^w`, and every result is a literal.

use ackr_core::{GroundEvaluator, Op, TermId, TermManager, TheoryEvaluator};
use num_bigint::{BigInt, BigUint};
use proptest::prelude::*;

fn eval(tm: &mut TermManager, op: Op, args: &[TermId]) -> TermId {
    let app = tm.mk_interp(op, args).unwrap();
    GroundEvaluator::new().evaluate(app, tm).unwrap()
}

fn int_op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![Just(Op::Add), Just(Op::Sub), Just(Op::Mul)]
}

fn bv_op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::BvAdd),
        Just(Op::BvSub),
        Just(Op::BvMul),
        Just(Op::BvAnd),
        Just(Op::BvOr),
        Just(Op::BvXor),
    ]
}

proptest! {
    /// Integer arithmetic matches machine arithmetic
    #[test]
    fn int_arithmetic_matches(op in int_op_strategy(), a in -10_000i64..10_000, b in -10_000i64..10_000) {
        let mut tm = TermManager::new();
        let ta = tm.mk_int(a);
        let tb = tm.mk_int(b);
        let result = eval(&mut tm, op, &[ta, tb]);

        let (a, b) = (i128::from(a), i128::from(b));
        let expected = match op {
            Op::Add => a + b,
            Op::Sub => a - b,
            _ => a * b,
        };
        prop_assert_eq!(tm.int_value(result).cloned(), Some(BigInt::from(expected)));
    }

    /// Integer comparisons match machine comparisons
    #[test]
    fn int_comparison_matches(a in -100i64..100, b in -100i64..100) {
        let mut tm = TermManager::new();
        let ta = tm.mk_int(a);
        let tb = tm.mk_int(b);
        for (op, expected) in [(Op::Lt, a < b), (Op::Le, a <= b), (Op::Gt, a > b), (Op::Ge, a >= b)] {
            let result = eval(&mut tm, op, &[ta, tb]);
            prop_assert_eq!(tm.bool_value(result), Some(expected));
        }
        let eq = eval(&mut tm, Op::Eq, &[ta, tb]);
        prop_assert_eq!(tm.bool_value(eq), Some(a == b));
    }

    /// Bit-vector arithmetic is modular
    #[test]
    fn bitvector_arithmetic_wraps(op in bv_op_strategy(), a in 0u64..256, b in 0u64..256) {
        let mut tm = TermManager::new();
        let ta = tm.mk_bitvec(a, 8);
        let tb = tm.mk_bitvec(b, 8);
        let result = eval(&mut tm, op, &[ta, tb]);

        let expected = match op {
            Op::BvAdd => (a + b) % 256,
            Op::BvSub => (a + 256 - b) % 256,
            Op::BvMul => (a * b) % 256,
            Op::BvAnd => a & b,
            Op::BvOr => a | b,
            _ => a ^ b,
        };
        let (value, width) = tm.bv_value(result).unwrap();
        prop_assert_eq!(value, &BigUint::from(expected));
        prop_assert_eq!(width, 8);
    }

    /// Boolean connectives match Rust's
    #[test]
    fn boolean_connectives_match(a in any::<bool>(), b in any::<bool>()) {
        let mut tm = TermManager::new();
        let ta = tm.mk_bool(a);
        let tb = tm.mk_bool(b);
        for (op, expected) in [
            (Op::And, a && b),
            (Op::Or, a || b),
            (Op::Xor, a ^ b),
            (Op::Implies, !a || b),
        ] {
            let result = eval(&mut tm, op, &[ta, tb]);
            prop_assert_eq!(tm.bool_value(result), Some(expected));
        }
    }

    /// Literals evaluate to themselves
    #[test]
    fn literals_are_fixed_points(n in -1000i64..1000) {
        let mut tm = TermManager::new();
        let t = tm.mk_int(n);
        let result = GroundEvaluator::new().evaluate(t, &mut tm).unwrap();
        prop_assert_eq!(result, t);
    }
}
