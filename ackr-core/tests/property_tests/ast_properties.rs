//! Property-based tests for term construction
//!
//! - Structurally equal terms share one id
//! - Literals are values, applications are not
//! - Bit-vector literals are reduced modulo their width

use ackr_core::{Op, TermKind, TermManager};
use num_bigint::BigUint;
use proptest::prelude::*;

/// Strategy for generating small integers
fn small_int_strategy() -> impl Strategy<Value = i64> {
    -1000i64..1000i64
}

proptest! {
    /// Creating the same integer twice yields the same id
    #[test]
    fn integer_constant_uniqueness(n in small_int_strategy()) {
        let mut tm = TermManager::new();
        let t1 = tm.mk_int(n);
        let t2 = tm.mk_int(n);
        prop_assert_eq!(t1, t2);
        prop_assert!(tm.is_value(t1));
        prop_assert_eq!(tm.int_value(t1).cloned(), Some(n.into()));
    }

    /// Distinct integers get distinct ids
    #[test]
    fn integer_constant_distinctness(a in small_int_strategy(), b in small_int_strategy()) {
        let mut tm = TermManager::new();
        let ta = tm.mk_int(a);
        let tb = tm.mk_int(b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// Applications are hash-consed on symbol and arguments
    #[test]
    fn application_hash_consing(args in prop::collection::vec(small_int_strategy(), 1..5)) {
        let mut tm = TermManager::new();
        let int = tm.sorts.int_sort;
        let domain = vec![int; args.len()];
        let f = tm.declare_fun("f", &domain, int);

        let first: Vec<_> = args.iter().map(|&n| tm.mk_int(n)).collect();
        let second: Vec<_> = args.iter().map(|&n| tm.mk_int(n)).collect();
        let app1 = tm.mk_app(f, &first).unwrap();
        let app2 = tm.mk_app(f, &second).unwrap();

        prop_assert_eq!(app1, app2);
        prop_assert!(!tm.is_value(app1));
        prop_assert_eq!(tm.term(app1).unwrap().kind.args(), first.as_slice());
    }

    /// Wrong arity is rejected
    #[test]
    fn application_arity_checked(arity in 1usize..4, extra in 1usize..3) {
        let mut tm = TermManager::new();
        let int = tm.sorts.int_sort;
        let f = tm.declare_fun("f", &vec![int; arity], int);
        let zero = tm.mk_int(0);
        prop_assert!(tm.mk_app(f, &vec![zero; arity + extra]).is_err());
        prop_assert!(tm.mk_app(f, &vec![zero; arity]).is_ok());
    }

    /// Bit-vector literals wrap at their width
    #[test]
    fn bitvector_literal_reduced(value in 0u64..100_000, width in 1u32..17) {
        let mut tm = TermManager::new();
        let t = tm.mk_bitvec(value, width);
        let modulus = 1u64 << width;
        let (stored, w) = tm.bv_value(t).unwrap();
        prop_assert_eq!(stored, &BigUint::from(value % modulus));
        prop_assert_eq!(w, width);
        prop_assert_eq!(t, tm.mk_bitvec(value % modulus, width));
    }

    /// Fresh constants never reuse a name
    #[test]
    fn fresh_constants_are_fresh(count in 1usize..20) {
        let mut tm = TermManager::new();
        let int = tm.sorts.int_sort;
        tm.declare_const("k0", int);
        let mut names = std::collections::HashSet::new();
        names.insert("k0".to_string());
        for _ in 0..count {
            let decl = tm.mk_fresh_const("k", int);
            prop_assert!(names.insert(tm.decl_name(decl).to_string()));
        }
    }

    /// Comparison operators produce Boolean terms
    #[test]
    fn comparison_is_boolean(a in small_int_strategy(), b in small_int_strategy()) {
        let mut tm = TermManager::new();
        let ta = tm.mk_int(a);
        let tb = tm.mk_int(b);
        let lt = tm.mk_interp(Op::Lt, &[ta, tb]).unwrap();
        prop_assert_eq!(tm.sort_of(lt).unwrap(), tm.sorts.bool_sort);
        let is_app = matches!(tm.term(lt).unwrap().kind, TermKind::App { .. });
        prop_assert!(is_app);
    }
}
