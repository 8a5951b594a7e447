//! Property-based tests for the model constructor
//!
//! - Repeated checks agree
//! - Each distinct term is evaluated once
//! - Partial models are completed without errors

use std::sync::Arc;

use ackr_core::{GroundEvaluator, Op, TermManager};
use ackr_solver::{AckrInfo, Model, ModelConstructor, const_decl_of};
use proptest::prelude::*;

/// `g(x_i + x_j)` for every pair drawn, over constants `x_0 .. x_n`.
struct SumFamily {
    tm: TermManager,
    info: AckrInfo,
    model: Model,
    distinct_sums: usize,
}

fn sum_family(values: &[Option<i64>], pairs: &[(usize, usize)], results: &[i64]) -> SumFamily {
    let mut tm = TermManager::new();
    let int = tm.sorts.int_sort;
    let g = tm.declare_fun("g", &[int], int);
    let mut info = AckrInfo::new();
    let mut model = Model::new();

    let mut xs = Vec::new();
    for (i, value) in values.iter().enumerate() {
        let x = tm.declare_const(&format!("x{i}"), int);
        if let Some(v) = value {
            let v = tm.mk_int(*v);
            model.set(x, v);
        }
        xs.push(tm.mk_const(x).unwrap());
    }

    let mut sums = std::collections::HashSet::new();
    for (&(i, j), &result) in pairs.iter().zip(results) {
        let (i, j) = (i % xs.len(), j % xs.len());
        let sum = tm.mk_interp(Op::Add, &[xs[i], xs[j]]).unwrap();
        sums.insert(sum);
        let app = tm.mk_app(g, &[sum]).unwrap();
        if info.abstraction_of(app).is_none() {
            let constant = info.abstract_app(&mut tm, app).unwrap();
            let c = const_decl_of(&tm, constant).unwrap();
            let result = tm.mk_int(result);
            model.set(c, result);
        }
    }

    SumFamily {
        tm,
        info,
        model,
        distinct_sums: sums.len(),
    }
}

fn sum_family_strategy()
-> impl Strategy<Value = (Vec<Option<i64>>, Vec<(usize, usize)>, Vec<i64>)> {
    (
        prop::collection::vec(prop::option::of(-3i64..3), 1..6),
        prop::collection::vec((0usize..6, 0usize..6), 1..10),
        prop::collection::vec(0i64..3, 10),
    )
}

proptest! {
    /// Checking twice gives the same verdict and conflicts
    #[test]
    fn checks_are_deterministic((values, pairs, results) in sum_family_strategy()) {
        let mut fam = sum_family(&values, &pairs, &results);
        let info = Arc::new(fam.info.clone());

        let mut first = ModelConstructor::new(Arc::clone(&info));
        let ok1 = first.check(&mut fam.tm, &fam.model, &mut GroundEvaluator::new()).unwrap();
        let mut second = ModelConstructor::new(info);
        let ok2 = second.check(&mut fam.tm, &fam.model, &mut GroundEvaluator::new()).unwrap();

        prop_assert_eq!(ok1, ok2);
        prop_assert_eq!(first.conflicts(), second.conflicts());
    }

    /// Shared sums reach the theory evaluator once each
    #[test]
    fn shared_terms_evaluated_once((values, pairs, results) in sum_family_strategy()) {
        let mut fam = sum_family(&values, &pairs, &results);
        let mut evaluator = GroundEvaluator::new();
        let mut constructor = ModelConstructor::with_config(
            Arc::new(fam.info.clone()),
            ackr_solver::ModelConstructorConfig {
                conflict_policy: ackr_solver::ConflictPolicy::CollectAll,
                ..Default::default()
            },
        );
        constructor.check(&mut fam.tm, &fam.model, &mut evaluator).unwrap();

        prop_assert_eq!(constructor.stats().theory_evaluations, fam.distinct_sums as u64);
        prop_assert_eq!(evaluator.stats().evaluations, fam.distinct_sums as u64);
    }

    /// Unassigned constants are completed and never cause an error
    #[test]
    fn partial_models_are_completed((values, pairs, results) in sum_family_strategy()) {
        let mut fam = sum_family(&values, &pairs, &results);
        let mut constructor = ModelConstructor::new(Arc::new(fam.info.clone()));
        let ok = constructor.check(&mut fam.tm, &fam.model, &mut GroundEvaluator::new());
        prop_assert!(ok.is_ok());

        if ok.unwrap_or(false) {
            let rebuilt = constructor.model().unwrap();
            let missing = values.iter().filter(|v| v.is_none()).count() as u64;
            prop_assert!(constructor.stats().completions <= missing);
            for (_, value) in rebuilt.constants() {
                prop_assert!(fam.tm.is_value(value));
            }
        }
    }
}
