//! Property-based tests for congruence checking
//!
//! Random families `f(x_0) .. f(x_n)` with random argument and function
//! values are checked against a quadratic oracle.

use std::sync::Arc;

use ackr_core::{DeclId, GroundEvaluator, TermId, TermManager};
use ackr_solver::{
    AckrInfo, CongruenceTable, ConflictPolicy, Model, ModelConstructor, ModelConstructorConfig,
    const_decl_of,
};
use proptest::prelude::*;
use smallvec::smallvec;

/// Applications of one unary symbol over distinct constants.
struct Family {
    tm: TermManager,
    info: AckrInfo,
    f: DeclId,
    apps: Vec<TermId>,
    model: Model,
}

/// Build `f(x_i)` with `x_i = args[i]` and `f(x_i) = values[i]`.
fn family(args: &[i64], values: &[i64]) -> Family {
    let mut tm = TermManager::new();
    let int = tm.sorts.int_sort;
    let f = tm.declare_fun("f", &[int], int);
    let mut info = AckrInfo::new();
    let mut model = Model::new();
    let mut apps = Vec::new();

    for (i, (&arg, &value)) in args.iter().zip(values).enumerate() {
        let x = tm.declare_const(&format!("x{i}"), int);
        let x_term = tm.mk_const(x).unwrap();
        let app = tm.mk_app(f, &[x_term]).unwrap();
        let constant = info.abstract_app(&mut tm, app).unwrap();
        let c = const_decl_of(&tm, constant).unwrap();
        let arg = tm.mk_int(arg);
        let value = tm.mk_int(value);
        model.set(x, arg);
        model.set(c, value);
        apps.push(app);
    }

    Family {
        tm,
        info,
        f,
        apps,
        model,
    }
}

fn collect_all() -> ModelConstructorConfig {
    ModelConstructorConfig {
        conflict_policy: ConflictPolicy::CollectAll,
        ..Default::default()
    }
}

/// Argument and function values drawn from a small range so that
/// collisions are common.
fn family_strategy() -> impl Strategy<Value = (Vec<i64>, Vec<i64>)> {
    (1usize..12).prop_flat_map(|n| {
        (
            prop::collection::vec(0i64..3, n),
            prop::collection::vec(0i64..3, n),
        )
    })
}

proptest! {
    /// The verdict matches a brute-force congruence check
    #[test]
    fn verdict_matches_oracle((args, values) in family_strategy()) {
        let mut fam = family(&args, &values);
        let violated = (0..args.len()).any(|i| {
            (0..i).any(|j| args[i] == args[j] && values[i] != values[j])
        });

        for config in [ModelConstructorConfig::default(), collect_all()] {
            let mut constructor = ModelConstructor::with_config(Arc::new(fam.info.clone()), config);
            let ok = constructor
                .check(&mut fam.tm, &fam.model, &mut GroundEvaluator::new())
                .unwrap();
            prop_assert_eq!(ok, !violated);
            prop_assert_eq!(constructor.conflicts().is_empty(), ok);
        }
    }

    /// Every reported conflict pairs two applications with equal arguments
    /// and different values
    #[test]
    fn conflicts_are_genuine((args, values) in family_strategy()) {
        let mut fam = family(&args, &values);
        let mut constructor = ModelConstructor::with_config(Arc::new(fam.info.clone()), collect_all());
        constructor
            .check(&mut fam.tm, &fam.model, &mut GroundEvaluator::new())
            .unwrap();

        let index = |t: TermId| fam.apps.iter().position(|&a| a == t).unwrap();
        for conflict in constructor.conflicts() {
            let (i, j) = (index(conflict.term), index(conflict.witness));
            prop_assert_ne!(i, j);
            prop_assert_eq!(args[i], args[j]);
            prop_assert_ne!(values[i], values[j]);
        }
    }

    /// A verified model interprets `f` exactly as the abstract model did
    #[test]
    fn rebuilt_function_agrees((args, values) in family_strategy()) {
        let mut fam = family(&args, &values);
        let mut constructor = ModelConstructor::new(Arc::new(fam.info.clone()));
        let ok = constructor
            .check(&mut fam.tm, &fam.model, &mut GroundEvaluator::new())
            .unwrap();
        prop_assume!(ok);

        let rebuilt = constructor.take_model().unwrap();
        for (&arg, &value) in args.iter().zip(&values) {
            let arg = fam.tm.mk_int(arg);
            let value = fam.tm.mk_int(value);
            prop_assert_eq!(rebuilt.eval_app(fam.f, &[arg]), Some(value));
        }
    }

    /// The table keeps the first value for each key
    #[test]
    fn table_keeps_first_value(keys in prop::collection::vec((0u32..4, 0u32..4), 1..20)) {
        let mut table = CongruenceTable::new();
        let mut first = std::collections::HashMap::new();
        for (i, &(arg, value)) in keys.iter().enumerate() {
            let term = TermId(1000 + i as u32);
            table.insert(DeclId(0), smallvec![TermId(arg)], TermId(100 + value), term);
            first.entry(arg).or_insert((TermId(100 + value), term));
        }

        prop_assert_eq!(table.len(), first.len());
        for (arg, (value, witness)) in first {
            let entry = table.get(DeclId(0), &[TermId(arg)]).unwrap();
            prop_assert_eq!(entry.value, value);
            prop_assert_eq!(entry.witness, witness);
        }
    }
}
