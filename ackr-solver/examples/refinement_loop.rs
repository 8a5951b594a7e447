//! Lazy Ackermannization refinement loop
//!
//! Shows how a caller drives the model constructor: check a candidate model,
//! read the conflicts, repair the model (a real solver would add the
//! congruence lemma and re-solve), and check again.
//!
//! Run with: cargo run -p ackr-solver --example refinement_loop

use std::sync::Arc;

use ackr_core::{GroundEvaluator, Op, Result, TermManager};
use ackr_solver::{AckrInfo, Model, ModelConstructor, const_decl_of};

fn main() -> Result<()> {
    let mut tm = TermManager::new();
    let int = tm.sorts.int_sort;

    // (f (+ x 1)) and (f y)
    let f = tm.declare_fun("f", &[int], int);
    let x = tm.declare_const("x", int);
    let y = tm.declare_const("y", int);
    let x_term = tm.mk_const(x)?;
    let y_term = tm.mk_const(y)?;
    let one = tm.mk_int(1);
    let x_plus_1 = tm.mk_interp(Op::Add, &[x_term, one])?;
    let f_x1 = tm.mk_app(f, &[x_plus_1])?;
    let f_y = tm.mk_app(f, &[y_term])?;

    let mut info = AckrInfo::new();
    let c_x1 = info.abstract_app(&mut tm, f_x1)?;
    let c_y = info.abstract_app(&mut tm, f_y)?;
    let c_x1 = const_decl_of(&tm, c_x1)?;
    let c_y = const_decl_of(&tm, c_y)?;

    // x + 1 = y, yet the abstraction constants disagree
    let mut model = Model::new();
    let three = tm.mk_int(3);
    let four = tm.mk_int(4);
    let ten = tm.mk_int(10);
    let twenty = tm.mk_int(20);
    model.set(x, three);
    model.set(y, four);
    model.set(c_x1, ten);
    model.set(c_y, twenty);

    let mut constructor = ModelConstructor::new(Arc::new(info));
    let mut evaluator = GroundEvaluator::new();

    for round in 1.. {
        let ok = constructor.check(&mut tm, &model, &mut evaluator)?;
        println!("round {round}: {:?}", constructor.status());
        if ok {
            break;
        }
        for conflict in constructor.conflicts() {
            println!(
                "  conflict: {} vs {}",
                tm.display(conflict.term),
                tm.display(conflict.witness)
            );
        }
        // Stand-in for the solver honouring the lemma f(x + 1) = f(y)
        model.set(c_x1, twenty);
    }

    if let Some(rebuilt) = constructor.model() {
        println!("{}", rebuilt.pretty_print(&tm));
    }
    println!(
        "terms evaluated: {}, theory calls: {}",
        constructor.stats().terms_evaluated,
        evaluator.stats().evaluations
    );
    Ok(())
}
