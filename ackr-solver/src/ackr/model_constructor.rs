//! Ackermann Model Constructor.
//!
//! Given the abstract model of an Ackermannized formula, evaluates the
//! original terms bottom-up and checks that the model respects function
//! congruence: two applications of the same uninterpreted symbol whose
//! arguments evaluate to the same values must have abstraction constants with
//! the same value.
//!
//! ## Algorithm
//!
//! 1. **Seeding**: every model constant, replaced by the application it
//!    abstracts when it is an Ackermann constant
//! 2. **Traversal**: explicit-stack post-order over distinct terms, so deep
//!    graphs cannot overflow the call stack
//! 3. **Evaluation**: constants from the model (completed when unassigned),
//!    uninterpreted applications through their abstraction constant and the
//!    congruence table, interpreted applications through a
//!    [`TheoryEvaluator`]
//! 4. **Reconstruction**: on success, function interpretations are read off
//!    the congruence table
//!
//! ## References
//!
//! - Z3's `ackermannization/lackr_model_constructor.cpp`
//! - "Lazy Ackermannization" (Janota & Wintersteiger, 2015)

use ackr_core::{DeclId, Error, Result, TermId, TermKind, TermManager, TheoryEvaluator};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

use super::congruence::{ArgValues, Congruence, CongruenceTable};
use super::info::{AckrInfo, const_decl};
use crate::model::{ConstructedModel, Model};

/// Outcome of the last [`ModelConstructor::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckStatus {
    /// No check has completed.
    #[default]
    Unresolved,
    /// The abstract model respects congruence.
    Verified,
    /// At least one congruence violation was found.
    Violated,
}

/// What to do after the first congruence violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Stop the traversal immediately.
    #[default]
    StopAtFirst,
    /// Finish the traversal and report every violation.
    CollectAll,
}

/// Two applications whose arguments evaluate equal but whose abstraction
/// constants got different values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Conflict {
    /// Application discovered second.
    pub term: TermId,
    /// Application recorded first for the same key.
    pub witness: TermId,
}

impl Conflict {
    /// Create a new conflict.
    #[must_use]
    pub fn new(term: TermId, witness: TermId) -> Self {
        Self { term, witness }
    }

    /// Both terms as a pair.
    #[must_use]
    pub fn as_pair(&self) -> (TermId, TermId) {
        (self.term, self.witness)
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} vs #{}", self.term.raw(), self.witness.raw())
    }
}

/// Configuration for the model constructor.
#[derive(Debug, Clone)]
pub struct ModelConstructorConfig {
    /// Behaviour on congruence violations.
    pub conflict_policy: ConflictPolicy,
    /// Build a [`ConstructedModel`] after a successful check.
    pub build_model: bool,
}

impl Default for ModelConstructorConfig {
    fn default() -> Self {
        Self {
            conflict_policy: ConflictPolicy::StopAtFirst,
            build_model: true,
        }
    }
}

/// Statistics for the model constructor, accumulated across checks.
#[derive(Debug, Clone, Default)]
pub struct ModelConstructorStats {
    /// Checks started.
    pub checks: u64,
    /// Checks that verified the model.
    pub verified: u64,
    /// Checks that found a violation.
    pub violated: u64,
    /// Distinct terms whose sub-terms were fully visited.
    pub terms_visited: u64,
    /// Terms given a value (literals excluded).
    pub terms_evaluated: u64,
    /// Literal terms passed through unevaluated.
    pub literals_skipped: u64,
    /// Constants read from the model.
    pub constants_evaluated: u64,
    /// Values synthesized for unassigned constants.
    pub completions: u64,
    /// Congruence table lookups.
    pub congruence_lookups: u64,
    /// Lookups that found an agreeing entry.
    pub congruence_hits: u64,
    /// Applications handed to the theory evaluator.
    pub theory_evaluations: u64,
    /// Congruence violations found.
    pub conflicts: u64,
}

impl ModelConstructorStats {
    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Checks abstract models against function congruence.
#[derive(Debug)]
pub struct ModelConstructor {
    info: Arc<AckrInfo>,
    config: ModelConstructorConfig,
    stats: ModelConstructorStats,
    status: CheckStatus,
    conflicts: Vec<Conflict>,
    model: Option<ConstructedModel>,
}

impl ModelConstructor {
    /// Create a constructor with default configuration.
    #[must_use]
    pub fn new(info: Arc<AckrInfo>) -> Self {
        Self::with_config(info, ModelConstructorConfig::default())
    }

    /// Create with configuration.
    #[must_use]
    pub fn with_config(info: Arc<AckrInfo>, config: ModelConstructorConfig) -> Self {
        Self {
            info,
            config,
            stats: ModelConstructorStats::default(),
            status: CheckStatus::Unresolved,
            conflicts: Vec::new(),
            model: None,
        }
    }

    /// Check `model` against congruence.
    ///
    /// Returns `Ok(true)` if the model is congruent and `Ok(false)` if a
    /// violation was found, in which case [`Self::conflicts`] is non-empty.
    /// `Err` means the input broke a precondition (non-ground terms,
    /// non-literal model values, missing abstractions) and leaves the status
    /// [`CheckStatus::Unresolved`].
    pub fn check(
        &mut self,
        tm: &mut TermManager,
        model: &Model,
        theory: &mut dyn TheoryEvaluator,
    ) -> Result<bool> {
        self.conflicts.clear();
        self.model = None;
        self.status = CheckStatus::Unresolved;
        self.stats.checks += 1;

        let mut run = CheckRun {
            tm,
            model,
            info: &self.info,
            theory: &mut *theory,
            policy: self.config.conflict_policy,
            stats: &mut self.stats,
            conflicts: &mut self.conflicts,
            stack: Vec::new(),
            visited: FxHashSet::default(),
            app2val: FxHashMap::default(),
            table: CongruenceTable::new(),
            completed: Vec::new(),
        };
        run.seed()?;
        debug!(
            target: "model_constructor",
            seeds = run.stack.len(),
            "starting congruence check"
        );

        let ok = run.run()?;
        if ok && self.config.build_model {
            self.model = Some(run.into_model());
        }

        if ok {
            self.status = CheckStatus::Verified;
            self.stats.verified += 1;
        } else {
            self.status = CheckStatus::Violated;
            self.stats.violated += 1;
        }
        debug!(
            target: "model_constructor",
            status = ?self.status,
            conflicts = self.conflicts.len(),
            "congruence check finished"
        );
        Ok(ok)
    }

    /// Status of the last check.
    #[must_use]
    pub fn status(&self) -> CheckStatus {
        self.status
    }

    /// Conflicts of the last check, in discovery order.
    #[must_use]
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    /// Take ownership of the conflicts of the last check.
    pub fn take_conflicts(&mut self) -> Vec<Conflict> {
        std::mem::take(&mut self.conflicts)
    }

    /// Model of the last check, if it verified and model building is on.
    #[must_use]
    pub fn model(&self) -> Option<&ConstructedModel> {
        self.model.as_ref()
    }

    /// Take ownership of the model of the last check.
    pub fn take_model(&mut self) -> Option<ConstructedModel> {
        self.model.take()
    }

    /// Ackermann info this constructor checks against.
    #[must_use]
    pub fn info(&self) -> &AckrInfo {
        &self.info
    }

    /// Get configuration.
    #[must_use]
    pub fn config(&self) -> &ModelConstructorConfig {
        &self.config
    }

    /// Get statistics.
    #[must_use]
    pub fn stats(&self) -> &ModelConstructorStats {
        &self.stats
    }

    /// Reset statistics.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }
}

/// State of a single check. Dropped when the check returns.
struct CheckRun<'a, 't> {
    tm: &'a mut TermManager,
    model: &'a Model,
    info: &'a AckrInfo,
    theory: &'a mut (dyn TheoryEvaluator + 't),
    policy: ConflictPolicy,
    stats: &'a mut ModelConstructorStats,
    conflicts: &'a mut Vec<Conflict>,
    stack: Vec<TermId>,
    visited: FxHashSet<TermId>,
    /// Evaluation cache.
    app2val: FxHashMap<TermId, TermId>,
    table: CongruenceTable,
    /// Constants missing from the model, with their synthesized values.
    completed: Vec<(DeclId, TermId)>,
}

impl CheckRun<'_, '_> {
    fn seed(&mut self) -> Result<()> {
        for decl in self.model.constants() {
            let term = match self.info.original_of(decl) {
                Some(app) => app,
                None => self.tm.mk_const(decl)?,
            };
            self.stack.push(term);
        }
        Ok(())
    }

    /// Drain the stack. Returns whether no violation was found.
    fn run(&mut self) -> Result<bool> {
        let mut ok = true;
        while let Some(&curr) = self.stack.last() {
            if self.visited.contains(&curr) {
                self.stack.pop();
                continue;
            }

            match &self.tm.term(curr)?.kind {
                TermKind::BoundVar { .. } | TermKind::Quantifier { .. } => {
                    return Err(Error::NonGround { term: curr });
                }
                TermKind::App { args, .. } => {
                    let pending = self.stack.len();
                    for &arg in args {
                        if !self.visited.contains(&arg) {
                            self.stack.push(arg);
                        }
                    }
                    if self.stack.len() != pending {
                        continue;
                    }
                }
                _ => {}
            }

            self.visited.insert(curr);
            self.stack.pop();
            self.stats.terms_visited += 1;

            if !self.mk_value(curr)? {
                ok = false;
                if self.policy == ConflictPolicy::StopAtFirst {
                    return Ok(false);
                }
            }
        }
        Ok(ok)
    }

    /// Evaluate and memoize `term`, whose arguments all have values.
    fn mk_value(&mut self, term: TermId) -> Result<bool> {
        if self.tm.is_value(term) {
            self.stats.literals_skipped += 1;
            return Ok(true);
        }
        debug_assert!(!self.app2val.contains_key(&term));

        let (value, ok) = self.evaluate(term)?;
        if !self.tm.is_value(value) {
            return Err(Error::NotAValue {
                term,
                result: value,
            });
        }
        trace!(
            target: "model_constructor",
            term = %self.tm.display(term),
            value = %self.tm.display(value),
            "map term"
        );
        self.app2val.insert(term, value);
        self.stats.terms_evaluated += 1;
        Ok(ok)
    }

    fn evaluate(&mut self, term: TermId) -> Result<(TermId, bool)> {
        let (decl, args) = match &self.tm.term(term)?.kind {
            TermKind::App { decl, args } => (*decl, args.clone()),
            _ => return Err(Error::NonGround { term }),
        };

        if args.is_empty() {
            return Ok((self.constant_value(term, decl)?, true));
        }

        let values = args
            .iter()
            .map(|&arg| self.cached_value(arg))
            .collect::<Result<ArgValues>>()?;

        if self.tm.decl(decl)?.is_uninterpreted() {
            self.uninterpreted_value(term, decl, values)
        } else {
            Ok((self.interpreted_value(decl, &values)?, true))
        }
    }

    fn cached_value(&self, arg: TermId) -> Result<TermId> {
        if self.tm.is_value(arg) {
            return Ok(arg);
        }
        self.app2val
            .get(&arg)
            .copied()
            .ok_or_else(|| Error::unsupported(arg, "argument evaluated out of order"))
    }

    /// Model value of a constant, completing the model when unassigned.
    ///
    /// An assigned value must be a literal of the constant's sort; `term` is
    /// the term being evaluated and is reported on failure.
    fn interp_or_complete(&mut self, term: TermId, decl: DeclId) -> Result<(TermId, bool)> {
        if let Some(value) = self.model.get_const_interp(decl) {
            if !self.tm.is_value(value) {
                return Err(Error::NotAValue {
                    term,
                    result: value,
                });
            }
            let expected = self.tm.decl(decl)?.range;
            let found = self.tm.sort_of(value)?;
            if expected != found {
                return Err(Error::SortMismatch {
                    symbol: self.tm.decl_name(decl).to_string(),
                    expected,
                    found,
                });
            }
            return Ok((value, false));
        }
        self.stats.completions += 1;
        let sort = self.tm.decl(decl)?.range;
        let value = Model::some_value(self.tm, sort)?;
        trace!(
            target: "model_constructor",
            constant = self.tm.decl_name(decl),
            value = %self.tm.display(value),
            "completed model"
        );
        Ok((value, true))
    }

    fn constant_value(&mut self, term: TermId, decl: DeclId) -> Result<TermId> {
        self.stats.constants_evaluated += 1;
        let (value, completed) = self.interp_or_complete(term, decl)?;
        if completed {
            self.completed.push((decl, value));
        }
        Ok(value)
    }

    fn uninterpreted_value(
        &mut self,
        term: TermId,
        decl: DeclId,
        values: ArgValues,
    ) -> Result<(TermId, bool)> {
        let constant = self
            .info
            .abstraction_of(term)
            .ok_or(Error::MissingAbstraction { term })?;
        let constant_decl = const_decl(&*self.tm, constant)?;
        debug_assert_eq!(self.tm.sort_of(constant).ok(), self.tm.sort_of(term).ok());
        let (value, _) = self.interp_or_complete(term, constant_decl)?;

        self.stats.congruence_lookups += 1;
        match self.table.insert(decl, values, value, term) {
            Congruence::Fresh => Ok((value, true)),
            Congruence::Agrees(entry) => {
                self.stats.congruence_hits += 1;
                Ok((entry.value, true))
            }
            Congruence::Conflict(entry) => {
                debug!(
                    target: "model_constructor",
                    term = %self.tm.display(term),
                    witness = %self.tm.display(entry.witness),
                    value = %self.tm.display(value),
                    recorded = %self.tm.display(entry.value),
                    "congruence violated"
                );
                self.stats.conflicts += 1;
                self.conflicts.push(Conflict::new(term, entry.witness));
                Ok((entry.value, false))
            }
        }
    }

    fn interpreted_value(&mut self, decl: DeclId, values: &[TermId]) -> Result<TermId> {
        let app = self.tm.mk_app(decl, values)?;
        self.stats.theory_evaluations += 1;
        let result = self.theory.evaluate(app, self.tm)?;
        trace!(
            target: "model_constructor",
            theory = self.theory.name(),
            app = %self.tm.display(app),
            result = %self.tm.display(result),
            "eval"
        );
        Ok(result)
    }

    /// Recover a model of the original formula from a verified run.
    fn into_model(self) -> ConstructedModel {
        let mut model = ConstructedModel::new();
        for decl in self.model.constants() {
            if self.info.is_abstraction(decl) {
                continue;
            }
            if let Some(value) = self.model.get_const_interp(decl) {
                model.set_const(decl, value);
            }
        }
        for &(decl, value) in &self.completed {
            if !self.info.is_abstraction(decl) {
                model.set_const(decl, value);
            }
        }
        for row in self.table.iter() {
            model.add_func_entry(row.decl, row.args.clone(), row.entry.value);
        }
        model
    }
}
