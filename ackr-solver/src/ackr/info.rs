//! Ackermann Info.
//!
//! Records which fresh constant stands for which uninterpreted application
//! after Ackermannization, in both directions.

use ackr_core::{DeclId, Error, Result, TermId, TermKind, TermManager};
use rustc_hash::{FxHashMap, FxHashSet};

/// Prefix of the constants introduced by [`AckrInfo::abstract_app`].
pub const ACKR_PREFIX: &str = "!ack_";

/// Bidirectional map between applications and their abstraction constants.
#[derive(Debug, Clone, Default)]
pub struct AckrInfo {
    /// Application -> constant term.
    term_to_const: FxHashMap<TermId, TermId>,
    /// Constant declaration -> application.
    const_to_term: FxHashMap<DeclId, TermId>,
}

impl AckrInfo {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `constant` abstracts `app`.
    ///
    /// `constant` must be a 0-ary application of the same sort as `app`.
    pub fn insert(&mut self, tm: &TermManager, app: TermId, constant: TermId) -> Result<()> {
        let decl = const_decl(tm, constant)?;
        let expected = tm.sort_of(app)?;
        let found = tm.sort_of(constant)?;
        if expected != found {
            return Err(Error::SortMismatch {
                symbol: tm.decl_name(decl).to_string(),
                expected,
                found,
            });
        }
        self.term_to_const.insert(app, constant);
        self.const_to_term.insert(decl, app);
        Ok(())
    }

    /// Abstract `app` by a fresh constant, reusing an existing abstraction.
    pub fn abstract_app(&mut self, tm: &mut TermManager, app: TermId) -> Result<TermId> {
        if let Some(constant) = self.abstraction_of(app) {
            return Ok(constant);
        }
        let sort = tm.sort_of(app)?;
        let decl = tm.mk_fresh_const(ACKR_PREFIX, sort);
        let constant = tm.mk_const(decl)?;
        self.term_to_const.insert(app, constant);
        self.const_to_term.insert(decl, app);
        Ok(constant)
    }

    /// Abstract every uninterpreted application of positive arity reachable
    /// from `root`. Returns the number of new abstractions.
    pub fn abstract_term(&mut self, tm: &mut TermManager, root: TermId) -> Result<usize> {
        let mut found = Vec::new();
        let mut visited = FxHashSet::default();
        let mut stack = vec![root];
        while let Some(curr) = stack.pop() {
            if !visited.insert(curr) {
                continue;
            }
            match &tm.term(curr)?.kind {
                TermKind::App { decl, args } => {
                    if !args.is_empty() && tm.decl(*decl)?.is_uninterpreted() {
                        found.push(curr);
                    }
                    stack.extend(args.iter().copied());
                }
                TermKind::BoundVar { .. } | TermKind::Quantifier { .. } => {
                    return Err(Error::NonGround { term: curr });
                }
                _ => {}
            }
        }

        // Sub-terms before super-terms keeps fresh names stable bottom-up.
        found.sort_unstable();
        let mut added = 0;
        for app in found {
            if self.abstraction_of(app).is_none() {
                self.abstract_app(tm, app)?;
                added += 1;
            }
        }
        Ok(added)
    }

    /// Abstraction constant of an application.
    #[must_use]
    pub fn abstraction_of(&self, app: TermId) -> Option<TermId> {
        self.term_to_const.get(&app).copied()
    }

    /// Application abstracted by a constant declaration.
    #[must_use]
    pub fn original_of(&self, decl: DeclId) -> Option<TermId> {
        self.const_to_term.get(&decl).copied()
    }

    /// Whether `decl` is an abstraction constant.
    #[must_use]
    pub fn is_abstraction(&self, decl: DeclId) -> bool {
        self.const_to_term.contains_key(&decl)
    }

    /// Number of abstractions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.term_to_const.len()
    }

    /// Whether no abstraction is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.term_to_const.is_empty()
    }
}

/// Declaration of a constant term.
pub(crate) fn const_decl(tm: &TermManager, constant: TermId) -> Result<DeclId> {
    match &tm.term(constant)?.kind {
        TermKind::App { decl, args } if args.is_empty() => Ok(*decl),
        _ => Err(Error::unsupported(constant, "not a constant")),
    }
}
