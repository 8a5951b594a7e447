//! Term Manager.
//!
//! Owns every term, declaration, sort and symbol name. All construction goes
//! through here so that equal terms are the same [`TermId`].

use lasso::{Rodeo, Spur};
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;

use super::decl::Signature;
use super::{DeclId, DeclKind, FuncDecl, Op, Term, TermId, TermKind};
use crate::error::{Error, Result};
use crate::sort::{SortId, SortKind, SortManager};

/// Hash-consing term manager.
pub struct TermManager {
    terms: Vec<Term>,
    term_cache: FxHashMap<TermKind, TermId>,
    decls: Vec<FuncDecl>,
    decl_cache: FxHashMap<FuncDecl, DeclId>,
    names: Rodeo,
    /// Sort table.
    pub sorts: SortManager,
    fresh_counter: u32,
    true_id: TermId,
    false_id: TermId,
}

impl TermManager {
    /// Create an empty term manager.
    #[must_use]
    pub fn new() -> Self {
        let sorts = SortManager::new();
        let bool_sort = sorts.bool_sort;
        let mut tm = Self {
            terms: Vec::new(),
            term_cache: FxHashMap::default(),
            decls: Vec::new(),
            decl_cache: FxHashMap::default(),
            names: Rodeo::default(),
            sorts,
            fresh_counter: 0,
            true_id: TermId(0),
            false_id: TermId(0),
        };
        tm.true_id = tm.intern(TermKind::True, bool_sort);
        tm.false_id = tm.intern(TermKind::False, bool_sort);
        tm
    }

    fn intern(&mut self, kind: TermKind, sort: SortId) -> TermId {
        if let Some(&id) = self.term_cache.get(&kind) {
            return id;
        }
        let id = TermId(self.terms.len() as u32);
        self.terms.push(Term {
            id,
            kind: kind.clone(),
            sort,
        });
        self.term_cache.insert(kind, id);
        id
    }

    fn intern_decl(&mut self, decl: FuncDecl) -> DeclId {
        if let Some(&id) = self.decl_cache.get(&decl) {
            return id;
        }
        let id = DeclId(self.decls.len() as u32);
        self.decls.push(decl.clone());
        self.decl_cache.insert(decl, id);
        id
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// Look up a term.
    #[must_use]
    pub fn get(&self, id: TermId) -> Option<&Term> {
        self.terms.get(id.0 as usize)
    }

    /// Look up a term, failing on unknown ids.
    pub fn term(&self, id: TermId) -> Result<&Term> {
        self.get(id).ok_or(Error::UnknownTerm(id))
    }

    /// Look up a declaration.
    #[must_use]
    pub fn get_decl(&self, id: DeclId) -> Option<&FuncDecl> {
        self.decls.get(id.0 as usize)
    }

    /// Look up a declaration, failing on unknown ids.
    pub fn decl(&self, id: DeclId) -> Result<&FuncDecl> {
        self.get_decl(id).ok_or(Error::UnknownDecl(id))
    }

    /// Sort of a term.
    pub fn sort_of(&self, id: TermId) -> Result<SortId> {
        self.term(id).map(|t| t.sort)
    }

    /// Whether `id` is a literal value. Unknown ids are not values.
    #[must_use]
    pub fn is_value(&self, id: TermId) -> bool {
        self.get(id).is_some_and(Term::is_value)
    }

    /// Boolean literal value of a term.
    #[must_use]
    pub fn bool_value(&self, id: TermId) -> Option<bool> {
        match self.get(id).map(|t| &t.kind) {
            Some(TermKind::True) => Some(true),
            Some(TermKind::False) => Some(false),
            _ => None,
        }
    }

    /// Integer literal value of a term.
    #[must_use]
    pub fn int_value(&self, id: TermId) -> Option<&BigInt> {
        match self.get(id).map(|t| &t.kind) {
            Some(TermKind::IntConst(n)) => Some(n),
            _ => None,
        }
    }

    /// Bit-vector literal value and width of a term.
    #[must_use]
    pub fn bv_value(&self, id: TermId) -> Option<(&BigUint, u32)> {
        match self.get(id).map(|t| &t.kind) {
            Some(TermKind::BitVecConst { value, width }) => Some((value, *width)),
            _ => None,
        }
    }

    /// Resolve an interned name.
    #[must_use]
    pub fn resolve_str(&self, name: Spur) -> &str {
        self.names.resolve(&name)
    }

    /// Name of a declaration, `"?"` for unknown ids.
    #[must_use]
    pub fn decl_name(&self, id: DeclId) -> &str {
        self.get_decl(id)
            .map_or("?", |d| self.names.resolve(&d.name))
    }

    /// SMT-LIB name of a sort.
    #[must_use]
    pub fn sort_name(&self, sort: SortId) -> String {
        match self.sorts.get(sort).map(|s| &s.kind) {
            Some(SortKind::Bool) => "Bool".to_string(),
            Some(SortKind::Int) => "Int".to_string(),
            Some(SortKind::BitVec(w)) => format!("(_ BitVec {w})"),
            Some(SortKind::Uninterpreted(name)) => self.names.resolve(name).to_string(),
            None => format!("?{}", sort.raw()),
        }
    }

    /// Number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether no terms exist. Never true after `new`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of declarations.
    #[must_use]
    pub fn num_decls(&self) -> usize {
        self.decls.len()
    }

    // ------------------------------------------------------------------
    // Sorts and declarations
    // ------------------------------------------------------------------

    /// Declare an uninterpreted sort.
    pub fn declare_sort(&mut self, name: &str) -> SortId {
        let name = self.names.get_or_intern(name);
        self.sorts.intern(SortKind::Uninterpreted(name))
    }

    /// Declare an uninterpreted function symbol.
    pub fn declare_fun(&mut self, name: &str, domain: &[SortId], range: SortId) -> DeclId {
        let name = self.names.get_or_intern(name);
        self.intern_decl(FuncDecl {
            name,
            domain: domain.iter().copied().collect(),
            range,
            kind: DeclKind::Uninterpreted,
        })
    }

    /// Declare an uninterpreted constant.
    pub fn declare_const(&mut self, name: &str, sort: SortId) -> DeclId {
        self.declare_fun(name, &[], sort)
    }

    /// Declare a constant whose name is not used by any other symbol.
    pub fn mk_fresh_const(&mut self, prefix: &str, sort: SortId) -> DeclId {
        loop {
            let name = format!("{}{}", prefix, self.fresh_counter);
            self.fresh_counter += 1;
            if !self.names.contains(&name) {
                return self.declare_const(&name, sort);
            }
        }
    }

    // ------------------------------------------------------------------
    // Literals
    // ------------------------------------------------------------------

    /// The literal `true`.
    #[must_use]
    pub fn mk_true(&self) -> TermId {
        self.true_id
    }

    /// The literal `false`.
    #[must_use]
    pub fn mk_false(&self) -> TermId {
        self.false_id
    }

    /// A Boolean literal.
    #[must_use]
    pub fn mk_bool(&self, value: bool) -> TermId {
        if value { self.true_id } else { self.false_id }
    }

    /// An integer literal.
    pub fn mk_int(&mut self, value: impl Into<BigInt>) -> TermId {
        let int_sort = self.sorts.int_sort;
        self.intern(TermKind::IntConst(value.into()), int_sort)
    }

    /// A bit-vector literal; `value` is reduced modulo `2^width`.
    pub fn mk_bitvec(&mut self, value: impl Into<BigUint>, width: u32) -> TermId {
        let mut value = value.into();
        if value.bits() > u64::from(width) {
            value %= BigUint::one() << (width as usize);
        }
        let sort = self.sorts.bitvec(width);
        self.intern(TermKind::BitVecConst { value, width }, sort)
    }

    /// The `index`-th abstract element of `sort`.
    pub fn mk_model_value(&mut self, sort: SortId, index: u32) -> TermId {
        self.intern(TermKind::ModelValue { sort, index }, sort)
    }

    // ------------------------------------------------------------------
    // Applications
    // ------------------------------------------------------------------

    /// Apply a declaration to arguments, checking arity and sorts.
    pub fn mk_app(&mut self, decl: DeclId, args: &[TermId]) -> Result<TermId> {
        let d = self.decl(decl)?;
        if d.arity() != args.len() {
            return Err(Error::ArityMismatch {
                symbol: self.names.resolve(&d.name).to_string(),
                expected: d.arity(),
                found: args.len(),
            });
        }
        for (&arg, &expected) in args.iter().zip(d.domain.iter()) {
            let found = self.sort_of(arg)?;
            if found != expected {
                return Err(Error::SortMismatch {
                    symbol: self.names.resolve(&d.name).to_string(),
                    expected,
                    found,
                });
            }
        }
        let range = d.range;
        Ok(self.intern(
            TermKind::App {
                decl,
                args: args.into(),
            },
            range,
        ))
    }

    /// The constant term of a 0-ary declaration.
    pub fn mk_const(&mut self, decl: DeclId) -> Result<TermId> {
        self.mk_app(decl, &[])
    }

    /// Apply a built-in operator.
    ///
    /// The declaration is derived from the argument sorts, so equal operators
    /// over equal sorts share one [`DeclId`].
    pub fn mk_interp(&mut self, op: Op, args: &[TermId]) -> Result<TermId> {
        let (min, max) = op.arity();
        if args.len() < min || max.is_some_and(|max| args.len() > max) {
            return Err(Error::ArityMismatch {
                symbol: op.symbol().to_string(),
                expected: min,
                found: args.len(),
            });
        }

        let domain = args
            .iter()
            .map(|&a| self.sort_of(a))
            .collect::<Result<SmallVec<[SortId; 4]>>>()?;
        let range = self.check_signature(op, &domain)?;

        let name = self.names.get_or_intern_static(op.symbol());
        let decl = self.intern_decl(FuncDecl {
            name,
            domain,
            range,
            kind: DeclKind::Interpreted(op),
        });
        Ok(self.intern(
            TermKind::App {
                decl,
                args: args.into(),
            },
            range,
        ))
    }

    /// Validate argument sorts of `op` and compute its result sort.
    fn check_signature(&self, op: Op, domain: &[SortId]) -> Result<SortId> {
        let mismatch = |expected: SortId, found: SortId| Error::SortMismatch {
            symbol: op.symbol().to_string(),
            expected,
            found,
        };
        let bool_sort = self.sorts.bool_sort;
        let int_sort = self.sorts.int_sort;
        let first = domain[0];

        match op.signature() {
            Signature::Bool => {
                if let Some(&bad) = domain.iter().find(|&&s| s != bool_sort) {
                    return Err(mismatch(bool_sort, bad));
                }
            }
            Signature::Int => {
                if let Some(&bad) = domain.iter().find(|&&s| s != int_sort) {
                    return Err(mismatch(int_sort, bad));
                }
            }
            Signature::BitVec => {
                let is_bv = self
                    .sorts
                    .get(first)
                    .is_some_and(|s| s.bv_width().is_some());
                if !is_bv {
                    return Err(Error::InvalidSort {
                        symbol: op.symbol().to_string(),
                        found: first,
                    });
                }
                if let Some(&bad) = domain.iter().find(|&&s| s != first) {
                    return Err(mismatch(first, bad));
                }
            }
            Signature::Same => {
                if let Some(&bad) = domain.iter().find(|&&s| s != first) {
                    return Err(mismatch(first, bad));
                }
            }
            Signature::Ite => {
                if first != bool_sort {
                    return Err(mismatch(bool_sort, first));
                }
                if domain[1] != domain[2] {
                    return Err(mismatch(domain[1], domain[2]));
                }
            }
        }

        Ok(match op.signature() {
            _ if op.is_predicate() => bool_sort,
            Signature::Ite => domain[1],
            Signature::Int => int_sort,
            _ => first,
        })
    }

    /// Boolean negation.
    pub fn mk_not(&mut self, arg: TermId) -> Result<TermId> {
        self.mk_interp(Op::Not, &[arg])
    }

    /// Equality.
    pub fn mk_eq(&mut self, lhs: TermId, rhs: TermId) -> Result<TermId> {
        self.mk_interp(Op::Eq, &[lhs, rhs])
    }

    // ------------------------------------------------------------------
    // Binders
    // ------------------------------------------------------------------

    /// A de Bruijn indexed bound variable.
    pub fn mk_bound_var(&mut self, index: u32, sort: SortId) -> TermId {
        self.intern(TermKind::BoundVar { index, sort }, sort)
    }

    /// A quantified formula over a Boolean body.
    pub fn mk_quantifier(
        &mut self,
        universal: bool,
        sorts: &[SortId],
        body: TermId,
    ) -> Result<TermId> {
        let bool_sort = self.sorts.bool_sort;
        let found = self.sort_of(body)?;
        if found != bool_sort {
            return Err(Error::SortMismatch {
                symbol: if universal { "forall" } else { "exists" }.to_string(),
                expected: bool_sort,
                found,
            });
        }
        Ok(self.intern(
            TermKind::Quantifier {
                universal,
                sorts: sorts.iter().copied().collect(),
                body,
            },
            bool_sort,
        ))
    }

    /// Universal quantifier.
    pub fn mk_forall(&mut self, sorts: &[SortId], body: TermId) -> Result<TermId> {
        self.mk_quantifier(true, sorts, body)
    }

    /// Existential quantifier.
    pub fn mk_exists(&mut self, sorts: &[SortId], body: TermId) -> Result<TermId> {
        self.mk_quantifier(false, sorts, body)
    }

    /// Render a term for logs. Arguments that are not leaves print as `#id`,
    /// so rendering never recurses.
    #[must_use]
    pub fn display(&self, term: TermId) -> TermDisplay<'_> {
        TermDisplay { tm: self, term }
    }

    fn fmt_leaf(&self, term: TermId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(t) = self.get(term) else {
            return write!(f, "#{}", term.raw());
        };
        match &t.kind {
            TermKind::True => f.write_str("true"),
            TermKind::False => f.write_str("false"),
            TermKind::IntConst(n) if n.is_negative() => write!(f, "(- {})", n.abs()),
            TermKind::IntConst(n) => write!(f, "{n}"),
            TermKind::BitVecConst { value, width } => write!(f, "(_ bv{value} {width})"),
            TermKind::ModelValue { sort, index } => {
                match self.sorts.get(*sort).map(|s| &s.kind) {
                    Some(SortKind::Uninterpreted(name)) => {
                        write!(f, "{}!val!{index}", self.names.resolve(name))
                    }
                    _ => write!(f, "?!val!{index}"),
                }
            }
            TermKind::App { decl, args } if args.is_empty() => f.write_str(self.decl_name(*decl)),
            _ => write!(f, "#{}", term.raw()),
        }
    }
}

impl Default for TermManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TermManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TermManager")
            .field("terms", &self.terms.len())
            .field("decls", &self.decls.len())
            .field("sorts", &self.sorts.len())
            .finish()
    }
}

/// Shallow [`fmt::Display`] adapter returned by [`TermManager::display`].
pub struct TermDisplay<'a> {
    tm: &'a TermManager,
    term: TermId,
}

impl fmt::Display for TermDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(t) = self.tm.get(self.term) else {
            return write!(f, "#{}", self.term.raw());
        };
        match &t.kind {
            TermKind::App { decl, args } if !args.is_empty() => {
                write!(f, "({}", self.tm.decl_name(*decl))?;
                for &arg in args {
                    f.write_str(" ")?;
                    self.tm.fmt_leaf(arg, f)?;
                }
                f.write_str(")")
            }
            TermKind::BoundVar { index, .. } => write!(f, "(:var {index})"),
            TermKind::Quantifier {
                universal,
                sorts,
                body,
            } => write!(
                f,
                "({} ({} vars) #{})",
                if *universal { "forall" } else { "exists" },
                sorts.len(),
                body.raw()
            ),
            _ => self.tm.fmt_leaf(self.term, f),
        }
    }
}
