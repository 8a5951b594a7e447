//! Constructed Model.
//!
//! The concrete model recovered after a successful congruence check: the
//! ordinary constants keep their abstract-model values and every
//! uninterpreted function gets a finite interpretation read off the
//! congruence table.

use ackr_core::{DeclId, TermId, TermManager};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt::Write;

/// Finite interpretation of an uninterpreted function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncInterp {
    /// Interpreted declaration.
    pub decl: DeclId,
    /// Explicit entries `args -> value`, in discovery order.
    pub entries: Vec<(SmallVec<[TermId; 4]>, TermId)>,
    /// Value for argument tuples without an entry.
    pub else_value: Option<TermId>,
}

impl FuncInterp {
    /// Create an interpretation with no entries.
    #[must_use]
    pub fn new(decl: DeclId) -> Self {
        Self {
            decl,
            entries: Vec::new(),
            else_value: None,
        }
    }

    /// Add an entry. The first entry's value doubles as the else value.
    pub fn add_entry(&mut self, args: SmallVec<[TermId; 4]>, value: TermId) {
        if self.else_value.is_none() {
            self.else_value = Some(value);
        }
        self.entries.push((args, value));
    }

    /// Value of the function on `args`.
    #[must_use]
    pub fn eval(&self, args: &[TermId]) -> Option<TermId> {
        self.entries
            .iter()
            .find(|(key, _)| key.as_slice() == args)
            .map(|&(_, value)| value)
            .or(self.else_value)
    }

    /// Number of explicit entries.
    #[must_use]
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }
}

/// A model of the original, un-abstracted formula.
#[derive(Debug, Clone, Default)]
pub struct ConstructedModel {
    constants: Vec<(DeclId, TermId)>,
    const_index: FxHashMap<DeclId, usize>,
    functions: Vec<FuncInterp>,
    func_index: FxHashMap<DeclId, usize>,
}

impl ConstructedModel {
    /// Create an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value of a constant. Later calls for the same constant are
    /// ignored.
    pub fn set_const(&mut self, decl: DeclId, value: TermId) {
        if self.const_index.contains_key(&decl) {
            return;
        }
        self.const_index.insert(decl, self.constants.len());
        self.constants.push((decl, value));
    }

    /// Add an entry to the interpretation of `decl`.
    pub fn add_func_entry(&mut self, decl: DeclId, args: SmallVec<[TermId; 4]>, value: TermId) {
        let idx = *self.func_index.entry(decl).or_insert_with(|| {
            self.functions.push(FuncInterp::new(decl));
            self.functions.len() - 1
        });
        self.functions[idx].add_entry(args, value);
    }

    /// Value of a constant.
    #[must_use]
    pub fn get_const_interp(&self, decl: DeclId) -> Option<TermId> {
        self.const_index.get(&decl).map(|&i| self.constants[i].1)
    }

    /// Interpretation of a function.
    #[must_use]
    pub fn get_func_interp(&self, decl: DeclId) -> Option<&FuncInterp> {
        self.func_index.get(&decl).map(|&i| &self.functions[i])
    }

    /// Value of `decl` applied to literal `args`.
    #[must_use]
    pub fn eval_app(&self, decl: DeclId, args: &[TermId]) -> Option<TermId> {
        if args.is_empty() {
            return self.get_const_interp(decl);
        }
        self.get_func_interp(decl)?.eval(args)
    }

    /// Constants in insertion order.
    pub fn constants(&self) -> impl Iterator<Item = (DeclId, TermId)> + '_ {
        self.constants.iter().copied()
    }

    /// Function interpretations in insertion order.
    pub fn functions(&self) -> impl Iterator<Item = &FuncInterp> + '_ {
        self.functions.iter()
    }

    /// Number of constants.
    #[must_use]
    pub fn num_constants(&self) -> usize {
        self.constants.len()
    }

    /// Number of function interpretations.
    #[must_use]
    pub fn num_functions(&self) -> usize {
        self.functions.len()
    }

    /// Pretty print the model in SMT-LIB2 format.
    #[must_use]
    pub fn pretty_print(&self, tm: &TermManager) -> String {
        if self.constants.is_empty() && self.functions.is_empty() {
            return "(model)".to_string();
        }

        let mut out = String::from("(model\n");
        for &(decl, value) in &self.constants {
            let range = tm.get_decl(decl).map(|d| d.range);
            let sort = range.map_or_else(|| "?".to_string(), |s| tm.sort_name(s));
            let _ = writeln!(
                out,
                "  (define-fun {} () {} {})",
                tm.decl_name(decl),
                sort,
                tm.display(value)
            );
        }

        for interp in &self.functions {
            let Some(decl) = tm.get_decl(interp.decl) else {
                continue;
            };
            let params = decl
                .domain
                .iter()
                .enumerate()
                .map(|(i, &s)| format!("(x!{} {})", i, tm.sort_name(s)))
                .collect::<Vec<_>>()
                .join(" ");

            let mut body = interp
                .else_value
                .map_or_else(|| "?".to_string(), |v| tm.display(v).to_string());
            for (args, value) in interp.entries.iter().rev() {
                let conds = args
                    .iter()
                    .enumerate()
                    .map(|(i, &a)| format!("(= x!{} {})", i, tm.display(a)))
                    .collect::<Vec<_>>();
                let cond = if conds.len() == 1 {
                    conds[0].clone()
                } else {
                    format!("(and {})", conds.join(" "))
                };
                body = format!("(ite {} {} {})", cond, tm.display(*value), body);
            }

            let _ = writeln!(
                out,
                "  (define-fun {} ({}) {} {})",
                tm.decl_name(interp.decl),
                params,
                tm.sort_name(decl.range),
                body
            );
        }
        out.push(')');
        out
    }
}
