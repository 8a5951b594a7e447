//! Congruence Table.
//!
//! Maps an uninterpreted symbol applied to a tuple of argument *values* to the
//! value the abstract model gave the first application seen with that key.
//! A later application with the same key either agrees or is a congruence
//! violation.

use ackr_core::{DeclId, TermId};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::collections::hash_map::Entry;

/// Argument values of an application.
pub type ArgValues = SmallVec<[TermId; 4]>;

/// Value recorded for a congruence key, with the term that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CongruenceEntry {
    /// Recorded value.
    pub value: TermId,
    /// First application that produced the key.
    pub witness: TermId,
}

/// Outcome of [`CongruenceTable::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Congruence {
    /// The key was new and is now recorded.
    Fresh,
    /// The key was recorded with the same value.
    Agrees(CongruenceEntry),
    /// The key was recorded with a different value.
    Conflict(CongruenceEntry),
}

/// One row of the table, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Applied symbol.
    pub decl: DeclId,
    /// Argument values.
    pub args: ArgValues,
    /// Recorded value and witness.
    pub entry: CongruenceEntry,
}

/// Table of `(symbol, argument values) -> (value, witness)`.
#[derive(Debug, Clone, Default)]
pub struct CongruenceTable {
    rows: Vec<TableRow>,
    index: FxHashMap<(DeclId, ArgValues), usize>,
}

impl CongruenceTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Record that `term`, an application of `decl` whose arguments evaluate
    /// to `args`, has model value `value`.
    ///
    /// An existing entry is never overwritten.
    pub fn insert(
        &mut self,
        decl: DeclId,
        args: ArgValues,
        value: TermId,
        term: TermId,
    ) -> Congruence {
        match self.index.entry((decl, args)) {
            Entry::Occupied(o) => {
                let entry = self.rows[*o.get()].entry;
                if entry.value == value {
                    Congruence::Agrees(entry)
                } else {
                    Congruence::Conflict(entry)
                }
            }
            Entry::Vacant(v) => {
                let entry = CongruenceEntry {
                    value,
                    witness: term,
                };
                self.rows.push(TableRow {
                    decl,
                    args: v.key().1.clone(),
                    entry,
                });
                v.insert(self.rows.len() - 1);
                Congruence::Fresh
            }
        }
    }

    /// Recorded entry for a key.
    #[must_use]
    pub fn get(&self, decl: DeclId, args: &[TermId]) -> Option<&CongruenceEntry> {
        let key = (decl, args.iter().copied().collect::<ArgValues>());
        self.index.get(&key).map(|&i| &self.rows[i].entry)
    }

    /// Rows in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &TableRow> + '_ {
        self.rows.iter()
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.index.clear();
    }
}
