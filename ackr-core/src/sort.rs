//! Sort System.
//!
//! Sorts are interned once and referred to by [`SortId`] everywhere else, so
//! sort equality is an integer comparison.

use lasso::Spur;
use rustc_hash::FxHashMap;

/// Interned sort identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortId(pub u32);

impl SortId {
    /// Get the raw index.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Kind of a sort.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SortKind {
    /// Boolean sort.
    Bool,
    /// Mathematical integers.
    Int,
    /// Fixed-width bit-vectors.
    BitVec(u32),
    /// User-declared sort without built-in interpretation.
    Uninterpreted(Spur),
}

/// A sort.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sort {
    /// Identifier of this sort.
    pub id: SortId,
    /// What kind of sort this is.
    pub kind: SortKind,
}

impl Sort {
    /// Check if this is the Boolean sort.
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self.kind, SortKind::Bool)
    }

    /// Check if this is the integer sort.
    #[must_use]
    pub fn is_int(&self) -> bool {
        matches!(self.kind, SortKind::Int)
    }

    /// Bit-vector width, if this is a bit-vector sort.
    #[must_use]
    pub fn bv_width(&self) -> Option<u32> {
        match self.kind {
            SortKind::BitVec(w) => Some(w),
            _ => None,
        }
    }
}

/// Sort interner.
#[derive(Debug, Clone)]
pub struct SortManager {
    sorts: Vec<Sort>,
    cache: FxHashMap<SortKind, SortId>,
    /// The Boolean sort.
    pub bool_sort: SortId,
    /// The integer sort.
    pub int_sort: SortId,
}

impl SortManager {
    /// Create a sort manager with `Bool` and `Int` pre-registered.
    #[must_use]
    pub fn new() -> Self {
        let mut manager = Self {
            sorts: Vec::new(),
            cache: FxHashMap::default(),
            bool_sort: SortId(0),
            int_sort: SortId(0),
        };
        manager.bool_sort = manager.intern(SortKind::Bool);
        manager.int_sort = manager.intern(SortKind::Int);
        manager
    }

    /// Intern a sort kind.
    pub fn intern(&mut self, kind: SortKind) -> SortId {
        if let Some(&id) = self.cache.get(&kind) {
            return id;
        }
        let id = SortId(self.sorts.len() as u32);
        self.sorts.push(Sort {
            id,
            kind: kind.clone(),
        });
        self.cache.insert(kind, id);
        id
    }

    /// Get the bit-vector sort of the given width.
    pub fn bitvec(&mut self, width: u32) -> SortId {
        self.intern(SortKind::BitVec(width))
    }

    /// Look up a sort by id.
    #[must_use]
    pub fn get(&self, id: SortId) -> Option<&Sort> {
        self.sorts.get(id.0 as usize)
    }

    /// Number of interned sorts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sorts.len()
    }

    /// Check whether no sort is interned. Never true after `new`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sorts.is_empty()
    }
}

impl Default for SortManager {
    fn default() -> Self {
        Self::new()
    }
}
