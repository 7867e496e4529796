//! Fresh symbolic values ("holes") for one synthesis session.
//!
//! A [`SymbolicAllocator`] mints the bit-vector and boolean holes that
//! sketch generators and the interface synthesizer leave for an external
//! solver to fill in. Allocation has observable identity and is totally
//! ordered within one session — see the crate's concurrency notes.

use crate::arena::Arena;
use crate::expr::Expr;
use crate::ids::HoleId;
use serde::{Deserialize, Serialize};

/// The declared type of a symbolic hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoleKind {
    /// A boolean hole (represented as a 1-bit value wherever it is used).
    Bool,
    /// A bit-vector hole of the given width.
    BitVec(u32),
}

impl HoleKind {
    /// The width, in bits, this hole occupies when used as an expression.
    pub fn width(self) -> u32 {
        match self {
            HoleKind::Bool => 1,
            HoleKind::BitVec(w) => w,
        }
    }
}

/// Mints fresh symbolic holes for one synthesis session.
///
/// Not `Sync`: allocation takes `&mut self`, so two sessions sharing one
/// allocator is a compile error rather than a race.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolicAllocator {
    holes: Arena<HoleId, HoleKind>,
}

impl SymbolicAllocator {
    /// Creates a new, empty allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh bit-vector hole of the given width and returns the
    /// expression referring to it.
    pub fn fresh_bitvector(&mut self, width: u32) -> Expr {
        let id = self.holes.alloc(HoleKind::BitVec(width));
        Expr::Hole { id, width }
    }

    /// Allocates a fresh boolean hole and returns the expression referring
    /// to it.
    pub fn fresh_bool(&mut self) -> Expr {
        let id = self.holes.alloc(HoleKind::Bool);
        Expr::Hole { id, width: 1 }
    }

    /// The number of holes allocated so far in this session.
    pub fn len(&self) -> usize {
        self.holes.len()
    }

    /// Whether no holes have been allocated yet.
    pub fn is_empty(&self) -> bool {
        self.holes.is_empty()
    }

    /// Iterates over every hole allocated so far, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (HoleId, HoleKind)> + '_ {
        self.holes.iter().map(|(id, kind)| (id, *kind))
    }

    /// Looks up the declared kind of a previously allocated hole.
    pub fn kind_of(&self, id: HoleId) -> HoleKind {
        *self.holes.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_holes_get_distinct_ids() {
        let mut alloc = SymbolicAllocator::new();
        let a = alloc.fresh_bitvector(4);
        let b = alloc.fresh_bitvector(4);
        match (a, b) {
            (Expr::Hole { id: id_a, .. }, Expr::Hole { id: id_b, .. }) => {
                assert_ne!(id_a, id_b);
            }
            _ => panic!("expected holes"),
        }
        assert_eq!(alloc.len(), 2);
    }

    #[test]
    fn bool_hole_has_width_one() {
        let mut alloc = SymbolicAllocator::new();
        let h = alloc.fresh_bool();
        assert!(matches!(h, Expr::Hole { width: 1, .. }));
    }

    #[test]
    fn allocation_is_ordered() {
        let mut alloc = SymbolicAllocator::new();
        let ids: Vec<_> = (0..5)
            .map(|_| match alloc.fresh_bitvector(1) {
                Expr::Hole { id, .. } => id,
                _ => unreachable!(),
            })
            .collect();
        let raws: Vec<u32> = ids.iter().map(|id| id.as_raw()).collect();
        assert_eq!(raws, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn kind_of_reports_declared_kind() {
        let mut alloc = SymbolicAllocator::new();
        let h = alloc.fresh_bitvector(8);
        let id = match h {
            Expr::Hole { id, .. } => id,
            _ => unreachable!(),
        };
        assert_eq!(alloc.kind_of(id), HoleKind::BitVec(8));
    }

    #[test]
    fn empty_allocator() {
        let alloc = SymbolicAllocator::new();
        assert!(alloc.is_empty());
    }
}
