//! The internal-data token: an opaque tree sharing symbolic state across
//! recursive interface realizations.

use aion_ir::Expr;
use serde::{Deserialize, Serialize};

/// The symbolic state bound to one interface realization's internal-state
/// variables (truth tables, carry padding bits, mux selectors), or a
/// composite of such trees for a realization built from several
/// sub-realizations.
///
/// Shape is determined purely structurally by the synthesis path taken: a
/// direct realization produces a [`InternalData::Leaf`] per internal-state
/// variable wrapped in a [`InternalData::Tuple`], while a rule that
/// recurses into sub-interfaces (R3's LUT+LUT+MUX, R4/R5's carry folds)
/// produces a tuple nesting sub-trees in recursion order. Two calls with
/// the same `(arch, id, port_map shape, internal_data=null)` always
/// produce the same shape — this is load-bearing for reusing a token
/// across calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InternalData {
    /// A single hole-bearing expression bound to one internal-state
    /// variable.
    Leaf(Expr),
    /// A composite of sub-trees, in a fixed order determined by the
    /// realization rule that produced it.
    Tuple(Vec<InternalData>),
}

impl InternalData {
    /// Returns the leaf expression, if this is a [`InternalData::Leaf`].
    pub fn as_leaf(&self) -> Option<&Expr> {
        match self {
            InternalData::Leaf(expr) => Some(expr),
            InternalData::Tuple(_) => None,
        }
    }

    /// Returns the tuple elements, if this is a [`InternalData::Tuple`].
    pub fn as_tuple(&self) -> Option<&[InternalData]> {
        match self {
            InternalData::Tuple(elems) => Some(elems),
            InternalData::Leaf(_) => None,
        }
    }

    /// Returns `true` if `self` and `other` have the same tree shape,
    /// ignoring the symbolic identity of their leaves.
    pub fn same_shape(&self, other: &InternalData) -> bool {
        match (self, other) {
            (InternalData::Leaf(_), InternalData::Leaf(_)) => true,
            (InternalData::Tuple(a), InternalData::Tuple(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_shape(y))
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aion_common::BitVec;

    fn leaf() -> InternalData {
        InternalData::Leaf(Expr::literal(BitVec::from_u64(0, 1)))
    }

    #[test]
    fn leaf_accessors() {
        let l = leaf();
        assert!(l.as_leaf().is_some());
        assert!(l.as_tuple().is_none());
    }

    #[test]
    fn tuple_accessors() {
        let t = InternalData::Tuple(vec![leaf(), leaf()]);
        assert!(t.as_tuple().is_some());
        assert!(t.as_leaf().is_none());
    }

    #[test]
    fn same_shape_matches_leaves() {
        assert!(leaf().same_shape(&leaf()));
    }

    #[test]
    fn same_shape_matches_nested_tuples() {
        let a = InternalData::Tuple(vec![leaf(), InternalData::Tuple(vec![leaf(), leaf()])]);
        let b = InternalData::Tuple(vec![leaf(), InternalData::Tuple(vec![leaf(), leaf()])]);
        assert!(a.same_shape(&b));
    }

    #[test]
    fn different_shapes_do_not_match() {
        let a = InternalData::Tuple(vec![leaf()]);
        let b = InternalData::Tuple(vec![leaf(), leaf()]);
        assert!(!a.same_shape(&b));
        assert!(!leaf().same_shape(&a));
    }
}
