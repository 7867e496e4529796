//! The SMT solver boundary: the core emits a [`SketchQuery`] and expects a
//! [`SolveOutcome`] back. The solver itself is always an external
//! collaborator — this crate only defines the contract.

use aion_common::BitVec;
use aion_ir::{Expr, HoleId};
use std::collections::HashMap;

/// A completed-equivalence query: "does some assignment to `holes` make
/// `sketch` equivalent to `spec` for every assignment to `free_variables`?"
#[derive(Debug, Clone)]
pub struct SketchQuery {
    /// The abstract bit-vector specification expression.
    pub spec: Expr,
    /// The candidate sketch expression, containing symbolic holes.
    pub sketch: Expr,
    /// The user-declared inputs quantified universally.
    pub free_variables: Vec<Expr>,
    /// The holes quantified existentially.
    pub holes: Vec<HoleId>,
}

impl SketchQuery {
    /// Builds a query from a spec/sketch pair, the free variables the
    /// spec was built from, and the holes allocated while building the
    /// sketch.
    pub fn new(spec: Expr, sketch: Expr, free_variables: Vec<Expr>, holes: Vec<HoleId>) -> Self {
        Self {
            spec,
            sketch,
            free_variables,
            holes,
        }
    }
}

/// A model: an assignment of concrete values to a query's holes.
#[derive(Debug, Clone, Default)]
pub struct Model {
    assignments: HashMap<HoleId, BitVec>,
}

impl Model {
    /// Builds an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `hole` to `value`.
    pub fn insert(&mut self, hole: HoleId, value: BitVec) {
        self.assignments.insert(hole, value);
    }

    /// Returns the value bound to `hole`, if any.
    pub fn get(&self, hole: HoleId) -> Option<&BitVec> {
        self.assignments.get(&hole)
    }

    /// The number of holes this model assigns.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Returns `true` if this model assigns no holes.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// The result of asking a [`HoleSolver`] to complete a [`SketchQuery`].
#[derive(Debug, Clone)]
pub enum SolveOutcome {
    /// A satisfying assignment was found.
    Sat(Model),
    /// No assignment to the holes makes the sketch equivalent to the spec.
    Unsat,
    /// The solver could not decide within its resource bounds.
    Unknown,
}

/// An external SMT solver capable of completing a sketch against a spec.
///
/// Implementations dispatch `query` to an actual solver process or
/// library; this crate ships no implementation, only the contract and a
/// brute-force stand-in under [`crate::test_support`] for tests.
pub trait HoleSolver {
    /// Attempts to solve `query`, returning a model or a definitive
    /// unsat/unknown result.
    fn solve(&self, query: &SketchQuery) -> SolveOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;
    use aion_common::Interner;
    use aion_ir::SymbolicAllocator;

    #[test]
    fn model_insert_and_get() {
        let mut alloc = SymbolicAllocator::new();
        let hole = alloc.fresh_bool();
        let id = match hole {
            Expr::Hole { id, .. } => id,
            _ => unreachable!(),
        };
        let mut model = Model::new();
        assert!(model.is_empty());
        model.insert(id, BitVec::from_bool(true));
        assert_eq!(model.len(), 1);
        assert_eq!(model.get(id).unwrap().to_u64(), Some(1));
    }

    #[test]
    fn query_construction() {
        let interner = Interner::new();
        let a = Expr::var(interner.get_or_intern("a"), 8);
        let query = SketchQuery::new(a.clone(), a, vec![], vec![]);
        assert!(query.holes.is_empty());
    }
}
