//! Helpers for building and reading the "hash-map from interface-output
//! name to projection expression" that [`crate::realize`] returns.
//!
//! Output names are a small, fixed vocabulary (`O`, `CO`, ...), so they are
//! encoded as interned-identifier literal keys rather than full symbolic
//! expressions; lookups compare the literal's numeric value rather than
//! expression identity.

use crate::error::SynthError;
use aion_common::{BitVec, Interner};
use aion_ir::Expr;

const KEY_WIDTH: u32 = 32;

/// Builds the literal key expression tagging `name` in an output hash-map.
pub fn key(interner: &Interner, name: &str) -> Expr {
    let raw = interner.get_or_intern(name).as_raw();
    Expr::literal(BitVec::from_u64(raw as u64, KEY_WIDTH))
}

/// Builds a `HashMapLit` expression from `(output name, value)` pairs.
pub fn build(interner: &Interner, entries: Vec<(&str, Expr)>) -> Expr {
    let pairs = entries
        .into_iter()
        .map(|(name, value)| (key(interner, name), value))
        .collect();
    Expr::hash_map_literal(pairs)
}

/// Looks up the value bound to `name` in a `HashMapLit` expression
/// previously built by [`build`].
pub fn get(interner: &Interner, map: &Expr, name: &str) -> Result<Expr, SynthError> {
    let target = interner.get_or_intern(name).as_raw() as u64;
    match map {
        Expr::HashMapLit(entries) => entries
            .iter()
            .find_map(|(k, v)| match k {
                Expr::Literal(bv) if bv.to_u64() == Some(target) => Some(v.clone()),
                _ => None,
            })
            .ok_or_else(|| SynthError::MissingOutput {
                name: name.to_string(),
            }),
        _ => Err(SynthError::MissingOutput {
            name: name.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_then_get_roundtrips() {
        let interner = Interner::new();
        let o = Expr::literal(BitVec::from_u64(1, 1));
        let map = build(&interner, vec![("O", o)]);
        let found = get(&interner, &map, "O").unwrap();
        assert_eq!(found.width(), Some(1));
    }

    #[test]
    fn get_missing_key_errors() {
        let interner = Interner::new();
        let map = build(&interner, vec![("O", Expr::literal(BitVec::from_u64(0, 1)))]);
        assert!(get(&interner, &map, "CO").is_err());
    }

    #[test]
    fn get_on_non_map_errors() {
        let interner = Interner::new();
        let not_a_map = Expr::literal(BitVec::from_u64(0, 1));
        assert!(get(&interner, &not_a_map, "O").is_err());
    }
}
