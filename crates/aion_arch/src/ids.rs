//! Interface identifiers: the structural keys the synthesizer looks
//! implementations up by.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The family an interface belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceKind {
    /// A k-input lookup table.
    Lut,
    /// A multiplexer.
    Mux,
    /// A carry-chain tile.
    Carry,
}

/// A structural identifier for an abstract interface, e.g. `LUT4` or
/// `carry8`. Two identifiers are equal exactly when their kind and
/// parameters agree, regardless of how they were constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InterfaceId {
    /// The interface family.
    pub kind: InterfaceKind,
    /// Parameters distinguishing interfaces within a family, e.g.
    /// `num_inputs` for `LUT`/`MUX`, `width` for `carry`. Kept as a
    /// `BTreeMap` so equality and hashing are order-independent.
    pub parameters: BTreeMap<String, u32>,
}

impl InterfaceId {
    /// Builds a `LUT{n}` identifier.
    pub fn lut(num_inputs: u32) -> Self {
        Self {
            kind: InterfaceKind::Lut,
            parameters: BTreeMap::from([("num_inputs".to_string(), num_inputs)]),
        }
    }

    /// Builds a `MUX{n}` identifier.
    pub fn mux(num_inputs: u32) -> Self {
        Self {
            kind: InterfaceKind::Mux,
            parameters: BTreeMap::from([("num_inputs".to_string(), num_inputs)]),
        }
    }

    /// Builds a `carry{w}` identifier.
    pub fn carry(width: u32) -> Self {
        Self {
            kind: InterfaceKind::Carry,
            parameters: BTreeMap::from([("width".to_string(), width)]),
        }
    }

    /// Returns the value bound to `name` in this identifier's parameters,
    /// if present.
    pub fn param(&self, name: &str) -> Option<u32> {
        self.parameters.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_equality() {
        assert_eq!(InterfaceId::lut(4), InterfaceId::lut(4));
        assert_ne!(InterfaceId::lut(4), InterfaceId::lut(6));
        assert_ne!(InterfaceId::lut(2), InterfaceId::mux(2));
    }

    #[test]
    fn param_lookup() {
        let id = InterfaceId::carry(8);
        assert_eq!(id.param("width"), Some(8));
        assert_eq!(id.param("num_inputs"), None);
    }

    #[test]
    fn hashable() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(InterfaceId::lut(4));
        set.insert(InterfaceId::lut(4));
        set.insert(InterfaceId::lut(6));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn serde_roundtrip() {
        let id = InterfaceId::mux(2);
        let json = serde_json::to_string(&id).unwrap();
        let back: InterfaceId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
