//! The normalized, immutable architecture description consulted by the
//! interface synthesizer.

use crate::ids::InterfaceId;
use crate::wiring::WiringExpr;
use aion_common::ContentHash;
use aion_ir::Direction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One port binding inside a [`ModuleTemplate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortTemplate {
    /// The port's name.
    pub name: String,
    /// The port's value, as an unresolved wiring-DSL term.
    pub value: WiringExpr,
    /// Input or output.
    pub direction: Direction,
    /// The port's declared width, in bits.
    pub width: u32,
}

/// One compile-time parameter binding inside a [`ModuleTemplate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamTemplate {
    /// The parameter's name.
    pub name: String,
    /// The parameter's value, as an unresolved wiring-DSL term.
    pub value: WiringExpr,
}

/// A hardware-module instance template: everything needed to instantiate
/// the module once the wiring-DSL terms are resolved against a scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleTemplate {
    /// The module's name.
    pub module_name: String,
    /// The module's ports, in declaration order.
    pub ports: Vec<PortTemplate>,
    /// The module's parameters, in declaration order.
    pub parameters: Vec<ParamTemplate>,
    /// An identifier for the source file the module was declared in.
    pub filepath: String,
}

/// One entry in an [`ArchDescription`]: how to realize a single interface
/// on this fabric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceImpl {
    /// The interface this entry realizes.
    pub id: InterfaceId,
    /// The module template to instantiate.
    pub module: ModuleTemplate,
    /// Internal-state variable names and their widths (truth-table memory
    /// and similar fabric-programmable state).
    pub internal_state: BTreeMap<String, u32>,
    /// Interface output name to wiring-DSL projection expression, evaluated
    /// against the instantiated module's ports.
    pub outputs: BTreeMap<String, WiringExpr>,
}

/// An ordered list of interface implementations for one target fabric.
///
/// Lookup is by structural identifier equality, per the first entry in
/// declared order — rule order in the synthesizer depends on this being
/// stable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchDescription {
    implementations: Vec<InterfaceImpl>,
    content_hash: ContentHash,
}

impl ArchDescription {
    /// Builds a description from already-normalized implementations,
    /// computing its content hash.
    pub fn new(implementations: Vec<InterfaceImpl>) -> Self {
        let content_hash = hash_implementations(&implementations);
        Self {
            implementations,
            content_hash,
        }
    }

    /// Returns the first implementation whose identifier structurally
    /// equals `id`, if any.
    pub fn find(&self, id: &InterfaceId) -> Option<&InterfaceImpl> {
        self.implementations.iter().find(|imp| &imp.id == id)
    }

    /// Returns every implementation in declared order.
    pub fn implementations(&self) -> &[InterfaceImpl] {
        &self.implementations
    }

    /// A content hash identifying this description's structure, used by
    /// the synthesizer's cycle-detection guard.
    pub fn content_hash(&self) -> ContentHash {
        self.content_hash
    }
}

fn hash_implementations(implementations: &[InterfaceImpl]) -> ContentHash {
    let bytes = serde_json::to_vec(implementations)
        .expect("InterfaceImpl serialization cannot fail for in-memory data");
    ContentHash::from_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wiring::parse;

    fn sample_impl() -> InterfaceImpl {
        InterfaceImpl {
            id: InterfaceId::lut(4),
            module: ModuleTemplate {
                module_name: "LUT4".to_string(),
                ports: vec![PortTemplate {
                    name: "I0".to_string(),
                    value: parse("a").unwrap(),
                    direction: Direction::Input,
                    width: 1,
                }],
                parameters: vec![],
                filepath: "lut4.rkt".to_string(),
            },
            internal_state: BTreeMap::from([("INIT".to_string(), 16)]),
            outputs: BTreeMap::from([("O".to_string(), parse("O").unwrap())]),
        }
    }

    #[test]
    fn find_by_structural_id() {
        let desc = ArchDescription::new(vec![sample_impl()]);
        assert!(desc.find(&InterfaceId::lut(4)).is_some());
        assert!(desc.find(&InterfaceId::lut(6)).is_none());
    }

    #[test]
    fn content_hash_stable_for_same_structure() {
        let a = ArchDescription::new(vec![sample_impl()]);
        let b = ArchDescription::new(vec![sample_impl()]);
        assert_eq!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn content_hash_differs_for_different_structure() {
        let a = ArchDescription::new(vec![sample_impl()]);
        let b = ArchDescription::new(vec![]);
        assert_ne!(a.content_hash(), b.content_hash());
    }
}
