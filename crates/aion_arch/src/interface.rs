//! The fixed, extensible catalog of abstract interfaces.

use crate::ids::InterfaceId;
use aion_ir::Direction;
use serde::{Deserialize, Serialize};

/// A single port in an interface's signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSignature {
    /// The port's name, as referenced by implementations and wiring.
    pub name: String,
    /// Input or output.
    pub direction: Direction,
    /// The port's width in bits.
    pub width: u32,
}

/// An interface definition: an identifier plus its port signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDef {
    /// The interface this definition describes.
    pub id: InterfaceId,
    /// The interface's ports.
    pub ports: Vec<PortSignature>,
}

fn port(name: &str, direction: Direction, width: u32) -> PortSignature {
    PortSignature {
        name: name.to_string(),
        direction,
        width,
    }
}

fn lut_def(num_inputs: u32) -> InterfaceDef {
    let mut ports: Vec<PortSignature> = (0..num_inputs)
        .map(|i| port(&format!("I{i}"), Direction::Input, 1))
        .collect();
    ports.push(port("O", Direction::Output, 1));
    InterfaceDef {
        id: InterfaceId::lut(num_inputs),
        ports,
    }
}

fn mux2_def() -> InterfaceDef {
    InterfaceDef {
        id: InterfaceId::mux(2),
        ports: vec![
            port("I0", Direction::Input, 1),
            port("I1", Direction::Input, 1),
            port("S", Direction::Input, 1),
            port("O", Direction::Output, 1),
        ],
    }
}

fn carry_def(width: u32) -> InterfaceDef {
    InterfaceDef {
        id: InterfaceId::carry(width),
        ports: vec![
            port("CI", Direction::Input, 1),
            port("DI", Direction::Input, width),
            port("S", Direction::Input, width),
            port("CO", Direction::Output, 1),
            port("O", Direction::Output, width),
        ],
    }
}

/// Returns the fixed catalog of interfaces the synthesizer knows about:
/// `LUT2`, `LUT4`, `LUT6`, `MUX2`, `carry2`, `carry8`.
///
/// This is plain data, not a closed enum, so adding a new standard
/// interface is a one-line addition here rather than a match arm
/// scattered through the synthesizer.
pub fn standard_registry() -> Vec<InterfaceDef> {
    vec![
        lut_def(2),
        lut_def(4),
        lut_def(6),
        mux2_def(),
        carry_def(2),
        carry_def(8),
    ]
}

/// Looks up the definition for `id` in the standard registry.
pub fn lookup(id: &InterfaceId) -> Option<InterfaceDef> {
    standard_registry().into_iter().find(|def| &def.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_has_six_entries() {
        assert_eq!(standard_registry().len(), 6);
    }

    #[test]
    fn lut4_has_five_ports() {
        let def = lookup(&InterfaceId::lut(4)).unwrap();
        assert_eq!(def.ports.len(), 5);
        assert_eq!(def.ports[4].name, "O");
        assert_eq!(def.ports[4].direction, Direction::Output);
    }

    #[test]
    fn carry_width_reflected_in_ports() {
        let def = lookup(&InterfaceId::carry(8)).unwrap();
        let di = def.ports.iter().find(|p| p.name == "DI").unwrap();
        assert_eq!(di.width, 8);
    }

    #[test]
    fn lookup_misses_unregistered_interface() {
        assert!(lookup(&InterfaceId::lut(5)).is_none());
    }
}
