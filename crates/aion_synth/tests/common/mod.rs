//! Architecture fixtures shared by the scenario and property tests.
//! Mirrors real fabrics closely enough to exercise each realization rule,
//! without modeling anything beyond the interfaces this crate consumes.

use aion_arch::{ArchDescription, Direction, InterfaceId, InterfaceImpl, ModuleTemplate, ParamTemplate, PortTemplate};
use std::collections::BTreeMap;

fn input_port(name: &str, width: u32) -> PortTemplate {
    PortTemplate {
        name: name.to_string(),
        value: aion_arch::wiring::parse(name).unwrap(),
        direction: Direction::Input,
        width,
    }
}

fn output_port(name: &str, width: u32) -> PortTemplate {
    PortTemplate {
        name: name.to_string(),
        value: aion_arch::wiring::parse(name).unwrap(),
        direction: Direction::Output,
        width,
    }
}

pub fn lut_impl(k: u32, module_name: &str) -> InterfaceImpl {
    let mut ports: Vec<PortTemplate> = (0..k).map(|i| input_port(&format!("I{i}"), 1)).collect();
    ports.push(output_port("O", 1));
    InterfaceImpl {
        id: InterfaceId::lut(k),
        module: ModuleTemplate {
            module_name: module_name.to_string(),
            ports,
            parameters: vec![ParamTemplate {
                name: "INIT".to_string(),
                value: aion_arch::wiring::parse("INIT").unwrap(),
            }],
            filepath: format!("{module_name}.rkt"),
        },
        internal_state: BTreeMap::from([("INIT".to_string(), 1u32 << k)]),
        outputs: BTreeMap::from([("O".to_string(), aion_arch::wiring::parse("O").unwrap())]),
    }
}

pub fn mux2_impl() -> InterfaceImpl {
    InterfaceImpl {
        id: InterfaceId::mux(2),
        module: ModuleTemplate {
            module_name: "MUX2".to_string(),
            ports: vec![input_port("I0", 1), input_port("I1", 1), input_port("S", 1), output_port("O", 1)],
            parameters: vec![],
            filepath: "mux2.rkt".to_string(),
        },
        internal_state: BTreeMap::new(),
        outputs: BTreeMap::from([("O".to_string(), aion_arch::wiring::parse("O").unwrap())]),
    }
}

pub fn carry_impl(width: u32, module_name: &str) -> InterfaceImpl {
    let ports = vec![
        input_port("CI", 1),
        input_port("DI", width),
        input_port("S", width),
        output_port("CO", 1),
        output_port("O", width),
    ];
    InterfaceImpl {
        id: InterfaceId::carry(width),
        module: ModuleTemplate {
            module_name: module_name.to_string(),
            ports,
            parameters: vec![],
            filepath: format!("{module_name}.rkt"),
        },
        internal_state: BTreeMap::new(),
        outputs: BTreeMap::from([
            ("CO".to_string(), aion_arch::wiring::parse("CO").unwrap()),
            ("O".to_string(), aion_arch::wiring::parse("O").unwrap()),
        ]),
    }
}

/// E1/E2: a Lattice ECP5-like fabric, `LUT4` plus a 2-bit `CCU2C` carry
/// tile.
pub fn ecp5_arch() -> ArchDescription {
    ArchDescription::new(vec![lut_impl(4, "LUT4"), carry_impl(2, "CCU2C")])
}

/// E1 alone: ECP5 with no carry primitive at all.
pub fn ecp5_lut_only_arch() -> ArchDescription {
    ArchDescription::new(vec![lut_impl(4, "LUT4")])
}

/// E3/E4: a Xilinx UltraScale+-like fabric, `LUT2`, `LUT6`, and an 8-bit
/// `CARRY8` tile.
pub fn ultrascale_arch() -> ArchDescription {
    ArchDescription::new(vec![lut_impl(2, "LUT2"), lut_impl(6, "LUT6"), carry_impl(8, "CARRY8")])
}

/// E6: a SOFA-like fabric exposing only a 4-input fracturable LUT, no
/// carry primitive and no mux primitive.
pub fn sofa_arch() -> ArchDescription {
    ArchDescription::new(vec![lut_impl(4, "frac_lut4")])
}

/// A `LUT2`-only fabric, narrow enough that `BruteForceSolver` can
/// enumerate its whole hole space (a 4-bit INIT plus two routing bools).
pub fn tiny_lut2_arch() -> ArchDescription {
    ArchDescription::new(vec![lut_impl(2, "LUT2")])
}

/// `LUT2` plus a 2-bit `CCU2C`, for solver-verification of the
/// bitwise-with-carry sketch at a width the brute-force enumerator can
/// still finish in reasonable time.
pub fn tiny_lut2_carry2_arch() -> ArchDescription {
    ArchDescription::new(vec![lut_impl(2, "LUT2"), carry_impl(2, "CCU2C")])
}
