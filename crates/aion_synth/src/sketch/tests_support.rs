//! Small architectures shared by the sketch generators' own test modules.
//! Not part of the public API; see [`crate::test_support`] for the
//! integration-test-facing equivalents.

#![cfg(test)]

use aion_arch::{ArchDescription, Direction, InterfaceId, InterfaceImpl, ModuleTemplate, ParamTemplate, PortTemplate};
use std::collections::BTreeMap;

fn input_port(name: &str) -> PortTemplate {
    PortTemplate {
        name: name.to_string(),
        value: aion_arch::wiring::parse(name).unwrap(),
        direction: Direction::Input,
        width: 1,
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

pub fn lut_impl(k: u32) -> InterfaceImpl {
    let mut ports: Vec<PortTemplate> = (0..k).map(|i| input_port(&format!("I{i}"))).collect();
    ports.push(output_port("O", 1));
    InterfaceImpl {
        id: InterfaceId::lut(k),
        module: ModuleTemplate {
            module_name: format!("LUT{k}"),
            ports,
            parameters: vec![ParamTemplate {
                name: "INIT".to_string(),
                value: aion_arch::wiring::parse("INIT").unwrap(),
            }],
            filepath: "lut.rkt".to_string(),
        },
        internal_state: BTreeMap::from([("INIT".to_string(), 1u32 << k)]),
        outputs: BTreeMap::from([("O".to_string(), aion_arch::wiring::parse("O").unwrap())]),
    }
}

pub fn carry_impl(width: u32) -> InterfaceImpl {
    let ports = vec![
        PortTemplate {
            name: "CI".to_string(),
            value: aion_arch::wiring::parse("CI").unwrap(),
            direction: Direction::Input,
            width: 1,
        },
        PortTemplate {
            name: "DI".to_string(),
            value: aion_arch::wiring::parse("DI").unwrap(),
            direction: Direction::Input,
            width,
        },
        PortTemplate {
            name: "S".to_string(),
            value: aion_arch::wiring::parse("S").unwrap(),
            direction: Direction::Input,
            width,
        },
        output_port("CO", 1),
        output_port("O", width),
    ];
    InterfaceImpl {
        id: InterfaceId::carry(width),
        module: ModuleTemplate {
            module_name: format!("CARRY{width}"),
            ports,
            parameters: vec![],
            filepath: "carry.rkt".to_string(),
        },
        internal_state: BTreeMap::new(),
        outputs: BTreeMap::from([
            ("CO".to_string(), aion_arch::wiring::parse("CO").unwrap()),
            ("O".to_string(), aion_arch::wiring::parse("O").unwrap()),
        ]),
    }
}

/// A small fixed-width test fabric in the shape of an ECP5-like device:
/// `LUT2`, `LUT4`, and a native `carry{4}`.
pub fn ecp5_like_arch() -> ArchDescription {
    ArchDescription::new(vec![lut_impl(2), lut_impl(4), carry_impl(4)])
}
