//! Loads an [`ArchDescription`] from a structured architecture-description
//! file.
//!
//! Parsing is delegated to `serde_yaml_ng`; this module's job is validating
//! the raw, possibly ill-formed schema against §4.5/§7 and normalizing it
//! into the immutable [`ArchDescription`] the synthesizer consumes.

use crate::description::{ArchDescription, InterfaceImpl, ModuleTemplate, ParamTemplate, PortTemplate};
use crate::error::ArchError;
use crate::ids::{InterfaceId, InterfaceKind};
use crate::wiring;
use aion_ir::Direction;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawRoot {
    implementations: Vec<RawImplementation>,
}

#[derive(Debug, Deserialize)]
struct RawImplementation {
    interface: Option<RawInterfaceId>,
    modules: Option<Vec<RawModule>>,
    #[serde(default)]
    internal_data: BTreeMap<String, u32>,
    outputs: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
struct RawInterfaceId {
    name: String,
    #[serde(default)]
    parameters: BTreeMap<String, u32>,
}

#[derive(Debug, Deserialize)]
struct RawModule {
    module_name: String,
    ports: Vec<RawPort>,
    #[serde(default)]
    parameters: Vec<RawParam>,
    filepath: String,
}

#[derive(Debug, Deserialize)]
struct RawPort {
    name: String,
    value: String,
    direction: String,
    bitwidth: u32,
}

#[derive(Debug, Deserialize)]
struct RawParam {
    name: String,
    value: String,
}

/// Loads and normalizes an architecture description from a file on disk.
pub fn load(path: &Path) -> Result<ArchDescription, ArchError> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

/// Parses and normalizes an architecture description from a YAML string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_from_str(content: &str) -> Result<ArchDescription, ArchError> {
    let raw: RawRoot =
        serde_yaml_ng::from_str(content).map_err(|e| ArchError::Parse(e.to_string()))?;
    let implementations = raw
        .implementations
        .into_iter()
        .map(normalize_implementation)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ArchDescription::new(implementations))
}

fn normalize_implementation(raw: RawImplementation) -> Result<InterfaceImpl, ArchError> {
    let raw_id = raw
        .interface
        .ok_or_else(|| ArchError::MissingField("interface".to_string()))?;
    let id = normalize_interface_id(raw_id)?;

    let modules = raw
        .modules
        .ok_or_else(|| ArchError::MissingField("modules".to_string()))?;
    if modules.len() != 1 {
        return Err(ArchError::MultipleModulesPerImplementation {
            interface: format!("{:?}", id.kind),
            count: modules.len(),
        });
    }
    let module = normalize_module(modules.into_iter().next().expect("checked len == 1"))?;

    let raw_outputs = raw
        .outputs
        .ok_or_else(|| ArchError::MissingField("outputs".to_string()))?;
    let outputs = raw_outputs
        .into_iter()
        .map(|(name, expr)| wiring::parse(&expr).map(|parsed| (name, parsed)))
        .collect::<Result<BTreeMap<_, _>, _>>()?;

    Ok(InterfaceImpl {
        id,
        module,
        internal_state: raw.internal_data,
        outputs,
    })
}

fn normalize_interface_id(raw: RawInterfaceId) -> Result<InterfaceId, ArchError> {
    let kind = match raw.name.to_ascii_lowercase().as_str() {
        "lut" => InterfaceKind::Lut,
        "mux" => InterfaceKind::Mux,
        "carry" => InterfaceKind::Carry,
        other => {
            return Err(ArchError::Parse(format!(
                "unknown interface kind: {other:?}"
            )))
        }
    };
    Ok(InterfaceId {
        kind,
        parameters: raw.parameters,
    })
}

fn normalize_module(raw: RawModule) -> Result<ModuleTemplate, ArchError> {
    let ports = raw
        .ports
        .into_iter()
        .map(normalize_port)
        .collect::<Result<Vec<_>, _>>()?;
    let parameters = raw
        .parameters
        .into_iter()
        .map(normalize_param)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ModuleTemplate {
        module_name: raw.module_name,
        ports,
        parameters,
        filepath: raw.filepath,
    })
}

fn normalize_port(raw: RawPort) -> Result<PortTemplate, ArchError> {
    let direction = match raw.direction.as_str() {
        "input" => Direction::Input,
        "output" => Direction::Output,
        _ => {
            return Err(ArchError::UnknownPortDirection {
                direction: raw.direction,
                port: raw.name,
            })
        }
    };
    let value = wiring::parse(&raw.value)?;
    Ok(PortTemplate {
        name: raw.name,
        value,
        direction,
        width: raw.bitwidth,
    })
}

fn normalize_param(raw: RawParam) -> Result<ParamTemplate, ArchError> {
    let value = wiring::parse(&raw.value)?;
    Ok(ParamTemplate {
        name: raw.name,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LUT4_YAML: &str = r#"
implementations:
  - interface:
      name: LUT
      parameters:
        num_inputs: 4
    modules:
      - module_name: LUT4
        ports:
          - {name: I0, value: i0, direction: input, bitwidth: 1}
          - {name: I1, value: i1, direction: input, bitwidth: 1}
          - {name: I2, value: i2, direction: input, bitwidth: 1}
          - {name: I3, value: i3, direction: input, bitwidth: 1}
          - {name: O, value: lut_out, direction: output, bitwidth: 1}
        parameters:
          - {name: INIT, value: init}
        filepath: lut4.rkt
    internal_data:
      init: 16
    outputs:
      O: O
"#;

    #[test]
    fn load_minimal_lut4() {
        let desc = load_from_str(LUT4_YAML).unwrap();
        let found = desc.find(&InterfaceId::lut(4)).unwrap();
        assert_eq!(found.module.module_name, "LUT4");
        assert_eq!(found.module.ports.len(), 5);
        assert_eq!(found.internal_state.get("init"), Some(&16));
    }

    #[test]
    fn missing_interface_errors() {
        let yaml = "implementations:\n  - modules: []\n    outputs: {}\n";
        let err = load_from_str(yaml).unwrap_err();
        assert!(matches!(err, ArchError::MissingField(_)));
    }

    #[test]
    fn missing_modules_errors() {
        let yaml = "implementations:\n  - interface: {name: LUT, parameters: {num_inputs: 4}}\n    outputs: {}\n";
        let err = load_from_str(yaml).unwrap_err();
        assert!(matches!(err, ArchError::MissingField(_)));
    }

    #[test]
    fn missing_outputs_errors() {
        let yaml = r#"
implementations:
  - interface: {name: LUT, parameters: {num_inputs: 2}}
    modules:
      - module_name: LUT2
        ports: []
        filepath: lut2.rkt
"#;
        let err = load_from_str(yaml).unwrap_err();
        assert!(matches!(err, ArchError::MissingField(_)));
    }

    #[test]
    fn multiple_modules_errors() {
        let yaml = r#"
implementations:
  - interface: {name: LUT, parameters: {num_inputs: 4}}
    modules:
      - module_name: LUT4a
        ports: []
        filepath: a.rkt
      - module_name: LUT4b
        ports: []
        filepath: b.rkt
    outputs: {O: O}
"#;
        let err = load_from_str(yaml).unwrap_err();
        assert!(matches!(
            err,
            ArchError::MultipleModulesPerImplementation { .. }
        ));
    }

    #[test]
    fn unknown_port_direction_errors() {
        let yaml = r#"
implementations:
  - interface: {name: LUT, parameters: {num_inputs: 2}}
    modules:
      - module_name: LUT2
        ports:
          - {name: I0, value: i0, direction: sideways, bitwidth: 1}
        filepath: lut2.rkt
    outputs: {O: O}
"#;
        let err = load_from_str(yaml).unwrap_err();
        assert!(matches!(err, ArchError::UnknownPortDirection { .. }));
    }

    #[test]
    fn bad_wiring_syntax_errors() {
        let yaml = r#"
implementations:
  - interface: {name: LUT, parameters: {num_inputs: 2}}
    modules:
      - module_name: LUT2
        ports:
          - {name: I0, value: "(frobnicate a)", direction: input, bitwidth: 1}
        filepath: lut2.rkt
    outputs: {O: O}
"#;
        let err = load_from_str(yaml).unwrap_err();
        assert!(matches!(err, ArchError::WiringSyntax(_)));
    }

    #[test]
    fn invalid_yaml_errors() {
        let err = load_from_str("not: valid: yaml: [").unwrap_err();
        assert!(matches!(err, ArchError::Parse(_)));
    }

    #[test]
    fn io_error_from_nonexistent_file() {
        let err = load(Path::new("/nonexistent/architecture.yaml")).unwrap_err();
        assert!(matches!(err, ArchError::Io(_)));
    }
}
