//! Error types for loading and resolving architecture descriptions.

/// Errors that can occur while loading an architecture description or
/// resolving its wiring-DSL expressions.
#[derive(Debug, thiserror::Error)]
pub enum ArchError {
    /// An I/O error occurred while reading the architecture description file.
    #[error("failed to read architecture description: {0}")]
    Io(#[from] std::io::Error),

    /// The file's contents could not be parsed as the architecture-description
    /// schema.
    #[error("failed to parse architecture description: {0}")]
    Parse(String),

    /// A required key (`interface`, `modules`, or `outputs`) was missing
    /// from an implementation entry.
    #[error("implementation missing required field: {0}")]
    MissingField(String),

    /// An implementation named more than one module; only one is supported.
    #[error("implementation for {interface} has {count} modules, expected exactly one")]
    MultipleModulesPerImplementation {
        /// The interface whose implementation is ill-formed.
        interface: String,
        /// How many modules were found.
        count: usize,
    },

    /// A port's direction string was neither `"input"` nor `"output"`.
    #[error("unknown port direction {direction:?} on port {port}")]
    UnknownPortDirection {
        /// The offending direction string.
        direction: String,
        /// The port it was declared on.
        port: String,
    },

    /// A wiring-DSL string did not parse.
    #[error("wiring syntax error: {0}")]
    WiringSyntax(String),

    /// A wiring-DSL symbol was not found in the port map or internal-state
    /// map it was resolved against.
    #[error("unresolved wiring symbol: {name}")]
    UnresolvedSymbol {
        /// The symbol that failed to resolve.
        name: String,
    },

    /// A width mismatch surfaced while evaluating a wiring-DSL expression.
    #[error(transparent)]
    Ir(#[from] aion_ir::IrError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_field() {
        let err = ArchError::MissingField("outputs".to_string());
        assert_eq!(
            format!("{err}"),
            "implementation missing required field: outputs"
        );
    }

    #[test]
    fn display_multiple_modules() {
        let err = ArchError::MultipleModulesPerImplementation {
            interface: "LUT4".to_string(),
            count: 2,
        };
        assert!(format!("{err}").contains("LUT4"));
    }

    #[test]
    fn display_unresolved_symbol() {
        let err = ArchError::UnresolvedSymbol {
            name: "ci".to_string(),
        };
        assert_eq!(format!("{err}"), "unresolved wiring symbol: ci");
    }
}
