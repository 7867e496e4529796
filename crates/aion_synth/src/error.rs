//! Error types for interface realization and sketch generation.

use aion_arch::InterfaceId;

/// Errors that can occur while realizing an interface or generating a
/// sketch.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    /// Neither the requested interface nor any of the §4.2 rewrite
    /// preconditions were satisfied by the architecture description.
    #[error("interface not realizable under this architecture: {interface:?}")]
    NotRealizable {
        /// The interface that could not be realized.
        interface: InterfaceId,
    },

    /// Realizing `interface` would recurse back into an identical
    /// `(interface, architecture)` pair already on the call stack.
    #[error("realizing {interface:?} cycles back through itself on this architecture")]
    RealizationCycle {
        /// The interface whose realization cycled.
        interface: InterfaceId,
    },

    /// A width mismatch surfaced while building IR during realization or
    /// sketch generation.
    #[error(transparent)]
    WidthMismatch(#[from] aion_ir::IrError),

    /// A wiring-DSL or architecture-description error surfaced while
    /// resolving a template.
    #[error(transparent)]
    Arch(#[from] aion_arch::ArchError),

    /// A port referenced by a template or realization rule was not bound
    /// in the port map passed to [`crate::realize::realize`].
    #[error("port {name} not bound for interface {interface:?}")]
    MissingPort {
        /// The interface being realized.
        interface: InterfaceId,
        /// The unbound port name.
        name: String,
    },

    /// An output name was looked up in a realization result hash-map that
    /// did not contain it.
    #[error("output {name} missing from realization result")]
    MissingOutput {
        /// The missing output name.
        name: String,
    },

    /// The internal-data token passed in for reuse did not match the
    /// shape the realization rule expected.
    #[error("internal-data shape mismatch while realizing {interface:?}")]
    InternalDataShape {
        /// The interface being realized.
        interface: InterfaceId,
    },

    /// A sketch generator's own threaded internal-data token (not tied to
    /// a single interface realization) did not match the shape expected.
    #[error("internal-data shape mismatch in sketch generator")]
    SketchDataShape,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_not_realizable() {
        let err = SynthError::NotRealizable {
            interface: InterfaceId::mux(2),
        };
        assert!(format!("{err}").contains("not realizable"));
    }

    #[test]
    fn display_realization_cycle() {
        let err = SynthError::RealizationCycle {
            interface: InterfaceId::lut(6),
        };
        assert!(format!("{err}").contains("cycles back"));
    }

    #[test]
    fn display_missing_port() {
        let err = SynthError::MissingPort {
            interface: InterfaceId::lut(4),
            name: "I2".to_string(),
        };
        assert!(format!("{err}").contains("I2"));
    }

    #[test]
    fn display_missing_output() {
        let err = SynthError::MissingOutput {
            name: "CO".to_string(),
        };
        assert!(format!("{err}").contains("CO"));
    }
}
