//! Architecture description and interface catalog for the Aion FPGA
//! technology mapper.
//!
//! This crate models FPGA primitives behind abstract interfaces
//! (`LUT{n}`, `MUX{n}`, `carry{w}`), loads architecture-description files
//! mapping those interfaces onto concrete fabric primitives, and provides
//! the wiring-DSL used inside them.

#![warn(missing_docs)]

pub mod description;
pub mod error;
pub mod ids;
pub mod interface;
pub mod loader;
pub mod wiring;

pub use aion_ir::Direction;
pub use description::{ArchDescription, InterfaceImpl, ModuleTemplate, ParamTemplate, PortTemplate};
pub use error::ArchError;
pub use ids::{InterfaceId, InterfaceKind};
pub use interface::{lookup, standard_registry, InterfaceDef, PortSignature};
pub use loader::{load, load_from_str};
pub use wiring::WiringExpr;
