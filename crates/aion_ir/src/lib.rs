//! AionIR — the netlist expression IR for the Aion FPGA technology mapper.
//!
//! This crate defines [`Expr`], the closed set of IR constructors used by
//! the interface synthesizer and sketch generators, the [`SymbolicAllocator`]
//! that mints fresh holes for the external solver to complete, and the
//! generic [`Arena`] the rest of the toolchain indexes entities with.

#![warn(missing_docs)]

pub mod arena;
pub mod error;
pub mod expr;
pub mod ids;
pub mod port;
pub mod symbolic;

pub use arena::{Arena, ArenaId};
pub use error::IrError;
pub use expr::Expr;
pub use ids::HoleId;
pub use port::{Direction, Parameter, Port};
pub use symbolic::{HoleKind, SymbolicAllocator};
