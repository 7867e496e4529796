//! Interface synthesizer for the Aion FPGA technology mapper.
//!
//! Given an [`aion_arch::ArchDescription`] and a desired abstract interface
//! (`LUT{n}`, `MUX{n}`, `carry{w}`), [`realize::realize`] recursively lowers
//! it to a netlist expression, falling back to rules R1-R6 when the target
//! fabric has no direct implementation. Sketch generators in [`sketch`]
//! build candidate expressions with symbolic holes for whole operation
//! families (bitwise, comparison, multiplication, ...); a [`solver::HoleSolver`]
//! is the external collaborator that fills those holes in against a
//! reference behavior.
//!
//! # Usage
//!
//! ```ignore
//! use aion_synth::realize::{realize, RealizeCtx};
//! let mut ctx = RealizeCtx::new(&arch, &interner, &mut alloc);
//! let (result, internal_data) = realize(&mut ctx, &interface_id, &port_map, None)?;
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod internal_data;
pub mod output_map;
pub mod realize;
pub mod routing;
pub mod sketch;
pub mod solver;
pub mod test_support;

pub use error::SynthError;
pub use internal_data::InternalData;
pub use realize::{realize, RealizeCtx};
pub use solver::{HoleSolver, Model, SketchQuery, SolveOutcome};
