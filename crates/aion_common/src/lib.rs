//! Shared foundational types used across the Aion FPGA toolchain.
//!
//! This crate provides core types including interned identifiers, content
//! hashing, packed two-state bit-vector values, and common result types.

#![warn(missing_docs)]

pub mod bit_vec;
pub mod hash;
pub mod ident;
pub mod result;

pub use bit_vec::BitVec;
pub use hash::ContentHash;
pub use ident::{Ident, Interner};
pub use result::{AionResult, InternalError};
