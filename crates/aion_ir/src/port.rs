//! Ports and parameters on hardware-module instances.

use crate::expr::Expr;
use aion_common::Ident;
use serde::{Deserialize, Serialize};

/// The direction of a port on a hardware-module instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// A port that receives a value from the instantiating context.
    Input,
    /// A port whose value is produced by the instantiated module.
    Output,
}

/// A single port binding on a hardware-module instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    /// The port's name.
    pub name: Ident,
    /// The expression bound to this port.
    pub value: Expr,
    /// Whether this is an input or output port.
    pub direction: Direction,
    /// The port's declared width, in bits.
    pub width: u32,
}

/// A compile-time parameter binding on a hardware-module instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    /// The parameter's name.
    pub name: Ident,
    /// The expression bound to this parameter. Must reduce to a constant.
    pub value: Expr,
}
