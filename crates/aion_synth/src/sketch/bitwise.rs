//! §4.3.1 bitwise sketch: one `LUT{n_inputs}` per bit position, sharing a
//! single internal-data token, with the logical↔physical bit order chosen
//! by the solver via two routing holes.

use super::common::extend_input;
use crate::error::SynthError;
use crate::internal_data::InternalData;
use crate::output_map;
use crate::realize::{realize, RealizeCtx};
use crate::routing::Routing;
use aion_arch::InterfaceId;
use aion_common::BitVec;
use aion_ir::Expr;
use std::collections::HashMap;

/// Builds a bitwise sketch over `logical_inputs`, each extended to
/// `width` bits, using `n_inputs`-input LUTs.
pub fn generate(
    ctx: &mut RealizeCtx<'_>,
    logical_inputs: &[Expr],
    n_inputs: u32,
    width: u32,
    internal_data: Option<InternalData>,
) -> Result<(Expr, InternalData), SynthError> {
    let extended: Vec<Expr> = logical_inputs
        .iter()
        .map(|e| extend_input(ctx, e, width))
        .collect::<Result<_, _>>()?;

    let in_routing = ctx.alloc_mut().fresh_bool();
    let out_routing = ctx.alloc_mut().fresh_bool();

    let mut shared = internal_data;
    let mut bits = Vec::with_capacity(width as usize);
    for j in 0..width {
        let fwd_j = Routing::Bitwise.logical_to_physical(j, width);
        let rev_j = Routing::BitwiseReverse.logical_to_physical(j, width);
        let mut port_map = HashMap::new();
        for (idx, input) in extended.iter().enumerate() {
            let fwd_bit = Expr::extract(input.clone(), fwd_j, fwd_j)?;
            let rev_bit = Expr::extract(input.clone(), rev_j, rev_j)?;
            let chosen = Expr::mux(in_routing.clone(), rev_bit, fwd_bit)?;
            port_map.insert(format!("I{idx}"), chosen);
        }
        for idx in extended.len() as u32..n_inputs {
            port_map.insert(format!("I{idx}"), Expr::literal(BitVec::from_u64(0, 1)));
        }
        let (result, data) = realize(ctx, &InterfaceId::lut(n_inputs), &port_map, shared.take())?;
        shared = Some(data);
        bits.push(output_map::get(ctx.interner(), &result, "O")?);
    }

    let fwd_concat = Expr::concat(bits.iter().rev().cloned().collect())?;
    let rev_concat = Expr::concat(bits)?;
    let assembled = Expr::mux(out_routing, rev_concat, fwd_concat)?;

    Ok((assembled, shared.expect("width > 0 produces at least one LUT")))
}
