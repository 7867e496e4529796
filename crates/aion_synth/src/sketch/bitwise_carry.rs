//! §4.3.2 bitwise-with-carry sketch: a bitwise sketch feeds a `carry{width}`'s
//! `S` input; logical input 0 is `DI`; `CI` is a fresh hole. Output is `O`.

use super::bitwise;
use super::common::{extend_input, split2};
use crate::error::SynthError;
use crate::internal_data::InternalData;
use crate::output_map;
use crate::realize::{realize, RealizeCtx};
use aion_arch::InterfaceId;
use aion_ir::Expr;
use std::collections::HashMap;

/// Builds a bitwise-with-carry adder/combiner sketch: `O = carry{width}(DI =
/// logical_inputs[0], S = bitwise(logical_inputs), CI = fresh hole)`.
pub fn generate(
    ctx: &mut RealizeCtx<'_>,
    logical_inputs: &[Expr],
    n_inputs: u32,
    width: u32,
    internal_data: Option<InternalData>,
) -> Result<(Expr, InternalData), SynthError> {
    let (bitwise_seed, carry_seed) = split2(internal_data)?;
    let (s_expr, bitwise_out) = bitwise::generate(ctx, logical_inputs, n_inputs, width, bitwise_seed)?;
    let di = extend_input(ctx, &logical_inputs[0], width)?;
    let ci = ctx.alloc_mut().fresh_bool();

    let port_map = HashMap::from([
        ("DI".to_string(), di),
        ("S".to_string(), s_expr),
        ("CI".to_string(), ci),
    ]);
    let (carry_result, carry_out) = realize(ctx, &InterfaceId::carry(width), &port_map, carry_seed)?;
    let o = output_map::get(ctx.interner(), &carry_result, "O")?;

    Ok((o, InternalData::Tuple(vec![bitwise_out, carry_out])))
}
