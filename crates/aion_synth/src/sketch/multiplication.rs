//! §4.3.4 multiplication sketch: a partial-product AND matrix reduced by a
//! left-fold of shared bitwise-with-carry adders. Produces the low `width`
//! bits of the product.

use super::bitwise;
use super::common::{extend_input, split2, zero_bit};
use crate::error::SynthError;
use crate::internal_data::InternalData;
use crate::output_map;
use crate::realize::{realize, RealizeCtx};
use aion_arch::InterfaceId;
use aion_ir::Expr;
use std::collections::HashMap;

/// Builds a `width`-bit-result multiplication sketch for two equal-width
/// operands `logical_inputs[0]` (`a`) and `logical_inputs[1]` (`b`).
pub fn generate(
    ctx: &mut RealizeCtx<'_>,
    logical_inputs: &[Expr],
    _n_inputs: u32,
    width: u32,
    internal_data: Option<InternalData>,
) -> Result<(Expr, InternalData), SynthError> {
    let a = extend_input(ctx, &logical_inputs[0], width)?;
    let b = extend_input(ctx, &logical_inputs[1], width)?;
    let (and_seed, adder_seed) = split2(internal_data)?;

    let mut and_data = and_seed;
    let mut rows = Vec::with_capacity(width as usize);
    for r in 0..width {
        let mut cols = Vec::with_capacity(width as usize);
        for c in 0..width {
            let bit = if c >= r {
                let a_bit = Expr::extract(a.clone(), c - r, c - r)?;
                let b_bit = Expr::extract(b.clone(), r, r)?;
                let port_map = HashMap::from([("I0".to_string(), a_bit), ("I1".to_string(), b_bit)]);
                let (result, data) = realize(ctx, &InterfaceId::lut(2), &port_map, and_data.take())?;
                and_data = Some(data);
                output_map::get(ctx.interner(), &result, "O")?
            } else {
                zero_bit()
            };
            cols.push(bit);
        }
        rows.push(Expr::concat(cols.into_iter().rev().collect())?);
    }

    let ci_hole = ctx.alloc_mut().fresh_bool();
    let mut acc = rows[0].clone();
    let mut adder_data = adder_seed;
    for row in &rows[1..] {
        let (sum, data) = shared_add(ctx, &acc, row, width, &ci_hole, adder_data.take())?;
        adder_data = Some(data);
        acc = sum;
    }

    let combined = InternalData::Tuple(vec![
        and_data.expect("width >= 1 always produces at least one AND gate"),
        adder_data.unwrap_or_else(|| InternalData::Tuple(vec![])),
    ]);
    Ok((acc, combined))
}

/// A `width`-bit add of `acc + row` using a caller-supplied, persistent
/// carry-in hole and a threaded internal-data token, so every fold step
/// shares identical LUT/carry programming.
fn shared_add(
    ctx: &mut RealizeCtx<'_>,
    acc: &Expr,
    row: &Expr,
    width: u32,
    ci_hole: &Expr,
    seed: Option<InternalData>,
) -> Result<(Expr, InternalData), SynthError> {
    let (bitwise_seed, carry_seed) = split2(seed)?;
    let (s_expr, bitwise_out) = bitwise::generate(ctx, &[acc.clone(), row.clone()], 2, width, bitwise_seed)?;
    let port_map = HashMap::from([
        ("DI".to_string(), acc.clone()),
        ("S".to_string(), s_expr),
        ("CI".to_string(), ci_hole.clone()),
    ]);
    let (carry_result, carry_out) = realize(ctx, &InterfaceId::carry(width), &port_map, carry_seed)?;
    let o = output_map::get(ctx.interner(), &carry_result, "O")?;
    Ok((o, InternalData::Tuple(vec![bitwise_out, carry_out])))
}
