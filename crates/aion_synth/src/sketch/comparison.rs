//! §4.3.3 comparison sketch: two independent bitwise sketches feed a
//! `carry{width}`'s `DI`/`S`; the comparison result is the carry's `CO`,
//! not `O`.

use super::bitwise;
use super::common::split3;
use crate::error::SynthError;
use crate::internal_data::InternalData;
use crate::output_map;
use crate::realize::{realize, RealizeCtx};
use aion_arch::InterfaceId;
use aion_ir::Expr;
use std::collections::HashMap;

/// Builds a comparison sketch: `CO = carry{width}(DI = bitwise_a(inputs), S
/// = bitwise_b(inputs), CI = fresh hole)`, with the two bitwise sketches
/// built independently (distinct internal-data, potentially distinct
/// truth tables).
pub fn generate(
    ctx: &mut RealizeCtx<'_>,
    logical_inputs: &[Expr],
    n_inputs: u32,
    width: u32,
    internal_data: Option<InternalData>,
) -> Result<(Expr, InternalData), SynthError> {
    let (di_seed, s_seed, carry_seed) = split3(internal_data)?;
    let (di_expr, di_out) = bitwise::generate(ctx, logical_inputs, n_inputs, width, di_seed)?;
    let (s_expr, s_out) = bitwise::generate(ctx, logical_inputs, n_inputs, width, s_seed)?;
    let ci = ctx.alloc_mut().fresh_bool();

    let port_map = HashMap::from([
        ("DI".to_string(), di_expr),
        ("S".to_string(), s_expr),
        ("CI".to_string(), ci),
    ]);
    let (carry_result, carry_out) = realize(ctx, &InterfaceId::carry(width), &port_map, carry_seed)?;
    let co = output_map::get(ctx.interner(), &carry_result, "CO")?;

    Ok((co, InternalData::Tuple(vec![di_out, s_out, carry_out])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sketch::tests_support::ecp5_like_arch;
    use aion_common::Interner;
    use aion_ir::SymbolicAllocator;

    #[test]
    fn comparison_sketch_is_one_bit() {
        let arch = ecp5_like_arch();
        let interner = Interner::new();
        let mut alloc = SymbolicAllocator::new();
        let mut ctx = RealizeCtx::new(&arch, &interner, &mut alloc);
        let a = Expr::var(interner.get_or_intern("a"), 4);
        let b = Expr::var(interner.get_or_intern("b"), 4);
        let (expr, data) = generate(&mut ctx, &[a, b], 2, 4, None).unwrap();
        assert_eq!(expr.width(), Some(1));
        assert_eq!(data.as_tuple().unwrap().len(), 3);
    }
}
