//! §4.3.5 barrel-shift sketch. Deliberately over-provisioned to
//! `num_stages = width`; direction (left/right) and fill mode
//! (logical/arithmetic) are both solver-chosen holes.

use super::common::extend_input;
use crate::error::SynthError;
use crate::internal_data::InternalData;
use crate::output_map;
use crate::realize::{realize, RealizeCtx};
use aion_arch::InterfaceId;
use aion_common::BitVec;
use aion_ir::Expr;
use std::collections::HashMap;

/// Builds a barrel-shift sketch: `logical_inputs[0]` is the value shifted,
/// `logical_inputs[1]` is the shift amount.
pub fn generate(
    ctx: &mut RealizeCtx<'_>,
    logical_inputs: &[Expr],
    _n_inputs: u32,
    width: u32,
    internal_data: Option<InternalData>,
) -> Result<(Expr, InternalData), SynthError> {
    let value = extend_input(ctx, &logical_inputs[0], width)?;
    let amount = extend_input(ctx, &logical_inputs[1], width)?;
    let logical_or_arithmetic = ctx.alloc_mut().fresh_bool();
    let direction = ctx.alloc_mut().fresh_bool();

    let (mut mux_data, mut lut_data) = match internal_data {
        Some(InternalData::Tuple(v)) if v.len() == 2 => {
            let mut it = v.into_iter();
            (Some(it.next().unwrap()), Some(it.next().unwrap()))
        }
        Some(_) => return Err(SynthError::SketchDataShape),
        None => (None, None),
    };

    let num_stages = width;
    let mut cur = value;
    for s in 0..num_stages {
        let shift_amt = 1u32 << s;
        let selector = if s + 1 < num_stages {
            Expr::extract(amount.clone(), s, s)?
        } else {
            or_reduce(ctx, &amount, s, width, &mut lut_data)?
        };

        let mut next_bits = Vec::with_capacity(width as usize);
        for i in 0..width {
            let right_val = if i + shift_amt < width {
                Expr::extract(cur.clone(), i + shift_amt, i + shift_amt)?
            } else {
                let msb = Expr::extract(cur.clone(), width - 1, width - 1)?;
                Expr::mux(logical_or_arithmetic.clone(), msb, zero_bit())?
            };
            let left_val = if i >= shift_amt {
                Expr::extract(cur.clone(), i - shift_amt, i - shift_amt)?
            } else {
                zero_bit()
            };

            let mux_port_map = HashMap::from([
                ("I0".to_string(), left_val),
                ("I1".to_string(), right_val),
                ("S".to_string(), direction.clone()),
            ]);
            let (mux_result, data) = realize(ctx, &InterfaceId::mux(2), &mux_port_map, mux_data.take())?;
            mux_data = Some(data);

            let bit_val = Expr::mux(selector.clone(), output_map::get(ctx.interner(), &mux_result, "O")?, Expr::extract(cur.clone(), i, i)?)?;
            next_bits.push(bit_val);
        }
        cur = Expr::concat(next_bits.into_iter().rev().collect())?;
    }

    let combined = InternalData::Tuple(vec![
        mux_data.expect("width > 0 always realizes at least one MUX2"),
        lut_data.unwrap_or_else(|| InternalData::Tuple(vec![])),
    ]);
    Ok((cur, combined))
}

fn zero_bit() -> Expr {
    Expr::literal(BitVec::from_u64(0, 1))
}

/// OR-reduces `amount[s..width)` via a LUT, or returns the bit directly
/// when only one bit remains.
fn or_reduce(
    ctx: &mut RealizeCtx<'_>,
    amount: &Expr,
    s: u32,
    width: u32,
    lut_data: &mut Option<InternalData>,
) -> Result<Expr, SynthError> {
    let k = width - s;
    if k == 1 {
        return Ok(Expr::extract(amount.clone(), s, s)?);
    }
    let mut port_map = HashMap::new();
    for (idx, bit_pos) in (s..width).enumerate() {
        port_map.insert(format!("I{idx}"), Expr::extract(amount.clone(), bit_pos, bit_pos)?);
    }
    let (result, data) = realize(ctx, &InterfaceId::lut(k), &port_map, lut_data.take())?;
    *lut_data = Some(data);
    output_map::get(ctx.interner(), &result, "O")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sketch::tests_support::ecp5_like_arch;
    use aion_arch::{ArchDescription, Direction, InterfaceImpl, ModuleTemplate, PortTemplate};
    use aion_common::Interner;
    use aion_ir::SymbolicAllocator;
    use std::collections::BTreeMap;

    fn mux2_impl() -> InterfaceImpl {
        InterfaceImpl {
            id: InterfaceId::mux(2),
            module: ModuleTemplate {
                module_name: "MUX2".to_string(),
                ports: vec![
                    PortTemplate {
                        name: "I0".to_string(),
                        value: aion_arch::wiring::parse("I0").unwrap(),
                        direction: Direction::Input,
                        width: 1,
                    },
                    PortTemplate {
                        name: "I1".to_string(),
                        value: aion_arch::wiring::parse("I1").unwrap(),
                        direction: Direction::Input,
                        width: 1,
                    },
                    PortTemplate {
                        name: "S".to_string(),
                        value: aion_arch::wiring::parse("S").unwrap(),
                        direction: Direction::Input,
                        width: 1,
                    },
                    PortTemplate {
                        name: "O".to_string(),
                        value: aion_arch::wiring::parse("O").unwrap(),
                        direction: Direction::Output,
                        width: 1,
                    },
                ],
                parameters: vec![],
                filepath: "mux2.rkt".to_string(),
            },
            internal_state: BTreeMap::new(),
            outputs: BTreeMap::from([("O".to_string(), aion_arch::wiring::parse("O").unwrap())]),
        }
    }

    fn arch_with_mux() -> ArchDescription {
        let mut arch = ecp5_like_arch();
        let mut implementations = arch.implementations().to_vec();
        implementations.push(mux2_impl());
        arch = ArchDescription::new(implementations);
        arch
    }

    #[test]
    fn shift_sketch_has_declared_width() {
        let arch = arch_with_mux();
        let interner = Interner::new();
        let mut alloc = SymbolicAllocator::new();
        let mut ctx = RealizeCtx::new(&arch, &interner, &mut alloc);
        let a = Expr::var(interner.get_or_intern("a"), 5);
        let b = Expr::var(interner.get_or_intern("b"), 5);
        let (expr, data) = generate(&mut ctx, &[a, b], 2, 5, None).unwrap();
        assert_eq!(expr.width(), Some(5));
        assert_eq!(data.as_tuple().unwrap().len(), 2);
    }
}
