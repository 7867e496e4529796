//! Helpers shared across the five sketch generators.

use crate::error::SynthError;
use crate::internal_data::InternalData;
use crate::realize::RealizeCtx;
use aion_common::BitVec;
use aion_ir::Expr;

/// Extends `expr` to `width` bits, choosing zero-extend or dup-extend via
/// a fresh boolean hole when `expr` is narrower than `width`.
pub fn extend_input(ctx: &mut RealizeCtx<'_>, expr: &Expr, width: u32) -> Result<Expr, SynthError> {
    let found = expr.width().ok_or_else(|| SynthError::WidthMismatch(aion_ir::IrError::WidthMismatch {
        expected: width,
        found: 0,
        context: "sketch input has no bit-vector width".to_string(),
    }))?;
    if found == width {
        return Ok(expr.clone());
    }
    let hole = ctx.alloc_mut().fresh_bool();
    let zero = Expr::zero_extend(expr.clone(), width)?;
    let dup = Expr::dup_extend(expr.clone(), width)?;
    Ok(Expr::mux(hole, dup, zero)?)
}

/// A fresh constant-zero, 1-bit expression.
pub fn zero_bit() -> Expr {
    Expr::literal(BitVec::from_u64(0, 1))
}

/// Splits a 2-element threaded internal-data tuple into its two seeds,
/// or two fresh `None`s if no token was threaded in.
pub fn split2(data: Option<InternalData>) -> Result<(Option<InternalData>, Option<InternalData>), SynthError> {
    match data {
        None => Ok((None, None)),
        Some(InternalData::Tuple(v)) if v.len() == 2 => {
            let mut it = v.into_iter();
            Ok((Some(it.next().unwrap()), Some(it.next().unwrap())))
        }
        Some(_) => Err(SynthError::SketchDataShape),
    }
}

/// Splits a 3-element threaded internal-data tuple into its three seeds.
pub fn split3(
    data: Option<InternalData>,
) -> Result<(Option<InternalData>, Option<InternalData>, Option<InternalData>), SynthError> {
    match data {
        None => Ok((None, None, None)),
        Some(InternalData::Tuple(v)) if v.len() == 3 => {
            let mut it = v.into_iter();
            Ok((Some(it.next().unwrap()), Some(it.next().unwrap()), Some(it.next().unwrap())))
        }
        Some(_) => Err(SynthError::SketchDataShape),
    }
}
